use coap_wire::names::number::{ACCEPT, CONTENT_FORMAT, URI_PATH, URI_QUERY};
use coap_wire::{parse, Code, Generator, Id, Opt, Packet, Payload, Type};
use coap_wire::{MessageToBytesError, TryIntoBytes, MAX_SIZE};
use itertools::Itertools;

fn round_trip(packet: Packet) -> coap_wire::Message {
  let gen = Generator::seeded(1000);
  let bytes = gen.generate(packet).unwrap();
  parse(&bytes).unwrap()
}

#[test]
fn default_packet_is_minimal() {
  let gen = Generator::seeded(10);
  let bytes = gen.generate(Packet::default()).unwrap();

  assert_eq!(bytes.len(), 4);

  let msg = parse(&bytes).unwrap();
  assert_eq!(msg.ver.0, 1);
  assert_eq!(msg.ty, Type::Non);
  assert_eq!(msg.code, Code::new(0, 1));
  assert_eq!(msg.id, Id(10));
  assert!(msg.token.is_empty());
  assert!(msg.opts.is_empty());
  assert!(msg.payload.0.is_empty());
}

#[test]
fn successive_defaults_get_distinct_ids() {
  let gen = Generator::new();
  let ids = (0..16).map(|_| {
                     let bytes = gen.generate(Packet::default()).unwrap();
                     parse(&bytes).unwrap().id
                   })
                   .collect_vec();

  assert_eq!(ids.iter().unique().count(), 16);
}

#[test]
fn explicit_id_survives() {
  let msg = round_trip(Packet { id: Some(Id(42)),
                                ..Default::default() });
  assert_eq!(msg.id, Id(42));
}

#[test]
fn id_counter_wraps_around() {
  let gen = Generator::seeded(65534);
  let a = parse(&gen.generate(Packet::default()).unwrap()).unwrap();
  let b = parse(&gen.generate(Packet::default()).unwrap()).unwrap();

  assert_eq!(a.id, Id(65534));
  assert_eq!(b.id, Id(0));
}

#[test]
fn payload_and_token_round_trip() {
  let msg = round_trip(Packet { token: vec![1, 2, 3, 4, 5, 6, 7, 8],
                                payload: Payload(b"the weather is nice".to_vec()),
                                ..Default::default() });

  assert_eq!(&msg.token.0[..], &[1, 2, 3, 4, 5, 6, 7, 8]);
  assert_eq!(msg.payload.0, b"the weather is nice".to_vec());
}

#[test]
fn options_round_trip() {
  let opts = vec![Opt::new(URI_PATH, "sensors"),
                  Opt::new(URI_PATH, "temperature"),
                  Opt::new(CONTENT_FORMAT, vec![0x2a]),
                  Opt::new(URI_QUERY, "unit=celsius")];

  let msg = round_trip(Packet { opts: opts.clone(),
                                ..Default::default() });

  assert_eq!(msg.opts, opts);
}

#[test]
fn repeated_option_numbers_keep_their_order() {
  // stable sort: ties stay in the order the caller gave them
  let msg = round_trip(Packet { opts: vec![Opt::new(URI_PATH, "aaa"),
                                           Opt::new(URI_PATH, "bbb"),
                                           Opt::new(ACCEPT, vec![0x2a])],
                                ..Default::default() });

  assert_eq!(msg.opts,
             vec![Opt::new(URI_PATH, "aaa"),
                  Opt::new(URI_PATH, "bbb"),
                  Opt::new(ACCEPT, vec![0x2a])]);
}

#[test]
fn large_deltas_and_lengths_round_trip() {
  // deltas and lengths on both sides of the 13 and 269 thresholds
  let opts = vec![Opt::new(1u32, vec![0u8; 12]),
                  Opt::new(13u32, vec![1u8; 13]),
                  Opt::new(300u32, vec![2u8; 280]),
                  Opt::new(700u32, "q"),
                  // delta 65804 from the previous number, the largest
                  // two extension bytes can carry
                  Opt::new(66_504u32, "edge")];

  let msg = round_trip(Packet { opts: opts.clone(),
                                ..Default::default() });

  assert_eq!(msg.opts, opts);
}

#[test]
fn empty_message_round_trip() {
  let gen = Generator::seeded(7);
  let bytes = gen.generate(Packet { code: Code::EMPTY,
                                    ty: Type::Ack,
                                    ..Default::default() })
                 .unwrap();

  assert_eq!(bytes.len(), 4);

  let msg = parse(&bytes).unwrap();
  assert!(msg.code.is_empty());
  assert_eq!(msg.ty, Type::Ack);
}

#[test]
fn code_strings_round_trip() {
  for (s, display) in [("GET", "0.01"),
                       ("put", "0.03"),
                       ("iPATCH", "0.07"),
                       ("2.05", "2.05"),
                       ("404", "4.04"),
                       ("500", "5.00")] {
    let code = s.parse::<Code>().unwrap();
    let msg = round_trip(Packet { code,
                                  ..Default::default() });
    assert_eq!(msg.code.to_string(), display);
  }
}

#[test]
fn nine_byte_token_is_rejected() {
  let gen = Generator::seeded(0);
  let err = gen.generate(Packet { token: vec![0; 9],
                                  ..Default::default() })
               .unwrap_err();
  assert_eq!(err, MessageToBytesError::TokenTooLong(9));
}

#[test]
fn messages_are_capped_at_max_size() {
  let gen = Generator::seeded(0);
  let at_cap = Packet { payload: Payload(vec![0; MAX_SIZE - 5]),
                        ..Default::default() };
  let over_cap = Packet { payload: Payload(vec![0; MAX_SIZE - 4]),
                          ..Default::default() };

  assert_eq!(gen.generate(at_cap).unwrap().len(), MAX_SIZE);
  assert_eq!(gen.generate(over_cap).unwrap_err(),
             MessageToBytesError::PacketTooLarge(MAX_SIZE + 1));
}

#[test]
fn parse_then_reencode_is_identity() {
  let gen = Generator::seeded(99);
  let bytes = gen.generate(Packet { token: vec![0xde, 0xad],
                                    code: "2.05".parse().unwrap(),
                                    opts: vec![Opt::new(CONTENT_FORMAT, vec![0x2a])],
                                    payload: "hello".into(),
                                    ..Default::default() })
                 .unwrap();

  let reencoded = parse(&bytes).unwrap().try_into_bytes().unwrap();
  assert_eq!(reencoded, bytes);
}
