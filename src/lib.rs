//! Low-level encoding & decoding of CoAP messages.
//!
//! The crate translates between an in-memory [`Message`] and the CoAP
//! wire format:
//!
//! ```text
//! byte 0:      version(2) | type(2) | token_length(4)
//! byte 1:      code_class(3) | code_detail(5)
//! bytes 2-3:   message id, big-endian u16
//! bytes 4..:   token (0-8 bytes)
//! then:        zero or more option TLVs, delta-numbered
//! then:        0xFF payload marker, iff a payload follows
//! then:        payload bytes to the end of the buffer
//! ```
//!
//! Encoding starts from a [`Packet`] - the caller-facing shape where
//! every field is optional-ish and defaults are filled in - and goes
//! through a [`Generator`], which owns the counter that assigns default
//! message ids:
//!
//! ```
//! use coap_wire::{parse, Generator, Opt, Packet};
//! use coap_wire::names::number::URI_PATH;
//!
//! let gen = Generator::new();
//!
//! let bytes = gen.generate(Packet { code: "GET".parse().unwrap(),
//!                                   opts: vec![Opt::new(URI_PATH, "sensors"),
//!                                              Opt::new(URI_PATH, "temp")],
//!                                   ..Default::default() })
//!                .unwrap();
//!
//! let msg = parse(&bytes).unwrap();
//! assert_eq!(msg.code.to_string(), "0.01");
//! assert_eq!(msg.opts[0].number.to_string(), "Uri-Path");
//! ```
//!
//! Decoding validates as it goes: an unsupported version, a token
//! length above 8, a reserved option nibble, or a non-empty message
//! with the `0.00` code each yield a dedicated error rather than a
//! partial message. Encoded messages are capped at [`MAX_SIZE`] bytes;
//! oversize input is an error, never a truncation.

#![cfg_attr(not(test), forbid(missing_debug_implementations, unreachable_pub))]
#![cfg_attr(not(test), deny(unsafe_code, missing_copy_implementations))]
#![deny(missing_docs)]

/// Byte cursor backing the parsing half of the crate
pub mod cursor;

/// Parsing traits
pub mod from_bytes;

/// Message structs
pub mod msg;

/// Serializing traits & impls
pub mod to_bytes;

#[doc(inline)]
pub use from_bytes::TryFromBytes;
#[doc(inline)]
pub use msg::*;
#[doc(inline)]
pub use to_bytes::{MessageToBytesError, TryIntoBytes};

#[cfg(test)]
pub(crate) fn test_msg() -> (Message, Vec<u8>) {
  let header: [u8; 4] = 0b0101_0001_0100_0101_0000_0000_0000_0111_u32.to_be_bytes();
  let token: [u8; 1] = [222u8];
  let content_format: &[u8] = b"application/json";
  let options: [&[u8]; 2] = [&[0b1100_1101u8, 0b0000_0011u8], content_format];
  let payload: [&[u8]; 2] = [&[0b1111_1111u8], b"ok, loud and clear"];
  let bytes = [header.as_ref(),
               token.as_ref(),
               options.concat().as_ref(),
               payload.concat().as_ref()].concat();

  let msg = Message { id: Id(7),
                      ty: Type::Non,
                      ver: Version(1),
                      token: Token(tinyvec::array_vec!([u8; 8] => 222)),
                      opts: vec![Opt::new(12u32, content_format)],
                      code: Code::new(2, 5),
                      payload: Payload(b"ok, loud and clear".to_vec()) };
  (msg, bytes)
}

#[cfg(test)]
pub(crate) mod tests {
  /// assert_eq, but failures print the operands in binary
  #[macro_export]
  macro_rules! assert_eqb {
    ($actual:expr, $expected:expr) => {
      if $actual != $expected {
        panic!("expected {:08b} to equal {:08b}", $actual, $expected)
      }
    };
  }

  /// assert_eq over byte iterators, failures printed in binary
  #[macro_export]
  macro_rules! assert_eqb_iter {
    ($actual:expr, $expected:expr) => {
      if $actual.iter().ne($expected.iter()) {
        panic!("expected {:?} to equal {:?}",
               $actual.into_iter()
                      .map(|b| format!("{:08b}", b))
                      .collect::<Vec<_>>(),
               $expected.into_iter()
                        .map(|b| format!("{:08b}", b))
                        .collect::<Vec<_>>())
      }
    };
  }
}
