use log::trace;
use tinyvec::ArrayVec;

use crate::cursor::Cursor;
use crate::from_bytes::{TryConsumeBytes, TryFromBytes};
use crate::to_bytes::{MessageToBytesError, TryIntoBytes};

/// Message Code
pub mod code;

/// Message ID
pub mod id;

/// Message Options
pub mod opt;

/// Message parsing errors
pub mod parse_error;

/// Message Token
pub mod token;

/// Message Type
pub mod ty;

/// Message Version
pub mod ver;

pub use code::*;
pub use id::*;
pub use opt::*;
pub use parse_error::*;
pub use token::*;
pub use ty::*;
pub use ver::*;

/// Hard ceiling on the size of an encoded message, in bytes.
///
/// Encoding a message that would come out larger fails with
/// [`MessageToBytesError::PacketTooLarge`]; the codec never truncates.
pub const MAX_SIZE: usize = 1280;

/// Message payload (in http terms: the request or response body),
/// possibly empty.
///
/// A non-empty payload is separated from the options on the wire by the
/// `0xFF` payload marker byte; an empty payload is encoded as nothing
/// at all, marker included.
#[derive(Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct Payload(pub Vec<u8>);

impl From<Vec<u8>> for Payload {
  fn from(bytes: Vec<u8>) -> Self {
    Payload(bytes)
  }
}

impl<'a> From<&'a [u8]> for Payload {
  fn from(bytes: &'a [u8]) -> Self {
    Payload(bytes.to_vec())
  }
}

impl<'a> From<&'a str> for Payload {
  fn from(s: &'a str) -> Self {
    Payload(s.as_bytes().to_vec())
  }
}

/// Struct representing the first byte of a message.
///
/// ```text
/// CoAP version
/// |
/// |  Message type (confirmable, non-confirmable, ack, reset)
/// |  |
/// |  |  Length of token, in bytes. (4-bit integer)
/// |  |  |
/// vv vv vvvv
/// 01 00 0000
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Byte1 {
  pub(crate) ver: Version,
  pub(crate) ty: Type,
  pub(crate) tkl: u8,
}

impl From<u8> for Byte1 {
  fn from(b: u8) -> Self {
    let ver = b >> 6; // bits 0 & 1
    let ty = b >> 4 & 0b11; // bits 2 & 3
    let tkl = b & 0b1111; // last 4 bits

    Byte1 { ver: Version(ver),
            ty: Type::from(ty),
            tkl }
  }
}

/// # `Message` struct
/// Low-level representation of a message, near the actual byte layout.
///
/// Produced by parsing wire bytes ([`TryFromBytes`]), or by
/// [`Generator::fill_defaults`] normalizing a caller-supplied
/// [`Packet`]. Serializes with [`TryIntoBytes`].
///
/// ```
/// use coap_wire::{Message, TryFromBytes};
///
/// //                       version  token len  code (2.05 Content)
/// //                       |        |          /
/// //                       |  type  |         /  message ID
/// //                       |  |     |        |   |
/// //                       vv vv vvvv vvvvvvvv vvvvvvvvvvvvvvvv
/// let header: [u8; 4] = 0b_01_01_0000_01000101_0000000000101010u32.to_be_bytes();
///
/// let msg = Message::try_from_bytes(header).unwrap();
/// assert_eq!(msg.code.to_string(), "2.05");
/// assert_eq!(msg.id.0, 42);
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Message {
  /// see [`Id`] for details
  pub id: Id,
  /// see [`Type`] for details
  pub ty: Type,
  /// see [`Version`] for details
  pub ver: Version,
  /// see [`Token`] for details
  pub token: Token,
  /// see [`Code`] for details
  pub code: Code,
  /// see [`Opt`] for details
  pub opts: Vec<Opt>,
  /// see [`Payload`]
  pub payload: Payload,
}

impl Message {
  /// Number of bytes [`TryIntoBytes`] will produce for this message:
  /// the 4-byte header, the token, the delta-encoded options, and -
  /// when the code is not `0.00` and the payload is non-empty - the
  /// payload marker plus the payload.
  ///
  /// Assumes `opts` is sorted ascending by number, which holds for
  /// every `Message` this crate hands out.
  pub fn get_size(&self) -> usize {
    let mut prev = OptNumber(0);
    let opts_size: usize = self.opts
                               .iter()
                               .map(|opt| {
                                 let size = opt.get_size(prev);
                                 prev = opt.number;
                                 size
                               })
                               .sum();

    let payload_size = if self.carries_payload() {
      1 + self.payload.0.len()
    } else {
      0
    };

    4 + self.token.len() + opts_size + payload_size
  }

  fn carries_payload(&self) -> bool {
    !self.code.is_empty() && !self.payload.0.is_empty()
  }
}

impl<Bytes: AsRef<[u8]>> TryFromBytes<Bytes> for Message {
  type Error = MessageParseError;

  fn try_from_bytes(bytes: Bytes) -> Result<Self, Self::Error> {
    let mut bytes = Cursor::new(bytes);
    let len = bytes.len();

    let Byte1 { tkl, ty, ver } = bytes.next().ok_or_else(MessageParseError::eof)?.into();

    if ver != Version(1) {
      return Err(MessageParseError::UnsupportedVersion(ver.0));
    }

    if tkl > Token::MAX_LEN as u8 {
      return Err(MessageParseError::InvalidTokenLength(tkl));
    }

    let code = Code::from(bytes.next().ok_or_else(MessageParseError::eof)?);
    let id = Id::try_consume_bytes(&mut bytes)?;

    if code.is_empty() {
      // empty messages are the bare 4-byte header, nothing else
      if len != 4 {
        return Err(MessageParseError::MalformedEmptyMessage(len));
      }

      return Ok(Message { id,
                          ty,
                          ver,
                          code,
                          token: Token::default(),
                          opts: Vec::new(),
                          payload: Payload::default() });
    }

    let token = bytes.take_exact(tkl as usize)
                     .ok_or_else(MessageParseError::eof)?;
    let token = ArrayVec::<[u8; 8]>::try_from(token).expect("tkl was checked to be <= 8");
    let token = Token(token);

    let opts = Vec::<Opt>::try_consume_bytes(&mut bytes).map_err(MessageParseError::OptParseError)?;

    // the options pass consumed the payload marker, if there was one;
    // a marker at the very end of the buffer means an empty payload
    let payload = Payload(bytes.take_until_end().to_vec());

    trace!("parsed {} byte message: code {}, {} option(s), {} byte payload",
           len,
           code,
           opts.len(),
           payload.0.len());

    Ok(Message { id,
                 ty,
                 ver,
                 token,
                 code,
                 opts,
                 payload })
  }
}

/// Parse an encoded message.
///
/// ```
/// use coap_wire::{parse, Type};
///
/// let bytes = [0b0101_0000, 0b0000_0001, 0, 42];
/// let msg = parse(bytes).unwrap();
///
/// assert_eq!(msg.ty, Type::Non);
/// assert_eq!(msg.code.to_string(), "0.01");
/// ```
pub fn parse(bytes: impl AsRef<[u8]>) -> Result<Message, MessageParseError> {
  Message::try_from_bytes(bytes)
}

/// The caller-facing shape of a message to encode; anything left at its
/// default is filled with the protocol default by
/// [`Generator::generate`].
///
/// ```
/// use coap_wire::{Generator, Packet};
///
/// let gen = Generator::new();
/// let bytes = gen.generate(Packet { payload: "hi".into(),
///                                   ..Default::default() })
///                .unwrap();
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Packet {
  /// Message token (default empty); rejected at encode time when longer
  /// than 8 bytes
  pub token: Vec<u8>,
  /// Message code (default `0.01`, a GET request)
  pub code: Code,
  /// Message id; `None` means "assign the next id from the generator's
  /// counter"
  pub id: Option<Id>,
  /// Message type (default non-confirmable)
  pub ty: Type,
  /// Message options, in any order; stably sorted by number before
  /// encoding, so repeated numbers keep their relative order
  pub opts: Vec<Opt>,
  /// Message payload (default empty)
  pub payload: Payload,
}

/// Fills [`Packet`] defaults and serializes messages, owning the
/// message-id counter that backs default id assignment.
///
/// One generator per process (or per endpoint) is the expected shape;
/// it may be shared between threads as-is.
#[derive(Debug, Default)]
pub struct Generator {
  ids: IdGenerator,
}

impl Generator {
  /// Create a generator with a randomly seeded id counter
  pub fn new() -> Self {
    Generator { ids: IdGenerator::new() }
  }

  /// Create a generator whose counter starts at `seed`, for
  /// deterministic message ids
  pub fn seeded(seed: u16) -> Self {
    Generator { ids: IdGenerator::seeded(seed) }
  }

  /// Normalize a packet into a [`Message`]: validate the token length,
  /// assign a default id if none was given, and stably sort the options
  /// by number (ties keep their caller-supplied order).
  pub fn fill_defaults(&self, packet: Packet) -> Result<Message, MessageToBytesError> {
    if packet.token.len() > Token::MAX_LEN {
      return Err(MessageToBytesError::TokenTooLong(packet.token.len()));
    }

    let token =
      Token(ArrayVec::try_from(&packet.token[..]).expect("length was checked to be <= 8"));
    let id = packet.id.unwrap_or_else(|| self.ids.next());

    let mut opts = packet.opts;
    opts.sort_by_key(|opt| opt.number);

    Ok(Message { id,
                 ty: packet.ty,
                 ver: Version::default(),
                 token,
                 code: packet.code,
                 opts,
                 payload: packet.payload })
  }

  /// Encode a packet, filling defaults first.
  ///
  /// Fails with [`MessageToBytesError::TokenTooLong`] when the token
  /// exceeds 8 bytes and [`MessageToBytesError::PacketTooLarge`] when
  /// the encoded message would exceed [`MAX_SIZE`].
  pub fn generate(&self, packet: Packet) -> Result<Vec<u8>, MessageToBytesError> {
    let msg = self.fill_defaults(packet)?;

    trace!("generating message: id {}, code {}, {} option(s)",
           msg.id.0,
           msg.code,
           msg.opts.len());

    msg.try_into_bytes()
  }
}
