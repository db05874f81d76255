use core::fmt;

use tinyvec::ArrayVec;

use crate::msg::{Byte1, Id, Message, OptNumber, Type, MAX_SIZE};

/// Trait allowing fallible conversion into wire bytes
pub trait TryIntoBytes {
  /// Error type yielded if conversion fails
  type Error;

  /// Try to serialize into a byte buffer
  ///
  /// ```
  /// use coap_wire::{Generator, Packet, TryIntoBytes};
  ///
  /// let gen = Generator::seeded(1);
  /// let msg = gen.fill_defaults(Packet::default()).unwrap();
  /// let bytes: Vec<u8> = msg.try_into_bytes().unwrap();
  ///
  /// assert_eq!(bytes.len(), 4);
  /// ```
  fn try_into_bytes(self) -> Result<Vec<u8>, Self::Error>;
}

/// Errors encounterable serializing a message to bytes
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum MessageToBytesError {
  /// Encoded message would exceed [`MAX_SIZE`] (1280 bytes); the
  /// would-be size is attached
  PacketTooLarge(usize),

  /// Supplied token was longer than 8 bytes
  TokenTooLong(usize),

  /// An option-number delta exceeded 65804, the most two extension
  /// bytes can carry; the delta has no wire form and is rejected
  /// rather than truncated
  OptionDeltaTooLarge(u32),
}

impl fmt::Display for MessageToBytesError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | Self::PacketTooLarge(size) => {
        write!(f, "max message size is {}: current is {}", MAX_SIZE, size)
      },
      | Self::TokenTooLong(len) => write!(f, "token too long ({} bytes, max 8)", len),
      | Self::OptionDeltaTooLarge(delta) => {
        write!(f, "option delta {} exceeds the encodable maximum 65804", delta)
      },
    }
  }
}

impl std::error::Error for MessageToBytesError {}

impl TryIntoBytes for Message {
  type Error = MessageToBytesError;

  fn try_into_bytes(self) -> Result<Vec<u8>, Self::Error> {
    let size = self.get_size();

    if size > MAX_SIZE {
      return Err(MessageToBytesError::PacketTooLarge(size));
    }

    let mut bytes = Vec::with_capacity(size);

    let byte1: u8 = Byte1 { ver: self.ver,
                            ty: self.ty,
                            tkl: self.token.len() as u8 }.into();
    let code: u8 = self.code.into();

    bytes.push(byte1);
    bytes.push(code);
    bytes.extend(<[u8; 2]>::from(self.id));
    bytes.extend(self.token.0);

    let mut prev = OptNumber(0);
    for opt in self.opts.iter() {
      opt.extend_bytes(prev, &mut bytes)?;
      prev = opt.number;
    }

    if !self.code.is_empty() && !self.payload.0.is_empty() {
      bytes.push(0b1111_1111);
      bytes.extend(self.payload.0);
    }

    Ok(bytes)
  }
}

/// Encode the delta or length half of an option header: the nibble,
/// plus the extension byte(s) the nibble calls for.
pub(crate) fn opt_len_or_delta(val: u32) -> (u8, Option<ArrayVec<[u8; 2]>>) {
  match val {
    | n if n >= 269 => {
      let mut bytes = ArrayVec::new();
      bytes.extend(((n - 269) as u16).to_be_bytes());
      (14, Some(bytes))
    },
    | n if n >= 13 => {
      let mut bytes = ArrayVec::new();
      bytes.push((n - 13) as u8);
      (13, Some(bytes))
    },
    | n => (n as u8, None),
  }
}

impl From<Id> for [u8; 2] {
  fn from(id: Id) -> [u8; 2] {
    id.0.to_be_bytes()
  }
}

impl From<Type> for u8 {
  fn from(t: Type) -> u8 {
    use Type::*;
    match t {
      | Con => 0,
      | Non => 1,
      | Ack => 2,
      | Reset => 3,
    }
  }
}

impl From<Byte1> for u8 {
  fn from(b: Byte1) -> u8 {
    let ver = b.ver.0 << 6;
    let ty = u8::from(b.ty) << 4;
    let tkl = b.tkl;

    ver | ty | tkl
  }
}
