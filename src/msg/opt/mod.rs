use crate::cursor::Cursor;
use crate::from_bytes::TryConsumeBytes;
use crate::to_bytes::MessageToBytesError;

/// Option number <-> name registry
pub mod names;

/// Option parsing errors
pub mod parse_error;

pub use names::*;
pub use parse_error::*;

/// Parse the delta or length half of an option header, consuming the
/// extension bytes the nibble calls for.
///
/// Nibble semantics (identical for delta and length):
///  - 0..=12: the literal value
///  - 13: one extension byte follows; value is that byte + 13
///  - 14: two big-endian extension bytes follow; value is that u16 + 269
///  - 15: reserved, yields `reserved_err`
///
/// The result is u32 so that the ceiling (269 + 65535) cannot wrap.
pub(crate) fn parse_opt_len_or_delta<A: AsRef<[u8]>>(head: u8,
                                                     bytes: &mut Cursor<A>,
                                                     reserved_err: OptParseError)
                                                     -> Result<u32, OptParseError> {
  match head {
    | 13 => {
      let n = bytes.next().ok_or_else(OptParseError::eof)?;
      Ok(n as u32 + 13)
    },
    | 14 => match bytes.take_exact(2) {
      | Some(&[a, b]) => Ok(u16::from_be_bytes([a, b]) as u32 + 269),
      | _ => Err(OptParseError::eof()),
    },
    | 15 => Err(reserved_err),
    | _ => Ok(head as u32),
  }
}

/// # `Opt` struct
/// A single message option: a Uri-Path segment, the Content-Format,
/// and so on.
///
/// Identified by an absolute [`OptNumber`]; the wire form stores the
/// [`OptDelta`] from the previous option's number instead, which the
/// codec computes on the way out and accumulates on the way in.
///
/// Options of the same number may repeat (e.g. one `Opt` per Uri-Path
/// segment), and their relative order is preserved through a message
/// round trip.
#[derive(Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct Opt {
  /// See [`OptNumber`]
  pub number: OptNumber,
  /// See [`OptValue`]
  pub value: OptValue,
}

impl Opt {
  /// Create an option
  ///
  /// ```
  /// use coap_wire::{names::number::URI_PATH, Opt};
  ///
  /// let seg = Opt::new(URI_PATH, "hello");
  /// ```
  pub fn new(number: impl Into<OptNumber>, value: impl Into<OptValue>) -> Self {
    Opt { number: number.into(),
          value: value.into() }
  }

  /// Number of bytes this option will occupy on the wire, given the
  /// number of the option serialized just before it.
  pub(crate) fn get_size(&self, prev: OptNumber) -> usize {
    let delta = self.number.0.saturating_sub(prev.0);
    let delta_size = match delta {
      | n if n >= 269 => 2,
      | n if n >= 13 => 1,
      | _ => 0,
    };

    let len_size = match self.value.0.len() {
      | n if n >= 269 => 2,
      | n if n >= 13 => 1,
      | _ => 0,
    };

    1 + delta_size + len_size + self.value.0.len()
  }

  /// Append this option's wire bytes, delta-encoded against the number
  /// of the option serialized just before it (`OptNumber(0)` for the
  /// first option).
  ///
  /// Callers must hand options over in ascending number order;
  /// [`Generator::generate`](crate::Generator::generate) sorts before
  /// it gets here.
  ///
  /// A delta past what two extension bytes can carry (65804) has no
  /// wire form and fails rather than truncating.
  pub(crate) fn extend_bytes(&self,
                             prev: OptNumber,
                             bytes: &mut Vec<u8>)
                             -> Result<(), MessageToBytesError> {
    let delta = self.number.0.saturating_sub(prev.0);
    if delta > u16::MAX as u32 + 269 {
      return Err(MessageToBytesError::OptionDeltaTooLarge(delta));
    }

    let (del, del_ext) = crate::to_bytes::opt_len_or_delta(delta);
    let (len, len_ext) = crate::to_bytes::opt_len_or_delta(self.value.0.len() as u32);

    bytes.push(del << 4 | len);

    if let Some(ext) = del_ext {
      bytes.extend(ext);
    }

    if let Some(ext) = len_ext {
      bytes.extend(ext);
    }

    bytes.extend_from_slice(&self.value.0);
    Ok(())
  }
}

/// The "Option Number" identifying what an option means
/// (e.g. Uri-Path is number 11).
///
/// Stored on the wire as the difference from the previous option's
/// number (see [`OptDelta`]); in memory it is always the absolute
/// number. Name resolution to and from strings happens only at the
/// registry boundary (see [`names`]).
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct OptNumber(pub u32);

impl From<u32> for OptNumber {
  fn from(n: u32) -> Self {
    OptNumber(n)
  }
}

/// The "Option Delta": difference between an option's number and the
/// previous option's number, which is what the wire format stores.
///
/// Only appears at the codec boundary; parsed options carry their
/// absolute [`OptNumber`].
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct OptDelta(pub u32);

/// The value of an option, an opaque byte sequence
#[derive(Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct OptValue(pub Vec<u8>);

impl From<Vec<u8>> for OptValue {
  fn from(bytes: Vec<u8>) -> Self {
    OptValue(bytes)
  }
}

impl<'a> From<&'a [u8]> for OptValue {
  fn from(bytes: &'a [u8]) -> Self {
    OptValue(bytes.to_vec())
  }
}

impl<'a> From<&'a str> for OptValue {
  fn from(s: &'a str) -> Self {
    OptValue(s.as_bytes().to_vec())
  }
}

/// Consume one option TLV, or yield `OptionsExhausted` when the next
/// byte is the payload marker or the buffer has ended.
fn consume_opt<A: AsRef<[u8]>>(bytes: &mut Cursor<A>)
                               -> Result<(OptDelta, OptValue), OptParseError> {
  let byte1 = match bytes.next() {
    | None | Some(0b1111_1111) => return Err(OptParseError::OptionsExhausted),
    | Some(b) => b,
  };

  // delta extension bytes precede length extension bytes
  let delta = parse_opt_len_or_delta(byte1 >> 4,
                                     bytes,
                                     OptParseError::OptionDeltaReservedValue(15))?;
  let len = parse_opt_len_or_delta(byte1 & 0b1111,
                                   bytes,
                                   OptParseError::ValueLengthReservedValue(15))?
            as usize;

  let value = bytes.take_exact(len).ok_or_else(OptParseError::eof)?.to_vec();

  Ok((OptDelta(delta), OptValue(value)))
}

impl<Bytes: AsRef<[u8]>> TryConsumeBytes<Bytes> for Vec<Opt> {
  type Error = OptParseError;

  fn try_consume_bytes(bytes: &mut Cursor<Bytes>) -> Result<Self, Self::Error> {
    let mut opts = Vec::new();
    let mut number = OptNumber(0);

    loop {
      match consume_opt(bytes) {
        | Ok((delta, value)) => {
          number = match number.0.checked_add(delta.0) {
            | Some(n) => OptNumber(n),
            | None => break Err(OptParseError::OptionNumberOverflow),
          };
          opts.push(Opt { number, value });
        },
        | Err(OptParseError::OptionsExhausted) => break Ok(opts),
        | Err(e) => break Err(e),
      }
    }
  }
}
