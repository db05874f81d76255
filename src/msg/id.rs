use core::sync::atomic::{AtomicU16, Ordering};

use rand::Rng;

use super::MessageParseError;
use crate::cursor::Cursor;
use crate::from_bytes::TryConsumeBytes;

/// # Message ID
///
/// 16-bit unsigned integer in network byte order. Used to detect
/// message duplication and to match messages of type
/// Acknowledgement/Reset to messages of type Confirmable/Non-confirmable.
///
/// Uniqueness across outstanding transactions is the caller's
/// responsibility; the codec only assigns defaults (see [`IdGenerator`]).
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Id(pub u16);

impl Id {
  /// Create an Id from a big-endian 2-byte unsigned int
  pub fn from_be_bytes(bs: [u8; 2]) -> Self {
    Self(u16::from_be_bytes(bs))
  }
}

impl<Bytes: AsRef<[u8]>> TryConsumeBytes<Bytes> for Id {
  type Error = MessageParseError;

  fn try_consume_bytes(bytes: &mut Cursor<Bytes>) -> Result<Self, Self::Error> {
    match bytes.take_exact(2) {
      | Some(&[a, b]) => Ok(Id::from_be_bytes([a, b])),
      | _ => Err(MessageParseError::eof()),
    }
  }
}

/// Source of fresh [`Id`]s for messages that were not given one.
///
/// Ids are handed out from a counter seeded once per generator
/// (randomly, or explicitly via [`IdGenerator::seeded`]) and advanced
/// by 1 per message, wrapping back to 0 once the counter reaches 65535;
/// assigned ids therefore live in `[0, 65535)`.
///
/// The counter is atomic, so a single generator may be shared freely
/// between threads without duplicating or losing ids. It has no
/// persistence beyond the process: two processes may hand out
/// overlapping ids.
#[derive(Debug)]
pub struct IdGenerator {
  next: AtomicU16,
}

impl IdGenerator {
  /// Create a generator seeded with a random starting id in `[0, 65535)`
  pub fn new() -> Self {
    Self::seeded(rand::thread_rng().gen_range(0..u16::MAX))
  }

  /// Create a generator whose first assigned id will be `seed`
  /// (`seed == 65535` wraps immediately to 0)
  pub fn seeded(seed: u16) -> Self {
    Self { next: AtomicU16::new(if seed == u16::MAX { 0 } else { seed }) }
  }

  /// Yield the next id, advancing the counter
  pub fn next(&self) -> Id {
    let mut cur = self.next.load(Ordering::Relaxed);
    loop {
      let succ = if cur + 1 == u16::MAX { 0 } else { cur + 1 };
      match self.next
                .compare_exchange_weak(cur, succ, Ordering::Relaxed, Ordering::Relaxed)
      {
        | Ok(_) => return Id(cur),
        | Err(seen) => cur = seen,
      }
    }
  }
}

impl Default for IdGenerator {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_id() {
    let mut id_bytes = Cursor::new(34u16.to_be_bytes());
    let id = Id::try_consume_bytes(&mut id_bytes).unwrap();
    assert_eq!(id, Id(34));
  }

  #[test]
  fn parse_id_too_short() {
    let mut id_bytes = Cursor::new([1u8]);
    assert_eq!(Id::try_consume_bytes(&mut id_bytes),
               Err(MessageParseError::UnexpectedEndOfStream));
  }

  #[test]
  fn generator_counts_up() {
    let ids = IdGenerator::seeded(40);
    assert_eq!(ids.next(), Id(40));
    assert_eq!(ids.next(), Id(41));
    assert_eq!(ids.next(), Id(42));
  }

  #[test]
  fn generator_wraps_to_zero() {
    let ids = IdGenerator::seeded(65533);
    assert_eq!(ids.next(), Id(65533));
    assert_eq!(ids.next(), Id(65534));

    // the counter has now reached 65535, which is never assigned
    assert_eq!(ids.next(), Id(0));
    assert_eq!(ids.next(), Id(1));
  }

  #[test]
  fn generator_shared_between_threads() {
    use std::collections::BTreeSet;
    use std::sync::Arc;

    let ids = Arc::new(IdGenerator::seeded(0));
    let handles = (0..4).map(|_| {
                           let ids = Arc::clone(&ids);
                           std::thread::spawn(move || {
                             (0..250).map(|_| ids.next().0).collect::<Vec<_>>()
                           })
                         })
                        .collect::<Vec<_>>();

    let all = handles.into_iter()
                     .flat_map(|h| h.join().unwrap())
                     .collect::<BTreeSet<_>>();
    assert_eq!(all.len(), 1000);
  }
}
