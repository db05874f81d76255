/// Indicates if this message is of
/// type Confirmable (0), Non-confirmable (1), Acknowledgement (2), or Reset (3).
///
/// The four values exhaust the 2-bit wire field, so decoding a type
/// never fails.
#[derive(Copy, Clone, Hash, Eq, Ord, PartialEq, PartialOrd, Debug)]
pub enum Type {
  /// This message requires an acknowledgement; when no packets are
  /// lost, each Confirmable message elicits exactly one message of
  /// type Acknowledgement or Reset.
  Con,
  /// This message does not require an acknowledgement, e.g. a reading
  /// repeated regularly from a sensor.
  Non,
  /// Acknowledges that a specific Confirmable message arrived.
  Ack,
  /// Indicates that a specific message was received, but some context
  /// is missing to properly process it - usually because the receiving
  /// node has rebooted and forgotten the state required to interpret it.
  Reset,
}

impl Default for Type {
  fn default() -> Self {
    Type::Non
  }
}

impl From<u8> for Type {
  fn from(b: u8) -> Self {
    match b & 0b11 {
      | 0 => Type::Con,
      | 2 => Type::Ack,
      | 3 => Type::Reset,
      | _ => Type::Non,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn from_two_bit_field() {
    assert_eq!(Type::from(0), Type::Con);
    assert_eq!(Type::from(1), Type::Non);
    assert_eq!(Type::from(2), Type::Ack);
    assert_eq!(Type::from(3), Type::Reset);

    // upper bits are masked off
    assert_eq!(Type::from(0b111), Type::Reset);
  }
}
