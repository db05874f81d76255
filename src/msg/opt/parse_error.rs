use core::fmt;

/// Errors encounterable while parsing an option from bytes
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum OptParseError {
  /// Reached end of stream before parsing was finished
  UnexpectedEndOfStream,

  /// Option Delta was set to 15, which is reserved
  OptionDeltaReservedValue(u8),

  /// Value Length was set to 15, which is reserved
  ValueLengthReservedValue(u8),

  /// Accumulating deltas pushed the running option number past
  /// `u32::MAX`
  OptionNumberOverflow,

  /// Not a true failure case; only means we tried to read the payload
  /// marker byte (0xFF) or the end of the buffer as an option header.
  OptionsExhausted,
}

impl OptParseError {
  /// Shorthand for [`OptParseError::UnexpectedEndOfStream`]
  pub fn eof() -> Self {
    Self::UnexpectedEndOfStream
  }
}

impl fmt::Display for OptParseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | Self::UnexpectedEndOfStream => f.write_str("unexpected end of stream in option"),
      | Self::OptionDeltaReservedValue(n) => write!(f, "option delta {} is reserved", n),
      | Self::ValueLengthReservedValue(n) => write!(f, "option length {} is reserved", n),
      | Self::OptionNumberOverflow => f.write_str("option number overflowed accumulating deltas"),
      | Self::OptionsExhausted => f.write_str("options exhausted"),
    }
  }
}

impl std::error::Error for OptParseError {}
