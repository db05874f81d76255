use core::fmt;

use super::opt::parse_error::OptParseError;

/// Errors encounterable while parsing a message from bytes
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum MessageParseError {
  /// Reached end of stream before parsing was finished
  UnexpectedEndOfStream,

  /// Version field was something other than 1
  UnsupportedVersion(u8),

  /// Token length field was > 8
  InvalidTokenLength(u8),

  /// Code was the empty-message sentinel `0.00` but the buffer was not
  /// exactly 4 bytes long (the actual length is attached)
  MalformedEmptyMessage(usize),

  /// Error parsing option
  OptParseError(OptParseError),
}

impl MessageParseError {
  /// Shorthand for [`MessageParseError::UnexpectedEndOfStream`]
  pub fn eof() -> Self {
    Self::UnexpectedEndOfStream
  }
}

impl fmt::Display for MessageParseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | Self::UnexpectedEndOfStream => f.write_str("unexpected end of stream"),
      | Self::UnsupportedVersion(ver) => write!(f, "unsupported version {}", ver),
      | Self::InvalidTokenLength(tkl) => write!(f, "token length {} not allowed", tkl),
      | Self::MalformedEmptyMessage(len) => {
        write!(f, "empty messages must be exactly 4 bytes, got {}", len)
      },
      | Self::OptParseError(e) => write!(f, "{}", e),
    }
  }
}

impl std::error::Error for MessageParseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      | Self::OptParseError(e) => Some(e),
      | _ => None,
    }
  }
}
