/// Version of the CoAP protocol that the message adheres to.
///
/// The only version defined so far is 1; decoding a message with any
/// other version fails with
/// [`MessageParseError::UnsupportedVersion`](super::MessageParseError::UnsupportedVersion).
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Version(pub u8);

impl Default for Version {
  fn default() -> Self {
    Version(1)
  }
}
