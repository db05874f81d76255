use tinyvec::ArrayVec;

/// Message token: an opaque sequence of 0 to 8 bytes chosen by the
/// client, echoed by the server to correlate a response with its
/// request independently of the message [`Id`](super::Id).
///
/// The token length is carried in the 4-bit TKL header field; lengths
/// above 8 are reserved, so a `Token` cannot be constructed longer
/// than that.
#[derive(Copy, Clone, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Token(pub ArrayVec<[u8; 8]>);

impl Token {
  /// Longest token the TKL field allows
  pub const MAX_LEN: usize = 8;

  /// Number of bytes in the token (the value of the TKL header field)
  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// Whether the token is zero-length
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}
