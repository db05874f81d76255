/// A cursor over a byte buffer (an alloc-less cousin of [`std::io::Cursor`])
///
/// All reads are bounds-checked up front; a read past the end of the
/// buffer yields `None` rather than a shorter slice, which is what lets
/// the parsing code surface truncated messages as explicit errors.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cursor<T> {
  t: T,
  cursor: usize,
  len: usize,
}

impl<T: AsRef<[u8]>> Cursor<T> {
  /// Creates a new cursor positioned at the start of the buffer
  pub fn new(t: T) -> Cursor<T> {
    let len = t.as_ref().len();
    Cursor { t, cursor: 0, len }
  }

  /// Unwraps the cursor, discarding its internal position
  pub fn into_inner(self) -> T {
    self.t
  }

  /// Take the next byte, returning None if the cursor is exhausted.
  pub fn next(&mut self) -> Option<u8> {
    self.take_exact(1).and_then(|a| match a {
                        | &[a] => Some(a),
                        | _ => None,
                      })
  }

  /// Take `n` bytes, returning None if fewer than `n` remain.
  pub fn take_exact(&mut self, n: usize) -> Option<&[u8]> {
    if n > self.len - self.cursor {
      None
    } else {
      let out = &self.t.as_ref()[self.cursor..self.cursor + n];
      self.cursor += n;
      Some(out)
    }
  }

  /// Take every byte from the current position to the end of the buffer.
  ///
  /// The cursor is exhausted afterwards.
  pub fn take_until_end(&mut self) -> &[u8] {
    let out = &self.t.as_ref()[self.cursor..];
    self.cursor = self.len;
    out
  }

  /// Number of bytes left to read
  pub fn remaining(&self) -> usize {
    self.len - self.cursor
  }

  /// Whether every byte in the buffer has been consumed
  pub fn is_exhausted(&self) -> bool {
    self.cursor >= self.len
  }

  /// Get the position the cursor points to within the buffer
  pub fn position(&self) -> usize {
    self.cursor
  }

  /// Total length of the underlying buffer
  pub fn len(&self) -> usize {
    self.len
  }

  /// Whether the underlying buffer is zero-length
  pub fn is_empty(&self) -> bool {
    self.len == 0
  }
}
