/// A cursor over a borrowed byte slice.
///
/// Everything it yields borrows from the underlying slice rather than
/// from the cursor, so option values can outlive the scan that found them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cursor<'a> {
  bytes: &'a [u8],
  cursor: usize,
}

impl<'a> Cursor<'a> {
  pub(crate) fn new(bytes: &'a [u8]) -> Cursor<'a> {
    Cursor { bytes, cursor: 0 }
  }

  /// Take the next byte, returning None if the cursor is exhausted.
  pub(crate) fn next(&mut self) -> Option<u8> {
    self.take_exact(1).map(|a| a[0])
  }

  /// Look at the next byte without advancing.
  pub(crate) fn peek(&self) -> Option<u8> {
    self.bytes.get(self.cursor).copied()
  }

  /// Take `n` bytes, returning None (and not advancing)
  /// if fewer than `n` remain.
  pub(crate) fn take_exact(&mut self, n: usize) -> Option<&'a [u8]> {
    if n > self.remaining() {
      None
    } else {
      let out = &self.bytes[self.cursor..self.cursor + n];
      self.cursor += n;
      Some(out)
    }
  }

  pub(crate) fn remaining(&self) -> usize {
    self.bytes.len() - self.cursor
  }

  /// Position of the cursor within the slice
  pub(crate) fn position(&self) -> usize {
    self.cursor
  }
}
