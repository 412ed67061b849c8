/// Read access to a transport buffer.
///
/// The packet types in this crate never own or allocate packet memory;
/// they are views over something implementing this trait.
///
/// `appdata` is the region that has been written (or received),
/// `tailroom` is how many more bytes could be appended after it.
pub trait Buffer {
  /// The bytes written so far
  fn appdata(&self) -> &[u8];

  /// Number of bytes written so far
  fn appdatalen(&self) -> usize {
    self.appdata().len()
  }

  /// Number of bytes that may still be appended
  fn tailroom(&self) -> usize;
}

/// Write access to a transport buffer.
pub trait BufferMut: Buffer {
  /// The bytes written so far, mutably
  fn appdata_mut(&mut self) -> &mut [u8];

  /// The unused region following [`Buffer::appdata`].
  ///
  /// Its length is always [`Buffer::tailroom`].
  fn tail_mut(&mut self) -> &mut [u8];

  /// Declare the used length of the buffer.
  ///
  /// `len` must not exceed `appdatalen() + tailroom()`; implementors clamp to their capacity.
  fn set_appdatalen(&mut self, len: usize);
}

impl Buffer for [u8] {
  fn appdata(&self) -> &[u8] {
    self
  }

  fn tailroom(&self) -> usize {
    0
  }
}

impl<'a, T: Buffer + ?Sized> Buffer for &'a T {
  fn appdata(&self) -> &[u8] {
    (**self).appdata()
  }

  fn appdatalen(&self) -> usize {
    (**self).appdatalen()
  }

  fn tailroom(&self) -> usize {
    (**self).tailroom()
  }
}

impl<'a, T: Buffer + ?Sized> Buffer for &'a mut T {
  fn appdata(&self) -> &[u8] {
    (**self).appdata()
  }

  fn appdatalen(&self) -> usize {
    (**self).appdatalen()
  }

  fn tailroom(&self) -> usize {
    (**self).tailroom()
  }
}

impl<'a, T: BufferMut + ?Sized> BufferMut for &'a mut T {
  fn appdata_mut(&mut self) -> &mut [u8] {
    (**self).appdata_mut()
  }

  fn tail_mut(&mut self) -> &mut [u8] {
    (**self).tail_mut()
  }

  fn set_appdatalen(&mut self, len: usize) {
    (**self).set_appdatalen(len)
  }
}

/// Fixed-capacity network buffer over caller-provided storage.
///
/// Capacity is the length of the storage; the used length starts at zero
/// for an outbound buffer, or at the datagram size for a received one.
///
/// ```
/// use zoap_msg::{Buffer, NetBuf};
///
/// let mut outbound = NetBuf::new([0u8; 64]);
/// assert_eq!(outbound.tailroom(), 64);
///
/// let inbound = NetBuf::filled([0x40u8, 0x01, 0x00, 0x00], 4);
/// assert_eq!(inbound.appdata(), &[0x40, 0x01, 0x00, 0x00]);
/// assert_eq!(inbound.tailroom(), 0);
/// # let _ = &mut outbound;
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetBuf<S> {
  storage: S,
  len: usize,
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> NetBuf<S> {
  /// Create an empty buffer over `storage`
  pub fn new(storage: S) -> Self {
    Self { storage, len: 0 }
  }

  /// Create a buffer whose first `len` bytes are already in use,
  /// e.g. a datagram that was just received into `storage`.
  ///
  /// `len` is clamped to the storage's capacity.
  pub fn filled(storage: S, len: usize) -> Self {
    let len = len.min(storage.as_ref().len());
    Self { storage, len }
  }

  /// Total bytes this buffer can hold
  pub fn capacity(&self) -> usize {
    self.storage.as_ref().len()
  }

  /// Forget all written bytes
  pub fn reset(&mut self) {
    self.len = 0;
  }

  /// Unwrap the buffer, discarding the used length
  pub fn into_inner(self) -> S {
    self.storage
  }
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> Buffer for NetBuf<S> {
  fn appdata(&self) -> &[u8] {
    &self.storage.as_ref()[..self.len]
  }

  fn appdatalen(&self) -> usize {
    self.len
  }

  fn tailroom(&self) -> usize {
    self.capacity() - self.len
  }
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> BufferMut for NetBuf<S> {
  fn appdata_mut(&mut self) -> &mut [u8] {
    let len = self.len;
    &mut self.storage.as_mut()[..len]
  }

  fn tail_mut(&mut self) -> &mut [u8] {
    let len = self.len;
    &mut self.storage.as_mut()[len..]
  }

  fn set_appdatalen(&mut self, len: usize) {
    self.len = len.min(self.capacity());
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tailroom_shrinks_as_appdata_grows() {
    let mut buf = NetBuf::new([0u8; 8]);
    assert_eq!(buf.appdatalen(), 0);
    assert_eq!(buf.tailroom(), 8);

    buf.tail_mut()[..3].copy_from_slice(&[1, 2, 3]);
    buf.set_appdatalen(3);

    assert_eq!(buf.appdata(), &[1, 2, 3]);
    assert_eq!(buf.tailroom(), 5);
    assert_eq!(buf.tail_mut().len(), 5);
  }

  #[test]
  fn set_appdatalen_clamps_to_capacity() {
    let mut buf = NetBuf::new([0u8; 4]);
    buf.set_appdatalen(10);
    assert_eq!(buf.appdatalen(), 4);
    assert_eq!(buf.tailroom(), 0);
  }

  #[test]
  fn filled_clamps_to_capacity() {
    let buf = NetBuf::filled([9u8; 2], 5);
    assert_eq!(buf.appdata(), &[9, 9]);
  }

  #[test]
  fn slices_are_read_only_buffers() {
    let bytes: &[u8] = &[1, 2, 3];
    assert_eq!(bytes.appdata(), &[1, 2, 3]);
    assert_eq!(bytes.tailroom(), 0);
  }

  #[test]
  fn mut_refs_forward_to_the_buffer() {
    let mut buf = NetBuf::new(vec![0u8; 4]);
    {
      let r = &mut buf;
      r.tail_mut()[0] = 7;
      r.set_appdatalen(1);
    }
    assert_eq!(buf.appdata(), &[7]);
  }
}
