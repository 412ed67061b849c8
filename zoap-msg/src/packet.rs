use toad_macros::rfc_7252_doc;

use crate::msg::opt::{self, known, Opt, OptNumber, Options};
use crate::msg::{Byte1, Code, Id, Token, Type, Version, HEADER_SIZE, PAYLOAD_MARKER};
use crate::{Buffer, BufferMut, Error};

#[doc = rfc_7252_doc!("3")]
/// # `Packet` struct
/// A CoAP message read from, or being written into, a transport buffer.
///
/// A `Packet` owns no memory of its own; every getter reads the wire
/// bytes in place and every setter writes them in place.
///
/// There are exactly two ways to get one:
/// - [`Packet::parse`] validates a received datagram
/// - [`Packet::init`] starts building an outbound message in an empty buffer
///
/// Outbound messages are built front to back: header fields and token,
/// then options in non-decreasing number order, then the payload.
///
/// ```
/// use zoap_msg::{opt::known, Code, Id, NetBuf, Packet, Type, Version};
///
/// let mut pkt = Packet::init(NetBuf::new([0u8; 32])).unwrap();
/// pkt.set_version(Version(1));
/// pkt.set_type(Type::Non);
/// pkt.set_code(Code::CONTENT);
/// pkt.set_id(Id(0x1234));
/// pkt.add_option_int(known::CONTENT_FORMAT, 0).unwrap();
/// pkt.append_payload(b"hi").unwrap();
///
/// assert_eq!(pkt.as_bytes(), &[0x50, 0x45, 0x12, 0x34, 0xC0, 0xFF, b'h', b'i']);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Packet<B> {
  buf: B,
  start: Option<usize>,
}

impl<B: Buffer> Packet<B> {
  /// Validate the header and option block of a received datagram.
  ///
  /// Fails on the first malformed byte; no partially parsed packet is produced.
  ///
  /// ```
  /// use zoap_msg::{Code, Error, Packet, Type};
  ///
  /// let pkt = Packet::parse(&[0x40u8, 0x01, 0x00, 0x00][..]).unwrap();
  /// assert_eq!(pkt.ty(), Type::Con);
  /// assert_eq!(pkt.code(), Code::GET);
  /// assert_eq!(pkt.payload(), None);
  ///
  /// assert_eq!(Packet::parse(&[0x55u8, 0xA5, 0x12][..]).unwrap_err(),
  ///            Error::UnexpectedEndOfStream);
  /// ```
  pub fn parse(buf: B) -> Result<Self, Error> {
    let bytes = buf.appdata();

    if bytes.len() < HEADER_SIZE {
      return Err(Error::eof());
    }

    let byte1 = Byte1::from(bytes[0]);
    if byte1.ver != Version(1) {
      return Err(Error::InvalidVersion(byte1.ver.0));
    }

    if byte1.tkl > 8 {
      return Err(Error::InvalidTokenLength(byte1.tkl));
    }

    let header_len = HEADER_SIZE + byte1.tkl as usize;
    if header_len > bytes.len() {
      return Err(Error::eof());
    }

    let opts = opt::scan(&bytes[header_len..])?;

    // what remains is either nothing, a lone marker, or marker + payload.
    // a lone marker is kept track of so that nothing is written after it.
    let end_of_opts = header_len + opts.len;
    let start = if bytes.len() > end_of_opts {
      Some(end_of_opts + 1)
    } else {
      None
    };

    Ok(Self { buf, start })
  }

  /// The bytes of the whole packet
  pub fn as_bytes(&self) -> &[u8] {
    self.buf.appdata()
  }

  /// Borrow this packet as a read-only packet over a byte slice
  pub fn view(&self) -> Packet<&[u8]> {
    Packet { buf: self.as_bytes(),
             start: self.start }
  }

  /// Give the transport buffer back
  pub fn into_inner(self) -> B {
    self.buf
  }

  fn byte1(&self) -> Byte1 {
    Byte1::from(self.as_bytes()[0])
  }

  /// Protocol version bits
  pub fn version(&self) -> Version {
    self.byte1().ver
  }

  /// Message type
  pub fn ty(&self) -> Type {
    self.byte1().ty
  }

  /// Token length, 0 through 8
  pub fn tkl(&self) -> u8 {
    self.byte1().tkl
  }

  /// The method or response code.
  ///
  /// Codes not in [`Code`]'s table of known codes read as [`Code::EMPTY`];
  /// use [`Packet::raw_code`] to see the byte that was actually on the wire.
  ///
  /// ```
  /// use zoap_msg::{Code, Packet};
  ///
  /// let pkt = Packet::parse(&[0x40u8, 0x05, 0x00, 0x01][..]).unwrap();
  /// assert_eq!(pkt.code(), Code::EMPTY);
  /// assert_eq!(pkt.raw_code(), Code::new(0, 5));
  /// ```
  pub fn code(&self) -> Code {
    self.raw_code().normalized()
  }

  /// The code byte without normalization
  pub fn raw_code(&self) -> Code {
    Code::from(self.as_bytes()[1])
  }

  /// Message ID
  pub fn id(&self) -> Id {
    let bytes = self.as_bytes();
    Id::from_be_bytes([bytes[2], bytes[3]])
  }

  /// Length of the header including the token
  pub fn header_len(&self) -> usize {
    HEADER_SIZE + self.tkl() as usize
  }

  pub(crate) fn token_bytes(&self) -> &[u8] {
    self.as_bytes()
        .get(HEADER_SIZE..self.header_len())
        .unwrap_or(&[])
  }

  /// Copy of the token
  pub fn token(&self) -> Token {
    Token::try_from_slice(self.token_bytes()).unwrap_or_default()
  }

  /// Whether `other` carries a bit-exact copy of this packet's token
  /// (same length, same bytes)
  pub fn token_eq<R: Buffer>(&self, other: &Packet<R>) -> bool {
    self.token_bytes() == other.token_bytes()
  }

  fn option_bytes(&self) -> &[u8] {
    let end = self.start.map(|s| s - 1).unwrap_or_else(|| self.as_bytes().len());
    self.as_bytes().get(self.header_len()..end).unwrap_or(&[])
  }

  /// Iterate over the options in this packet
  pub fn options(&self) -> Options<'_> {
    Options::new(self.option_bytes())
  }

  /// Copy every option numbered `number` into `out`, up to `out.len()` of them,
  /// returning how many were found.
  ///
  /// Repeatable options (e.g. Uri-Path) are yielded in wire order.
  ///
  /// ```
  /// use zoap_msg::{opt::known, Opt, Packet};
  ///
  /// // Uri-Path "a", Uri-Path "b"
  /// let bytes = [0x40, 0x01, 0x00, 0x01, 0xB1, b'a', 0x01, b'b'];
  /// let pkt = Packet::parse(&bytes[..]).unwrap();
  ///
  /// let mut segments = [Opt::default(); 4];
  /// let n = pkt.find_options(known::URI_PATH, &mut segments).unwrap();
  /// assert_eq!(n, 2);
  /// assert_eq!(segments[1].value, b"b");
  /// ```
  pub fn find_options<'a>(&'a self,
                          number: OptNumber,
                          out: &mut [Opt<'a>])
                          -> Result<usize, Error> {
    opt::find(self.option_bytes(), number, out)
  }

  /// The payload, if the packet has a payload marker
  /// followed by at least one byte.
  pub fn payload(&self) -> Option<&[u8]> {
    self.start
        .and_then(|s| self.as_bytes().get(s..))
        .filter(|p| !p.is_empty())
  }

  /// Index of the first payload byte, if there is a payload
  pub fn payload_offset(&self) -> Option<usize> {
    self.payload().and(self.start)
  }
}

impl<B: BufferMut> Packet<B> {
  /// Start building a packet in `buf`.
  ///
  /// Any bytes previously written to `buf` are discarded, and the 4 header bytes
  /// are zeroed (note that this leaves the version bits at 0 until [`Packet::set_version`]).
  ///
  /// ```
  /// use zoap_msg::{Error, NetBuf, Packet};
  ///
  /// assert_eq!(Packet::init(NetBuf::new([0u8; 3])).unwrap_err(),
  ///            Error::CapacityExhausted { needed: 4, tailroom: 3 });
  /// ```
  pub fn init(mut buf: B) -> Result<Self, Error> {
    buf.set_appdatalen(0);

    let room = buf.tailroom();
    if room < HEADER_SIZE {
      return Err(Error::no_room(HEADER_SIZE, room));
    }

    buf.tail_mut()[..HEADER_SIZE].fill(0);
    buf.set_appdatalen(HEADER_SIZE);

    Ok(Self { buf, start: None })
  }

  #[doc = rfc_7252_doc!("4.2")]
  /// # `Packet::init_ack`
  /// Build an Acknowledgement for `request` in `buf`, echoing its message ID.
  ///
  /// With [`Code::EMPTY`] this is a bare ACK, which never carries a token.
  /// With any other code the ACK piggybacks a response, and the request's token is echoed.
  ///
  /// ```
  /// use zoap_msg::{Code, NetBuf, Packet};
  ///
  /// let req = [0x45, 0x01, 0xDE, 0xAD, b't', b'o', b'k', b'e', b'n'];
  /// let req = Packet::parse(&req[..]).unwrap();
  ///
  /// let ack = Packet::init_ack(NetBuf::new([0u8; 16]), &req, Code::EMPTY).unwrap();
  /// assert_eq!(ack.as_bytes(), &[0x60, 0x00, 0xDE, 0xAD]);
  /// ```
  pub fn init_ack<R: Buffer>(buf: B, request: &Packet<R>, code: Code) -> Result<Self, Error> {
    let mut ack = Self::init(buf)?;
    ack.set_version(Version(1));
    ack.set_type(Type::Ack);
    ack.set_code(code);
    ack.set_id(request.id());

    if code != Code::EMPTY {
      ack.set_token(request.token_bytes())?;
    }

    Ok(ack)
  }

  fn update_byte1(&mut self, f: impl FnOnce(&mut Byte1)) {
    let byte = &mut self.buf.appdata_mut()[0];
    let mut byte1 = Byte1::from(*byte);
    f(&mut byte1);
    *byte = byte1.into();
  }

  /// Set the version bits (only the low 2 bits of `ver` are kept)
  pub fn set_version(&mut self, ver: Version) {
    self.update_byte1(|b| b.ver = ver);
  }

  /// Set the message type
  pub fn set_type(&mut self, ty: Type) {
    self.update_byte1(|b| b.ty = ty);
  }

  /// Set the method or response code
  pub fn set_code(&mut self, code: Code) {
    self.buf.appdata_mut()[1] = code.into();
  }

  /// Set the message ID
  pub fn set_id(&mut self, id: Id) {
    let bytes: [u8; 2] = id.into();
    self.buf.appdata_mut()[2..HEADER_SIZE].copy_from_slice(&bytes);
  }

  /// Write the token (0 through 8 bytes).
  ///
  /// Must happen before any option or payload is added.
  /// Setting it again before then replaces the previous token.
  pub fn set_token(&mut self, token: &[u8]) -> Result<(), Error> {
    if self.buf.appdatalen() != self.header_len() {
      return Err(Error::TokenAfterOptions);
    }

    if token.len() > 8 {
      return Err(Error::InvalidTokenLength(token.len().min(u8::MAX as usize) as u8));
    }

    let room = self.buf.tailroom() + self.tkl() as usize;
    if token.len() > room {
      return Err(Error::no_room(token.len(), room));
    }

    self.buf.set_appdatalen(HEADER_SIZE);
    self.buf.tail_mut()[..token.len()].copy_from_slice(token);
    self.buf.set_appdatalen(HEADER_SIZE + token.len());
    self.update_byte1(|b| b.tkl = token.len() as u8);

    Ok(())
  }

  /// Append an option.
  ///
  /// Options must be added in non-decreasing number order, and
  /// not after the payload marker has been written.
  ///
  /// ```
  /// use zoap_msg::{opt::known, Error, NetBuf, OptNumber, Packet};
  ///
  /// let mut pkt = Packet::init(NetBuf::new([0u8; 32])).unwrap();
  /// pkt.add_option(known::URI_PATH, b"a").unwrap();
  /// pkt.add_option(known::URI_PATH, b"b").unwrap();
  ///
  /// assert_eq!(pkt.add_option(known::URI_HOST, b"host"),
  ///            Err(Error::OptionOutOfOrder { previous: 11, number: 3 }));
  /// ```
  pub fn add_option(&mut self, number: OptNumber, value: &[u8]) -> Result<(), Error> {
    if self.start.is_some() {
      return Err(Error::PayloadStarted);
    }

    let last = opt::scan(self.option_bytes())?.last;
    if number < last {
      return Err(Error::OptionOutOfOrder { previous: last.0,
                                           number: number.0 });
    }

    let written = opt::encode(number.0 - last.0, value, self.buf.tail_mut())?;
    let len = self.buf.appdatalen() + written;
    self.buf.set_appdatalen(len);

    Ok(())
  }

  /// Remove the first option numbered `number`, if there is one.
  ///
  /// The option after it is re-encoded with its delta from the
  /// option before it, and everything behind it moves up.
  ///
  /// ```
  /// use zoap_msg::{opt::known, NetBuf, Packet};
  ///
  /// let mut pkt = Packet::init(NetBuf::new([0u8; 32])).unwrap();
  /// pkt.add_option(known::URI_HOST, b"h").unwrap();
  /// pkt.add_option(known::URI_PATH, b"a").unwrap();
  /// pkt.append_payload(b"!").unwrap();
  ///
  /// pkt.remove_option(known::URI_HOST).unwrap();
  /// assert_eq!(pkt.as_bytes(), &[0, 0, 0, 0, 0xB1, b'a', 0xFF, b'!']);
  /// ```
  pub fn remove_option(&mut self, number: OptNumber) -> Result<(), Error> {
    let found = match opt::locate(self.option_bytes(), number)? {
      | Some(found) => found,
      | None => return Ok(()),
    };

    let base = self.header_len();
    let len = self.buf.appdatalen();

    // the following option's new header is never longer than
    // the removed option plus its old header
    let (write_at, keep_from) = match found.next {
      | Some(next) => {
        let head = opt::head(next.number.0 - found.prev.0, next.value_len)?;
        let at = base + found.start;
        self.buf.appdata_mut()[at..at + head.len()].copy_from_slice(&head);
        (at + head.len(), base + next.value_start)
      },
      | None => (base + found.start, base + found.end),
    };

    self.buf.appdata_mut().copy_within(keep_from..len, write_at);

    let removed = keep_from - write_at;
    self.buf.set_appdatalen(len - removed);
    self.start = self.start.map(|s| s - removed);

    Ok(())
  }

  /// Add Uri-Path and Uri-Query options from a relative URI
  /// such as `"sensors/temp?unit=c&avg"`.
  ///
  /// Path segments are separated by `/` and query parameters by `&`;
  /// empty segments and parameters are skipped.
  ///
  /// ```
  /// use zoap_msg::{opt::known, NetBuf, Opt, Packet};
  ///
  /// let mut pkt = Packet::init(NetBuf::new([0u8; 32])).unwrap();
  /// pkt.set_path("/sensors/temp/?avg").unwrap();
  ///
  /// let mut path = [Opt::default(); 4];
  /// assert_eq!(pkt.find_options(known::URI_PATH, &mut path), Ok(2));
  /// assert_eq!(path[1].value, b"temp");
  /// ```
  pub fn set_path(&mut self, uri: &str) -> Result<(), Error> {
    let (path, query) = match uri.split_once('?') {
      | Some((path, query)) => (path, query),
      | None => (uri, ""),
    };

    for segment in path.split('/').filter(|s| !s.is_empty()) {
      self.add_option(known::URI_PATH, segment.as_bytes())?;
    }

    for param in query.split('&').filter(|s| !s.is_empty()) {
      self.add_option(known::URI_QUERY, param.as_bytes())?;
    }

    Ok(())
  }

  /// Append an option whose value is an unsigned integer,
  /// in its shortest big-endian form (0 is the empty value).
  pub fn add_option_int(&mut self, number: OptNumber, value: u32) -> Result<(), Error> {
    self.add_option(number, &opt::int_bytes(value))
  }

  /// Get the writable region for the payload.
  ///
  /// The first call writes the payload marker; later calls do not write another one.
  /// After writing into the returned slice, declare how much was written
  /// with [`Packet::set_used`].
  pub fn get_payload(&mut self) -> Result<&mut [u8], Error> {
    if self.start.is_none() {
      let room = self.buf.tailroom();
      if room < 1 {
        return Err(Error::no_room(1, room));
      }

      self.buf.tail_mut()[0] = PAYLOAD_MARKER;
      let len = self.buf.appdatalen() + 1;
      self.buf.set_appdatalen(len);
      self.start = Some(len);
    }

    Ok(self.buf.tail_mut())
  }

  /// Declare that `len` more payload bytes were written to the slice
  /// returned by [`Packet::get_payload`].
  pub fn set_used(&mut self, len: usize) -> Result<(), Error> {
    let room = self.buf.tailroom();
    if len > room {
      return Err(Error::no_room(len, room));
    }

    let used = self.buf.appdatalen() + len;
    self.buf.set_appdatalen(used);
    Ok(())
  }

  /// Copy `bytes` to the end of the payload, writing the marker first if needed.
  ///
  /// Nothing is written if it does not all fit, or if `bytes` is empty.
  pub fn append_payload(&mut self, bytes: &[u8]) -> Result<(), Error> {
    if bytes.is_empty() {
      return Ok(());
    }

    let needed = bytes.len() + usize::from(self.start.is_none());
    let room = self.buf.tailroom();
    if needed > room {
      return Err(Error::no_room(needed, room));
    }

    self.get_payload()?[..bytes.len()].copy_from_slice(bytes);
    self.set_used(bytes.len())
  }
}
