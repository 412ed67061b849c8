use tinyvec::ArrayVec;
use toad_macros::rfc_7252_doc;

use crate::cursor::Cursor;
use crate::{Error, PAYLOAD_MARKER};

/// Well-known option numbers
pub mod known;

/// Largest delta or length the extended encoding can carry
/// (nibble 14 followed by `value - 269` as a big-endian u16)
pub const MAX_EXTENDED: u32 = 269 + 0xFFFF;

#[doc = rfc_7252_doc!("5.4.6")]
/// <details><summary><b>RFC7252 Section 12.2 Core CoAP Option Numbers</b></summary>
#[doc = concat!("\n#", rfc_7252_doc!("12.2"))]
/// </details>
///
/// # `OptNumber` struct
/// On the wire an option only carries the delta from the previous option's
/// number, so numbers are recovered by summing deltas while scanning
/// (see [`Options`]).
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct OptNumber(pub u32);

#[doc = rfc_7252_doc!("5.4")]
/// <details><summary><b>RFC7252 Section 3.1 Option binary format</b></summary>
#[doc = concat!("\n#", rfc_7252_doc!("3.1"))]
/// </details>
///
/// # `Opt` struct
/// A parsed option: its absolute number and a view of its value
/// inside the packet buffer. The value is never copied, so an `Opt`
/// cannot outlive the packet it was read from.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct Opt<'a> {
  /// See [`OptNumber`]
  pub number: OptNumber,
  /// Raw option value bytes
  pub value: &'a [u8],
}

pub(crate) fn parse_opt_len_or_delta(head: u8,
                                     bytes: &mut Cursor<'_>,
                                     reserved_err: Error)
                                     -> Result<u32, Error> {
  match head {
    | 13 => {
      let n = bytes.next().ok_or_else(Error::eof)?;
      Ok((n as u32) + 13)
    },
    | 14 => match bytes.take_exact(2) {
      | Some(&[a, b]) => Ok(u16::from_be_bytes([a, b]) as u32 + 269),
      | _ => Err(Error::eof()),
    },
    | 15 => Err(reserved_err),
    | _ => Ok(head as u32),
  }
}

pub(crate) fn opt_len_or_delta(val: u32) -> Result<(u8, ArrayVec<[u8; 2]>), Error> {
  match val {
    | n if n > MAX_EXTENDED => Err(Error::OptionFieldTooLarge(n)),
    | n if n >= 269 => {
      let mut bytes = ArrayVec::new();
      bytes.extend(((n - 269) as u16).to_be_bytes());
      Ok((14, bytes))
    },
    | n if n >= 13 => {
      let mut bytes = ArrayVec::new();
      bytes.push((n - 13) as u8);
      Ok((13, bytes))
    },
    | n => Ok((n as u8, ArrayVec::new())),
  }
}

/// Header byte plus extended delta and length bytes for one option
pub(crate) fn head(delta: u32, len: usize) -> Result<ArrayVec<[u8; 5]>, Error> {
  let (del, del_bytes) = opt_len_or_delta(delta)?;
  let (len, len_bytes) = opt_len_or_delta(u32::try_from(len).unwrap_or(u32::MAX))?;

  let mut out = ArrayVec::new();
  out.push((del << 4) | len);
  out.extend_from_slice(&del_bytes);
  out.extend_from_slice(&len_bytes);
  Ok(out)
}

/// Write one option (header byte, extended delta, extended length, value)
/// into the front of `out`, returning the number of bytes written.
///
/// Fails with [`Error::CapacityExhausted`] without writing anything if `out` is too short.
pub(crate) fn encode(delta: u32, value: &[u8], out: &mut [u8]) -> Result<usize, Error> {
  let head = head(delta, value.len())?;

  let size = head.len() + value.len();
  if size > out.len() {
    return Err(Error::no_room(size, out.len()));
  }

  out[..head.len()].copy_from_slice(&head);
  out[head.len()..size].copy_from_slice(value);

  Ok(size)
}

/// Iterator over the options in an option block.
///
/// Yields options in wire order (which is non-decreasing number order),
/// stops at the payload marker or the end of the bytes, and
/// stops after yielding the first error it encounters.
///
/// ```
/// use zoap_msg::{OptNumber, Packet};
///
/// let bytes = [0x40, 0x01, 0x00, 0x01, 0xB1, b'a', 0x01, b'b', 0xFF, b'!'];
/// let pkt = Packet::parse(&bytes[..]).unwrap();
///
/// let numbers = pkt.options()
///                  .map(|o| o.unwrap().number)
///                  .collect::<Vec<_>>();
/// assert_eq!(numbers, vec![OptNumber(11), OptNumber(11)]);
/// ```
#[derive(Debug, Clone)]
pub struct Options<'a> {
  cursor: Cursor<'a>,
  number: u32,
  failed: bool,
}

impl<'a> Options<'a> {
  pub(crate) fn new(bytes: &'a [u8]) -> Self {
    Self { cursor: Cursor::new(bytes),
           number: 0,
           failed: false }
  }

  /// Number of bytes of option data consumed so far
  pub fn position(&self) -> usize {
    self.cursor.position()
  }

  fn next_opt(&mut self) -> Result<Opt<'a>, Error> {
    let head = self.cursor.next().ok_or_else(Error::eof)?;

    // delta extension bytes precede length extension bytes
    let delta = parse_opt_len_or_delta(head >> 4,
                                       &mut self.cursor,
                                       Error::OptionDeltaReservedValue(15))?;
    let len = parse_opt_len_or_delta(head & 0b1111,
                                     &mut self.cursor,
                                     Error::ValueLengthReservedValue(15))?;

    let value = self.cursor
                    .take_exact(len as usize)
                    .ok_or_else(Error::eof)?;

    self.number = self.number.saturating_add(delta);

    Ok(Opt { number: OptNumber(self.number),
             value })
  }
}

impl<'a> Iterator for Options<'a> {
  type Item = Result<Opt<'a>, Error>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.failed {
      return None;
    }

    match self.cursor.peek() {
      | None | Some(PAYLOAD_MARKER) => None,
      | Some(_) => {
        let opt = self.next_opt();
        self.failed = opt.is_err();
        Some(opt)
      },
    }
  }
}

/// Result of scanning a whole option block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Scan {
  /// Bytes occupied by options, not counting the payload marker
  pub(crate) len: usize,
  /// Number of the last option, or 0 when there are none
  pub(crate) last: OptNumber,
}

/// Walk every option in `bytes`, validating them.
pub(crate) fn scan(bytes: &[u8]) -> Result<Scan, Error> {
  let mut opts = Options::new(bytes);
  let mut last = OptNumber(0);

  for opt in &mut opts {
    last = opt?.number;
  }

  Ok(Scan { len: opts.position(),
            last })
}

/// Collect up to `out.len()` options numbered `number` from the option block.
///
/// Because options are ordered, the scan ends as soon as it passes `number`.
pub(crate) fn find<'a>(bytes: &'a [u8],
                       number: OptNumber,
                       out: &mut [Opt<'a>])
                       -> Result<usize, Error> {
  let mut opts = Options::new(bytes);
  let mut count = 0;

  while count < out.len() {
    match opts.next() {
      | None => break,
      | Some(Err(Error::UnexpectedEndOfStream)) => return Err(Error::OptionScanAborted),
      | Some(Err(e)) => return Err(e),
      | Some(Ok(opt)) if opt.number == number => {
        out[count] = opt;
        count += 1;
      },
      | Some(Ok(opt)) if opt.number > number => break,
      | Some(Ok(_)) => continue,
    }
  }

  Ok(count)
}

/// The option after a [`Located`] one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Following {
  pub(crate) number: OptNumber,
  /// Offset of its value within the option block
  pub(crate) value_start: usize,
  pub(crate) value_len: usize,
}

/// Where an option sits within an option block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Located {
  /// Offset of its header byte
  pub(crate) start: usize,
  /// Offset just past its value
  pub(crate) end: usize,
  /// Number of the option before it, or 0
  pub(crate) prev: OptNumber,
  pub(crate) next: Option<Following>,
}

/// Find the first option numbered `number`, along with its neighbours.
pub(crate) fn locate(bytes: &[u8], number: OptNumber) -> Result<Option<Located>, Error> {
  let mut opts = Options::new(bytes);
  let mut prev = OptNumber(0);

  loop {
    let start = opts.position();
    let opt = match opts.next() {
      | Some(opt) => opt?,
      | None => return Ok(None),
    };

    if opt.number > number {
      return Ok(None);
    }

    if opt.number == number {
      let end = opts.position();
      let next = match opts.next() {
        | Some(next) => {
          let next = next?;
          Some(Following { number: next.number,
                           value_start: opts.position() - next.value.len(),
                           value_len: next.value.len() })
        },
        | None => None,
      };

      return Ok(Some(Located { start,
                               end,
                               prev,
                               next }));
    }

    prev = opt.number;
  }
}

/// Shortest big-endian encoding of an integer option value;
/// zero is encoded as the empty value.
pub(crate) fn int_bytes(n: u32) -> ArrayVec<[u8; 4]> {
  let bytes = n.to_be_bytes();
  let skip = bytes.iter().take_while(|b| **b == 0).count();
  bytes[skip..].iter().copied().collect()
}

/// Interpret an option value as a big-endian unsigned integer.
///
/// Values longer than 4 bytes do not fit and yield 0.
///
/// ```
/// use zoap_msg::option_value_to_int;
///
/// assert_eq!(option_value_to_int(&[]), 0);
/// assert_eq!(option_value_to_int(&[0x01, 0x00]), 256);
/// assert_eq!(option_value_to_int(&[1, 2, 3, 4, 5]), 0);
/// ```
pub fn option_value_to_int(value: &[u8]) -> u32 {
  if value.len() > 4 {
    0
  } else {
    value.iter().fold(0u32, |n, b| (n << 8) | *b as u32)
  }
}
