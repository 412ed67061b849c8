use core::fmt;

use zoap_msg::{Buffer, Packet};

/// One-line description of a packet for log output,
/// rendered straight into the log record without allocating.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Summary<'a>(Packet<&'a [u8]>);

impl<'a> fmt::Display for Summary<'a> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let pkt = &self.0;
    write!(f,
           "{:?}: {:?} {} id {} with {} byte payload",
           pkt.code().kind(),
           pkt.ty(),
           pkt.code(),
           pkt.id().0,
           pkt.payload().map(|p| p.len()).unwrap_or(0))
  }
}

pub(crate) fn msg_summary<B: Buffer>(pkt: &Packet<B>) -> Summary<'_> {
  Summary(pkt.view())
}
