use embedded_time::duration::Milliseconds;
use zoap_msg::{Buffer, Packet};

use crate::config::Con;
use crate::logging::msg_summary;

/// A confirmable request that has been sent and not yet acknowledged.
///
/// Pools of these are caller-owned slices of `Option<Pending<B>>`;
/// `None` is a free slot.
///
/// The retransmission timeout starts at zero and only advances
/// when [`Pending::cycle`] is called by the caller's timer.
///
/// ```
/// use embedded_time::duration::Milliseconds;
/// use zoap::pending::{self, Pending};
/// use zoap_msg::{Packet, NetBuf};
///
/// let request = Packet::init(NetBuf::new([0u8; 16])).unwrap();
/// let mut pool: [Option<Pending<NetBuf<[u8; 16]>>>; 4] = Default::default();
///
/// let slot = pending::next_unused(&mut pool).unwrap();
/// let p = pending::init(slot, request);
///
/// assert!(p.cycle());
/// assert_eq!(p.timeout(), Milliseconds(2345u32));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pending<B> {
  request: Packet<B>,
  timeout: Milliseconds<u32>,
  con: Con,
}

impl<B> Pending<B> {
  /// Track `request` with the default retransmission schedule
  pub fn new(request: Packet<B>) -> Self {
    Self::with_config(request, Con::default())
  }

  /// Track `request` with a custom retransmission schedule
  pub fn with_config(request: Packet<B>, con: Con) -> Self {
    Self { request,
           timeout: Milliseconds(0),
           con }
  }

  /// The request awaiting acknowledgement
  pub fn request(&self) -> &Packet<B> {
    &self.request
  }

  /// Current retransmission timeout, 0 if never cycled
  pub fn timeout(&self) -> Milliseconds<u32> {
    self.timeout
  }

  /// Advance the retransmission timeout.
  ///
  /// The first call sets the initial ACK timeout, each following call doubles it
  /// until [`Con::max_timeout`] is reached.
  ///
  /// Returns whether the timeout changed, i.e. whether another
  /// retransmission is permitted.
  pub fn cycle(&mut self) -> bool {
    let Milliseconds(init) = self.con.ack_timeout;
    let Milliseconds(max) = self.con.max_timeout();

    let next = match self.timeout.0 {
      | 0 => init,
      | t => t.saturating_mul(2).min(max),
    };

    let changed = next != self.timeout.0;
    self.timeout = Milliseconds(next);
    changed
  }
}

impl<B: Buffer> Pending<B> {
  /// Whether `response` acknowledges this request.
  ///
  /// The message IDs must be equal. A response carrying a token
  /// must also carry this request's token; an empty ACK carries none.
  pub fn acked_by<R: Buffer>(&self, response: &Packet<R>) -> bool {
    self.request.id() == response.id()
    && (response.tkl() == 0 || self.request.token_eq(response))
  }
}

/// Find the first free slot in the pool.
///
/// `None` means every slot is in use; the request must not be sent.
pub fn next_unused<B>(pool: &mut [Option<Pending<B>>]) -> Option<&mut Option<Pending<B>>> {
  let len = pool.len();
  let slot = pool.iter_mut().find(|slot| slot.is_none());

  if slot.is_none() {
    log::warn!("all {} pending slots in use", len);
  }

  slot
}

/// Start tracking `request` in `slot`, replacing whatever was there.
pub fn init<B: Buffer>(slot: &mut Option<Pending<B>>, request: Packet<B>) -> &mut Pending<B> {
  init_config(slot, request, Con::default())
}

/// [`init`] with a custom retransmission schedule
pub fn init_config<B: Buffer>(slot: &mut Option<Pending<B>>,
                              request: Packet<B>,
                              con: Con)
                              -> &mut Pending<B> {
  log::trace!("pending {}", msg_summary(&request));
  slot.insert(Pending::with_config(request, con))
}

/// Advance the timeout of a pending request, see [`Pending::cycle`]
pub fn cycle<B: Buffer>(pending: &mut Pending<B>) -> bool {
  let changed = pending.cycle();
  log::trace!("pending id {} timeout now {}ms{}",
              pending.request.id().0,
              pending.timeout.0,
              if changed { "" } else { " (final)" });
  changed
}

/// The pending request whose timeout is shortest, ignoring
/// requests whose timeout has not been started.
pub fn next_to_expire<B>(pool: &mut [Option<Pending<B>>]) -> Option<&mut Pending<B>> {
  pool.iter_mut()
      .filter_map(|slot| slot.as_mut())
      .filter(|p| p.timeout.0 > 0)
      .min_by_key(|p| p.timeout.0)
}

/// Find the request acknowledged by `response`, free its slot and return it.
pub fn received<B: Buffer, R: Buffer>(response: &Packet<R>,
                                      pool: &mut [Option<Pending<B>>])
                                      -> Option<Pending<B>> {
  let acked = pool.iter_mut()
                  .find(|slot| matches!(slot, Some(p) if p.acked_by(response)))
                  .and_then(Option::take);

  if acked.is_some() {
    log::trace!("acked by {}", msg_summary(response));
  }

  acked
}

/// Free a slot, returning what it held
pub fn clear<B>(slot: &mut Option<Pending<B>>) -> Option<Pending<B>> {
  slot.take()
}

#[cfg(test)]
mod tests {
  use zoap_msg::{Code, Id, Type};

  use super::*;
  use crate::test::{self, TestPacket};

  fn con(id: u16, token: &[u8]) -> TestPacket {
    test::request(Type::Con, Code::GET, Id(id), token, &["a"])
  }

  #[test]
  fn timeout_sequence() {
    let mut p = Pending::new(con(1, &[1]));
    assert_eq!(p.timeout(), Milliseconds(0u32));

    let seen = (0..6).map(|_| (cycle(&mut p), p.timeout().0))
                     .collect::<Vec<_>>();
    assert_eq!(seen,
               vec![(true, 2345),
                    (true, 4690),
                    (true, 9380),
                    (false, 9380),
                    (false, 9380),
                    (false, 9380)]);
  }

  #[test]
  fn custom_schedule() {
    let con_cfg = Con { ack_timeout: Milliseconds(100),
                        max_doublings: 1 };
    let mut p = Pending::with_config(con(1, &[]), con_cfg);
    assert!(p.cycle());
    assert!(p.cycle());
    assert!(!p.cycle());
    assert_eq!(p.timeout(), Milliseconds(200u32));
  }

  #[test]
  fn next_unused_skips_occupied() {
    test::init_logger();

    let mut pool: [Option<Pending<_>>; 2] = [Some(Pending::new(con(1, &[]))), None];
    let slot = next_unused(&mut pool).unwrap();
    init(slot, con(2, &[]));

    assert!(next_unused(&mut pool).is_none());

    clear(&mut pool[0]);
    assert!(next_unused(&mut pool).is_some());
  }

  #[test]
  fn init_leaves_timeout_at_zero() {
    let mut slot = None;
    let p = init(&mut slot, con(3, &[]));
    assert_eq!(p.timeout(), Milliseconds(0u32));
    assert_eq!(p.request().id(), Id(3));
  }

  #[test]
  fn next_to_expire_is_smallest_started_timeout() {
    let mut pool: [Option<Pending<_>>; 4] = Default::default();
    for (ix, cycles) in [(0usize, 3), (1, 0), (2, 1), (3, 2)] {
      let p = init(&mut pool[ix], con(ix as u16, &[]));
      (0..cycles).for_each(|_| {
                   p.cycle();
                 });
    }

    let next = next_to_expire(&mut pool).unwrap();
    assert_eq!(next.request().id(), Id(2));
    assert_eq!(next.timeout(), Milliseconds(2345u32));

    let mut empty: [Option<Pending<_>>; 2] = [Some(Pending::new(con(9, &[]))), None];
    assert!(next_to_expire(&mut empty).is_none());
  }

  #[test]
  fn received_matches_id_and_token() {
    test::init_logger();

    let mut pool: [Option<Pending<_>>; 3] = [Some(Pending::new(con(10, &[0xAA]))),
                                              Some(Pending::new(con(11, &[0xBB]))),
                                              None];

    // piggybacked response with the wrong token
    let wrong = test::response(Type::Ack, Code::CONTENT, Id(11), &[0xAA]);
    assert!(received(&wrong, &mut pool).is_none());

    let right = test::response(Type::Ack, Code::CONTENT, Id(11), &[0xBB]);
    let acked = received(&right, &mut pool).unwrap();
    assert_eq!(acked.request().id(), Id(11));
    assert!(pool[1].is_none());

    // already freed
    assert!(received(&right, &mut pool).is_none());
  }

  #[test]
  fn empty_ack_matches_on_id() {
    let mut pool = [Some(Pending::new(con(0xDEAD, b"token")))];

    let req = *pool[0].as_ref().unwrap().request();
    let ack = Packet::init_ack(zoap_msg::NetBuf::new([0u8; 16]), &req, Code::EMPTY).unwrap();

    assert!(received(&ack, &mut pool).is_some());
    assert!(pool[0].is_none());
  }
}
