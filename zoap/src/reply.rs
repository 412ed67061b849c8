use core::fmt;

use no_std_net::SocketAddr;
use zoap_msg::{Buffer, Packet, Token};

use crate::logging::msg_summary;

/// Invoked with each response whose token matches a [`Reply`],
/// along with the reply itself and the address the response came from.
pub type ReplyFn<D> = fn(&Packet<&[u8]>, &mut Reply<D>, SocketAddr);

/// A handler awaiting responses to a request, correlated by token.
///
/// A reply stays registered after it is invoked, so it keeps
/// receiving responses that share its token (e.g. Observe notifications)
/// until it is [`clear`]ed.
///
/// Pools of these are caller-owned slices of `Option<Reply<D>>`;
/// `None` is a free slot.
pub struct Reply<D> {
  token: Token,
  reply: ReplyFn<D>,
  /// Caller's data, available to the handler
  pub user_data: D,
}

impl<D> Reply<D> {
  /// Wait for responses carrying `request`'s token
  pub fn new<R: Buffer>(request: &Packet<R>, reply: ReplyFn<D>, user_data: D) -> Self {
    Self { token: request.token(),
           reply,
           user_data }
  }

  /// The token responses must carry
  pub fn token(&self) -> &Token {
    &self.token
  }

  /// Whether `response` carries exactly this reply's token,
  /// both length and bytes.
  pub fn matches<R: Buffer>(&self, response: &Packet<R>) -> bool {
    self.token == response.token()
  }
}

impl<D: fmt::Debug> fmt::Debug for Reply<D> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Reply")
     .field("token", &self.token)
     .field("user_data", &self.user_data)
     .finish()
  }
}

/// Find the first free slot in the pool
pub fn next_unused<D>(pool: &mut [Option<Reply<D>>]) -> Option<&mut Option<Reply<D>>> {
  let len = pool.len();
  let slot = pool.iter_mut().find(|slot| slot.is_none());

  if slot.is_none() {
    log::warn!("all {} reply slots in use", len);
  }

  slot
}

/// Register `reply` for responses to `request` in `slot`, replacing whatever was there.
pub fn init<'s, D, R: Buffer>(slot: &'s mut Option<Reply<D>>,
                              request: &Packet<R>,
                              reply: ReplyFn<D>,
                              user_data: D)
                              -> &'s mut Reply<D> {
  log::trace!("awaiting reply to {}", msg_summary(request));
  slot.insert(Reply::new(request, reply, user_data))
}

/// Hand `response` to the first reply whose token matches, returning that reply.
///
/// The reply is not cleared.
pub fn response_received<'p, D, R: Buffer>(response: &Packet<R>,
                                           from: SocketAddr,
                                           pool: &'p mut [Option<Reply<D>>])
                                           -> Option<&'p mut Reply<D>> {
  let reply = pool.iter_mut()
                  .filter_map(|slot| slot.as_mut())
                  .find(|r| r.matches(response))?;

  log::trace!("{} from {} matched a reply", msg_summary(response), from);

  let f = reply.reply;
  f(&response.view(), reply, from);

  Some(reply)
}

/// Free a slot
pub fn clear<D>(slot: &mut Option<Reply<D>>) {
  *slot = None;
}
