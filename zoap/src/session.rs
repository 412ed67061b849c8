use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tinyvec::ArrayVec;
use zoap_msg::{Id, Packet, Token};

use crate::config::Config;
use crate::pending::Pending;

/// Hands out message IDs and tokens for outbound messages.
///
/// IDs count up from 1, wrapping at `u16::MAX`.
/// Tokens are [`Msg::token_len`](crate::config::Msg::token_len) bytes
/// drawn from a ChaCha8 stream seeded with
/// [`Msg::token_seed`](crate::config::Msg::token_seed).
///
/// ```
/// use zoap::session::Session;
/// use zoap_msg::Id;
///
/// let mut session = Session::default();
/// assert_eq!(session.next_id(), Id(1));
/// assert_eq!(session.next_id(), Id(2));
/// assert_eq!(session.next_token().len(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct Session {
  config: Config,
  id: u16,
  rand: ChaCha8Rng,
}

impl Session {
  /// Create a session
  pub fn new(config: Config) -> Self {
    Self { config,
           id: 0,
           rand: ChaCha8Rng::seed_from_u64(config.msg.token_seed as u64) }
  }

  /// The config this session was created with
  pub fn config(&self) -> &Config {
    &self.config
  }

  /// A message ID not used since the counter last wrapped
  pub fn next_id(&mut self) -> Id {
    self.id = self.id.wrapping_add(1);
    Id(self.id)
  }

  /// A fresh token
  pub fn next_token(&mut self) -> Token {
    let mut bytes = [0u8; 8];
    self.rand.fill_bytes(&mut bytes);

    let len = (self.config.msg.token_len as usize).min(bytes.len());
    let mut token = ArrayVec::new();
    token.extend_from_slice(&bytes[..len]);
    Token(token)
  }

  /// Track a confirmable `request` with this session's retransmission schedule
  pub fn pending<B>(&self, request: Packet<B>) -> Pending<B> {
    Pending::with_config(request, self.config.msg.con)
  }
}

impl Default for Session {
  fn default() -> Self {
    Self::new(Config::default())
  }
}
