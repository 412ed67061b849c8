use embedded_time::duration::Milliseconds;

/// Configuration options related to outbound CON requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Con {
  /// How long to wait for an ACK before the first retransmission.
  ///
  /// Defaults to 2345 milliseconds:
  /// ```
  /// use embedded_time::duration::Milliseconds;
  /// use zoap::config::Con;
  ///
  /// assert_eq!(Con::default().ack_timeout, Milliseconds(2345u32));
  /// ```
  pub ack_timeout: Milliseconds<u32>,
  /// How many times the timeout doubles before it stops growing,
  /// which is also how many retransmissions are permitted.
  ///
  /// Defaults to 2, giving timeouts of 2345, 4690 then 9380 milliseconds.
  /// ```
  /// use zoap::config::Con;
  ///
  /// assert_eq!(Con::default().max_doublings, 2);
  /// ```
  pub max_doublings: u8,
}

impl Con {
  /// The timeout after every doubling has been spent
  ///
  /// ```
  /// use embedded_time::duration::Milliseconds;
  /// use zoap::config::Con;
  ///
  /// assert_eq!(Con::default().max_timeout(), Milliseconds(9380u32));
  /// ```
  pub fn max_timeout(&self) -> Milliseconds<u32> {
    let Milliseconds(init) = self.ack_timeout;
    Milliseconds(init.saturating_mul(2u32.saturating_pow(self.max_doublings as u32)))
  }
}

/// Configuration options related to building messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Msg {
  /// Seed used to generate message [`Token`](zoap_msg::Token)s,
  /// customizable to allow for your application to generate tokens
  /// less guessably.
  ///
  /// The default value is 0, although it is
  /// best practice to set this to something else.
  /// (random integer, machine identifier)
  ///
  /// ```
  /// use zoap::config::Msg;
  ///
  /// assert_eq!(Msg::default().token_seed, 0);
  /// ```
  pub token_seed: u16,

  /// Length of generated tokens, at most 8.
  ///
  /// ```
  /// use zoap::config::Msg;
  ///
  /// assert_eq!(Msg::default().token_len, 8);
  /// ```
  pub token_len: u8,

  /// See [`Con`]
  pub con: Con,
}

impl Default for Con {
  fn default() -> Self {
    Con { ack_timeout: Milliseconds(2345),
          max_doublings: 2 }
  }
}

impl Default for Msg {
  fn default() -> Self {
    Msg { token_seed: 0,
          token_len: 8,
          con: Con::default() }
  }
}

/// Runtime config
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Config {
  /// See [`Msg`]
  pub msg: Msg,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn max_timeout_saturates() {
    let con = Con { ack_timeout: Milliseconds(1000),
                    max_doublings: 40 };
    assert_eq!(con.max_timeout(), Milliseconds(u32::MAX));

    let con = Con { ack_timeout: Milliseconds(1000),
                    max_doublings: 0 };
    assert_eq!(con.max_timeout(), Milliseconds(1000u32));
  }
}
