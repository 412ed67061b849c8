/// Coarse classification of an [`Error`], corresponding to the
/// errno values a C caller would expect.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKind {
  /// Malformed wire data or a misuse of the builder (`EINVAL`)
  Invalid,
  /// Not enough tail-room in the transport buffer (`ENOMEM`)
  NoMemory,
  /// Nothing matched (`ENOENT`)
  NotFound,
}

/// Errors encounterable while parsing or building packets
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Error {
  /// Reached end of the buffer before parsing was finished
  UnexpectedEndOfStream,

  /// The version bits were not 1
  InvalidVersion(u8),

  /// Token length was > 8
  InvalidTokenLength(u8),

  /// Option Delta was set to 15, which is reserved
  OptionDeltaReservedValue(u8),

  /// Value Length was set to 15, which is reserved
  ValueLengthReservedValue(u8),

  /// Options must be added in non-decreasing order of option number
  #[allow(missing_docs)]
  OptionOutOfOrder { previous: u32, number: u32 },

  /// An option delta or value length was larger than
  /// the 2-byte extended encoding can express (65804)
  OptionFieldTooLarge(u32),

  /// Options may not be added once the payload marker has been written
  PayloadStarted,

  /// The token must be set before any option is added
  TokenAfterOptions,

  /// The transport buffer did not have enough tail-room for the write
  #[allow(missing_docs)]
  CapacityExhausted { needed: usize, tailroom: usize },

  /// An option scan hit a truncated option before it finished
  OptionScanAborted,

  /// No resource path matched the request's Uri-Path
  NoRoute,
}

impl Error {
  /// Shorthand for [`Error::UnexpectedEndOfStream`]
  pub fn eof() -> Self {
    Self::UnexpectedEndOfStream
  }

  /// Shorthand for [`Error::CapacityExhausted`]
  pub fn no_room(needed: usize, tailroom: usize) -> Self {
    Self::CapacityExhausted { needed, tailroom }
  }

  /// Which class of failure this is
  pub fn kind(&self) -> ErrorKind {
    match self {
      | Self::CapacityExhausted { .. } => ErrorKind::NoMemory,
      | Self::OptionScanAborted | Self::NoRoute => ErrorKind::NotFound,
      | _ => ErrorKind::Invalid,
    }
  }

  /// Negative errno equivalent (`-EINVAL`, `-ENOMEM`, `-ENOENT`)
  ///
  /// ```
  /// use zoap_msg::Error;
  ///
  /// assert_eq!(Error::InvalidTokenLength(9).errno(), -22);
  /// assert_eq!(Error::no_room(4, 3).errno(), -12);
  /// assert_eq!(Error::NoRoute.errno(), -2);
  /// ```
  pub fn errno(&self) -> i32 {
    match self.kind() {
      | ErrorKind::Invalid => -22,
      | ErrorKind::NoMemory => -12,
      | ErrorKind::NotFound => -2,
    }
  }
}

impl core::fmt::Display for Error {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match self {
      | Self::UnexpectedEndOfStream => write!(f, "unexpected end of packet"),
      | Self::InvalidVersion(v) => write!(f, "unsupported CoAP version {}", v),
      | Self::InvalidTokenLength(n) => write!(f, "token length {} exceeds 8", n),
      | Self::OptionDeltaReservedValue(n) => write!(f, "option delta nibble {} is reserved", n),
      | Self::ValueLengthReservedValue(n) => write!(f, "option length nibble {} is reserved", n),
      | Self::OptionOutOfOrder { previous, number } => {
        write!(f, "option {} added after option {}", number, previous)
      },
      | Self::OptionFieldTooLarge(n) => write!(f, "{} does not fit an option delta or length", n),
      | Self::PayloadStarted => write!(f, "options cannot follow the payload marker"),
      | Self::TokenAfterOptions => write!(f, "token must be set before options"),
      | Self::CapacityExhausted { needed, tailroom } => {
        write!(f, "needed {} bytes but only {} remain", needed, tailroom)
      },
      | Self::OptionScanAborted => write!(f, "option scan hit a truncated option"),
      | Self::NoRoute => write!(f, "no resource matched"),
    }
  }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn kinds() {
    assert_eq!(Error::eof().kind(), ErrorKind::Invalid);
    assert_eq!(Error::OptionDeltaReservedValue(15).kind(), ErrorKind::Invalid);
    assert_eq!(Error::no_room(1, 0).kind(), ErrorKind::NoMemory);
    assert_eq!(Error::OptionScanAborted.kind(), ErrorKind::NotFound);
    assert_eq!(Error::NoRoute.kind(), ErrorKind::NotFound);
  }

  #[test]
  fn display() {
    assert_eq!(Error::no_room(4, 3).to_string(), "needed 4 bytes but only 3 remain");
    assert_eq!(Error::OptionOutOfOrder { previous: 11, number: 3 }.to_string(),
               "option 3 added after option 11");
  }
}
