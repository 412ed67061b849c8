use tinyvec::ArrayVec;
use toad_macros::rfc_7252_doc;

use crate::Error;

#[doc = rfc_7252_doc!("5.3.1")]
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct Token(pub ArrayVec<[u8; 8]>);

impl Token {
  /// Copy up to 8 bytes into a token
  ///
  /// ```
  /// use zoap_msg::{Error, Token};
  ///
  /// assert_eq!(Token::try_from_slice(&[0xAA, 0xBB]).unwrap().as_bytes(), &[0xAA, 0xBB]);
  /// assert_eq!(Token::try_from_slice(&[0; 9]), Err(Error::InvalidTokenLength(9)));
  /// ```
  pub fn try_from_slice(bytes: &[u8]) -> Result<Self, Error> {
    if bytes.len() > 8 {
      return Err(Error::InvalidTokenLength(bytes.len().min(u8::MAX as usize) as u8));
    }

    let mut arr = ArrayVec::new();
    arr.extend_from_slice(bytes);
    Ok(Token(arr))
  }

  /// The token's bytes
  pub fn as_bytes(&self) -> &[u8] {
    &self.0
  }

  /// Token length, 0 through 8
  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// Whether this is the zero-length token
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl AsRef<[u8]> for Token {
  fn as_ref(&self) -> &[u8] {
    self.as_bytes()
  }
}
