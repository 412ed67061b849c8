use toad_macros::rfc_7252_doc;
use zoap_msg::Code;

/// Request method
///
/// ```
/// use zoap::req::Method;
/// use zoap_msg::Code;
///
/// assert_eq!(Method::from_code(Code::PUT), Some(Method::Put));
/// assert_eq!(Method::from_code(Code::CONTENT), None);
/// assert_eq!(Method::Delete.code(), Code::DELETE);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Method {
  #[doc = rfc_7252_doc!("5.8.1")]
  Get,
  #[doc = rfc_7252_doc!("5.8.2")]
  Post,
  #[doc = rfc_7252_doc!("5.8.3")]
  Put,
  #[doc = rfc_7252_doc!("5.8.4")]
  Delete,
}

impl Method {
  /// The message code carrying this method
  pub fn code(&self) -> Code {
    match self {
      | Method::Get => Code::GET,
      | Method::Post => Code::POST,
      | Method::Put => Code::PUT,
      | Method::Delete => Code::DELETE,
    }
  }

  /// The method a request code stands for, if any
  pub fn from_code(code: Code) -> Option<Self> {
    match code {
      | Code::GET => Some(Method::Get),
      | Code::POST => Some(Method::Post),
      | Code::PUT => Some(Method::Put),
      | Code::DELETE => Some(Method::Delete),
      | _ => None,
    }
  }
}

impl core::fmt::Display for Method {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    let string = match self {
      | Method::Get => "GET",
      | Method::Post => "POST",
      | Method::Put => "PUT",
      | Method::Delete => "DELETE",
    };

    write!(f, "{}", string)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn code_round_trip() {
    for m in [Method::Get, Method::Post, Method::Put, Method::Delete] {
      assert_eq!(Method::from_code(m.code()), Some(m));
    }
  }

  #[test]
  fn non_methods() {
    assert_eq!(Method::from_code(Code::EMPTY), None);
    assert_eq!(Method::from_code(Code::new(0, 5)), None);
    assert_eq!(Method::from_code(Code::NOT_FOUND), None);
  }

  #[test]
  fn display() {
    assert_eq!(Method::Post.to_string(), "POST");
  }
}
