use toad_macros::rfc_7252_doc;

macro_rules! code {
  (rfc7252($section:literal) $name:ident = $c:literal * $d:literal) => {
    #[doc = rfc_7252_doc!($section)]
    #[allow(clippy::zero_prefixed_literal)]
    pub const $name: Code = Code::new($c, $d);
  };
  (#[doc = $doc:expr] $name:ident = $c:literal * $d:literal) => {
    #[doc = $doc]
    #[allow(clippy::zero_prefixed_literal)]
    pub const $name: Code = Code::new($c, $d);
  };
}

#[doc = rfc_7252_doc!("12.1")]
/// <details><summary><b>RFC7252 Section 12.1.1 Method Codes</b></summary>
#[doc = concat!("\n#", rfc_7252_doc!("12.1.1"))]
/// </details>
/// <details><summary><b>RFC7252 Section 12.1.2 Response Codes</b></summary>
#[doc = concat!("\n#", rfc_7252_doc!("12.1.2"))]
/// </details>
///
/// # Examples
/// ```
/// use zoap_msg::Code;
///
/// assert_eq!(u8::from(Code::CONTENT), 0b010_00101);
/// assert_eq!(Code::from(0b010_00101), Code { class: 2, detail: 5 });
/// ```
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct Code {
  /// The "class" of message codes identify it as a request or response, and provides the class of response status:
  ///
  /// |class|meaning|
  /// |---|---|
  /// |`0`|Message is a request|
  /// |`2`|Message is a success response|
  /// |`4`|Message is a client error response|
  /// |`5`|Message is a server error response|
  pub class: u8,

  /// 2-digit integer (range `[0, 32)`) that provides granular information about the response status.
  pub detail: u8,
}

/// Whether a code is empty, a request method, or a response status
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum CodeKind {
  /// 0.00
  Empty,
  /// 0.01 through 0.31
  Request,
  /// any code with a nonzero class
  Response,
}

impl Code {
  code!(rfc7252("4.1") EMPTY = 0 * 00);

  code!(rfc7252("5.8.1") GET = 0 * 01);
  code!(rfc7252("5.8.2") POST = 0 * 02);
  code!(rfc7252("5.8.3") PUT = 0 * 03);
  code!(rfc7252("5.8.4") DELETE = 0 * 04);

  code!(#[doc = "2.00 OK, a generic success response"]
        OK = 2 * 00);
  code!(rfc7252("5.9.1.1") CREATED = 2 * 01);
  code!(rfc7252("5.9.1.2") DELETED = 2 * 02);
  code!(rfc7252("5.9.1.3") VALID = 2 * 03);
  code!(rfc7252("5.9.1.4") CHANGED = 2 * 04);
  code!(rfc7252("5.9.1.5") CONTENT = 2 * 05);

  code!(rfc7252("5.9.2.1") BAD_REQUEST = 4 * 00);
  code!(rfc7252("5.9.2.2") UNAUTHORIZED = 4 * 01);
  code!(rfc7252("5.9.2.3") BAD_OPTION = 4 * 02);
  code!(rfc7252("5.9.2.4") FORBIDDEN = 4 * 03);
  code!(rfc7252("5.9.2.5") NOT_FOUND = 4 * 04);
  code!(rfc7252("5.9.2.6") METHOD_NOT_ALLOWED = 4 * 05);
  code!(rfc7252("5.9.2.7") NOT_ACCEPTABLE = 4 * 06);
  code!(rfc7252("5.9.2.8") PRECONDITION_FAILED = 4 * 12);
  code!(rfc7252("5.9.2.9") REQUEST_ENTITY_TOO_LARGE = 4 * 13);
  code!(rfc7252("5.9.2.10") UNSUPPORTED_CONTENT_FORMAT = 4 * 15);

  code!(rfc7252("5.9.3.1") INTERNAL_SERVER_ERROR = 5 * 00);
  code!(rfc7252("5.9.3.2") NOT_IMPLEMENTED = 5 * 01);
  code!(rfc7252("5.9.3.3") BAD_GATEWAY = 5 * 02);
  code!(rfc7252("5.9.3.4") SERVICE_UNAVAILABLE = 5 * 03);
  code!(rfc7252("5.9.3.5") GATEWAY_TIMEOUT = 5 * 04);
  code!(rfc7252("5.9.3.6") PROXYING_NOT_SUPPORTED = 5 * 05);

  const KNOWN: [Code; 27] = [Self::EMPTY,
                             Self::GET,
                             Self::POST,
                             Self::PUT,
                             Self::DELETE,
                             Self::OK,
                             Self::CREATED,
                             Self::DELETED,
                             Self::VALID,
                             Self::CHANGED,
                             Self::CONTENT,
                             Self::BAD_REQUEST,
                             Self::UNAUTHORIZED,
                             Self::BAD_OPTION,
                             Self::FORBIDDEN,
                             Self::NOT_FOUND,
                             Self::METHOD_NOT_ALLOWED,
                             Self::NOT_ACCEPTABLE,
                             Self::PRECONDITION_FAILED,
                             Self::REQUEST_ENTITY_TOO_LARGE,
                             Self::UNSUPPORTED_CONTENT_FORMAT,
                             Self::INTERNAL_SERVER_ERROR,
                             Self::NOT_IMPLEMENTED,
                             Self::BAD_GATEWAY,
                             Self::SERVICE_UNAVAILABLE,
                             Self::GATEWAY_TIMEOUT,
                             Self::PROXYING_NOT_SUPPORTED];

  /// Create a new Code
  ///
  /// ```
  /// use zoap_msg::Code;
  ///
  /// let content = Code::new(2, 05);
  /// ```
  pub const fn new(class: u8, detail: u8) -> Self {
    Self { class, detail }
  }

  /// Whether this is one of the method or response codes defined above.
  ///
  /// ```
  /// use zoap_msg::Code;
  ///
  /// assert!(Code::NOT_FOUND.is_known());
  /// assert!(!Code::new(0, 5).is_known());
  /// ```
  pub fn is_known(&self) -> bool {
    Self::KNOWN.contains(self)
  }

  /// This code if [known](Code::is_known), otherwise [`Code::EMPTY`].
  pub fn normalized(self) -> Self {
    if self.is_known() {
      self
    } else {
      Self::EMPTY
    }
  }

  /// Get whether this code is for a request, response, or empty message
  pub fn kind(&self) -> CodeKind {
    match (self.class, self.detail) {
      | (0, 0) => CodeKind::Empty,
      | (0, _) => CodeKind::Request,
      | _ => CodeKind::Response,
    }
  }

  /// Get the human string representation of a message code
  ///
  /// Returns a `char` array to avoid unnecessary heap allocation.
  ///
  /// ```
  /// use zoap_msg::Code;
  ///
  /// let chars = Code::CONTENT.to_human();
  /// assert_eq!(String::from_iter(chars), "2.05");
  /// ```
  pub fn to_human(&self) -> [char; 4] {
    let to_char = |d: u8| char::from_digit(d.into(), 10).unwrap_or('?');
    [to_char(self.class), '.', to_char(self.detail / 10), to_char(self.detail % 10)]
  }
}

impl core::fmt::Display for Code {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    let [a, b, c, d] = self.to_human();
    write!(f, "{}{}{}{}", a, b, c, d)
  }
}

impl From<u8> for Code {
  fn from(b: u8) -> Self {
    let class = b >> 5;
    let detail = b & 0b0011111;

    Code { class, detail }
  }
}

impl From<Code> for u8 {
  fn from(code: Code) -> u8 {
    let class = code.class << 5;
    let detail = code.detail;

    class | detail
  }
}
