use core::fmt;

use no_std_net::SocketAddr;
use zoap_msg::opt::known;
use zoap_msg::{Buffer, Error, Opt, Packet};

use crate::logging::msg_summary;
use crate::req::Method;

/// Most Uri-Path segments a request may have and still be routed
pub const MAX_PATH_SEGMENTS: usize = 16;

/// Handles one method of a [`Resource`]
pub type Handler<D> = fn(&Resource<D>, &Packet<&[u8]>, SocketAddr) -> Result<(), Error>;

/// A server endpoint addressed by its Uri-Path,
/// with an optional handler per request method.
///
/// ```
/// use zoap::resource::Resource;
/// use zoap::SocketAddr;
/// use zoap_msg::{Error, Packet};
///
/// fn temp(_: &Resource<()>, _: &Packet<&[u8]>, _: SocketAddr) -> Result<(), Error> {
///   Ok(())
/// }
///
/// let resources = [Resource { get: Some(temp),
///                             ..Resource::new(&["sensors", "temp"], ()) }];
/// ```
pub struct Resource<D> {
  /// Path segments, e.g. `&["sensors", "temp"]` for `/sensors/temp`
  pub path: &'static [&'static str],
  /// GET handler
  pub get: Option<Handler<D>>,
  /// POST handler
  pub post: Option<Handler<D>>,
  /// PUT handler
  pub put: Option<Handler<D>>,
  /// DELETE handler
  pub delete: Option<Handler<D>>,
  /// Caller's data, available to the handlers
  pub user_data: D,
}

impl<D> Resource<D> {
  /// A resource at `path` with no handlers
  pub const fn new(path: &'static [&'static str], user_data: D) -> Self {
    Self { path,
           get: None,
           post: None,
           put: None,
           delete: None,
           user_data }
  }

  /// The handler for `method`, if there is one
  pub fn handler(&self, method: Method) -> Option<Handler<D>> {
    match method {
      | Method::Get => self.get,
      | Method::Post => self.post,
      | Method::Put => self.put,
      | Method::Delete => self.delete,
    }
  }

  /// Whether this resource's path is exactly `segments`:
  /// the same number of segments, each byte-for-byte equal.
  pub fn matches(&self, segments: &[Opt<'_>]) -> bool {
    self.path.len() == segments.len()
    && self.path
           .iter()
           .zip(segments)
           .all(|(p, seg)| p.as_bytes() == seg.value)
  }
}

impl<D: fmt::Debug> fmt::Debug for Resource<D> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Resource")
     .field("path", &self.path)
     .field("get", &self.get.is_some())
     .field("post", &self.post.is_some())
     .field("put", &self.put.is_some())
     .field("delete", &self.delete.is_some())
     .field("user_data", &self.user_data)
     .finish()
  }
}

/// Route a request to the first resource whose path equals its Uri-Path.
///
/// - No resource matched: `Err(Error::NoRoute)`
/// - A resource matched but has no handler for the request's method: `Ok(())`
/// - Otherwise, whatever the handler returns
///
/// Every class 0 code is routed, so an Empty message or an unknown 0.xx
/// code is `Err(Error::NoRoute)` or `Ok(())` depending on its Uri-Path
/// but never reaches a handler. Responses are ignored with `Ok(())`.
pub fn handle_request<D, B: Buffer>(pkt: &Packet<B>,
                                    resources: &[Resource<D>],
                                    from: SocketAddr)
                                    -> Result<(), Error> {
  if pkt.raw_code().class != 0 {
    log::debug!("not routing {}: not a request", msg_summary(pkt));
    return Ok(());
  }

  let method = Method::from_code(pkt.code());

  // one extra so that an over-long path is detected rather than truncated
  let mut segments = [Opt::default(); MAX_PATH_SEGMENTS + 1];
  let n = pkt.find_options(known::URI_PATH, &mut segments)?;

  let resource = if n > MAX_PATH_SEGMENTS {
    None
  } else {
    resources.iter().find(|r| r.matches(&segments[..n]))
  };

  match resource.map(|r| (r, method.and_then(|m| r.handler(m)))) {
    | None => {
      log::debug!("no route for {} from {}", msg_summary(pkt), from);
      Err(Error::NoRoute)
    },
    | Some((r, None)) => {
      log::debug!("{} not implemented for {:?}", pkt.code(), r.path);
      Ok(())
    },
    | Some((r, Some(handler))) => {
      log::trace!("{} {:?}", pkt.code(), r.path);
      handler(r, &pkt.view(), from)
    },
  }
}
