mod method;

#[doc(inline)]
pub use method::*;
