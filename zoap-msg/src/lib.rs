//! Zero-copy CoAP packets over caller-owned buffers.
//!
//! The most notable item in `zoap_msg` is [`Packet`];
//! a thin view over a transport buffer that reads and writes
//! the CoAP wire format in place.
//!
//! ## Allocation
//! `Packet` never allocates and never copies the packet out of the buffer
//! it was given. Reading a packet yields borrowed views ([`Opt`], [`Packet::payload`])
//! and building one appends directly into the buffer's tail-room.
//!
//! Anything implementing [`Buffer`] (for reading) or [`BufferMut`] (for building)
//! can back a packet; [`NetBuf`] is a fixed-capacity buffer over any `[u8]` storage.
//!
//! ```
//! use zoap_msg::{opt::known, Code, Id, NetBuf, Packet, Type, Version};
//!
//! let mut pkt = Packet::init(NetBuf::new([0u8; 64])).unwrap();
//! pkt.set_version(Version(1));
//! pkt.set_type(Type::Con);
//! pkt.set_code(Code::GET);
//! pkt.set_id(Id(1));
//! pkt.set_token(&[0x01]).unwrap();
//! pkt.add_option(known::URI_PATH, b"sensors").unwrap();
//! pkt.add_option(known::URI_PATH, b"temp").unwrap();
//!
//! let received = Packet::parse(pkt.as_bytes()).unwrap();
//! assert_eq!(received.code(), Code::GET);
//! assert_eq!(received.token().as_bytes(), &[0x01]);
//! assert_eq!(received.payload(), None);
//! ```
//!
//! ## Performance
//! This crate uses `criterion` to measure parsing and building packets
//! alongside `coap_lite::Packet`, see `benches/packet.rs`.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(not(test), forbid(missing_debug_implementations, unreachable_pub))]
#![cfg_attr(not(test), deny(unsafe_code, missing_copy_implementations))]
#![cfg_attr(any(docsrs, feature = "docs"), feature(doc_cfg))]
#![deny(missing_docs)]

#[cfg(feature = "alloc")]
extern crate alloc as std_alloc;

/// Transport buffers
pub mod buf;

mod cursor;

/// Errors
pub mod error;

/// Message header and option structs
pub mod msg;

/// The packet view
pub mod packet;

#[doc(inline)]
pub use buf::*;
#[doc(inline)]
pub use error::*;
#[doc(inline)]
pub use msg::*;
#[doc(inline)]
pub use packet::*;

#[cfg(test)]
pub(crate) fn test_msg() -> std_alloc::vec::Vec<u8> {
  // CON 2.05, id 1, token 0xFE, Content-Format 3, payload "hello, world!"
  let header: [u8; 4] = 0b0100_0001_0100_0101_0000_0000_0000_0001_u32.to_be_bytes();
  let token: [u8; 1] = [254u8];
  let options: [u8; 2] = [0b_1100_0001u8, 0b00000011u8];
  let payload: [&[u8]; 2] = [&[0b1111_1111_u8], b"hello, world!"];

  [header.as_ref(),
   token.as_ref(),
   options.as_ref(),
   payload.concat().as_ref()].concat()
}

#[cfg(test)]
#[allow(missing_docs)]
pub(crate) mod tests {
  #[macro_export]
  macro_rules! assert_eqb {
    ($actual:expr, $expected:expr) => {
      if $actual != $expected {
        panic!("expected {:08b} to equal {:08b}", $actual, $expected)
      }
    };
  }

  #[macro_export]
  macro_rules! assert_eqb_iter {
    ($actual:expr, $expected:expr) => {
      if $actual.iter().ne($expected.iter()) {
        panic!("expected {:?} to equal {:?}",
               $actual.into_iter()
                      .map(|b| format!("{:08b}", b))
                      .collect::<Vec<_>>(),
               $expected.into_iter()
                        .map(|b| format!("{:08b}", b))
                        .collect::<Vec<_>>())
      }
    };
  }
}
