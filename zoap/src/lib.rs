//! `zoap` is the exchange layer of a small CoAP engine:
//! what happens to packets once [`zoap_msg`] can read and write them.
//!
//! - [`pending`]: confirmable requests awaiting an ACK, with escalating retransmission timeouts
//! - [`reply`]: handlers for responses and notifications, correlated by token
//! - [`resource`]: routing inbound requests to handlers by Uri-Path and method
//! - [`session`]: message IDs and tokens for outbound messages
//!
//! Nothing here allocates, blocks or keeps time. Pools of pending requests
//! and replies are slices the caller owns, and retransmission timeouts
//! advance only when the caller's timer says so.
//!
//! ## A round trip
//! ```
//! use zoap::{pending, reply, resource::{self, Resource}, session::Session, SocketAddr};
//! use zoap_msg::{opt::known, Code, Error, NetBuf, Packet, Type, Version};
//! # use no_std_net::{Ipv4Addr, SocketAddrV4};
//! # let addr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 5683));
//!
//! fn temp(_: &Resource<()>, req: &Packet<&[u8]>, _: SocketAddr) -> Result<(), Error> {
//!   assert_eq!(req.code(), Code::GET);
//!   Ok(())
//! }
//!
//! fn got_temp(resp: &Packet<&[u8]>, reply: &mut reply::Reply<u8>, _: SocketAddr) {
//!   reply.user_data = resp.payload().unwrap()[0];
//! }
//!
//! let mut session = Session::default();
//!
//! // client: build and register a CON GET /sensors/temp
//! let mut req = Packet::init(NetBuf::new([0u8; 64])).unwrap();
//! req.set_version(Version(1));
//! req.set_type(Type::Con);
//! req.set_code(Code::GET);
//! req.set_id(session.next_id());
//! req.set_token(session.next_token().as_bytes()).unwrap();
//! req.add_option(known::URI_PATH, b"sensors").unwrap();
//! req.add_option(known::URI_PATH, b"temp").unwrap();
//!
//! let mut pendings: [Option<pending::Pending<_>>; 2] = [None, None];
//! let mut replies: [Option<reply::Reply<u8>>; 2] = [None, None];
//! reply::init(reply::next_unused(&mut replies).unwrap(), &req, got_temp, 0);
//! let p = pending::init(pending::next_unused(&mut pendings).unwrap(), req);
//! assert!(pending::cycle(p));
//!
//! // server: route it
//! let resources = [Resource { get: Some(temp),
//!                             ..Resource::new(&["sensors", "temp"], ()) }];
//! let inbound = Packet::parse(req.as_bytes()).unwrap();
//! resource::handle_request(&inbound, &resources, addr).unwrap();
//!
//! // server: answer with a piggybacked ACK
//! let mut ack = Packet::init_ack(NetBuf::new([0u8; 64]), &inbound, Code::CONTENT).unwrap();
//! ack.append_payload(&[21]).unwrap();
//!
//! // client: the ACK stops retransmission and reaches the reply handler
//! let ack = Packet::parse(ack.as_bytes()).unwrap();
//! assert!(pending::received(&ack, &mut pendings).is_some());
//! let r = reply::response_received(&ack, addr, &mut replies).unwrap();
//! assert_eq!(r.user_data, 21);
//! ```

#![cfg_attr(any(docsrs, feature = "docs"), feature(doc_cfg))]
// -
// style
#![allow(clippy::unused_unit)]
// -
// deny
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![deny(missing_copy_implementations)]
#![cfg_attr(not(test), deny(unsafe_code))]
// -
// warnings
#![cfg_attr(not(test), warn(unreachable_pub))]
// -
// features
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(test)]
pub(crate) mod test;

pub(crate) mod logging;

/// Configuring runtime behavior
pub mod config;

/// Confirmable requests awaiting acknowledgement
pub mod pending;

/// Token-correlated response handlers
pub mod reply;

/// Requests
pub mod req;

/// Server-side resources and request routing
pub mod resource;

/// Message ID and token provisioning
pub mod session;

#[doc(inline)]
pub use no_std_net::SocketAddr;
#[doc(inline)]
pub use zoap_msg as msg;
