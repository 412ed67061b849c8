#![allow(dead_code)]

use no_std_net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use zoap_msg::{opt::known, Code, Id, NetBuf, Packet, Type, Version};

/// Packet over owned storage, the shape a test keeps in a pool
pub type TestPacket = Packet<NetBuf<[u8; 64]>>;

pub fn init_logger() {
  simple_logger::SimpleLogger::new().with_level(log::LevelFilter::Trace)
                                    .init()
                                    .ok();
}

pub fn addr() -> SocketAddr {
  SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::new(192, 168, 0, 1), 5683))
}

pub fn request(ty: Type, code: Code, id: Id, token: &[u8], path: &[&str]) -> TestPacket {
  let mut pkt = Packet::init(NetBuf::new([0u8; 64])).unwrap();
  pkt.set_version(Version(1));
  pkt.set_type(ty);
  pkt.set_code(code);
  pkt.set_id(id);
  pkt.set_token(token).unwrap();

  for segment in path {
    pkt.add_option(known::URI_PATH, segment.as_bytes()).unwrap();
  }

  pkt
}

pub fn response(ty: Type, code: Code, id: Id, token: &[u8]) -> TestPacket {
  request(ty, code, id, token, &[])
}
