use core::cell::Cell;

use no_std_net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use zoap::pending::{self, Pending};
use zoap::reply::{self, Reply};
use zoap::resource::{self, Resource};
use zoap::session::Session;
use zoap_msg::{opt::known, Code, Error, NetBuf, Packet, Type, Version};

type Buf = NetBuf<[u8; 128]>;

fn client() -> SocketAddr {
  SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::new(10, 0, 0, 2), 40000))
}

fn server() -> SocketAddr {
  SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::new(10, 0, 0, 1), 5683))
}

fn get(session: &mut Session, ty: Type, path: &[&str]) -> Packet<Buf> {
  let mut pkt = Packet::init(NetBuf::new([0u8; 128])).unwrap();
  pkt.set_version(Version(1));
  pkt.set_type(ty);
  pkt.set_code(Code::GET);
  pkt.set_id(session.next_id());
  pkt.set_token(session.next_token().as_bytes()).unwrap();
  for segment in path {
    pkt.add_option(known::URI_PATH, segment.as_bytes()).unwrap();
  }
  pkt
}

fn serve_temp(res: &Resource<Cell<u32>>, req: &Packet<&[u8]>, from: SocketAddr) -> Result<(), Error> {
  assert_eq!(from, client());
  assert_eq!(req.code(), Code::GET);
  res.user_data.set(res.user_data.get() + 1);
  Ok(())
}

fn collect(resp: &Packet<&[u8]>, reply: &mut Reply<[u8; 4]>, from: SocketAddr) {
  assert_eq!(from, server());
  let n = resp.payload().map(|p| p.len()).unwrap_or(0).min(4);
  reply.user_data[..n].copy_from_slice(&resp.payload().unwrap_or(&[])[..n]);
}

#[test]
fn con_request_is_retried_then_acked() {
  let mut session = Session::default();
  let resources = [Resource { get: Some(serve_temp),
                              ..Resource::new(&["sensors", "temp"], Cell::new(0)) }];

  let req = get(&mut session, Type::Con, &["sensors", "temp"]);

  let mut pendings: [Option<Pending<Buf>>; 4] = Default::default();
  let mut replies: [Option<Reply<[u8; 4]>>; 4] = Default::default();

  reply::init(reply::next_unused(&mut replies).unwrap(), &req, collect, [0; 4]);
  let p = pending::init(pending::next_unused(&mut pendings).unwrap(), req);

  // first transmission is lost, timer fires twice
  assert!(pending::cycle(p));
  assert!(pending::cycle(p));
  assert_eq!(pending::next_to_expire(&mut pendings).unwrap().timeout().0, 4690);

  // retransmission arrives
  let inbound = Packet::parse(req.as_bytes()).unwrap();
  resource::handle_request(&inbound, &resources, client()).unwrap();
  assert_eq!(resources[0].user_data.get(), 1);

  let mut ack = Packet::init_ack(NetBuf::new([0u8; 128]), &inbound, Code::CONTENT).unwrap();
  ack.add_option_int(known::CONTENT_FORMAT, 0).unwrap();
  ack.append_payload(b"21.5").unwrap();

  let ack = Packet::parse(ack.as_bytes()).unwrap();
  let acked = pending::received(&ack, &mut pendings).unwrap();
  assert_eq!(acked.request().id(), req.id());
  assert!(pendings.iter().all(Option::is_none));

  let r = reply::response_received(&ack, server(), &mut replies).unwrap();
  assert_eq!(&r.user_data, b"21.5");
}

#[test]
fn separate_response_after_empty_ack() {
  let mut session = Session::default();
  let req = get(&mut session, Type::Con, &["slow"]);

  let mut pendings: [Option<Pending<Buf>>; 1] = [None];
  let mut replies: [Option<Reply<[u8; 4]>>; 1] = [None];
  reply::init(&mut replies[0], &req, collect, [0; 4]);
  pending::init(&mut pendings[0], req);

  let empty_ack = Packet::init_ack(NetBuf::new([0u8; 8]), &req, Code::EMPTY).unwrap();
  assert_eq!(empty_ack.tkl(), 0);

  // an empty ACK ends retransmission but carries nothing for the reply
  assert!(pending::received(&empty_ack, &mut pendings).is_some());
  assert!(reply::response_received(&empty_ack, server(), &mut replies).is_none());

  let mut separate = Packet::init(NetBuf::new([0u8; 64])).unwrap();
  separate.set_version(Version(1));
  separate.set_type(Type::Con);
  separate.set_code(Code::CONTENT);
  separate.set_id(zoap_msg::Id(0x7777));
  separate.set_token(req.token().as_bytes()).unwrap();
  separate.append_payload(b"done").unwrap();

  let r = reply::response_received(&separate, server(), &mut replies).unwrap();
  assert_eq!(&r.user_data, b"done");
}

#[test]
fn notifications_share_one_reply() {
  let mut session = Session::default();
  let mut req = get(&mut session, Type::Non, &[]);
  req.add_option_int(known::OBSERVE, 0).unwrap();
  req.add_option(known::URI_PATH, b"temp").unwrap();

  let mut replies: [Option<Reply<[u8; 4]>>; 2] = [None, None];
  reply::init(&mut replies[1], &req, collect, [0; 4]);

  for (seq, body) in [(1u32, b"aaaa"), (2, b"bbbb"), (3, b"cccc")] {
    let mut n = Packet::init(NetBuf::new([0u8; 64])).unwrap();
    n.set_version(Version(1));
    n.set_type(Type::Non);
    n.set_code(Code::CONTENT);
    n.set_id(zoap_msg::Id(100 + seq as u16));
    n.set_token(req.token().as_bytes()).unwrap();
    n.add_option_int(known::OBSERVE, seq).unwrap();
    n.append_payload(body).unwrap();

    let r = reply::response_received(&n, server(), &mut replies).unwrap();
    assert_eq!(&r.user_data, body);
  }

  reply::clear(&mut replies[1]);
  assert!(replies.iter().all(Option::is_none));
}

#[test]
fn unknown_path_is_no_route() {
  let mut session = Session::default();
  let resources = [Resource { get: Some(serve_temp),
                              ..Resource::new(&["sensors", "temp"], Cell::new(0)) }];

  let req = get(&mut session, Type::Con, &["sensors", "humidity"]);
  assert_eq!(resource::handle_request(&req, &resources, client()),
             Err(Error::NoRoute));
  assert_eq!(Error::NoRoute.errno(), -2);
  assert_eq!(resources[0].user_data.get(), 0);
}

#[test]
fn pool_exhaustion_is_backpressure() {
  let mut session = Session::default();
  let mut pendings: [Option<Pending<Buf>>; 2] = Default::default();

  for _ in 0..2 {
    let req = get(&mut session, Type::Con, &["x"]);
    let slot = pending::next_unused(&mut pendings).unwrap();
    *slot = Some(session.pending(req));
  }

  assert!(pending::next_unused(&mut pendings).is_none());
}
