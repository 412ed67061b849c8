use zoap_msg::*;

#[derive(Debug, PartialEq, PartialOrd, Ord, Eq)]
pub struct TestInput {
  pub tkl: u8,
  pub n_opts: usize,
  pub opt_size: usize,
  pub payload_size: usize,
}

impl TestInput {
  pub fn build_into<B: BufferMut>(&self, buf: B) -> Packet<B> {
    let mut pkt = Packet::init(buf).unwrap();
    pkt.set_version(Version(1));
    pkt.set_type(Type::Non);
    pkt.set_code(Code::CONTENT);
    pkt.set_id(Id(1));
    pkt.set_token(&[1u8; 8][..self.tkl as usize]).unwrap();

    let value = vec![1u8; self.opt_size];
    for n in 0..self.n_opts {
      pkt.add_option(OptNumber(n as u32), &value).unwrap();
    }

    pkt.append_payload(&vec![1u8; self.payload_size]).unwrap();
    pkt
  }

  pub fn get_bytes(&self) -> Vec<u8> {
    self.build_into(NetBuf::new(vec![0u8; self.capacity()]))
        .as_bytes()
        .to_vec()
  }

  pub fn capacity(&self) -> usize {
    // header, token, worst-case option headers, values, marker, payload
    4 + 8 + self.n_opts * (5 + self.opt_size) + 1 + self.payload_size
  }

  pub fn get_coap_lite_packet(&self) -> coap_lite::Packet {
    coap_lite::Packet::from_bytes(&self.get_bytes()).unwrap()
  }
}

pub fn inputs() -> Vec<TestInput> {
  vec![TestInput { tkl: 0,
                   n_opts: 0,
                   opt_size: 0,
                   payload_size: 0 },
       TestInput { tkl: 4,
                   n_opts: 4,
                   opt_size: 8,
                   payload_size: 16 },
       TestInput { tkl: 8,
                   n_opts: 8,
                   opt_size: 64,
                   payload_size: 128 },
       TestInput { tkl: 8,
                   n_opts: 16,
                   opt_size: 64,
                   payload_size: 512 },
       TestInput { tkl: 8,
                   n_opts: 32,
                   opt_size: 512,
                   payload_size: 4096 },]
}
