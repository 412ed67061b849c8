use zoap_msg::{option_value_to_int, Error, NetBuf, Opt, OptNumber, Packet, Version, MAX_EXTENDED};

fn built(opts: &[(u32, &[u8])]) -> Vec<u8> {
  let mut pkt = Packet::init(NetBuf::new(vec![0u8; 4096])).unwrap();
  pkt.set_version(Version(1));
  for (number, value) in opts {
    pkt.add_option(OptNumber(*number), value).unwrap();
  }
  pkt.as_bytes().to_vec()
}

#[test]
fn numbers_survive_every_extension_threshold() {
  for number in [0, 1, 12, 13, 14, 268, 269, 270, 1000, 65535, MAX_EXTENDED - 1] {
    let bytes = built(&[(number, &b"v"[..])]);
    let pkt = Packet::parse(bytes.as_slice()).unwrap();
    let opts = pkt.options().collect::<Result<Vec<_>, _>>().unwrap();

    assert_eq!(opts,
               vec![Opt { number: OptNumber(number),
                          value: b"v" }],
               "option {}",
               number);
  }
}

#[test]
fn lengths_survive_every_extension_threshold() {
  for len in [0usize, 12, 13, 268, 269, 270, 3000] {
    let value = vec![0x5Au8; len];
    let bytes = built(&[(11, &value[..])]);
    let pkt = Packet::parse(bytes.as_slice()).unwrap();

    let mut out = [Opt::default(); 1];
    assert_eq!(pkt.find_options(OptNumber(11), &mut out), Ok(1));
    assert_eq!(out[0].value.len(), len);
  }
}

#[test]
fn increasing_numbers_always_fit() {
  let numbers = [1u32, 3, 3, 11, 11, 11, 12, 14, 60, 300, 2048];
  let opts = numbers.iter().map(|n| (*n, &b"x"[..])).collect::<Vec<_>>();
  let bytes = built(&opts);

  let pkt = Packet::parse(bytes.as_slice()).unwrap();
  let parsed = pkt.options()
                  .map(|o| o.unwrap().number.0)
                  .collect::<Vec<_>>();
  assert_eq!(parsed, numbers.to_vec());
}

#[test]
fn lower_number_after_higher_is_rejected() {
  let mut pkt = Packet::init(NetBuf::new([0u8; 64])).unwrap();
  pkt.add_option(OptNumber(300), b"").unwrap();
  assert_eq!(pkt.add_option(OptNumber(299), b""),
             Err(Error::OptionOutOfOrder { previous: 300,
                                           number: 299 }));
}

#[test]
fn integer_values() {
  let mut pkt = Packet::init(NetBuf::new([0u8; 64])).unwrap();
  pkt.set_version(Version(1));
  pkt.add_option_int(OptNumber(12), 0).unwrap();
  pkt.add_option_int(OptNumber(14), 60).unwrap();
  pkt.add_option_int(OptNumber(60), 0x0001_0000).unwrap();

  let values = pkt.options()
                  .map(|o| o.unwrap().value)
                  .collect::<Vec<_>>();
  assert_eq!(values, vec![&[][..], &[60][..], &[1, 0, 0][..]]);

  let ints = values.into_iter().map(option_value_to_int).collect::<Vec<_>>();
  assert_eq!(ints, vec![0, 60, 0x0001_0000]);
}

#[test]
fn truncated_option_value_fails_parse() {
  // Uri-Path "a", then a Uri-Path declaring 3 bytes with only 1 present
  let bytes = [0x40u8, 0x01, 0x00, 0x00, 0xB1, b'a', 0x03, b'b'];
  assert_eq!(Packet::parse(&bytes[..]).unwrap_err(), Error::UnexpectedEndOfStream);
}
