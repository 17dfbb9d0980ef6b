#![allow(unreachable_pub)] // testing the macro
#![expect(unused)] // testing the macro

use crate::{BufDecoder, CodecError, Decoder, decode_buf_exact, encode_to_vec, impl_type_flat_struct};

impl_type_flat_struct! {
    #[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
    pub struct Waypoint {
        tag: u32,
        len: u32,
    }
}

#[test]
fn test_macro_gen() {
    let w = Waypoint { tag: 1, len: 0x0203 };

    let f = format!("{w:?}");
    assert_eq!(f, "Waypoint { tag: 1, len: 515 }");

    let w2 = Waypoint { tag: 2, len: 0x0203 };
    assert_ne!(w, w2);

    // Fields come out little-endian, in declaration order.
    let b = encode_to_vec(&w).expect("test: encode_to_vec");
    assert_eq!(&b, &[1, 0, 0, 0, 0x03, 0x02, 0, 0]);
}

#[test]
fn test_decoder_positions() {
    let buf = [0u8, 1, 2, 3, 4, 5];
    let mut dec = BufDecoder::new(buf);

    assert_eq!(dec.position(), 0);
    assert_eq!(dec.remaining(), 6);

    let head = dec.read_arr::<2>().expect("test: read_arr");
    assert_eq!(head, [0, 1]);
    assert_eq!(dec.position(), 2);
    assert_eq!(dec.remaining(), 4);

    let rest = dec.read_rest().expect("test: read_rest");
    assert_eq!(rest, vec![2, 3, 4, 5]);
    assert_eq!(dec.remaining(), 0);
}

#[test]
fn test_overrun_reports_offset() {
    let buf = [0u8; 3];
    let mut dec = BufDecoder::new(buf);
    dec.read_arr::<2>().expect("test: read_arr");

    let err = dec.read_arr::<4>().expect_err("test: expected overrun");
    match err {
        CodecError::OverrunInput {
            at,
            requested,
            remaining,
        } => {
            assert_eq!(at, 2);
            assert_eq!(requested, 4);
            assert_eq!(remaining, 1);
        }
        e => panic!("test: unexpected error {e:?}"),
    }
}

#[test]
fn test_decode_exact_rejects_leftover() {
    let buf = [1u8, 0, 0, 0, 0xff];
    let res = decode_buf_exact::<u32>(&buf);
    assert!(matches!(res, Err(CodecError::ExtraInput(1))));
}
