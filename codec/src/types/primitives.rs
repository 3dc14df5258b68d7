//! Codec implementations for Rust primitive types.
//!
//! Every fixed-width integer and float is written little-endian. That is the layout Ruby's
//! `pack("V")`, `pack("v")` and `pack("d")` produce on the platforms the reference runtime ships
//! on, so payloads encoded here are byte-identical to ones dumped by the runtime itself.
//!
//! `usize` is not supported: its width depends on the target, and every count in
//! the formats handled here is an explicit 32-bit field.

use crate::{util::at_least, Error, FixedSize, Read, Write};
use bytes::{Buf, BufMut};

// Numeric types implementation
macro_rules! impl_numeric {
    ($type:ty, $read_method:ident, $write_method:ident) => {
        impl Write for $type {
            #[inline]
            fn write(&self, buf: &mut impl BufMut) {
                buf.$write_method(*self);
            }
        }

        impl Read for $type {
            type Cfg = ();

            #[inline]
            fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, Error> {
                at_least(buf, std::mem::size_of::<$type>())?;
                Ok(buf.$read_method())
            }
        }

        impl FixedSize for $type {
            const SIZE: usize = std::mem::size_of::<$type>();
        }
    };
}

impl_numeric!(u8, get_u8, put_u8);
impl_numeric!(u16, get_u16_le, put_u16_le);
impl_numeric!(u32, get_u32_le, put_u32_le);
impl_numeric!(u64, get_u64_le, put_u64_le);
impl_numeric!(i8, get_i8, put_i8);
impl_numeric!(i16, get_i16_le, put_i16_le);
impl_numeric!(i32, get_i32_le, put_i32_le);
impl_numeric!(i64, get_i64_le, put_i64_le);
impl_numeric!(f32, get_f32_le, put_f32_le);
impl_numeric!(f64, get_f64_le, put_f64_le);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DecodeExt, Encode, EncodeFixed, EncodeSize};
    use bytes::Bytes;
    use paste::paste;

    macro_rules! impl_num_test {
        ($type:ty, $size:expr) => {
            paste! {
                #[test]
                fn [<test_ $type>]() {
                    let expected_len = std::mem::size_of::<$type>();
                    let values: [$type; 5] =
                        [0 as $type, 1 as $type, 42 as $type, <$type>::MAX, <$type>::MIN];
                    for value in values.iter() {
                        let encoded = value.encode();
                        assert_eq!(encoded.len(), expected_len);
                        assert_eq!(value.encode_size(), expected_len);
                        assert_eq!(&encoded[..], &value.to_le_bytes()[..]);
                        let decoded = <$type>::decode(encoded).unwrap();
                        assert_eq!(*value, decoded);

                        let fixed: [u8; $size] = value.encode_fixed();
                        let decoded = <$type>::decode(Bytes::copy_from_slice(&fixed)).unwrap();
                        assert_eq!(*value, decoded);
                    }
                }
            }
        };
    }
    impl_num_test!(u8, 1);
    impl_num_test!(u16, 2);
    impl_num_test!(u32, 4);
    impl_num_test!(u64, 8);
    impl_num_test!(i8, 1);
    impl_num_test!(i16, 2);
    impl_num_test!(i32, 4);
    impl_num_test!(i64, 8);
    impl_num_test!(f32, 4);
    impl_num_test!(f64, 8);

    #[test]
    fn test_endianness() {
        assert_eq!(0x0102u16.encode(), &[0x02, 0x01][..]);
        assert_eq!(0x01020304u32.encode(), &[0x04, 0x03, 0x02, 0x01][..]);
        assert_eq!((-2i16).encode(), &[0xFE, 0xFF][..]);
        assert_eq!(
            1.0f64.encode(),
            &[0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xF0, 0x3F][..]
        );
        assert_eq!(
            0.5f64.encode(),
            &[0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xE0, 0x3F][..]
        );
    }

    #[test]
    fn test_non_finite_floats() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -0.0f64] {
            let decoded = f64::decode(value.encode()).unwrap();
            assert_eq!(value.to_bits(), decoded.to_bits());
        }

        // A NaN with a custom payload survives untouched
        let payload = f64::from_bits(0x7FF8_0000_DEAD_BEEF);
        let decoded = f64::decode(payload.encode()).unwrap();
        assert_eq!(payload.to_bits(), decoded.to_bits());
    }

    #[test]
    fn test_short_input() {
        assert!(matches!(f64::decode(&[0u8; 7][..]), Err(Error::EndOfBuffer)));
        assert!(matches!(i16::decode(&[0u8; 1][..]), Err(Error::EndOfBuffer)));
    }
}
