//! The `Color` userdata record.

use bytes::{Buf, BufMut};
use rgss_codec::{Error, FixedSize, Read, ReadExt, Write};
use serde::{Deserialize, Serialize};

/// An RGBA color as persisted by `Color#_dump`.
///
/// Components are stored as-is. Values outside `0.0..=255.0` (and even NaN) are preserved so
/// that a decode followed by an encode reproduces the original bytes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Returns the raw bit patterns of the components, in encoding order.
    ///
    /// Useful for comparing colors that may hold NaN.
    pub fn to_bits(&self) -> [u64; 4] {
        [
            self.red.to_bits(),
            self.green.to_bits(),
            self.blue.to_bits(),
            self.alpha.to_bits(),
        ]
    }
}

/// Opaque white, matching `Color.new(255, 255, 255, 255)`.
impl Default for Color {
    fn default() -> Self {
        Self::new(255.0, 255.0, 255.0, 255.0)
    }
}

impl From<[f64; 4]> for Color {
    fn from([red, green, blue, alpha]: [f64; 4]) -> Self {
        Self::new(red, green, blue, alpha)
    }
}

impl From<Color> for [f64; 4] {
    fn from(color: Color) -> Self {
        [color.red, color.green, color.blue, color.alpha]
    }
}

impl Write for Color {
    fn write(&self, buf: &mut impl BufMut) {
        self.red.write(buf);
        self.green.write(buf);
        self.blue.write(buf);
        self.alpha.write(buf);
    }
}

impl Read for Color {
    type Cfg = ();

    fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, Error> {
        Ok(Self {
            red: f64::read(buf)?,
            green: f64::read(buf)?,
            blue: f64::read(buf)?,
            alpha: f64::read(buf)?,
        })
    }
}

impl FixedSize for Color {
    const SIZE: usize = 4 * f64::SIZE;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use rgss_codec::{DecodeExt, Encode, EncodeFixed};

    #[test]
    fn test_encode_layout() {
        let color = Color::new(1.0, 0.5, 0.0, 1.0);
        let encoded: [u8; 32] = color.encode_fixed();

        let mut expected = Vec::new();
        for component in [1.0f64, 0.5, 0.0, 1.0] {
            expected.extend_from_slice(&component.to_le_bytes());
        }
        assert_eq!(&encoded[..], &expected[..]);

        let decoded = Color::decode(&encoded[..]).unwrap();
        assert_eq!(decoded, color);
    }

    #[test]
    fn test_non_finite_round_trip() {
        let color = Color::new(f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -0.0);
        let decoded = Color::decode(color.encode()).unwrap();
        assert_eq!(decoded.to_bits(), color.to_bits());
    }

    #[test]
    fn test_out_of_gamut_preserved() {
        let color = Color::new(-12.5, 300.0, 1e300, f64::MIN_POSITIVE);
        let decoded = Color::decode(color.encode()).unwrap();
        assert_eq!(decoded.to_bits(), color.to_bits());
    }

    #[test]
    fn test_random_round_trip() {
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..1000 {
            // Raw bit patterns cover NaN payloads and subnormals too
            let bits: [u64; 4] = rng.gen();
            let color = Color::from(bits.map(f64::from_bits));
            let encoded = color.encode();
            assert_eq!(encoded.len(), Color::SIZE);
            assert_eq!(Color::decode(encoded).unwrap().to_bits(), bits);
        }
    }

    #[test]
    fn test_wrong_length() {
        let encoded = Color::default().encode();
        assert!(matches!(
            Color::decode(&encoded[..31]),
            Err(Error::EndOfBuffer)
        ));

        let mut long = encoded.to_vec();
        long.push(0);
        assert!(matches!(
            Color::decode(&long[..]),
            Err(Error::ExtraData(1))
        ));
        assert!(matches!(
            Color::decode(&[0u8; 0][..]),
            Err(Error::EndOfBuffer)
        ));
    }

    #[test]
    fn test_default_is_opaque_white() {
        let color = Color::default();
        assert_eq!(<[f64; 4]>::from(color), [255.0; 4]);
    }
}
