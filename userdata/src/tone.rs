//! The `Tone` userdata record.
//!
//! Shares its byte layout with [crate::Color] but is a distinct class: a payload is decoded as
//! a `Tone` only when the stream names it `Tone`.

use bytes::{Buf, BufMut};
use rgss_codec::{Error, FixedSize, Read, ReadExt, Write};
use serde::{Deserialize, Serialize};

/// A color tone adjustment as persisted by `Tone#_dump`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub gray: f64,
}

impl Tone {
    pub const fn new(red: f64, green: f64, blue: f64, gray: f64) -> Self {
        Self {
            red,
            green,
            blue,
            gray,
        }
    }

    /// Returns the raw bit patterns of the components, in encoding order.
    pub fn to_bits(&self) -> [u64; 4] {
        [
            self.red.to_bits(),
            self.green.to_bits(),
            self.blue.to_bits(),
            self.gray.to_bits(),
        ]
    }
}

impl From<[f64; 4]> for Tone {
    fn from([red, green, blue, gray]: [f64; 4]) -> Self {
        Self::new(red, green, blue, gray)
    }
}

impl From<Tone> for [f64; 4] {
    fn from(tone: Tone) -> Self {
        [tone.red, tone.green, tone.blue, tone.gray]
    }
}

impl Write for Tone {
    fn write(&self, buf: &mut impl BufMut) {
        self.red.write(buf);
        self.green.write(buf);
        self.blue.write(buf);
        self.gray.write(buf);
    }
}

impl Read for Tone {
    type Cfg = ();

    fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, Error> {
        let red = f64::read(buf)?;
        let green = f64::read(buf)?;
        let blue = f64::read(buf)?;
        let gray = f64::read(buf)?;
        Ok(Self::new(red, green, blue, gray))
    }
}

impl FixedSize for Tone {
    const SIZE: usize = 4 * f64::SIZE;
}
