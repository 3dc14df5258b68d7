//! Marshal fixnum encoding and decoding
//!
//! Ruby's `Marshal` writes every length and small integer in a compact signed form:
//!
//! - `0` is a single `0x00` byte (and nothing else)
//! - `1..=122` is a single byte holding `value + 5`
//! - `-123..=-1` is a single byte holding `value - 5`
//! - anything else is a signed byte `n` (`1..=4` or `-4..=-1`) followed by `|n|` little-endian
//!   bytes of the value; negative counts sign-extend the value
//!
//! Only 32-bit values are representable.

use crate::{util::at_least, EncodeSize, Error, Read, Write};
use bytes::{Buf, BufMut};

/// Largest value that fits in the single-byte positive form.
const SHORT_MAX: i32 = 122;

/// Smallest value that fits in the single-byte negative form.
const SHORT_MIN: i32 = -123;

/// Offset applied to single-byte values so they do not collide with byte counts.
const SHORT_OFFSET: i32 = 5;

/// Maximum number of value bytes following the count byte.
const MAX_BYTES: usize = 4;

/// Encodes a signed 32-bit integer as a Marshal fixnum.
pub fn write(value: i32, buf: &mut impl BufMut) {
    if value == 0 {
        buf.put_u8(0);
        return;
    }
    if (1..=SHORT_MAX).contains(&value) {
        buf.put_u8((value + SHORT_OFFSET) as u8);
        return;
    }
    if (SHORT_MIN..0).contains(&value) {
        buf.put_i8((value - SHORT_OFFSET) as i8);
        return;
    }

    let len = size(value) - 1;
    let bytes = value.to_le_bytes();
    if value > 0 {
        buf.put_i8(len as i8);
    } else {
        buf.put_i8(-(len as i8));
    }
    buf.put_slice(&bytes[..len]);
}

/// Decodes a Marshal fixnum into a signed 32-bit integer.
pub fn read(buf: &mut impl Buf) -> Result<i32, Error> {
    at_least(buf, 1)?;
    let count = buf.get_i8() as i32;
    match count {
        0 => Ok(0),
        // Zero has a single encoding, so the short forms exclude it
        c if c == SHORT_OFFSET || c == -SHORT_OFFSET => Err(Error::InvalidFixnum),
        c if c > MAX_BYTES as i32 => Ok(c - SHORT_OFFSET),
        c if c < -(MAX_BYTES as i32) => Ok(c + SHORT_OFFSET),
        c => {
            let len = c.unsigned_abs() as usize;
            at_least(buf, len)?;

            // Negative counts start from all ones so the missing high bytes sign-extend
            let mut bytes = if c > 0 { [0u8; 4] } else { [0xFFu8; 4] };
            buf.copy_to_slice(&mut bytes[..len]);
            let value = i32::from_le_bytes(bytes);

            // Reject encodings that do not round-trip: the sign must match the count and the
            // value must not fit in fewer bytes
            if (c > 0) != (value > 0) || size(value) != len + 1 {
                return Err(Error::InvalidFixnum);
            }
            Ok(value)
        }
    }
}

/// Calculates the number of bytes needed to encode a value as a Marshal fixnum.
pub fn size(value: i32) -> usize {
    if value == 0 || (1..=SHORT_MAX).contains(&value) || (SHORT_MIN..0).contains(&value) {
        return 1;
    }
    let mut len = 1;
    let mut rest = value >> 8;
    let sign = if value < 0 { -1 } else { 0 };
    while rest != sign && len < MAX_BYTES {
        rest >>= 8;
        len += 1;
    }
    1 + len
}

/// An ergonomic wrapper to encode and decode an `i32` as a Marshal fixnum rather than as a
/// fixed-width little-endian integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixnum(pub i32);

impl Write for Fixnum {
    #[inline]
    fn write(&self, buf: &mut impl BufMut) {
        write(self.0, buf);
    }
}

impl Read for Fixnum {
    type Cfg = ();

    #[inline]
    fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, Error> {
        read(buf).map(Fixnum)
    }
}

impl EncodeSize for Fixnum {
    #[inline]
    fn encode_size(&self) -> usize {
        size(self.0)
    }
}

impl From<Fixnum> for i32 {
    fn from(value: Fixnum) -> Self {
        value.0
    }
}
