//! Helpers shared by codec implementations.

use crate::Error;
use bytes::Buf;

/// Checks that at least `len` bytes remain in the buffer.
///
/// Call this before allocating for or reading a value of known length.
#[inline]
pub fn at_least<B: Buf>(buf: &mut B, len: usize) -> Result<(), Error> {
    if buf.remaining() < len {
        return Err(Error::EndOfBuffer);
    }
    Ok(())
}

/// Reads exactly one byte and checks that it matches `expected`.
#[inline]
pub fn expect_tag<B: Buf>(buf: &mut B, expected: u8, context: &'static str) -> Result<(), Error> {
    at_least(buf, 1)?;
    if buf.get_u8() != expected {
        return Err(Error::Invalid(context, "unexpected tag"));
    }
    Ok(())
}
