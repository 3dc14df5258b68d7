//! The outer framing of a single userdata entry.
//!
//! # Format
//!
//! ```text
//! +-----+-----+----------------+------------+----------------+-------------+
//! | 'u' | ':' | fixnum(len(N)) | N (UTF-8)  | fixnum(len(D)) | D (payload) |
//! +-----+-----+----------------+------------+----------------+-------------+
//! ```
//!
//! The class name is written as a fresh symbol. A stream that has already seen the name refers
//! back to it with a symbol link (`;`) instead, which can only be resolved with the symbol table
//! of the whole stream. Envelopes containing links are rejected here and must be handled by the
//! reader that owns that table.

use crate::{table, Error, Userdata};
use bytes::{Buf, BufMut, Bytes};
use rgss_codec::{
    fixnum::Fixnum,
    util::{at_least, expect_tag},
    Decode, EncodeSize, RangeCfg, Read, ReadExt, Write,
};

/// Marks a userdata entry.
pub const TAG_USERDATA: u8 = b'u';

/// Marks a symbol written in full.
pub const TAG_SYMBOL: u8 = b':';

/// Marks a reference to a previously written symbol.
pub const TAG_SYMLINK: u8 = b';';

/// Largest length a fixnum prefix can carry.
const MAX_LEN: usize = i32::MAX as usize;

/// Configuration for decoding an [Envelope].
#[derive(Clone, Debug)]
pub struct Config {
    /// Accepted class name lengths.
    pub class: RangeCfg<usize>,

    /// Accepted payload lengths.
    pub data: RangeCfg<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            class: (1..=256).into(),
            data: RangeCfg::default(),
        }
    }
}

/// A class name and the raw payload written under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    class: String,
    data: Bytes,
}

impl Envelope {
    /// Creates an envelope, failing if either part is too long for a fixnum prefix.
    pub fn new(class: impl Into<String>, data: impl Into<Bytes>) -> Result<Self, Error> {
        let class = class.into();
        let data = data.into();
        for len in [class.len(), data.len()] {
            if len > MAX_LEN {
                return Err(Error::CapacityExceeded(len as u128));
            }
        }
        Ok(Self { class, data })
    }

    /// Decodes an envelope that must span the whole buffer.
    pub fn parse(buf: impl Buf, cfg: &Config) -> Result<Self, Error> {
        Self::decode_cfg(buf, cfg).map_err(Error::Envelope)
    }

    /// Encodes a value and wraps it with its class name.
    pub fn pack(value: &Userdata) -> Result<Self, Error> {
        Self::new(value.class().as_str(), value.encode()?)
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Decodes the payload with the codec selected by the class name.
    pub fn unpack(&self, cfg: &table::Config) -> Result<Userdata, Error> {
        Userdata::decode_named(&self.class, self.data.clone(), cfg)
    }
}

/// Length prefix of a part. Lengths are bounded by [Envelope::new].
fn prefix(len: usize) -> Fixnum {
    Fixnum(i32::try_from(len).expect("length exceeds fixnum range"))
}

fn read_len(buf: &mut impl Buf, range: &RangeCfg<usize>) -> Result<usize, rgss_codec::Error> {
    let len = Fixnum::read(buf)?;
    let len = usize::try_from(i32::from(len))
        .map_err(|_| rgss_codec::Error::Invalid("Envelope", "negative length"))?;
    if !range.contains(&len) {
        return Err(rgss_codec::Error::InvalidLength(len));
    }
    at_least(buf, len)?;
    Ok(len)
}

impl Write for Envelope {
    fn write(&self, buf: &mut impl BufMut) {
        buf.put_u8(TAG_USERDATA);
        buf.put_u8(TAG_SYMBOL);
        prefix(self.class.len()).write(buf);
        buf.put_slice(self.class.as_bytes());
        prefix(self.data.len()).write(buf);
        buf.put_slice(&self.data);
    }
}

impl EncodeSize for Envelope {
    fn encode_size(&self) -> usize {
        2 + prefix(self.class.len()).encode_size()
            + self.class.len()
            + prefix(self.data.len()).encode_size()
            + self.data.len()
    }
}

impl Read for Envelope {
    type Cfg = Config;

    fn read_cfg(buf: &mut impl Buf, cfg: &Config) -> Result<Self, rgss_codec::Error> {
        expect_tag(buf, TAG_USERDATA, "Envelope")?;
        at_least(buf, 1)?;
        match buf.get_u8() {
            TAG_SYMBOL => {}
            TAG_SYMLINK => {
                return Err(rgss_codec::Error::Invalid(
                    "Envelope",
                    "symbol links are not supported",
                ))
            }
            _ => return Err(rgss_codec::Error::Invalid("Envelope", "unexpected tag")),
        }

        let len = read_len(buf, &cfg.class)?;
        let name = buf.copy_to_bytes(len);
        let class = String::from_utf8(name.to_vec())
            .map_err(|_| rgss_codec::Error::Invalid("Envelope", "class name is not UTF-8"))?;

        let len = read_len(buf, &cfg.data)?;
        let data = buf.copy_to_bytes(len);
        Ok(Self { class, data })
    }
}
