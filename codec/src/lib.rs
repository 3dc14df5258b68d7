//! Serialize RGSS Marshal payloads.
//!
//! # Overview
//!
//! A small binary serialization library for the payloads that Ruby's `Marshal` embeds as
//! userdata (the bytes produced by a class's `_dump` and consumed by its `_load`). It is designed
//! to:
//! - Serialize structured data into the exact byte layout the reference runtime produces
//! - Deserialize untrusted binary input without over-allocating or panicking
//!
//! # Supported Types
//!
//! Natively supports:
//! - Primitives: `u8`, `u16`, `u32`, `u64`, `i8`, `i16`, `i32`, `i64`, `f32`, `f64`
//! - Marshal fixnums (see [fixnum]) for length prefixes
//!
//! All fixed-width values are little-endian.
//!
//! User-defined types implement [Write], [EncodeSize] (or [FixedSize]) and [Read].
//!
//! # Example
//!
//! ```
//! use bytes::{Buf, BufMut};
//! use rgss_codec::{DecodeExt, Encode, Error, FixedSize, Read, ReadExt, Write};
//!
//! #[derive(Debug, PartialEq)]
//! struct Rect {
//!     x: i32,
//!     y: i32,
//!     width: i32,
//!     height: i32,
//! }
//!
//! impl Write for Rect {
//!     fn write(&self, buf: &mut impl BufMut) {
//!         self.x.write(buf);
//!         self.y.write(buf);
//!         self.width.write(buf);
//!         self.height.write(buf);
//!     }
//! }
//!
//! impl Read for Rect {
//!     type Cfg = ();
//!
//!     fn read_cfg(buf: &mut impl Buf, _: &()) -> Result<Self, Error> {
//!         Ok(Self {
//!             x: i32::read(buf)?,
//!             y: i32::read(buf)?,
//!             width: i32::read(buf)?,
//!             height: i32::read(buf)?,
//!         })
//!     }
//! }
//!
//! impl FixedSize for Rect {
//!     const SIZE: usize = 4 * i32::SIZE;
//! }
//!
//! let rect = Rect { x: 1, y: 2, width: 640, height: 480 };
//! let encoded = rect.encode();
//! assert_eq!(encoded.len(), 16);
//! assert_eq!(Rect::decode(encoded).unwrap(), rect);
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod fixnum;
pub mod types;
pub mod util;

pub use codec::{Decode, DecodeExt, Encode, EncodeFixed, EncodeSize, FixedSize, Read, ReadExt, Write};
pub use config::RangeCfg;
pub use error::Error;
