//! The `Table` userdata record.
//!
//! # Format
//!
//! ```text
//! +------------+--------+--------+--------+-------+-----------------------+
//! | dimensions | xsize  | ysize  | zsize  | count | elements (count x i16)|
//! +------------+--------+--------+--------+-------+-----------------------+
//! |    u32     |  u32   |  u32   |  u32   |  u32  |  2 bytes each         |
//! +------------+--------+--------+--------+-------+-----------------------+
//! ```
//!
//! All fields are little-endian. Elements are stored row-major: `x` varies fastest, then `y`,
//! then `z`. `ysize` and `zsize` are always present (and are `1` for lower-dimensional tables).
//!
//! # Validation
//!
//! A payload is malformed if the header is incomplete or if the bytes after the header do not
//! hold exactly `count` elements. A `count` that disagrees with `xsize * ysize * zsize` is
//! accepted with a warning by default (data written by old editors can carry such headers) and
//! rejected when [Config::strict] is set.

use crate::Error;
use bytes::{Buf, BufMut};
use rgss_codec::{util::at_least, EncodeSize, FixedSize, RangeCfg, Read, ReadExt, Write};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Size of the table header in bytes.
pub const HEADER_SIZE: usize = 5 * u32::SIZE;

/// Largest element count the header can describe.
pub const MAX_ELEMENTS: u128 = u32::MAX as u128;

/// Configuration for decoding a [Table].
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Accepted element counts. Checked before anything is allocated.
    pub elements: RangeCfg<usize>,

    /// Reject tables whose element count disagrees with their extents.
    pub strict: bool,
}

/// A dense array of `i16` with up to three dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Parts", into = "Parts")]
pub struct Table {
    dimensions: u32,
    xsize: u32,
    ysize: u32,
    zsize: u32,
    elements: Vec<i16>,
}

/// Number of cells described by a set of extents.
fn cell_count(xsize: u32, ysize: u32, zsize: u32) -> u128 {
    xsize as u128 * ysize as u128 * zsize as u128
}

impl Table {
    /// Creates a zero-filled one-dimensional table.
    pub fn new(xsize: u32) -> Result<Self, Error> {
        Self::zeroed(1, xsize, 1, 1)
    }

    /// Creates a zero-filled two-dimensional table.
    pub fn new_2d(xsize: u32, ysize: u32) -> Result<Self, Error> {
        Self::zeroed(2, xsize, ysize, 1)
    }

    /// Creates a zero-filled three-dimensional table.
    pub fn new_3d(xsize: u32, ysize: u32, zsize: u32) -> Result<Self, Error> {
        Self::zeroed(3, xsize, ysize, zsize)
    }

    fn zeroed(dimensions: u32, xsize: u32, ysize: u32, zsize: u32) -> Result<Self, Error> {
        let len = Self::checked_len(cell_count(xsize, ysize, zsize))?;
        Ok(Self {
            dimensions,
            xsize,
            ysize,
            zsize,
            elements: vec![0; len],
        })
    }

    /// Creates a table from a header and its elements.
    ///
    /// The extents are not checked against `elements.len()`, so headers from legacy data survive
    /// unchanged. Fails only if the element count cannot be encoded.
    pub fn from_parts(
        dimensions: u32,
        xsize: u32,
        ysize: u32,
        zsize: u32,
        elements: Vec<i16>,
    ) -> Result<Self, Error> {
        Self::checked_len(elements.len() as u128)?;
        Ok(Self {
            dimensions,
            xsize,
            ysize,
            zsize,
            elements,
        })
    }

    fn checked_len(len: u128) -> Result<usize, Error> {
        if len > MAX_ELEMENTS {
            return Err(Error::CapacityExceeded(len));
        }
        usize::try_from(len).map_err(|_| Error::CapacityExceeded(len))
    }

    /// Fails with [Error::CapacityExceeded] if the element count does not fit in the header.
    pub fn check_capacity(&self) -> Result<(), Error> {
        Self::checked_len(self.elements.len() as u128).map(|_| ())
    }

    pub fn dimensions(&self) -> u32 {
        self.dimensions
    }

    pub fn xsize(&self) -> u32 {
        self.xsize
    }

    pub fn ysize(&self) -> u32 {
        self.ysize
    }

    pub fn zsize(&self) -> u32 {
        self.zsize
    }

    /// Number of stored elements (the header's element count).
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[i16] {
        &self.elements
    }

    pub fn elements_mut(&mut self) -> &mut [i16] {
        &mut self.elements
    }

    /// Returns true if the element count matches the extents.
    pub fn is_consistent(&self) -> bool {
        cell_count(self.xsize, self.ysize, self.zsize) == self.elements.len() as u128
    }

    /// Returns the row-major position of a cell, if it is in bounds and stored.
    pub fn index(&self, x: usize, y: usize, z: usize) -> Option<usize> {
        let (x, y, z) = (x as u128, y as u128, z as u128);
        let (xsize, ysize, zsize) = (
            self.xsize as u128,
            self.ysize as u128,
            self.zsize as u128,
        );
        if x >= xsize || y >= ysize || z >= zsize {
            return None;
        }

        // Extents of inconsistent tables may describe more cells than are stored
        let index = x + xsize * (y + ysize * z);
        usize::try_from(index)
            .ok()
            .filter(|&index| index < self.elements.len())
    }

    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<i16> {
        self.index(x, y, z).map(|i| self.elements[i])
    }

    pub fn get_mut(&mut self, x: usize, y: usize, z: usize) -> Option<&mut i16> {
        self.index(x, y, z).map(|i| &mut self.elements[i])
    }

    /// Stores a value, returning the one it replaced (or `None` if out of bounds).
    pub fn set(&mut self, x: usize, y: usize, z: usize, value: i16) -> Option<i16> {
        self.get_mut(x, y, z).map(|cell| std::mem::replace(cell, value))
    }

    /// Changes the extents, keeping every cell that is inside both the old and new bounds.
    ///
    /// New cells are zero. `dimensions` is left untouched.
    pub fn resize(&mut self, xsize: u32, ysize: u32, zsize: u32) -> Result<(), Error> {
        let len = Self::checked_len(cell_count(xsize, ysize, zsize))?;
        let mut elements = vec![0; len];
        for z in 0..zsize.min(self.zsize) as usize {
            for y in 0..ysize.min(self.ysize) as usize {
                for x in 0..xsize.min(self.xsize) as usize {
                    if let Some(value) = self.get(x, y, z) {
                        elements[x + xsize as usize * (y + ysize as usize * z)] = value;
                    }
                }
            }
        }
        self.xsize = xsize;
        self.ysize = ysize;
        self.zsize = zsize;
        self.elements = elements;
        Ok(())
    }
}

impl Write for Table {
    fn write(&self, buf: &mut impl BufMut) {
        let count = u32::try_from(self.elements.len()).expect("element count exceeds u32");
        self.dimensions.write(buf);
        self.xsize.write(buf);
        self.ysize.write(buf);
        self.zsize.write(buf);
        count.write(buf);
        for element in &self.elements {
            element.write(buf);
        }
    }
}

impl EncodeSize for Table {
    fn encode_size(&self) -> usize {
        HEADER_SIZE + self.elements.len() * i16::SIZE
    }
}

impl Read for Table {
    type Cfg = Config;

    fn read_cfg(buf: &mut impl Buf, cfg: &Config) -> Result<Self, rgss_codec::Error> {
        let dimensions = u32::read(buf)?;
        let xsize = u32::read(buf)?;
        let ysize = u32::read(buf)?;
        let zsize = u32::read(buf)?;
        let count = u32::read(buf)?;

        // Bound the allocation by both the configuration and the bytes actually present
        let len = usize::try_from(count).map_err(|_| rgss_codec::Error::InvalidLength(usize::MAX))?;
        if !cfg.elements.contains(&len) {
            return Err(rgss_codec::Error::InvalidLength(len));
        }
        let size = len
            .checked_mul(i16::SIZE)
            .ok_or(rgss_codec::Error::InvalidLength(len))?;
        at_least(buf, size)?;

        let mut elements = Vec::with_capacity(len);
        for _ in 0..len {
            elements.push(i16::read(buf)?);
        }

        if cell_count(xsize, ysize, zsize) != len as u128 {
            if cfg.strict {
                return Err(rgss_codec::Error::Invalid(
                    "Table",
                    "element count does not match extents",
                ));
            }
            warn!(
                dimensions,
                xsize,
                ysize,
                zsize,
                count,
                "table element count does not match extents"
            );
        }

        Ok(Self {
            dimensions,
            xsize,
            ysize,
            zsize,
            elements,
        })
    }
}

/// Serde representation of a [Table].
#[derive(Serialize, Deserialize)]
struct Parts {
    dimensions: u32,
    xsize: u32,
    ysize: u32,
    zsize: u32,
    elements: Vec<i16>,
}

impl TryFrom<Parts> for Table {
    type Error = Error;

    fn try_from(parts: Parts) -> Result<Self, Error> {
        Self::from_parts(
            parts.dimensions,
            parts.xsize,
            parts.ysize,
            parts.zsize,
            parts.elements,
        )
    }
}

impl From<Table> for Parts {
    fn from(table: Table) -> Self {
        Self {
            dimensions: table.dimensions,
            xsize: table.xsize,
            ysize: table.ysize,
            zsize: table.zsize,
            elements: table.elements,
        }
    }
}
