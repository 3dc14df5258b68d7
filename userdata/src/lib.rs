//! Decode and encode the userdata payloads of RGSS Marshal data.
//!
//! # Overview
//!
//! RPG Maker XP persists its game data with Ruby's `Marshal`. Most of that data is plain objects,
//! but three classes dump themselves as opaque byte strings ("userdata"): [Color], [Tone] and
//! [Table]. This crate implements those byte layouts and the glue a generic Marshal reader needs
//! to use them:
//!
//! - [Class] maps a stream class name to one of the three codecs (and nothing else).
//! - [Userdata] holds a decoded value of any of the three classes.
//! - [registry::Registry] tells a reader which names are userdata classes and which are plain
//!   containers ([registry::Object]) it should fill attribute by attribute.
//! - [envelope::Envelope] frames one payload with its class name the way `Marshal` does.
//!
//! Every codec is a pure function over an in-memory buffer. A failed decode returns an error for
//! that payload only and never yields a partially populated value.
//!
//! # Example
//!
//! ```
//! use rgss_userdata::{table, Class, Color, Table, Userdata};
//!
//! // Encode a map layer and a color
//! let mut layer = Table::new_3d(20, 15, 3).unwrap();
//! layer.set(4, 2, 0, 384);
//! let payload = Userdata::from(layer.clone()).encode().unwrap();
//! assert_eq!(payload.len(), 20 + 2 * 20 * 15 * 3);
//!
//! // Decode it back by class name
//! let decoded = Userdata::decode_named("Table", payload, &table::Config::default()).unwrap();
//! assert_eq!(decoded, Userdata::Table(layer));
//!
//! // Truncated payloads are rejected
//! let color = Userdata::from(Color::new(1.0, 0.5, 0.0, 1.0)).encode().unwrap();
//! assert!(Userdata::decode(Class::Color, &color[..31], &table::Config::default()).is_err());
//! ```

use bytes::{Buf, Bytes};
use rgss_codec::{Decode, DecodeExt, Encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

mod class;
pub use class::Class;
mod color;
pub use color::Color;
pub mod envelope;
pub mod registry;
pub mod table;
pub use table::Table;
mod tone;
pub use tone::Tone;

/// Errors that can occur when decoding or encoding userdata.
#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed {class} record: {source}")]
    MalformedRecord {
        class: &'static str,
        #[source]
        source: rgss_codec::Error,
    },
    #[error("capacity exceeded: {0}")]
    CapacityExceeded(u128),
    #[error("unknown class: {0}")]
    UnknownClass(String),
    #[error("not a userdata class: {0}")]
    NotUserdata(String),
    #[error("not an object class: {0}")]
    NotObject(String),
    #[error("invalid envelope: {0}")]
    Envelope(#[source] rgss_codec::Error),
}

/// A decoded userdata value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class", content = "value")]
pub enum Userdata {
    Color(Color),
    Tone(Tone),
    Table(Table),
}

impl Userdata {
    /// Returns the class this value is written under.
    pub fn class(&self) -> Class {
        match self {
            Self::Color(_) => Class::Color,
            Self::Tone(_) => Class::Tone,
            Self::Table(_) => Class::Table,
        }
    }

    /// Decodes a raw payload (without any outer framing) of the given class.
    ///
    /// The payload must be consumed exactly. Any length mismatch is reported as
    /// [Error::MalformedRecord].
    pub fn decode(class: Class, payload: impl Buf, cfg: &table::Config) -> Result<Self, Error> {
        trace!(%class, len = payload.remaining(), "decoding userdata");
        let result = match class {
            Class::Color => Color::decode(payload).map(Self::Color),
            Class::Tone => Tone::decode(payload).map(Self::Tone),
            Class::Table => Table::decode_cfg(payload, cfg).map(Self::Table),
        };
        result.map_err(|source| Error::MalformedRecord {
            class: class.as_str(),
            source,
        })
    }

    /// Decodes a raw payload, dispatching on the class name found in the stream.
    pub fn decode_named(name: &str, payload: impl Buf, cfg: &table::Config) -> Result<Self, Error> {
        let class = Class::from_name(name).ok_or_else(|| Error::UnknownClass(name.to_string()))?;
        Self::decode(class, payload, cfg)
    }

    /// Encodes the raw payload (without any outer framing).
    pub fn encode(&self) -> Result<Bytes, Error> {
        let payload = match self {
            Self::Color(color) => color.encode(),
            Self::Tone(tone) => tone.encode(),
            Self::Table(table) => {
                table.check_capacity()?;
                table.encode()
            }
        };
        Ok(payload.freeze())
    }
}

impl From<Color> for Userdata {
    fn from(value: Color) -> Self {
        Self::Color(value)
    }
}

impl From<Tone> for Userdata {
    fn from(value: Tone) -> Self {
        Self::Tone(value)
    }
}

impl From<Table> for Userdata {
    fn from(value: Table) -> Self {
        Self::Table(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rgss_macros::test_traced;

    #[test_traced]
    fn test_dispatch_by_class() {
        let cfg = table::Config::default();
        let raw = Color::new(1.0, 2.0, 3.0, 4.0).encode().freeze();

        // Same bytes, different class, different value
        let color = Userdata::decode(Class::Color, raw.clone(), &cfg).unwrap();
        let tone = Userdata::decode(Class::Tone, raw.clone(), &cfg).unwrap();
        assert_eq!(color, Userdata::Color(Color::new(1.0, 2.0, 3.0, 4.0)));
        assert_eq!(tone, Userdata::Tone(Tone::new(1.0, 2.0, 3.0, 4.0)));
        assert_eq!(color.class(), Class::Color);
        assert_eq!(tone.class(), Class::Tone);

        // As a table the header claims no elements, leaving 12 bytes unread
        assert!(matches!(
            Userdata::decode(Class::Table, raw, &cfg),
            Err(Error::MalformedRecord { class: "Table", .. })
        ));
    }

    #[test]
    fn test_malformed_wraps_source() {
        let err = Userdata::decode(Class::Color, &[0u8; 31][..], &table::Config::default())
            .unwrap_err();
        match err {
            Error::MalformedRecord { class, source } => {
                assert_eq!(class, "Color");
                assert_eq!(source, rgss_codec::Error::EndOfBuffer);
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = Userdata::decode(Class::Tone, &[0u8; 33][..], &table::Config::default())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed Tone record: extra data found: 1 bytes"
        );
    }

    #[test]
    fn test_decode_named() {
        let cfg = table::Config::default();
        let raw = Tone::default().encode();
        assert_eq!(
            Userdata::decode_named("Tone", &raw[..], &cfg).unwrap(),
            Userdata::Tone(Tone::default())
        );
        assert!(matches!(
            Userdata::decode_named("RPG::Map", &raw[..], &cfg),
            Err(Error::UnknownClass(name)) if name == "RPG::Map"
        ));
    }

    #[test]
    fn test_encode_matches_codec() {
        let values = [
            Userdata::from(Color::default()),
            Userdata::from(Tone::new(-68.0, -68.0, 0.0, 255.0)),
            Userdata::from(Table::from_parts(1, 3, 1, 1, vec![10, -5, 0]).unwrap()),
        ];
        let sizes = [32, 32, 26];
        for (value, size) in values.iter().zip(sizes) {
            let payload = value.encode().unwrap();
            assert_eq!(payload.len(), size);
            let decoded =
                Userdata::decode(value.class(), payload, &table::Config::default()).unwrap();
            assert_eq!(&decoded, value);
        }
    }

    #[test]
    fn test_serde_tagged() {
        let value = Userdata::from(Tone::new(1.0, 2.0, 3.0, 4.0));
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(
            json,
            r#"{"class":"Tone","value":{"red":1.0,"green":2.0,"blue":3.0,"gray":4.0}}"#
        );
        let parsed: Userdata = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn test_serde_keeps_inconsistent_table() {
        // Legacy headers survive deserialization just like decoding
        let json = r#"{"class":"Table","value":{"dimensions":1,"xsize":1,"ysize":1,"zsize":1,"elements":[1,2]}}"#;
        let parsed: Userdata = serde_json::from_str(json).unwrap();
        match parsed {
            Userdata::Table(table) => assert!(!table.is_consistent()),
            other => panic!("unexpected value: {other:?}"),
        }
    }
}
