//! Names of the classes whose payloads are decoded by this crate.

use crate::{Color, Error, Tone};
use rgss_codec::FixedSize;
use std::{fmt, str::FromStr};

/// A userdata class with a known payload layout.
///
/// The set is closed: a stream entry is dispatched to a codec only if its class name matches one
/// of these exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Class {
    Color,
    Tone,
    Table,
}

impl Class {
    /// Every supported class.
    pub const ALL: [Class; 3] = [Class::Color, Class::Tone, Class::Table];

    /// Looks up a class by the name it is written under in the stream.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Color" => Some(Self::Color),
            "Tone" => Some(Self::Tone),
            "Table" => Some(Self::Table),
            _ => None,
        }
    }

    /// The name written to the stream.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Color => "Color",
            Self::Tone => "Tone",
            Self::Table => "Table",
        }
    }

    /// Returns the payload size if it does not depend on the value.
    pub const fn fixed_size(&self) -> Option<usize> {
        match self {
            Self::Color => Some(Color::SIZE),
            Self::Tone => Some(Tone::SIZE),
            Self::Table => None,
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Class {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::from_name(name).ok_or_else(|| Error::UnknownClass(name.to_string()))
    }
}
