//! Map class names found in a stream to the way their entries are built.
//!
//! A Marshal reader meets two kinds of named classes: userdata classes, whose payload is handed
//! to a codec, and plain containers, which are created empty and then filled attribute by
//! attribute. The [Registry] answers which is which and builds either.
//!
//! # Example
//!
//! ```
//! use rgss_userdata::{registry::{Kind, Registry}, table, Class, Color, Userdata};
//!
//! let registry = Registry::rgss_xp(table::Config::default());
//! assert_eq!(registry.kind("Color"), Some(Kind::Userdata(Class::Color)));
//! assert_eq!(registry.kind("RPG::Map"), Some(Kind::Object));
//!
//! // Containers start empty and accept any attribute
//! let mut map = registry.instantiate::<i32>("RPG::Map").unwrap();
//! map.set("@width", 20);
//! assert_eq!(map.get("@width"), Some(&20));
//!
//! // Userdata is decoded from its payload
//! let payload = Userdata::from(Color::default()).encode().unwrap();
//! assert!(registry.load("Color", payload).is_ok());
//! ```

use crate::{envelope::Envelope, table, Class, Error, Userdata};
use bytes::Buf;
use std::collections::BTreeMap;
use tracing::debug;

/// Container classes of the RPG Maker XP data schema.
pub const RGSS_XP_OBJECTS: [&str; 32] = [
    "RPG::Event",
    "RPG::Event::Page",
    "RPG::Event::Page::Condition",
    "RPG::Event::Page::Graphic",
    "RPG::EventCommand",
    "RPG::MoveRoute",
    "RPG::MoveCommand",
    "RPG::Map",
    "RPG::MapInfo",
    "RPG::AudioFile",
    "RPG::System",
    "RPG::System::Words",
    "RPG::System::TestBattler",
    "RPG::CommonEvent",
    "RPG::Tileset",
    "RPG::State",
    "RPG::Animation",
    "RPG::Animation::Frame",
    "RPG::Animation::Timing",
    "RPG::Class",
    "RPG::Class::Learning",
    "RPG::Actor",
    "RPG::Skill",
    "RPG::Item",
    "RPG::Weapon",
    "RPG::Armor",
    "RPG::Enemy",
    "RPG::Enemy::Action",
    "RPG::Troop",
    "RPG::Troop::Member",
    "RPG::Troop::Page",
    "RPG::Troop::Page::Condition",
];

/// How entries of a registered class are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Decoded from an opaque payload.
    Userdata(Class),
    /// Created empty and filled by name.
    Object,
}

/// A named container with no behavior of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct Object<V> {
    class: String,
    attributes: BTreeMap<String, V>,
}

impl<V> Object<V> {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    /// Sets an attribute, returning the previous value if there was one.
    pub fn set(&mut self, name: impl Into<String>, value: V) -> Option<V> {
        self.attributes.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.attributes.get(name)
    }

    /// Attributes in name order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &V)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Mapping from class name to [Kind].
#[derive(Debug, Clone)]
pub struct Registry {
    kinds: BTreeMap<String, Kind>,
    table: table::Config,
}

impl Registry {
    /// Creates a registry that knows only the userdata classes.
    pub fn new(table: table::Config) -> Self {
        let kinds = Class::ALL
            .into_iter()
            .map(|class| (class.as_str().to_string(), Kind::Userdata(class)))
            .collect();
        Self { kinds, table }
    }

    /// Creates a registry preloaded with the RPG Maker XP schema.
    pub fn rgss_xp(table: table::Config) -> Self {
        let mut registry = Self::new(table);
        for name in RGSS_XP_OBJECTS {
            registry.register(name);
        }
        registry
    }

    /// Registers a container class.
    ///
    /// Returns false if the name was already registered. Userdata classes are never replaced.
    pub fn register(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.kinds.contains_key(&name) {
            return false;
        }
        self.kinds.insert(name, Kind::Object);
        true
    }

    pub fn kind(&self, name: &str) -> Option<Kind> {
        self.kinds.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.kinds.contains_key(name)
    }

    /// Registered names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.kinds.keys().map(String::as_str)
    }

    /// The configuration applied to every table this registry loads.
    pub fn table_config(&self) -> &table::Config {
        &self.table
    }

    /// Creates an empty container for a registered class.
    pub fn instantiate<V>(&self, name: &str) -> Result<Object<V>, Error> {
        match self.kind(name) {
            Some(Kind::Object) => Ok(Object::new(name)),
            Some(Kind::Userdata(_)) => Err(Error::NotObject(name.to_string())),
            None => Err(Error::UnknownClass(name.to_string())),
        }
    }

    /// Decodes the payload of a registered userdata class.
    pub fn load(&self, name: &str, payload: impl Buf) -> Result<Userdata, Error> {
        let class = match self.kind(name) {
            Some(Kind::Userdata(class)) => class,
            Some(Kind::Object) => return Err(Error::NotUserdata(name.to_string())),
            None => return Err(Error::UnknownClass(name.to_string())),
        };
        Userdata::decode(class, payload, &self.table).map_err(|err| {
            debug!(class = name, ?err, "failed to load userdata");
            err
        })
    }

    /// Decodes the payload of an [Envelope].
    pub fn load_envelope(&self, envelope: &Envelope) -> Result<Userdata, Error> {
        self.load(envelope.class(), envelope.data().clone())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::rgss_xp(table::Config::default())
    }
}
