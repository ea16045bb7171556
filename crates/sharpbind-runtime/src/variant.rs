//! Variant - dynamically typed event-data values.
//!
//! Event payloads cross the bridge as a map of parameter hash to variant.
//! The native side retains ownership of the map for the duration of a
//! dispatch; handlers read and mutate it in place.

use rustc_hash::FxHashMap;

use sharpbind_core::TypeHash;

/// Event-data map: parameter hash -> value.
pub type EventData = FxHashMap<TypeHash, Variant>;

/// A dynamically typed value carried in event data.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Variant {
    #[default]
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Raw GC-handle token referencing a managed object. The variant does
    /// not own a reference; ownership stays with the sender.
    Handle(u64),
}

impl Variant {
    pub fn is_empty(&self) -> bool {
        matches!(self, Variant::Empty)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Variant::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Variant::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Variant::Float(v) => Some(*v),
            Variant::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Variant::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_handle(&self) -> Option<u64> {
        match self {
            Variant::Handle(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<bool> for Variant {
    fn from(v: bool) -> Self {
        Variant::Bool(v)
    }
}

impl From<i64> for Variant {
    fn from(v: i64) -> Self {
        Variant::Int(v)
    }
}

impl From<f64> for Variant {
    fn from(v: f64) -> Self {
        Variant::Float(v)
    }
}

impl From<&str> for Variant {
    fn from(v: &str) -> Self {
        Variant::String(v.to_string())
    }
}

impl From<String> for Variant {
    fn from(v: String) -> Self {
        Variant::String(v)
    }
}
