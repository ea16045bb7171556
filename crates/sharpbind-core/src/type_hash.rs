//! Deterministic hash-based type identity system.
//!
//! This module provides [`TypeHash`], a 64-bit hash that uniquely identifies
//! bound types, functions, and events across the generator and the runtime
//! bridge. Unlike sequential ids, hashes are computed deterministically from
//! qualified names, enabling:
//!
//! - Forward references (hash computed before registration)
//! - No registration order dependencies
//! - The same identity on both sides of the interop boundary (the managed
//!   runtime computes the same hash from the same name)
//! - Raw `u64` transport across the `extern "C"` surface
//!
//! # Hash Computation
//!
//! Uses XXHash64 with domain-specific mixing constants to prevent collisions
//! between different entity categories (types vs functions vs events).
//!
//! # Examples
//!
//! ```
//! use sharpbind_core::TypeHash;
//!
//! let node = TypeHash::from_name("Scene::Node");
//! let same = TypeHash::from_name("Scene::Node");
//! assert_eq!(node, same);
//!
//! let event = TypeHash::from_event("NodeAdded");
//! assert_ne!(node, event);
//! ```

use std::fmt;
use xxhash_rust::xxh64::xxh64;

/// Domain-specific mixing constants for hash computation.
///
/// These constants ensure that different entity categories (types, functions,
/// events) produce distinct hashes even if they share the same name.
pub mod hash_constants {
    /// Domain marker for type hashes.
    pub const TYPE: u64 = 0x51c3a8f07d2e6b94;

    /// Domain marker for function hashes.
    pub const FUNCTION: u64 = 0x8e6b1d49c7f0a235;

    /// Domain marker for event-type hashes.
    pub const EVENT: u64 = 0x3a94e7c25f81d60b;

    /// Domain marker for event-parameter hashes.
    pub const PARAM: u64 = 0x6d07f2b8a31c594e;
}

/// A deterministic 64-bit hash identifying a type, function, or event.
///
/// Computed from the qualified name. The same input always produces the same
/// hash, so the native and managed sides agree on identity without sharing a
/// registration table.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeHash(pub u64);

impl TypeHash {
    /// Empty/invalid hash constant.
    pub const EMPTY: TypeHash = TypeHash(0);

    /// Create a type hash from a qualified type name.
    #[inline]
    pub fn from_name(name: &str) -> Self {
        TypeHash(hash_constants::TYPE ^ xxh64(name.as_bytes(), 0))
    }

    /// Create a function hash from a qualified function name.
    ///
    /// Functions live in a separate hash domain so a function may share its
    /// name with a type without colliding.
    #[inline]
    pub fn from_function(name: &str) -> Self {
        TypeHash(hash_constants::FUNCTION ^ xxh64(name.as_bytes(), 0))
    }

    /// Create an event-type hash from an event name.
    #[inline]
    pub fn from_event(name: &str) -> Self {
        TypeHash(hash_constants::EVENT ^ xxh64(name.as_bytes(), 0))
    }

    /// Create an event-parameter hash from a parameter name.
    #[inline]
    pub fn from_param(name: &str) -> Self {
        TypeHash(hash_constants::PARAM ^ xxh64(name.as_bytes(), 0))
    }

    /// Check if this hash is the empty/invalid marker.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Raw hash value, as carried across the interop ABI.
    #[inline]
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHash({:#018x})", self.0)
    }
}

impl fmt::Display for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

impl From<u64> for TypeHash {
    fn from(raw: u64) -> Self {
        TypeHash(raw)
    }
}
