//! Core data model for sharpbind: the entity tree, hash-based identity, and
//! the unified error hierarchy shared by the generator and the runtime
//! bridge.

pub mod arena;
pub mod entity;
pub mod error;
pub mod qualified_name;
pub mod type_hash;

pub use arena::{EntityArena, EntityId, WalkEvent};
pub use entity::{Access, EntityFlags, EntityKind, MetaEntity, TypeRef};
pub use error::{BridgeError, GeneratorError, RegistrationError, Result, SharpbindError};
pub use qualified_name::QualifiedName;
pub use type_hash::{TypeHash, hash_constants};
