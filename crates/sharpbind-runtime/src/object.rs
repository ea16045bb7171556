//! Object and type-info surface of the runtime bridge.

use std::sync::Arc;

use sharpbind_core::TypeHash;

use crate::handle::GcHandle;

/// Reference-counted ownership across the bridge.
pub type SharedPtr<T> = Arc<T>;

/// A reflected native object constructible through the factory table.
///
/// `Send + Sync` because the last reference may be dropped from a managed
/// finalizer thread (see the deferred-deletion queue).
pub trait Object: Send + Sync {
    fn type_hash(&self) -> TypeHash;
}

/// Reflection node for one registered type, chaining to its registered base
/// type by hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    type_name: String,
    type_hash: TypeHash,
    base_hash: Option<TypeHash>,
}

impl TypeInfo {
    pub fn new(type_name: impl Into<String>, base_hash: Option<TypeHash>) -> Self {
        let type_name = type_name.into();
        let type_hash = TypeHash::from_name(&type_name);
        Self {
            type_name,
            type_hash,
            base_hash,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn type_hash(&self) -> TypeHash {
        self.type_hash
    }

    pub fn base_hash(&self) -> Option<TypeHash> {
        self.base_hash
    }
}

/// A native-side object whose implementation lives in the managed runtime.
///
/// Owns one GC-handle reference to the managed instance; dropping the object
/// releases it, which is exactly what the deferred-deletion machinery defers
/// off the main thread.
#[derive(Debug)]
pub struct ManagedObject {
    handle: GcHandle,
    type_hash: TypeHash,
}

impl ManagedObject {
    pub fn new(handle: GcHandle, type_hash: TypeHash) -> Self {
        Self { handle, type_hash }
    }

    /// The pinned managed instance.
    pub fn handle(&self) -> &GcHandle {
        &self.handle
    }
}

impl Object for ManagedObject {
    fn type_hash(&self) -> TypeHash {
        self.type_hash
    }
}
