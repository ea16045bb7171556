//! Object factories.
//!
//! An [`ObjectFactory`] is a registry entry that knows how to construct
//! instances of one reflected type. [`ManagedObjectFactory`] lets the
//! managed runtime supply the concrete constructor, so a managed-defined
//! subclass of a native type can be registered in the [`crate::Context`]
//! factory table and then constructed by native code (scene deserialization,
//! component creation).

use std::sync::Arc;

use sharpbind_core::{BridgeError, TypeHash};

use crate::deletion::{DeferredDrop, DeletionQueue};
use crate::handle::GcHandle;
use crate::managed::ManagedRuntime;
use crate::object::{ManagedObject, Object, SharedPtr, TypeInfo};

/// Native registry entry constructing instances of one reflected type.
pub trait ObjectFactory: Send {
    fn type_info(&self) -> &TypeInfo;

    /// Construct one instance, returning ownership as a reference-counted
    /// pointer.
    fn create_object(&self) -> Result<SharedPtr<dyn Object>, BridgeError>;
}

/// Factory whose constructor lives in the managed runtime.
///
/// Built from a type name and the base-type hash, chaining the type-info
/// node to the registered native base type. `create_object` calls back into
/// the managed runtime through the stored handle. If managed construction
/// fails the factory performs no additional validation; the error is
/// surfaced as-is.
pub struct ManagedObjectFactory {
    type_info: TypeInfo,
    runtime: Arc<dyn ManagedRuntime>,
    handle: GcHandle,
    deletion: Option<Arc<DeletionQueue>>,
}

impl ManagedObjectFactory {
    /// Take ownership of one reference to the managed factory delegate.
    pub fn new(
        type_name: impl Into<String>,
        base_hash: TypeHash,
        runtime: Arc<dyn ManagedRuntime>,
        handle: GcHandle,
    ) -> Self {
        let base = if base_hash.is_empty() {
            None
        } else {
            Some(base_hash)
        };
        Self {
            type_info: TypeInfo::new(type_name, base),
            runtime,
            handle,
            deletion: None,
        }
    }

    /// Alternate deployment: objects from this factory defer destruction
    /// into `queue` when their last reference is dropped off the creating
    /// thread (managed finalizers run on the GC's thread).
    pub fn with_deferred_deletion(mut self, queue: Arc<DeletionQueue>) -> Self {
        self.deletion = Some(queue);
        self
    }
}

impl ObjectFactory for ManagedObjectFactory {
    fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    fn create_object(&self) -> Result<SharedPtr<dyn Object>, BridgeError> {
        let object = self
            .runtime
            .create_object(&self.handle, self.type_info.type_hash())?;
        Ok(match &self.deletion {
            Some(queue) => {
                Arc::new(DeferredDrop::new(object, Arc::clone(queue))) as SharedPtr<dyn Object>
            }
            None => Arc::new(object) as SharedPtr<dyn Object>,
        })
    }
}

impl<T: Object + Send + 'static> Object for DeferredDrop<T> {
    fn type_hash(&self) -> TypeHash {
        self.get().type_hash()
    }
}
