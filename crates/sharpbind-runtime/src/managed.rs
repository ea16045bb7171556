//! ManagedRuntime - the trait seam to the embedding managed runtime.
//!
//! Everything the bridge asks of the managed side goes through this trait:
//! constructing a managed-backed object for a registered type, and invoking a
//! managed event callback. The `extern "C"` surface adapts raw function
//! pointers into an implementation; tests provide in-process mocks.

use sharpbind_core::{BridgeError, TypeHash};

use crate::handle::GcHandle;
use crate::object::ManagedObject;
use crate::variant::EventData;

/// Callback seam into the managed runtime.
pub trait ManagedRuntime: Send + Sync {
    /// Ask the managed runtime to instantiate the managed subclass behind
    /// `type_hash`, using the pinned factory delegate. Returns the
    /// native-side object owning one reference to the managed instance.
    fn create_object(
        &self,
        factory_handle: &GcHandle,
        type_hash: TypeHash,
    ) -> Result<ManagedObject, BridgeError>;

    /// Invoke the managed callback behind `handle` for one event dispatch.
    /// The event-data map is passed by reference; the native side retains
    /// ownership for the duration of the call.
    fn invoke_event(
        &self,
        handle: &GcHandle,
        event_type: TypeHash,
        data: &mut EventData,
    ) -> Result<(), BridgeError>;
}
