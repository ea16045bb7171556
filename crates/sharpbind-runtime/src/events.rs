//! Event handler surface of the bridge.
//!
//! A [`ManagedEventHandler`] bridges native event dispatch to a managed
//! callback while keeping the callback target alive for exactly as long as
//! the subscription exists. Each handler instance owns one GC-handle
//! reference independently: cloning a handler (for a second subscription)
//! takes out a new strong reference rather than copying the token, and
//! destruction releases exactly one.

use std::sync::Arc;

use sharpbind_core::{BridgeError, TypeHash};

use crate::handle::GcHandle;
use crate::managed::ManagedRuntime;
use crate::variant::EventData;

/// Native subscription record invoked when a matching event is dispatched.
pub trait EventHandler: Send {
    /// Dispatch one event. A managed-side failure is surfaced as an error
    /// at this boundary rather than silently swallowed; the dispatcher
    /// decides whether to continue with remaining subscribers.
    fn invoke(&mut self, event_type: TypeHash, data: &mut EventData)
    -> Result<(), BridgeError>;

    /// Duplicate this handler for a second subscription. Implementations
    /// owning cross-boundary resources must take out independent references.
    fn clone_handler(&self) -> Box<dyn EventHandler>;
}

/// Event handler calling into the managed runtime.
pub struct ManagedEventHandler {
    runtime: Arc<dyn ManagedRuntime>,
    handle: GcHandle,
}

impl ManagedEventHandler {
    /// Take ownership of one reference to the managed callback target.
    pub fn new(runtime: Arc<dyn ManagedRuntime>, handle: GcHandle) -> Self {
        Self { runtime, handle }
    }

    /// The pinned callback target.
    pub fn handle(&self) -> &GcHandle {
        &self.handle
    }
}

impl EventHandler for ManagedEventHandler {
    fn invoke(
        &mut self,
        event_type: TypeHash,
        data: &mut EventData,
    ) -> Result<(), BridgeError> {
        self.runtime.invoke_event(&self.handle, event_type, data)
    }

    fn clone_handler(&self) -> Box<dyn EventHandler> {
        // A new strong reference, not a copy of the token: the clone's
        // lifetime is independent of the original's.
        Box::new(Self {
            runtime: Arc::clone(&self.runtime),
            handle: self.handle.duplicate(),
        })
    }
}
