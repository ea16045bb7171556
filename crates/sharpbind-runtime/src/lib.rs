//! sharpbind-runtime: the managed/native bridge consumed by generated
//! wrappers.
//!
//! Two halves, mirroring the binding contract:
//!
//! - **Object construction**: [`ManagedObjectFactory`] lets the managed
//!   runtime supply constructors for reflected types registered in the
//!   [`Context`] factory table, including the deferred-deletion deployment
//!   for finalizer-thread destruction.
//! - **Event dispatch**: [`ManagedEventHandler`] marshals native events into
//!   managed callbacks, owning exactly one GC-handle reference per
//!   subscription.
//!
//! The `extern "C"` surface in [`ffi`] is the actual contract managed code
//! links against.

pub mod context;
pub mod deletion;
pub mod events;
pub mod factory;
pub mod ffi;
pub mod handle;
pub mod managed;
pub mod object;
pub mod variant;

pub use context::Context;
pub use deletion::{DeferredDrop, DeletionQueue};
pub use events::{EventHandler, ManagedEventHandler};
pub use factory::{ManagedObjectFactory, ObjectFactory};
pub use handle::{GcHandle, LocalHandleTable, install_handle_ops};
pub use managed::ManagedRuntime;
pub use object::{ManagedObject, Object, SharedPtr, TypeInfo};
pub use variant::{EventData, Variant};
