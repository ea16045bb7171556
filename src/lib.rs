//! sharpbind - a C++-to-C# binding generator and the managed/native runtime
//! bridge the generated wrappers run on.
//!
//! The facade crate re-exports the workspace surface:
//!
//! - [`sharpbind_core`]: entity tree, hash identity, error hierarchy
//! - [`sharpbind_registry`]: symbol table, known types, class hierarchy
//! - [`sharpbind_generator`]: declaration model, pass pipeline, C# emitter
//! - [`sharpbind_runtime`]: factories, event handlers, GC-handle lifetime,
//!   deferred deletion, `extern "C"` interop

pub use sharpbind_core as core;
pub use sharpbind_generator as generator;
pub use sharpbind_registry as registry;
pub use sharpbind_runtime as runtime;

pub mod prelude {
    pub use sharpbind_core::{
        Access, BridgeError, EntityArena, EntityFlags, EntityId, EntityKind, GeneratorError,
        MetaEntity, QualifiedName, RegistrationError, SharpbindError, TypeHash, TypeRef,
    };
    pub use sharpbind_generator::{
        CodePrinter, GeneratedUnit, Generation, Generator, GeneratorRules, Pipeline,
    };
    pub use sharpbind_registry::{HierarchyGraph, SymbolTable, TypeRegistry};
    pub use sharpbind_runtime::{
        Context, EventData, EventHandler, GcHandle, ManagedEventHandler, ManagedObjectFactory,
        ManagedRuntime, Object, SharedPtr, TypeInfo, Variant,
    };
}
