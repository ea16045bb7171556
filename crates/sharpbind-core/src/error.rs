//! Unified error types for sharpbind.
//!
//! This module provides a consistent error type hierarchy for both halves of
//! the system: the binding generator and the runtime bridge.
//!
//! ## Error Hierarchy
//!
//! ```text
//! SharpbindError (top-level wrapper)
//! ├── RegistrationError - symbol table / type registry errors
//! ├── GeneratorError    - pipeline contract violations, bad rules
//! └── BridgeError       - managed/native bridge failures
//! ```
//!
//! Generator passes mostly make *policy decisions* rather than raise errors:
//! an unmappable construct is flagged non-generated or removed, with at most a
//! diagnostic log line. The variants below cover the cases that genuinely
//! abort a run or a bridge call.

use thiserror::Error;

use crate::TypeHash;

// ============================================================================
// Registration Errors
// ============================================================================

/// Errors raised while populating the symbol table and type registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A fully qualified source symbol was registered twice.
    #[error("duplicate symbol '{name}'")]
    DuplicateSymbol { name: String },

    /// A type was registered twice under the same hash.
    #[error("duplicate type '{name}' ({hash})")]
    DuplicateType { name: String, hash: TypeHash },

    /// A lookup expected a registered type that does not exist.
    #[error("unknown type {hash}")]
    UnknownType { hash: TypeHash },
}

// ============================================================================
// Generator Errors
// ============================================================================

/// Errors that abort a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    /// The rules document failed to parse or failed validation.
    #[error("invalid rules document: {detail}")]
    InvalidRules { detail: String },

    /// A pass observed an entity kind its contract forbids.
    #[error("pass '{pass}' encountered unexpected {found} at '{symbol}'")]
    UnexpectedEntity {
        pass: &'static str,
        found: &'static str,
        symbol: String,
    },

    #[error(transparent)]
    Registration(#[from] RegistrationError),
}

// ============================================================================
// Bridge Errors
// ============================================================================

/// Errors crossing the managed/native boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// The managed runtime returned a null/invalid instance handle.
    #[error("managed construction failed for type {type_hash}")]
    FactoryFailed { type_hash: TypeHash },

    /// A factory is already registered for the type.
    #[error("factory already registered for '{type_name}'")]
    DuplicateFactory { type_name: String },

    /// No factory is registered for the requested type.
    #[error("no factory registered for type {type_hash}")]
    UnknownFactory { type_hash: TypeHash },

    /// The managed callback reported a failure during event dispatch.
    #[error("managed handler failed with code {code}")]
    ManagedException { code: i32 },

    /// A raw pointer or string handed across the ABI was invalid.
    #[error("invalid argument across interop boundary: {detail}")]
    InvalidArgument { detail: &'static str },
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error wrapper for unified handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SharpbindError {
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Generator(#[from] GeneratorError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

/// Convenience result alias used across the workspace.
pub type Result<T, E = SharpbindError> = std::result::Result<T, E>;
