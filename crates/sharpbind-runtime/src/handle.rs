//! GC-handle ownership across the managed/native boundary.
//!
//! A [`GcHandle`] is an opaque reference-counted token pinning a managed
//! object (a delegate, a factory, an instance) while native code references
//! it. The invariant is exactly one release per acquire/duplicate; the RAII
//! guard makes that structural: `Clone` takes out a new strong reference
//! through the duplicate operation, `Drop` releases exactly once.
//!
//! The actual duplicate/release operations belong to the embedding runtime
//! and are installed process-wide as function pointers. With none installed,
//! tokens are inert (useful for hosts that manage pinning themselves).
//! [`LocalHandleTable`] provides an in-process implementation for tests and
//! headless embeddings.

use std::mem;
use std::sync::{Mutex, OnceLock};

use rustc_hash::FxHashMap;

/// Duplicate operation: returns a token holding a new strong reference to
/// the same managed target.
pub type HandleDuplicateFn = extern "C" fn(u64) -> u64;
/// Release operation: gives up one strong reference.
pub type HandleReleaseFn = extern "C" fn(u64);

#[derive(Debug, Default, Clone, Copy)]
struct HandleOps {
    duplicate: Option<HandleDuplicateFn>,
    release: Option<HandleReleaseFn>,
}

static HANDLE_OPS: OnceLock<Mutex<HandleOps>> = OnceLock::new();

fn ops() -> &'static Mutex<HandleOps> {
    HANDLE_OPS.get_or_init(|| Mutex::new(HandleOps::default()))
}

fn current_ops() -> HandleOps {
    *ops().lock().unwrap_or_else(|e| e.into_inner())
}

/// Install the embedding runtime's handle operations, replacing any previous
/// installation.
pub fn install_handle_ops(duplicate: HandleDuplicateFn, release: HandleReleaseFn) {
    let mut guard = ops().lock().unwrap_or_else(|e| e.into_inner());
    guard.duplicate = Some(duplicate);
    guard.release = Some(release);
}

/// Opaque reference-counted token pinning a managed object.
///
/// Owns exactly one strong reference. The null token (0) owns nothing.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct GcHandle {
    raw: u64,
}

impl GcHandle {
    /// The null handle; owns no reference, releases nothing.
    pub const NULL: GcHandle = GcHandle { raw: 0 };

    /// Take ownership of one strong reference represented by a raw token
    /// (as received across the interop boundary).
    pub fn from_raw(raw: u64) -> Self {
        Self { raw }
    }

    /// The raw token, for passing across the boundary without transferring
    /// ownership.
    pub fn raw(&self) -> u64 {
        self.raw
    }

    pub fn is_null(&self) -> bool {
        self.raw == 0
    }

    /// Take out a new strong reference to the same managed target.
    pub fn duplicate(&self) -> GcHandle {
        if self.raw == 0 {
            return GcHandle::NULL;
        }
        let raw = match current_ops().duplicate {
            Some(f) => f(self.raw),
            None => self.raw,
        };
        GcHandle { raw }
    }

    /// Surrender ownership, returning the raw token without releasing it.
    /// The receiver becomes responsible for exactly one release.
    pub fn into_raw(self) -> u64 {
        let raw = self.raw;
        mem::forget(self);
        raw
    }
}

impl Clone for GcHandle {
    fn clone(&self) -> Self {
        self.duplicate()
    }
}

impl Drop for GcHandle {
    fn drop(&mut self) {
        if self.raw == 0 {
            return;
        }
        if let Some(f) = current_ops().release {
            f(self.raw);
        }
    }
}

// ============================================================================
// In-process handle table
// ============================================================================

struct LocalTableState {
    counts: FxHashMap<u64, u32>,
    next: u64,
}

static LOCAL_TABLE: OnceLock<Mutex<LocalTableState>> = OnceLock::new();

fn local_table() -> &'static Mutex<LocalTableState> {
    LOCAL_TABLE.get_or_init(|| {
        Mutex::new(LocalTableState {
            counts: FxHashMap::default(),
            next: 1,
        })
    })
}

extern "C" fn local_duplicate(raw: u64) -> u64 {
    let mut table = local_table().lock().unwrap_or_else(|e| e.into_inner());
    if let Some(count) = table.counts.get_mut(&raw) {
        *count += 1;
    }
    raw
}

extern "C" fn local_release(raw: u64) {
    let mut table = local_table().lock().unwrap_or_else(|e| e.into_inner());
    if let Some(count) = table.counts.get_mut(&raw) {
        *count -= 1;
        if *count == 0 {
            table.counts.remove(&raw);
        }
    }
}

/// Reference-counting handle table for hosts without a managed GC (and for
/// tests). `install` wires the global handle operations to this table.
pub struct LocalHandleTable;

impl LocalHandleTable {
    /// Route all handle operations through the in-process table.
    pub fn install() {
        install_handle_ops(local_duplicate, local_release);
    }

    /// Pin a new target, returning a handle owning one reference.
    pub fn acquire() -> GcHandle {
        let mut table = local_table().lock().unwrap_or_else(|e| e.into_inner());
        let raw = table.next;
        table.next += 1;
        table.counts.insert(raw, 1);
        GcHandle::from_raw(raw)
    }

    /// Current strong-reference count of a token. Zero once fully released.
    pub fn ref_count(raw: u64) -> u32 {
        let table = local_table().lock().unwrap_or_else(|e| e.into_inner());
        table.counts.get(&raw).copied().unwrap_or(0)
    }
}
