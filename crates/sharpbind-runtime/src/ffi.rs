//! `extern "C"` interop surface.
//!
//! The contract the managed runtime links against: register-factory and
//! subscribe-to-event entry points taking raw type-hash integers, C strings,
//! raw GC-handle tokens, and function-pointer callbacks with the fixed
//! signature `(handle, event-type, event-data-pointer)`. Failures are
//! reported as status codes; no panic crosses the boundary.

use std::ffi::{CStr, c_char};
use std::sync::Arc;

use sharpbind_core::{BridgeError, TypeHash};

use crate::context::Context;
use crate::events::ManagedEventHandler;
use crate::factory::ManagedObjectFactory;
use crate::handle::{GcHandle, HandleDuplicateFn, HandleReleaseFn, install_handle_ops};
use crate::managed::ManagedRuntime;
use crate::object::ManagedObject;
use crate::variant::EventData;

/// Success.
pub const SB_OK: i32 = 0;
/// A pointer or string argument was null/invalid.
pub const SB_ERR_INVALID_ARGUMENT: i32 = -1;
/// A factory is already registered for the type.
pub const SB_ERR_DUPLICATE: i32 = -2;
/// No factory/type registered under the hash.
pub const SB_ERR_UNKNOWN_TYPE: i32 = -3;
/// The managed callback reported a failure.
pub const SB_ERR_MANAGED: i32 = -4;

/// Managed constructor callback: `(factory_handle, type_hash)` to a raw
/// GC-handle token pinning the new managed instance; 0 on failure.
pub type CreateObjectFn = extern "C" fn(factory_handle: u64, type_hash: u64) -> u64;

/// Managed event callback: `(handle, event_type, event_data)` to a status
/// code; non-zero is surfaced as a managed failure.
pub type EventCallbackFn =
    extern "C" fn(handle: u64, event_type: u64, data: *mut EventData) -> i32;

fn status_of(err: &BridgeError) -> i32 {
    match err {
        BridgeError::InvalidArgument { .. } => SB_ERR_INVALID_ARGUMENT,
        BridgeError::DuplicateFactory { .. } => SB_ERR_DUPLICATE,
        BridgeError::UnknownFactory { .. } => SB_ERR_UNKNOWN_TYPE,
        BridgeError::FactoryFailed { .. } | BridgeError::ManagedException { .. } => SB_ERR_MANAGED,
    }
}

/// [`ManagedRuntime`] over raw function pointers received across the ABI.
struct FfiRuntime {
    create: Option<CreateObjectFn>,
    invoke: Option<EventCallbackFn>,
}

impl ManagedRuntime for FfiRuntime {
    fn create_object(
        &self,
        factory_handle: &GcHandle,
        type_hash: TypeHash,
    ) -> Result<ManagedObject, BridgeError> {
        let create = self.create.ok_or(BridgeError::InvalidArgument {
            detail: "no create callback registered",
        })?;
        let token = create(factory_handle.raw(), type_hash.raw());
        if token == 0 {
            return Err(BridgeError::FactoryFailed { type_hash });
        }
        Ok(ManagedObject::new(GcHandle::from_raw(token), type_hash))
    }

    fn invoke_event(
        &self,
        handle: &GcHandle,
        event_type: TypeHash,
        data: &mut EventData,
    ) -> Result<(), BridgeError> {
        let invoke = self.invoke.ok_or(BridgeError::InvalidArgument {
            detail: "no event callback registered",
        })?;
        let code = invoke(handle.raw(), event_type.raw(), std::ptr::from_mut(data));
        if code == 0 {
            Ok(())
        } else {
            Err(BridgeError::ManagedException { code })
        }
    }
}

/// Allocate a context. Free with [`sharpbind_context_free`].
#[unsafe(no_mangle)]
pub extern "C" fn sharpbind_context_new() -> *mut Context {
    Box::into_raw(Box::new(Context::new()))
}

/// Free a context allocated by [`sharpbind_context_new`].
///
/// # Safety
/// `ctx` must be a pointer returned by `sharpbind_context_new`, not yet
/// freed. Null is tolerated.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sharpbind_context_free(ctx: *mut Context) {
    if ctx.is_null() {
        return;
    }
    drop(unsafe { Box::from_raw(ctx) });
}

/// Install the managed runtime's GC-handle duplicate/release operations.
#[unsafe(no_mangle)]
pub extern "C" fn sharpbind_install_handle_ops(
    duplicate: Option<HandleDuplicateFn>,
    release: Option<HandleReleaseFn>,
) -> i32 {
    let (Some(duplicate), Some(release)) = (duplicate, release) else {
        return SB_ERR_INVALID_ARGUMENT;
    };
    install_handle_ops(duplicate, release);
    SB_OK
}

/// Register a managed-constructed type.
///
/// Takes ownership of one reference behind `factory_handle`.
///
/// # Safety
/// `ctx` must be a live context pointer; `type_name` must be a valid
/// NUL-terminated UTF-8 string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sharpbind_register_factory(
    ctx: *mut Context,
    type_name: *const c_char,
    base_hash: u64,
    factory_handle: u64,
    create: Option<CreateObjectFn>,
) -> i32 {
    let Some(ctx) = (unsafe { ctx.as_mut() }) else {
        return SB_ERR_INVALID_ARGUMENT;
    };
    if type_name.is_null() {
        return SB_ERR_INVALID_ARGUMENT;
    }
    let Ok(type_name) = (unsafe { CStr::from_ptr(type_name) }).to_str() else {
        return SB_ERR_INVALID_ARGUMENT;
    };
    let runtime: Arc<dyn ManagedRuntime> = Arc::new(FfiRuntime {
        create,
        invoke: None,
    });
    let factory = ManagedObjectFactory::new(
        type_name,
        TypeHash::from(base_hash),
        runtime,
        GcHandle::from_raw(factory_handle),
    )
    .with_deferred_deletion(ctx.deletion_queue());
    match ctx.register_factory(Box::new(factory)) {
        Ok(_) => SB_OK,
        Err(err) => status_of(&err),
    }
}

/// Subscribe a managed callback to an event type.
///
/// Takes ownership of one reference behind `handle`; it is released when the
/// subscription is dropped.
///
/// # Safety
/// `ctx` must be a live context pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sharpbind_subscribe_event(
    ctx: *mut Context,
    event_hash: u64,
    handle: u64,
    callback: Option<EventCallbackFn>,
) -> i32 {
    let Some(ctx) = (unsafe { ctx.as_mut() }) else {
        return SB_ERR_INVALID_ARGUMENT;
    };
    let Some(callback) = callback else {
        return SB_ERR_INVALID_ARGUMENT;
    };
    let runtime: Arc<dyn ManagedRuntime> = Arc::new(FfiRuntime {
        create: None,
        invoke: Some(callback),
    });
    let handler = ManagedEventHandler::new(runtime, GcHandle::from_raw(handle));
    ctx.subscribe(TypeHash::from(event_hash), Box::new(handler));
    SB_OK
}

/// Dispatch an event. Returns the number of handlers that completed, or a
/// negative status code.
///
/// # Safety
/// `ctx` must be a live context pointer; `data` must be null or a valid
/// event-data pointer the caller retains ownership of.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sharpbind_send_event(
    ctx: *mut Context,
    event_hash: u64,
    data: *mut EventData,
) -> i32 {
    let Some(ctx) = (unsafe { ctx.as_mut() }) else {
        return SB_ERR_INVALID_ARGUMENT;
    };
    let mut scratch = EventData::default();
    let data = match unsafe { data.as_mut() } {
        Some(data) => data,
        None => &mut scratch,
    };
    ctx.send_event(TypeHash::from(event_hash), data) as i32
}

/// Main-thread end-of-frame tick: drain the deferred-deletion queue.
/// Returns the number of objects destroyed.
///
/// # Safety
/// `ctx` must be a live context pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn sharpbind_end_frame(ctx: *mut Context) -> i32 {
    let Some(ctx) = (unsafe { ctx.as_mut() }) else {
        return SB_ERR_INVALID_ARGUMENT;
    };
    ctx.end_frame() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::LocalHandleTable;
    use std::ffi::CString;
    use std::sync::atomic::{AtomicU64, Ordering};

    static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1000);
    static EVENTS_SEEN: AtomicU64 = AtomicU64::new(0);

    extern "C" fn test_create(_factory: u64, _type_hash: u64) -> u64 {
        NEXT_INSTANCE.fetch_add(1, Ordering::SeqCst)
    }

    extern "C" fn failing_create(_factory: u64, _type_hash: u64) -> u64 {
        0
    }

    extern "C" fn test_event(_handle: u64, _event: u64, data: *mut EventData) -> i32 {
        EVENTS_SEEN.fetch_add(1, Ordering::SeqCst);
        assert!(!data.is_null());
        0
    }

    #[test]
    fn register_and_create_through_abi() {
        LocalHandleTable::install();
        let ctx = sharpbind_context_new();
        let name = CString::new("ManagedNode").unwrap();
        let status = unsafe {
            sharpbind_register_factory(
                ctx,
                name.as_ptr(),
                TypeHash::from_name("Object").raw(),
                LocalHandleTable::acquire().into_raw(),
                Some(test_create),
            )
        };
        assert_eq!(status, SB_OK);

        // Duplicate registration is rejected.
        let status = unsafe {
            sharpbind_register_factory(
                ctx,
                name.as_ptr(),
                0,
                LocalHandleTable::acquire().into_raw(),
                Some(test_create),
            )
        };
        assert_eq!(status, SB_ERR_DUPLICATE);

        let object = unsafe { &*ctx }
            .create_object(TypeHash::from_name("ManagedNode"))
            .unwrap();
        assert_eq!(object.type_hash(), TypeHash::from_name("ManagedNode"));
        drop(object);
        unsafe { sharpbind_context_free(ctx) };
    }

    #[test]
    fn failed_managed_construction_reports() {
        LocalHandleTable::install();
        let ctx = sharpbind_context_new();
        let name = CString::new("Broken").unwrap();
        let status = unsafe {
            sharpbind_register_factory(
                ctx,
                name.as_ptr(),
                0,
                LocalHandleTable::acquire().into_raw(),
                Some(failing_create),
            )
        };
        assert_eq!(status, SB_OK);
        let err = unsafe { &*ctx }
            .create_object(TypeHash::from_name("Broken"))
            .unwrap_err();
        assert!(matches!(err, BridgeError::FactoryFailed { .. }));
        unsafe { sharpbind_context_free(ctx) };
    }

    #[test]
    fn subscribe_and_send_through_abi() {
        LocalHandleTable::install();
        let ctx = sharpbind_context_new();
        let event = TypeHash::from_event("SceneUpdate");
        let status = unsafe {
            sharpbind_subscribe_event(
                ctx,
                event.raw(),
                LocalHandleTable::acquire().into_raw(),
                Some(test_event),
            )
        };
        assert_eq!(status, SB_OK);

        let before = EVENTS_SEEN.load(Ordering::SeqCst);
        let delivered = unsafe { sharpbind_send_event(ctx, event.raw(), std::ptr::null_mut()) };
        assert_eq!(delivered, 1);
        assert_eq!(EVENTS_SEEN.load(Ordering::SeqCst), before + 1);
        unsafe { sharpbind_context_free(ctx) };
    }

    #[test]
    fn null_arguments_are_rejected() {
        let status = unsafe {
            sharpbind_register_factory(std::ptr::null_mut(), std::ptr::null(), 0, 0, None)
        };
        assert_eq!(status, SB_ERR_INVALID_ARGUMENT);
        assert_eq!(
            unsafe { sharpbind_send_event(std::ptr::null_mut(), 0, std::ptr::null_mut()) },
            SB_ERR_INVALID_ARGUMENT
        );
        assert_eq!(sharpbind_install_handle_ops(None, None), SB_ERR_INVALID_ARGUMENT);
        unsafe { sharpbind_context_free(std::ptr::null_mut()) };
    }
}
