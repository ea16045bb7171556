//! Context - the engine-side registry the bridge plugs into.
//!
//! Owns the factory table, the type-info registry, and the per-event
//! subscriber lists. Lives on the main thread; the deletion queue is the
//! only cross-thread touchpoint, drained here at end of frame.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use sharpbind_core::{BridgeError, TypeHash};

use crate::deletion::DeletionQueue;
use crate::events::EventHandler;
use crate::factory::ObjectFactory;
use crate::object::{Object, SharedPtr, TypeInfo};
use crate::variant::EventData;

/// Engine context: factories, reflection, event dispatch.
#[derive(Default)]
pub struct Context {
    factories: FxHashMap<TypeHash, Box<dyn ObjectFactory>>,
    type_infos: FxHashMap<TypeHash, TypeInfo>,
    subscribers: FxHashMap<TypeHash, Vec<Box<dyn EventHandler>>>,
    deletion: Arc<DeletionQueue>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory for its reflected type.
    pub fn register_factory(
        &mut self,
        factory: Box<dyn ObjectFactory>,
    ) -> Result<TypeHash, BridgeError> {
        let info = factory.type_info().clone();
        let hash = info.type_hash();
        if self.factories.contains_key(&hash) {
            return Err(BridgeError::DuplicateFactory {
                type_name: info.type_name().to_string(),
            });
        }
        self.type_infos.insert(hash, info);
        self.factories.insert(hash, factory);
        Ok(hash)
    }

    /// Construct an instance of a registered type.
    pub fn create_object(&self, type_hash: TypeHash) -> Result<SharedPtr<dyn Object>, BridgeError> {
        let factory = self
            .factories
            .get(&type_hash)
            .ok_or(BridgeError::UnknownFactory { type_hash })?;
        factory.create_object()
    }

    pub fn type_info(&self, type_hash: TypeHash) -> Option<&TypeInfo> {
        self.type_infos.get(&type_hash)
    }

    /// Whether `type_hash` equals or derives from `base`, walking the
    /// registered type-info chain.
    pub fn is_instance_of(&self, type_hash: TypeHash, base: TypeHash) -> bool {
        let mut current = Some(type_hash);
        while let Some(hash) = current {
            if hash == base {
                return true;
            }
            current = self.type_infos.get(&hash).and_then(|i| i.base_hash());
        }
        false
    }

    /// Attach a handler to an event type. Dispatch order is subscription
    /// order.
    pub fn subscribe(&mut self, event_type: TypeHash, handler: Box<dyn EventHandler>) {
        self.subscribers.entry(event_type).or_default().push(handler);
    }

    /// Drop all subscriptions for an event type, returning how many there
    /// were. Each dropped handler releases its own resources.
    pub fn unsubscribe_all(&mut self, event_type: TypeHash) -> usize {
        self.subscribers
            .remove(&event_type)
            .map(|handlers| handlers.len())
            .unwrap_or(0)
    }

    /// Dispatch one event to every subscriber, in subscription order.
    ///
    /// A failing handler does not abort the dispatch: the failure is logged
    /// and remaining subscribers still run. Returns the number of handlers
    /// that completed successfully.
    pub fn send_event(&mut self, event_type: TypeHash, data: &mut EventData) -> usize {
        let Some(handlers) = self.subscribers.get_mut(&event_type) else {
            return 0;
        };
        let mut delivered = 0;
        for handler in handlers.iter_mut() {
            match handler.invoke(event_type, data) {
                Ok(()) => delivered += 1,
                Err(err) => {
                    log::warn!("event {event_type} handler failed: {err}");
                }
            }
        }
        delivered
    }

    /// The queue objects created with deferred deletion re-home into.
    pub fn deletion_queue(&self) -> Arc<DeletionQueue> {
        Arc::clone(&self.deletion)
    }

    /// Main-thread end-of-frame tick: destroy everything finalized off the
    /// main thread since the last tick. Returns the count.
    pub fn end_frame(&mut self) -> usize {
        self.deletion.drain()
    }
}
