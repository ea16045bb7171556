//! SymbolTable - global name → entity index for cross-tree lookups.
//!
//! The table indexes entities by their fully qualified *source* symbol
//! (`unique_name`). It holds no ownership: the [`EntityArena`] owns every
//! entity, the table maps stable keys to stable ids. Generated names are not
//! keys; renames never invalidate the index.
//!
//! # Thread Safety
//!
//! `SymbolTable` is **not thread-safe**. The generator is single-threaded,
//! one pass at a time; there is no concurrent mutation of the shared tree.

use rustc_hash::FxHashMap;

use sharpbind_core::{EntityArena, EntityId, MetaEntity, QualifiedName, RegistrationError};

/// Global name → entity-id index.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: FxHashMap<String, EntityId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity under its fully qualified source symbol.
    ///
    /// Symbol names must be unique within the table; a second registration of
    /// the same key is rejected (function overloads are expected to collide
    /// and are simply left out of the index by the caller).
    pub fn insert(&mut self, unique_name: &str, id: EntityId) -> Result<(), RegistrationError> {
        if self.symbols.contains_key(unique_name) {
            return Err(RegistrationError::DuplicateSymbol {
                name: unique_name.to_string(),
            });
        }
        self.symbols.insert(unique_name.to_string(), id);
        Ok(())
    }

    /// Look up an entity by fully qualified source symbol.
    pub fn get(&self, unique_name: &str) -> Option<EntityId> {
        self.symbols.get(unique_name).copied()
    }

    /// Look up a symbol as seen from a scope, walking outward.
    ///
    /// `scope` is the `::`-qualified scope the reference appears in; an
    /// unqualified `name` is tried against every enclosing scope from the
    /// innermost out, then against the global scope.
    pub fn resolve_from(&self, scope: &str, name: &str) -> Option<EntityId> {
        if name.contains("::") {
            return self.get(name);
        }
        let mut scope = (!scope.is_empty()).then(|| QualifiedName::from_qualified_string(scope));
        while let Some(current) = scope {
            let candidate = current.child(name).to_string();
            if let Some(id) = self.get(&candidate) {
                return Some(id);
            }
            scope = current.parent();
        }
        self.get(name)
    }

    /// Drop a key from the index (the arena entry is untouched).
    pub fn forget(&mut self, unique_name: &str) -> Option<EntityId> {
        self.symbols.remove(unique_name)
    }

    /// Number of indexed symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Idempotent lookup-or-create for pass-synthesized entities.
    ///
    /// If `unique_name` is already indexed, the existing id is returned and
    /// `build` is never called. Otherwise `build` produces the entity, it is
    /// attached under `parent` in the same step, and indexed. Calling this
    /// uniformly makes synthetic-entity duplication structurally impossible.
    pub fn get_or_create_synthetic(
        &mut self,
        arena: &mut EntityArena,
        parent: EntityId,
        unique_name: &str,
        build: impl FnOnce() -> MetaEntity,
    ) -> EntityId {
        if let Some(existing) = self.get(unique_name) {
            return existing;
        }
        let mut entity = build();
        entity.unique_name = unique_name.to_string();
        let id = arena.alloc(entity, parent);
        self.symbols.insert(unique_name.to_string(), id);
        id
    }
}
