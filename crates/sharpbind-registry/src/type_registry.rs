//! TypeRegistry - the bound type surface.
//!
//! Class definitions matching the inclusion rules are registered here during
//! tree construction; later passes and the type-mapping machinery consult it
//! to decide what a textual type reference means for the binding shape
//! (known/unknown, value vs reference semantics, default constructibility).
//!
//! Storage model follows the registry pattern used throughout the workspace:
//! one primary map keyed by [`TypeHash`], plus a name reverse index built
//! during registration for textual lookups.

use rustc_hash::FxHashMap;

use sharpbind_core::{EntityId, QualifiedName, RegistrationError, TypeHash};

/// How instances of a bound type travel across the binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeDisposition {
    /// Copied by value (plain structs, math types).
    Value,
    /// Reference-counted engine object, passed by handle.
    Reference,
    /// Enumeration (by value, integral underlying type).
    Enumeration,
}

/// One known type of the bound surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeEntry {
    /// Fully qualified source name (`::`-separated).
    pub unique_name: String,
    pub hash: TypeHash,
    pub disposition: TypeDisposition,
    /// Whether the type can be constructed without arguments. Relevant for
    /// default-value conversion: a value type without this cannot carry a
    /// compile-time default in the target language.
    pub has_default_ctor: bool,
    /// Declaring entity in the tree, when the type came from the source (a
    /// primitive or externally forced type has none).
    pub entity: Option<EntityId>,
}

impl TypeEntry {
    pub fn new(
        unique_name: impl Into<String>,
        disposition: TypeDisposition,
        has_default_ctor: bool,
    ) -> Self {
        let unique_name = unique_name.into();
        let hash = TypeHash::from_name(&unique_name);
        Self {
            unique_name,
            hash,
            disposition,
            has_default_ctor,
            entity: None,
        }
    }

    pub fn with_entity(mut self, entity: EntityId) -> Self {
        self.entity = Some(entity);
        self
    }
}

/// Registry of known bound types.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    /// Primary storage by hash.
    types: FxHashMap<TypeHash, TypeEntry>,
    /// Reverse index: qualified source name -> hash.
    name_index: FxHashMap<String, TypeHash>,
    /// Alias table: alias hash -> canonical type hash. Populated by the
    /// flag-enum discovery pass for flag-set aliases.
    aliases: FxHashMap<TypeHash, TypeHash>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a known type. Double registration of one hash is rejected.
    pub fn register(&mut self, entry: TypeEntry) -> Result<TypeHash, RegistrationError> {
        let hash = entry.hash;
        if self.types.contains_key(&hash) {
            return Err(RegistrationError::DuplicateType {
                name: entry.unique_name,
                hash,
            });
        }
        self.name_index.insert(entry.unique_name.clone(), hash);
        self.types.insert(hash, entry);
        Ok(hash)
    }

    pub fn get(&self, hash: TypeHash) -> Option<&TypeEntry> {
        let canonical = self.canonical_hash(hash);
        self.types.get(&canonical)
    }

    /// Look up by fully qualified source name.
    pub fn get_by_name(&self, unique_name: &str) -> Option<&TypeEntry> {
        let hash = self.name_index.get(unique_name)?;
        self.types.get(hash)
    }

    /// Look up a textual reference as seen from a scope, walking outward.
    pub fn resolve_from(&self, scope: &str, name: &str) -> Option<&TypeEntry> {
        if name.contains("::") {
            return self.get_by_name(name);
        }
        let mut scope = (!scope.is_empty()).then(|| QualifiedName::from_qualified_string(scope));
        while let Some(current) = scope {
            let candidate = current.child(name).to_string();
            if let Some(entry) = self.get_by_name(&candidate) {
                return Some(entry);
            }
            scope = current.parent();
        }
        self.get_by_name(name)
    }

    pub fn is_known(&self, hash: TypeHash) -> bool {
        self.types.contains_key(&self.canonical_hash(hash))
    }

    /// Record that `alias` stands for `target` in subsequent passes.
    ///
    /// Chains collapse at registration: aliasing an alias records the final
    /// canonical hash.
    pub fn register_alias(&mut self, alias: TypeHash, target: TypeHash) {
        let canonical = self.canonical_hash(target);
        self.aliases.insert(alias, canonical);
    }

    /// Follow the alias table to the canonical hash.
    pub fn canonical_hash(&self, hash: TypeHash) -> TypeHash {
        self.aliases.get(&hash).copied().unwrap_or(hash)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterate all registered entries (unordered).
    pub fn entries(&self) -> impl Iterator<Item = &TypeEntry> {
        self.types.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_lookup() {
        let mut reg = TypeRegistry::new();
        let hash = reg
            .register(TypeEntry::new("Scene::Node", TypeDisposition::Reference, true))
            .unwrap();
        assert!(reg.is_known(hash));
        assert_eq!(reg.get_by_name("Scene::Node").unwrap().hash, hash);
        assert!(reg.get_by_name("Node").is_none());
    }

    #[test]
    fn duplicate_rejected() {
        let mut reg = TypeRegistry::new();
        reg.register(TypeEntry::new("Vector3", TypeDisposition::Value, true))
            .unwrap();
        assert!(matches!(
            reg.register(TypeEntry::new("Vector3", TypeDisposition::Value, true)),
            Err(RegistrationError::DuplicateType { .. })
        ));
    }

    #[test]
    fn scope_resolution() {
        let mut reg = TypeRegistry::new();
        reg.register(TypeEntry::new("Engine::Vector3", TypeDisposition::Value, true))
            .unwrap();
        assert!(reg.resolve_from("Engine::Scene", "Vector3").is_some());
        assert!(reg.resolve_from("Other", "Vector3").is_none());
    }

    #[test]
    fn alias_resolves_to_canonical() {
        let mut reg = TypeRegistry::new();
        let target = reg
            .register(TypeEntry::new("AbcFlags", TypeDisposition::Enumeration, true))
            .unwrap();
        let alias = TypeHash::from_name("AbcFlagSet");
        reg.register_alias(alias, target);
        assert!(reg.is_known(alias));
        assert_eq!(reg.get(alias).unwrap().unique_name, "AbcFlags");

        // Alias of an alias collapses.
        let alias2 = TypeHash::from_name("AbcFlagSetAlias");
        reg.register_alias(alias2, alias);
        assert_eq!(reg.canonical_hash(alias2), target);
    }
}
