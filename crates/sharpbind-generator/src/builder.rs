//! Tree construction and access gathering.
//!
//! Walks the parsed declarations once, creates one [`MetaEntity`] per
//! interesting declaration, and records the generation hints that depend on
//! source context:
//!
//! - private members are flagged non-generated and, for container kinds,
//!   their subtree is not descended into
//! - protected members and virtual methods flag the enclosing class as
//!   needing a virtual-dispatch wrapper subclass
//! - variadic functions are flagged non-generated (no safe binding shape)
//! - class definitions matching the inclusion rules are registered as known
//!   types for later passes and the type-mapping system
//!
//! Malformed entries are tolerated: an unmatched construct is simply left in
//! its default state. Generation fidelity, not error reporting, is the
//! metric here.

use sharpbind_core::{
    Access, EntityArena, EntityFlags, EntityId, EntityKind, MetaEntity, TypeRef,
};
use sharpbind_registry::{SymbolTable, TypeDisposition, TypeEntry, TypeRegistry};

use crate::cxx::{
    CxxClass, CxxDecl, CxxEnum, CxxFunction, CxxMemberDecl, CxxUnit, CxxVariable,
};
use crate::rules::GeneratorRules;

/// Output of tree construction.
#[derive(Debug, Default)]
pub struct BuildOutput {
    /// Number of entities created.
    pub entities_created: usize,
    /// Number of types registered as known.
    pub types_registered: usize,
}

/// One-shot builder walking the parsed units into the entity tree.
pub struct TreeBuilder<'a> {
    arena: &'a mut EntityArena,
    symbols: &'a mut SymbolTable,
    types: &'a mut TypeRegistry,
    rules: &'a GeneratorRules,
    /// Source scope chain (namespace/class names) of the current walk point.
    scope: Vec<String>,
    file: String,
    entities_created: usize,
    types_registered: usize,
    anonymous_counter: usize,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(
        arena: &'a mut EntityArena,
        symbols: &'a mut SymbolTable,
        types: &'a mut TypeRegistry,
        rules: &'a GeneratorRules,
    ) -> Self {
        Self {
            arena,
            symbols,
            types,
            rules,
            scope: Vec::new(),
            file: String::new(),
            entities_created: 0,
            types_registered: 0,
            anonymous_counter: 0,
        }
    }

    /// Build the tree from all units.
    pub fn run(mut self, units: &[CxxUnit]) -> BuildOutput {
        for unit in units {
            self.file = unit.file.clone();
            let root = self.arena.root();
            for decl in &unit.decls {
                self.visit_decl(root, decl, Access::Public);
            }
        }
        BuildOutput {
            entities_created: self.entities_created,
            types_registered: self.types_registered,
        }
    }

    fn visit_decl(&mut self, parent: EntityId, decl: &CxxDecl, access: Access) {
        match decl {
            CxxDecl::Namespace(ns) => self.visit_namespace(parent, ns),
            CxxDecl::Class(class) => self.visit_class(parent, class, access),
            CxxDecl::Enum(e) => self.visit_enum(parent, e, access),
            CxxDecl::Function(f) => {
                self.visit_function(parent, f, EntityKind::Function, access);
            }
            CxxDecl::Variable(v) => {
                self.visit_variable(parent, v, EntityKind::Variable, access);
            }
            CxxDecl::Alias(a) => {
                let mut entity = self.named_entity(EntityKind::Alias, &a.name, access);
                entity.ty = Some(TypeRef::named(a.underlying.clone()));
                self.attach(parent, entity);
            }
        }
    }

    fn visit_namespace(&mut self, parent: EntityId, ns: &crate::cxx::CxxNamespace) {
        // Namespaces are reopenable across units: reuse the existing entity.
        let unique = self.qualified(&ns.name);
        let id = match self.symbols.get(&unique) {
            Some(existing) if self.arena[existing].kind == EntityKind::Namespace => existing,
            _ => {
                let entity = self.named_entity(EntityKind::Namespace, &ns.name, Access::Public);
                self.attach(parent, entity)
            }
        };
        self.scope.push(ns.name.clone());
        for decl in &ns.decls {
            self.visit_decl(id, decl, Access::Public);
        }
        self.scope.pop();
    }

    fn visit_class(&mut self, parent: EntityId, class: &CxxClass, access: Access) {
        let kind = if class.is_struct {
            EntityKind::Struct
        } else {
            EntityKind::Class
        };
        let mut entity = self.named_entity(kind, &class.name, access);
        entity.source_bases = class.bases.clone();

        if access == Access::Private {
            // Non-generated, and the subtree is not worth building: nothing
            // below a private nested type can appear in output.
            entity.flags |= EntityFlags::EXCLUDED;
            self.attach(parent, entity);
            return;
        }

        let needs_proxy = class.members.iter().any(|m| {
            m.access == Access::Protected
                || matches!(&m.decl, CxxMemberDecl::Method(f) if f.is_virtual)
        });
        if needs_proxy {
            entity.flags |= EntityFlags::NEEDS_PROXY;
        }

        let unique = entity.unique_name.clone();
        let id = self.attach(parent, entity);

        if self.rules.includes_type(&unique) {
            let disposition = if class.is_struct {
                TypeDisposition::Value
            } else {
                TypeDisposition::Reference
            };
            let has_default_ctor = class_has_default_ctor(class);
            let entry =
                TypeEntry::new(unique, disposition, has_default_ctor).with_entity(id);
            if self.types.register(entry).is_ok() {
                self.types_registered += 1;
            }
        }

        self.scope.push(class.name.clone());
        for member in &class.members {
            match &member.decl {
                CxxMemberDecl::Method(f) => {
                    self.visit_function(id, f, EntityKind::Method, member.access);
                }
                CxxMemberDecl::Constructor(f) => {
                    self.visit_function(id, f, EntityKind::Constructor, member.access);
                }
                CxxMemberDecl::Field(v) => {
                    let kind = if v.is_static {
                        EntityKind::Variable
                    } else {
                        EntityKind::Field
                    };
                    self.visit_variable(id, v, kind, member.access);
                }
                CxxMemberDecl::Class(nested) => self.visit_class(id, nested, member.access),
                CxxMemberDecl::Enum(e) => self.visit_enum(id, e, member.access),
            }
        }
        self.scope.pop();
    }

    fn visit_function(
        &mut self,
        parent: EntityId,
        f: &CxxFunction,
        kind: EntityKind,
        access: Access,
    ) {
        let mut entity = self.named_entity(kind, &f.name, access);
        entity.ty = Some(f.return_type.clone());
        if access == Access::Private {
            entity.flags |= EntityFlags::EXCLUDED;
            self.attach(parent, entity);
            return;
        }
        if f.is_variadic {
            // No safe binding shape for variadic signatures.
            entity.flags |= EntityFlags::EXCLUDED;
        }
        let id = self.attach(parent, entity);

        self.scope.push(f.name.clone());
        for param in &f.params {
            let mut p = self.named_entity(EntityKind::Parameter, &param.name, Access::Public);
            p.ty = Some(param.ty.clone());
            p.source_default = param.default.clone();
            self.attach(id, p);
        }
        self.scope.pop();
    }

    fn visit_variable(
        &mut self,
        parent: EntityId,
        v: &CxxVariable,
        kind: EntityKind,
        access: Access,
    ) {
        let mut entity = self.named_entity(kind, &v.name, access);
        entity.ty = Some(v.ty.clone());
        entity.source_default = v.default.clone();
        if access == Access::Private {
            entity.flags |= EntityFlags::EXCLUDED;
        }
        self.attach(parent, entity);
    }

    fn visit_enum(&mut self, parent: EntityId, e: &CxxEnum, access: Access) {
        let mut entity = if e.is_anonymous() {
            // Anonymous enums get a synthetic-unique key so the symbol table
            // stays collision-free; the merge pass deals with them later.
            self.anonymous_counter += 1;
            let mut anon = MetaEntity::new(EntityKind::Enum, "");
            anon.unique_name = self.qualified(&format!("(anonymous#{})", self.anonymous_counter));
            anon.symbol_name = String::new();
            anon.file = Some(self.file.clone());
            anon.access = access;
            anon
        } else {
            self.named_entity(EntityKind::Enum, &e.name, access)
        };

        if access == Access::Private {
            entity.flags |= EntityFlags::EXCLUDED;
            self.attach(parent, entity);
            return;
        }

        let unique = entity.unique_name.clone();
        let id = self.attach(parent, entity);

        if !e.is_anonymous() && self.rules.includes_type(&unique) {
            let entry = TypeEntry::new(unique, TypeDisposition::Enumeration, true)
                .with_entity(id);
            if self.types.register(entry).is_ok() {
                self.types_registered += 1;
            }
        }

        // Enum values live in the enclosing scope in C; their qualified names
        // do not include the (possibly anonymous) enum itself.
        for value in &e.values {
            let mut v = self.named_entity(EntityKind::EnumValue, &value.name, Access::Public);
            v.source_default = value.value.clone();
            v.default_value = value.value.clone();
            self.attach(id, v);
        }
    }

    /// Create an entity with its qualified names and file filled in, and
    /// index it in the symbol table.
    fn named_entity(&mut self, kind: EntityKind, name: &str, access: Access) -> MetaEntity {
        let mut entity = MetaEntity::new(kind, name);
        entity.access = access;
        entity.unique_name = self.qualified(name);
        entity.symbol_name = entity.unique_name.replace("::", ".");
        entity.file = Some(self.file.clone());
        entity
    }

    fn attach(&mut self, parent: EntityId, entity: MetaEntity) -> EntityId {
        let unique = entity.unique_name.clone();
        let indexable = !matches!(entity.kind, EntityKind::Parameter) && !unique.is_empty();
        let id = self.arena.alloc(entity, parent);
        self.entities_created += 1;
        if indexable {
            // Overload sets collide on their qualified name; only the first
            // lands in the index.
            if self.symbols.insert(&unique, id).is_err() {
                log::debug!("symbol '{unique}' already indexed; overload left out");
            }
        }
        id
    }

    fn qualified(&self, name: &str) -> String {
        if self.scope.is_empty() {
            name.to_string()
        } else {
            format!("{}::{}", self.scope.join("::"), name)
        }
    }
}

fn class_has_default_ctor(class: &CxxClass) -> bool {
    let mut saw_ctor = false;
    for member in &class.members {
        if let CxxMemberDecl::Constructor(f) = &member.decl {
            saw_ctor = true;
            let required = f.params.iter().filter(|p| p.default.is_none()).count();
            if required == 0 && member.access == Access::Public {
                return true;
            }
        }
    }
    // No user constructor at all: the implicit default one exists.
    !saw_ctor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cxx::CxxParam;

    fn build(units: &[CxxUnit]) -> (EntityArena, SymbolTable, TypeRegistry) {
        let mut arena = EntityArena::new();
        let mut symbols = SymbolTable::new();
        let mut types = TypeRegistry::new();
        let rules = GeneratorRules::permissive();
        TreeBuilder::new(&mut arena, &mut symbols, &mut types, &rules).run(units);
        (arena, symbols, types)
    }

    fn method(f: CxxFunction) -> CxxMemberDecl {
        CxxMemberDecl::Method(f)
    }

    #[test]
    fn private_members_are_excluded_and_not_descended() {
        let class = CxxClass::new("Node")
            .with_member(
                Access::Private,
                method(
                    CxxFunction::new("Secret", TypeRef::named("void"))
                        .with_param(CxxParam::new("x", TypeRef::named("int"))),
                ),
            )
            .with_member(
                Access::Public,
                method(CxxFunction::new("Tick", TypeRef::named("void"))),
            );
        let unit = CxxUnit::new("Node").with_decl(CxxDecl::Class(class));
        let (arena, symbols, _) = build(&[unit]);

        let secret = symbols.get("Node::Secret").unwrap();
        assert!(!arena[secret].is_generated());
        // Subtree skipped: the parameter was never built.
        assert!(arena.children_of(secret).is_empty());

        let tick = symbols.get("Node::Tick").unwrap();
        assert!(arena[tick].is_generated());
    }

    #[test]
    fn virtual_and_protected_mark_class_for_proxy() {
        let virt = CxxClass::new("Component").with_member(
            Access::Public,
            method(CxxFunction::new("OnUpdate", TypeRef::named("void")).virtual_()),
        );
        let prot = CxxClass::new("Resource").with_member(
            Access::Protected,
            method(CxxFunction::new("Load", TypeRef::named("bool"))),
        );
        let plain = CxxClass::new("Plain").with_member(
            Access::Public,
            method(CxxFunction::new("Get", TypeRef::named("int"))),
        );
        let unit = CxxUnit::new("Core")
            .with_decl(CxxDecl::Class(virt))
            .with_decl(CxxDecl::Class(prot))
            .with_decl(CxxDecl::Class(plain));
        let (arena, symbols, _) = build(&[unit]);

        let needs_proxy = |name: &str| {
            arena[symbols.get(name).unwrap()]
                .flags
                .contains(EntityFlags::NEEDS_PROXY)
        };
        assert!(needs_proxy("Component"));
        assert!(needs_proxy("Resource"));
        assert!(!needs_proxy("Plain"));
    }

    #[test]
    fn variadic_functions_are_excluded() {
        let unit = CxxUnit::new("IO").with_decl(CxxDecl::Function(
            CxxFunction::new("Printf", TypeRef::named("void")).variadic(),
        ));
        let (arena, symbols, _) = build(&[unit]);
        assert!(!arena[symbols.get("Printf").unwrap()].is_generated());
    }

    #[test]
    fn included_classes_become_known_types() {
        let unit = CxxUnit::new("Scene").with_decl(CxxDecl::Namespace(
            crate::cxx::CxxNamespace::new("Engine")
                .with_decl(CxxDecl::Class(CxxClass::new("Node")))
                .with_decl(CxxDecl::Class(CxxClass::strukt("Vector3"))),
        ));
        let (_, _, types) = build(&[unit]);
        assert_eq!(
            types.get_by_name("Engine::Node").unwrap().disposition,
            TypeDisposition::Reference
        );
        assert_eq!(
            types.get_by_name("Engine::Vector3").unwrap().disposition,
            TypeDisposition::Value
        );
    }

    #[test]
    fn namespaces_are_reopenable_across_units() {
        let a = CxxUnit::new("A").with_decl(CxxDecl::Namespace(
            crate::cxx::CxxNamespace::new("Engine").with_decl(CxxDecl::Class(CxxClass::new("A"))),
        ));
        let b = CxxUnit::new("B").with_decl(CxxDecl::Namespace(
            crate::cxx::CxxNamespace::new("Engine").with_decl(CxxDecl::Class(CxxClass::new("B"))),
        ));
        let (arena, symbols, _) = build(&[a, b]);
        let ns = symbols.get("Engine").unwrap();
        assert_eq!(arena.children_of(ns).len(), 2);
        // Only one namespace entity under the root.
        assert_eq!(arena.children_of(arena.root()).len(), 1);
    }

    #[test]
    fn default_ctor_detection() {
        let explicit = CxxClass::new("A").with_member(
            Access::Public,
            CxxMemberDecl::Constructor(CxxFunction::new("A", TypeRef::named("void"))),
        );
        let required_arg = CxxClass::new("B").with_member(
            Access::Public,
            CxxMemberDecl::Constructor(
                CxxFunction::new("B", TypeRef::named("void"))
                    .with_param(CxxParam::new("x", TypeRef::named("int"))),
            ),
        );
        assert!(class_has_default_ctor(&explicit));
        assert!(!class_has_default_ctor(&required_arg));
        assert!(class_has_default_ctor(&CxxClass::new("C")));
    }
}
