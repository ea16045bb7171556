//! MetaEntity - one source declaration plus generation metadata.
//!
//! The generator never consults the C++ declaration model for identity after
//! the tree is built: the fields here are the single source of truth for every
//! downstream pass and for the emitter. Each entity carries four name forms:
//!
//! - `name`: the generated-language local name (mutated by the rename pass)
//! - `source_name`: the original C++ local name (never mutated)
//! - `symbol_name`: the fully qualified generated symbol, `.`-separated
//! - `unique_name`: the fully qualified source symbol, `::`-separated; this is
//!   the stable key in the symbol table

use bitflags::bitflags;

use crate::arena::EntityId;

/// Category of a source declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// The invisible tree root (the global scope).
    Root,
    Namespace,
    Class,
    Struct,
    Enum,
    EnumValue,
    /// Free function.
    Function,
    /// Member function.
    Method,
    Constructor,
    /// Free variable or static class constant.
    Variable,
    /// Non-static member variable.
    Field,
    Parameter,
    /// Type alias (`using X = Y;`).
    Alias,
}

impl EntityKind {
    /// Kinds that open a scope the tree walk reports an explicit exit event
    /// for. Functions count: parameter lists are two-phase processed by the
    /// default-conversion pass.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            EntityKind::Root
                | EntityKind::Namespace
                | EntityKind::Class
                | EntityKind::Struct
                | EntityKind::Enum
                | EntityKind::Function
                | EntityKind::Method
                | EntityKind::Constructor
        )
    }

    /// Kinds that declare a type.
    pub fn is_type(&self) -> bool {
        matches!(
            self,
            EntityKind::Class | EntityKind::Struct | EntityKind::Enum | EntityKind::Alias
        )
    }

    /// Kinds with a callable signature.
    pub fn is_callable(&self) -> bool {
        matches!(
            self,
            EntityKind::Function | EntityKind::Method | EntityKind::Constructor
        )
    }
}

/// Access level of a member, as written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Access {
    #[default]
    Public,
    Protected,
    Private,
}

bitflags! {
    /// Generation hints accumulated by the builder and the passes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct EntityFlags: u32 {
        /// Suppressed from generated output entirely.
        const EXCLUDED = 1 << 0;
        /// Emitted as a read-only member (value not compile-time constant
        /// in the target language).
        const READ_ONLY = 1 << 1;
        /// The AST default value must not be carried into the wrapper.
        const IGNORE_DEFAULT = 1 << 2;
        /// Class needs a virtual-dispatch wrapper subclass so managed
        /// overrides are reachable from native calls.
        const NEEDS_PROXY = 1 << 3;
        /// Entity was synthesized by a pass, not read from the source.
        const SYNTHETIC = 1 << 4;
    }
}

/// A C++ type reference as attached to parameters, variables, and returns.
///
/// Only the qualifiers the binding shape cares about are modeled; the name is
/// kept textual and resolved against the type registry on demand.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeRef {
    /// Unqualified-of-cv type name, possibly `::`-qualified (e.g.
    /// "Scene::Node", "unsigned").
    pub name: String,
    pub is_const: bool,
    pub is_pointer: bool,
    pub is_reference: bool,
}

impl TypeRef {
    /// A plain by-value reference to a named type.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn const_ref(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_const: true,
            is_reference: true,
            ..Self::default()
        }
    }

    pub fn pointer(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_pointer: true,
            ..Self::default()
        }
    }

    /// The C# spelling of this type.
    ///
    /// Builtins map to their C# keywords; everything else keeps its name with
    /// `::` rewritten to `.`.
    pub fn target_name(&self) -> String {
        match self.name.as_str() {
            "void" => "void".into(),
            "bool" => "bool".into(),
            "char" => "char".into(),
            "int" | "long" => "int".into(),
            "long long" => "long".into(),
            "unsigned" | "unsigned int" | "unsigned long" => "uint".into(),
            "unsigned long long" => "ulong".into(),
            "short" => "short".into(),
            "unsigned short" => "ushort".into(),
            "signed char" => "sbyte".into(),
            "unsigned char" => "byte".into(),
            "float" => "float".into(),
            "double" => "double".into(),
            "String" | "string" => "string".into(),
            other => other.replace("::", "."),
        }
    }
}

/// One source declaration plus generation metadata.
///
/// Created once during tree construction (one per interesting declaration) or
/// synthesized by a pass (at most once per synthetic key, enforced by the
/// symbol table). Suppression marks the entity removed rather than destroying
/// it; storage lives until the arena is torn down.
#[derive(Debug, Clone)]
pub struct MetaEntity {
    pub kind: EntityKind,
    pub access: Access,

    /// Generated-language local name.
    pub name: String,
    /// Original source local name. Empty for anonymous declarations.
    pub source_name: String,
    /// Fully qualified generated symbol (`.`-separated).
    pub symbol_name: String,
    /// Fully qualified source symbol (`::`-separated); symbol-table key.
    pub unique_name: String,

    /// Target-language textual default (converted by the default passes).
    pub default_value: Option<String>,
    /// Original C++ default expression, kept for in-body construction when
    /// the converted default is the null sentinel.
    pub source_default: Option<String>,
    /// Back-reference to the defining entity when the default names a
    /// constant rather than a literal.
    pub default_symbol: Option<EntityId>,

    pub flags: EntityFlags,
    /// Free-form tags consumed by the emitter (e.g. "Flags").
    pub attributes: Vec<String>,

    /// Ordered owned children. Insertion order is significant: it encodes
    /// parameter order and enum value order.
    pub children: Vec<EntityId>,
    pub parent: Option<EntityId>,

    /// Originating header file stem, when known.
    pub file: Option<String>,
    /// Declared type for parameters/variables/fields, or the return type for
    /// callables.
    pub ty: Option<TypeRef>,
    /// Textual base-class references on classes, consumed by base discovery.
    pub source_bases: Vec<String>,
    /// Resolved base classes (populated by the base-discovery pass).
    pub bases: Vec<EntityId>,
}

impl MetaEntity {
    /// Create an entity for a named source declaration. The generated name
    /// starts equal to the source name; the rename pass rewrites it.
    pub fn new(kind: EntityKind, source_name: impl Into<String>) -> Self {
        let source_name = source_name.into();
        Self {
            kind,
            access: Access::Public,
            name: source_name.clone(),
            source_name,
            symbol_name: String::new(),
            unique_name: String::new(),
            default_value: None,
            source_default: None,
            default_symbol: None,
            flags: EntityFlags::empty(),
            attributes: Vec::new(),
            children: Vec::new(),
            parent: None,
            file: None,
            ty: None,
            source_bases: Vec::new(),
            bases: Vec::new(),
        }
    }

    /// Create a pass-synthesized entity. Synthetic entities have no source
    /// spelling of their own; the generated name is authoritative.
    pub fn synthetic(kind: EntityKind, name: impl Into<String>) -> Self {
        let name = name.into();
        let mut entity = Self::new(kind, name.clone());
        entity.name = name;
        entity.flags |= EntityFlags::SYNTHETIC;
        entity
    }

    /// Whether this entity is anonymous in the source.
    pub fn is_anonymous(&self) -> bool {
        self.source_name.is_empty()
    }

    /// Whether generated output should include this entity.
    pub fn is_generated(&self) -> bool {
        !self.flags.contains(EntityFlags::EXCLUDED)
    }

    /// Tag with a free-form attribute, once.
    pub fn add_attribute(&mut self, attr: impl Into<String>) {
        let attr = attr.into();
        if !self.attributes.iter().any(|a| *a == attr) {
            self.attributes.push(attr);
        }
    }

    pub fn has_attribute(&self, attr: &str) -> bool {
        self.attributes.iter().any(|a| a == attr)
    }
}
