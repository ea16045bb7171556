//! Input declaration model - parsed C++ translation units.
//!
//! The generator does not parse C++ itself; an external front end hands over
//! one [`CxxUnit`] per header with declarations already shaped. This module is
//! that handover format. After tree construction the generator never consults
//! it for identity again - only the entity tree's own bookkeeping fields feed
//! later passes.

use sharpbind_core::{Access, TypeRef};

/// One parsed translation unit (header).
#[derive(Debug, Clone, Default)]
pub struct CxxUnit {
    /// Header file stem (e.g. "MathDefs" for MathDefs.h).
    pub file: String,
    pub decls: Vec<CxxDecl>,
}

impl CxxUnit {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            decls: Vec::new(),
        }
    }

    pub fn with_decl(mut self, decl: CxxDecl) -> Self {
        self.decls.push(decl);
        self
    }
}

/// A top-level or namespace-scope declaration.
#[derive(Debug, Clone)]
pub enum CxxDecl {
    Namespace(CxxNamespace),
    Class(CxxClass),
    Enum(CxxEnum),
    Function(CxxFunction),
    Variable(CxxVariable),
    Alias(CxxAlias),
}

#[derive(Debug, Clone)]
pub struct CxxNamespace {
    pub name: String,
    pub decls: Vec<CxxDecl>,
}

impl CxxNamespace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            decls: Vec::new(),
        }
    }

    pub fn with_decl(mut self, decl: CxxDecl) -> Self {
        self.decls.push(decl);
        self
    }
}

/// A class or struct definition with its member list.
///
/// Members carry their resolved access specifier; the front end has already
/// flattened `public:`/`protected:`/`private:` runs.
#[derive(Debug, Clone)]
pub struct CxxClass {
    pub name: String,
    pub is_struct: bool,
    /// Textual base-class references, in declaration order.
    pub bases: Vec<String>,
    pub members: Vec<CxxMember>,
}

impl CxxClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_struct: false,
            bases: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn strukt(name: impl Into<String>) -> Self {
        Self {
            is_struct: true,
            ..Self::new(name)
        }
    }

    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.bases.push(base.into());
        self
    }

    pub fn with_member(mut self, access: Access, decl: CxxMemberDecl) -> Self {
        self.members.push(CxxMember { access, decl });
        self
    }
}

#[derive(Debug, Clone)]
pub struct CxxMember {
    pub access: Access,
    pub decl: CxxMemberDecl,
}

#[derive(Debug, Clone)]
pub enum CxxMemberDecl {
    Method(CxxFunction),
    Constructor(CxxFunction),
    Field(CxxVariable),
    Class(CxxClass),
    Enum(CxxEnum),
}

/// A free function or member function signature.
#[derive(Debug, Clone)]
pub struct CxxFunction {
    pub name: String,
    pub return_type: TypeRef,
    pub params: Vec<CxxParam>,
    pub is_virtual: bool,
    pub is_variadic: bool,
    pub is_static: bool,
}

impl CxxFunction {
    pub fn new(name: impl Into<String>, return_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            return_type,
            params: Vec::new(),
            is_virtual: false,
            is_variadic: false,
            is_static: false,
        }
    }

    pub fn with_param(mut self, param: CxxParam) -> Self {
        self.params.push(param);
        self
    }

    pub fn virtual_(mut self) -> Self {
        self.is_virtual = true;
        self
    }

    pub fn variadic(mut self) -> Self {
        self.is_variadic = true;
        self
    }

    pub fn static_(mut self) -> Self {
        self.is_static = true;
        self
    }
}

#[derive(Debug, Clone)]
pub struct CxxParam {
    pub name: String,
    pub ty: TypeRef,
    /// Textual default expression, exactly as written in the source.
    pub default: Option<String>,
}

impl CxxParam {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// A free variable, static constant, or member field.
#[derive(Debug, Clone)]
pub struct CxxVariable {
    pub name: String,
    pub ty: TypeRef,
    pub default: Option<String>,
    pub is_static: bool,
}

impl CxxVariable {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
            is_static: false,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn static_(mut self) -> Self {
        self.is_static = true;
        self
    }
}

/// An enum definition. Anonymous enums have an empty name.
#[derive(Debug, Clone)]
pub struct CxxEnum {
    pub name: String,
    pub values: Vec<CxxEnumValue>,
}

impl CxxEnum {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn anonymous() -> Self {
        Self::new("")
    }

    pub fn with_value(mut self, name: impl Into<String>, value: Option<&str>) -> Self {
        self.values.push(CxxEnumValue {
            name: name.into(),
            value: value.map(str::to_string),
        });
        self
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct CxxEnumValue {
    pub name: String,
    pub value: Option<String>,
}

/// A type alias (`using X = Y;`). The underlying type is kept textual.
#[derive(Debug, Clone)]
pub struct CxxAlias {
    pub name: String,
    pub underlying: String,
}

impl CxxAlias {
    pub fn new(name: impl Into<String>, underlying: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            underlying: underlying.into(),
        }
    }
}
