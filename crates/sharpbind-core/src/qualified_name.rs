use std::fmt;

/// Qualified name for declaration identity during generation.
///
/// The generator tracks two spellings of every symbol: the original
/// `::`-separated C++ path and the generated `.`-separated C# path. This type
/// is the shared splitting/joining machinery for both.
///
/// # Examples
///
/// ```
/// use sharpbind_core::QualifiedName;
///
/// let node = QualifiedName::from_qualified_string("Scene::Node");
/// assert_eq!(node.to_string(), "Scene::Node");
/// assert_eq!(node.dotted(), "Scene.Node");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    /// Simple name (e.g., "Node", "SetName").
    pub name: String,
    /// Enclosing scope path (e.g., ["Scene"]). Empty for the global scope.
    pub scope: Vec<String>,
}

impl QualifiedName {
    /// Create a new qualified name with an explicit scope path.
    pub fn new(name: impl Into<String>, scope: Vec<String>) -> Self {
        Self {
            name: name.into(),
            scope,
        }
    }

    /// Create a qualified name in the global scope.
    pub fn global(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope: Vec::new(),
        }
    }

    /// Create from a `::`-qualified string (e.g., "Scene::Node").
    ///
    /// The last segment is the name, the rest the scope. A leading `::`
    /// (absolute path) is normalized away.
    pub fn from_qualified_string(s: &str) -> Self {
        let parts: Vec<&str> = s.split("::").filter(|p| !p.is_empty()).collect();
        if parts.is_empty() {
            Self::global("")
        } else if parts.len() == 1 {
            Self::global(parts[0])
        } else {
            let name = parts[parts.len() - 1].to_string();
            let scope = parts[..parts.len() - 1]
                .iter()
                .map(|s| s.to_string())
                .collect();
            Self { name, scope }
        }
    }

    /// Check if this is in the global scope.
    pub fn is_global(&self) -> bool {
        self.scope.is_empty()
    }

    /// Get the simple (unqualified) name.
    pub fn simple_name(&self) -> &str {
        &self.name
    }

    /// The `.`-separated rendering used on the generated C# side.
    pub fn dotted(&self) -> String {
        if self.scope.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.scope.join("."), self.name)
        }
    }

    /// Create a child name within this scope.
    ///
    /// Example: `Scene::Node` + `SetName` = `Scene::Node::SetName`.
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut scope = self.scope.clone();
        scope.push(self.name.clone());
        Self {
            name: name.into(),
            scope,
        }
    }

    /// Get the parent scope as a QualifiedName (if any).
    pub fn parent(&self) -> Option<Self> {
        let (last, rest) = self.scope.split_last()?;
        Some(Self {
            name: last.clone(),
            scope: rest.to_vec(),
        })
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scope.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}::{}", self.scope.join("::"), self.name)
        }
    }
}

impl From<&str> for QualifiedName {
    fn from(s: &str) -> Self {
        Self::from_qualified_string(s)
    }
}

impl From<String> for QualifiedName {
    fn from(s: String) -> Self {
        Self::from_qualified_string(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_name() {
        let name = QualifiedName::global("Node");
        assert!(name.is_global());
        assert_eq!(name.to_string(), "Node");
        assert_eq!(name.dotted(), "Node");
    }

    #[test]
    fn scoped_name() {
        let name = QualifiedName::new("Node", vec!["Engine".into(), "Scene".into()]);
        assert_eq!(name.to_string(), "Engine::Scene::Node");
        assert_eq!(name.dotted(), "Engine.Scene.Node");
    }

    #[test]
    fn from_qualified_string() {
        let name = QualifiedName::from_qualified_string("Engine::Scene::Node");
        assert_eq!(name.name, "Node");
        assert_eq!(name.scope, vec!["Engine", "Scene"]);

        let absolute = QualifiedName::from_qualified_string("::Engine::Node");
        assert_eq!(absolute, QualifiedName::from_qualified_string("Engine::Node"));
    }

    #[test]
    fn child_and_parent() {
        let class = QualifiedName::from_qualified_string("Scene::Node");
        let method = class.child("SetName");
        assert_eq!(method.to_string(), "Scene::Node::SetName");
        assert_eq!(method.parent().unwrap(), class);

        assert!(QualifiedName::global("Node").parent().is_none());
    }
}
