//! Class-hierarchy graph over the bound type surface.
//!
//! Uses `petgraph::DiGraph` with:
//! - Nodes: [`TypeHash`] of a known type
//! - Edges: `Derives` from derived class to base class
//!
//! Populated by the base-discovery pass; consulted by the emitter (base list
//! of a wrapper class) and by runtime type-info checks.

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use rustc_hash::FxHashMap;

use sharpbind_core::TypeHash;

/// Edge type in the hierarchy graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HierarchyEdge {
    /// Source type derives from target type.
    Derives,
}

/// Directed graph of Derives relations between known types.
#[derive(Debug, Default)]
pub struct HierarchyGraph {
    graph: DiGraph<TypeHash, HierarchyEdge>,
    /// Reverse index: hash -> node, built as types are touched.
    nodes: FxHashMap<TypeHash, NodeIndex>,
}

impl HierarchyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn node(&mut self, hash: TypeHash) -> NodeIndex {
        if let Some(node) = self.nodes.get(&hash) {
            return *node;
        }
        let node = self.graph.add_node(hash);
        self.nodes.insert(hash, node);
        node
    }

    /// Record that `derived` derives from `base`. Repeated records are
    /// collapsed to one edge.
    pub fn add_derives(&mut self, derived: TypeHash, base: TypeHash) {
        let d = self.node(derived);
        let b = self.node(base);
        if !self.graph.edges(d).any(|e| e.target() == b) {
            self.graph.add_edge(d, b, HierarchyEdge::Derives);
        }
    }

    /// Direct bases of a type, in insertion order.
    pub fn bases_of(&self, derived: TypeHash) -> Vec<TypeHash> {
        let Some(node) = self.nodes.get(&derived) else {
            return Vec::new();
        };
        // petgraph iterates outgoing edges most-recent-first; reverse to
        // recover declaration order.
        let mut bases: Vec<TypeHash> = self
            .graph
            .edges_directed(*node, Direction::Outgoing)
            .map(|e| self.graph[e.target()])
            .collect();
        bases.reverse();
        bases
    }

    /// Whether `derived` transitively derives from `base`.
    pub fn is_derived_from(&self, derived: TypeHash, base: TypeHash) -> bool {
        if derived == base {
            return false;
        }
        let mut stack = vec![derived];
        while let Some(current) = stack.pop() {
            for parent in self.bases_of(current) {
                if parent == base {
                    return true;
                }
                stack.push(parent);
            }
        }
        false
    }

    pub fn is_empty(&self) -> bool {
        self.graph.edge_count() == 0
    }
}
