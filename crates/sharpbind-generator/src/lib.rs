//! sharpbind-generator: C++ declarations in, C# wrapper declarations out.
//!
//! Control flow: parsed headers ([`cxx::CxxUnit`]) -> entity-tree builder ->
//! ordered pass pipeline (each pass mutates/annotates the tree) -> code
//! printer -> generated wrapper source. The pipeline order is fixed; see
//! [`passes`].

pub mod builder;
pub mod cxx;
pub mod emit;
pub mod passes;
pub mod printer;
pub mod rules;

pub use builder::{BuildOutput, TreeBuilder};
pub use emit::{GeneratedUnit, emit_units};
pub use passes::{Pass, PassContext, Pipeline};
pub use printer::CodePrinter;
pub use rules::GeneratorRules;

use sharpbind_core::{EntityArena, GeneratorError};
use sharpbind_registry::{HierarchyGraph, SymbolTable, TypeRegistry};

use crate::cxx::CxxUnit;

/// Result of a full generation run, with the transformed tree and registries
/// exposed for inspection and for the runtime registration tooling.
pub struct Generation {
    pub arena: EntityArena,
    pub symbols: SymbolTable,
    pub types: TypeRegistry,
    pub hierarchy: HierarchyGraph,
    pub units: Vec<GeneratedUnit>,
    pub build: BuildOutput,
}

/// The binding generator: rules in, wrapper source out.
pub struct Generator {
    rules: GeneratorRules,
}

impl Generator {
    pub fn new(rules: GeneratorRules) -> Self {
        Self { rules }
    }

    /// Load the rules document from JSON and build a generator.
    pub fn from_rules_json(text: &str) -> Result<Self, GeneratorError> {
        Ok(Self::new(GeneratorRules::from_json(text)?))
    }

    /// Run the full pipeline over the given translation units.
    pub fn run(&self, units: &[CxxUnit]) -> Generation {
        let mut arena = EntityArena::new();
        let mut symbols = SymbolTable::new();
        let mut types = TypeRegistry::new();
        let mut hierarchy = HierarchyGraph::new();

        let build =
            TreeBuilder::new(&mut arena, &mut symbols, &mut types, &self.rules).run(units);

        let mut ctx = PassContext {
            arena: &mut arena,
            symbols: &mut symbols,
            types: &mut types,
            hierarchy: &mut hierarchy,
            rules: &self.rules,
        };
        Pipeline::standard().run(&mut ctx);

        let units = emit_units(&arena);
        Generation {
            arena,
            symbols,
            types,
            hierarchy,
            units,
            build,
        }
    }
}
