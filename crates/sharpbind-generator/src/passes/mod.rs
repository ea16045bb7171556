//! Generator passes.
//!
//! Each pass is a single-purpose transformation over the shared entity tree,
//! run in a fixed pipeline order (pre-order traversal with an explicit
//! container-exit event for passes needing two-phase processing per scope).
//! Passes run sequentially with no concurrent mutation; traversal order is
//! deterministic and later passes depend on earlier passes' output.
//!
//! Fixed order:
//!
//! 1. [`rename::RenamePass`] - target-convention names + symbol recompute
//! 2. [`move_globals::MoveGlobalsPass`] - namespaces to classes, globals into
//!    per-file synthetic classes
//! 3. [`defaults::ConvertDefaultsPass`] - default-value conversion
//! 4. [`const_override::ConstOverridePass`] - explicit default remap table
//! 5. [`flag_enums::DiscoverFlagEnumsPass`] - bitmask enum tagging
//! 6. [`event_defaults::EventDefaultsPass`] - event-name constant defaults
//! 7. [`merge_enums::MergeAnonymousEnumsPass`] - anonymous enum merging
//! 8. [`resolve_defaults::ResolveDefaultSymbolsPass`] - default back-refs
//! 9. [`bases::DiscoverBaseClassesPass`] - base-class lists + hierarchy graph

pub mod bases;
pub mod const_override;
pub mod defaults;
pub mod event_defaults;
pub mod flag_enums;
pub mod merge_enums;
pub mod move_globals;
pub mod rename;
pub mod resolve_defaults;

use sharpbind_core::{EntityArena, EntityFlags, EntityId};
use sharpbind_registry::{HierarchyGraph, SymbolTable, TypeRegistry};

use crate::rules::GeneratorRules;

/// Shared mutable state a pass operates on.
pub struct PassContext<'a> {
    pub arena: &'a mut EntityArena,
    pub symbols: &'a mut SymbolTable,
    pub types: &'a mut TypeRegistry,
    pub hierarchy: &'a mut HierarchyGraph,
    pub rules: &'a GeneratorRules,
}

impl PassContext<'_> {
    /// Source scope (`::`-qualified) an entity's unqualified references are
    /// resolved from.
    pub fn scope_of(&self, id: EntityId) -> String {
        let unique = &self.arena[id].unique_name;
        match unique.rfind("::") {
            Some(pos) => unique[..pos].to_string(),
            None => String::new(),
        }
    }
}

/// One tree-transformation stage.
///
/// `enter` runs pre-order and may veto descent into the subtree by returning
/// `false`; `leave` runs after a container's children (two-phase processing
/// per scope). `begin`/`finish` bracket the whole tree.
pub trait Pass {
    fn name(&self) -> &'static str;

    fn begin(&mut self, _ctx: &mut PassContext) {}

    fn enter(&mut self, _ctx: &mut PassContext, _id: EntityId) -> bool {
        true
    }

    fn leave(&mut self, _ctx: &mut PassContext, _id: EntityId) {}

    fn finish(&mut self, _ctx: &mut PassContext) {}
}

/// The ordered pass sequence. Pipeline order is data, not convention: the
/// standard order lives in [`Pipeline::standard`] and tests can compose
/// partial pipelines for isolation.
#[derive(Default)]
pub struct Pipeline {
    passes: Vec<Box<dyn Pass>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed standard order.
    pub fn standard() -> Self {
        Self::new()
            .with(rename::RenamePass)
            .with(move_globals::MoveGlobalsPass)
            .with(defaults::ConvertDefaultsPass)
            .with(const_override::ConstOverridePass)
            .with(flag_enums::DiscoverFlagEnumsPass)
            .with(event_defaults::EventDefaultsPass)
            .with(merge_enums::MergeAnonymousEnumsPass)
            .with(resolve_defaults::ResolveDefaultSymbolsPass)
            .with(bases::DiscoverBaseClassesPass)
    }

    pub fn with(mut self, pass: impl Pass + 'static) -> Self {
        self.passes.push(Box::new(pass));
        self
    }

    /// Run every pass, in order, over the full tree.
    pub fn run(&mut self, ctx: &mut PassContext) {
        let root = ctx.arena.root();
        for pass in &mut self.passes {
            log::debug!("running pass '{}'", pass.name());
            pass.begin(ctx);
            drive(pass.as_mut(), ctx, root);
            pass.finish(ctx);
        }
    }
}

/// Pre-order driver with container-exit events.
///
/// Child lists are snapshotted before descent so passes can reparent, remove,
/// and synthesize entities mid-walk. Suppressed subtrees are not traversed
/// for further generation decisions.
fn drive(pass: &mut dyn Pass, ctx: &mut PassContext, id: EntityId) {
    if ctx.arena.is_removed(id) {
        return;
    }
    if ctx.arena[id].flags.contains(EntityFlags::EXCLUDED) {
        return;
    }
    if !pass.enter(ctx, id) {
        return;
    }
    for child in ctx.arena.children_of(id) {
        drive(pass, ctx, child);
    }
    if !ctx.arena.is_removed(id) && ctx.arena[id].kind.is_container() {
        pass.leave(ctx, id);
    }
}
