//! Move-globals pass.
//!
//! The target binding model has no free-function concept, so:
//!
//! - namespaces containing free functions or variables are reclassified as
//!   classes, and
//! - free functions/variables in the top-level namespace are relocated into a
//!   synthetic class named after their source file, looked up or created
//!   idempotently through the symbol table (exactly one synthetic class per
//!   source file, however many runs touch it).

use sharpbind_core::{EntityId, EntityKind, MetaEntity};

use crate::passes::rename::{recompute_symbols_recursive, split_words, to_pascal_case};
use crate::passes::{Pass, PassContext};

pub struct MoveGlobalsPass;

impl Pass for MoveGlobalsPass {
    fn name(&self) -> &'static str {
        "move-globals"
    }

    fn enter(&mut self, ctx: &mut PassContext, id: EntityId) -> bool {
        let kind = ctx.arena[id].kind;
        match kind {
            EntityKind::Namespace => {
                let has_free_members = ctx.arena.children_of(id).iter().any(|c| {
                    matches!(
                        ctx.arena[*c].kind,
                        EntityKind::Function | EntityKind::Variable
                    )
                });
                if has_free_members {
                    log::debug!(
                        "reclassifying namespace '{}' as class",
                        ctx.arena[id].unique_name
                    );
                    ctx.arena[id].kind = EntityKind::Class;
                }
                true
            }
            EntityKind::Function | EntityKind::Variable => {
                let root = ctx.arena.root();
                if ctx.arena[id].parent == Some(root) {
                    self.relocate(ctx, id, root);
                }
                true
            }
            _ => true,
        }
    }
}

impl MoveGlobalsPass {
    fn relocate(&self, ctx: &mut PassContext, id: EntityId, root: EntityId) {
        let Some(file) = ctx.arena[id].file.clone() else {
            // Nothing to name a wrapper class after; leave the entity alone.
            return;
        };
        let class_name = to_pascal_case(&split_words(&file));
        let build_name = class_name.clone();
        let class_id =
            ctx.symbols
                .get_or_create_synthetic(ctx.arena, root, &class_name, move || {
                    let mut class = MetaEntity::synthetic(EntityKind::Class, build_name);
                    class.symbol_name = class.name.clone();
                    class.file = Some(file);
                    class
                });
        ctx.arena.reparent(id, class_id);
        recompute_symbols_recursive(ctx.arena, id);
    }
}
