//! Base-class discovery pass.
//!
//! Matches each class's textual base references against the known-type
//! registry and populates the entity's resolved base list plus the hierarchy
//! graph. Bases that are not part of the bound type surface are skipped - the
//! wrapper simply does not inherit them.

use sharpbind_core::{EntityId, EntityKind, TypeHash};

use crate::passes::{Pass, PassContext};

pub struct DiscoverBaseClassesPass;

impl Pass for DiscoverBaseClassesPass {
    fn name(&self) -> &'static str {
        "discover-base-classes"
    }

    fn enter(&mut self, ctx: &mut PassContext, id: EntityId) -> bool {
        let entity = &ctx.arena[id];
        if !matches!(entity.kind, EntityKind::Class | EntityKind::Struct)
            || entity.source_bases.is_empty()
        {
            return true;
        }
        let derived_hash = TypeHash::from_name(&entity.unique_name);
        let bases = entity.source_bases.clone();
        let scope = ctx.scope_of(id);

        for base in bases {
            let Some(entry) = ctx.types.resolve_from(&scope, &base) else {
                log::debug!(
                    "base '{base}' of '{}' is outside the bound surface; skipped",
                    ctx.arena[id].unique_name
                );
                continue;
            };
            let base_hash = entry.hash;
            let base_entity = entry.entity;
            ctx.hierarchy.add_derives(derived_hash, base_hash);
            if let Some(base_id) = base_entity {
                ctx.arena[id].bases.push(base_id);
            }
        }
        true
    }
}
