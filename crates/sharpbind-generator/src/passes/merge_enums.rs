//! Anonymous-enum merge pass.
//!
//! Anonymous enums (common when mirroring third-party C enums) cannot be
//! emitted as-is. Empty ones are deleted. Non-empty ones are merged by
//! member-name-prefix heuristic into a single named target enum, looked up or
//! created idempotently through the symbol table. The first merged value gets
//! an explicit `= 0` if it lacked one, keeping numbering stable once merged.
//! An unrecognized prefix logs a warning and removes the enum.

use sharpbind_core::{EntityId, EntityKind, MetaEntity};
use sharpbind_registry::{TypeDisposition, TypeEntry};

use crate::passes::rename::recompute_symbol;
use crate::passes::{Pass, PassContext};

pub struct MergeAnonymousEnumsPass;

impl Pass for MergeAnonymousEnumsPass {
    fn name(&self) -> &'static str {
        "merge-anonymous-enums"
    }

    fn enter(&mut self, ctx: &mut PassContext, id: EntityId) -> bool {
        let entity = &ctx.arena[id];
        if entity.kind != EntityKind::Enum || !entity.is_anonymous() {
            return true;
        }

        let members = ctx.arena.children_of(id);
        if members.is_empty() {
            ctx.arena.remove(id);
            return false;
        }

        let prefix = member_prefix(&ctx.arena[members[0]].source_name);
        let Some(target_name) = ctx.rules.enum_prefixes.get(prefix).cloned() else {
            log::warn!(
                "unrecognized anonymous enum prefix '{prefix}' in '{}'; enum dropped",
                ctx.arena[id].unique_name
            );
            ctx.arena.remove(id);
            return false;
        };

        let scope = ctx.scope_of(id);
        let target_unique = if scope.is_empty() {
            target_name.clone()
        } else {
            format!("{scope}::{target_name}")
        };
        let parent = ctx.arena[id]
            .parent
            .expect("anonymous enum always has a parent");
        let file = ctx.arena[id].file.clone();
        let target = ctx
            .symbols
            .get_or_create_synthetic(ctx.arena, parent, &target_unique, move || {
                let mut target = MetaEntity::synthetic(EntityKind::Enum, target_name);
                target.file = file;
                target
            });
        recompute_symbol(ctx.arena, target);

        let first_merge = ctx.arena.children_of(target).is_empty();
        for (i, member) in members.iter().enumerate() {
            ctx.arena.reparent(*member, target);
            recompute_symbol(ctx.arena, *member);
            if i == 0 && first_merge && ctx.arena[*member].default_value.is_none() {
                ctx.arena[*member].default_value = Some("0".into());
            }
        }
        ctx.arena.remove(id);

        // The merged enum is part of the bound surface. A second merge into
        // the same target finds it already registered.
        let entry = TypeEntry::new(target_unique, TypeDisposition::Enumeration, true)
            .with_entity(target);
        let _ = ctx.types.register(entry);
        false
    }
}

/// Heuristic member prefix: the text before the first underscore.
fn member_prefix(member_name: &str) -> &str {
    match member_name.find('_') {
        Some(pos) => &member_name[..pos],
        None => member_name,
    }
}
