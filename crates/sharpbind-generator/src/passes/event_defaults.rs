//! Event-default pass.
//!
//! Event-name constants follow a fixed source convention: a prefixed
//! string-hash constant immediately followed by the scope enumerating that
//! event's parameters (`E_COLLISIONSTART` then `namespace CollisionStart`).
//! The constant's default value becomes the sibling scope's name as a quoted
//! string, and the constant is flagged read-only (a string-hash is not a
//! target-language compile-time constant).

use sharpbind_core::{EntityFlags, EntityId, EntityKind};

use crate::passes::{Pass, PassContext};

pub struct EventDefaultsPass;

impl Pass for EventDefaultsPass {
    fn name(&self) -> &'static str {
        "event-defaults"
    }

    fn enter(&mut self, ctx: &mut PassContext, id: EntityId) -> bool {
        let entity = &ctx.arena[id];
        if !matches!(entity.kind, EntityKind::Variable | EntityKind::Field) {
            return true;
        }
        if !ctx.rules.is_event_constant(&entity.source_name) {
            return true;
        }
        let is_event_type = entity
            .ty
            .as_ref()
            .is_some_and(|t| t.name == ctx.rules.event_name_type);
        if !is_event_type {
            return true;
        }
        // By convention the immediately following sibling is the scope
        // holding this event's parameter constants. The move-globals pass may
        // already have reclassified it from namespace to class.
        let Some(sibling) = ctx.arena.next_sibling(id) else {
            return true;
        };
        if !matches!(
            ctx.arena[sibling].kind,
            EntityKind::Namespace | EntityKind::Class
        ) {
            return true;
        }
        let event_name = ctx.arena[sibling].name.clone();
        let entity = &mut ctx.arena[id];
        entity.default_value = Some(format!("\"{event_name}\""));
        entity.flags |= EntityFlags::READ_ONLY;
        true
    }
}
