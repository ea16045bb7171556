//! Constant override pass.
//!
//! Applies the explicit default-value remap table (keyed by fully qualified
//! source symbol). A replacement that is not lexically a numeral, hex
//! literal, or quoted string is assumed not to be compile-time-constant
//! representable in the target language, so the entity is flagged read-only.
//! Symbols on the force-constant list stay compile-time constants regardless.

use sharpbind_core::{EntityFlags, EntityId};

use crate::passes::defaults::{is_numeric_literal, is_quoted_string};
use crate::passes::{Pass, PassContext};

pub struct ConstOverridePass;

impl Pass for ConstOverridePass {
    fn name(&self) -> &'static str {
        "const-override"
    }

    fn enter(&mut self, ctx: &mut PassContext, id: EntityId) -> bool {
        let unique = &ctx.arena[id].unique_name;
        let Some(replacement) = ctx.rules.default_overrides.get(unique) else {
            return true;
        };
        let replacement = replacement.clone();
        let forced = ctx.rules.force_constants.iter().any(|f| f == unique);
        let entity = &mut ctx.arena[id];
        if !is_numeric_literal(&replacement) && !is_quoted_string(&replacement) && !forced {
            entity.flags |= EntityFlags::READ_ONLY;
        }
        entity.default_value = Some(replacement);
        true
    }
}
