//! Default-value conversion pass.
//!
//! Resolves every parameter/variable default against the target language's
//! capabilities:
//!
//! - string-literal sentinels (`String::EMPTY`, `String()`) become the target
//!   empty-string literal `""`
//! - defaults on value types that cannot be expressed as compile-time
//!   defaults are suppressed ("no default")
//! - defaults requiring a non-trivial constructor become the `null` sentinel;
//!   the wrapper body constructs the real default when it observes null (the
//!   original expression stays in `source_default` for that purpose)
//! - scope separators in surviving textual defaults are rewritten (`::` to
//!   `.`)
//!
//! Because the target language requires default parameters to form a
//! contiguous trailing run, a suppressed default poisons the rest of its
//! parameter list: the scope-exit phase cascades the suppression forward and
//! then walks the list in reverse to clear any default stranded ahead of a
//! now-required parameter.

use sharpbind_core::{EntityFlags, EntityId, EntityKind, TypeRef};
use sharpbind_registry::TypeDisposition;

use crate::passes::{Pass, PassContext};

pub struct ConvertDefaultsPass;

impl Pass for ConvertDefaultsPass {
    fn name(&self) -> &'static str {
        "convert-defaults"
    }

    fn enter(&mut self, ctx: &mut PassContext, id: EntityId) -> bool {
        let entity = &ctx.arena[id];
        if !matches!(
            entity.kind,
            EntityKind::Parameter | EntityKind::Variable | EntityKind::Field
        ) {
            return true;
        }
        let Some(source) = entity.source_default.clone() else {
            return true;
        };
        if entity.flags.contains(EntityFlags::IGNORE_DEFAULT) {
            ctx.arena[id].default_value = None;
            return true;
        }
        let ty = entity.ty.clone();
        let scope = ctx.scope_of(id);
        let converted = convert_default(ctx, &scope, ty.as_ref(), &source);
        ctx.arena[id].default_value = converted;
        true
    }

    fn leave(&mut self, ctx: &mut PassContext, id: EntityId) {
        if !ctx.arena[id].kind.is_callable() {
            return;
        }
        let params: Vec<EntityId> = ctx
            .arena
            .children_of(id)
            .into_iter()
            .filter(|c| ctx.arena[*c].kind == EntityKind::Parameter)
            .collect();

        // Forward cascade: everything after the first suppressed default
        // loses its default too.
        let first_suppressed = params.iter().position(|p| {
            let e = &ctx.arena[*p];
            e.source_default.is_some() && e.default_value.is_none()
        });
        if let Some(pos) = first_suppressed {
            for p in &params[pos..] {
                ctx.arena[*p].default_value = None;
            }
        }

        // Reverse walk: a default ahead of any defaultless parameter cannot
        // survive either, or the surviving run would not be trailing.
        let mut tail_ok = true;
        for p in params.iter().rev() {
            if !tail_ok {
                ctx.arena[*p].default_value = None;
            } else if ctx.arena[*p].default_value.is_none() {
                tail_ok = false;
            }
        }
    }
}

/// Convert one textual default. `None` means "no default".
fn convert_default(
    ctx: &PassContext,
    scope: &str,
    ty: Option<&TypeRef>,
    source: &str,
) -> Option<String> {
    let text = source.trim();
    if text.is_empty() {
        return None;
    }

    // String-literal sentinels.
    if let Some(ty) = ty
        && ty.target_name() == "string"
        && matches!(text, "String::EMPTY" | "String()" | "\"\"")
    {
        return Some("\"\"".into());
    }

    if text == "nullptr" || text == "NULL" {
        return Some("null".into());
    }

    if is_literal(text) {
        return Some(text.to_string());
    }

    // Typed decisions need the parameter's own type resolved against the
    // bound surface.
    if let Some(ty) = ty
        && let Some(entry) = ctx.types.resolve_from(scope, &ty.name)
        && entry.disposition == TypeDisposition::Value
    {
        // A value type without compile-time construction in the target
        // language carries no default at all.
        return None;
    }

    if is_call_expr(text) {
        // Non-trivial construction: the wrapper body builds the real default
        // when it sees the null sentinel.
        return Some("null".into());
    }

    if is_identifier_path(text) {
        return Some(text.replace("::", "."));
    }

    log::debug!("unmappable default '{text}' suppressed");
    None
}

/// Lexically a literal the target language accepts as a compile-time default.
pub fn is_literal(text: &str) -> bool {
    is_numeric_literal(text)
        || is_quoted_string(text)
        || matches!(text, "true" | "false" | "null")
}

pub fn is_numeric_literal(text: &str) -> bool {
    let t = text.strip_prefix('-').unwrap_or(text);
    if let Some(hex) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        return !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    let t = t
        .strip_suffix('f')
        .or_else(|| t.strip_suffix('F'))
        .or_else(|| t.strip_suffix('u'))
        .or_else(|| t.strip_suffix('U'))
        .unwrap_or(t);
    !t.is_empty()
        && t.chars().all(|c| c.is_ascii_digit() || c == '.')
        && t.chars().filter(|c| *c == '.').count() <= 1
}

pub fn is_quoted_string(text: &str) -> bool {
    text.len() >= 2 && text.starts_with('"') && text.ends_with('"')
}

fn is_call_expr(text: &str) -> bool {
    text.ends_with(')')
        && text.find('(').is_some_and(|pos| {
            pos > 0 && is_identifier_path(&text[..pos])
        })
}

fn is_identifier_path(text: &str) -> bool {
    !text.is_empty()
        && text.split("::").all(|seg| {
            !seg.is_empty()
                && seg
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
                && !seg.starts_with(|c: char| c.is_ascii_digit())
        })
}
