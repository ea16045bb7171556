//! Default-value symbol resolution pass.
//!
//! A default that names a constant rather than a literal resolves to its
//! defining entity; the back-reference lets the printer emit a qualified
//! reference to the generated symbol instead of a raw token. Runs after the
//! anonymous-enum merge so references into merged enums land on the merge
//! target's values.

use sharpbind_core::{EntityId, EntityKind};

use crate::passes::{Pass, PassContext};

pub struct ResolveDefaultSymbolsPass;

impl Pass for ResolveDefaultSymbolsPass {
    fn name(&self) -> &'static str {
        "resolve-default-symbols"
    }

    fn enter(&mut self, ctx: &mut PassContext, id: EntityId) -> bool {
        let entity = &ctx.arena[id];
        if !matches!(
            entity.kind,
            EntityKind::Parameter | EntityKind::Variable | EntityKind::Field
        ) {
            return true;
        }
        let Some(source) = entity.source_default.as_deref() else {
            return true;
        };
        let Some(current) = entity.default_value.as_deref() else {
            return true;
        };
        // Only surviving identifier defaults carry a back-reference; the null
        // sentinel and rewritten literals do not denote a symbol.
        if current == "null" || !is_symbol_reference(source) {
            return true;
        }
        let source = source.to_string();
        let scope = ctx.scope_of(id);
        if let Some(symbol) = ctx.symbols.resolve_from(&scope, &source) {
            ctx.arena[id].default_symbol = Some(symbol);
        }
        true
    }
}

/// A bare identifier path (possibly `::`-qualified), as opposed to a literal
/// or an expression.
fn is_symbol_reference(text: &str) -> bool {
    !text.is_empty()
        && !text.starts_with(|c: char| c.is_ascii_digit() || c == '"' || c == '-')
        && text.split("::").all(|seg| {
            !seg.is_empty() && seg.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
        && !matches!(text, "true" | "false" | "nullptr" | "NULL")
}
