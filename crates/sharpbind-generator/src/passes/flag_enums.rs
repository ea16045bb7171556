//! Flag-enum discovery pass.
//!
//! Enums introduced via a type alias wrapping the flag-set helper template
//! (`using AbcFlagSet = FlagSet<AbcFlags>;`) are bitmask enums: the wrapped
//! enum's entity is tagged with the "Flags" attribute, and the alias is
//! registered in the type-registry alias table so later passes treat it as
//! the underlying enum. An alias that resolves to a previously tagged flag
//! enum is registered the same way.

use sharpbind_core::{EntityId, EntityKind, TypeHash};

use crate::passes::{Pass, PassContext};

pub struct DiscoverFlagEnumsPass;

impl Pass for DiscoverFlagEnumsPass {
    fn name(&self) -> &'static str {
        "discover-flag-enums"
    }

    fn enter(&mut self, ctx: &mut PassContext, id: EntityId) -> bool {
        if ctx.arena[id].kind != EntityKind::Alias {
            return true;
        }
        let Some(underlying) = ctx.arena[id].ty.as_ref().map(|t| t.name.clone()) else {
            return true;
        };
        let scope = ctx.scope_of(id);
        let alias_hash = TypeHash::from_name(&ctx.arena[id].unique_name);

        if let Some(argument) = template_argument(&underlying, &ctx.rules.flag_template) {
            // Direct flag-set alias: tag the wrapped enum.
            let argument = argument.to_string();
            if let Some(target) = ctx.symbols.resolve_from(&scope, &argument)
                && ctx.arena[target].kind == EntityKind::Enum
            {
                ctx.arena[target].add_attribute("Flags");
                let target_hash = TypeHash::from_name(&ctx.arena[target].unique_name);
                ctx.types.register_alias(alias_hash, target_hash);
            } else {
                log::debug!(
                    "flag-set alias '{}' wraps unknown enum '{argument}'",
                    ctx.arena[id].unique_name
                );
            }
        } else if let Some(target) = ctx.symbols.resolve_from(&scope, &underlying)
            && ctx.arena[target].kind == EntityKind::Enum
            && ctx.arena[target].has_attribute("Flags")
        {
            // Alias of an already tagged flag enum: usable as its effective
            // type from here on.
            let target_hash = TypeHash::from_name(&ctx.arena[target].unique_name);
            ctx.types.register_alias(alias_hash, target_hash);
        }
        true
    }
}

/// Extract `Arg` from `Template<Arg>` when the template name matches.
fn template_argument<'a>(text: &'a str, template: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(template)?;
    let inner = rest.strip_prefix('<')?.strip_suffix('>')?;
    let inner = inner.trim();
    if inner.is_empty() { None } else { Some(inner) }
}
