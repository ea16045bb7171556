//! Rename pass - source naming convention to target convention.
//!
//! Splits identifiers on the source convention's word boundaries and rejoins
//! them in the target convention (PascalCase for types and members, camelCase
//! for parameters), stripping legacy single-letter category markers such as
//! `M_` when present. Event-name and parameter-name constants (conventionally
//! prefixed) are exempted from renaming.
//!
//! After renaming, the fully qualified generated symbol is recomputed from
//! the (possibly renamed) parent chain; every later pass relies on
//! `symbol_name` being `parent.symbol_name + "." + name`.

use sharpbind_core::{EntityArena, EntityFlags, EntityId, EntityKind};

use crate::passes::{Pass, PassContext};

pub struct RenamePass;

impl Pass for RenamePass {
    fn name(&self) -> &'static str {
        "rename"
    }

    fn enter(&mut self, ctx: &mut PassContext, id: EntityId) -> bool {
        let entity = &ctx.arena[id];
        if entity.kind == EntityKind::Root {
            ctx.arena[id].symbol_name = String::new();
            return true;
        }

        let exempt = entity.flags.contains(EntityFlags::SYNTHETIC)
            || ctx.rules.is_rename_exempt(&entity.source_name)
            || entity.source_name.is_empty();
        if !exempt {
            let kind = entity.kind;
            let renamed = convert_identifier(&ctx.arena[id].source_name, kind);
            ctx.arena[id].name = renamed;
        }
        recompute_symbol(ctx.arena, id);
        true
    }
}

/// Recompute `symbol_name` from the parent chain for one entity.
pub fn recompute_symbol(arena: &mut EntityArena, id: EntityId) {
    let parent_symbol = arena[id]
        .parent
        .map(|p| arena[p].symbol_name.clone())
        .unwrap_or_default();
    let name = arena[id].name.clone();
    arena[id].symbol_name = if parent_symbol.is_empty() {
        name
    } else {
        format!("{parent_symbol}.{name}")
    };
}

/// Recompute symbol names for an entity and its whole subtree (used after
/// reparenting).
pub fn recompute_symbols_recursive(arena: &mut EntityArena, id: EntityId) {
    recompute_symbol(arena, id);
    for child in arena.children_of(id) {
        recompute_symbols_recursive(arena, child);
    }
}

/// Convert one identifier into the target convention for its entity kind.
pub fn convert_identifier(source: &str, kind: EntityKind) -> String {
    let stripped = strip_category_marker(source);
    let words = split_words(stripped);
    match kind {
        EntityKind::Parameter => to_camel_case(&words),
        _ => to_pascal_case(&words),
    }
}

/// Strip a legacy single-letter category marker (`M_PI` -> `PI`). The marker
/// shape is one uppercase letter followed by an underscore and a non-empty
/// rest.
fn strip_category_marker(source: &str) -> &str {
    let bytes = source.as_bytes();
    if bytes.len() > 2
        && bytes[1] == b'_'
        && bytes[0].is_ascii_uppercase()
        && bytes[2] != b'_'
    {
        &source[2..]
    } else {
        source
    }
}

/// Split an identifier on the source convention's word boundaries:
/// underscores, lower-to-upper transitions, and the end of an uppercase run
/// followed by a lowercase letter (`XMLFile` -> `XML`, `File`).
pub fn split_words(ident: &str) -> Vec<String> {
    let chars: Vec<char> = ident.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();
    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        let boundary = if current.is_empty() {
            false
        } else if c.is_ascii_uppercase() {
            let prev = chars[i - 1];
            // lower->Upper transition, or end of an acronym run.
            prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase()
                    && chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase()))
        } else {
            false
        };
        if boundary {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

pub fn to_pascal_case(words: &[String]) -> String {
    words.iter().map(|w| capitalize(w)).collect()
}

pub fn to_camel_case(words: &[String]) -> String {
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(&word.to_ascii_lowercase());
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
        }
        None => String::new(),
    }
}
