//! C# wrapper emitter.
//!
//! Walks the transformed tree and prints wrapper declarations through the
//! [`CodePrinter`]. One output fragment is produced per originating header:
//! top-level entities are grouped by their `file` field, in first-seen order.

use rustc_hash::FxHashMap;

use sharpbind_core::{EntityArena, EntityFlags, EntityId, EntityKind, MetaEntity};

use crate::printer::CodePrinter;

/// One generated wrapper-source fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    /// Originating header stem.
    pub file: String,
    pub source: String,
}

/// Emit wrapper source for every generated entity under the root.
pub fn emit_units(arena: &EntityArena) -> Vec<GeneratedUnit> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: FxHashMap<String, Vec<EntityId>> = FxHashMap::default();
    for id in arena.children_of(arena.root()) {
        if !arena[id].is_generated() {
            continue;
        }
        let file = arena[id]
            .file
            .clone()
            .unwrap_or_else(|| "Bindings".to_string());
        if !groups.contains_key(&file) {
            order.push(file.clone());
        }
        groups.entry(file).or_default().push(id);
    }

    let mut printer = CodePrinter::new();
    let mut units = Vec::new();
    for file in order {
        for id in &groups[&file] {
            emit_entity(&mut printer, arena, *id);
        }
        units.push(GeneratedUnit {
            source: printer.get(),
            file,
        });
    }
    units
}

fn emit_entity(p: &mut CodePrinter, arena: &EntityArena, id: EntityId) {
    let entity = &arena[id];
    if !entity.is_generated() {
        return;
    }
    match entity.kind {
        EntityKind::Namespace => {
            p.open_block(&format!("namespace {}", entity.name));
            emit_children(p, arena, id);
            p.close_block();
        }
        EntityKind::Class | EntityKind::Struct => {
            let keyword = if entity.kind == EntityKind::Struct {
                "struct"
            } else {
                "class"
            };
            let mut head = format!("public partial {keyword} {}", entity.name);
            let bases: Vec<String> = entity
                .bases
                .iter()
                .filter_map(|b| arena.try_get(*b))
                .map(|b| b.symbol_name.clone())
                .collect();
            if !bases.is_empty() {
                head.push_str(" : ");
                head.push_str(&bases.join(", "));
            }
            p.open_block(&head);
            emit_children(p, arena, id);
            p.close_block();
        }
        EntityKind::Enum => {
            if entity.has_attribute("Flags") {
                p.write_line("[Flags]");
            }
            p.open_block(&format!("public enum {}", entity.name));
            for child in arena.children_of(id) {
                let value = &arena[child];
                match &value.default_value {
                    Some(v) => p.write_line(&format!("{} = {},", value.name, v)),
                    None => p.write_line(&format!("{},", value.name)),
                }
            }
            p.close_block();
        }
        EntityKind::Function | EntityKind::Method => {
            let ret = entity
                .ty
                .as_ref()
                .map(|t| t.target_name())
                .unwrap_or_else(|| "void".into());
            let stat = if entity.kind == EntityKind::Function {
                "static "
            } else {
                ""
            };
            let params = render_params(arena, id);
            p.write_line(&format!("public {stat}{ret} {}({params});", entity.name));
        }
        EntityKind::Constructor => {
            let params = render_params(arena, id);
            let class_name = entity
                .parent
                .map(|parent| arena[parent].name.clone())
                .unwrap_or_else(|| entity.name.clone());
            p.write_line(&format!("public {class_name}({params});"));
        }
        EntityKind::Variable => emit_constant(p, arena, entity, true),
        EntityKind::Field => emit_constant(p, arena, entity, false),
        EntityKind::Root | EntityKind::EnumValue | EntityKind::Parameter | EntityKind::Alias => {}
    }
}

fn emit_children(p: &mut CodePrinter, arena: &EntityArena, id: EntityId) {
    for child in arena.children_of(id) {
        emit_entity(p, arena, child);
    }
}

fn emit_constant(p: &mut CodePrinter, arena: &EntityArena, entity: &MetaEntity, is_static: bool) {
    let ty = entity
        .ty
        .as_ref()
        .map(|t| t.target_name())
        .unwrap_or_else(|| "int".into());
    let default = entity
        .default_symbol
        .and_then(|s| arena.try_get(s))
        .map(|s| s.symbol_name.clone())
        .or_else(|| entity.default_value.clone());

    let line = match (&default, is_static) {
        (Some(value), _) if entity.flags.contains(EntityFlags::READ_ONLY) => {
            format!("public static readonly {ty} {} = {value};", entity.name)
        }
        (Some(value), true) => format!("public const {ty} {} = {value};", entity.name),
        (Some(value), false) => format!("public {ty} {} = {value};", entity.name),
        (None, true) => format!("public static {ty} {};", entity.name),
        (None, false) => format!("public {ty} {};", entity.name),
    };
    p.write_line(&line);
}

fn render_params(arena: &EntityArena, id: EntityId) -> String {
    let params: Vec<String> = arena
        .children_of(id)
        .into_iter()
        .filter(|c| arena[*c].kind == EntityKind::Parameter)
        .map(|c| {
            let param = &arena[c];
            let ty = param
                .ty
                .as_ref()
                .map(|t| t.target_name())
                .unwrap_or_else(|| "object".into());
            let default = param
                .default_symbol
                .and_then(|s| arena.try_get(s))
                .map(|s| s.symbol_name.clone())
                .or_else(|| param.default_value.clone());
            match default {
                Some(value) => format!("{ty} {} = {value}", param.name),
                None => format!("{ty} {}", param.name),
            }
        })
        .collect();
    params.join(", ")
}
