//! Workspace-level unit tests over the re-exported surface.

use sharpbind::prelude::*;

#[test]
fn qualified_name_renderings() {
    let name = QualifiedName::from_qualified_string("Engine::Scene::Node");
    assert_eq!(name.to_string(), "Engine::Scene::Node");
    assert_eq!(name.dotted(), "Engine.Scene.Node");
    assert_eq!(name.parent().unwrap().to_string(), "Engine::Scene");
}

#[test]
fn type_hash_domains_are_stable() {
    assert_eq!(
        TypeHash::from_name("Engine::Node"),
        TypeHash::from_name("Engine::Node")
    );
    assert_ne!(
        TypeHash::from_name("Update"),
        TypeHash::from_event("Update")
    );
}

#[test]
fn printer_is_reusable_across_files() {
    let mut printer = CodePrinter::new();
    printer.open_block("namespace A");
    printer.write_line("int x;");
    printer.close_block();
    let first = printer.get();
    assert_eq!(first, "namespace A\n{\n    int x;\n}\n");

    printer.write_line("int y;");
    assert_eq!(printer.get(), "int y;\n");
}

#[test]
fn rules_document_round_trips_from_json() {
    let rules = GeneratorRules::from_json(
        r#"{"include_types": ["Engine::*"], "force_constants": ["Engine::MAX"]}"#,
    )
    .unwrap();
    assert!(rules.includes_type("Engine::Node"));
    assert!(!rules.includes_type("Other::Node"));
    assert_eq!(rules.force_constants, vec!["Engine::MAX"]);

    let err = GeneratorRules::from_json("]").unwrap_err();
    assert!(matches!(err, GeneratorError::InvalidRules { .. }));
}

#[test]
fn entity_arena_walk_order_is_deterministic() {
    let mut arena = EntityArena::new();
    let root = arena.root();
    let class = arena.alloc(MetaEntity::new(EntityKind::Class, "Node"), root);
    arena.alloc(MetaEntity::new(EntityKind::Method, "A"), class);
    arena.alloc(MetaEntity::new(EntityKind::Method, "B"), class);

    let mut first = Vec::new();
    arena.walk(root, &mut |arena, event| {
        if let sharpbind::core::WalkEvent::Enter(id) = event {
            first.push(arena[id].name.clone());
        }
    });
    let mut second = Vec::new();
    arena.walk(root, &mut |arena, event| {
        if let sharpbind::core::WalkEvent::Enter(id) = event {
            second.push(arena[id].name.clone());
        }
    });
    assert_eq!(first, second);
    assert_eq!(first, vec!["", "Node", "A", "B"]);
}

#[test]
fn gc_handle_balance_through_prelude() {
    use sharpbind_runtime::LocalHandleTable;

    LocalHandleTable::install();
    let handle = LocalHandleTable::acquire();
    let raw = handle.raw();
    let dup = handle.clone();
    assert_eq!(LocalHandleTable::ref_count(raw), 2);
    drop(dup);
    drop(handle);
    assert_eq!(LocalHandleTable::ref_count(raw), 0);
}
