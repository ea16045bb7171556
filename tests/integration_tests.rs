//! End-to-end tests over the full generator pipeline and the runtime bridge.

use sharpbind::prelude::*;
use sharpbind_generator::cxx::{
    CxxAlias, CxxClass, CxxDecl, CxxEnum, CxxFunction, CxxMemberDecl, CxxNamespace, CxxParam,
    CxxUnit, CxxVariable,
};

fn rules() -> GeneratorRules {
    GeneratorRules::from_json(
        r#"{
            "include_types": ["*"],
            "default_overrides": {"Engine::MAX_LIGHTS": "Lights.Max"},
            "enum_prefixes": {"DD": "DragDropMode"}
        }"#,
    )
    .expect("rules parse")
}

fn scene_unit() -> CxxUnit {
    let node = CxxClass::new("Node")
        .with_base("Object")
        .with_member(
            Access::Public,
            CxxMemberDecl::Method(
                CxxFunction::new("SetName", TypeRef::named("void")).with_param(
                    CxxParam::new("name", TypeRef::const_ref("String"))
                        .with_default("String::EMPTY"),
                ),
            ),
        )
        .with_member(
            Access::Public,
            CxxMemberDecl::Method(
                CxxFunction::new("SetPosition", TypeRef::named("void"))
                    .with_param(
                        CxxParam::new("position", TypeRef::const_ref("Vector3"))
                            .with_default("Vector3::ZERO"),
                    )
                    .with_param(
                        CxxParam::new("relative", TypeRef::named("bool")).with_default("true"),
                    ),
            ),
        )
        .with_member(
            Access::Public,
            CxxMemberDecl::Method(
                CxxFunction::new("Update", TypeRef::named("void")).virtual_(),
            ),
        )
        .with_member(
            Access::Private,
            CxxMemberDecl::Method(
                CxxFunction::new("Secret", TypeRef::named("void"))
                    .with_param(CxxParam::new("x", TypeRef::named("int"))),
            ),
        );

    CxxUnit::new("Scene").with_decl(CxxDecl::Namespace(
        CxxNamespace::new("Engine")
            .with_decl(CxxDecl::Class(CxxClass::new("Object")))
            .with_decl(CxxDecl::Class(CxxClass::strukt("Vector3")))
            .with_decl(CxxDecl::Class(node))
            .with_decl(CxxDecl::Variable(
                CxxVariable::new("MAX_LIGHTS", TypeRef::named("int"))
                    .with_default("8")
                    .static_(),
            )),
    ))
}

fn events_unit() -> CxxUnit {
    CxxUnit::new("PhysicsEvents").with_decl(CxxDecl::Namespace(
        CxxNamespace::new("Events")
            .with_decl(CxxDecl::Variable(
                CxxVariable::new("E_COLLISIONSTART", TypeRef::named("StringHash"))
                    .with_default("\"\""),
            ))
            .with_decl(CxxDecl::Namespace(
                CxxNamespace::new("CollisionStart").with_decl(CxxDecl::Variable(
                    CxxVariable::new("P_BODYA", TypeRef::named("StringHash"))
                        .with_default("\"BodyA\""),
                )),
            )),
    ))
}

fn graphics_unit() -> CxxUnit {
    CxxUnit::new("GraphicsDefs")
        .with_decl(CxxDecl::Enum(
            CxxEnum::new("AbcFlags")
                .with_value("ABC_NONE", Some("0"))
                .with_value("ABC_FIRST", Some("1")),
        ))
        .with_decl(CxxDecl::Alias(CxxAlias::new(
            "AbcFlagSet",
            "FlagSet<AbcFlags>",
        )))
        .with_decl(CxxDecl::Enum(
            CxxEnum::anonymous()
                .with_value("DD_DISABLED", None)
                .with_value("DD_SOURCE", Some("1")),
        ))
        .with_decl(CxxDecl::Function(
            CxxFunction::new("GetPrimitiveName", TypeRef::const_ref("String")).with_param(
                CxxParam::new("type", TypeRef::named("int")).with_default("0"),
            ),
        ))
}

fn generate() -> Generation {
    Generator::new(rules()).run(&[scene_unit(), events_unit(), graphics_unit()])
}

fn unit_source<'a>(generation: &'a Generation, file: &str) -> &'a str {
    &generation
        .units
        .iter()
        .find(|u| u.file == file)
        .unwrap_or_else(|| panic!("no generated unit for '{file}'"))
        .source
}

#[test]
fn string_empty_default_becomes_empty_literal() {
    let generation = generate();
    let id = generation.symbols.get("Engine::Node::SetName").unwrap();
    let param = generation.arena.children_of(id)[0];
    assert_eq!(
        generation.arena[param].default_value.as_deref(),
        Some("\"\"")
    );
    assert!(
        unit_source(&generation, "Scene")
            .contains("public void SetName(string name = \"\");")
    );
}

#[test]
fn suppressed_default_poisons_trailing_run() {
    let generation = generate();
    let id = generation.symbols.get("Engine::Node::SetPosition").unwrap();
    let params = generation.arena.children_of(id);
    // Vector3 is a value type: its default is suppressed, and every default
    // after it in declaration order must be suppressed too.
    assert_eq!(generation.arena[params[0]].default_value, None);
    assert_eq!(generation.arena[params[1]].default_value, None);
}

#[test]
fn private_member_is_absent_everywhere() {
    let generation = generate();
    let secret = generation.symbols.get("Engine::Node::Secret").unwrap();
    assert!(!generation.arena[secret].is_generated());
    assert!(generation.arena.children_of(secret).is_empty());
    assert!(!unit_source(&generation, "Scene").contains("Secret"));
}

#[test]
fn virtual_method_marks_class_for_proxy() {
    let generation = generate();
    let node = generation.symbols.get("Engine::Node").unwrap();
    assert!(
        generation.arena[node]
            .flags
            .contains(EntityFlags::NEEDS_PROXY)
    );
}

#[test]
fn renamed_symbols_follow_parent_chain() {
    let generation = generate();
    let method = generation.symbols.get("Engine::Node::SetName").unwrap();
    let class = generation.arena[method].parent.unwrap();
    assert_eq!(
        generation.arena[method].symbol_name,
        format!(
            "{}.{}",
            generation.arena[class].symbol_name, generation.arena[method].name
        )
    );
    assert_eq!(generation.arena[method].symbol_name, "Engine.Node.SetName");
}

#[test]
fn base_classes_resolve_into_hierarchy() {
    let generation = generate();
    let node = generation.symbols.get("Engine::Node").unwrap();
    let object = generation.symbols.get("Engine::Object").unwrap();
    assert_eq!(generation.arena[node].bases, vec![object]);
    assert!(generation.hierarchy.is_derived_from(
        TypeHash::from_name("Engine::Node"),
        TypeHash::from_name("Engine::Object")
    ));
    assert!(
        unit_source(&generation, "Scene").contains("public partial class Node : Engine.Object")
    );
}

#[test]
fn event_constant_takes_sibling_name_and_read_only() {
    let generation = generate();
    let constant = generation.symbols.get("Events::E_COLLISIONSTART").unwrap();
    let entity = &generation.arena[constant];
    assert_eq!(entity.default_value.as_deref(), Some("\"CollisionStart\""));
    assert!(entity.flags.contains(EntityFlags::READ_ONLY));
    assert!(unit_source(&generation, "PhysicsEvents").contains(
        "public static readonly StringHash E_COLLISIONSTART = \"CollisionStart\";"
    ));
}

#[test]
fn namespaces_with_members_become_classes() {
    let generation = generate();
    let events = generation.symbols.get("Events").unwrap();
    assert_eq!(generation.arena[events].kind, EntityKind::Class);
    // The event-parameter namespace is reclassified too.
    let params = generation.symbols.get("Events::CollisionStart").unwrap();
    assert_eq!(generation.arena[params].kind, EntityKind::Class);
}

#[test]
fn anonymous_enum_merges_and_disappears() {
    let generation = generate();
    let target = generation.symbols.get("DragDropMode").unwrap();
    let members = generation.arena.children_of(target);
    assert_eq!(members.len(), 2);
    assert_eq!(generation.arena[members[0]].default_value.as_deref(), Some("0"));
    // No standalone anonymous entity survives at the root.
    let root = generation.arena.root();
    assert!(
        generation
            .arena
            .children_of(root)
            .iter()
            .all(|c| !generation.arena[*c].is_anonymous())
    );
    assert!(unit_source(&generation, "GraphicsDefs").contains("public enum DragDropMode"));
}

#[test]
fn flag_set_alias_tags_enum() {
    let generation = generate();
    let abc = generation.symbols.get("AbcFlags").unwrap();
    assert!(generation.arena[abc].has_attribute("Flags"));
    assert_eq!(
        generation
            .types
            .canonical_hash(TypeHash::from_name("AbcFlagSet")),
        TypeHash::from_name("AbcFlags")
    );
    assert!(unit_source(&generation, "GraphicsDefs").contains("[Flags]"));
}

#[test]
fn top_level_functions_move_into_per_file_class() {
    let generation = generate();
    let class = generation.symbols.get("GraphicsDefs").unwrap();
    assert_eq!(generation.arena[class].kind, EntityKind::Class);
    assert!(generation.arena[class].flags.contains(EntityFlags::SYNTHETIC));
    let f = generation.symbols.get("GetPrimitiveName").unwrap();
    assert_eq!(generation.arena[f].parent, Some(class));
    assert_eq!(
        generation.arena[f].symbol_name,
        "GraphicsDefs.GetPrimitiveName"
    );
    assert!(
        unit_source(&generation, "GraphicsDefs")
            .contains("public static string GetPrimitiveName(int type = 0);")
    );
}

#[test]
fn default_override_applies_and_demotes_to_read_only() {
    let generation = generate();
    let lights = generation.symbols.get("Engine::MAX_LIGHTS").unwrap();
    let entity = &generation.arena[lights];
    assert_eq!(entity.default_value.as_deref(), Some("Lights.Max"));
    assert!(entity.flags.contains(EntityFlags::READ_ONLY));
}

// ============================================================================
// Runtime bridge
// ============================================================================

mod bridge {
    use super::*;
    use sharpbind_runtime::LocalHandleTable;
    use std::sync::Arc;
    use std::thread;

    struct MockRuntime;

    impl ManagedRuntime for MockRuntime {
        fn create_object(
            &self,
            _factory_handle: &GcHandle,
            type_hash: TypeHash,
        ) -> Result<sharpbind_runtime::ManagedObject, BridgeError> {
            Ok(sharpbind_runtime::ManagedObject::new(
                LocalHandleTable::acquire(),
                type_hash,
            ))
        }

        fn invoke_event(
            &self,
            _handle: &GcHandle,
            _event_type: TypeHash,
            data: &mut EventData,
        ) -> Result<(), BridgeError> {
            data.insert(TypeHash::from_param("Seen"), Variant::Bool(true));
            Ok(())
        }
    }

    #[test]
    fn handler_clone_is_reference_independent() {
        LocalHandleTable::install();
        let handle = LocalHandleTable::acquire();
        let raw = handle.raw();
        let handler = ManagedEventHandler::new(Arc::new(MockRuntime), handle);
        let original_count = LocalHandleTable::ref_count(raw);

        let clone = handler.clone_handler();
        assert_eq!(LocalHandleTable::ref_count(raw), original_count + 1);

        drop(handler);
        assert_eq!(LocalHandleTable::ref_count(raw), original_count);
        drop(clone);
        assert_eq!(LocalHandleTable::ref_count(raw), original_count - 1);
    }

    #[test]
    fn managed_factory_round_trip_with_deferred_deletion() {
        LocalHandleTable::install();
        let mut ctx = Context::new();
        let factory = ManagedObjectFactory::new(
            "ManagedComponent",
            TypeHash::from_name("Component"),
            Arc::new(MockRuntime),
            LocalHandleTable::acquire(),
        )
        .with_deferred_deletion(ctx.deletion_queue());
        let hash = ctx.register_factory(Box::new(factory)).unwrap();

        assert!(ctx.is_instance_of(hash, TypeHash::from_name("Component")));

        let object = ctx.create_object(hash).unwrap();
        assert_eq!(object.type_hash(), hash);

        // GC finalizer thread drops the last reference; destruction must
        // wait for the main-thread frame tick.
        thread::spawn(move || drop(object)).join().expect("finalizer");
        assert_eq!(ctx.end_frame(), 1);
        assert_eq!(ctx.end_frame(), 0);
    }

    #[test]
    fn events_dispatch_to_subscribers() {
        LocalHandleTable::install();
        let mut ctx = Context::new();
        let event = TypeHash::from_event("Update");
        ctx.subscribe(
            event,
            Box::new(ManagedEventHandler::new(
                Arc::new(MockRuntime),
                LocalHandleTable::acquire(),
            )),
        );
        let mut data = EventData::default();
        assert_eq!(ctx.send_event(event, &mut data), 1);
        assert_eq!(
            data.get(&TypeHash::from_param("Seen")),
            Some(&Variant::Bool(true))
        );
    }
}
