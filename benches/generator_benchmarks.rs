use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use sharpbind_generator::cxx::{
    CxxClass, CxxDecl, CxxFunction, CxxMemberDecl, CxxNamespace, CxxParam, CxxUnit,
};
use sharpbind_generator::{Generator, GeneratorRules};
use sharpbind_core::{Access, TypeRef};

fn synthetic_unit(classes: usize) -> CxxUnit {
    let mut ns = CxxNamespace::new("Engine");
    for i in 0..classes {
        let mut class = CxxClass::new(format!("Component{i}")).with_base("Object");
        for m in 0..8 {
            class = class.with_member(
                Access::Public,
                CxxMemberDecl::Method(
                    CxxFunction::new(format!("SetValue{m}"), TypeRef::named("void"))
                        .with_param(
                            CxxParam::new("value", TypeRef::named("float")).with_default("0"),
                        )
                        .with_param(
                            CxxParam::new("name", TypeRef::const_ref("String"))
                                .with_default("String::EMPTY"),
                        ),
                ),
            );
        }
        ns = ns.with_decl(CxxDecl::Class(class));
    }
    CxxUnit::new("Synthetic").with_decl(CxxDecl::Namespace(ns))
}

fn bench_pipeline(c: &mut Criterion) {
    let unit = synthetic_unit(100);
    let generator = Generator::new(GeneratorRules::permissive());
    c.bench_function("generate_100_classes", |b| {
        b.iter(|| {
            let generation = generator.run(black_box(std::slice::from_ref(&unit)));
            black_box(generation.units.len())
        })
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
