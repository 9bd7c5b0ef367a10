use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};
use typeshape::{
    array_of, from_serialized_text, number_type, shape_of, string_type, Deferred, Registry, Type,
};

fn tree_type() -> Type {
    let node = Deferred::new("Tree");
    let shape = shape_of([
        ("value", number_type()),
        ("children", array_of(node.reference())),
    ]);
    node.bind(shape)
}

// complete tree with `fanout` children per node
fn tree(depth: usize, fanout: usize) -> Value {
    let children: Vec<Value> = if depth == 0 {
        Vec::new()
    } else {
        (0..fanout).map(|_| tree(depth - 1, fanout)).collect()
    };
    json!({"value": depth, "children": children})
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let strings = array_of(string_type());
    let small: Value = json!(["a", "b", "c"]);
    c.bench_function("array 3", |b| b.iter(|| strings.is_member(black_box(&small))));
    let large = Value::Array((0..100_000).map(|n| json!(n.to_string())).collect());
    c.bench_function("array 100k", |b| b.iter(|| strings.is_member(black_box(&large))));
    c.bench_function("equals 100k", |b| {
        b.iter(|| strings.equals(black_box(&large), black_box(&large)))
    });

    let t = tree_type();
    let shallow = tree(2, 4);
    c.bench_function("tree 21", |b| b.iter(|| t.is_member(black_box(&shallow))));
    let deep = tree(8, 4);
    c.bench_function("tree 87k", |b| b.iter(|| t.is_member(black_box(&deep))));

    let text = deep.to_string();
    c.bench_function("cast text 87k", |b| {
        b.iter(|| from_serialized_text(black_box(&text), &t).is_ok())
    });

    c.bench_function("registry build", |b| {
        b.iter(|| {
            Registry::from_definitions([
                ("tree", "{value: number, children: Array<tree>}"),
                ("forest", "Array<tree>"),
                ("named", "{name: string, forest: forest}"),
            ])
            .is_ok()
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
