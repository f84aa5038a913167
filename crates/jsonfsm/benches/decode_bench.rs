use std::hint::black_box;

use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use jsonfsm::{Options, Parser, tokenize};

fn make_flat_object(members: usize) -> String {
    let mut s = String::from("{");
    for i in 0..members {
        if i > 0 {
            s.push(',');
        }
        s.push_str(&format!("\"key{i}\":{i}"));
    }
    s.push('}');
    s
}

fn make_nested_arrays(rows: usize) -> String {
    let mut s = String::from("[");
    for i in 0..rows {
        if i > 0 {
            s.push(',');
        }
        s.push_str(&format!("[\"row{i}\", {i}, true, null]"));
    }
    s.push(']');
    s
}

fn cases() -> Vec<(&'static str, String)> {
    vec![
        ("small", "{\"a\":1,\"b\":[true,\"x\"]}".to_string()),
        ("flat_1k", make_flat_object(1000)),
        ("rows_1k", make_nested_arrays(1000)),
    ]
}

pub fn decode_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for (name, doc) in cases() {
        group.throughput(Throughput::Bytes(doc.len() as u64));

        group.bench_function(format!("tokenize::{name}"), |b| {
            b.iter(|| tokenize(black_box(doc.as_bytes())).unwrap());
        });

        group.bench_function(format!("parse::{name}"), |b| {
            let tokens = tokenize(doc.as_bytes()).unwrap();
            let mut parser = Parser::with_options(Options::default());
            b.iter_batched(
                || tokens.clone(),
                |t| parser.parse(black_box(t)).unwrap(),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, decode_benchmarks);
criterion_main!(benches);
