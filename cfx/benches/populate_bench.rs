use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::HashMap;
use std::fmt::Write;

use cfx::config::{expand_variables, ConfigMerger};
use cfx::ConfigContainer;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Pool {
    host: String,
    port: u16,
    size: u32,
}

/// A document with `sections` top-level mappings, each holding a pool.
fn document(sections: usize, port_offset: u16) -> Value {
    let mut yaml = String::new();
    for i in 0..sections {
        let port = 5000 + port_offset + u16::try_from(i % 1000).unwrap();
        writeln!(yaml, "section{i}:\n  pool:\n    host: db{i}.internal\n    port: {port}\n    size: {i}").unwrap();
    }
    serde_yaml::from_str(&yaml).unwrap()
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");

    for sections in [10, 100, 1000] {
        let base = document(sections, 0);
        let env = document(sections / 2, 1);

        group.bench_with_input(
            BenchmarkId::new("base_over_env", sections),
            &(base, env),
            |b, (base, env)| {
                b.iter(|| ConfigMerger::merge(black_box(vec![base.clone(), env.clone()])));
            },
        );
    }

    group.finish();
}

fn bench_expand(c: &mut Criterion) {
    let mut group = c.benchmark_group("expand");
    let vars = HashMap::from([
        ("DB_HOST".to_string(), "db.internal".to_string()),
        ("DB_PORT".to_string(), "5432".to_string()),
    ]);

    let plain = "host: localhost\nport: 5432\n".repeat(200);
    let templated = "host: ${DB_HOST}\nport: ${DB_PORT:5432}\nuser: ${DB_USER:app}\n".repeat(200);

    group.bench_function("no_references", |b| {
        b.iter(|| expand_variables(black_box(&plain), &vars));
    });

    group.bench_function("with_references", |b| {
        b.iter(|| expand_variables(black_box(&templated), &vars));
    });

    group.finish();
}

fn bench_populate(c: &mut Criterion) {
    let mut group = c.benchmark_group("populate");
    let container = ConfigContainer::new(document(500, 0));

    group.bench_function("top_level", |b| {
        b.iter(|| {
            let mut pool: HashMap<String, Pool> = HashMap::new();
            container.populate(black_box("section250"), &mut pool).unwrap();
            pool
        });
    });

    group.bench_function("dotted", |b| {
        b.iter(|| {
            let mut pool = Pool::default();
            container.populate(black_box("section250.pool"), &mut pool).unwrap();
            pool
        });
    });

    group.bench_function("missing_key", |b| {
        b.iter(|| {
            let mut pool = Pool::default();
            container.populate(black_box("nothing.here"), &mut pool).unwrap();
            pool
        });
    });

    group.finish();
}

criterion_group!(benches, bench_merge, bench_expand, bench_populate);
criterion_main!(benches);
