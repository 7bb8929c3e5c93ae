use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqlweave::{
    Dialect, Expr, Lexer, MySqlDialect, Operation, PostgresDialect, SelectQuery, Sql92Dialect,
    qb, render,
};

/// SELECT col0 , col1 , ... FROM t WHERE col0 = 'v0' AND col1 = 'v1' ...
fn build_select(n: usize) -> SelectQuery {
    let mut query = qb::select().from("t");
    for i in 0..n {
        query = query.column(format!("col{i}"));
    }
    for i in 0..n {
        let predicate = Expr::eq(format!("col{i}"), Expr::string(&format!("v{i}")));
        query = if i == 0 {
            query.where_(predicate)
        } else {
            query.and_where(predicate)
        };
    }
    query
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer/scan");
    let lexer = Lexer::new();

    for n in [1, 10, 100] {
        let text = (0..n)
            .map(|i| format!("col{i} = 'value {i}'"))
            .collect::<Vec<_>>()
            .join(" AND ");
        group.bench_with_input(BenchmarkId::from_parameter(n), &text, |b, text| {
            b.iter(|| black_box(lexer.scan(text)));
        });
    }

    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("select/build_and_assemble");

    for n in [1, 10, 50] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(build_select(n).operation_token()));
        });
    }

    group.finish();
}

fn bench_render_dialect<D: Dialect>(c: &mut Criterion, name: &str, dialect: D) {
    let mut group = c.benchmark_group(format!("render/{name}"));

    for n in [1, 10, 50] {
        let chain = match build_select(n).operation_token() {
            Ok(chain) => chain,
            Err(err) => panic!("benchmark query failed to assemble: {err}"),
        };
        group.bench_with_input(BenchmarkId::from_parameter(n), &chain, |b, chain| {
            b.iter(|| black_box(render(chain.clone(), &dialect)));
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    bench_render_dialect(c, "sql92", Sql92Dialect);
    bench_render_dialect(c, "mysql", MySqlDialect::new());
    bench_render_dialect(c, "postgres", PostgresDialect::new());
}

criterion_group!(benches, bench_scan, bench_build, bench_render);
criterion_main!(benches);
