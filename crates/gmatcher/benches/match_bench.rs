use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gmatcher::{Glob, GlobTree, MinStore, PathTree};
use std::hint::black_box;

fn generate_patterns(count: usize) -> Vec<String> {
    let shapes = [
        "*.example{}.com",
        "api-{}-*.internal",
        "*evil{}*",
        "cdn{}.{eu,us,ap}-?.net",
        "host[0-9]{}.local",
    ];
    (0..count)
        .map(|i| shapes[i % shapes.len()].replace("{}", &i.to_string()))
        .collect()
}

fn generate_inputs(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| match i % 4 {
            0 => format!("www.example{}.com", i),
            1 => format!("api-{}-gateway.internal", i),
            2 => format!("some-very-long-subdomain-name-with-no-match-{}.org", i),
            _ => format!("cdn{}.eu-1.net", i),
        })
        .collect()
}

fn bench_single_glob(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_glob");

    let cases = [
        ("literal", "exact-hostname.example.com"),
        ("prefix_star", "exact-*"),
        ("star_anchor", "*hostname*example*"),
        ("list", "*.{com,net,org,io}"),
        ("group", "*{host*name,exa?ple}*"),
    ];
    let input = "exact-hostname.example.com";

    for (name, pattern) in cases {
        let glob = Glob::parse(pattern).unwrap();
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::new("match", name), &glob, |b, glob| {
            b.iter(|| black_box(glob.is_match(black_box(input))));
        });
    }

    group.finish();
}

fn bench_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("glob_tree");
    let inputs = generate_inputs(64);

    for count in [10, 100, 1000] {
        let tree = GlobTree::from_patterns(generate_patterns(count)).unwrap();
        group.throughput(Throughput::Elements(inputs.len() as u64));
        group.bench_with_input(BenchmarkId::new("match_into", count), &tree, |b, tree| {
            let mut indices = Vec::with_capacity(16);
            let mut first = MinStore::new();
            b.iter(|| {
                for s in &inputs {
                    indices.clear();
                    first.init();
                    black_box(tree.match_into(s, None, Some(&mut indices), Some(&mut first)));
                }
            });
        });
    }

    group.finish();
}

fn bench_path_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_tree");

    let patterns: Vec<String> = (0..500)
        .map(|i| match i % 3 {
            0 => format!("carbon.agents.host{}.*", i),
            1 => format!("carbon.*.host{}.cpu", i),
            _ => format!("carbon.{{agents,relays}}.*.metric{}", i),
        })
        .collect();
    let tree = PathTree::from_patterns(&patterns).unwrap();
    let path = "carbon.agents.host300.cpu";

    group.bench_function("match_into", |b| {
        let mut indices = Vec::with_capacity(8);
        b.iter(|| {
            indices.clear();
            black_box(tree.match_into(black_box(path), None, Some(&mut indices), None))
        });
    });

    group.bench_function("match_parts_into", |b| {
        let mut parts = Vec::with_capacity(8);
        let mut indices = Vec::with_capacity(8);
        b.iter(|| {
            gmatcher::split_path(black_box(path), &mut parts);
            indices.clear();
            black_box(tree.match_parts_into(&parts, None, Some(&mut indices), None))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_single_glob, bench_tree, bench_path_tree);
criterion_main!(benches);
