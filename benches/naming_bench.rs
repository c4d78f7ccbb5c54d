use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use goshare::{public_url, random_letters, remote_name, ContentSource};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

fn bench_random_letters(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_letters");
    for len in [4usize, 8, 32].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(len), len, |b, &len| {
            let mut rng = StdRng::seed_from_u64(42);
            b.iter(|| random_letters(black_box(len), &mut rng))
        });
    }
    group.finish();
}

fn bench_remote_name(c: &mut Criterion) {
    let source = ContentSource::LocalFile(PathBuf::from("/home/user/Pictures/holiday.jpeg"));
    let mut rng = StdRng::seed_from_u64(42);

    c.bench_function("remote_name_random", |b| {
        b.iter(|| remote_name(black_box(&source), false, 8, &mut rng))
    });
    c.bench_function("remote_name_keep", |b| {
        b.iter(|| remote_name(black_box(&source), true, 8, &mut rng))
    });
}

fn bench_public_url(c: &mut Criterion) {
    c.bench_function("public_url_plain", |b| {
        b.iter(|| public_url(black_box("https://i.example.com/"), black_box("aBcDeFgH.png"), false))
    });
    c.bench_function("public_url_escaped", |b| {
        b.iter(|| {
            public_url(
                black_box("https://i.example.com/"),
                black_box("summer holiday #3 (final).jpeg"),
                true,
            )
        })
    });
}

criterion_group!(benches, bench_random_letters, bench_remote_name, bench_public_url);
criterion_main!(benches);
