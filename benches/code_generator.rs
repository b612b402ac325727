//! CodeGenerator 性能基准测试

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use shortlife::services::{CodeGenerator, random_code};
use std::hint::black_box;
use uuid::Uuid;

/// 不同长度下的生成耗时
fn bench_generate_lengths(c: &mut Criterion) {
    let generator = CodeGenerator::new();
    let owner = Uuid::new_v4();
    let mut group = c.benchmark_group("generate/length");

    // 64 超过摘要位数，会走随机填充
    for length in [6usize, 12, 43, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(length), &length, |b, &length| {
            b.iter(|| {
                generator.generate(
                    black_box(owner),
                    black_box("https://example.com/some/long/path?q=1"),
                    length,
                    0,
                )
            });
        });
    }

    group.finish();
}

/// 重试路径：连续 attempt
fn bench_generate_attempts(c: &mut Criterion) {
    let generator = CodeGenerator::new();
    let owner = Uuid::new_v4();
    let mut group = c.benchmark_group("generate/attempts");
    group.throughput(Throughput::Elements(10));

    group.bench_function("attempts_0_to_9", |b| {
        b.iter(|| {
            for attempt in 0..10 {
                black_box(generator.generate(owner, "https://example.com", 6, attempt));
            }
        });
    });

    group.finish();
}

fn bench_random_code(c: &mut Criterion) {
    c.bench_function("random_code/6", |b| b.iter(|| random_code(black_box(6))));
}

criterion_group!(
    benches,
    bench_generate_lengths,
    bench_generate_attempts,
    bench_random_code,
);
criterion_main!(benches);
