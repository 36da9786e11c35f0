//! Allocator benchmarks

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use paging_sim::{Allocator, MemoryConfig};

fn large_config() -> MemoryConfig {
    MemoryConfig::new(1 << 20, 64, 256).unwrap()
}

fn bench_allocate_free(c: &mut Criterion) {
    let mut allocator = Allocator::default();
    c.bench_function("allocate_free_reference", |b| {
        b.iter(|| {
            let offset = allocator.allocate(black_box(1), black_box(300));
            allocator.free(1);
            offset
        })
    });
}

fn bench_fill_large_memory(c: &mut Criterion) {
    let config = large_config();
    c.bench_function("fill_and_drain_16k_pages", |b| {
        b.iter(|| {
            let mut allocator = Allocator::new(config);
            for id in 0..256 {
                let _ = allocator.allocate(id, black_box(4096));
            }
            for id in 0..256 {
                allocator.free(id);
            }
            allocator.free_pages()
        })
    });
}

fn bench_fragmented_allocate(c: &mut Criterion) {
    let mut allocator = Allocator::new(large_config());
    for id in 0..200 {
        let _ = allocator.allocate(id, 4096);
    }
    // free every other process so the next request is scattered across holes
    for id in (0..200).step_by(2) {
        allocator.free(id);
    }
    c.bench_function("allocate_scattered", |b| {
        b.iter(|| {
            let offset = allocator.allocate(black_box(1000), black_box(64 * 1024));
            allocator.free(1000);
            offset
        })
    });
}

criterion_group!(
    benches,
    bench_allocate_free,
    bench_fill_large_memory,
    bench_fragmented_allocate
);

criterion_main!(benches);
