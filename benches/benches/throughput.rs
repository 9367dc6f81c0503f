//! Streaming Throughput Benchmark
//!
//! One session fed in fixed-size writes, the way a file reader would, to
//! show how the per-`send` syscall cost amortizes with write size.

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use sha1_kernel::{Backend, HashBackend, Hasher};
use std::hint::black_box;

const KB: usize = 1024;
const MB: usize = 1024 * KB;

fn stream(backend: Backend, data: &[u8], write_size: usize) -> sha1_kernel::Digest {
    let mut hasher = Hasher::with_backend(backend).unwrap();
    for chunk in data.chunks(write_size) {
        hasher.write(chunk).unwrap();
    }
    let digest = hasher.finalize().unwrap();
    hasher.close();
    digest
}

// =============================================================================
// BENCHMARK: WRITE SIZE
// =============================================================================

fn bench_write_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("Streaming-4MB");

    let mut input = vec![0u8; 4 * MB];
    rand::rng().fill(&mut input[..]);
    group.throughput(Throughput::Bytes(input.len() as u64));

    let mut backends = vec![Backend::Portable];
    if Hasher::with_backend(Backend::Kernel).is_ok() {
        backends.push(Backend::Kernel);
    }

    for backend in backends {
        for (write_size, name) in [(4 * KB, "4KB"), (64 * KB, "64KB"), (MB, "1MB")] {
            group.bench_with_input(
                BenchmarkId::new(backend.name(), name),
                &input,
                |b, data| b.iter(|| stream(backend, black_box(data), write_size)),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_write_size);
criterion_main!(benches);
