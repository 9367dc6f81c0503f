//! Backend Comparison Benchmark
//!
//! Compares the kernel `AF_ALG` backend against the portable one, including
//! the cost of opening a kernel session (three syscalls) per digest.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]
use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use sha1_kernel::{digest_with, Backend, Hasher};
use std::hint::black_box;

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_backends(c: &mut Criterion) {
    let mut group = c.benchmark_group("SHA-1 Backends");
    let kernel_available = Hasher::with_backend(Backend::Kernel).is_ok();

    // Scenarios:
    // - Small (7B): session setup dominates the kernel path
    // - Medium (1KB): syscall overhead vs software compression
    // - Large (256KB): bulk throughput
    let sizes = [7, 1024, 256 * 1024];

    for size in sizes {
        let input = vec![0u8; size];
        group.throughput(Throughput::Bytes(size as u64));

        // 1. Default (compiled-in backend, session per digest)
        if sha1_kernel::digest(&input).is_ok() {
            group.bench_function(format!("Default - {size} bytes"), |b| {
                b.iter(|| sha1_kernel::digest(black_box(&input)).unwrap());
            });
        }

        // 2. Kernel - open, write, finalize, close every iteration
        if kernel_available {
            group.bench_function(format!("Kernel (AF_ALG) - {size} bytes"), |b| {
                b.iter(|| digest_with(Backend::Kernel, black_box(&input)).unwrap());
            });
        }

        // 3. Portable - Pure Rust baseline
        group.bench_function(format!("Portable - {size} bytes"), |b| {
            b.iter(|| digest_with(Backend::Portable, black_box(&input)).unwrap());
        });
    }
    group.finish();
}

/// Session setup alone: socket + bind + accept, then close.
fn bench_session_setup(c: &mut Criterion) {
    if Hasher::with_backend(Backend::Kernel).is_err() {
        return;
    }
    c.bench_function("Kernel session open/close", |b| {
        b.iter(|| {
            let hasher = Hasher::with_backend(Backend::Kernel).unwrap();
            hasher.close();
        });
    });
}

criterion_group!(benches, bench_backends, bench_session_setup);
criterion_main!(benches);
