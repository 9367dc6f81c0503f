//! Consistency Tests
//!
//! Verifies that the backends agree and that streaming matches one-shot.
//! - Kernel vs Portable equivalence
//! - Chunked writes vs single write
//! - Empty writes are no-ops
//! - `io::Write` adapter

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used)]

use sha1_kernel::{digest_with, Backend, Digest, HashBackend, Hasher, BLOCK_SIZE, SIZE};

/// A kernel hasher, or `None` when the kernel lacks `AF_ALG`/sha1.
fn kernel() -> Option<Hasher> {
    match Hasher::with_backend(Backend::Kernel) {
        Ok(h) => Some(h),
        Err(e) if e.is_unavailable() => {
            eprintln!("kernel backend unavailable ({e}), skipping");
            None
        }
        Err(e) => panic!("kernel backend failed to open: {e}"),
    }
}

fn streamed(mut hasher: Hasher, chunks: &[&[u8]]) -> Digest {
    for chunk in chunks {
        assert_eq!(hasher.write(chunk).unwrap(), chunk.len());
    }
    let digest = hasher.finalize().unwrap();
    hasher.close();
    digest
}

fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 + 7) as u8).collect()
}

// =============================================================================
// CROSS-BACKEND EQUIVALENCE
// =============================================================================

#[test]
fn test_backends_agree() {
    let sizes = [
        0,
        1,
        BLOCK_SIZE - 9, // Last length whose padding fits one block
        BLOCK_SIZE - 8,
        BLOCK_SIZE - 1,
        BLOCK_SIZE,
        BLOCK_SIZE + 1,
        1000,
        64 * 1024,
        1024 * 1024 + 3,
    ];

    for size in sizes {
        let input = pattern(size);
        let portable = digest_with(Backend::Portable, &input).unwrap();
        let Some(hasher) = kernel() else { return };
        let kernel = streamed(hasher, &[&input]);
        assert_eq!(kernel, portable, "Backend mismatch at size {size}");
    }
}

#[test]
fn test_default_backend_matches_portable() {
    let input = pattern(4096);
    let default = match sha1_kernel::digest(&input) {
        Ok(digest) => digest,
        Err(e) if e.is_unavailable() => return,
        Err(e) => panic!("default backend failed: {e}"),
    };
    assert_eq!(default, digest_with(Backend::Portable, &input).unwrap());
}

// =============================================================================
// STREAMING
// =============================================================================

#[test]
fn test_chunked_equals_single_write() {
    let input = pattern(3 * BLOCK_SIZE + 17);
    let expected = digest_with(Backend::Portable, &input).unwrap();

    let mut backends = vec![Backend::Portable];
    if kernel().is_some() {
        backends.push(Backend::Kernel);
    }

    for backend in backends {
        for split in [1, BLOCK_SIZE - 1, BLOCK_SIZE, input.len() - 1] {
            let (a, b) = input.split_at(split);
            let h = Hasher::with_backend(backend).unwrap();
            assert_eq!(streamed(h, &[a, b]), expected, "{backend}: split at {split}");
        }

        let bytes: Vec<&[u8]> = input.chunks(1).collect();
        let h = Hasher::with_backend(backend).unwrap();
        assert_eq!(streamed(h, &bytes), expected, "{backend}: byte-by-byte");
    }
}

#[test]
fn test_empty_writes_are_noops() {
    let expected = digest_with(Backend::Portable, b"hello world").unwrap();

    let mut backends = vec![Backend::Portable];
    if kernel().is_some() {
        backends.push(Backend::Kernel);
    }

    for backend in backends {
        let chunks: [&[u8]; 6] = [b"", b"hello", b"", b" ", b"world", b""];
        let h = Hasher::with_backend(backend).unwrap();
        let digest = streamed(h, &chunks);
        assert_eq!(digest, expected, "{backend}: empty chunk changed digest");

        let mut h = Hasher::with_backend(backend).unwrap();
        assert_eq!(h.write(&[]).unwrap(), 0);
        let empty = h.finalize().unwrap();
        assert_eq!(hex::encode(empty), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
    }
}

#[test]
fn test_io_copy_streams_through_backend() {
    let input = pattern(200 * 1024);
    let expected = digest_with(Backend::Portable, &input).unwrap();

    let Some(mut hasher) = kernel() else { return };
    let mut reader = std::io::Cursor::new(&input);
    let copied = std::io::copy(&mut reader, &mut hasher).unwrap();
    assert_eq!(copied, input.len() as u64);
    assert_eq!(hasher.finalize().unwrap(), expected);
}

#[test]
fn test_digest_size_constant() {
    let digest = digest_with(Backend::Portable, b"size").unwrap();
    assert_eq!(digest.len(), SIZE);
    assert_eq!(SIZE, 20);
    assert_eq!(BLOCK_SIZE, 64);
}
