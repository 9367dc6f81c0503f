use bolero::check;
use sha1_kernel::{digest_with, Backend, HashBackend, Hasher};

fn backends() -> Vec<Backend> {
    let mut backends = vec![Backend::Portable];
    match Hasher::with_backend(Backend::Kernel) {
        Ok(_) => backends.push(Backend::Kernel),
        Err(e) => assert!(e.is_unavailable(), "kernel backend failed to open: {e}"),
    }
    backends
}

#[test]
fn fuzz_streaming_consistency() {
    let backends = backends();

    check!().with_type::<Vec<u8>>().for_each(|data| {
        // =============================================================================
        // BASELINE (ONE-SHOT)
        // =============================================================================
        let expected = digest_with(Backend::Portable, data).unwrap();

        // =============================================================================
        // STREAMING VARIATIONS
        // =============================================================================
        for &backend in &backends {
            // 1. Chunk size taken from the input itself (1 to 255)
            let chunk_size = data.first().map_or(1, |b| (*b as usize % 255) + 1);
            let mut hasher = Hasher::with_backend(backend).unwrap();
            for chunk in data.chunks(chunk_size) {
                hasher.write(chunk).unwrap();
            }
            assert_eq!(
                hasher.finalize().unwrap(),
                expected,
                "{backend}: chunked ({chunk_size}) mismatch"
            );

            // 2. Arbitrary split points, with empty writes in between
            if data.len() > 1 {
                for split_idx in [1, data.len() / 2, data.len() - 1] {
                    let (first, second) = data.split_at(split_idx);
                    let mut hasher = Hasher::with_backend(backend).unwrap();
                    hasher.write(&[]).unwrap();
                    hasher.write(first).unwrap();
                    hasher.write(&[]).unwrap();
                    hasher.write(second).unwrap();
                    assert_eq!(
                        hasher.finalize().unwrap(),
                        expected,
                        "{backend}: split at {split_idx} mismatch"
                    );
                }
            }
        }
    });
}
