use bolero::check;
use sha1_kernel::{digest_with, Backend};

#[test]
fn fuzz_backend_equivalence() {
    check!().with_type::<Vec<u8>>().for_each(|data| {
        let portable = digest_with(Backend::Portable, data).unwrap();

        // Kernel is optional at runtime; portable must still be deterministic.
        match digest_with(Backend::Kernel, data) {
            Ok(kernel) => assert_eq!(kernel, portable, "Kernel and portable digests differ"),
            Err(e) => assert!(e.is_unavailable(), "Kernel failed after opening: {e}"),
        }

        assert_eq!(
            digest_with(Backend::Portable, data).unwrap(),
            portable,
            "Portable digest not deterministic"
        );
    });
}
