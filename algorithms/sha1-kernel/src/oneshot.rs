//! Public API Layer
//!
use crate::engine::dispatcher;
use crate::streaming::Sha1Hasher;
use crate::types::{Backend, Digest, Error, HashBackend};

// =============================================================================
// ONE-SHOT HASHING
// =============================================================================

/// Compute the SHA-1 digest of `data` on the compiled-in backend.
///
/// # Example
/// ```rust,no_run
/// let digest = sha1_kernel::digest(b"abc")?;
/// assert_eq!(digest[..4], [0xa9, 0x99, 0x3e, 0x36]);
/// # Ok::<(), sha1_kernel::Error>(())
/// ```
///
/// # Errors
/// Any failure opening, writing to or reading from the backend.
pub fn digest(data: &[u8]) -> Result<Digest, Error> {
    digest_with(Backend::compiled(), data)
}

/// Compute the SHA-1 digest of `data` on an explicit backend.
///
/// # Errors
/// See [`digest`]; additionally [`Error::Unsupported`] for a backend missing
/// from this build.
pub fn digest_with(backend: Backend, data: &[u8]) -> Result<Digest, Error> {
    let mut hasher = dispatcher::open(backend)?;
    let result = feed(&mut hasher, data);
    hasher.close();
    result
}

fn feed(hasher: &mut Sha1Hasher, data: &[u8]) -> Result<Digest, Error> {
    // Backends take the whole slice or fail.
    hasher.write(data)?;
    hasher.finalize()
}
