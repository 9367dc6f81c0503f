//! # sha1-kernel
//!
//! SHA-1 digests through a pluggable backend: the Linux kernel crypto API
//! (`AF_ALG` sockets) where available, a portable software implementation
//! everywhere else. Both backends implement [`HashBackend`] and produce
//! identical digests.

//! # Usage
//! ```rust,no_run
//! use sha1_kernel::{HashBackend, Hasher};
//!
//! // 1. One-shot
//! let digest = sha1_kernel::digest(b"abc")?;
//! assert_eq!(digest.len(), sha1_kernel::SIZE);
//!
//! // 2. Streaming
//! let mut hasher = Hasher::new()?;
//! hasher.write(b"a")?;
//! hasher.write(b"bc")?;
//! assert_eq!(hasher.finalize()?, digest);
//! hasher.close();
//! # Ok::<(), sha1_kernel::Error>(())
//! ```
//!
//! The kernel backend is compiled in on Linux when the `kernel` feature (on
//! by default) is enabled. On such builds, construction fails with an error
//! for which [`Error::is_unavailable`] holds if the running kernel lacks
//! `AF_ALG` or the `sha1` transform.

// =============================================================================
// MODULES
// =============================================================================

mod engine;
mod ffi;
// Backends are public for tests and benches, hidden from docs
#[doc(hidden)]
pub mod kernels;
mod oneshot;
mod streaming;
pub(crate) mod types;

// =============================================================================
// EXPORTS
// =============================================================================

pub use engine::dispatcher::{open, open_or_portable, KERNEL_COMPILED};
pub use oneshot::{digest, digest_with};
pub use streaming::Sha1Hasher as Hasher;
pub use types::{Backend, Digest, Error, HashBackend, BLOCK_SIZE, SIZE};

/// Returns the name of the backend compiled into this build.
#[must_use]
pub const fn active_backend() -> &'static str {
    engine::get_active_backend_name()
}
