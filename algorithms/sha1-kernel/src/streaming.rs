//! Streaming Hasher
//!
//! A tagged choice between the two backends, fixed at construction.

use crate::engine::dispatcher;
#[cfg(all(feature = "kernel", target_os = "linux"))]
use crate::kernels::afalg::AfAlgSession;
use crate::kernels::portable::PortableHasher;
use crate::types::{Backend, Digest, Error, HashBackend};
use std::io;

// =============================================================================
// STREAMING HASHER
// =============================================================================

/// Incremental SHA-1 over whichever backend was selected.
#[derive(Debug)]
pub enum Sha1Hasher {
    /// Kernel crypto API session.
    #[cfg(all(feature = "kernel", target_os = "linux"))]
    Kernel(AfAlgSession),
    /// Software hasher.
    Portable(PortableHasher),
}

impl Sha1Hasher {
    // =========================================================================
    // INITIALIZATION
    // =========================================================================

    /// Create a hasher on the backend compiled into this build.
    ///
    /// # Errors
    /// On kernel builds, any failure opening the `AF_ALG` session.
    pub fn new() -> Result<Self, Error> {
        dispatcher::open(Backend::compiled())
    }

    /// Create a hasher on an explicit backend.
    ///
    /// # Errors
    /// [`Error::Unsupported`] for `Backend::Kernel` on builds without it, or
    /// any failure opening the `AF_ALG` session.
    pub fn with_backend(backend: Backend) -> Result<Self, Error> {
        dispatcher::open(backend)
    }

    /// The backend this hasher runs on.
    #[must_use]
    pub const fn backend(&self) -> Backend {
        match self {
            #[cfg(all(feature = "kernel", target_os = "linux"))]
            Self::Kernel(_) => Backend::Kernel,
            Self::Portable(_) => Backend::Portable,
        }
    }

    // =========================================================================
    // STATE MODIFICATION
    // =========================================================================

    /// Add data to the hasher. See [`HashBackend::write`].
    ///
    /// # Errors
    /// Backend failure, or writing after [`finalize`](Self::finalize).
    pub fn update(&mut self, data: &[u8]) -> Result<usize, Error> {
        HashBackend::write(self, data)
    }

    /// Finalize and return the digest. See [`HashBackend::finalize`].
    ///
    /// # Errors
    /// Backend failure.
    pub fn finalize(&mut self) -> Result<Digest, Error> {
        HashBackend::finalize(self)
    }

    /// Release backend resources. See [`HashBackend::close`].
    pub fn close(&self) {
        HashBackend::close(self);
    }
}

// =============================================================================
// TRAIT IMPL
// =============================================================================

impl HashBackend for Sha1Hasher {
    fn write(&mut self, data: &[u8]) -> Result<usize, Error> {
        match self {
            #[cfg(all(feature = "kernel", target_os = "linux"))]
            Self::Kernel(h) => h.write(data),
            Self::Portable(h) => h.write(data),
        }
    }

    fn finalize(&mut self) -> Result<Digest, Error> {
        match self {
            #[cfg(all(feature = "kernel", target_os = "linux"))]
            Self::Kernel(h) => h.finalize(),
            Self::Portable(h) => h.finalize(),
        }
    }

    fn close(&self) {
        match self {
            #[cfg(all(feature = "kernel", target_os = "linux"))]
            Self::Kernel(h) => h.close(),
            Self::Portable(h) => h.close(),
        }
    }
}

impl io::Write for Sha1Hasher {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        HashBackend::write(self, buf).map_err(io::Error::from)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
