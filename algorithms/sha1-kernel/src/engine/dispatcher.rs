//! Backend Dispatcher
//!
//! Picks the backend compiled into this build and opens sessions on it.

use crate::kernels::portable::PortableHasher;
use crate::streaming::Sha1Hasher;
use crate::types::{Backend, Error};
use tracing::debug;

// =============================================================================
// DISPATCHER
// =============================================================================

/// Whether the kernel backend is part of this build.
pub const KERNEL_COMPILED: bool = cfg!(all(feature = "kernel", target_os = "linux"));

impl Backend {
    /// The backend [`Sha1Hasher::new`] uses: `Kernel` on Linux builds with the
    /// `kernel` feature, `Portable` otherwise.
    #[must_use]
    pub const fn compiled() -> Self {
        if KERNEL_COMPILED {
            Self::Kernel
        } else {
            Self::Portable
        }
    }
}

/// Open a hasher on `backend`.
///
/// # Errors
/// [`Error::Unsupported`] when asking for the kernel backend on a build that
/// lacks it; otherwise whatever opening the kernel session reports.
pub fn open(backend: Backend) -> Result<Sha1Hasher, Error> {
    match backend {
        Backend::Portable => Ok(Sha1Hasher::Portable(PortableHasher::new())),
        Backend::Kernel => open_kernel(),
    }
}

#[cfg(all(feature = "kernel", target_os = "linux"))]
fn open_kernel() -> Result<Sha1Hasher, Error> {
    crate::kernels::afalg::AfAlgSession::open().map(Sha1Hasher::Kernel)
}

#[cfg(not(all(feature = "kernel", target_os = "linux")))]
fn open_kernel() -> Result<Sha1Hasher, Error> {
    debug!("kernel backend requested but not compiled in");
    Err(Error::Unsupported)
}

/// Open a hasher on `backend`, falling back to the portable one when the
/// kernel facility is missing.
///
/// Errors other than an unavailable facility are still returned.
///
/// # Errors
/// See [`open`].
pub fn open_or_portable(backend: Backend) -> Result<Sha1Hasher, Error> {
    match open(backend) {
        Err(e) if e.is_unavailable() => {
            debug!(error = %e, "kernel backend unavailable, using portable");
            open(Backend::Portable)
        }
        other => other,
    }
}

/// Returns the name of the backend compiled into this build.
#[must_use]
pub const fn get_active_backend_name() -> &'static str {
    Backend::compiled().name()
}
