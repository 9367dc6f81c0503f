//! Shared types used across the crate: constants, the digest interface and errors.

use core::fmt;
use std::io;

// =============================================================================
// ALGORITHM CONSTANTS
// =============================================================================

/// SHA-1 digest size in bytes.
pub const SIZE: usize = 20;

/// SHA-1 block size in bytes.
pub const BLOCK_SIZE: usize = 64;

/// A finished SHA-1 digest.
pub type Digest = [u8; SIZE];

// =============================================================================
// DIGEST INTERFACE
// =============================================================================

/// The capability every backend provides: append, finalize, release.
///
/// Bytes passed to successive [`write`](HashBackend::write) calls are hashed
/// as one concatenated message, in call order.
pub trait HashBackend {
    /// Append `data` to the running computation.
    ///
    /// Writing an empty slice is a no-op and returns `Ok(0)`.
    ///
    /// # Errors
    /// Backend-specific; the kernel backend surfaces the raw OS error.
    fn write(&mut self, data: &[u8]) -> Result<usize, Error>;

    /// Complete the computation and return the digest.
    ///
    /// Calling this again returns the same digest.
    ///
    /// # Errors
    /// Backend-specific; see [`Error`].
    fn finalize(&mut self) -> Result<Digest, Error>;

    /// Release every resource held by the backend.
    ///
    /// Idempotent and infallible.
    fn close(&self);
}

// =============================================================================
// BACKEND IDENTITY
// =============================================================================

/// The two available implementations of [`HashBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Linux kernel crypto API through an `AF_ALG` socket.
    Kernel,
    /// Pure Rust software implementation.
    Portable,
}

impl Backend {
    /// Human-readable backend name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Kernel => "Kernel (AF_ALG)",
            Self::Portable => "Portable",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors returned by the hashing backends.
///
/// Syscall failures carry the OS error and name the step that failed.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The kernel backend is not part of this build or platform.
    #[error("kernel crypto backend not supported on this build")]
    Unsupported,

    /// `socket(AF_ALG, ..)` failed.
    #[error("failed creating crypto socket: {0}")]
    Socket(io::Error),

    /// Binding the transform socket to the algorithm failed.
    #[error("failed binding crypto connection: {0}")]
    Bind(io::Error),

    /// Accepting the operation socket failed.
    #[error("failed accepting crypto connection: {0}")]
    Accept(io::Error),

    /// Sending data to the operation socket failed.
    #[error("failed writing to crypto connection: {0}")]
    Write(io::Error),

    /// Reading the digest back failed.
    #[error("failed reading digest: {0}")]
    Read(io::Error),

    /// The kernel returned a digest of the wrong length.
    #[error("invalid digest length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Bytes requested.
        expected: usize,
        /// Bytes returned.
        actual: usize,
    },

    /// The session has already been closed.
    #[error("hashing session is closed")]
    Closed,

    /// Data was written after the digest was read.
    #[error("hashing session already finalized")]
    Finalized,
}

impl Error {
    /// Whether this error means the kernel facility itself is missing
    /// (no `AF_ALG` support, or no `sha1` transform registered).
    ///
    /// Such errors are only ever produced at construction. Resource
    /// exhaustion (`EMFILE`, `ENFILE`) or a denied socket does not count.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        match self {
            Self::Unsupported => true,
            Self::Socket(e) => is_missing_family(e),
            Self::Bind(e) => e.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }

    /// The underlying OS error code, if any.
    #[must_use]
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Self::Socket(e) | Self::Bind(e) | Self::Accept(e) | Self::Write(e) | Self::Read(e) => {
                e.raw_os_error()
            }
            _ => None,
        }
    }
}

/// `socket(AF_ALG, ..)` fails this way when the kernel has no `AF_ALG`.
#[cfg(all(feature = "kernel", target_os = "linux"))]
fn is_missing_family(e: &io::Error) -> bool {
    matches!(
        e.raw_os_error(),
        Some(libc::EAFNOSUPPORT | libc::EPROTONOSUPPORT)
    )
}

#[cfg(not(all(feature = "kernel", target_os = "linux")))]
const fn is_missing_family(_: &io::Error) -> bool {
    false
}

impl From<Error> for io::Error {
    fn from(e: Error) -> Self {
        match e {
            Error::Write(inner) | Error::Read(inner) => inner,
            Error::Unsupported => Self::new(io::ErrorKind::Unsupported, Error::Unsupported),
            other => Self::other(other),
        }
    }
}
