//! Kernel Hashing Session
//!
//! One SHA-1 computation carried out by the kernel: a transform socket bound
//! to the algorithm, and an operation socket accepted from it.

use super::addr::{AlgAddr, SHA1_ADDR};
use super::sys;
use crate::types::{Digest, Error, HashBackend, SIZE};
use std::fmt;
use std::io;
use std::os::fd::{AsFd, AsRawFd, OwnedFd};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, trace};

// =============================================================================
// STATE
// =============================================================================

/// Descriptors owned by a session (`None` means unset), plus the digest once read.
#[derive(Default)]
struct SessionState {
    transform: Option<OwnedFd>,
    operation: Option<OwnedFd>,
    digest: Option<Digest>,
}

/// A SHA-1 computation running inside the kernel crypto API.
///
/// Every method takes `&self`; the descriptors live behind a mutex so that
/// [`close`](Self::close) may race with itself (or with `Drop`) safely.
/// Interleaving `write` calls from several threads is allowed by the type
/// system but hashes the chunks in whatever order the lock is taken.
pub struct AfAlgSession {
    state: Mutex<SessionState>,
}

impl AfAlgSession {
    // =========================================================================
    // CONSTRUCTION
    // =========================================================================

    /// Open a SHA-1 session.
    ///
    /// # Errors
    /// [`Error::Socket`], [`Error::Bind`] or [`Error::Accept`], naming the step
    /// that failed. Use [`Error::is_unavailable`] to tell a missing kernel
    /// facility apart from other failures.
    pub fn open() -> Result<Self, Error> {
        Self::open_with(&SHA1_ADDR)
    }

    /// Open a session bound to an arbitrary `AF_ALG` address.
    ///
    /// Descriptors acquired before a failing step are closed before the error
    /// is returned.
    ///
    /// # Errors
    /// Same as [`open`](Self::open).
    pub fn open_with(addr: &AlgAddr) -> Result<Self, Error> {
        let session = Self {
            state: Mutex::new(SessionState::default()),
        };

        if let Err(e) = session.setup(addr) {
            debug!(?addr, error = %e, "AF_ALG session setup failed");
            session.close();
            return Err(e);
        }

        Ok(session)
    }

    fn setup(&self, addr: &AlgAddr) -> Result<(), Error> {
        let mut guard = self.lock();
        let state = &mut *guard;

        let transform = state.transform.insert(sys::socket().map_err(Error::Socket)?);
        sys::bind(transform.as_fd(), addr).map_err(Error::Bind)?;
        let operation = sys::accept(transform.as_fd()).map_err(Error::Accept)?;

        debug!(
            ?addr,
            transform = transform.as_raw_fd(),
            operation = operation.as_raw_fd(),
            "opened AF_ALG session"
        );
        state.operation = Some(operation);
        Ok(())
    }

    // =========================================================================
    // HASHING
    // =========================================================================

    /// Stream `data` into the kernel.
    ///
    /// One `send(2)` with `MSG_MORE`, no retry. Either the whole of `data` is
    /// accepted and its length returned, or the call fails.
    ///
    /// # Errors
    /// [`Error::Write`] with the OS error, or with
    /// [`WriteZero`](io::ErrorKind::WriteZero) if the kernel took only part of
    /// `data`. [`Error::Closed`] after [`close`](Self::close),
    /// [`Error::Finalized`] after [`finalize`](Self::finalize).
    pub fn write(&self, data: &[u8]) -> Result<usize, Error> {
        if data.is_empty() {
            return Ok(0);
        }

        let state = self.lock();
        let operation = state.operation.as_ref().ok_or(Error::Closed)?;
        if state.digest.is_some() {
            return Err(Error::Finalized);
        }

        let n = sys::send_more(operation.as_fd(), data).map_err(Error::Write)?;
        trace!(fd = operation.as_raw_fd(), len = data.len(), sent = n, "AF_ALG send");
        sent_all(n, data.len())
    }

    /// Read the digest back from the kernel.
    ///
    /// The first successful read is cached: later calls return it without
    /// another syscall, since the kernel would start a fresh (empty) hash.
    ///
    /// # Errors
    /// [`Error::Read`] with the OS error, [`Error::InvalidLength`] on a short
    /// read, [`Error::Closed`] if closed before any digest was read.
    pub fn finalize(&self) -> Result<Digest, Error> {
        let mut state = self.lock();
        if let Some(digest) = state.digest {
            return Ok(digest);
        }

        let operation = state.operation.as_ref().ok_or(Error::Closed)?;
        let mut digest = [0u8; SIZE];
        let n = sys::read(operation.as_fd(), &mut digest).map_err(Error::Read)?;
        trace!(fd = operation.as_raw_fd(), read = n, "AF_ALG digest read");
        if n != SIZE {
            return Err(Error::InvalidLength {
                expected: SIZE,
                actual: n,
            });
        }

        state.digest = Some(digest);
        Ok(digest)
    }

    // =========================================================================
    // TEARDOWN
    // =========================================================================

    /// Close both descriptors. Safe to call any number of times, from any
    /// thread; only the first call does anything.
    pub fn close(&self) {
        let mut state = self.lock();
        let operation = state.operation.take();
        let transform = state.transform.take();

        for (role, fd) in [("operation", operation), ("transform", transform)] {
            let Some(fd) = fd else { continue };
            let raw = fd.as_raw_fd();
            match sys::close(fd) {
                Ok(()) => debug!(role, fd = raw, "closed AF_ALG descriptor"),
                Err(e) => debug!(role, fd = raw, error = %e, "closing AF_ALG descriptor failed"),
            }
        }
    }

    /// Whether the operation descriptor is still held.
    pub fn is_open(&self) -> bool {
        self.lock().operation.is_some()
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        // The state is plain Options; a panic elsewhere cannot leave it torn.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A short `send` would leave the tail of the chunk out of the digest.
fn sent_all(sent: usize, len: usize) -> Result<usize, Error> {
    if sent < len {
        return Err(Error::Write(io::Error::new(
            io::ErrorKind::WriteZero,
            format!("kernel accepted {sent} of {len} bytes"),
        )));
    }
    Ok(len)
}

// =============================================================================
// TRAIT IMPL
// =============================================================================

impl HashBackend for AfAlgSession {
    fn write(&mut self, data: &[u8]) -> Result<usize, Error> {
        Self::write(self, data)
    }

    fn finalize(&mut self) -> Result<Digest, Error> {
        Self::finalize(self)
    }

    fn close(&self) {
        Self::close(self);
    }
}

impl Drop for AfAlgSession {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for AfAlgSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("AfAlgSession")
            .field("transform", &state.transform.as_ref().map(AsRawFd::as_raw_fd))
            .field("operation", &state.operation.as_ref().map(AsRawFd::as_raw_fd))
            .field("finalized", &state.digest.is_some())
            .finish()
    }
}
