//! Portable Backend
//!
//! Software SHA-1 from the RustCrypto `sha1` crate. Available everywhere.

use crate::types::{Digest, Error, HashBackend};
use sha1::{Digest as _, Sha1};

/// Software SHA-1 hasher.
#[derive(Clone, Default)]
pub struct PortableHasher {
    inner: Sha1,
    digest: Option<Digest>,
}

impl PortableHasher {
    /// Create a new hasher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash `data` in one call.
    #[must_use]
    pub fn oneshot(data: &[u8]) -> Digest {
        Sha1::digest(data).into()
    }
}

impl HashBackend for PortableHasher {
    fn write(&mut self, data: &[u8]) -> Result<usize, Error> {
        if data.is_empty() {
            return Ok(0);
        }
        if self.digest.is_some() {
            return Err(Error::Finalized);
        }
        self.inner.update(data);
        Ok(data.len())
    }

    fn finalize(&mut self) -> Result<Digest, Error> {
        let digest = *self
            .digest
            .get_or_insert_with(|| self.inner.finalize_reset().into());
        Ok(digest)
    }

    fn close(&self) {}
}

impl core::fmt::Debug for PortableHasher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PortableHasher")
            .field("finalized", &self.digest.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn abc_vector() {
        let mut h = PortableHasher::new();
        h.write(b"a").unwrap();
        h.write(b"bc").unwrap();
        assert_eq!(
            hex::encode(h.finalize().unwrap()),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
        assert_eq!(h.finalize().unwrap(), PortableHasher::oneshot(b"abc"));
    }

    #[test]
    fn write_after_finalize_is_rejected() {
        let mut h = PortableHasher::new();
        h.finalize().unwrap();
        assert!(matches!(h.write(b"late"), Err(Error::Finalized)));
        assert_eq!(h.write(b"").unwrap(), 0);
    }
}
