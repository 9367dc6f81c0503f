//! `AF_ALG` Socket Address
//!
//! Byte-exact encoding of the kernel's `struct sockaddr_alg`:
//!
//! | offset | size | field         |
//! |--------|------|---------------|
//! | 0      | 2    | `salg_family` |
//! | 2      | 14   | `salg_type`   |
//! | 16     | 4    | `salg_feat`   |
//! | 20     | 4    | `salg_mask`   |
//! | 24     | 64   | `salg_name`   |

// =============================================================================
// LAYOUT
// =============================================================================

/// `AF_ALG` address family number (stable kernel ABI).
pub const AF_ALG: u16 = 38;

/// Total size of `struct sockaddr_alg`.
pub const ADDR_LEN: usize = 88;

pub(crate) const FAMILY_OFFSET: usize = 0;
pub(crate) const TYPE_OFFSET: usize = 2;
pub(crate) const TYPE_LEN: usize = 14;
// salg_feat and salg_mask are always zero; only the layout tests read them.
#[cfg(test)]
const FEAT_OFFSET: usize = 16;
#[cfg(test)]
const MASK_OFFSET: usize = 20;
pub(crate) const NAME_OFFSET: usize = 24;
pub(crate) const NAME_LEN: usize = 64;

/// Address of the SHA-1 hash transform.
pub const SHA1_ADDR: AlgAddr = AlgAddr::hash(b"sha1");

// =============================================================================
// ADDRESS
// =============================================================================

/// A `struct sockaddr_alg` as raw bytes.
///
/// Four-byte alignment matches the `u32` feature/mask fields.
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(C, align(4))]
pub struct AlgAddr([u8; ADDR_LEN]);

impl AlgAddr {
    /// Build an address for transform `kind` (e.g. `b"hash"`) and algorithm `name`.
    ///
    /// Both strings are NUL-padded. Anything that would not leave room for the
    /// terminating NUL is cut off.
    #[must_use]
    pub const fn new(kind: &[u8], name: &[u8]) -> Self {
        let mut bytes = [0u8; ADDR_LEN];

        let family = AF_ALG.to_ne_bytes();
        bytes[FAMILY_OFFSET] = family[0];
        bytes[FAMILY_OFFSET + 1] = family[1];

        copy_field(&mut bytes, TYPE_OFFSET, TYPE_LEN, kind);
        // salg_feat and salg_mask stay zero.
        copy_field(&mut bytes, NAME_OFFSET, NAME_LEN, name);

        Self(bytes)
    }

    /// Address of a hash transform named `name`.
    #[must_use]
    pub const fn hash(name: &[u8]) -> Self {
        Self::new(b"hash", name)
    }

    /// Raw bytes, as handed to `bind(2)`.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ADDR_LEN] {
        &self.0
    }

    /// The transform type, without NUL padding.
    #[must_use]
    pub fn kind(&self) -> &[u8] {
        trim_nul(&self.0[TYPE_OFFSET..TYPE_OFFSET + TYPE_LEN])
    }

    /// The algorithm name, without NUL padding.
    #[must_use]
    pub fn name(&self) -> &[u8] {
        trim_nul(&self.0[NAME_OFFSET..NAME_OFFSET + NAME_LEN])
    }

    /// `salg_feat`, `salg_mask`.
    #[cfg(test)]
    fn feat_mask(&self) -> (u32, u32) {
        let word = |at: usize| {
            u32::from_ne_bytes([self.0[at], self.0[at + 1], self.0[at + 2], self.0[at + 3]])
        };
        (word(FEAT_OFFSET), word(MASK_OFFSET))
    }
}

impl core::fmt::Debug for AlgAddr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AlgAddr")
            .field("type", &String::from_utf8_lossy(self.kind()))
            .field("name", &String::from_utf8_lossy(self.name()))
            .finish()
    }
}

// =============================================================================
// HELPERS
// =============================================================================

const fn copy_field(bytes: &mut [u8; ADDR_LEN], offset: usize, cap: usize, src: &[u8]) {
    let len = if src.len() < cap { src.len() } else { cap - 1 };
    let mut i = 0;
    while i < len {
        bytes[offset + i] = src[i];
        i += 1;
    }
}

fn trim_nul(field: &[u8]) -> &[u8] {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    &field[..end]
}
