//! Kernel Backend (`AF_ALG`)
//!
//! Delegates SHA-1 to the Linux kernel crypto API. The kernel does all the
//! hashing; this module is socket plumbing:
//!
//! 1. `socket(AF_ALG, SOCK_SEQPACKET, 0)` creates the transform socket.
//! 2. `bind` attaches it to the `hash`/`sha1` transform.
//! 3. `accept` yields the operation socket for one computation.
//! 4. `send(.., MSG_MORE)` streams input; `read` returns the digest.

// =============================================================================
// MODULES
// =============================================================================

mod addr;
mod session;
mod sys;

// =============================================================================
// EXPORTS
// =============================================================================

pub use addr::{AlgAddr, ADDR_LEN, AF_ALG, SHA1_ADDR};
pub use session::AfAlgSession;
