//! Hashing Backends
//!
//! The kernel-accelerated backend (Linux, `kernel` feature) and the portable fallback.

#[cfg(all(feature = "kernel", target_os = "linux"))]
pub mod afalg;
pub mod portable;
