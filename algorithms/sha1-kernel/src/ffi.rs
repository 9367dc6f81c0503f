//! C-API Bindings
//!
//! Exposes the one-shot digest and the session API to C via FFI, with pointer
//! checks and panic boundaries.
//!
//! Return codes shared by every function returning `i32`:
//! - `0`: Success
//! - `-1`: Null pointer
//! - `-2`: Panic
//! - `-3`: Hashing error (backend unavailable, syscall failure, ...)

#![allow(unsafe_code)]

use crate::oneshot;
use crate::streaming::Sha1Hasher;
use crate::types::{Backend, Error, HashBackend, SIZE};

use std::ffi::{c_char, CStr};
use std::panic::{self, AssertUnwindSafe};
use std::ptr;
use std::slice;
use std::thread;

// =============================================================================
// CONSTANTS
// =============================================================================

const OK: i32 = 0;
const NULL_POINTER: i32 = -1;
const PANICKED: i32 = -2;
const HASH_FAILED: i32 = -3;

/// Borrow `len` bytes at `ptr`; a null pointer is fine when `len == 0`.
unsafe fn input<'a>(ptr: *const u8, len: usize) -> Option<&'a [u8]> {
    match (ptr.is_null(), len) {
        (true, 0) => Some(&[]),
        (true, _) => None,
        (false, _) => Some(slice::from_raw_parts(ptr, len)),
    }
}

// =============================================================================
// ONE-SHOT API
// =============================================================================

/// Compute the SHA-1 digest of a buffer.
///
/// # Safety
/// - `input_ptr` must be valid for `input_len` bytes (may be null if `input_len == 0`)
/// - `output_ptr` must be valid for 20 writable bytes
#[no_mangle]
pub unsafe extern "C" fn sha1_kernel_digest(
    input_ptr: *const u8,
    input_len: usize,
    output_ptr: *mut u8,
) -> i32 {
    let Some(data) = input(input_ptr, input_len) else {
        return NULL_POINTER;
    };
    if output_ptr.is_null() {
        return NULL_POINTER;
    }

    match panic::catch_unwind(|| oneshot::digest(data)) {
        Ok(Ok(digest)) => {
            ptr::copy_nonoverlapping(digest.as_ptr(), output_ptr, SIZE);
            OK
        }
        Ok(Err(_)) => HASH_FAILED,
        Err(_) => PANICKED,
    }
}

// =============================================================================
// SESSION API
// =============================================================================

/// Opaque hasher handle for C.
pub struct Sha1KernelHasher(Sha1Hasher);

/// Open a hasher on the compiled-in backend. Returns NULL on failure.
/// Caller must release it with `sha1_kernel_close`.
#[no_mangle]
pub extern "C" fn sha1_kernel_open() -> *mut Sha1KernelHasher {
    match panic::catch_unwind(Sha1Hasher::new) {
        Ok(Ok(hasher)) => Box::into_raw(Box::new(Sha1KernelHasher(hasher))),
        _ => ptr::null_mut(),
    }
}

/// Feed data into the hasher. Returns `0` only if all `len` bytes were hashed.
///
/// # Safety
/// - `state_ptr` must be a live pointer obtained from `sha1_kernel_open`
/// - `data_ptr` must be valid for `len` bytes (may be null if `len == 0`)
#[no_mangle]
pub unsafe extern "C" fn sha1_kernel_write(
    state_ptr: *mut Sha1KernelHasher,
    data_ptr: *const u8,
    len: usize,
) -> i32 {
    if state_ptr.is_null() {
        return NULL_POINTER;
    }
    let Some(data) = input(data_ptr, len) else {
        return NULL_POINTER;
    };
    let hasher = &mut (*state_ptr).0;

    write_status(panic::catch_unwind(AssertUnwindSafe(|| hasher.write(data))), len)
}

/// Success only when all `len` bytes went into the hash.
fn write_status(result: thread::Result<Result<usize, Error>>, len: usize) -> i32 {
    match result {
        Ok(Ok(n)) if n == len => OK,
        Ok(_) => HASH_FAILED,
        Err(_) => PANICKED,
    }
}

/// Write the digest to `out_ptr`. The handle stays valid; calling this again
/// yields the same digest.
///
/// # Safety
/// - `state_ptr` must be a live pointer obtained from `sha1_kernel_open`
/// - `out_ptr` must be valid for 20 writable bytes
#[no_mangle]
pub unsafe extern "C" fn sha1_kernel_finalize(
    state_ptr: *mut Sha1KernelHasher,
    out_ptr: *mut u8,
) -> i32 {
    if state_ptr.is_null() || out_ptr.is_null() {
        return NULL_POINTER;
    }
    let hasher = &mut (*state_ptr).0;

    match panic::catch_unwind(AssertUnwindSafe(|| hasher.finalize())) {
        Ok(Ok(digest)) => {
            ptr::copy_nonoverlapping(digest.as_ptr(), out_ptr, SIZE);
            OK
        }
        Ok(Err(_)) => HASH_FAILED,
        Err(_) => PANICKED,
    }
}

/// Close the hasher and free the handle.
///
/// # Safety
/// - `state_ptr` must be a pointer obtained from `sha1_kernel_open`, or null;
///   it must not be used afterwards
#[no_mangle]
pub unsafe extern "C" fn sha1_kernel_close(state_ptr: *mut Sha1KernelHasher) {
    if state_ptr.is_null() {
        return;
    }
    let hasher = Box::from_raw(state_ptr);
    hasher.0.close();
}

/// Get the name of the compiled-in backend.
///
/// # Returns
/// A pointer to a static, null-terminated C string. Must NOT be freed by the caller.
#[no_mangle]
pub extern "C" fn sha1_kernel_backend_name() -> *const c_char {
    let name: &'static CStr = match Backend::compiled() {
        Backend::Kernel => c"Kernel (AF_ALG)",
        Backend::Portable => c"Portable",
    };
    name.as_ptr()
}
