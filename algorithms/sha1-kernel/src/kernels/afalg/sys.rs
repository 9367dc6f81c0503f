//! Raw system calls on `AF_ALG` descriptors.
//!
//! `std::net` cannot express any of these: there is no `sockaddr_alg`, no
//! accept that skips the peer address, and no plain `send` without a
//! destination.

#![allow(unsafe_code)]

use super::addr::{AlgAddr, ADDR_LEN};
use std::io;
use std::os::fd::{AsRawFd, BorrowedFd, FromRawFd, IntoRawFd, OwnedFd};
use std::ptr;

/// `socket(AF_ALG, SOCK_SEQPACKET, 0)`.
pub fn socket() -> io::Result<OwnedFd> {
    // SAFETY: plain syscall, no pointers.
    let fd = unsafe {
        libc::socket(
            libc::AF_ALG,
            libc::SOCK_SEQPACKET | libc::SOCK_CLOEXEC,
            0,
        )
    };
    if fd < 0 {
        return Err(io::Error::last_os_error());
    }
    // SAFETY: `fd` was just returned by the kernel and is owned by nobody else.
    Ok(unsafe { OwnedFd::from_raw_fd(fd) })
}

/// `bind(fd, addr, sizeof(struct sockaddr_alg))`.
pub fn bind(fd: BorrowedFd<'_>, addr: &AlgAddr) -> io::Result<()> {
    #[allow(clippy::cast_possible_truncation)]
    let len = ADDR_LEN as libc::socklen_t;
    // SAFETY: `addr` is a live, 4-aligned buffer of exactly `len` bytes laid
    // out as `struct sockaddr_alg`; the kernel only reads it.
    let res = unsafe {
        libc::bind(
            fd.as_raw_fd(),
            addr.as_bytes().as_ptr().cast::<libc::sockaddr>(),
            len,
        )
    };
    if res != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// `accept(fd, NULL, NULL)`: the peer address of an `AF_ALG` operation is
/// meaningless, so none is requested.
pub fn accept(fd: BorrowedFd<'_>) -> io::Result<OwnedFd> {
    // SAFETY: null address/length pointers are explicitly allowed by accept(2).
    let op = unsafe {
        libc::accept4(
            fd.as_raw_fd(),
            ptr::null_mut(),
            ptr::null_mut(),
            libc::SOCK_CLOEXEC,
        )
    };
    if op < 0 {
        return Err(io::Error::last_os_error());
    }
    // SAFETY: fresh descriptor from the kernel.
    Ok(unsafe { OwnedFd::from_raw_fd(op) })
}

/// `send(fd, data, len, MSG_MORE)`: tells the kernel more input follows, so
/// the hash is only finalized by the next read.
pub fn send_more(fd: BorrowedFd<'_>, data: &[u8]) -> io::Result<usize> {
    // SAFETY: `data` is valid for `data.len()` bytes for the whole call.
    let n = unsafe {
        libc::send(
            fd.as_raw_fd(),
            data.as_ptr().cast::<libc::c_void>(),
            data.len(),
            libc::MSG_MORE,
        )
    };
    usize::try_from(n).map_err(|_| io::Error::last_os_error())
}

/// `read(fd, buf, len)`.
pub fn read(fd: BorrowedFd<'_>, buf: &mut [u8]) -> io::Result<usize> {
    // SAFETY: `buf` is valid and exclusively borrowed for `buf.len()` bytes.
    let n = unsafe {
        libc::read(
            fd.as_raw_fd(),
            buf.as_mut_ptr().cast::<libc::c_void>(),
            buf.len(),
        )
    };
    usize::try_from(n).map_err(|_| io::Error::last_os_error())
}

/// `close(fd)`. The descriptor is released whatever the result.
pub fn close(fd: OwnedFd) -> io::Result<()> {
    let raw = fd.into_raw_fd();
    // SAFETY: ownership was just released by `into_raw_fd`, nothing else
    // closes `raw`.
    if unsafe { libc::close(raw) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}
