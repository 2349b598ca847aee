//! ABI layer for memory mapping.
//!
//! `mmap` and `munmap` themselves are supplied by the enclave platform. This
//! module rejects the 64-bit-offset variant and exposes the underscore
//! aliases some runtimes link against, forwarding them unchanged.

use std::ffi::{c_int, c_void};

use libc::{off_t, off64_t};
use stublibc_core::Symbol;

use crate::runtime_policy;

/// `mmap64`. Fails with `ENOMEM` and returns `MAP_FAILED`.
#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn mmap64(
    _addr: *mut c_void,
    _length: usize,
    _prot: c_int,
    _flags: c_int,
    _fd: c_int,
    _offset: off64_t,
) -> *mut c_void {
    runtime_policy::apply(Symbol::Mmap64)
}

/// Alias of `mmap`.
///
/// # Safety
///
/// Same contract as `mmap(2)`.
#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn _mmap(
    addr: *mut c_void,
    length: usize,
    prot: c_int,
    flags: c_int,
    fd: c_int,
    offset: off_t,
) -> *mut c_void {
    debug_assert_eq!(Symbol::Mmap.policy().forward_target(), Some("mmap"));
    // SAFETY: arguments pass through unchanged; the caller upholds mmap's contract.
    unsafe { libc::mmap(addr, length, prot, flags, fd, offset) }
}

/// Alias of `munmap`.
///
/// # Safety
///
/// Same contract as `munmap(2)`.
#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn _munmap(addr: *mut c_void, length: usize) -> c_int {
    debug_assert_eq!(Symbol::Munmap.policy().forward_target(), Some("munmap"));
    // SAFETY: arguments pass through unchanged; the caller upholds munmap's contract.
    unsafe { libc::munmap(addr, length) }
}
