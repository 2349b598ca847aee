//! ABI layer for positioned and scatter-gather I/O (`pread64`, `pwrite64`,
//! `readv`, `writev`).
//!
//! Neither buffers nor iovec arrays are ever touched.

use std::ffi::{c_int, c_void};

use libc::{iovec, off64_t, ssize_t};
use stublibc_core::Symbol;

use crate::runtime_policy;

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn pread64(
    _fd: c_int,
    _buf: *mut c_void,
    _count: usize,
    _offset: off64_t,
) -> ssize_t {
    runtime_policy::apply(Symbol::Pread64)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn pwrite64(
    _fd: c_int,
    _buf: *const c_void,
    _count: usize,
    _offset: off64_t,
) -> ssize_t {
    runtime_policy::apply(Symbol::Pwrite64)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn readv(_fd: c_int, _iov: *const iovec, _iovcnt: c_int) -> ssize_t {
    runtime_policy::apply(Symbol::Readv)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn writev(_fd: c_int, _iov: *const iovec, _iovcnt: c_int) -> ssize_t {
    runtime_policy::apply(Symbol::Writev)
}
