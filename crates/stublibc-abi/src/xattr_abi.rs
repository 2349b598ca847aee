//! ABI layer for descriptor-based `<sys/xattr.h>` functions.
//!
//! Extended attributes need a filesystem; every call fails with `ENOTSUP`.

use std::ffi::{c_char, c_int, c_void};

use libc::ssize_t;
use stublibc_core::Symbol;

use crate::runtime_policy;

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn fgetxattr(
    _fd: c_int,
    _name: *const c_char,
    _value: *mut c_void,
    _size: usize,
) -> ssize_t {
    runtime_policy::apply(Symbol::Fgetxattr)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn fsetxattr(
    _fd: c_int,
    _name: *const c_char,
    _value: *const c_void,
    _size: usize,
    _flags: c_int,
) -> c_int {
    runtime_policy::apply(Symbol::Fsetxattr)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn fremovexattr(_fd: c_int, _name: *const c_char) -> c_int {
    runtime_policy::apply(Symbol::Fremovexattr)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn flistxattr(_fd: c_int, _list: *mut c_char, _size: usize) -> ssize_t {
    runtime_policy::apply(Symbol::Flistxattr)
}
