//! ABI layer for `<netdb.h>` resolution and `gethostname`.
//!
//! Resolution reports the generic `EAI_FAIL` through its return value and
//! leaves `*res` and output buffers alone. `gai_strerror` answers every code
//! with the same static text.

use std::ffi::{c_char, c_int};

use libc::{addrinfo, sockaddr, socklen_t};
use stublibc_core::Symbol;

use crate::runtime_policy;

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn getaddrinfo(
    _node: *const c_char,
    _service: *const c_char,
    _hints: *const addrinfo,
    _res: *mut *mut addrinfo,
) -> c_int {
    runtime_policy::apply(Symbol::Getaddrinfo)
}

/// POSIX `freeaddrinfo`. Nothing was ever allocated.
#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn freeaddrinfo(_res: *mut addrinfo) {
    runtime_policy::apply(Symbol::Freeaddrinfo)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn getnameinfo(
    _sa: *const sockaddr,
    _salen: socklen_t,
    _host: *mut c_char,
    _hostlen: socklen_t,
    _serv: *mut c_char,
    _servlen: socklen_t,
    _flags: c_int,
) -> c_int {
    runtime_policy::apply(Symbol::Getnameinfo)
}

/// POSIX `gai_strerror`. The returned string is static and must not be freed.
#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn gai_strerror(_errcode: c_int) -> *const c_char {
    runtime_policy::apply(Symbol::GaiStrerror)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn gethostname(_name: *mut c_char, _len: usize) -> c_int {
    runtime_policy::apply(Symbol::Gethostname)
}
