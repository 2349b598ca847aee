//! ABI layer for `<pwd.h>` and `<grp.h>` lookups.
//!
//! There is no user or group database. Lookups report an absent record;
//! caller-provided records, buffers and `*result` are never written.

use std::ffi::{c_char, c_int};

use libc::{gid_t, group, passwd, uid_t};
use stublibc_core::Symbol;

use crate::runtime_policy;

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn getpwuid(_uid: uid_t) -> *mut passwd {
    runtime_policy::apply(Symbol::Getpwuid)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn getpwuid_r(
    _uid: uid_t,
    _pwd: *mut passwd,
    _buf: *mut c_char,
    _buflen: usize,
    _result: *mut *mut passwd,
) -> c_int {
    runtime_policy::apply(Symbol::GetpwuidR)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn getgrgid(_gid: gid_t) -> *mut group {
    runtime_policy::apply(Symbol::Getgrgid)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn getgrgid_r(
    _gid: gid_t,
    _grp: *mut group,
    _buf: *mut c_char,
    _buflen: usize,
    _result: *mut *mut group,
) -> c_int {
    runtime_policy::apply(Symbol::GetgrgidR)
}
