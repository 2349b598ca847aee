//! ABI layer for `<dlfcn.h>` introspection.
//!
//! `dlopen`, `dlsym`, `dlclose` and `dlerror` come from the platform loader.
//! Only `dladdr` is stubbed: no symbol table is available to search.

use std::ffi::{c_int, c_void};

use libc::Dl_info;
use stublibc_core::Symbol;

use crate::runtime_policy;

/// `dladdr`. Returns `0` (no match); `info` is not written.
#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn dladdr(_addr: *const c_void, _info: *mut Dl_info) -> c_int {
    runtime_policy::apply(Symbol::Dladdr)
}
