//! ABI layer for `<dirent.h>` functions (`opendir`, `readdir`, `closedir`).
//!
//! No directory can be opened. `readdir` ends the sequence on its first call
//! whatever handle it is given, so iteration loops in the caller terminate
//! immediately.

use std::ffi::{c_char, c_int};

use libc::{DIR, dirent};
use stublibc_core::Symbol;

use crate::runtime_policy;

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn opendir(_name: *const c_char) -> *mut DIR {
    runtime_policy::apply(Symbol::Opendir)
}

/// POSIX `readdir`. Always end of directory; errno is left unchanged.
#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn readdir(_dirp: *mut DIR) -> *mut dirent {
    runtime_policy::apply(Symbol::Readdir)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn closedir(_dirp: *mut DIR) -> c_int {
    runtime_policy::apply(Symbol::Closedir)
}
