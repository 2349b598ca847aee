//! ABI layer for the `<pthread.h>` attribute teardown the platform omits.

use std::ffi::c_int;

use libc::pthread_condattr_t;
use stublibc_core::Symbol;

use crate::runtime_policy;

/// POSIX `pthread_condattr_destroy`. Nothing to release.
#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn pthread_condattr_destroy(_attr: *mut pthread_condattr_t) -> c_int {
    runtime_policy::apply(Symbol::PthreadCondattrDestroy)
}
