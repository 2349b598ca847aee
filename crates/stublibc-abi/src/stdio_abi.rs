//! ABI layer for `<stdio.h>` stream functions.
//!
//! There is no output channel inside the enclave. Formatting and write calls
//! discard their input and report `0`; opening a stream fails with `ENOENT`;
//! teardown and status queries succeed without effect.

use std::ffi::{c_char, c_int, c_void};
use std::ptr::{self, NonNull};

use libc::FILE;
use stublibc_core::{Symbol, errno};

use crate::runtime_policy;

/// A `FILE *` slot that is never initialized.
#[repr(transparent)]
pub struct StreamHandle(*mut FILE);

// SAFETY: the wrapped pointer is null for the life of the process and no code
// path writes it, so sharing it between threads cannot race.
unsafe impl Sync for StreamHandle {}

impl StreamHandle {
    pub const UNSET: Self = Self(ptr::null_mut());

    #[must_use]
    pub fn is_unset(&self) -> bool {
        self.0.is_null()
    }
}

/// Global `stderr` pointer. Permanently null.
///
/// Runtimes that dereference it without checking crash; go through
/// [`standard_stream`] instead.
#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
#[allow(non_upper_case_globals)]
pub static stderr: StreamHandle = StreamHandle::UNSET;

/// Capability accessor for the standard error stream.
///
/// Always `Err(EBADF)`: no stream is reachable from inside the enclave.
pub fn standard_stream() -> Result<NonNull<FILE>, c_int> {
    NonNull::new(stderr.0).ok_or(errno::EBADF)
}

// ---------------------------------------------------------------------------
// printf family
// ---------------------------------------------------------------------------

/// POSIX `printf`. Output is discarded.
#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn printf(_format: *const c_char) -> c_int {
    runtime_policy::apply(Symbol::Printf)
}

/// POSIX `fprintf`. Output is discarded.
#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn fprintf(_stream: *mut FILE, _format: *const c_char) -> c_int {
    runtime_policy::apply(Symbol::Fprintf)
}

/// POSIX `vfprintf`. `ap` is never walked.
#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn vfprintf(
    _stream: *mut FILE,
    _format: *const c_char,
    _ap: *mut c_void,
) -> c_int {
    runtime_policy::apply(Symbol::Vfprintf)
}

/// POSIX `puts`. Output is discarded.
#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn puts(_s: *const c_char) -> c_int {
    runtime_policy::apply(Symbol::Puts)
}

/// POSIX `sprintf`. `str` is left untouched, not even NUL-terminated.
#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn sprintf(_str: *mut c_char, _format: *const c_char) -> c_int {
    runtime_policy::apply(Symbol::Sprintf)
}

// ---------------------------------------------------------------------------
// buffered I/O
// ---------------------------------------------------------------------------

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn fflush(_stream: *mut FILE) -> c_int {
    runtime_policy::apply(Symbol::Fflush)
}

/// POSIX `fwrite`.
///
/// Returns `0` items written rather than `nmemb`: unlike [`write`], this
/// entry point reports that nothing reached a stream.
///
/// [`write`]: crate::unistd_abi::write
#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn fwrite(
    _ptr: *const c_void,
    _size: usize,
    _nmemb: usize,
    _stream: *mut FILE,
) -> usize {
    runtime_policy::apply(Symbol::Fwrite)
}

/// POSIX `fgets`. End of stream on every call; `s` is untouched.
#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn fgets(_s: *mut c_char, _size: c_int, _stream: *mut FILE) -> *mut c_char {
    runtime_policy::apply(Symbol::Fgets)
}

// ---------------------------------------------------------------------------
// fopen / fdopen / fclose
// ---------------------------------------------------------------------------

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn fopen(_pathname: *const c_char, _mode: *const c_char) -> *mut FILE {
    runtime_policy::apply(Symbol::Fopen)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn fdopen(_fd: c_int, _mode: *const c_char) -> *mut FILE {
    runtime_policy::apply(Symbol::Fdopen)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn fclose(_stream: *mut FILE) -> c_int {
    runtime_policy::apply(Symbol::Fclose)
}

// ---------------------------------------------------------------------------
// stream status
// ---------------------------------------------------------------------------

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn rewind(_stream: *mut FILE) {
    runtime_policy::apply(Symbol::Rewind)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn ferror(_stream: *mut FILE) -> c_int {
    runtime_policy::apply(Symbol::Ferror)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn feof(_stream: *mut FILE) -> c_int {
    runtime_policy::apply(Symbol::Feof)
}
