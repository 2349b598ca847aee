//! ABI access to `errno` for stub failure paths.
//!
//! The stub layer owns no errno storage: it writes the platform's
//! thread-local slot so the hosted runtime reads codes through its usual
//! `errno`.

use std::ffi::c_int;

/// Store `val` in the calling thread's errno.
#[inline]
pub fn set_abi_errno(val: c_int) {
    // SAFETY: `__errno_location` returns a valid pointer to this thread's errno.
    let p = unsafe { libc::__errno_location() };
    // SAFETY: see above; the slot is only ever touched by its own thread.
    unsafe { *p = val };
}

/// Current errno of the calling thread.
#[inline]
#[must_use]
pub fn abi_errno() -> c_int {
    // SAFETY: `__errno_location` returns a valid pointer to this thread's errno.
    unsafe { *libc::__errno_location() }
}
