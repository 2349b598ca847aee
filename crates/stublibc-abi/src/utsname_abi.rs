//! ABI layer for `<sys/utsname.h>`.
//!
//! `uname` reports a fixed, plausible platform fingerprint instead of the
//! real host's.

use std::ffi::{c_char, c_int};

use libc::utsname;
use stublibc_core::Symbol;
use stublibc_core::utsname::{ENCLAVE_IDENTITY, copy_field};

use crate::runtime_policy;

fn fill(field: &mut [c_char], value: &str) {
    // SAFETY: `c_char` and `u8` have the same size and alignment, and the
    // slice is exclusively borrowed for the duration of the copy.
    let bytes =
        unsafe { std::slice::from_raw_parts_mut(field.as_mut_ptr().cast::<u8>(), field.len()) };
    copy_field(bytes, value);
}

/// POSIX `uname`.
///
/// Writes `sysname`, `nodename`, `release`, `version` and `machine` from the
/// enclave identity and returns `0`. Other fields are left as they were. A
/// null `buf` is tolerated and still reports success.
///
/// # Safety
///
/// `buf` must be null or valid for writes of one `struct utsname`.
#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn uname(buf: *mut utsname) -> c_int {
    // SAFETY: caller guarantees `buf` is null or points to a writable utsname.
    if let Some(buf) = unsafe { buf.as_mut() } {
        let id = ENCLAVE_IDENTITY;
        fill(&mut buf.sysname, id.sysname);
        fill(&mut buf.nodename, id.nodename);
        fill(&mut buf.release, id.release);
        fill(&mut buf.version, id.version);
        fill(&mut buf.machine, id.machine);
    }
    runtime_policy::apply(Symbol::Uname)
}
