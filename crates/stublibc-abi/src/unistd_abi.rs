//! ABI layer for descriptor and path based file operations.
//!
//! Covers `<fcntl.h>` (`open`, `fcntl`), `<unistd.h>` I/O and metadata, and
//! the path helpers `<stdio.h>` / `<stdlib.h>` declare (`rename`, `remove`,
//! `realpath`). No filesystem exists behind any of them: lookups fail with
//! `ENOENT`, mutations with `ENOSYS`, and descriptor teardown or sync
//! succeeds without effect.
//!
//! `write` is the one sharp edge: it claims the full count was written.

use std::ffi::{c_char, c_int, c_long, c_void};

use libc::{gid_t, mode_t, off_t, off64_t, ssize_t, timeval, uid_t};
use stublibc_core::Symbol;

use crate::runtime_policy;

// ---------------------------------------------------------------------------
// open / close
// ---------------------------------------------------------------------------

/// POSIX `open`. The optional `mode` argument is never read.
#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn open(_pathname: *const c_char, _flags: c_int) -> c_int {
    runtime_policy::apply(Symbol::Open)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn open64(_pathname: *const c_char, _flags: c_int) -> c_int {
    runtime_policy::apply(Symbol::Open64)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn close(_fd: c_int) -> c_int {
    runtime_policy::apply(Symbol::Close)
}

// ---------------------------------------------------------------------------
// read / write
// ---------------------------------------------------------------------------

/// POSIX `read`. Fails with `EIO`; `buf` is never written.
#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn read(_fd: c_int, _buf: *mut c_void, _count: usize) -> ssize_t {
    runtime_policy::apply(Symbol::Read)
}

/// POSIX `write`.
///
/// Claims all `count` bytes were written and does nothing. Callers that use
/// the return value as evidence of durable output are misled; there is no
/// output channel to write to.
#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn write(_fd: c_int, _buf: *const c_void, count: usize) -> ssize_t {
    runtime_policy::apply_counted(Symbol::Write, count)
}

// ---------------------------------------------------------------------------
// seeking and descriptor control
// ---------------------------------------------------------------------------

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn lseek(_fd: c_int, _offset: off_t, _whence: c_int) -> off_t {
    runtime_policy::apply(Symbol::Lseek)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn lseek64(_fd: c_int, _offset: off64_t, _whence: c_int) -> off64_t {
    runtime_policy::apply(Symbol::Lseek64)
}

/// POSIX `fcntl`. The command argument is never read.
#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn fcntl(_fd: c_int, _cmd: c_int) -> c_int {
    runtime_policy::apply(Symbol::Fcntl)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn fsync(_fd: c_int) -> c_int {
    runtime_policy::apply(Symbol::Fsync)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn fdatasync(_fd: c_int) -> c_int {
    runtime_policy::apply(Symbol::Fdatasync)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn ftruncate64(_fd: c_int, _length: off64_t) -> c_int {
    runtime_policy::apply(Symbol::Ftruncate64)
}

// ---------------------------------------------------------------------------
// path lookup and mutation
// ---------------------------------------------------------------------------

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn access(_pathname: *const c_char, _mode: c_int) -> c_int {
    runtime_policy::apply(Symbol::Access)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn unlink(_pathname: *const c_char) -> c_int {
    runtime_policy::apply(Symbol::Unlink)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn rename(_oldpath: *const c_char, _newpath: *const c_char) -> c_int {
    runtime_policy::apply(Symbol::Rename)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn mkdir(_pathname: *const c_char, _mode: mode_t) -> c_int {
    runtime_policy::apply(Symbol::Mkdir)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn rmdir(_pathname: *const c_char) -> c_int {
    runtime_policy::apply(Symbol::Rmdir)
}

/// POSIX `getcwd`. There is no working directory; `buf` is untouched.
#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn getcwd(_buf: *mut c_char, _size: usize) -> *mut c_char {
    runtime_policy::apply(Symbol::Getcwd)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn realpath(
    _path: *const c_char,
    _resolved_path: *mut c_char,
) -> *mut c_char {
    runtime_policy::apply(Symbol::Realpath)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn utimes(_filename: *const c_char, _times: *const timeval) -> c_int {
    runtime_policy::apply(Symbol::Utimes)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn fchmod(_fd: c_int, _mode: mode_t) -> c_int {
    runtime_policy::apply(Symbol::Fchmod)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn fchown(_fd: c_int, _owner: uid_t, _group: gid_t) -> c_int {
    runtime_policy::apply(Symbol::Fchown)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn remove(_pathname: *const c_char) -> c_int {
    runtime_policy::apply(Symbol::Remove)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn readlink(
    _pathname: *const c_char,
    _buf: *mut c_char,
    _bufsiz: usize,
) -> ssize_t {
    runtime_policy::apply(Symbol::Readlink)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn link(_oldpath: *const c_char, _newpath: *const c_char) -> c_int {
    runtime_policy::apply(Symbol::Link)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn pathconf(_path: *const c_char, _name: c_int) -> c_long {
    runtime_policy::apply(Symbol::Pathconf)
}
