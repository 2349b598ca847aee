//! ABI layer for `<sys/socket.h>` functions.
//!
//! The enclave has no network stack. Each call fails with the errno a real
//! stack reports when that capability is missing, so the hosted runtime's
//! existing fallback paths see codes they already handle. Output parameters
//! (addresses, lengths, option buffers, socket pairs) are never written.

use std::ffi::{c_int, c_void};

use libc::{sockaddr, socklen_t, ssize_t};
use stublibc_core::Symbol;

use crate::runtime_policy;

// ---------------------------------------------------------------------------
// lifecycle
// ---------------------------------------------------------------------------

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn socket(_domain: c_int, _ty: c_int, _protocol: c_int) -> c_int {
    runtime_policy::apply(Symbol::Socket)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn connect(
    _sockfd: c_int,
    _addr: *const sockaddr,
    _addrlen: socklen_t,
) -> c_int {
    runtime_policy::apply(Symbol::Connect)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn bind(
    _sockfd: c_int,
    _addr: *const sockaddr,
    _addrlen: socklen_t,
) -> c_int {
    runtime_policy::apply(Symbol::Bind)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn listen(_sockfd: c_int, _backlog: c_int) -> c_int {
    runtime_policy::apply(Symbol::Listen)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn accept(
    _sockfd: c_int,
    _addr: *mut sockaddr,
    _addrlen: *mut socklen_t,
) -> c_int {
    runtime_policy::apply(Symbol::Accept)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn shutdown(_sockfd: c_int, _how: c_int) -> c_int {
    runtime_policy::apply(Symbol::Shutdown)
}

/// POSIX `socketpair`. `sv` is never written.
#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn socketpair(
    _domain: c_int,
    _ty: c_int,
    _protocol: c_int,
    _sv: *mut c_int,
) -> c_int {
    runtime_policy::apply(Symbol::Socketpair)
}

// ---------------------------------------------------------------------------
// data transfer
// ---------------------------------------------------------------------------

/// POSIX `send`. Fails with `EPIPE`; no `SIGPIPE` is raised.
#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn send(
    _sockfd: c_int,
    _buf: *const c_void,
    _len: usize,
    _flags: c_int,
) -> ssize_t {
    runtime_policy::apply(Symbol::Send)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn recv(
    _sockfd: c_int,
    _buf: *mut c_void,
    _len: usize,
    _flags: c_int,
) -> ssize_t {
    runtime_policy::apply(Symbol::Recv)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn sendto(
    _sockfd: c_int,
    _buf: *const c_void,
    _len: usize,
    _flags: c_int,
    _dest_addr: *const sockaddr,
    _addrlen: socklen_t,
) -> ssize_t {
    runtime_policy::apply(Symbol::Sendto)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn recvfrom(
    _sockfd: c_int,
    _buf: *mut c_void,
    _len: usize,
    _flags: c_int,
    _src_addr: *mut sockaddr,
    _addrlen: *mut socklen_t,
) -> ssize_t {
    runtime_policy::apply(Symbol::Recvfrom)
}

// ---------------------------------------------------------------------------
// options and names
// ---------------------------------------------------------------------------

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn setsockopt(
    _sockfd: c_int,
    _level: c_int,
    _optname: c_int,
    _optval: *const c_void,
    _optlen: socklen_t,
) -> c_int {
    runtime_policy::apply(Symbol::Setsockopt)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn getsockopt(
    _sockfd: c_int,
    _level: c_int,
    _optname: c_int,
    _optval: *mut c_void,
    _optlen: *mut socklen_t,
) -> c_int {
    runtime_policy::apply(Symbol::Getsockopt)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn getsockname(
    _sockfd: c_int,
    _addr: *mut sockaddr,
    _addrlen: *mut socklen_t,
) -> c_int {
    runtime_policy::apply(Symbol::Getsockname)
}
