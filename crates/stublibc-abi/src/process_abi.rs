//! ABI layer for process identity, descriptor duplication, polling,
//! scheduling, and `exit`.

use std::ffi::{c_int, c_long};

use libc::{nfds_t, pid_t, pollfd, uid_t};
use stublibc_core::{Policy, Symbol};

use crate::runtime_policy;

// ---------------------------------------------------------------------------
// identity
// ---------------------------------------------------------------------------

/// POSIX `getpid`. Always `1`.
#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn getpid() -> pid_t {
    runtime_policy::apply(Symbol::Getpid)
}

/// POSIX `getuid`. Always `0` (root).
#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn getuid() -> uid_t {
    runtime_policy::apply(Symbol::Getuid)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn sysconf(_name: c_int) -> c_long {
    runtime_policy::apply(Symbol::Sysconf)
}

// ---------------------------------------------------------------------------
// exit
// ---------------------------------------------------------------------------

/// POSIX `exit`, replaced by a freeze.
///
/// Never returns and never terminates the process: the calling thread spins
/// forever while other threads keep running. `status` is ignored and no
/// atexit handlers run.
#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn exit(_status: c_int) -> ! {
    debug_assert_eq!(Symbol::Exit.policy(), Policy::Freeze);
    loop {
        std::hint::spin_loop();
    }
}

// ---------------------------------------------------------------------------
// descriptors
// ---------------------------------------------------------------------------

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn dup(_oldfd: c_int) -> c_int {
    runtime_policy::apply(Symbol::Dup)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn dup2(_oldfd: c_int, _newfd: c_int) -> c_int {
    runtime_policy::apply(Symbol::Dup2)
}

/// POSIX `poll`. `revents` of `fds` are never written.
#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn poll(_fds: *mut pollfd, _nfds: nfds_t, _timeout: c_int) -> c_int {
    runtime_policy::apply(Symbol::Poll)
}

// ---------------------------------------------------------------------------
// scheduling
// ---------------------------------------------------------------------------

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn sched_yield() -> c_int {
    runtime_policy::apply(Symbol::SchedYield)
}
