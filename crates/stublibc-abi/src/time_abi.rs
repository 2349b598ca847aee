//! ABI layer for `<time.h>` / `<sys/time.h>` functions.
//!
//! No trusted clock is reachable through this surface. Clock reads fail,
//! conversions have no valid time to convert, and sleeps return at once.
//! A verified time source has to be injected through an explicit channel;
//! it never comes from here. errno is left unchanged on every path.

use std::ffi::{c_int, c_void};

use libc::{clockid_t, time_t, timespec, timeval, tm};
use stublibc_core::Symbol;

use crate::runtime_policy;

// ---------------------------------------------------------------------------
// clocks
// ---------------------------------------------------------------------------

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn gettimeofday(_tv: *mut timeval, _tz: *mut c_void) -> c_int {
    runtime_policy::apply(Symbol::Gettimeofday)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn clock_gettime(_clk_id: clockid_t, _tp: *mut timespec) -> c_int {
    runtime_policy::apply(Symbol::ClockGettime)
}

/// POSIX `time`. Returns `(time_t)-1`; `tloc` is not written.
#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn time(_tloc: *mut time_t) -> time_t {
    runtime_policy::apply(Symbol::Time)
}

// ---------------------------------------------------------------------------
// broken-down conversion
// ---------------------------------------------------------------------------

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn localtime_r(_timep: *const time_t, _result: *mut tm) -> *mut tm {
    runtime_policy::apply(Symbol::LocaltimeR)
}

#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn gmtime_r(_timep: *const time_t, _result: *mut tm) -> *mut tm {
    runtime_policy::apply(Symbol::GmtimeR)
}

// ---------------------------------------------------------------------------
// sleeping
// ---------------------------------------------------------------------------

/// POSIX `nanosleep`. Returns immediately; `rem` is not written.
#[cfg_attr(all(export_symbols, not(debug_assertions)), unsafe(no_mangle))]
pub unsafe extern "C" fn nanosleep(_req: *const timespec, _rem: *mut timespec) -> c_int {
    runtime_policy::apply(Symbol::Nanosleep)
}
