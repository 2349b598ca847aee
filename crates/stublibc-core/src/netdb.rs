//! Resolver result codes.
//!
//! `<netdb.h>` reports failures through its return value, not errno.

use core::ffi::CStr;

/// Non-recoverable failure in name resolution.
pub const EAI_FAIL: i32 = -4;

/// Text `gai_strerror` returns for every code.
pub const UNKNOWN_ERROR: &CStr = c"Unknown error";
