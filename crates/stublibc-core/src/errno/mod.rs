//! Error number definitions.
//!
//! Linux `<errno.h>` values for every code the stub table reports. The stub
//! layer never owns errno storage; these are the values it writes into the
//! platform's thread-local errno slot.

/// Well-known errno constants.
pub const EPERM: i32 = 1;
pub const ENOENT: i32 = 2;
pub const EIO: i32 = 5;
pub const EBADF: i32 = 9;
pub const ENOMEM: i32 = 12;
pub const EACCES: i32 = 13;
pub const EFAULT: i32 = 14;
pub const EINVAL: i32 = 22;
pub const ESPIPE: i32 = 29;
pub const EPIPE: i32 = 32;
pub const ENOSYS: i32 = 38;
pub const ENOPROTOOPT: i32 = 92;
pub const EOPNOTSUPP: i32 = 95;
/// Same value as `EOPNOTSUPP` on Linux.
pub const ENOTSUP: i32 = EOPNOTSUPP;
pub const EAFNOSUPPORT: i32 = 97;
pub const EADDRNOTAVAIL: i32 = 99;
pub const ENOTCONN: i32 = 107;
pub const ECONNREFUSED: i32 = 111;

/// Returns the error message string for the given errno value.
///
/// Mirrors the glibc `strerror` text for the codes above, or a generic
/// message for anything else.
pub fn strerror_message(errnum: i32) -> &'static str {
    match errnum {
        0 => "Success",
        EPERM => "Operation not permitted",
        ENOENT => "No such file or directory",
        EIO => "Input/output error",
        EBADF => "Bad file descriptor",
        ENOMEM => "Cannot allocate memory",
        EACCES => "Permission denied",
        EFAULT => "Bad address",
        EINVAL => "Invalid argument",
        ESPIPE => "Illegal seek",
        EPIPE => "Broken pipe",
        ENOSYS => "Function not implemented",
        ENOPROTOOPT => "Protocol not available",
        EOPNOTSUPP => "Operation not supported",
        EAFNOSUPPORT => "Address family not supported by protocol",
        EADDRNOTAVAIL => "Cannot assign requested address",
        ENOTCONN => "Transport endpoint is not connected",
        ECONNREFUSED => "Connection refused",
        _ => "Unknown error",
    }
}

/// Symbolic name of an errno value, for reports.
pub fn errno_name(errnum: i32) -> Option<&'static str> {
    let name = match errnum {
        EPERM => "EPERM",
        ENOENT => "ENOENT",
        EIO => "EIO",
        EBADF => "EBADF",
        ENOMEM => "ENOMEM",
        EACCES => "EACCES",
        EFAULT => "EFAULT",
        EINVAL => "EINVAL",
        ESPIPE => "ESPIPE",
        EPIPE => "EPIPE",
        ENOSYS => "ENOSYS",
        ENOPROTOOPT => "ENOPROTOOPT",
        EOPNOTSUPP => "EOPNOTSUPP",
        EAFNOSUPPORT => "EAFNOSUPPORT",
        EADDRNOTAVAIL => "EADDRNOTAVAIL",
        ENOTCONN => "ENOTCONN",
        ECONNREFUSED => "ECONNREFUSED",
        _ => return None,
    };
    Some(name)
}
