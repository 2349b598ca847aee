#![cfg(target_os = "linux")]

//! The errno values reported by the stub table match the platform's.

use stublibc_core::{Policy, STUB_TABLE, errno, netdb};

#[test]
fn core_constants_match_libc() {
    let pairs = [
        (errno::EPERM, libc::EPERM),
        (errno::ENOENT, libc::ENOENT),
        (errno::EIO, libc::EIO),
        (errno::EBADF, libc::EBADF),
        (errno::ENOMEM, libc::ENOMEM),
        (errno::EACCES, libc::EACCES),
        (errno::EFAULT, libc::EFAULT),
        (errno::EINVAL, libc::EINVAL),
        (errno::ESPIPE, libc::ESPIPE),
        (errno::EPIPE, libc::EPIPE),
        (errno::ENOSYS, libc::ENOSYS),
        (errno::ENOPROTOOPT, libc::ENOPROTOOPT),
        (errno::EOPNOTSUPP, libc::EOPNOTSUPP),
        (errno::ENOTSUP, libc::ENOTSUP),
        (errno::EAFNOSUPPORT, libc::EAFNOSUPPORT),
        (errno::EADDRNOTAVAIL, libc::EADDRNOTAVAIL),
        (errno::ENOTCONN, libc::ENOTCONN),
        (errno::ECONNREFUSED, libc::ECONNREFUSED),
    ];
    for (ours, theirs) in pairs {
        assert_eq!(ours, theirs, "{:?}", errno::errno_name(ours));
    }
    assert_eq!(netdb::EAI_FAIL, libc::EAI_FAIL);
}

#[test]
fn every_table_errno_has_a_name() {
    for entry in STUB_TABLE.iter() {
        if let Policy::FailClosed { errno: Some(code), .. } = entry.policy {
            assert!(
                errno::errno_name(code).is_some(),
                "{} reports unnamed errno {code}",
                entry.name
            );
        }
    }
}
