#![cfg(target_os = "linux")]

//! Integration tests for `<netdb.h>` stubs.

use std::ffi::{CStr, c_char};
use std::ptr;

use stublibc_abi::errno_abi::{abi_errno, set_abi_errno};
use stublibc_abi::resolv_abi::{freeaddrinfo, gai_strerror, getaddrinfo, gethostname, getnameinfo};
use stublibc_core::errno;
use stublibc_core::netdb::EAI_FAIL;

const CANARY: i32 = 0x5AFE;

#[test]
fn eai_fail_matches_platform() {
    assert_eq!(EAI_FAIL, libc::EAI_FAIL);
}

#[test]
fn getaddrinfo_fails_without_touching_result() {
    let sentinel = 0x1234 as *mut libc::addrinfo;
    let mut res = sentinel;
    set_abi_errno(CANARY);
    // SAFETY: valid C strings and out-pointer.
    let rc = unsafe { getaddrinfo(c"localhost".as_ptr(), c"80".as_ptr(), ptr::null(), &mut res) };
    assert_eq!(rc, libc::EAI_FAIL);
    assert_eq!(res, sentinel);
    assert_eq!(abi_errno(), CANARY, "resolver failures do not use errno");

    // SAFETY: nothing was allocated; the stub ignores its argument.
    unsafe { freeaddrinfo(res) };
    // SAFETY: as above.
    unsafe { freeaddrinfo(ptr::null_mut()) };
}

#[test]
fn getnameinfo_fails_without_touching_buffers() {
    let mut host = [0x61 as c_char; 32];
    let mut serv = [0x62 as c_char; 8];
    // SAFETY: buffers are valid for their lengths.
    let rc = unsafe {
        getnameinfo(
            ptr::null(),
            0,
            host.as_mut_ptr(),
            host.len() as libc::socklen_t,
            serv.as_mut_ptr(),
            serv.len() as libc::socklen_t,
            libc::NI_NUMERICHOST,
        )
    };
    assert_eq!(rc, libc::EAI_FAIL);
    assert!(host.iter().all(|&c| c == 0x61));
    assert!(serv.iter().all(|&c| c == 0x62));
}

#[test]
fn gai_strerror_is_constant() {
    let mut seen = None;
    for code in [
        0,
        libc::EAI_FAIL,
        libc::EAI_NONAME,
        libc::EAI_AGAIN,
        12345,
        i32::MIN,
    ] {
        // SAFETY: the stub ignores its argument and returns a static string.
        let msg = unsafe { gai_strerror(code) };
        assert!(!msg.is_null());
        // SAFETY: msg points to a static NUL-terminated string.
        let text = unsafe { CStr::from_ptr(msg) };
        assert_eq!(text.to_bytes(), b"Unknown error");
        if let Some(prev) = seen {
            assert_eq!(prev, msg, "gai_strerror must hand out one static string");
        }
        seen = Some(msg);
    }
}

#[test]
fn gethostname_fails_with_enosys() {
    let mut name = [0x63 as c_char; 16];
    set_abi_errno(0);
    // SAFETY: name is writable for its length.
    let rc = unsafe { gethostname(name.as_mut_ptr(), name.len()) };
    assert_eq!(rc, -1);
    assert_eq!(abi_errno(), errno::ENOSYS);
    assert!(name.iter().all(|&c| c == 0x63));
}
