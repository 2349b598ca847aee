#![cfg(target_os = "linux")]

//! Integration tests for `<dirent.h>` stubs.

use std::ptr;

use stublibc_abi::dirent_abi::{closedir, opendir, readdir};
use stublibc_abi::errno_abi::{abi_errno, set_abi_errno};
use stublibc_core::errno;

#[test]
fn opendir_fails_with_enoent() {
    for name in [c".".as_ptr(), c"/".as_ptr(), ptr::null()] {
        set_abi_errno(0);
        // SAFETY: the stub never reads the name.
        let dir = unsafe { opendir(name) };
        assert!(dir.is_null());
        assert_eq!(abi_errno(), errno::ENOENT);
    }
}

#[test]
fn readdir_sequence_is_empty_for_any_handle() {
    let handles = [
        ptr::null_mut(),
        0x10 as *mut libc::DIR,
        usize::MAX as *mut libc::DIR,
    ];
    for handle in handles {
        set_abi_errno(0);
        let mut entries = 0usize;
        // SAFETY: the stub never dereferences the handle.
        while !unsafe { readdir(handle) }.is_null() {
            entries += 1;
            assert!(entries < 2, "readdir kept producing entries");
        }
        assert_eq!(entries, 0);
        // End of directory is not an error.
        assert_eq!(abi_errno(), 0);
    }
}

#[test]
fn closedir_succeeds_for_any_handle() {
    // SAFETY: the stub never dereferences the handle.
    unsafe {
        assert_eq!(closedir(ptr::null_mut()), 0);
        assert_eq!(closedir(0x10 as *mut libc::DIR), 0);
    }
}
