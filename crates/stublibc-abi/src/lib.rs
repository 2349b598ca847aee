//! # stublibc-abi
//!
//! `extern "C"` entry points that stand in for the POSIX surface a hosted
//! runtime links against inside an enclave. Each function names its
//! [`stublibc_core::Symbol`] and lets [`runtime_policy`] execute the table
//! row: no kernel transition, no state, no logging.
//!
//! Symbols are exported under their C names only in optimized builds with the
//! `export-symbols` feature. Debug and test builds keep Rust mangling so the
//! host libc of the test process is never shadowed.
//!
//! Variadic C functions (`printf`, `open`, `fcntl`, ...) are declared with
//! their fixed parameters only. The stubs never read the variadic tail, which
//! keeps them call-compatible on the SysV x86_64 and AArch64 Linux ABIs.

#![allow(clippy::missing_safety_doc)]

pub mod dirent_abi;
pub mod dlfcn_abi;
pub mod errno_abi;
pub mod mmap_abi;
pub mod process_abi;
pub mod pthread_abi;
pub mod pwd_abi;
pub mod resolv_abi;
pub mod runtime_policy;
pub mod socket_abi;
pub mod stdio_abi;
pub mod time_abi;
pub mod uio_abi;
pub mod unistd_abi;
pub mod utsname_abi;
pub mod xattr_abi;
