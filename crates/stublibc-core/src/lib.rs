//! # stublibc-core
//!
//! Safe, dependency-free policy data for the stublibc capability stub table.
//!
//! This crate holds *what* every stubbed POSIX entry point does: the errno
//! values it reports, the policy descriptor bound to each symbol, and the
//! fixed values synthesized for output parameters. The `extern "C"` surface
//! that executes these policies lives in `stublibc-abi`.

#![deny(unsafe_code)]

pub mod errno;
pub mod netdb;
pub mod policy;
pub mod utsname;

pub use policy::{
    Category, Outcome, Policy, PolicyKind, ReturnValue, STUB_TABLE, SYMBOL_COUNT, Symbol,
    SymbolEntry,
};
