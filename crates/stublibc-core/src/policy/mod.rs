//! Policy descriptors for the capability stub table.
//!
//! Every exported stub resolves its behavior from one [`SymbolEntry`] in
//! [`STUB_TABLE`]. The ABI layer never hard-codes a return value or errno:
//! editing an entry here is the only way to change what a stub does.

use core::ffi::CStr;

mod table;

pub use table::{STUB_TABLE, SYMBOL_COUNT, Symbol};

/// Functional grouping of stubbed entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Category {
    /// `<stdio.h>` stream functions.
    StreamIo = 0,
    /// Descriptor and path based file operations.
    Filesystem = 1,
    /// `<dirent.h>` directory streams.
    Directory = 2,
    /// BSD socket lifecycle.
    Network = 3,
    /// Positioned and scatter-gather I/O.
    VectorIo = 4,
    /// `<netdb.h>` resolution and host naming.
    NameResolution = 5,
    /// Process identity, clocks, descriptors, scheduling.
    ProcessTime = 6,
    /// Memory mapping.
    Memory = 7,
    /// `<pwd.h>` / `<grp.h>` databases.
    Identity = 8,
    /// `<dlfcn.h>` introspection.
    LoaderIntrospection = 9,
    /// `<sys/utsname.h>`.
    HostIdentity = 10,
    /// `<pthread.h>` attribute teardown.
    Threading = 11,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::StreamIo,
        Category::Filesystem,
        Category::Directory,
        Category::Network,
        Category::VectorIo,
        Category::NameResolution,
        Category::ProcessTime,
        Category::Memory,
        Category::Identity,
        Category::LoaderIntrospection,
        Category::HostIdentity,
        Category::Threading,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::StreamIo => "stream-io",
            Category::Filesystem => "filesystem",
            Category::Directory => "directory",
            Category::Network => "network",
            Category::VectorIo => "vector-io",
            Category::NameResolution => "name-resolution",
            Category::ProcessTime => "process-time",
            Category::Memory => "memory",
            Category::Identity => "identity",
            Category::LoaderIntrospection => "loader-introspection",
            Category::HostIdentity => "host-identity",
            Category::Threading => "threading",
        }
    }
}

/// Value a stub hands back to its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnValue {
    /// Integer-typed return (`int`, `ssize_t`, `long`, `time_t`, ...).
    Int(i64),
    /// Null pointer.
    Null,
    /// `MAP_FAILED`, i.e. `(void *)-1`.
    MapFailed,
    /// Pointer to a static NUL-terminated string.
    Text(&'static CStr),
}

impl ReturnValue {
    /// Integer view of the value; pointers map to their address sentinel.
    ///
    /// `Text` has no fixed address and yields `None`.
    #[must_use]
    pub const fn as_i64(self) -> Option<i64> {
        match self {
            ReturnValue::Int(v) => Some(v),
            ReturnValue::Null => Some(0),
            ReturnValue::MapFailed => Some(-1),
            ReturnValue::Text(_) => None,
        }
    }
}

/// Policy kind without payload, for grouping and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PolicyKind {
    NoOpSuccess,
    FailClosed,
    ClaimedSuccess,
    Forward,
    Synthetic,
    Freeze,
}

impl PolicyKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            PolicyKind::NoOpSuccess => "no-op-success",
            PolicyKind::FailClosed => "fail-closed",
            PolicyKind::ClaimedSuccess => "claimed-success",
            PolicyKind::Forward => "forward",
            PolicyKind::Synthetic => "synthetic",
            PolicyKind::Freeze => "freeze",
        }
    }
}

/// Behavioral rule bound to one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// Return a fixed value and do nothing else.
    NoOpSuccess(ReturnValue),
    /// Return the failure sentinel; set errno when `errno` is present.
    FailClosed {
        ret: ReturnValue,
        errno: Option<i32>,
    },
    /// Report the full requested count as completed without doing anything.
    ///
    /// Callers that treat the return value as proof of durable output are
    /// misled; nothing is ever written anywhere.
    ClaimedSuccess,
    /// Delegate unchanged to `target`, implemented elsewhere in the link.
    Forward { target: &'static str },
    /// Fill output parameters with fixed values, then return `ret`.
    Synthetic(ReturnValue),
    /// Never return and never terminate.
    Freeze,
}

/// Constant result of executing a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Outcome {
    pub ret: ReturnValue,
    /// errno to store; `None` leaves errno untouched.
    pub errno: Option<i32>,
}

impl Policy {
    #[must_use]
    pub const fn kind(&self) -> PolicyKind {
        match self {
            Policy::NoOpSuccess(_) => PolicyKind::NoOpSuccess,
            Policy::FailClosed { .. } => PolicyKind::FailClosed,
            Policy::ClaimedSuccess => PolicyKind::ClaimedSuccess,
            Policy::Forward { .. } => PolicyKind::Forward,
            Policy::Synthetic(_) => PolicyKind::Synthetic,
            Policy::Freeze => PolicyKind::Freeze,
        }
    }

    /// Resolve the policy for a call that asked for `requested` units.
    ///
    /// `requested` only matters for [`Policy::ClaimedSuccess`]; counts above
    /// `isize::MAX` saturate since `ssize_t` cannot represent them.
    /// `Forward` and `Freeze` have no constant outcome and return `None`.
    #[must_use]
    pub const fn outcome(&self, requested: usize) -> Option<Outcome> {
        match *self {
            Policy::NoOpSuccess(ret) | Policy::Synthetic(ret) => Some(Outcome { ret, errno: None }),
            Policy::FailClosed { ret, errno } => Some(Outcome { ret, errno }),
            Policy::ClaimedSuccess => {
                let claimed = if requested > isize::MAX as usize {
                    isize::MAX as i64
                } else {
                    requested as i64
                };
                Some(Outcome {
                    ret: ReturnValue::Int(claimed),
                    errno: None,
                })
            }
            Policy::Forward { .. } | Policy::Freeze => None,
        }
    }

    /// Forwarding target, if this is a [`Policy::Forward`].
    #[must_use]
    pub const fn forward_target(&self) -> Option<&'static str> {
        match *self {
            Policy::Forward { target } => Some(target),
            _ => None,
        }
    }
}

/// One row of the stub table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolEntry {
    pub symbol: Symbol,
    /// Exported C name.
    pub name: &'static str,
    pub category: Category,
    pub policy: Policy,
    /// C prototype the stub's calling convention mirrors.
    pub signature: &'static str,
}

impl Symbol {
    /// Table row for this symbol.
    #[inline]
    #[must_use]
    pub fn entry(self) -> &'static SymbolEntry {
        &STUB_TABLE[self as usize]
    }

    #[inline]
    #[must_use]
    pub fn name(self) -> &'static str {
        self.entry().name
    }

    #[inline]
    #[must_use]
    pub fn policy(self) -> Policy {
        self.entry().policy
    }
}

/// Find a table row by exported C name.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static SymbolEntry> {
    STUB_TABLE.iter().find(|entry| entry.name == name)
}

/// All rows belonging to `category`, in table order.
pub fn entries_in(category: Category) -> impl Iterator<Item = &'static SymbolEntry> {
    STUB_TABLE
        .iter()
        .filter(move |entry| entry.category == category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errno;
    use std::collections::HashSet;

    #[test]
    fn discriminants_match_table_indices() {
        for (idx, entry) in STUB_TABLE.iter().enumerate() {
            assert_eq!(entry.symbol as usize, idx, "{} is out of place", entry.name);
            assert_eq!(Symbol::ALL[idx], entry.symbol);
        }
        assert_eq!(Symbol::ALL.len(), SYMBOL_COUNT);
    }

    #[test]
    fn names_are_unique() {
        let mut seen = HashSet::new();
        for entry in STUB_TABLE.iter() {
            assert!(seen.insert(entry.name), "duplicate entry {}", entry.name);
        }
    }

    #[test]
    fn categories_are_contiguous() {
        let mut finished = HashSet::new();
        let mut current = STUB_TABLE[0].category;
        for entry in STUB_TABLE.iter().skip(1) {
            if entry.category != current {
                assert!(
                    finished.insert(current),
                    "category {} split around {}",
                    current.as_str(),
                    entry.name
                );
                assert!(
                    !finished.contains(&entry.category),
                    "category {} resumes at {}",
                    entry.category.as_str(),
                    entry.name
                );
                current = entry.category;
            }
        }
    }

    #[test]
    fn every_category_has_entries() {
        for category in Category::ALL {
            assert!(
                entries_in(category).next().is_some(),
                "no entries for {}",
                category.as_str()
            );
        }
    }

    #[test]
    fn signatures_mention_their_name() {
        for entry in STUB_TABLE.iter() {
            let needle = format!("{}(", entry.name);
            assert!(
                entry.signature.contains(&needle),
                "signature of {} is `{}`",
                entry.name,
                entry.signature
            );
        }
    }

    #[test]
    fn lookup_resolves_known_and_rejects_unknown() {
        let entry = lookup("write").expect("write is stubbed");
        assert_eq!(entry.symbol, Symbol::Write);
        assert_eq!(entry.policy, Policy::ClaimedSuccess);
        assert!(lookup("ioctl").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn exactly_two_forwards_and_one_freeze() {
        let forwards: Vec<_> = STUB_TABLE
            .iter()
            .filter_map(|e| e.policy.forward_target().map(|t| (e.name, t)))
            .collect();
        assert_eq!(forwards, vec![("_mmap", "mmap"), ("_munmap", "munmap")]);

        let freezes: Vec<_> = STUB_TABLE
            .iter()
            .filter(|e| e.policy.kind() == PolicyKind::Freeze)
            .map(|e| e.name)
            .collect();
        assert_eq!(freezes, vec!["exit"]);
    }

    #[test]
    fn write_is_the_only_claimed_success() {
        let claimed: Vec<_> = STUB_TABLE
            .iter()
            .filter(|e| e.policy.kind() == PolicyKind::ClaimedSuccess)
            .map(|e| e.name)
            .collect();
        assert_eq!(claimed, vec!["write"]);
    }

    #[test]
    fn claimed_success_reports_requested_count() {
        let policy = Symbol::Write.policy();
        for count in [0usize, 1, 4096, 1 << 40] {
            let outcome = policy.outcome(count).expect("constant outcome");
            assert_eq!(outcome.ret, ReturnValue::Int(count as i64));
            assert_eq!(outcome.errno, None);
        }
        let saturated = policy.outcome(usize::MAX).expect("constant outcome");
        assert_eq!(saturated.ret, ReturnValue::Int(isize::MAX as i64));
    }

    #[test]
    fn fail_closed_outcome_ignores_requested_count() {
        let policy = Symbol::Read.policy();
        let a = policy.outcome(0);
        let b = policy.outcome(usize::MAX);
        assert_eq!(a, b);
        assert_eq!(
            a,
            Some(Outcome {
                ret: ReturnValue::Int(-1),
                errno: Some(errno::EIO)
            })
        );
    }

    #[test]
    fn forward_and_freeze_have_no_constant_outcome() {
        assert_eq!(Symbol::Exit.policy().outcome(0), None);
        assert_eq!(Symbol::Mmap.policy().outcome(0), None);
        assert_eq!(Symbol::Munmap.policy().outcome(0), None);
    }

    #[test]
    fn fail_closed_errnos_are_category_realistic() {
        let allowed = |category: Category| -> &'static [i32] {
            match category {
                Category::StreamIo | Category::Directory => &[errno::ENOENT],
                Category::Filesystem => &[
                    errno::ENOENT,
                    errno::EIO,
                    errno::ESPIPE,
                    errno::ENOSYS,
                    errno::EINVAL,
                    errno::ENOTSUP,
                ],
                Category::Network => &[
                    errno::EAFNOSUPPORT,
                    errno::ECONNREFUSED,
                    errno::EADDRNOTAVAIL,
                    errno::EOPNOTSUPP,
                    errno::EPIPE,
                    errno::EIO,
                    errno::ENOPROTOOPT,
                    errno::EBADF,
                    errno::ENOTCONN,
                ],
                Category::VectorIo => &[errno::ESPIPE, errno::EINVAL],
                Category::NameResolution => &[errno::ENOSYS],
                Category::ProcessTime => &[errno::EBADF, errno::ENOSYS],
                Category::Memory => &[errno::ENOMEM],
                _ => &[],
            }
        };
        for entry in STUB_TABLE.iter() {
            if let Policy::FailClosed {
                errno: Some(code), ..
            } = entry.policy
            {
                assert!(
                    allowed(entry.category).contains(&code),
                    "{} reports {} which is not a {} code",
                    entry.name,
                    errno::strerror_message(code),
                    entry.category.as_str()
                );
            }
        }
    }

    #[test]
    fn network_failures_all_set_errno() {
        for entry in entries_in(Category::Network) {
            match entry.policy {
                Policy::FailClosed {
                    ret: ReturnValue::Int(-1),
                    errno: Some(_),
                } => {}
                other => panic!("{} has unexpected policy {other:?}", entry.name),
            }
        }
    }

    #[test]
    fn return_value_integer_view() {
        assert_eq!(ReturnValue::Int(7).as_i64(), Some(7));
        assert_eq!(ReturnValue::Null.as_i64(), Some(0));
        assert_eq!(ReturnValue::MapFailed.as_i64(), Some(-1));
        assert_eq!(ReturnValue::Text(c"x").as_i64(), None);
    }
}
