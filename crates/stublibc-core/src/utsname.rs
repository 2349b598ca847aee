//! Fixed host identity reported by `uname`.
//!
//! The enclave never learns (or leaks) anything about the real host, so the
//! identity is a constant fingerprint the hosted runtime can branch on.

/// The five `struct utsname` fields `uname` fills in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostIdentity {
    pub sysname: &'static str,
    pub nodename: &'static str,
    pub release: &'static str,
    pub version: &'static str,
    pub machine: &'static str,
}

pub const ENCLAVE_IDENTITY: HostIdentity = HostIdentity {
    sysname: "Linux",
    nodename: "sgx-enclave",
    release: "5.4.0",
    version: "#1",
    machine: "x86_64",
};

impl HostIdentity {
    /// Fields in `struct utsname` declaration order.
    #[must_use]
    pub const fn fields(&self) -> [&'static str; 5] {
        [
            self.sysname,
            self.nodename,
            self.release,
            self.version,
            self.machine,
        ]
    }
}

/// Copy `value` into a fixed-width C character field.
///
/// Truncates so the result is always NUL-terminated; the tail of `dst`
/// past the terminator is zeroed. Returns the number of bytes copied,
/// excluding the terminator. An empty `dst` is left untouched.
pub fn copy_field(dst: &mut [u8], value: &str) -> usize {
    let Some(room) = dst.len().checked_sub(1) else {
        return 0;
    };
    let bytes = value.as_bytes();
    let n = bytes.len().min(room);
    dst[..n].copy_from_slice(&bytes[..n]);
    dst[n..].fill(0);
    n
}
