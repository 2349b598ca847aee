//! Live probes of the stub entry points.
//!
//! Each probe calls one stub through its `extern "C"` entry point with a
//! fixed argument profile and records what the caller would see: the return
//! value, errno, and whether caller memory was touched. Pointer arguments are
//! either null or a scratch block, so even a misbehaving stub cannot corrupt
//! harness memory.

use std::ffi::{CStr, c_char, c_int, c_void};
use std::ptr;

use serde::{Deserialize, Serialize};
use stublibc_abi::errno_abi::{abi_errno, set_abi_errno};
use stublibc_abi::{
    dirent_abi, dlfcn_abi, mmap_abi, process_abi, pthread_abi, pwd_abi, resolv_abi, socket_abi,
    stdio_abi, time_abi, uio_abi, unistd_abi, utsname_abi, xattr_abi,
};
use stublibc_core::{Policy, Symbol};

/// errno value planted before every call; seeing it afterwards means the
/// stub left errno alone.
pub const ERRNO_CANARY: c_int = 0x5AFE;

const SCRATCH_FILL: u8 = 0xA5;
const SCRATCH_LEN: usize = 512;

/// Argument profile used for a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArgProfile {
    /// fd 0, null pointers, zero lengths and flags.
    Nulls,
    /// A plausible descriptor, a scratch buffer and a small length.
    Scratch,
    /// Negative descriptors, maximal lengths, all-ones flags.
    Hostile,
}

impl ArgProfile {
    pub const ALL: [ArgProfile; 3] = [ArgProfile::Nulls, ArgProfile::Scratch, ArgProfile::Hostile];

    pub const fn as_str(self) -> &'static str {
        match self {
            ArgProfile::Nulls => "nulls",
            ArgProfile::Scratch => "scratch",
            ArgProfile::Hostile => "hostile",
        }
    }
}

/// A return value as the caller sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum Observed {
    Int(i64),
    /// Pointer return, by address.
    Ptr(usize),
    /// Pointer to a NUL-terminated string, by content.
    Text(String),
    /// A fresh, usable memory mapping (forwarded `mmap`).
    Mapping,
    /// `void` function.
    Void,
}

impl std::fmt::Display for Observed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Observed::Int(v) => write!(f, "{v}"),
            Observed::Ptr(0) => f.write_str("NULL"),
            Observed::Ptr(addr) if *addr == libc::MAP_FAILED.addr() => f.write_str("MAP_FAILED"),
            Observed::Ptr(addr) => write!(f, "{addr:#x}"),
            Observed::Text(s) => write!(f, "{s:?}"),
            Observed::Mapping => f.write_str("<mapping>"),
            Observed::Void => f.write_str("void"),
        }
    }
}

/// Return value and errno of a single call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub ret: Observed,
    pub errno: c_int,
}

#[derive(Debug, Clone)]
pub struct Probe {
    pub symbol: Symbol,
    pub profile: ArgProfile,
    /// Byte count passed to count-taking calls.
    pub requested: usize,
    pub observed: Observation,
    /// False if any byte of the scratch block changed.
    pub scratch_intact: bool,
    /// `sysname`..`machine` as written by `uname`.
    pub host_identity: Option<Vec<String>>,
    /// The same call made directly against the platform, for forwarded
    /// symbols.
    pub reference: Option<Observation>,
}

#[repr(C, align(16))]
struct Scratch([u8; SCRATCH_LEN]);

impl Scratch {
    fn new() -> Box<Self> {
        Box::new(Scratch([SCRATCH_FILL; SCRATCH_LEN]))
    }

    fn intact(&self) -> bool {
        self.0.iter().all(|&b| b == SCRATCH_FILL)
    }
}

struct Args {
    fd: c_int,
    ptr: *mut c_void,
    len: usize,
    flag: c_int,
    off: i64,
}

impl Args {
    fn new(profile: ArgProfile, scratch: &mut Scratch) -> Self {
        let block = ptr::from_mut(scratch).cast::<c_void>();
        match profile {
            ArgProfile::Nulls => Args {
                fd: 0,
                ptr: ptr::null_mut(),
                len: 0,
                flag: 0,
                off: 0,
            },
            ArgProfile::Scratch => Args {
                fd: 3,
                ptr: block,
                len: 64,
                flag: 0,
                off: 0,
            },
            ArgProfile::Hostile => Args {
                fd: -1,
                ptr: block,
                len: usize::MAX,
                flag: -1,
                off: -1,
            },
        }
    }

    fn out<T>(&self) -> *mut T {
        self.ptr.cast()
    }

    fn inp<T>(&self) -> *const T {
        self.ptr.cast_const().cast()
    }
}

fn int(v: impl Into<i64>) -> Observed {
    Observed::Int(v.into())
}

fn count(v: isize) -> Observed {
    Observed::Int(v as i64)
}

fn ptr_ret<T>(p: *mut T) -> Observed {
    Observed::Ptr(p.addr())
}

/// # Safety
///
/// `field` must hold a NUL terminator.
unsafe fn field_text(field: &[c_char]) -> String {
    // SAFETY: guaranteed by the caller.
    unsafe { CStr::from_ptr(field.as_ptr()) }
        .to_string_lossy()
        .into_owned()
}

/// Probe `symbol` with `profile`. Returns `None` for symbols that never
/// return to their caller.
pub fn probe(symbol: Symbol, profile: ArgProfile) -> Option<Probe> {
    let policy = symbol.policy();
    if matches!(policy, Policy::Freeze) {
        return None;
    }

    let mut scratch = Scratch::new();
    let args = Args::new(profile, &mut scratch);

    let (observed, reference) = if policy.forward_target().is_some() {
        // SAFETY: forwarded calls get arguments that are valid for the
        // platform's mmap/munmap contract (see `forward`).
        let ours = unsafe { forward(symbol, profile, false) };
        // SAFETY: as above.
        let theirs = unsafe { forward(symbol, profile, true) };
        (ours, Some(theirs))
    } else {
        set_abi_errno(ERRNO_CANARY);
        // SAFETY: every pointer argument is null or the scratch block, which
        // is large and aligned enough for any out-parameter used here.
        let ret = unsafe { invoke(symbol, &args) };
        let errno = abi_errno();
        (Observation { ret, errno }, None)
    };

    let host_identity = if symbol == Symbol::Uname && !args.ptr.is_null() {
        // SAFETY: the scratch block is larger than `struct utsname`, which has
        // byte alignment, and `uname` NUL-terminates every field it writes.
        unsafe {
            let uts = &*args.ptr.cast_const().cast::<libc::utsname>();
            Some(vec![
                field_text(&uts.sysname),
                field_text(&uts.nodename),
                field_text(&uts.release),
                field_text(&uts.version),
                field_text(&uts.machine),
            ])
        }
    } else {
        None
    };

    Some(Probe {
        symbol,
        profile,
        requested: args.len,
        observed,
        scratch_intact: scratch.intact(),
        host_identity,
        reference,
    })
}

/// Probe every non-freeze symbol with every profile, in table order.
pub fn probe_all() -> Vec<Probe> {
    let mut probes = Vec::new();
    for &symbol in Symbol::ALL.iter() {
        for profile in ArgProfile::ALL {
            probes.extend(probe(symbol, profile));
        }
    }
    probes
}

// ---------------------------------------------------------------------------
// dispatch
// ---------------------------------------------------------------------------

/// # Safety
///
/// Pointer fields of `a` must be null or point to the scratch block.
/// `symbol` must not be a forward or freeze entry.
unsafe fn invoke(symbol: Symbol, a: &Args) -> Observed {
    use Symbol as S;

    let (fd, len, flag, off) = (a.fd, a.len, a.flag, a.off);
    let socklen = len as libc::socklen_t;
    let (uid, gid) = (flag as libc::uid_t, flag as libc::gid_t);
    // SAFETY: forwarded to the caller's contract.
    unsafe {
        match symbol {
            S::Printf => int(stdio_abi::printf(a.inp())),
            S::Fprintf => int(stdio_abi::fprintf(a.out(), a.inp())),
            S::Vfprintf => int(stdio_abi::vfprintf(a.out(), a.inp(), a.out())),
            S::Puts => int(stdio_abi::puts(a.inp())),
            S::Sprintf => int(stdio_abi::sprintf(a.out(), a.inp())),
            S::Fflush => int(stdio_abi::fflush(a.out())),
            S::Fwrite => Observed::Int(stdio_abi::fwrite(a.inp(), len, 1, a.out()) as i64),
            S::Fgets => ptr_ret(stdio_abi::fgets(a.out(), len as c_int, a.out())),
            S::Fopen => ptr_ret(stdio_abi::fopen(a.inp(), a.inp())),
            S::Fdopen => ptr_ret(stdio_abi::fdopen(fd, a.inp())),
            S::Fclose => int(stdio_abi::fclose(a.out())),
            S::Rewind => {
                stdio_abi::rewind(a.out());
                Observed::Void
            }
            S::Ferror => int(stdio_abi::ferror(a.out())),
            S::Feof => int(stdio_abi::feof(a.out())),

            S::Open => int(unistd_abi::open(a.inp(), flag)),
            S::Open64 => int(unistd_abi::open64(a.inp(), flag)),
            S::Close => int(unistd_abi::close(fd)),
            S::Read => count(unistd_abi::read(fd, a.out(), len)),
            S::Write => count(unistd_abi::write(fd, a.inp(), len)),
            S::Lseek => int(unistd_abi::lseek(fd, off, flag)),
            S::Lseek64 => int(unistd_abi::lseek64(fd, off, flag)),
            S::Fcntl => int(unistd_abi::fcntl(fd, flag)),
            S::Fsync => int(unistd_abi::fsync(fd)),
            S::Fdatasync => int(unistd_abi::fdatasync(fd)),
            S::Ftruncate64 => int(unistd_abi::ftruncate64(fd, off)),
            S::Access => int(unistd_abi::access(a.inp(), flag)),
            S::Unlink => int(unistd_abi::unlink(a.inp())),
            S::Rename => int(unistd_abi::rename(a.inp(), a.inp())),
            S::Mkdir => int(unistd_abi::mkdir(a.inp(), flag as libc::mode_t)),
            S::Rmdir => int(unistd_abi::rmdir(a.inp())),
            S::Getcwd => ptr_ret(unistd_abi::getcwd(a.out(), len)),
            S::Realpath => ptr_ret(unistd_abi::realpath(a.inp(), a.out())),
            S::Utimes => int(unistd_abi::utimes(a.inp(), a.inp())),
            S::Fchmod => int(unistd_abi::fchmod(fd, flag as libc::mode_t)),
            S::Fchown => int(unistd_abi::fchown(fd, uid, gid)),
            S::Remove => int(unistd_abi::remove(a.inp())),
            S::Readlink => count(unistd_abi::readlink(a.inp(), a.out(), len)),
            S::Link => int(unistd_abi::link(a.inp(), a.inp())),
            S::Pathconf => int(unistd_abi::pathconf(a.inp(), flag)),
            S::Fgetxattr => count(xattr_abi::fgetxattr(fd, a.inp(), a.out(), len)),
            S::Fsetxattr => int(xattr_abi::fsetxattr(fd, a.inp(), a.inp(), len, flag)),
            S::Fremovexattr => int(xattr_abi::fremovexattr(fd, a.inp())),
            S::Flistxattr => count(xattr_abi::flistxattr(fd, a.out(), len)),

            S::Opendir => ptr_ret(dirent_abi::opendir(a.inp())),
            S::Readdir => ptr_ret(dirent_abi::readdir(a.out())),
            S::Closedir => int(dirent_abi::closedir(a.out())),

            S::Socket => int(socket_abi::socket(flag, flag, flag)),
            S::Connect => int(socket_abi::connect(fd, a.inp(), socklen)),
            S::Bind => int(socket_abi::bind(fd, a.inp(), socklen)),
            S::Listen => int(socket_abi::listen(fd, flag)),
            S::Accept => int(socket_abi::accept(fd, a.out(), a.out())),
            S::Send => count(socket_abi::send(fd, a.inp(), len, flag)),
            S::Recv => count(socket_abi::recv(fd, a.out(), len, flag)),
            S::Sendto => count(socket_abi::sendto(fd, a.inp(), len, flag, a.inp(), socklen)),
            S::Recvfrom => count(socket_abi::recvfrom(fd, a.out(), len, flag, a.out(), a.out())),
            S::Setsockopt => int(socket_abi::setsockopt(fd, flag, flag, a.inp(), socklen)),
            S::Getsockopt => int(socket_abi::getsockopt(fd, flag, flag, a.out(), a.out())),
            S::Getsockname => int(socket_abi::getsockname(fd, a.out(), a.out())),
            S::Shutdown => int(socket_abi::shutdown(fd, flag)),
            S::Socketpair => int(socket_abi::socketpair(flag, flag, flag, a.out())),

            S::Pread64 => count(uio_abi::pread64(fd, a.out(), len, off)),
            S::Pwrite64 => count(uio_abi::pwrite64(fd, a.inp(), len, off)),
            S::Readv => count(uio_abi::readv(fd, a.inp(), flag)),
            S::Writev => count(uio_abi::writev(fd, a.inp(), flag)),

            S::Getaddrinfo => int(resolv_abi::getaddrinfo(a.inp(), a.inp(), a.inp(), a.out())),
            S::Freeaddrinfo => {
                resolv_abi::freeaddrinfo(a.out());
                Observed::Void
            }
            S::Getnameinfo => int(resolv_abi::getnameinfo(
                a.inp(),
                socklen,
                a.out(),
                socklen,
                a.out(),
                socklen,
                flag,
            )),
            S::GaiStrerror => {
                let msg: *const c_char = resolv_abi::gai_strerror(flag);
                if msg.is_null() {
                    Observed::Ptr(0)
                } else {
                    Observed::Text(CStr::from_ptr(msg).to_string_lossy().into_owned())
                }
            }
            S::Gethostname => int(resolv_abi::gethostname(a.out(), len)),

            S::Getpid => int(process_abi::getpid()),
            S::Getuid => int(process_abi::getuid()),
            S::Gettimeofday => int(time_abi::gettimeofday(a.out(), a.out())),
            S::ClockGettime => int(time_abi::clock_gettime(flag, a.out())),
            S::Time => int(time_abi::time(a.out())),
            S::LocaltimeR => ptr_ret(time_abi::localtime_r(a.inp(), a.out())),
            S::GmtimeR => ptr_ret(time_abi::gmtime_r(a.inp(), a.out())),
            S::Sysconf => int(process_abi::sysconf(flag)),
            S::Dup => int(process_abi::dup(fd)),
            S::Dup2 => int(process_abi::dup2(fd, fd)),
            S::Poll => int(process_abi::poll(a.out(), len as libc::nfds_t, flag)),
            S::Nanosleep => int(time_abi::nanosleep(a.inp(), a.out())),
            S::SchedYield => int(process_abi::sched_yield()),

            S::Mmap64 => ptr_ret(mmap_abi::mmap64(a.out(), len, flag, flag, fd, off)),

            S::Getpwuid => ptr_ret(pwd_abi::getpwuid(uid)),
            S::GetpwuidR => int(pwd_abi::getpwuid_r(uid, a.out(), a.out(), len, a.out())),
            S::Getgrgid => ptr_ret(pwd_abi::getgrgid(gid)),
            S::GetgrgidR => int(pwd_abi::getgrgid_r(gid, a.out(), a.out(), len, a.out())),

            S::Dladdr => int(dlfcn_abi::dladdr(a.inp(), a.out())),
            S::Uname => int(utsname_abi::uname(a.out())),
            S::PthreadCondattrDestroy => int(pthread_abi::pthread_condattr_destroy(a.out())),

            S::Exit | S::Mmap | S::Munmap => {
                debug_assert!(false, "{symbol:?} is not probed through invoke");
                Observed::Void
            }
        }
    }
}

/// Call a forwarded symbol (`direct == false`) or its platform target
/// (`direct == true`) with arguments derived from `profile`.
///
/// # Safety
///
/// `symbol` must be `Symbol::Mmap` or `Symbol::Munmap`.
unsafe fn forward(symbol: Symbol, profile: ArgProfile, direct: bool) -> Observation {
    const PAGE: usize = 4096;
    let anon = libc::MAP_PRIVATE | libc::MAP_ANONYMOUS;
    let rw = libc::PROT_READ | libc::PROT_WRITE;

    // SAFETY: every request below is either an anonymous mapping the harness
    // owns or a request the kernel rejects without side effects (zero length,
    // unaligned address, unsatisfiable length).
    unsafe {
        match symbol {
            Symbol::Mmap => {
                let len = match profile {
                    ArgProfile::Nulls => 0,
                    ArgProfile::Scratch => PAGE,
                    ArgProfile::Hostile => usize::MAX,
                };
                set_abi_errno(ERRNO_CANARY);
                let addr = if direct {
                    libc::mmap(ptr::null_mut(), len, rw, anon, -1, 0)
                } else {
                    mmap_abi::_mmap(ptr::null_mut(), len, rw, anon, -1, 0)
                };
                let errno = abi_errno();
                let ret = if addr == libc::MAP_FAILED {
                    ptr_ret(addr)
                } else {
                    let usable = {
                        let bytes = addr.cast::<u8>();
                        bytes.write(0x5A);
                        bytes.read() == 0x5A
                    };
                    libc::munmap(addr, len);
                    if usable {
                        Observed::Mapping
                    } else {
                        Observed::Ptr(addr.addr())
                    }
                };
                Observation { ret, errno }
            }
            Symbol::Munmap => {
                let (addr, len, owned) = match profile {
                    ArgProfile::Nulls => (ptr::null_mut(), 0, false),
                    ArgProfile::Scratch => {
                        let addr = libc::mmap(ptr::null_mut(), PAGE, rw, anon, -1, 0);
                        if addr == libc::MAP_FAILED {
                            (ptr::null_mut(), 0, false)
                        } else {
                            (addr, PAGE, true)
                        }
                    }
                    ArgProfile::Hostile => {
                        (ptr::without_provenance_mut::<c_void>(1), usize::MAX, false)
                    }
                };
                set_abi_errno(ERRNO_CANARY);
                let rc = if direct {
                    libc::munmap(addr, len)
                } else {
                    mmap_abi::_munmap(addr, len)
                };
                let errno = abi_errno();
                if owned && rc != 0 {
                    libc::munmap(addr, len);
                }
                let ret = int(rc);
                Observation { ret, errno }
            }
            _ => Observation {
                ret: Observed::Void,
                errno: 0,
            },
        }
    }
}
