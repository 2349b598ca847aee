//! The capability stub table.
//!
//! One row per exported symbol. Rows of a category stay together and the
//! `Symbol` discriminant of each row equals its index.

use super::{Category, Policy, ReturnValue, SymbolEntry};
use crate::errno::{
    EADDRNOTAVAIL, EAFNOSUPPORT, EBADF, ECONNREFUSED, EINVAL, EIO, ENOENT, ENOMEM, ENOPROTOOPT,
    ENOSYS, ENOTCONN, ENOTSUP, EOPNOTSUPP, EPIPE, ESPIPE,
};
use crate::netdb::{EAI_FAIL, UNKNOWN_ERROR};

const fn ok(value: i64) -> Policy {
    Policy::NoOpSuccess(ReturnValue::Int(value))
}

const END: Policy = Policy::NoOpSuccess(ReturnValue::Null);

const fn fail(errno: i32) -> Policy {
    Policy::FailClosed {
        ret: ReturnValue::Int(-1),
        errno: Some(errno),
    }
}

const fn fail_null(errno: i32) -> Policy {
    Policy::FailClosed {
        ret: ReturnValue::Null,
        errno: Some(errno),
    }
}

/// Failure that leaves errno alone.
const fn fail_quiet(ret: ReturnValue) -> Policy {
    Policy::FailClosed { ret, errno: None }
}

macro_rules! stub_table {
    ($($variant:ident => $name:literal, $category:ident, $policy:expr, $signature:literal;)+) => {
        /// Every stubbed entry point, in table order.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u16)]
        pub enum Symbol {
            $($variant,)+
        }

        /// Number of rows in [`STUB_TABLE`].
        pub const SYMBOL_COUNT: usize = <[&str]>::len(&[$(stringify!($variant)),+]);

        impl Symbol {
            pub const ALL: [Symbol; SYMBOL_COUNT] = [$(Symbol::$variant),+];
        }

        pub static STUB_TABLE: [SymbolEntry; SYMBOL_COUNT] = [
            $(SymbolEntry {
                symbol: Symbol::$variant,
                name: $name,
                category: Category::$category,
                policy: $policy,
                signature: $signature,
            },)+
        ];
    };
}

stub_table! {
    // <stdio.h>
    Printf => "printf", StreamIo, ok(0),
        "int printf(const char *format, ...)";
    Fprintf => "fprintf", StreamIo, ok(0),
        "int fprintf(FILE *stream, const char *format, ...)";
    Vfprintf => "vfprintf", StreamIo, ok(0),
        "int vfprintf(FILE *stream, const char *format, va_list ap)";
    Puts => "puts", StreamIo, ok(0),
        "int puts(const char *s)";
    Sprintf => "sprintf", StreamIo, ok(0),
        "int sprintf(char *str, const char *format, ...)";
    Fflush => "fflush", StreamIo, ok(0),
        "int fflush(FILE *stream)";
    // Deliberately 0 rather than nmemb: nothing was written.
    Fwrite => "fwrite", StreamIo, ok(0),
        "size_t fwrite(const void *ptr, size_t size, size_t nmemb, FILE *stream)";
    Fgets => "fgets", StreamIo, END,
        "char *fgets(char *s, int size, FILE *stream)";
    Fopen => "fopen", StreamIo, fail_null(ENOENT),
        "FILE *fopen(const char *pathname, const char *mode)";
    Fdopen => "fdopen", StreamIo, fail_null(ENOENT),
        "FILE *fdopen(int fd, const char *mode)";
    Fclose => "fclose", StreamIo, ok(0),
        "int fclose(FILE *stream)";
    Rewind => "rewind", StreamIo, ok(0),
        "void rewind(FILE *stream)";
    Ferror => "ferror", StreamIo, ok(0),
        "int ferror(FILE *stream)";
    Feof => "feof", StreamIo, ok(0),
        "int feof(FILE *stream)";

    // <fcntl.h>, <unistd.h>, <stdio.h> path operations, <sys/xattr.h>
    Open => "open", Filesystem, fail(ENOENT),
        "int open(const char *pathname, int flags, ...)";
    Open64 => "open64", Filesystem, fail(ENOENT),
        "int open64(const char *pathname, int flags, ...)";
    Close => "close", Filesystem, ok(0),
        "int close(int fd)";
    Read => "read", Filesystem, fail(EIO),
        "ssize_t read(int fd, void *buf, size_t count)";
    Write => "write", Filesystem, Policy::ClaimedSuccess,
        "ssize_t write(int fd, const void *buf, size_t count)";
    Lseek => "lseek", Filesystem, fail(ESPIPE),
        "off_t lseek(int fd, off_t offset, int whence)";
    Lseek64 => "lseek64", Filesystem, fail(ESPIPE),
        "off64_t lseek64(int fd, off64_t offset, int whence)";
    Fcntl => "fcntl", Filesystem, fail(ENOSYS),
        "int fcntl(int fd, int cmd, ...)";
    Fsync => "fsync", Filesystem, ok(0),
        "int fsync(int fd)";
    Fdatasync => "fdatasync", Filesystem, ok(0),
        "int fdatasync(int fd)";
    Ftruncate64 => "ftruncate64", Filesystem, fail(ENOSYS),
        "int ftruncate64(int fd, off64_t length)";
    Access => "access", Filesystem, fail(ENOENT),
        "int access(const char *pathname, int mode)";
    Unlink => "unlink", Filesystem, fail(ENOENT),
        "int unlink(const char *pathname)";
    Rename => "rename", Filesystem, fail(ENOENT),
        "int rename(const char *oldpath, const char *newpath)";
    Mkdir => "mkdir", Filesystem, fail(ENOSYS),
        "int mkdir(const char *pathname, mode_t mode)";
    Rmdir => "rmdir", Filesystem, fail(ENOENT),
        "int rmdir(const char *pathname)";
    Getcwd => "getcwd", Filesystem, fail_null(ENOSYS),
        "char *getcwd(char *buf, size_t size)";
    Realpath => "realpath", Filesystem, fail_null(ENOENT),
        "char *realpath(const char *path, char *resolved_path)";
    Utimes => "utimes", Filesystem, fail(ENOSYS),
        "int utimes(const char *filename, const struct timeval times[2])";
    Fchmod => "fchmod", Filesystem, fail(ENOSYS),
        "int fchmod(int fd, mode_t mode)";
    Fchown => "fchown", Filesystem, fail(ENOSYS),
        "int fchown(int fd, uid_t owner, gid_t group)";
    Remove => "remove", Filesystem, fail(ENOENT),
        "int remove(const char *pathname)";
    Readlink => "readlink", Filesystem, fail(ENOENT),
        "ssize_t readlink(const char *pathname, char *buf, size_t bufsiz)";
    Link => "link", Filesystem, fail(ENOSYS),
        "int link(const char *oldpath, const char *newpath)";
    Pathconf => "pathconf", Filesystem, fail(EINVAL),
        "long pathconf(const char *path, int name)";
    Fgetxattr => "fgetxattr", Filesystem, fail(ENOTSUP),
        "ssize_t fgetxattr(int fd, const char *name, void *value, size_t size)";
    Fsetxattr => "fsetxattr", Filesystem, fail(ENOTSUP),
        "int fsetxattr(int fd, const char *name, const void *value, size_t size, int flags)";
    Fremovexattr => "fremovexattr", Filesystem, fail(ENOTSUP),
        "int fremovexattr(int fd, const char *name)";
    Flistxattr => "flistxattr", Filesystem, fail(ENOTSUP),
        "ssize_t flistxattr(int fd, char *list, size_t size)";

    // <dirent.h>
    Opendir => "opendir", Directory, fail_null(ENOENT),
        "DIR *opendir(const char *name)";
    Readdir => "readdir", Directory, END,
        "struct dirent *readdir(DIR *dirp)";
    Closedir => "closedir", Directory, ok(0),
        "int closedir(DIR *dirp)";

    // <sys/socket.h>
    Socket => "socket", Network, fail(EAFNOSUPPORT),
        "int socket(int domain, int type, int protocol)";
    Connect => "connect", Network, fail(ECONNREFUSED),
        "int connect(int sockfd, const struct sockaddr *addr, socklen_t addrlen)";
    Bind => "bind", Network, fail(EADDRNOTAVAIL),
        "int bind(int sockfd, const struct sockaddr *addr, socklen_t addrlen)";
    Listen => "listen", Network, fail(EOPNOTSUPP),
        "int listen(int sockfd, int backlog)";
    Accept => "accept", Network, fail(EOPNOTSUPP),
        "int accept(int sockfd, struct sockaddr *addr, socklen_t *addrlen)";
    Send => "send", Network, fail(EPIPE),
        "ssize_t send(int sockfd, const void *buf, size_t len, int flags)";
    Recv => "recv", Network, fail(EIO),
        "ssize_t recv(int sockfd, void *buf, size_t len, int flags)";
    Sendto => "sendto", Network, fail(EPIPE),
        "ssize_t sendto(int sockfd, const void *buf, size_t len, int flags, const struct sockaddr *dest_addr, socklen_t addrlen)";
    Recvfrom => "recvfrom", Network, fail(EIO),
        "ssize_t recvfrom(int sockfd, void *buf, size_t len, int flags, struct sockaddr *src_addr, socklen_t *addrlen)";
    Setsockopt => "setsockopt", Network, fail(ENOPROTOOPT),
        "int setsockopt(int sockfd, int level, int optname, const void *optval, socklen_t optlen)";
    Getsockopt => "getsockopt", Network, fail(ENOPROTOOPT),
        "int getsockopt(int sockfd, int level, int optname, void *optval, socklen_t *optlen)";
    Getsockname => "getsockname", Network, fail(EBADF),
        "int getsockname(int sockfd, struct sockaddr *addr, socklen_t *addrlen)";
    Shutdown => "shutdown", Network, fail(ENOTCONN),
        "int shutdown(int sockfd, int how)";
    Socketpair => "socketpair", Network, fail(EOPNOTSUPP),
        "int socketpair(int domain, int type, int protocol, int sv[2])";

    // <unistd.h> positioned I/O, <sys/uio.h>
    Pread64 => "pread64", VectorIo, fail(ESPIPE),
        "ssize_t pread64(int fd, void *buf, size_t count, off64_t offset)";
    Pwrite64 => "pwrite64", VectorIo, fail(ESPIPE),
        "ssize_t pwrite64(int fd, const void *buf, size_t count, off64_t offset)";
    Readv => "readv", VectorIo, fail(EINVAL),
        "ssize_t readv(int fd, const struct iovec *iov, int iovcnt)";
    Writev => "writev", VectorIo, fail(EINVAL),
        "ssize_t writev(int fd, const struct iovec *iov, int iovcnt)";

    // <netdb.h>, gethostname
    Getaddrinfo => "getaddrinfo", NameResolution, fail_quiet(ReturnValue::Int(EAI_FAIL as i64)),
        "int getaddrinfo(const char *node, const char *service, const struct addrinfo *hints, struct addrinfo **res)";
    Freeaddrinfo => "freeaddrinfo", NameResolution, ok(0),
        "void freeaddrinfo(struct addrinfo *res)";
    Getnameinfo => "getnameinfo", NameResolution, fail_quiet(ReturnValue::Int(EAI_FAIL as i64)),
        "int getnameinfo(const struct sockaddr *sa, socklen_t salen, char *host, socklen_t hostlen, char *serv, socklen_t servlen, int flags)";
    GaiStrerror => "gai_strerror", NameResolution, Policy::NoOpSuccess(ReturnValue::Text(UNKNOWN_ERROR)),
        "const char *gai_strerror(int errcode)";
    Gethostname => "gethostname", NameResolution, fail(ENOSYS),
        "int gethostname(char *name, size_t len)";

    // Process identity, clocks, descriptors, scheduling
    Getpid => "getpid", ProcessTime, ok(1),
        "pid_t getpid(void)";
    // Root steers permission checks in the hosted runtime down the privileged path.
    Getuid => "getuid", ProcessTime, ok(0),
        "uid_t getuid(void)";
    Gettimeofday => "gettimeofday", ProcessTime, fail_quiet(ReturnValue::Int(-1)),
        "int gettimeofday(struct timeval *tv, void *tz)";
    ClockGettime => "clock_gettime", ProcessTime, fail_quiet(ReturnValue::Int(-1)),
        "int clock_gettime(clockid_t clk_id, struct timespec *tp)";
    Time => "time", ProcessTime, fail_quiet(ReturnValue::Int(-1)),
        "time_t time(time_t *tloc)";
    LocaltimeR => "localtime_r", ProcessTime, fail_quiet(ReturnValue::Null),
        "struct tm *localtime_r(const time_t *timep, struct tm *result)";
    GmtimeR => "gmtime_r", ProcessTime, fail_quiet(ReturnValue::Null),
        "struct tm *gmtime_r(const time_t *timep, struct tm *result)";
    Sysconf => "sysconf", ProcessTime, fail_quiet(ReturnValue::Int(-1)),
        "long sysconf(int name)";
    Exit => "exit", ProcessTime, Policy::Freeze,
        "void exit(int status)";
    Dup => "dup", ProcessTime, fail(EBADF),
        "int dup(int oldfd)";
    Dup2 => "dup2", ProcessTime, fail(EBADF),
        "int dup2(int oldfd, int newfd)";
    Poll => "poll", ProcessTime, fail(ENOSYS),
        "int poll(struct pollfd *fds, nfds_t nfds, int timeout)";
    Nanosleep => "nanosleep", ProcessTime, ok(0),
        "int nanosleep(const struct timespec *req, struct timespec *rem)";
    SchedYield => "sched_yield", ProcessTime, ok(0),
        "int sched_yield(void)";

    // <sys/mman.h>
    Mmap64 => "mmap64", Memory, Policy::FailClosed { ret: ReturnValue::MapFailed, errno: Some(ENOMEM) },
        "void *mmap64(void *addr, size_t length, int prot, int flags, int fd, off64_t offset)";
    Mmap => "_mmap", Memory, Policy::Forward { target: "mmap" },
        "void *_mmap(void *addr, size_t length, int prot, int flags, int fd, off_t offset)";
    Munmap => "_munmap", Memory, Policy::Forward { target: "munmap" },
        "int _munmap(void *addr, size_t length)";

    // <pwd.h>, <grp.h>
    Getpwuid => "getpwuid", Identity, fail_quiet(ReturnValue::Null),
        "struct passwd *getpwuid(uid_t uid)";
    GetpwuidR => "getpwuid_r", Identity, fail_quiet(ReturnValue::Int(-1)),
        "int getpwuid_r(uid_t uid, struct passwd *pwd, char *buf, size_t buflen, struct passwd **result)";
    Getgrgid => "getgrgid", Identity, fail_quiet(ReturnValue::Null),
        "struct group *getgrgid(gid_t gid)";
    GetgrgidR => "getgrgid_r", Identity, fail_quiet(ReturnValue::Int(-1)),
        "int getgrgid_r(gid_t gid, struct group *grp, char *buf, size_t buflen, struct group **result)";

    // <dlfcn.h>
    Dladdr => "dladdr", LoaderIntrospection, fail_quiet(ReturnValue::Int(0)),
        "int dladdr(const void *addr, Dl_info *info)";

    // <sys/utsname.h>
    Uname => "uname", HostIdentity, Policy::Synthetic(ReturnValue::Int(0)),
        "int uname(struct utsname *buf)";

    // <pthread.h>
    PthreadCondattrDestroy => "pthread_condattr_destroy", Threading, ok(0),
        "int pthread_condattr_destroy(pthread_condattr_t *attr)";
}
