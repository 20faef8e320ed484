//! Native client surface.
//!
//! Syscall-style contract mirrored one-to-one from the storage cluster's
//! client library: integer statuses (zero = success, negative = failure),
//! plain out-records, opaque integer handle tokens. The adapter owns all
//! translation into the error taxonomy; raw codes never cross this boundary
//! outward. Concrete bindings are a separate artifact implementing
//! [`VolumeClient`].

/// Opaque volume handle token. Zero is the failure indicator from
/// [`VolumeClient::volume_new`]; an established connection never holds zero.
pub type RawVolume = u64;

/// Opaque open-directory token. Zero is the failure indicator.
pub type RawDir = u64;

/// Open file descriptor token. Negative is the failure indicator.
pub type RawFd = i64;

/// Open for reading only.
pub const O_RDONLY: i32 = 0;
/// Open for writing only.
pub const O_WRONLY: i32 = 0o1;

/// One stat/lstat record as the native layer fills it. Times are whole
/// seconds since the epoch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawStat {
    pub st_mode: u32,
    pub st_uid: u32,
    pub st_gid: u32,
    pub st_size: u64,
    pub st_atime: i64,
    pub st_ctime: i64,
    pub st_mtime: i64,
    pub st_ino: u64,
}

/// Filesystem-capacity snapshot from one statvfs call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawStatvfs {
    pub f_bsize: u64,
    pub f_blocks: u64,
    pub f_bfree: u64,
    pub f_bavail: u64,
}

/// One directory entry as the native layer yields it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawDirent {
    pub d_ino: u64,
    pub d_name: String,
}

/// The opaque native client.
///
/// All calls are synchronous and blocking; the implementation is trusted to
/// return in bounded time. No cancellation or timeout contract exists.
pub trait VolumeClient: Send + Sync + 'static {
    /// Allocate a handle for the named volume. Returns zero on failure.
    fn volume_new(&self, volname: &str) -> RawVolume;
    /// Point the handle at a volfile server.
    fn set_volfile_server(&self, vol: RawVolume, transport: &str, host: &str, port: u16) -> i32;
    /// Establish the connection.
    fn init(&self, vol: RawVolume) -> i32;
    /// Release the handle and its connection.
    fn fini(&self, vol: RawVolume) -> i32;

    fn stat(&self, vol: RawVolume, path: &str, out: &mut RawStat) -> i32;
    fn lstat(&self, vol: RawVolume, path: &str, out: &mut RawStat) -> i32;
    fn access(&self, vol: RawVolume, path: &str, mask: u32) -> i32;
    fn unlink(&self, vol: RawVolume, path: &str) -> i32;
    fn rmdir(&self, vol: RawVolume, path: &str) -> i32;
    fn rename(&self, vol: RawVolume, from: &str, to: &str) -> i32;
    fn statvfs(&self, vol: RawVolume, path: &str, out: &mut RawStatvfs) -> i32;
    fn mkdir(&self, vol: RawVolume, path: &str, mode: u32) -> i32;
    fn chmod(&self, vol: RawVolume, path: &str, mode: u32) -> i32;

    /// Create-and-open for writing, truncating an existing file. Returns a
    /// descriptor, negative on failure.
    fn creat(&self, vol: RawVolume, path: &str, mode: u32) -> RawFd;
    /// Open an existing file. Returns a descriptor, negative on failure.
    fn open(&self, vol: RawVolume, path: &str, flags: i32) -> RawFd;
    /// Sequential read: bytes read, zero at end of file, negative on failure.
    fn read(&self, vol: RawVolume, fd: RawFd, buf: &mut [u8]) -> i64;
    /// Sequential write: bytes written, negative on failure.
    fn write(&self, vol: RawVolume, fd: RawFd, buf: &[u8]) -> i64;
    fn close(&self, vol: RawVolume, fd: RawFd) -> i32;

    /// Open a directory listing. Returns zero on failure.
    fn opendir(&self, vol: RawVolume, path: &str) -> RawDir;
    /// Pull the next entry: positive with `out` filled, zero at end of
    /// stream, negative on failure.
    fn readdir(&self, vol: RawVolume, dir: RawDir, out: &mut RawDirent) -> i32;
    fn closedir(&self, vol: RawVolume, dir: RawDir) -> i32;
}
