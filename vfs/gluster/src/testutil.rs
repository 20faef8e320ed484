//! Native-layer stub shared by the unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::connection::{Authority, Connection, ConnectionRegistry};
use crate::native::{RawDir, RawDirent, RawFd, RawStat, RawStatvfs, RawVolume, VolumeClient};

/// All-success native stub with call counters; individual establishment
/// steps can be told to fail. Everything path-related reports "not there".
#[derive(Default)]
pub(crate) struct StubVolume {
    fail_new: bool,
    fail_server: bool,
    fail_init: bool,
    pub new_calls: AtomicUsize,
    pub init_calls: AtomicUsize,
    pub fini_calls: AtomicUsize,
}

impl StubVolume {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_new() -> Arc<Self> {
        Arc::new(Self {
            fail_new: true,
            ..Default::default()
        })
    }

    pub fn failing_server() -> Arc<Self> {
        Arc::new(Self {
            fail_server: true,
            ..Default::default()
        })
    }

    pub fn failing_init() -> Arc<Self> {
        Arc::new(Self {
            fail_init: true,
            ..Default::default()
        })
    }
}

impl VolumeClient for StubVolume {
    fn volume_new(&self, _volname: &str) -> RawVolume {
        self.new_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_new { 0 } else { 7 }
    }

    fn set_volfile_server(
        &self,
        _vol: RawVolume,
        _transport: &str,
        _host: &str,
        _port: u16,
    ) -> i32 {
        if self.fail_server { -1 } else { 0 }
    }

    fn init(&self, _vol: RawVolume) -> i32 {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_init { -1 } else { 0 }
    }

    fn fini(&self, _vol: RawVolume) -> i32 {
        self.fini_calls.fetch_add(1, Ordering::SeqCst);
        0
    }

    fn stat(&self, _vol: RawVolume, _path: &str, _out: &mut RawStat) -> i32 {
        -1
    }

    fn lstat(&self, _vol: RawVolume, _path: &str, _out: &mut RawStat) -> i32 {
        -1
    }

    fn access(&self, _vol: RawVolume, _path: &str, _mask: u32) -> i32 {
        -1
    }

    fn unlink(&self, _vol: RawVolume, _path: &str) -> i32 {
        -1
    }

    fn rmdir(&self, _vol: RawVolume, _path: &str) -> i32 {
        -1
    }

    fn rename(&self, _vol: RawVolume, _from: &str, _to: &str) -> i32 {
        -1
    }

    fn statvfs(&self, _vol: RawVolume, _path: &str, _out: &mut RawStatvfs) -> i32 {
        -1
    }

    fn mkdir(&self, _vol: RawVolume, _path: &str, _mode: u32) -> i32 {
        -1
    }

    fn chmod(&self, _vol: RawVolume, _path: &str, _mode: u32) -> i32 {
        -1
    }

    fn creat(&self, _vol: RawVolume, _path: &str, _mode: u32) -> RawFd {
        -1
    }

    fn open(&self, _vol: RawVolume, _path: &str, _flags: i32) -> RawFd {
        -1
    }

    fn read(&self, _vol: RawVolume, _fd: RawFd, _buf: &mut [u8]) -> i64 {
        -1
    }

    fn write(&self, _vol: RawVolume, _fd: RawFd, _buf: &[u8]) -> i64 {
        -1
    }

    fn close(&self, _vol: RawVolume, _fd: RawFd) -> i32 {
        0
    }

    fn opendir(&self, _vol: RawVolume, _path: &str) -> RawDir {
        0
    }

    fn readdir(&self, _vol: RawVolume, _dir: RawDir, _out: &mut RawDirent) -> i32 {
        -1
    }

    fn closedir(&self, _vol: RawVolume, _dir: RawDir) -> i32 {
        0
    }
}

/// Establish a connection against a fresh stub-backed registry.
pub(crate) fn stub_connection(authority: &str) -> Arc<Connection> {
    let registry = ConnectionRegistry::new(StubVolume::ok());
    let authority = Authority::parse(authority).expect("authority should parse");
    registry.resolve(&authority).expect("stub resolve")
}
