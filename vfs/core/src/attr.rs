//! POSIX-style file attribute snapshots.

use crate::perm::{FileKind, FilePerms};

/// Attribute families a caller can request.
///
/// Closed set: `Basic` and `Posix` are served by volume backends. `Dos` and
/// `Acl` exist so such a request can be expressed, and refused as
/// unsupported, without an open-ended type token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttrView {
    Basic,
    Posix,
    Dos,
    Acl,
}

/// Owner or group identity.
///
/// The native layer only reports numeric ids; the name is the decimal
/// rendering of the id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Principal(u32);

impl Principal {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn id(self) -> u32 {
        self.0
    }

    pub fn name(self) -> String {
        self.0.to_string()
    }
}

/// Immutable snapshot of one stat/lstat record.
///
/// Fields are one-to-one with the native record; times are native whole
/// seconds. Everything else (permission set, type, millisecond timestamps,
/// identity key) is derived on demand, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileAttributes {
    pub mode: u32,
    pub uid: u32,
    pub gid: u32,
    pub size: u64,
    pub atime: i64,
    pub ctime: i64,
    pub mtime: i64,
    pub inode: u64,
}

impl FileAttributes {
    pub fn kind(&self) -> FileKind {
        FileKind::from_mode(self.mode)
    }

    pub fn permissions(&self) -> FilePerms {
        FilePerms::from_mode(self.mode)
    }

    pub fn is_regular_file(&self) -> bool {
        self.kind() == FileKind::Regular
    }

    pub fn is_directory(&self) -> bool {
        self.kind() == FileKind::Directory
    }

    pub fn is_symlink(&self) -> bool {
        self.kind() == FileKind::Symlink
    }

    pub fn is_other(&self) -> bool {
        self.kind() == FileKind::Other
    }

    pub fn owner(&self) -> Principal {
        Principal::new(self.uid)
    }

    pub fn group(&self) -> Principal {
        Principal::new(self.gid)
    }

    /// Last access time in milliseconds since the epoch. The native record
    /// carries whole seconds; no sub-second precision exists to expose.
    pub fn last_access_millis(&self) -> i64 {
        self.atime * 1000
    }

    /// Creation (status-change) time in milliseconds since the epoch.
    pub fn creation_millis(&self) -> i64 {
        self.ctime * 1000
    }

    /// Last modification time in milliseconds since the epoch.
    pub fn last_modified_millis(&self) -> i64 {
        self.mtime * 1000
    }

    /// Identity key: the native inode number. Ground truth for same-file
    /// comparison.
    pub fn file_key(&self) -> u64 {
        self.inode
    }
}
