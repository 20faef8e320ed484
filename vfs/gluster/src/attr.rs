//! Attribute codec: native stat records to attribute snapshots.

use vfs_core::{FileAttributes, FilePerms};

use crate::native::RawStat;

/// Pure, total, field-for-field conversion. Never fails, makes no native
/// calls.
pub fn attributes_from_stat(stat: &RawStat) -> FileAttributes {
    FileAttributes {
        mode: stat.st_mode,
        uid: stat.st_uid,
        gid: stat.st_gid,
        size: stat.st_size,
        atime: stat.st_atime,
        ctime: stat.st_ctime,
        mtime: stat.st_mtime,
        inode: stat.st_ino,
    }
}

/// Fold a requested permission set into the mode value a native creation
/// call consumes. Inverse of [`FileAttributes::permissions`] by way of the
/// shared bit table.
pub fn mode_for_create(perms: FilePerms) -> u32 {
    perms.mode_bits()
}
