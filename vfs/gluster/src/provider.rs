//! The provider façade: the operation surface over volume connections.
//!
//! Every operation here either succeeds with a typed result or fails with
//! exactly one classified condition; native status codes stop at this layer.

use std::sync::Arc;

use tracing::debug;
use vfs_core::{
    AccessMode, AttrView, CopyFlags, FileAttributes, FileKind, FilePerms, VfsError, VfsErrorKind,
    VfsResult,
};

use crate::attr::{attributes_from_stat, mode_for_create};
use crate::config::ConnectConfig;
use crate::connection::{Authority, ConnectionRegistry};
use crate::dir::{DirectoryStream, EntryFilter};
use crate::handle::FileHandle;
use crate::native::{RawStat, RawStatvfs, VolumeClient};
use crate::path::VolumePath;

/// URI scheme served by this provider.
pub const SCHEME: &str = "gluster";

/// Mode for copy targets when no attribute copy was requested.
const DEFAULT_FILE_MODE: u32 = 0o644;
const DEFAULT_DIR_MODE: u32 = 0o755;

const COPY_BUF_SIZE: usize = 128 * 1024;

pub struct GlusterProvider {
    registry: ConnectionRegistry,
}

impl GlusterProvider {
    pub fn new(client: Arc<dyn VolumeClient>) -> Self {
        Self {
            registry: ConnectionRegistry::new(client),
        }
    }

    pub fn with_config(client: Arc<dyn VolumeClient>, config: ConnectConfig) -> VfsResult<Self> {
        Ok(Self {
            registry: ConnectionRegistry::with_config(client, config)?,
        })
    }

    pub fn scheme(&self) -> &'static str {
        SCHEME
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    /// Resolve a `gluster://server:volume/path` identifier, establishing the
    /// volume connection on first use.
    pub fn resolve_path(&self, uri: &str) -> VfsResult<VolumePath> {
        let (authority, path) = split_uri(uri)?;
        let conn = self.registry.resolve(&authority)?;
        Ok(VolumePath::new(conn, path))
    }

    /// Resolve against an already-established connection only.
    pub fn lookup_path(&self, uri: &str) -> VfsResult<VolumePath> {
        let (authority, path) = split_uri(uri)?;
        let conn = self.registry.lookup(&authority)?;
        Ok(VolumePath::new(conn, path))
    }

    /// Read one attribute snapshot: stat when following links, lstat when
    /// not. Only the `Basic` and `Posix` views are modeled.
    pub fn read_attributes(
        &self,
        path: &VolumePath,
        view: AttrView,
        follow_links: bool,
    ) -> VfsResult<FileAttributes> {
        match view {
            AttrView::Basic | AttrView::Posix => {}
            AttrView::Dos | AttrView::Acl => {
                return Err(VfsError::new(
                    VfsErrorKind::NotSupported,
                    "provider.read_attributes.view",
                ));
            }
        }
        let stat = self.stat_path(path, follow_links, "provider.read_attributes")?;
        Ok(attributes_from_stat(&stat))
    }

    /// Check the requested access modes, succeeding silently.
    pub fn check_access(&self, path: &VolumePath, modes: AccessMode) -> VfsResult<()> {
        // Existence decides first: a missing file is NotFound, never
        // PermissionDenied.
        self.stat_path(path, false, "provider.check_access")?;
        let conn = path.connection();
        if conn
            .client()
            .access(conn.vol(), &path.path_string(), modes.bits())
            < 0
        {
            return Err(VfsError::new(
                VfsErrorKind::PermissionDenied,
                "provider.check_access",
            ));
        }
        Ok(())
    }

    /// Purely syntactic; no native calls.
    pub fn is_hidden(&self, path: &VolumePath) -> bool {
        path.has_hidden_name()
    }

    pub fn total_space(&self, path: &VolumePath) -> VfsResult<u64> {
        let vfs = self.statvfs_path(path)?;
        Ok(vfs.f_bsize * vfs.f_blocks)
    }

    pub fn usable_space(&self, path: &VolumePath) -> VfsResult<u64> {
        let vfs = self.statvfs_path(path)?;
        Ok(vfs.f_bsize * vfs.f_bavail)
    }

    pub fn unallocated_space(&self, path: &VolumePath) -> VfsResult<u64> {
        let vfs = self.statvfs_path(path)?;
        Ok(vfs.f_bsize * vfs.f_bfree)
    }

    /// Create a directory, folding the requested permission set into the
    /// native mode value.
    pub fn create_directory(&self, path: &VolumePath, perms: FilePerms) -> VfsResult<()> {
        if self.stat_optional(path, false).is_some() {
            return Err(VfsError::new(
                VfsErrorKind::AlreadyExists,
                "provider.create_directory.exists",
            ));
        }
        let conn = path.connection();
        if conn
            .client()
            .mkdir(conn.vol(), &path.path_string(), mode_for_create(perms))
            < 0
        {
            return Err(VfsError::new(VfsErrorKind::Io, "provider.create_directory"));
        }
        Ok(())
    }

    /// Create an empty regular file, folding the requested permission set
    /// into the native mode value.
    pub fn create_file(&self, path: &VolumePath, perms: FilePerms) -> VfsResult<()> {
        if self.stat_optional(path, false).is_some() {
            return Err(VfsError::new(
                VfsErrorKind::AlreadyExists,
                "provider.create_file.exists",
            ));
        }
        let conn = path.connection().clone();
        let mut handle =
            FileHandle::create_write(conn, &path.path_string(), mode_for_create(perms))?;
        handle.close()
    }

    /// Delete a file or an empty directory. Dispatch follows a preceding
    /// lstat type check; an unclassifiable node fails rather than guessing.
    pub fn delete(&self, path: &VolumePath) -> VfsResult<()> {
        let stat = self.stat_path(path, false, "provider.delete")?;
        let conn = path.connection();
        match FileKind::from_mode(stat.st_mode) {
            FileKind::Directory => {
                if !self.directory_is_empty(path)? {
                    return Err(VfsError::new(
                        VfsErrorKind::DirNotEmpty,
                        "provider.delete.not_empty",
                    ));
                }
                if conn.client().rmdir(conn.vol(), &path.path_string()) < 0 {
                    return Err(VfsError::new(VfsErrorKind::Io, "provider.delete.rmdir"));
                }
            }
            FileKind::Regular | FileKind::Symlink => {
                if conn.client().unlink(conn.vol(), &path.path_string()) < 0 {
                    return Err(VfsError::new(VfsErrorKind::Io, "provider.delete.unlink"));
                }
            }
            FileKind::Other => {
                return Err(VfsError::new(VfsErrorKind::Io, "provider.delete.unknown_kind"));
            }
        }
        debug!(path = %path, "deleted");
        Ok(())
    }

    /// Copy a file's content (or recreate a directory) at the target.
    ///
    /// A failure after target creation may leave a partially written target;
    /// that is surfaced, not masked, and nothing is rolled back.
    pub fn copy(&self, source: &VolumePath, target: &VolumePath, flags: CopyFlags) -> VfsResult<()> {
        if flags.intersects(CopyFlags::ATOMIC_MOVE | CopyFlags::NOFOLLOW_LINKS) {
            return Err(VfsError::new(VfsErrorKind::NotSupported, "provider.copy.option"));
        }
        let src_stat = self.stat_path(source, true, "provider.copy.source")?;
        self.check_target(target, flags, true)?;

        if FileKind::from_mode(src_stat.st_mode) == FileKind::Directory {
            let mode = if flags.contains(CopyFlags::COPY_ATTRIBUTES) {
                src_stat.st_mode & 0o777
            } else {
                DEFAULT_DIR_MODE
            };
            let conn = target.connection();
            if conn.client().mkdir(conn.vol(), &target.path_string(), mode) < 0 {
                return Err(VfsError::new(VfsErrorKind::Io, "provider.copy.mkdir"));
            }
        } else {
            self.copy_file_content(source, target)?;
            if flags.contains(CopyFlags::COPY_ATTRIBUTES) {
                self.copy_file_attributes(&src_stat, target)?;
            }
        }
        debug!(source = %source, target = %target, "copied");
        Ok(())
    }

    /// Move within one volume connection via a single native rename.
    pub fn move_file(
        &self,
        source: &VolumePath,
        target: &VolumePath,
        flags: CopyFlags,
    ) -> VfsResult<()> {
        // The native layer offers no atomic rename contract; refuse before
        // touching anything.
        if flags.contains(CopyFlags::ATOMIC_MOVE) {
            return Err(VfsError::new(
                VfsErrorKind::AtomicMoveUnsupported,
                "provider.move.atomic",
            ));
        }
        if flags.intersects(CopyFlags::COPY_ATTRIBUTES | CopyFlags::NOFOLLOW_LINKS) {
            return Err(VfsError::new(VfsErrorKind::NotSupported, "provider.move.option"));
        }
        self.stat_path(source, false, "provider.move.source")?;
        self.check_target(target, flags, false)?;
        if !Arc::ptr_eq(source.connection(), target.connection()) {
            return Err(VfsError::new(
                VfsErrorKind::NotSupported,
                "provider.move.cross_volume",
            ));
        }
        let conn = source.connection();
        if conn
            .client()
            .rename(conn.vol(), &source.path_string(), &target.path_string())
            < 0
        {
            return Err(VfsError::new(VfsErrorKind::Io, "provider.move.rename"));
        }
        debug!(source = %source, target = %target, "moved");
        Ok(())
    }

    /// Same-file identity: structural path equality is a shortcut, inode
    /// equality is ground truth (covers hard and symbolic links).
    pub fn is_same_file(&self, a: &VolumePath, b: &VolumePath) -> VfsResult<bool> {
        if a == b {
            return Ok(true);
        }
        if !Arc::ptr_eq(a.connection(), b.connection()) {
            return Ok(false);
        }
        let stat_a = self.stat_path(a, true, "provider.is_same_file")?;
        let stat_b = self.stat_path(b, true, "provider.is_same_file")?;
        Ok(stat_a.st_ino == stat_b.st_ino)
    }

    /// Open a directory stream. The target's type is checked before any
    /// native directory handle is created.
    pub fn new_directory_stream(
        &self,
        path: &VolumePath,
        filter: Option<EntryFilter>,
    ) -> VfsResult<DirectoryStream> {
        let stat = self.stat_path(path, true, "provider.new_directory_stream")?;
        if FileKind::from_mode(stat.st_mode) != FileKind::Directory {
            return Err(VfsError::new(
                VfsErrorKind::NotDir,
                "provider.new_directory_stream.not_dir",
            ));
        }
        DirectoryStream::open(path.clone(), filter)
    }

    fn stat_path(
        &self,
        path: &VolumePath,
        follow_links: bool,
        context: &'static str,
    ) -> VfsResult<RawStat> {
        let conn = path.connection();
        let mut stat = RawStat::default();
        let status = if follow_links {
            conn.client().stat(conn.vol(), &path.path_string(), &mut stat)
        } else {
            conn.client().lstat(conn.vol(), &path.path_string(), &mut stat)
        };
        if status < 0 {
            return Err(VfsError::new(VfsErrorKind::NotFound, context));
        }
        Ok(stat)
    }

    fn stat_optional(&self, path: &VolumePath, follow_links: bool) -> Option<RawStat> {
        self.stat_path(path, follow_links, "provider.stat_optional").ok()
    }

    /// Shared copy/move target gate: present without replace-existing fails,
    /// a non-empty directory fails. Copy additionally clears a replaceable
    /// target so creation starts clean; move leaves it for the rename.
    fn check_target(
        &self,
        target: &VolumePath,
        flags: CopyFlags,
        remove_existing: bool,
    ) -> VfsResult<()> {
        let Some(stat) = self.stat_optional(target, true) else {
            return Ok(());
        };
        if !flags.contains(CopyFlags::REPLACE_EXISTING) {
            return Err(VfsError::new(
                VfsErrorKind::AlreadyExists,
                "provider.target.exists",
            ));
        }
        let is_dir = FileKind::from_mode(stat.st_mode) == FileKind::Directory;
        if is_dir && !self.directory_is_empty(target)? {
            return Err(VfsError::new(
                VfsErrorKind::DirNotEmpty,
                "provider.target.not_empty",
            ));
        }
        if remove_existing {
            let conn = target.connection();
            let status = if is_dir {
                conn.client().rmdir(conn.vol(), &target.path_string())
            } else {
                conn.client().unlink(conn.vol(), &target.path_string())
            };
            if status < 0 {
                return Err(VfsError::new(VfsErrorKind::Io, "provider.target.clear"));
            }
        }
        Ok(())
    }

    fn directory_is_empty(&self, path: &VolumePath) -> VfsResult<bool> {
        let mut stream = DirectoryStream::open(path.clone(), None)?;
        let first = stream.next();
        stream.close();
        match first {
            None => Ok(true),
            Some(Ok(_)) => Ok(false),
            Some(Err(err)) => Err(err),
        }
    }

    fn copy_file_content(&self, source: &VolumePath, target: &VolumePath) -> VfsResult<()> {
        let src = FileHandle::open_read(source.connection().clone(), &source.path_string())?;
        let mut dst = FileHandle::create_write(
            target.connection().clone(),
            &target.path_string(),
            DEFAULT_FILE_MODE,
        )?;
        let mut buf = vec![0u8; COPY_BUF_SIZE];
        loop {
            let n = src.read(&mut buf)?;
            if n == 0 {
                break;
            }
            let mut written = 0;
            while written < n {
                let step = dst.write(&buf[written..n])?;
                if step == 0 {
                    return Err(VfsError::new(VfsErrorKind::Io, "provider.copy.write_zero"));
                }
                written += step;
            }
        }
        dst.close()
    }

    fn copy_file_attributes(&self, src_stat: &RawStat, target: &VolumePath) -> VfsResult<()> {
        let conn = target.connection();
        if conn
            .client()
            .chmod(conn.vol(), &target.path_string(), src_stat.st_mode & 0o777)
            < 0
        {
            return Err(VfsError::new(VfsErrorKind::Io, "provider.copy.attributes"));
        }
        Ok(())
    }

    fn statvfs_path(&self, path: &VolumePath) -> VfsResult<RawStatvfs> {
        let conn = path.connection();
        let mut vfs = RawStatvfs::default();
        if conn.client().statvfs(conn.vol(), &path.path_string(), &mut vfs) < 0 {
            return Err(VfsError::new(VfsErrorKind::Io, "provider.statvfs"));
        }
        Ok(vfs)
    }
}

/// Split `gluster://server:volume/path` into its authority and path
/// component. A missing path component means the volume root.
fn split_uri(uri: &str) -> VfsResult<(Authority, &str)> {
    let rest = uri
        .strip_prefix(SCHEME)
        .and_then(|rest| rest.strip_prefix("://"))
        .ok_or_else(|| VfsError::new(VfsErrorKind::InvalidInput, "provider.uri.scheme"))?;
    let (authority, path) = match rest.find('/') {
        Some(idx) => (&rest[..idx], &rest[idx..]),
        None => (rest, "/"),
    };
    Ok((Authority::parse(authority)?, path))
}
