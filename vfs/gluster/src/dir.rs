//! Directory streams.

use vfs_core::{VfsError, VfsErrorKind, VfsResult};

use crate::native::{RawDir, RawDirent};
use crate::path::VolumePath;

/// Filter applied to each candidate entry before it is yielded. Entries it
/// refuses are skipped, not buffered.
pub type EntryFilter = Box<dyn Fn(&VolumePath) -> bool + Send>;

/// Lazy, single-pass enumeration bound to one open native listing.
///
/// The native handle is held until [`close`](Self::close); exhaustion, a
/// native read failure, and drop all release it. The stream is not
/// restartable.
pub struct DirectoryStream {
    parent: VolumePath,
    dir: Option<RawDir>,
    filter: Option<EntryFilter>,
}

impl DirectoryStream {
    /// The caller has already established that `parent` is a directory.
    pub(crate) fn open(parent: VolumePath, filter: Option<EntryFilter>) -> VfsResult<Self> {
        let dir = {
            let conn = parent.connection();
            conn.client().opendir(conn.vol(), &parent.path_string())
        };
        if dir == 0 {
            return Err(VfsError::new(VfsErrorKind::Io, "dir.open"));
        }
        Ok(Self {
            parent,
            dir: Some(dir),
            filter,
        })
    }

    /// Release the native listing. Idempotent; also runs on drop.
    pub fn close(&mut self) {
        if let Some(dir) = self.dir.take() {
            let conn = self.parent.connection();
            let _ = conn.client().closedir(conn.vol(), dir);
        }
    }
}

impl std::fmt::Debug for DirectoryStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryStream")
            .field("parent", &self.parent)
            .field("open", &self.dir.is_some())
            .field("filtered", &self.filter.is_some())
            .finish()
    }
}

impl Iterator for DirectoryStream {
    type Item = VfsResult<VolumePath>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let dir = self.dir?;
            let conn = self.parent.connection().clone();
            let mut entry = RawDirent::default();
            let status = conn.client().readdir(conn.vol(), dir, &mut entry);
            if status == 0 {
                self.close();
                return None;
            }
            if status < 0 {
                self.close();
                return Some(Err(VfsError::new(VfsErrorKind::Io, "dir.read")));
            }
            if entry.d_name == "." || entry.d_name == ".." {
                continue;
            }
            let child = self.parent.child(&entry.d_name);
            if let Some(filter) = &self.filter {
                if !filter(&child) {
                    continue;
                }
            }
            return Some(Ok(child));
        }
    }
}

impl Drop for DirectoryStream {
    fn drop(&mut self) {
        self.close();
    }
}
