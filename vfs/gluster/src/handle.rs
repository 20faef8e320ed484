//! Sequential file content I/O over a volume connection.
//!
//! Copy needs exactly this much: sequential read of the source, sequential
//! write of a freshly created target. The random-access channel lives
//! outside this crate and consumes the same native handle.

use std::sync::Arc;

use vfs_core::{VfsError, VfsErrorKind, VfsResult};

use crate::connection::Connection;
use crate::native::{O_RDONLY, RawFd};

/// Open descriptor on a volume; closed on drop.
pub(crate) struct FileHandle {
    conn: Arc<Connection>,
    fd: Option<RawFd>,
}

impl FileHandle {
    pub(crate) fn open_read(conn: Arc<Connection>, path: &str) -> VfsResult<Self> {
        let fd = conn.client().open(conn.vol(), path, O_RDONLY);
        if fd < 0 {
            return Err(VfsError::new(VfsErrorKind::Io, "handle.open"));
        }
        Ok(Self { conn, fd: Some(fd) })
    }

    pub(crate) fn create_write(conn: Arc<Connection>, path: &str, mode: u32) -> VfsResult<Self> {
        let fd = conn.client().creat(conn.vol(), path, mode);
        if fd < 0 {
            return Err(VfsError::new(VfsErrorKind::Io, "handle.create"));
        }
        Ok(Self { conn, fd: Some(fd) })
    }

    pub(crate) fn read(&self, buf: &mut [u8]) -> VfsResult<usize> {
        let fd = self.require_fd("handle.read.closed")?;
        let n = self.conn.client().read(self.conn.vol(), fd, buf);
        if n < 0 {
            return Err(VfsError::new(VfsErrorKind::Io, "handle.read"));
        }
        Ok(n as usize)
    }

    pub(crate) fn write(&self, buf: &[u8]) -> VfsResult<usize> {
        let fd = self.require_fd("handle.write.closed")?;
        let n = self.conn.client().write(self.conn.vol(), fd, buf);
        if n < 0 {
            return Err(VfsError::new(VfsErrorKind::Io, "handle.write"));
        }
        Ok(n as usize)
    }

    /// Idempotent; also runs on drop, where the status is discarded.
    pub(crate) fn close(&mut self) -> VfsResult<()> {
        if let Some(fd) = self.fd.take() {
            if self.conn.client().close(self.conn.vol(), fd) < 0 {
                return Err(VfsError::new(VfsErrorKind::Io, "handle.close"));
            }
        }
        Ok(())
    }

    fn require_fd(&self, context: &'static str) -> VfsResult<RawFd> {
        self.fd
            .ok_or_else(|| VfsError::new(VfsErrorKind::Internal, context))
    }
}

impl Drop for FileHandle {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
