//! Error taxonomy for volume filesystem operations.

use std::fmt;
use thiserror::Error;

pub type VfsResult<T> = Result<T, VfsError>;

/// Classified failure condition.
///
/// Every operation fails with exactly one of these; raw native status codes
/// never cross the adapter boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum VfsErrorKind {
    /// Malformed authority, unknown scheme, bad config, or a failed
    /// connection establishment step.
    InvalidInput,
    /// No cached connection for the authority on a lookup-only resolution.
    VolumeNotFound,
    /// The named file or directory does not exist.
    NotFound,
    /// Target already present and the operation does not replace.
    AlreadyExists,
    /// A directory was required.
    NotDir,
    /// Removing or replacing a directory that still has entries.
    DirNotEmpty,
    /// The native access test refused the requested modes.
    PermissionDenied,
    /// Unsupported option, attribute view, or cross-volume operation.
    NotSupported,
    /// An atomic move was requested; the native layer offers none.
    AtomicMoveUnsupported,
    /// Any other negative native return.
    Io,
    /// Broken adapter invariant; not produced by the native layer.
    Internal,
}

impl VfsErrorKind {
    /// Stable string name (logging/telemetry only).
    pub fn as_str(self) -> &'static str {
        match self {
            VfsErrorKind::InvalidInput => "invalid_input",
            VfsErrorKind::VolumeNotFound => "volume_not_found",
            VfsErrorKind::NotFound => "not_found",
            VfsErrorKind::AlreadyExists => "already_exists",
            VfsErrorKind::NotDir => "not_dir",
            VfsErrorKind::DirNotEmpty => "dir_not_empty",
            VfsErrorKind::PermissionDenied => "permission_denied",
            VfsErrorKind::NotSupported => "not_supported",
            VfsErrorKind::AtomicMoveUnsupported => "atomic_move_unsupported",
            VfsErrorKind::Io => "io",
            VfsErrorKind::Internal => "internal",
        }
    }
}

impl fmt::Display for VfsErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("{context}: {kind}")]
pub struct VfsError {
    kind: VfsErrorKind,
    context: &'static str,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl VfsError {
    pub fn new(kind: VfsErrorKind, context: &'static str) -> Self {
        Self {
            kind,
            context,
            source: None,
        }
    }

    pub fn with_source(
        kind: VfsErrorKind,
        context: &'static str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            context,
            source: Some(Box::new(source)),
        }
    }

    pub fn kind(&self) -> VfsErrorKind {
        self.kind
    }

    /// Static `"component.operation"` string naming the failure site.
    pub fn context(&self) -> &'static str {
        self.context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_context_and_kind() {
        let err = VfsError::new(VfsErrorKind::NotFound, "provider.read_attributes");
        assert_eq!(err.to_string(), "provider.read_attributes: not_found");
        assert_eq!(err.kind(), VfsErrorKind::NotFound);
    }
}
