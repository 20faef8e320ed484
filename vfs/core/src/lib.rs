//! Abstraction-side types for volume filesystem adapters.
//!
//! This crate carries no native types: only the error taxonomy, the POSIX
//! permission/attribute model, and the option flags an adapter's operation
//! surface speaks. Backends depend on it; it depends on nothing backend
//! specific.

pub mod attr;
pub mod error;
pub mod flags;
pub mod perm;

pub use attr::{AttrView, FileAttributes, Principal};
pub use error::{VfsError, VfsErrorKind, VfsResult};
pub use flags::CopyFlags;
pub use perm::{AccessMode, FileKind, FilePerms};
