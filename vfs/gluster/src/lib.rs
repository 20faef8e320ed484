//! GlusterFS volume provider for the virtual-filesystem abstraction.
//!
//! Bridges the native client's syscall-style surface (integer statuses, raw
//! records, opaque handle tokens) to the typed contract of [`vfs_core`]:
//! per-authority connection caching, attribute conversion, directory
//! streams, and the copy/move/delete/same-file decision logic.
//!
//! The native client itself stays behind the [`native::VolumeClient`] trait;
//! concrete bindings are a separate artifact.

mod attr;
mod config;
mod connection;
mod dir;
mod handle;
pub mod native;
mod path;
mod provider;

#[cfg(test)]
mod testutil;

pub use attr::{attributes_from_stat, mode_for_create};
pub use config::ConnectConfig;
pub use connection::{Authority, Connection, ConnectionRegistry};
pub use dir::{DirectoryStream, EntryFilter};
pub use path::{SEPARATOR, VolumePath};
pub use provider::{GlusterProvider, SCHEME};
