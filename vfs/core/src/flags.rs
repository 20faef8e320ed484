//! Option flags for copy and move operations.

use bitflags::bitflags;

bitflags! {
    /// Options accepted by copy and move. Which combinations a backend
    /// honors is the backend's contract; unsupported ones must be refused
    /// before any native call.
    pub struct CopyFlags: u32 {
        const REPLACE_EXISTING = 1 << 0;
        const COPY_ATTRIBUTES = 1 << 1;
        const ATOMIC_MOVE = 1 << 2;
        const NOFOLLOW_LINKS = 1 << 3;
    }
}
