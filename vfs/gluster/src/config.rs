//! Connection settings.

use vfs_core::{VfsError, VfsErrorKind, VfsResult};

/// Settings applied when a freshly created volume handle is pointed at its
/// volfile server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectConfig {
    /// Transport the volfile server speaks.
    pub transport: String,
    /// Volfile server port.
    pub port: u16,
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self {
            transport: "tcp".to_string(),
            port: 24007,
        }
    }
}

impl ConnectConfig {
    pub fn validate(&self) -> VfsResult<()> {
        if self.transport.is_empty() {
            return Err(VfsError::new(
                VfsErrorKind::InvalidInput,
                "config.transport.empty",
            ));
        }
        if self.port == 0 {
            return Err(VfsError::new(VfsErrorKind::InvalidInput, "config.port.zero"));
        }
        Ok(())
    }
}
