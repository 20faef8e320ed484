//! Volume authorities, connections, and the connection registry.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;
use vfs_core::{VfsError, VfsErrorKind, VfsResult};

use crate::config::ConnectConfig;
use crate::native::{RawVolume, VolumeClient};

/// `(server, volume)` pair identifying one native storage volume.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Authority {
    server: String,
    volume: String,
}

impl Authority {
    /// Parse `"server:volume"`: exactly one separator, both halves
    /// non-empty. Malformed input is rejected before any native call.
    pub fn parse(input: &str) -> VfsResult<Self> {
        let mut halves = input.split(':');
        let (Some(server), Some(volume), None) = (halves.next(), halves.next(), halves.next())
        else {
            return Err(VfsError::new(VfsErrorKind::InvalidInput, "authority.split"));
        };
        if server.is_empty() {
            return Err(VfsError::new(
                VfsErrorKind::InvalidInput,
                "authority.server.empty",
            ));
        }
        if volume.is_empty() {
            return Err(VfsError::new(
                VfsErrorKind::InvalidInput,
                "authority.volume.empty",
            ));
        }
        Ok(Self {
            server: server.to_string(),
            volume: volume.to_string(),
        })
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn volume(&self) -> &str {
        &self.volume
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.server, self.volume)
    }
}

/// Adapter-level owner of one native volume handle.
pub struct Connection {
    client: Arc<dyn VolumeClient>,
    authority: Authority,
    vol: RawVolume,
}

impl Connection {
    /// Run the establishment sequence: allocate the handle, attach the
    /// server, initialize. Any failing step classifies as `InvalidInput` and
    /// hands the handle back before surfacing.
    fn establish(
        client: Arc<dyn VolumeClient>,
        authority: Authority,
        config: &ConnectConfig,
    ) -> VfsResult<Self> {
        let vol = client.volume_new(authority.volume());
        if vol == 0 {
            return Err(VfsError::new(
                VfsErrorKind::InvalidInput,
                "connection.volume_new",
            ));
        }
        if client.set_volfile_server(vol, &config.transport, authority.server(), config.port) < 0 {
            let _ = client.fini(vol);
            return Err(VfsError::new(
                VfsErrorKind::InvalidInput,
                "connection.set_volfile_server",
            ));
        }
        if client.init(vol) < 0 {
            let _ = client.fini(vol);
            return Err(VfsError::new(VfsErrorKind::InvalidInput, "connection.init"));
        }
        debug!(authority = %authority, "volume connection established");
        Ok(Self {
            client,
            authority,
            vol,
        })
    }

    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    pub(crate) fn client(&self) -> &Arc<dyn VolumeClient> {
        &self.client
    }

    pub(crate) fn vol(&self) -> RawVolume {
        self.vol
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("authority", &self.authority)
            .field("vol", &self.vol)
            .finish_non_exhaustive()
    }
}

/// Cache of established connections, one per distinct authority.
///
/// Lifecycle: entries are created lazily by [`resolve`](Self::resolve), are
/// never recreated while cached, and live until [`teardown`](Self::teardown).
pub struct ConnectionRegistry {
    client: Arc<dyn VolumeClient>,
    config: ConnectConfig,
    cache: Mutex<HashMap<Authority, Arc<Connection>>>,
}

impl std::fmt::Debug for ConnectionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionRegistry")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ConnectionRegistry {
    pub fn new(client: Arc<dyn VolumeClient>) -> Self {
        Self {
            client,
            config: ConnectConfig::default(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_config(client: Arc<dyn VolumeClient>, config: ConnectConfig) -> VfsResult<Self> {
        config.validate()?;
        Ok(Self {
            client,
            config,
            cache: Mutex::new(HashMap::new()),
        })
    }

    /// Return the cached connection for the authority, establishing it on
    /// first use.
    ///
    /// The cache lock is held across create-then-publish: racing first users
    /// block here and observe exactly one connection, and a partially
    /// initialized connection is never visible. A failed establishment
    /// publishes nothing.
    pub fn resolve(&self, authority: &Authority) -> VfsResult<Arc<Connection>> {
        let mut cache = self.cache.lock();
        if let Some(conn) = cache.get(authority) {
            return Ok(conn.clone());
        }
        let conn = Arc::new(Connection::establish(
            self.client.clone(),
            authority.clone(),
            &self.config,
        )?);
        cache.insert(authority.clone(), conn.clone());
        Ok(conn)
    }

    /// Non-creating lookup.
    pub fn lookup(&self, authority: &Authority) -> VfsResult<Arc<Connection>> {
        self.cache
            .lock()
            .get(authority)
            .cloned()
            .ok_or_else(|| VfsError::new(VfsErrorKind::VolumeNotFound, "registry.lookup"))
    }

    /// Release every cached connection, finalizing each native handle once.
    ///
    /// Callers must have dropped outstanding paths and streams first. All
    /// handles are finalized regardless of individual failures; the first
    /// failure is reported after the drain completes.
    pub fn teardown(&self) -> VfsResult<()> {
        let drained: Vec<(Authority, Arc<Connection>)> = self.cache.lock().drain().collect();
        let mut first_failure = None;
        for (authority, conn) in drained {
            debug!(authority = %authority, "releasing volume connection");
            if conn.client.fini(conn.vol) < 0 && first_failure.is_none() {
                first_failure = Some(VfsError::new(VfsErrorKind::Io, "registry.teardown.fini"));
            }
        }
        match first_failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.lock().is_empty()
    }
}
