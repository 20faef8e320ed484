//! Volume-scoped paths.

use std::fmt;
use std::sync::Arc;

use crate::connection::Connection;

/// Segment separator in rendered path strings.
pub const SEPARATOR: char = '/';

const HIDDEN_MARKER: char = '.';

/// A path bound to a resolved connection.
///
/// Equality is structural: same connection identity, same segments, same
/// absoluteness. Whether anything exists at the path plays no part.
#[derive(Clone)]
pub struct VolumePath {
    conn: Arc<Connection>,
    parts: Vec<String>,
    absolute: bool,
}

impl VolumePath {
    /// Bind a path string to a resolved connection. Empty segments collapse,
    /// so `"/foo//bar/"` and `"/foo/bar"` are the same path.
    pub fn new(conn: Arc<Connection>, raw: &str) -> Self {
        let absolute = raw.starts_with(SEPARATOR);
        let parts = raw
            .split(SEPARATOR)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect();
        Self {
            conn,
            parts,
            absolute,
        }
    }

    pub fn connection(&self) -> &Arc<Connection> {
        &self.conn
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    pub fn file_name(&self) -> Option<&str> {
        self.parts.last().map(String::as_str)
    }

    /// Final segment starts with the hidden-file marker.
    pub fn has_hidden_name(&self) -> bool {
        self.file_name()
            .is_some_and(|name| name.starts_with(HIDDEN_MARKER))
    }

    /// Render the path component the native calls consume.
    pub fn path_string(&self) -> String {
        let joined = self.parts.join("/");
        if self.absolute {
            format!("/{joined}")
        } else {
            joined
        }
    }

    /// Resolve a child name against this path.
    pub fn child(&self, name: &str) -> VolumePath {
        let mut parts = self.parts.clone();
        parts.push(name.to_string());
        Self {
            conn: self.conn.clone(),
            parts,
            absolute: self.absolute,
        }
    }
}

impl PartialEq for VolumePath {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.conn, &other.conn)
            && self.absolute == other.absolute
            && self.parts == other.parts
    }
}

impl Eq for VolumePath {}

impl fmt::Display for VolumePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path_string())
    }
}

impl fmt::Debug for VolumePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VolumePath")
            .field("authority", self.conn.authority())
            .field("path", &self.path_string())
            .finish()
    }
}
