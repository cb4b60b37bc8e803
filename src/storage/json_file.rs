use super::{read_if_exists, Storage, StorageFormat};
use crate::error::Result;
use crate::movie::Collection;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Collection stored as one JSON object keyed by title:
///
/// ```json
/// {
///     "Heat": {
///         "year": 1995,
///         "rating": 8.3
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonStorage { path: path.into() }
    }
}

/// Pretty-print with four-space indentation.
fn to_json(movies: &Collection) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    movies.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

impl Storage for JsonStorage {
    fn path(&self) -> &Path {
        &self.path
    }

    fn format(&self) -> StorageFormat {
        StorageFormat::Json
    }

    fn list(&self) -> Result<Collection> {
        let Some(contents) = read_if_exists(&self.path)? else {
            debug!(path = %self.path.display(), "no JSON file yet, starting empty");
            return Ok(Collection::new());
        };
        let movies: Collection = serde_json::from_str(&contents)?;
        debug!(count = movies.len(), path = %self.path.display(), "loaded JSON collection");
        Ok(movies)
    }

    fn save(&self, movies: &Collection) -> Result<()> {
        fs::write(&self.path, to_json(movies)?)?;
        debug!(count = movies.len(), path = %self.path.display(), "wrote JSON collection");
        Ok(())
    }
}
