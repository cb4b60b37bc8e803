//! Flat-file persistence for the movie collection.
//!
//! Every backend materializes the whole collection on [`Storage::list`] and
//! rewrites the whole file on [`Storage::save`]. The mutating operations are
//! provided on the trait as read → merge → rewrite sequences, so a backend
//! only decides how a [`Collection`] maps to bytes.
//!
//! There is no locking: two processes mutating the same file concurrently
//! will lose updates.

pub mod csv_file;
pub mod json_file;

pub use csv_file::CsvStorage;
pub use json_file::JsonStorage;

use crate::error::Result;
use crate::movie::{Collection, Movie};
use clap::ValueEnum;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

// ---------------------------------------------------------------------------
// Format selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, ValueEnum, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageFormat {
    Json,
    Csv,
}

impl StorageFormat {
    /// `.csv` files (any case) use the CSV backend; everything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => StorageFormat::Csv,
            _ => StorageFormat::Json,
        }
    }
}

impl std::fmt::Display for StorageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageFormat::Json => write!(f, "json"),
            StorageFormat::Csv => write!(f, "csv"),
        }
    }
}

// ---------------------------------------------------------------------------
// Storage capability
// ---------------------------------------------------------------------------

pub trait Storage {
    /// The backing file.
    fn path(&self) -> &Path;

    fn format(&self) -> StorageFormat;

    /// Load every record. A missing file is an empty collection; a file that
    /// exists but does not parse is an error.
    fn list(&self) -> Result<Collection>;

    /// Replace the file contents with `movies`.
    fn save(&self, movies: &Collection) -> Result<()>;

    /// Insert `title`, or overwrite its record if it already exists.
    fn add(&self, title: &str, year: i32, rating: f64, poster: Option<&str>) -> Result<()> {
        let mut movies = self.list()?;
        let previous = movies.insert(Movie {
            title: title.to_string(),
            year,
            rating,
            poster: poster.map(str::to_string),
        });
        debug!(
            title,
            overwritten = previous.is_some(),
            path = %self.path().display(),
            "storing movie"
        );
        self.save(&movies)
    }

    /// Remove `title`. Returns `false` without touching the file when absent.
    fn delete(&self, title: &str) -> Result<bool> {
        let mut movies = self.list()?;
        if movies.remove(title).is_none() {
            debug!(title, "delete skipped, title not stored");
            return Ok(false);
        }
        self.save(&movies)?;
        Ok(true)
    }

    /// Set the rating of `title`. Returns `false` without touching the file
    /// when absent.
    fn update(&self, title: &str, rating: f64) -> Result<bool> {
        let mut movies = self.list()?;
        match movies.get_mut(title) {
            Some(movie) => movie.rating = rating,
            None => {
                debug!(title, "update skipped, title not stored");
                return Ok(false);
            }
        }
        self.save(&movies)?;
        Ok(true)
    }
}

/// Build the backend for `format` over `path`, creating the parent directory
/// if it does not exist yet.
pub fn open(format: StorageFormat, path: &Path) -> Result<Box<dyn Storage>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!(dir = %parent.display(), "creating data directory");
            fs::create_dir_all(parent)?;
        }
    }

    let storage: Box<dyn Storage> = match format {
        StorageFormat::Json => Box::new(JsonStorage::new(path)),
        StorageFormat::Csv => Box::new(CsvStorage::new(path)),
    };
    Ok(storage)
}

/// Read the whole file, mapping "not found" to `None`.
pub(crate) fn read_if_exists(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
