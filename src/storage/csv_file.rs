use super::{read_if_exists, Storage, StorageFormat};
use crate::error::Result;
use crate::movie::{Collection, Movie};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Collection stored as a CSV table with a `title,year,rating,poster` header.
/// Files written without the `poster` column are still readable.
#[derive(Debug, Clone)]
pub struct CsvStorage {
    path: PathBuf,
}

impl CsvStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvStorage { path: path.into() }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    title: String,
    year: i32,
    rating: f64,
    #[serde(default)]
    poster: Option<String>,
}

impl From<CsvRow> for Movie {
    fn from(row: CsvRow) -> Self {
        Movie {
            title: row.title,
            year: row.year,
            rating: row.rating,
            poster: row.poster.filter(|p| !p.is_empty()),
        }
    }
}

impl Storage for CsvStorage {
    fn path(&self) -> &Path {
        &self.path
    }

    fn format(&self) -> StorageFormat {
        StorageFormat::Csv
    }

    fn list(&self) -> Result<Collection> {
        let Some(contents) = read_if_exists(&self.path)? else {
            debug!(path = %self.path.display(), "no CSV file yet, starting empty");
            return Ok(Collection::new());
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(contents.as_bytes());

        let mut movies = Collection::new();
        for row in reader.deserialize::<CsvRow>() {
            movies.insert(row?.into());
        }
        debug!(count = movies.len(), path = %self.path.display(), "loaded CSV collection");
        Ok(movies)
    }

    fn save(&self, movies: &Collection) -> Result<()> {
        let mut writer = csv::Writer::from_writer(File::create(&self.path)?);
        // Serializing rows only emits a header once data arrives, and an
        // empty table still needs one.
        writer.write_record(["title", "year", "rating", "poster"])?;
        for movie in movies {
            let year = movie.year.to_string();
            let rating = movie.rating.to_string();
            writer.write_record([
                movie.title.as_str(),
                year.as_str(),
                rating.as_str(),
                movie.poster.as_deref().unwrap_or(""),
            ])?;
        }
        writer.flush()?;
        debug!(count = movies.len(), path = %self.path.display(), "wrote CSV collection");
        Ok(())
    }
}
