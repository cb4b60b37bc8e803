//! Movie records and the ordered, title-keyed collection they live in.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ---------------------------------------------------------------------------
// Movie
// ---------------------------------------------------------------------------

/// One movie's title/year/rating/poster tuple.
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub title: String,
    pub year: i32,
    pub rating: f64,
    pub poster: Option<String>,
}

impl Movie {
    pub fn new(title: impl Into<String>, year: i32, rating: f64) -> Self {
        Movie {
            title: title.into(),
            year,
            rating,
            poster: None,
        }
    }

    pub fn with_poster(mut self, poster: impl Into<String>) -> Self {
        self.poster = Some(poster.into());
        self
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.title, self.year, format_rating(self.rating))
    }
}

/// Format a rating the way the catalog prints it everywhere: whole numbers
/// keep one decimal place (`9.0`), everything else prints as-is (`8.75`).
pub fn format_rating(rating: f64) -> String {
    if rating.fract() == 0.0 && rating.is_finite() {
        format!("{:.1}", rating)
    } else {
        format!("{}", rating)
    }
}

/// The value half of a persisted JSON entry (the title is the key).
#[derive(Debug, Serialize, Deserialize)]
struct MovieDetails {
    year: i32,
    rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    poster: Option<String>,
}

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// Movies keyed by title, iterated in insertion (file) order.
///
/// Inserting a title that is already present replaces the record in place, so
/// an overwrite never moves a movie to the end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    movies: Vec<Movie>,
}

impl Collection {
    pub fn new() -> Self {
        Collection::default()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Movie> {
        self.movies.iter()
    }

    pub fn get(&self, title: &str) -> Option<&Movie> {
        self.movies.iter().find(|m| m.title == title)
    }

    pub fn get_mut(&mut self, title: &str) -> Option<&mut Movie> {
        self.movies.iter_mut().find(|m| m.title == title)
    }

    pub fn contains(&self, title: &str) -> bool {
        self.get(title).is_some()
    }

    /// Insert or overwrite; returns the previous record for the title.
    pub fn insert(&mut self, movie: Movie) -> Option<Movie> {
        match self.get_mut(&movie.title) {
            Some(existing) => Some(std::mem::replace(existing, movie)),
            None => {
                self.movies.push(movie);
                None
            }
        }
    }

    pub fn remove(&mut self, title: &str) -> Option<Movie> {
        let idx = self.movies.iter().position(|m| m.title == title)?;
        Some(self.movies.remove(idx))
    }

    /// All ratings in collection order.
    pub fn ratings(&self) -> Vec<f64> {
        self.movies.iter().map(|m| m.rating).collect()
    }
}

impl FromIterator<Movie> for Collection {
    fn from_iter<I: IntoIterator<Item = Movie>>(iter: I) -> Self {
        let mut collection = Collection::new();
        for movie in iter {
            collection.insert(movie);
        }
        collection
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Movie;
    type IntoIter = std::slice::Iter<'a, Movie>;

    fn into_iter(self) -> Self::IntoIter {
        self.movies.iter()
    }
}

impl IntoIterator for Collection {
    type Item = Movie;
    type IntoIter = std::vec::IntoIter<Movie>;

    fn into_iter(self) -> Self::IntoIter {
        self.movies.into_iter()
    }
}

// -- JSON shape: { "<title>": { "year": .., "rating": .., "poster": .. } } --

impl Serialize for Collection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.movies.len()))?;
        for movie in &self.movies {
            let details = MovieDetails {
                year: movie.year,
                rating: movie.rating,
                poster: movie.poster.clone(),
            };
            map.serialize_entry(&movie.title, &details)?;
        }
        map.end()
    }
}

struct CollectionVisitor;

impl<'de> Visitor<'de> for CollectionVisitor {
    type Value = Collection;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of movie titles to {year, rating, poster} records")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Collection, A::Error> {
        let mut collection = Collection::new();
        while let Some((title, details)) = access.next_entry::<String, MovieDetails>()? {
            collection.insert(Movie {
                title,
                year: details.year,
                rating: details.rating,
                poster: details.poster,
            });
        }
        Ok(collection)
    }
}

impl<'de> Deserialize<'de> for Collection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CollectionVisitor)
    }
}
