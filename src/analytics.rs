//! Descriptive statistics, fuzzy search, ordering and binning over a loaded
//! [`Collection`]. Nothing here touches storage or the console.

use crate::movie::{Collection, Movie};
use rand::seq::IteratorRandom;
use rand::Rng;

/// Score given to a title that equals the query (ignoring case).
pub const EXACT_MATCH: u8 = 100;
/// Titles must score strictly above this to be suggested.
pub const SIMILARITY_THRESHOLD: u8 = 60;
pub const HISTOGRAM_BINS: usize = 10;

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogStats {
    pub count: usize,
    pub average: f64,
    pub median: f64,
    /// Every movie tied for the highest rating, in collection order.
    pub best: Vec<Movie>,
    /// Every movie tied for the lowest rating, in collection order.
    pub worst: Vec<Movie>,
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Middle value, or the average of the two middle values for an even count.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// `None` for an empty collection.
pub fn stats(movies: &Collection) -> Option<CatalogStats> {
    let ratings = movies.ratings();
    let average = mean(&ratings)?;
    let median = median(&ratings)?;

    let max = ratings.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = ratings.iter().copied().fold(f64::INFINITY, f64::min);

    let best = movies.iter().filter(|m| m.rating == max).cloned().collect();
    let worst = movies.iter().filter(|m| m.rating == min).cloned().collect();

    Some(CatalogStats {
        count: movies.len(),
        average,
        median,
        best,
        worst,
    })
}

pub fn random_movie<'a, R: Rng + ?Sized>(movies: &'a Collection, rng: &mut R) -> Option<&'a Movie> {
    movies.iter().choose(rng)
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Case-insensitive closeness of `query` to `title`, 0–100.
///
/// The Indel ratio, `2 * LCS / (len(query) + len(title))`, so a query that
/// is a large part of a longer title still scores well ("matrix" against
/// "The Matrix" is 75). Only identical strings (after lowercasing) score
/// [`EXACT_MATCH`]; near misses are capped at 99 so rounding can never fake
/// an exact hit.
pub fn similarity(query: &str, title: &str) -> u8 {
    let query = query.to_lowercase();
    let title = title.to_lowercase();
    if query == title {
        return EXACT_MATCH;
    }
    let score = (rapidfuzz::fuzz::ratio(query.chars(), title.chars()) * 100.0).round() as u8;
    score.min(EXACT_MATCH - 1)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchMatch<'a> {
    pub movie: &'a Movie,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<'a> {
    /// Titles equal to the query; nothing else is reported alongside them.
    Exact(Vec<&'a Movie>),
    /// Titles above the threshold, best score first.
    Similar(Vec<SearchMatch<'a>>),
    NotFound,
}

pub fn search<'a>(movies: &'a Collection, query: &str) -> SearchOutcome<'a> {
    let mut exact = Vec::new();
    let mut similar = Vec::new();

    for movie in movies {
        let score = similarity(query, &movie.title);
        if score == EXACT_MATCH {
            exact.push(movie);
        } else if score > SIMILARITY_THRESHOLD {
            similar.push(SearchMatch { movie, score });
        }
    }

    if !exact.is_empty() {
        SearchOutcome::Exact(exact)
    } else if !similar.is_empty() {
        similar.sort_by(|a, b| b.score.cmp(&a.score));
        SearchOutcome::Similar(similar)
    } else {
        SearchOutcome::NotFound
    }
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Highest rating first; equal ratings keep collection order.
pub fn sorted_by_rating(movies: &Collection) -> Vec<&Movie> {
    let mut sorted: Vec<&Movie> = movies.iter().collect();
    sorted.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    sorted
}

// ---------------------------------------------------------------------------
// Histogram bins
// ---------------------------------------------------------------------------

/// Counts of ratings in ten unit-wide bins over [0, 10]. The last bin is
/// closed, so a 10 lands in bin 9 alongside 9.x.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RatingHistogram {
    counts: [usize; HISTOGRAM_BINS],
}

impl RatingHistogram {
    /// Bin for `rating`, or `None` when it lies outside [0, 10].
    pub fn bin_index(rating: f64) -> Option<usize> {
        if !(0.0..=10.0).contains(&rating) {
            return None;
        }
        let width = 10.0 / HISTOGRAM_BINS as f64;
        Some(((rating / width) as usize).min(HISTOGRAM_BINS - 1))
    }

    pub fn from_ratings(ratings: &[f64]) -> Self {
        let mut histogram = RatingHistogram::default();
        for idx in ratings.iter().filter_map(|&r| Self::bin_index(r)) {
            histogram.counts[idx] += 1;
        }
        histogram
    }

    pub fn from_collection(movies: &Collection) -> Self {
        Self::from_ratings(&movies.ratings())
    }

    pub fn counts(&self) -> &[usize; HISTOGRAM_BINS] {
        &self.counts
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Lower and upper edge of bin `idx`.
    pub fn bin_edges(idx: usize) -> (f64, f64) {
        let width = 10.0 / HISTOGRAM_BINS as f64;
        (idx as f64 * width, (idx + 1) as f64 * width)
    }
}
