//! Input validation for the add/delete/update/search commands.
//!
//! Each parser takes one raw line as typed at a prompt and either accepts it
//! or returns the [`ValidationError`] to show before prompting again.

use crate::error::ValidationError;

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;
pub const MIN_YEAR: i32 = 1800;
pub const MAX_YEAR: i32 = 2100;

/// Typing this at a title or search prompt returns to the menu.
pub const CANCEL_KEYWORD: &str = "cancel";

/// A title prompt either yields a title or a request to go back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleInput {
    Title(String),
    Cancel,
}

fn is_cancel(input: &str) -> bool {
    input.eq_ignore_ascii_case(CANCEL_KEYWORD)
}

/// Title for add/update: trimmed and non-empty.
pub fn parse_title(input: &str) -> Result<TitleInput, ValidationError> {
    let title = input.trim();
    if is_cancel(title) {
        return Ok(TitleInput::Cancel);
    }
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(TitleInput::Title(title.to_string()))
}

/// Title for delete. Pure digits are rejected so a menu number typed at the
/// wrong prompt cannot delete anything.
pub fn parse_delete_title(input: &str) -> Result<TitleInput, ValidationError> {
    match parse_title(input)? {
        TitleInput::Title(title) if title.chars().all(|c| c.is_ascii_digit()) => {
            Err(ValidationError::NumericTitle)
        }
        other => Ok(other),
    }
}

/// Search text: non-empty after trimming; `cancel` goes back.
pub fn parse_query(input: &str) -> Result<TitleInput, ValidationError> {
    parse_title(input).map_err(|_| ValidationError::EmptyQuery)
}

pub fn validate_rating(rating: f64) -> Result<f64, ValidationError> {
    // NaN fails the range check as well.
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(rating)
    } else {
        Err(ValidationError::RatingOutOfRange(rating))
    }
}

pub fn validate_year(year: i32) -> Result<i32, ValidationError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(year)
    } else {
        Err(ValidationError::YearOutOfRange(year))
    }
}

pub fn parse_rating(input: &str) -> Result<f64, ValidationError> {
    let rating: f64 = input
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidNumber { field: "rating" })?;
    validate_rating(rating)
}

pub fn parse_year(input: &str) -> Result<i32, ValidationError> {
    let year: i32 = input
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidNumber { field: "year" })?;
    validate_year(year)
}
