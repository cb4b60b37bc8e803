//! A personal movie catalog: a menu-driven console program over a single
//! JSON or CSV file, with statistics, fuzzy search, a ratings histogram,
//! optional OMDb lookups and a static website export.

pub mod analytics;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod histogram;
pub mod menu;
pub mod movie;
pub mod omdb;
pub mod operations;
pub mod storage;
pub mod website;

pub use app::MovieApp;
pub use error::{CatalogError, Result, ValidationError};
pub use movie::{Collection, Movie};
pub use storage::{Storage, StorageFormat};
