//! The interactive menu loop and one handler per menu entry.

use crate::analytics::{self, RatingHistogram, SearchOutcome};
use crate::config::AppConfig;
use crate::error::{CatalogError, Result, ValidationError};
use crate::histogram;
use crate::menu::{choice_prompt, render_menu, MenuChoice};
use crate::movie::{format_rating, Movie};
use crate::omdb::OmdbClient;
use crate::operations::{self, TitleInput};
use crate::storage::Storage;
use crate::website;
use colored::*;
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::{debug, error, warn};

pub const DEFAULT_HISTOGRAM_FILE: &str = "histogram.png";
const EMPTY_DATABASE: &str = "The Database is empty.";

/// A catalog session over any line-oriented input and output.
///
/// `main` wires this to locked stdin/stdout; tests drive it with a
/// `Cursor` and a `Vec<u8>`.
pub struct MovieApp<R, W> {
    storage: Box<dyn Storage>,
    omdb: Option<OmdbClient>,
    settings: AppConfig,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> MovieApp<R, W> {
    pub fn new(storage: Box<dyn Storage>, input: R, output: W) -> Self {
        MovieApp {
            storage,
            omdb: None,
            settings: AppConfig::default(),
            input,
            output,
        }
    }

    pub fn with_omdb(mut self, client: Option<OmdbClient>) -> Self {
        self.omdb = client;
        self
    }

    pub fn with_settings(mut self, settings: AppConfig) -> Self {
        self.settings = settings;
        self
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    pub fn into_output(self) -> W {
        self.output
    }

    // -- Console helpers -----------------------------------------------------

    fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    fn fail(&mut self, text: impl Display) -> Result<()> {
        self.say(text.to_string().red())
    }

    /// Print `text` and read one line, without its line ending.
    fn prompt(&mut self, text: &str) -> Result<String> {
        write!(self.output, "{}", text.green())?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(CatalogError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Prompt until `parse` accepts the line, printing each rejection.
    fn prompt_until<T>(
        &mut self,
        text: &str,
        parse: impl Fn(&str) -> std::result::Result<T, ValidationError>,
    ) -> Result<T> {
        loop {
            let line = self.prompt(text)?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(e) => self.fail(e)?,
            }
        }
    }

    // -- Loop ----------------------------------------------------------------

    /// Show the menu and dispatch choices until the user exits, declines to
    /// continue, or input ends.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            write!(self.output, "\n{}", render_menu())?;
            let line = match self.prompt(&choice_prompt()) {
                Ok(line) => line,
                Err(CatalogError::InputClosed) => break,
                Err(e) => return Err(e),
            };

            let choice = match MenuChoice::parse(&line) {
                Ok(choice) => choice,
                Err(e) => {
                    self.fail(e)?;
                    continue;
                }
            };
            if choice == MenuChoice::Exit {
                break;
            }

            debug!(choice = choice.label(), "dispatching menu choice");
            match self.dispatch(choice).await {
                Ok(()) => {}
                Err(CatalogError::InputClosed) => break,
                Err(e) => {
                    error!(choice = choice.label(), error = %e, "command failed");
                    self.fail(e)?;
                }
            }

            if self.settings.confirm_continue {
                match self.prompt("Do you want to continue? (y/n): ") {
                    Ok(answer) if answer.trim().eq_ignore_ascii_case("y") => {}
                    Ok(_) | Err(CatalogError::InputClosed) => break,
                    Err(e) => return Err(e),
                }
            }
        }
        self.say("Bye!")
    }

    pub async fn dispatch(&mut self, choice: MenuChoice) -> Result<()> {
        match choice {
            MenuChoice::Exit => Ok(()),
            MenuChoice::List => self.list_movies(),
            MenuChoice::Add => self.add_movie().await,
            MenuChoice::Delete => self.delete_movie(),
            MenuChoice::Update => self.update_movie(),
            MenuChoice::Stats => self.show_stats(),
            MenuChoice::Random => self.random_movie(),
            MenuChoice::Search => self.search_movie(),
            MenuChoice::SortedByRating => self.sorted_by_rating(),
            MenuChoice::Histogram => self.create_histogram(),
            MenuChoice::Website => self.generate_website(),
        }
    }

    // -- Commands ------------------------------------------------------------

    fn list_movies(&mut self) -> Result<()> {
        let movies = self.storage.list()?;
        if movies.is_empty() {
            return self.fail("No movies found in the database.");
        }
        self.say("\nMovie List:")?;
        for movie in &movies {
            self.say(movie)?;
        }
        Ok(())
    }

    async fn add_movie(&mut self) -> Result<()> {
        let title = match self.prompt_until(
            "Enter new movie title (or type 'cancel' to go back): ",
            operations::parse_title,
        )? {
            TitleInput::Title(title) => title,
            TitleInput::Cancel => return Ok(()),
        };

        let movie = match self.omdb.as_ref() {
            Some(client) => match client.fetch(&title).await {
                Ok(movie) => movie,
                Err(e) => {
                    warn!(title = %title, error = %e, "lookup failed");
                    return self.fail("Movie could not be found.");
                }
            },
            None => self.prompt_rating_and_year(title)?,
        };

        self.storage
            .add(&movie.title, movie.year, movie.rating, movie.poster.as_deref())?;
        self.say(format!(
            "'{}' ({}) has been added with a rating of {}",
            movie.title,
            movie.year,
            format_rating(movie.rating)
        ))
    }

    fn prompt_rating_and_year(&mut self, title: String) -> Result<Movie> {
        loop {
            let rating = self.prompt("Enter movie rating (0-10): ")?;
            let year = self.prompt("Enter release year (1800-2100): ")?;
            match (operations::parse_rating(&rating), operations::parse_year(&year)) {
                (Ok(rating), Ok(year)) => return Ok(Movie::new(title, year, rating)),
                (Err(ValidationError::InvalidNumber { .. }), _)
                | (_, Err(ValidationError::InvalidNumber { .. })) => {
                    self.fail("Please enter valid numbers for rating and year.")?
                }
                _ => self.fail("Invalid rating or year. Please try again.")?,
            }
        }
    }

    fn delete_movie(&mut self) -> Result<()> {
        let title = match self.prompt_until(
            "Enter movie name to delete (or type 'cancel' to go back): ",
            operations::parse_delete_title,
        )? {
            TitleInput::Title(title) => title,
            TitleInput::Cancel => return Ok(()),
        };

        if self.storage.delete(&title)? {
            self.say(format!("'{}' has been deleted from the movie list.", title))
        } else {
            self.fail(CatalogError::NotFound(title))
        }
    }

    fn update_movie(&mut self) -> Result<()> {
        let title = match self.prompt_until(
            "Enter movie title to update (or type 'cancel' to go back): ",
            operations::parse_title,
        )? {
            TitleInput::Title(title) => title,
            TitleInput::Cancel => return Ok(()),
        };

        if !self.storage.list()?.contains(&title) {
            return self.fail(CatalogError::NotFound(title));
        }

        let rating = self.prompt_until("Enter new movie rating (0-10): ", operations::parse_rating)?;
        if self.storage.update(&title, rating)? {
            self.say(format!(
                "'{}' has been updated with a new rating of {}",
                title,
                format_rating(rating)
            ))
        } else {
            self.fail(CatalogError::NotFound(title))
        }
    }

    fn show_stats(&mut self) -> Result<()> {
        let movies = self.storage.list()?;
        let Some(stats) = analytics::stats(&movies) else {
            return self.say(EMPTY_DATABASE);
        };

        self.say(format!("Number of movies: {}", stats.count))?;
        self.say(format!("Average rating: {:.2}", stats.average))?;
        self.say(format!("Median rating: {:.2}", stats.median))?;
        self.say("\nBest movie(s):".yellow())?;
        for movie in &stats.best {
            self.say(format!("- {}", movie))?;
        }
        self.say("\nWorst movie(s):".yellow())?;
        for movie in &stats.worst {
            self.say(format!("- {}", movie))?;
        }
        Ok(())
    }

    fn random_movie(&mut self) -> Result<()> {
        let movies = self.storage.list()?;
        let picked = analytics::random_movie(&movies, &mut rand::thread_rng())
            .map(|m| format!("Random movie: {}, Rating: {}", m.title, format_rating(m.rating)));
        match picked {
            Some(line) => self.say(line),
            None => self.say(EMPTY_DATABASE),
        }
    }

    fn search_movie(&mut self) -> Result<()> {
        let query = match self.prompt_until(
            "Enter part of the movie name (or type 'cancel' to go back): ",
            operations::parse_query,
        )? {
            TitleInput::Title(query) => query,
            TitleInput::Cancel => return Ok(()),
        };

        let movies = self.storage.list()?;
        let lines: Vec<String> = match analytics::search(&movies, &query) {
            SearchOutcome::Exact(found) => {
                self.say("\nExact matches:".yellow())?;
                found
                    .iter()
                    .map(|m| format!("{}: {}", m.title, format_rating(m.rating)))
                    .collect()
            }
            SearchOutcome::Similar(matches) => {
                self.say("\nNo exact matches found. Did you mean:".yellow())?;
                matches
                    .iter()
                    .map(|hit| {
                        format!(
                            "{}: {} (Similarity: {}%)",
                            hit.movie.title,
                            format_rating(hit.movie.rating),
                            hit.score
                        )
                    })
                    .collect()
            }
            SearchOutcome::NotFound => {
                return self.fail("No movies found matching or similar to your search.");
            }
        };
        for line in lines {
            self.say(line)?;
        }
        Ok(())
    }

    fn sorted_by_rating(&mut self) -> Result<()> {
        let movies = self.storage.list()?;
        self.say("Movies sorted by rating (highest to lowest):")?;
        for movie in analytics::sorted_by_rating(&movies) {
            self.say(format!("{}: {}", movie.title, format_rating(movie.rating)))?;
        }
        Ok(())
    }

    fn create_histogram(&mut self) -> Result<()> {
        let movies = self.storage.list()?;
        if movies.is_empty() {
            return self.say(EMPTY_DATABASE);
        }

        let answer = self.prompt("Enter the filename to save the histogram (e.g., histogram.png): ")?;
        let filename = match answer.trim() {
            "" => DEFAULT_HISTOGRAM_FILE,
            name => name,
        }
        .to_string();

        histogram::save_histogram(&RatingHistogram::from_collection(&movies), Path::new(&filename))?;
        self.say(format!("Histogram saved as {}", filename))
    }

    fn generate_website(&mut self) -> Result<()> {
        let movies = self.storage.list()?;
        let path = self.settings.website_path.clone();
        website::write_website(&movies, &path)?;
        self.say(format!("Website generated as '{}'", path.display()).green())
    }
}
