//! Scripted console sessions driven through `MovieApp::run`.

use movie_catalog::config::AppConfig;
use movie_catalog::storage::{self, Storage, StorageFormat};
use movie_catalog::MovieApp;
use std::fs;
use std::io::Cursor;
use tempfile::TempDir;

struct Session {
    dir: TempDir,
    format: StorageFormat,
}

impl Session {
    fn new(format: StorageFormat) -> Self {
        colored::control::set_override(false);
        Session {
            dir: tempfile::tempdir().expect("tempdir"),
            format,
        }
    }

    fn data_path(&self) -> std::path::PathBuf {
        match self.format {
            StorageFormat::Json => self.dir.path().join("movies.json"),
            StorageFormat::Csv => self.dir.path().join("movies.csv"),
        }
    }

    fn storage(&self) -> Box<dyn Storage> {
        storage::open(self.format, &self.data_path()).expect("open storage")
    }

    fn seed(&self, movies: &[(&str, i32, f64)]) {
        let store = self.storage();
        for (title, year, rating) in movies {
            store.add(title, *year, *rating, None).expect("seed");
        }
    }

    async fn run_with(&self, settings: AppConfig, script: &str) -> String {
        let mut app = MovieApp::new(self.storage(), Cursor::new(script.as_bytes().to_vec()), Vec::new())
            .with_settings(settings);
        app.run().await.expect("session");
        String::from_utf8(app.into_output()).expect("utf8")
    }

    async fn run(&self, script: &str) -> String {
        self.run_with(AppConfig::default(), script).await
    }
}

#[tokio::test]
async fn test_menu_shown_first_and_exit_says_bye() {
    let session = Session::new(StorageFormat::Json);
    let out = session.run("0\n").await;
    assert!(out.contains("********** My Movies Database **********"));
    assert!(out.contains("10. Generate website"));
    assert!(out.contains("Enter choice (0-10): "));
    assert!(out.trim_end().ends_with("Bye!"));
}

#[tokio::test]
async fn test_end_of_input_terminates_cleanly() {
    let session = Session::new(StorageFormat::Json);
    let out = session.run("").await;
    assert!(out.trim_end().ends_with("Bye!"));
}

#[tokio::test]
async fn test_invalid_choices_redisplay_menu() {
    let session = Session::new(StorageFormat::Json);
    let out = session.run("abc\n42\n0\n").await;
    assert!(out.contains("Please enter a valid number."));
    assert!(out.contains("Invalid choice. Please enter a number between 0 and 10."));
    assert_eq!(out.matches("********** My Movies Database **********").count(), 3);
}

#[tokio::test]
async fn test_add_then_list() {
    let session = Session::new(StorageFormat::Json);
    let out = session.run("2\nHeat\n8.3\n1995\n1\n0\n").await;
    assert!(out.contains("'Heat' (1995) has been added with a rating of 8.3"));
    assert!(out.contains("\nMovie List:"));
    assert!(out.contains("Heat (1995): 8.3"));
}

#[tokio::test]
async fn test_add_reprompts_until_values_are_valid() {
    let session = Session::new(StorageFormat::Csv);
    let out = session.run("2\n\nHeat\nhigh\n1995\n8\n3000\n8\n1995\n0\n").await;
    assert!(out.contains("Title cannot be empty. Please try again."));
    assert!(out.contains("Please enter valid numbers for rating and year."));
    assert!(out.contains("Invalid rating or year. Please try again."));
    assert!(out.contains("'Heat' (1995) has been added with a rating of 8.0"));

    let stored = session.storage().list().unwrap();
    assert_eq!(stored.get("Heat").map(|m| m.rating), Some(8.0));
}

#[tokio::test]
async fn test_add_cancel_returns_to_menu() {
    let session = Session::new(StorageFormat::Json);
    let out = session.run("2\ncancel\n0\n").await;
    assert!(!out.contains("has been added"));
    assert!(session.storage().list().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_empty_database() {
    let session = Session::new(StorageFormat::Json);
    let out = session.run("1\n0\n").await;
    assert!(out.contains("No movies found in the database."));
}

#[tokio::test]
async fn test_delete_rejects_numeric_title_then_deletes() {
    let session = Session::new(StorageFormat::Json);
    session.seed(&[("Heat", 1995, 8.3), ("Alien", 1979, 8.5)]);
    let out = session.run("3\n42\nHeat\n0\n").await;
    assert!(out.contains("Invalid input: Title cannot be a number."));
    assert!(out.contains("'Heat' has been deleted from the movie list."));
    assert!(!session.storage().list().unwrap().contains("Heat"));
}

#[tokio::test]
async fn test_delete_missing_title() {
    let session = Session::new(StorageFormat::Csv);
    session.seed(&[("Heat", 1995, 8.3)]);
    let before = fs::read(session.data_path()).unwrap();
    let out = session.run("3\nRonin\n0\n").await;
    assert!(out.contains("Movie 'Ronin' doesn't exist in the list."));
    assert_eq!(fs::read(session.data_path()).unwrap(), before);
}

#[tokio::test]
async fn test_update_rating() {
    let session = Session::new(StorageFormat::Json);
    session.seed(&[("Heat", 1995, 8.3)]);
    let out = session.run("4\nHeat\n11\nten\n9.5\n0\n").await;
    assert!(out.contains("Rating must be between 0 and 10."));
    assert!(out.contains("Please enter a valid number for the rating."));
    assert!(out.contains("'Heat' has been updated with a new rating of 9.5"));
    assert_eq!(session.storage().list().unwrap().get("Heat").map(|m| m.rating), Some(9.5));
}

#[tokio::test]
async fn test_update_missing_title_aborts_command() {
    let session = Session::new(StorageFormat::Json);
    let out = session.run("4\nRonin\n0\n").await;
    assert!(out.contains("Movie 'Ronin' doesn't exist in the list."));
    assert!(!out.contains("Enter new movie rating"));
}

#[tokio::test]
async fn test_stats() {
    let session = Session::new(StorageFormat::Json);
    session.seed(&[("A", 2000, 8.5), ("B", 2001, 7.0)]);
    let out = session.run("5\n0\n").await;
    assert!(out.contains("Number of movies: 2"));
    assert!(out.contains("Average rating: 7.75"));
    assert!(out.contains("Median rating: 7.75"));
    let best = out.find("Best movie(s):").unwrap();
    let worst = out.find("Worst movie(s):").unwrap();
    let a = out.find("- A (2000): 8.5").unwrap();
    let b = out.find("- B (2001): 7.0").unwrap();
    assert!(best < a && a < worst && worst < b);
}

#[tokio::test]
async fn test_random_and_histogram_on_empty_database() {
    let session = Session::new(StorageFormat::Json);
    let out = session.run("6\n9\n0\n").await;
    assert_eq!(out.matches("The Database is empty.").count(), 2);
    assert!(!out.contains("Enter the filename"));
}

#[tokio::test]
async fn test_search_exact_similar_and_missing() {
    let session = Session::new(StorageFormat::Json);
    session.seed(&[("Alien", 1979, 8.5), ("Aliens", 1986, 8.4), ("Heat", 1995, 8.3)]);
    let out = session.run("7\nalien\n7\nalin\n7\nzzzzzz\n0\n").await;

    let exact = out.find("\nExact matches:").unwrap();
    assert!(out[exact..].contains("Alien: 8.5"));

    let similar = out.find("No exact matches found. Did you mean:").unwrap();
    assert!(similar > exact);
    assert!(out[similar..].contains("Alien: 8.5 (Similarity: "));

    assert!(out.contains("No movies found matching or similar to your search."));
}

#[tokio::test]
async fn test_search_part_of_title_suggests_it() {
    let session = Session::new(StorageFormat::Json);
    session.seed(&[("The Matrix", 1999, 8.7), ("Heat", 1995, 8.3)]);
    let out = session.run("7\nmatrix\n0\n").await;
    let similar = out.find("No exact matches found. Did you mean:").unwrap();
    assert!(out[similar..].contains("The Matrix: 8.7 (Similarity: 75%)"));
    assert!(!out[similar..].contains("Heat: 8.3"));
}

#[tokio::test]
async fn test_search_empty_query_reprompts() {
    let session = Session::new(StorageFormat::Json);
    let out = session.run("7\n\ncancel\n0\n").await;
    assert!(out.contains("Input cannot be empty. Please try again."));
}

#[tokio::test]
async fn test_sorted_by_rating() {
    let session = Session::new(StorageFormat::Csv);
    session.seed(&[("B", 2001, 7.0), ("A", 2000, 8.5), ("C", 2002, 7.0)]);
    let out = session.run("8\n0\n").await;
    let header = out.find("Movies sorted by rating (highest to lowest):").unwrap();
    let listing = &out[header..];
    let a = listing.find("A: 8.5").unwrap();
    let b = listing.find("B: 7.0").unwrap();
    let c = listing.find("C: 7.0").unwrap();
    assert!(a < b && b < c);
}

#[tokio::test]
async fn test_histogram_written_to_chosen_file() {
    let session = Session::new(StorageFormat::Json);
    session.seed(&[("A", 2000, 8.5), ("B", 2001, 7.0)]);
    let target = session.dir.path().join("ratings.svg");
    let script = format!("9\n{}\n0\n", target.display());
    let out = session.run(&script).await;
    assert!(out.contains(&format!("Histogram saved as {}", target.display())));
    assert!(fs::read_to_string(&target).unwrap().contains("<svg"));
}

#[tokio::test]
async fn test_website_generation() {
    let session = Session::new(StorageFormat::Json);
    session.seed(&[("Heat", 1995, 8.3)]);
    let site = session.dir.path().join("site.html");
    let settings = AppConfig {
        website_path: site.clone(),
        ..AppConfig::default()
    };
    let out = session.run_with(settings, "10\n0\n").await;
    assert!(out.contains("Website generated as"));
    assert!(fs::read_to_string(&site).unwrap().contains("<h2>Heat</h2>"));
}

#[tokio::test]
async fn test_confirm_continue_declined_stops_loop() {
    let session = Session::new(StorageFormat::Json);
    let settings = AppConfig {
        confirm_continue: true,
        ..AppConfig::default()
    };
    let out = session.run_with(settings, "1\nn\n1\n").await;
    assert!(out.contains("Do you want to continue? (y/n): "));
    assert_eq!(out.matches("No movies found in the database.").count(), 1);
    assert!(out.trim_end().ends_with("Bye!"));
}

#[tokio::test]
async fn test_confirm_continue_accepted_keeps_looping() {
    let session = Session::new(StorageFormat::Json);
    let settings = AppConfig {
        confirm_continue: true,
        ..AppConfig::default()
    };
    let out = session.run_with(settings, "1\ny\n1\nn\n").await;
    assert_eq!(out.matches("No movies found in the database.").count(), 2);
}

#[tokio::test]
async fn test_corrupt_file_reported_and_menu_continues() {
    let session = Session::new(StorageFormat::Json);
    fs::write(session.data_path(), "{ broken").unwrap();
    let out = session.run("1\n0\n").await;
    assert!(out.contains("JSON format error"));
    assert!(out.trim_end().ends_with("Bye!"));
    assert!(session.data_path().exists());
}
