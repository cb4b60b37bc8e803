use crate::storage::StorageFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "movie-catalog")]
#[command(version)]
#[command(about = "A menu-driven personal movie catalog stored in a JSON or CSV file")]
pub struct Args {
    /// Storage file holding the collection
    #[arg(long, short)]
    pub storage: Option<PathBuf>,

    /// Storage format (json, csv); inferred from the file extension if omitted
    #[arg(long, value_enum)]
    pub format: Option<StorageFormat>,

    /// TOML config file (defaults to ./movie_catalog.toml when present)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// OMDb API key used to prefill movies when adding them
    #[arg(long)]
    pub omdb_key: Option<String>,

    /// Never contact OMDb; always enter rating and year by hand
    #[arg(long)]
    pub offline: bool,

    /// Ask "Do you want to continue?" after every command
    #[arg(long)]
    pub confirm_continue: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Output path for the generated website
    #[arg(long)]
    pub website: Option<PathBuf>,

    /// Debug logging on stderr (RUST_LOG still takes precedence)
    #[arg(long, short)]
    pub verbose: bool,
}

/// Default tracing directive when RUST_LOG is unset.
pub fn log_directive(verbose: bool) -> &'static str {
    if verbose {
        "movie_catalog=debug"
    } else {
        "warn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse_minimal() {
        let args = Args::parse_from(["movie-catalog"]);
        assert!(args.storage.is_none());
        assert!(args.format.is_none());
        assert!(args.config.is_none());
        assert!(args.omdb_key.is_none());
        assert!(!args.offline);
        assert!(!args.confirm_continue);
        assert!(!args.no_color);
        assert!(args.website.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn test_args_parse_full() {
        let args = Args::parse_from([
            "movie-catalog",
            "--storage",
            "data/movies.csv",
            "--format",
            "csv",
            "--config",
            "cfg.toml",
            "--omdb-key",
            "abc123",
            "--offline",
            "--confirm-continue",
            "--no-color",
            "--website",
            "site.html",
            "--verbose",
        ]);
        assert_eq!(args.storage, Some(PathBuf::from("data/movies.csv")));
        assert_eq!(args.format, Some(StorageFormat::Csv));
        assert_eq!(args.config, Some(PathBuf::from("cfg.toml")));
        assert_eq!(args.omdb_key.as_deref(), Some("abc123"));
        assert!(args.offline);
        assert!(args.confirm_continue);
        assert!(args.no_color);
        assert_eq!(args.website, Some(PathBuf::from("site.html")));
        assert!(args.verbose);
    }

    #[test]
    fn test_args_short_flags() {
        let args = Args::parse_from(["movie-catalog", "-s", "m.json", "-c", "c.toml", "-v"]);
        assert_eq!(args.storage, Some(PathBuf::from("m.json")));
        assert_eq!(args.config, Some(PathBuf::from("c.toml")));
        assert!(args.verbose);
    }

    #[test]
    fn test_args_format_json() {
        let args = Args::parse_from(["movie-catalog", "--format", "json"]);
        assert_eq!(args.format, Some(StorageFormat::Json));
    }

    #[test]
    fn test_args_reject_unknown_format() {
        assert!(Args::try_parse_from(["movie-catalog", "--format", "xml"]).is_err());
    }

    #[test]
    fn test_log_directive() {
        assert_eq!(log_directive(false), "warn");
        assert_eq!(log_directive(true), "movie_catalog=debug");
    }
}
