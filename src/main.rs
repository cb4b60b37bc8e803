use clap::Parser;
use movie_catalog::cli::{log_directive, Args};
use movie_catalog::config::Config;
use movie_catalog::{storage, MovieApp};
use std::io;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_directive(args.verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut config = Config::load(args.config.as_deref())?;
    config.apply_env();
    config.apply_args(&args);

    if !config.app.color {
        colored::control::set_override(false);
    }

    let format = config.storage_format();
    debug!(path = %config.storage.path.display(), %format, "opening storage");
    let storage = storage::open(format, &config.storage.path)?;
    let omdb = config.omdb_client()?;

    let stdin = io::stdin();
    let mut app = MovieApp::new(storage, stdin.lock(), io::stdout())
        .with_omdb(omdb)
        .with_settings(config.app);
    app.run().await?;

    Ok(())
}
