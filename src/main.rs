use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use movie_enrichment::ingestion::InputPaths;
use movie_enrichment::observability::LogObserver;
use movie_enrichment::{run_pipeline, GenreSource, PipelineOptions};

mod logging;

/// Enrich a movie table and validate the result against a reference document.
#[derive(Debug, Parser)]
#[command(name = "movie-enrichment", version, about)]
struct Cli {
    /// Tabular movie data (CSV with headers).
    #[arg(long, env = "MOVIE_ENRICHMENT_MOVIES", default_value = "movies.csv")]
    movies: PathBuf,

    /// Genre auxiliary document.
    #[arg(long, env = "MOVIE_ENRICHMENT_GENRES", default_value = "genre.json")]
    genres: PathBuf,

    /// Writer auxiliary document (valid writer ids).
    #[arg(long, env = "MOVIE_ENRICHMENT_WRITERS", default_value = "writters.json")]
    writers: PathBuf,

    /// Reference output document.
    #[arg(long, env = "MOVIE_ENRICHMENT_REFERENCE", default_value = "desired_output.json")]
    reference: PathBuf,

    /// Output document (overwritten).
    #[arg(short, long, env = "MOVIE_ENRICHMENT_OUTPUT", default_value = "output_refined.json")]
    output: PathBuf,

    /// Where extra genres come from: `reference` or `genre-file`.
    #[arg(long, default_value = "reference")]
    genre_source: GenreSource,

    /// Write non-ASCII characters as UTF-8 instead of `\uXXXX` escapes.
    #[arg(long)]
    no_ascii_escape: bool,

    /// Increase log verbosity (repeatable).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let min_severity = logging::setup_logging(cli.verbose, cli.quiet);

    let options = PipelineOptions {
        inputs: InputPaths {
            movies: cli.movies,
            genres: cli.genres,
            writers: cli.writers,
            reference: cli.reference,
        },
        output_path: cli.output,
        genre_source: cli.genre_source,
        ascii_only: !cli.no_ascii_escape,
        observer: Some(Arc::new(LogObserver::with_min_severity(min_severity))),
    };
    log::debug!("{options:?}");

    match run_pipeline(&options) {
        Ok(report) => {
            log::debug!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Run aborted: {e}");
            ExitCode::FAILURE
        }
    }
}
