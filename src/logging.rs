use movie_enrichment::observability::PipelineSeverity;

/// Install `env_logger` with a level derived from `-v`/`-q`; `RUST_LOG` overrides it.
///
/// Returns the lowest pipeline severity worth reporting at that level.
pub fn setup_logging(verbose: u8, quiet: bool) -> PipelineSeverity {
    let (filter, min_severity) = match (quiet, verbose) {
        (true, _) => (log::LevelFilter::Warn, PipelineSeverity::Warning),
        (false, 0) => (log::LevelFilter::Info, PipelineSeverity::Info),
        (false, 1) => (log::LevelFilter::Debug, PipelineSeverity::Info),
        (false, _) => (log::LevelFilter::Trace, PipelineSeverity::Info),
    };

    let mut builder = env_logger::Builder::new();

    builder.filter(None, filter);

    if let Ok(rust_log) = std::env::var("RUST_LOG") {
        builder.parse_filters(&rust_log);
    }

    builder.init();

    min_severity
}
