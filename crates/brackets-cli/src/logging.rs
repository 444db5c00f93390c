//! Log output setup.

use std::io;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    Layer, Registry, filter::Targets, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Log line format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// One terse line per event (default).
    #[default]
    Compact,
    /// Multi-line, human readable.
    Pretty,
    /// Newline-delimited JSON.
    Json,
}

/// Map the `-v` count to a level. Warnings are always shown.
pub const fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global subscriber, writing to stderr.
pub fn init(verbosity: u8, format: LogFormat) {
    let level = level_for(verbosity);
    let targets = Targets::new()
        .with_default(LevelFilter::WARN)
        .with_target("brackets_core", level)
        .with_target("brackets", level);

    let layer = create_format_layer(format, io::stderr).with_filter(targets);
    tracing_subscriber::registry().with(layer).init();
}

fn create_format_layer<W, F>(format: LogFormat, make_writer: F) -> impl Layer<Registry>
where
    W: io::Write + Send + Sync + 'static,
    F: Fn() -> W + Send + Sync + 'static,
{
    match format {
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(false)
            .without_time()
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_target(true)
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_writer(make_writer)
            .boxed(),
    }
}
