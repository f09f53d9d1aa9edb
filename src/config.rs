//! Logging setup

use tracing::log::LevelFilter;

/// Dependency log targets and the level each is capped at, as
/// `(target, with --debug, without --debug)`.
const MODULE_CAPS: [(&str, LevelFilter, LevelFilter); 5] = [
    ("tracing", LevelFilter::Debug, LevelFilter::Warn),
    ("reqwest", LevelFilter::Debug, LevelFilter::Info),
    ("rustls", LevelFilter::Info, LevelFilter::Info),
    ("hyper_util", LevelFilter::Info, LevelFilter::Info),
    ("h2", LevelFilter::Info, LevelFilter::Info),
];

/// Level for everything not listed in the module caps.
pub fn log_level(debug: bool) -> LevelFilter {
    if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

fn module_caps(debug: bool) -> impl Iterator<Item = (&'static str, LevelFilter)> {
    MODULE_CAPS
        .into_iter()
        .map(move |(target, with_debug, without)| (target, if debug { with_debug } else { without }))
}

/// Sets up logging based on the debug flag
pub fn setup_logging(debug: bool) -> Result<(), Box<std::io::Error>> {
    let logger = module_caps(debug).fold(
        simple_logger::SimpleLogger::new()
            .with_level(log_level(debug))
            .with_utc_timestamps(),
        |logger, (target, level)| logger.with_module_level(target, level),
    );
    logger.init().map_err(|err| {
        eprintln!("Failed to initialize logger: {}", err);
        Box::new(std::io::Error::other(err))
    })
}
