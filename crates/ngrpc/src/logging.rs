//! Log setup shared by the binaries.
//!
//! Logs go to stderr; the plugin's stdout carries the protoc response.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (`EnvFilter` syntax).
pub const LOG_ENV: &str = "NGRPC_LOG";

/// Build the filter: `verbose` forces debug, otherwise `directives` (the
/// value of `NGRPC_LOG`) with a default of warn.
pub fn filter(verbose: bool, directives: Option<&str>) -> EnvFilter {
    let default = if verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    let builder = EnvFilter::builder().with_default_directive(default.into());
    match directives {
        Some(directives) if !verbose => builder.parse_lossy(directives),
        _ => builder.parse_lossy(""),
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(verbose: bool) {
    let directives = std::env::var(LOG_ENV).ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose, directives.as_deref()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_warn() {
        assert_eq!(filter(false, None).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn verbose_is_debug() {
        assert_eq!(filter(true, None).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(filter(true, Some("error")).max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn env_directives_apply() {
        assert_eq!(filter(false, Some("info")).max_level_hint(), Some(LevelFilter::INFO));
    }
}
