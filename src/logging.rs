//! Diagnostic logging for the binary.
//!
//! Build console messages go through [`crate::logger::PluginLogger`]; this
//! module only wires `tracing` output to stderr.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Environment variable with `tracing` filter directives, e.g. `dry_guard=debug`.
pub const LOG_ENV_VAR: &str = "DRY_GUARD_LOG";

/// Level used when [`LOG_ENV_VAR`] is unset.
#[must_use]
pub const fn default_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global subscriber. Does nothing if one is already installed.
pub fn init_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::builder()
        .with_env_var(LOG_ENV_VAR)
        .with_default_directive(default_level(verbose, quiet).into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(default_level(0, false), LevelFilter::WARN);
        assert_eq!(default_level(1, false), LevelFilter::INFO);
        assert_eq!(default_level(2, false), LevelFilter::DEBUG);
        assert_eq!(default_level(5, false), LevelFilter::TRACE);
    }

    #[test]
    fn quiet_wins_over_verbose() {
        assert_eq!(default_level(3, true), LevelFilter::ERROR);
    }

    #[test]
    fn init_twice_is_harmless() {
        init_logging(0, true);
        init_logging(2, false);
    }
}
