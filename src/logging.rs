//! Tracing setup for the `vit` binary.
//!
//! Logs go to stderr so command output on stdout can be piped. `VIT_LOG`
//! takes any `EnvFilter` directive and overrides the `-v` count.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV: &str = "VIT_LOG";

/// Map a `-v` count to a default level.
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn build_env_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbosity)))
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging(verbosity: u8) {
    let _ = tracing_subscriber::registry()
        .with(build_env_filter(verbosity))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for_verbosity(0), "warn");
        assert_eq!(level_for_verbosity(1), "info");
        assert_eq!(level_for_verbosity(2), "debug");
        assert_eq!(level_for_verbosity(7), "trace");
    }

    #[test]
    fn init_twice_is_harmless() {
        init_logging(0);
        init_logging(3);
    }
}
