//! Logging setup for the command-line tool
//!
//! Logs go to stderr through a non-blocking writer so stdout only carries results.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive (e.g. `docker_tag_enhancer=debug`)
pub const LOG_ENV: &str = "DOCKER_TAG_ENHANCER_LOG";

/// Level used when `LOG_ENV` is unset, from the number of `-v` flags.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Keep the returned guard alive until exit
/// so buffered lines are flushed.
pub fn init(verbosity: u8, json: bool) -> WorkerGuard {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }

    guard
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "warn")]
    #[case(1, "info")]
    #[case(2, "debug")]
    #[case(3, "trace")]
    #[case(9, "trace")]
    fn default_directive_follows_verbosity(#[case] verbosity: u8, #[case] expected: &str) {
        assert_eq!(default_directive(verbosity), expected);
    }
}
