//! Logging setup for the command-line binary

use tracing_subscriber::EnvFilter;

use crate::ports::LogLevel;

/// Build the event filter; `RUST_LOG` takes precedence over `level`
pub fn build_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter()))
}

/// Install the global subscriber writing to stderr.
///
/// Returns `false` when a subscriber was already installed.
pub fn init_logging(level: LogLevel, json: bool) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_harmless() {
        init_logging(LogLevel::Warn, false);
        assert!(!init_logging(LogLevel::Debug, true));
    }
}
