//! Logging setup for testprops
//!
//! Library code only emits `tracing` events. Harness binaries that embed the
//! property store call [`init_tracing`] once at startup to see them.

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Filter directive used when `verbose` is set and `RUST_LOG` is absent.
pub const VERBOSE_FILTER: &str = "testprops=debug,testprops_config=debug,info";

/// Filter directive used by default when `RUST_LOG` is absent.
pub const DEFAULT_FILTER: &str = "testprops=info,testprops_config=info,warn";

/// Build the filter for the requested verbosity.
///
/// `RUST_LOG` always takes precedence over the built-in directives.
pub fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER }))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize a global tracing subscriber.
///
/// Verbose mode prints targets and span close events; the default format is
/// compact and target-free.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been installed.
pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let layer = fmt::layer()
        .with_target(verbose)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_span_events(if verbose { FmtSpan::CLOSE } else { FmtSpan::NONE })
        .compact();

    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directives_parse() {
        assert!(EnvFilter::try_new(VERBOSE_FILTER).is_ok());
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }

    #[test]
    fn test_init_tracing_twice_reports_error() {
        // The only caller of init_tracing in this test binary.
        assert!(init_tracing(false).is_ok());
        assert!(init_tracing(true).is_err());
    }
}
