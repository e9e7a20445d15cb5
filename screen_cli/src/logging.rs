//! Logging setup with tracing-subscriber.
//!
//! `RUST_LOG` wins when set, e.g. `RUST_LOG=screen_core=debug`. Otherwise the
//! level is `warn`, or `debug` with `--verbose`. Logs go to stderr so the
//! report and JSON output on stdout stay clean.

use tracing_subscriber::{fmt, EnvFilter};

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "warn");
        assert_eq!(default_directive(true), "debug");
    }
}
