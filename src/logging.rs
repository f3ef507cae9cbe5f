//! Diagnostic logging setup
//!
//! Progress lines for the operator are printed directly; `tracing` carries
//! the extra detail enabled with `-v` or `RUST_LOG`.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Map a repeated `-v` count to a default level
pub fn verbosity_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install a stderr subscriber; `RUST_LOG` overrides the verbosity default
pub fn init(verbose: u8) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(verbosity_level(verbose).into())
        .from_env_lossy();

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_level() {
        assert_eq!(verbosity_level(0), Level::WARN);
        assert_eq!(verbosity_level(2), Level::DEBUG);
        assert_eq!(verbosity_level(9), Level::TRACE);
    }
}
