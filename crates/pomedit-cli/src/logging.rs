use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for a verbosity level (`-v` raises, `-q` lowers)
pub fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "pomedit=warn",
        (false, 0) => "pomedit=info",
        (false, 1) => "pomedit=debug",
        (false, _) => "pomedit=trace",
    }
}

/// Install the stderr logger; `RUST_LOG` overrides the verbosity flags
pub fn init_cli_logger(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(0, false), "pomedit=info");
        assert_eq!(default_directive(1, false), "pomedit=debug");
        assert_eq!(default_directive(3, false), "pomedit=trace");
        assert_eq!(default_directive(2, true), "pomedit=warn");
    }
}
