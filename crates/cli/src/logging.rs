use tracing_subscriber::{fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

/// Initialize tracing with the specified verbosity level and output format.
///
/// Only events from the `quaddb` crates are shown, at WARN level by default so
/// that stdout stays reserved for command output. Logs go to stderr.
///
/// # Arguments
/// * `json` - If true, output logs in JSON format; otherwise, use human-readable format.
/// * `verbose` - Verbosity level: 0 for WARN, 1 for INFO, 2 for DEBUG, 3+ for TRACE.
pub fn init_tracing(json: bool, verbose: u8) {
    let filter = EnvFilter::new(filter_directives(verbose));

    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// `EnvFilter` directives for a verbosity level.
fn filter_directives(verbose: u8) -> String {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("quaddb={},quaddb_cli={}", level, level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directives() {
        assert_eq!(filter_directives(0), "quaddb=warn,quaddb_cli=warn");
        assert_eq!(filter_directives(2), "quaddb=debug,quaddb_cli=debug");
        assert_eq!(filter_directives(9), "quaddb=trace,quaddb_cli=trace");
    }
}
