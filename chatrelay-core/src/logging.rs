//! Diagnostic logging setup shared by the binaries

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an explicit filter; takes precedence over `RUST_LOG`
pub const LOG_ENV: &str = "CHATRELAY_LOG";

pub fn default_filter(component: &str) -> String {
    format!("info,chatrelay_core=debug,{component}=debug")
}

/// Install the global fmt subscriber. Later calls are no-ops.
pub fn init_tracing(component: &str) {
    init_tracing_with_default(&default_filter(component));
}

/// Like [`init_tracing`] but with an explicit fallback filter, for interactive
/// front-ends that keep stderr quiet unless asked.
pub fn init_tracing_with_default(fallback: &str) {
    let filter = std::env::var(LOG_ENV)
        .ok()
        .and_then(|value| EnvFilter::try_new(value).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_names_component() {
        let filter = default_filter("chatrelay_server");
        assert_eq!(filter, "info,chatrelay_core=debug,chatrelay_server=debug");
        assert!(EnvFilter::try_new(filter).is_ok());
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_tracing("chatrelay_test");
        init_tracing("chatrelay_test");
    }
}
