use tracing_subscriber::EnvFilter;

/// Map a configured log level to an `EnvFilter` directive.
///
/// - "DISABLED" -> `None`, no subscriber installed
/// - "WARNING" -> WARN
/// - "CRITICAL" -> ERROR
/// - Others map directly (DEBUG, INFO, ERROR, or any filter directive)
pub fn filter_directive(log_level: &str) -> Option<String> {
    let level = log_level.trim().to_uppercase();
    match level.as_str() {
        "DISABLED" => None,
        "WARNING" => Some("WARN".to_string()),
        "CRITICAL" => Some("ERROR".to_string()),
        "" => Some("INFO".to_string()),
        _ => Some(log_level.trim().to_string()),
    }
}

/// Initialize the tracing subscriber with the configured log level.
pub fn init_tracing(log_level: &str) {
    let Some(directive) = filter_directive(log_level) else {
        return;
    };

    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("INFO"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive_aliases() {
        assert_eq!(filter_directive("disabled"), None);
        assert_eq!(filter_directive("Warning").as_deref(), Some("WARN"));
        assert_eq!(filter_directive("CRITICAL").as_deref(), Some("ERROR"));
        assert_eq!(filter_directive("").as_deref(), Some("INFO"));
    }

    #[test]
    fn test_filter_directive_passthrough() {
        assert_eq!(filter_directive("debug").as_deref(), Some("debug"));
        assert_eq!(
            filter_directive("infosec_assistant=trace").as_deref(),
            Some("infosec_assistant=trace")
        );
    }
}
