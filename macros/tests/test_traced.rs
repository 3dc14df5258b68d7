#[cfg(test)]
mod tests {
    use rgss_macros::test_traced;
    use tracing::{debug, error, info, warn};

    #[test_traced(level = "INFO")]
    fn test_info_level() {
        info!("decoded table");
        debug!(elements = 3, "not shown at INFO");
        assert!(tracing::enabled!(tracing::Level::INFO));
        assert!(!tracing::enabled!(tracing::Level::DEBUG));
    }

    #[test_traced]
    fn test_default_level() {
        debug!("shown at the default level");
        assert!(tracing::enabled!(tracing::Level::DEBUG));
        assert!(!tracing::enabled!(tracing::Level::TRACE));
    }

    #[test_traced("warn")]
    fn test_bare_level() {
        warn!("element count does not match extents");
        assert!(!tracing::enabled!(tracing::Level::INFO));
    }

    #[test_traced(level = "ERROR")]
    #[should_panic(expected = "malformed")]
    fn test_should_panic_passthrough() {
        error!("about to panic");
        panic!("malformed record");
    }
}
