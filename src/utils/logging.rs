use std::str::FromStr;
use tracing::level_filters::LevelFilter;
use crate::core::domain::Configuration;

pub fn setup_tracing(config: &Configuration) {
    let known_level = LevelFilter::from_str(config.log_level.as_str()).is_ok();
    let builder = tracing_subscriber::fmt()
        .with_max_level(parse_level(config.log_level.as_str()))
        // disable printing the name of the module in every log line.
        .with_target(false);
    if config.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
    if !known_level {
        tracing::warn!(log_level = %config.log_level, "unknown log level; using info");
    }
}

pub(crate) fn parse_level(value: &str) -> LevelFilter {
    LevelFilter::from_str(value).unwrap_or(LevelFilter::INFO)
}

#[cfg(test)]
mod tests {
    use tracing::level_filters::LevelFilter;
    use crate::utils::logging::parse_level;

    #[tokio::test]
    async fn test_should_parse_levels() {
        assert_eq!(LevelFilter::DEBUG, parse_level("debug"));
        assert_eq!(LevelFilter::WARN, parse_level("WARN"));
        assert_eq!(LevelFilter::OFF, parse_level("off"));
        assert_eq!(LevelFilter::INFO, parse_level("chatty"));
    }
}
