use tracing::Level;

/// Base url of the rollouts dashboard api, without trailing slash.
pub const ROLLOUTS_API_URL: &str = match option_env!("ROLLOUTS_API_URL") {
    Some(url) => url,
    None => "http://localhost:3100/api/v1",
};

/// Kubernetes api server, usually reached through `kubectl proxy`.
pub const KUBE_API_URL: &str = match option_env!("KUBE_API_URL") {
    Some(url) => url,
    None => "http://localhost:8001",
};

pub const DEFAULT_NAMESPACE: &str = match option_env!("ROLLOUTS_NAMESPACE") {
    Some(namespace) => namespace,
    None => "default",
};

const LOG_LEVEL: Option<&str> = option_env!("ROLLOUTS_LOG_LEVEL");

pub fn log_level() -> Level {
    LOG_LEVEL.map_or(Level::INFO, parse_log_level)
}

fn parse_log_level(level: &str) -> Level {
    level.parse().unwrap_or(Level::INFO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_levels() {
        assert_eq!(parse_log_level("debug"), Level::DEBUG);
        assert_eq!(parse_log_level("WARN"), Level::WARN);
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        assert_eq!(parse_log_level("loud"), Level::INFO);
        assert_eq!(parse_log_level(""), Level::INFO);
    }
}
