//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self { port: 8080 }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Nothing is required: an unset or unparseable `PORT` falls back to
    /// 8080.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("PORT", "9090");
        let config = Config::from_env();
        assert_eq!(config.port, 9090);

        env::set_var("PORT", "not-a-port");
        let config = Config::from_env();
        assert_eq!(config.port, 8080);

        env::remove_var("PORT");
    }
}
