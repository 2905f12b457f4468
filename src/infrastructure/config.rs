use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Empty means any origin is allowed
    pub cors_allowed_origins: Vec<String>,
    pub rate_limit_max: u32,
    pub rate_limit_window_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://employees.db?mode=rwc".to_string(),
            host: "0.0.0.0".to_string(),
            port: 5000,
            cors_allowed_origins: Vec::new(),
            rate_limit_max: 100,
            rate_limit_window_secs: 15 * 60,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            rate_limit_max: env::var("RATE_LIMIT_MAX")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.rate_limit_max),
            rate_limit_window_secs: env::var("RATE_LIMIT_WINDOW_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.rate_limit_window_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 6] = [
        "DATABASE_URL",
        "HOST",
        "PORT",
        "CORS_ALLOWED_ORIGINS",
        "RATE_LIMIT_MAX",
        "RATE_LIMIT_WINDOW_SECS",
    ];

    fn clear_env() {
        for var in VARS {
            // SAFETY: env-mutating tests are serialized
            unsafe { env::remove_var(var) };
        }
    }

    #[test]
    #[serial]
    fn test_defaults_when_env_is_empty() {
        clear_env();

        let config = Config::from_env();
        assert_eq!(config.port, 5000);
        assert_eq!(config.rate_limit_max, 100);
        assert_eq!(config.rate_limit_window_secs, 900);
        assert!(config.cors_allowed_origins.is_empty());
        assert!(config.database_url.starts_with("sqlite://"));
    }

    #[test]
    #[serial]
    fn test_reads_overrides_from_env() {
        clear_env();
        unsafe {
            env::set_var("PORT", "8080");
            env::set_var("RATE_LIMIT_MAX", "5");
            env::set_var("CORS_ALLOWED_ORIGINS", "http://a.test, http://b.test,");
        }

        let config = Config::from_env();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rate_limit_max, 5);
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );

        clear_env();
    }

    #[test]
    #[serial]
    fn test_unparseable_port_falls_back() {
        clear_env();
        unsafe { env::set_var("PORT", "not-a-port") };

        assert_eq!(Config::from_env().port, 5000);

        clear_env();
    }
}
