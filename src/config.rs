use std::{env, fmt::Display, str::FromStr, time::Duration};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub support_email: String,
    /// Pause before the forgot-password form moves on to OTP entry.
    pub auth_delay: Duration,
    pub static_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            support_email: "support@aetherisx.com".to_string(),
            auth_delay: Duration::from_millis(1500),
            static_dir: "static".to_string(),
        }
    }
}

impl Config {
    /// Reads settings from the environment (call `dotenvy::dotenv()` first).
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_env("PORT", defaults.port),
            support_email: env::var("SUPPORT_EMAIL").unwrap_or(defaults.support_email),
            auth_delay: Duration::from_millis(parse_env("AUTH_DELAY_MS", 1500u64)),
            static_dir: env::var("STATIC_DIR").unwrap_or(defaults.static_dir),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_env<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("{} has invalid value {:?}, using {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert_eq!(config.auth_delay, Duration::from_millis(1500));
        assert_eq!(config.support_email, "support@aetherisx.com");
    }

    #[test]
    fn invalid_numbers_fall_back() {
        env::set_var("CONSOLE_TEST_PORT", "not-a-port");
        assert_eq!(parse_env("CONSOLE_TEST_PORT", 3000u16), 3000);
        env::set_var("CONSOLE_TEST_PORT", " 8080 ");
        assert_eq!(parse_env("CONSOLE_TEST_PORT", 3000u16), 8080);
        env::remove_var("CONSOLE_TEST_PORT");
        assert_eq!(parse_env("CONSOLE_TEST_PORT", 3000u16), 3000);
    }
}
