use std::env;
use std::time::Duration;

use anyhow::{bail, Context};

use crate::rate_limit::RateLimitConfig;

const MIN_SECRET_LEN: usize = 32;
/// One year.
const MAX_TOKEN_TTL_HOURS: u64 = 24 * 365;

/// Runtime settings, read once at start-up.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    pub jwt_secret: String,
    pub token_ttl: chrono::Duration,
    pub frontend_url: String,
    pub admin_username: String,
    pub admin_password: String,
    pub seed_sample_data: bool,
    pub enable_hsts: bool,
    /// `None` turns throttling off.
    pub rate_limit: Option<RateLimitConfig>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source; `from_env` passes the
    /// process environment.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let jwt_secret = get("JWT_SECRET").context("JWT_SECRET must be set")?;
        if jwt_secret.len() < MIN_SECRET_LEN {
            bail!("JWT_SECRET must be at least {MIN_SECRET_LEN} characters long");
        }

        let flag = |name: &str, default: bool| {
            get(name)
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(default)
        };
        let number = |name: &str, default: u64| -> anyhow::Result<u64> {
            match get(name) {
                Some(v) => v.parse().with_context(|| format!("{name} must be a whole number, got {v:?}")),
                None => Ok(default),
            }
        };

        let defaults = RateLimitConfig::default();
        let rate_limit = if flag("RATE_LIMIT_ENABLED", true) {
            Some(RateLimitConfig {
                message_limit: number("RL_MESSAGE_LIMIT", defaults.message_limit as u64)? as usize,
                message_window: Duration::from_secs(number("RL_MESSAGE_WINDOW", defaults.message_window.as_secs())?),
                login_limit: number("RL_LOGIN_LIMIT", defaults.login_limit as u64)? as usize,
                login_window: Duration::from_secs(number("RL_LOGIN_WINDOW", defaults.login_window.as_secs())?),
            })
        } else {
            None
        };

        let ttl_hours = number("TOKEN_TTL_HOURS", 24)?;
        if ttl_hours == 0 || ttl_hours > MAX_TOKEN_TTL_HOURS {
            bail!("TOKEN_TTL_HOURS must be between 1 and {MAX_TOKEN_TTL_HOURS}, got {ttl_hours}");
        }
        let token_ttl = chrono::Duration::try_hours(ttl_hours as i64).context("TOKEN_TTL_HOURS out of range")?;

        Ok(Self {
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string()),
            jwt_secret,
            token_ttl,
            frontend_url: get("FRONTEND_URL").unwrap_or_else(|| "http://localhost:5173".to_string()),
            admin_username: get("ADMIN_USERNAME").unwrap_or_else(|| "admin".to_string()),
            admin_password: get("ADMIN_PASSWORD").unwrap_or_else(|| "admin123".to_string()),
            seed_sample_data: flag("SEED_SAMPLE_DATA", true),
            enable_hsts: flag("ENABLE_HSTS", false),
            rate_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn defaults_apply() {
        let cfg = AppConfig::from_lookup(lookup(&[("JWT_SECRET", SECRET)])).unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080");
        assert_eq!(cfg.token_ttl, chrono::Duration::hours(24));
        assert_eq!(cfg.admin_username, "admin");
        assert!(cfg.seed_sample_data);
        assert!(!cfg.enable_hsts);
        assert_eq!(cfg.rate_limit, Some(RateLimitConfig::default()));
    }

    #[test]
    fn secret_is_required_and_long() {
        assert!(AppConfig::from_lookup(lookup(&[])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("JWT_SECRET", "short")])).is_err());
    }

    #[test]
    fn overrides_and_disabled_limiter() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("JWT_SECRET", SECRET),
            ("TOKEN_TTL_HOURS", "2"),
            ("RATE_LIMIT_ENABLED", "false"),
            ("SEED_SAMPLE_DATA", "0"),
            ("ENABLE_HSTS", "TRUE"),
        ]))
        .unwrap();
        assert_eq!(cfg.token_ttl, chrono::Duration::hours(2));
        assert!(cfg.rate_limit.is_none());
        assert!(!cfg.seed_sample_data);
        assert!(cfg.enable_hsts);
    }

    #[test]
    fn token_ttl_is_bounded() {
        for ttl in ["0", "8761", "99999999999999999", "18446744073709551615"] {
            let res = AppConfig::from_lookup(lookup(&[("JWT_SECRET", SECRET), ("TOKEN_TTL_HOURS", ttl)]));
            assert!(res.is_err(), "{ttl}");
        }
        let cfg = AppConfig::from_lookup(lookup(&[("JWT_SECRET", SECRET), ("TOKEN_TTL_HOURS", "8760")])).unwrap();
        assert_eq!(cfg.token_ttl, chrono::Duration::hours(8760));
    }

    #[test]
    fn malformed_number_is_an_error() {
        let res = AppConfig::from_lookup(lookup(&[("JWT_SECRET", SECRET), ("RL_LOGIN_LIMIT", "ten")]));
        assert!(res.is_err());
    }
}
