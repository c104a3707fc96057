use crate::domain::otp::{OTP_LENGTH, OTP_TTL_SECS};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(anyhow::anyhow!("Unknown APP_ENV: {}", other)),
        }
    }
}

/// Runtime settings. Read once at startup and shared through `AppState`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub port: u16,
    pub jwt_private_key_path: String,
    pub jwt_public_key_path: String,
    pub access_token_expiry: i64,
    pub refresh_token_expiry: i64,
    pub otp_ttl_secs: i64,
    pub otp_length: usize,
    pub cors_allowed_origins: String,
    pub rate_limit_per_minute: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            port: 3000,
            jwt_private_key_path: "keys/private_key.pem".to_string(),
            jwt_public_key_path: "keys/public_key.pem".to_string(),
            access_token_expiry: 900,
            refresh_token_expiry: 604800,
            otp_ttl_secs: OTP_TTL_SECS,
            otp_length: OTP_LENGTH,
            cors_allowed_origins: String::new(),
            rate_limit_per_minute: 60,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let environment = match env::var("APP_ENV") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.environment,
        };

        Ok(Self {
            environment,
            port: parse_or("PORT", defaults.port),
            jwt_private_key_path: env::var("JWT_PRIVATE_KEY_PATH")
                .unwrap_or(defaults.jwt_private_key_path),
            jwt_public_key_path: env::var("JWT_PUBLIC_KEY_PATH")
                .unwrap_or(defaults.jwt_public_key_path),
            access_token_expiry: parse_or("JWT_ACCESS_TOKEN_EXPIRY", defaults.access_token_expiry),
            refresh_token_expiry: parse_or(
                "JWT_REFRESH_TOKEN_EXPIRY",
                defaults.refresh_token_expiry,
            ),
            otp_ttl_secs: parse_or("OTP_TTL_SECS", defaults.otp_ttl_secs),
            otp_length: parse_or("OTP_LENGTH", defaults.otp_length),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or(defaults.cors_allowed_origins),
            rate_limit_per_minute: parse_or(
                "RATE_LIMIT_PER_MINUTE",
                defaults.rate_limit_per_minute,
            ),
        })
    }

    /// Cookies carry `Secure` only outside development.
    pub fn secure_cookies(&self) -> bool {
        self.environment.is_production()
    }
}

pub(crate) fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
