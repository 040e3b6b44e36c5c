/// Configuration management for Video Service
///
/// Loads configuration from environment variables.
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub cors: CorsConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub media: MediaConfig,
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Token verification material. Exactly one of the two is used; the public
/// key wins when both are set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: Option<String>,
    pub jwt_public_key_pem: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    pub bucket: String,
    pub region: String,
    /// Public base URL for stored objects (CDN); falls back to the bucket URL.
    pub base_url: Option<String>,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl MediaConfig {
    pub fn public_base_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}.s3.{}.amazonaws.com", self.bucket, self.region),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    #[serde(default = "default_max_limit")]
    pub max_limit: i64,
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    2
}

fn default_max_upload_bytes() -> usize {
    512 * 1024 * 1024
}

fn default_max_limit() -> i64 {
    100
}

/// Parse `key` when set; an unset key takes `default`, a malformed one is an error.
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {} value: {}", key, raw)),
        None => Ok(default),
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app = AppConfig {
            env: lookup("APP_ENV").unwrap_or_else(|| "development".to_string()),
            host: lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 8000)?,
        };

        let cors = {
            let allowed_origins = match lookup("CORS_ALLOWED_ORIGINS") {
                Some(value) => value,
                None if app.is_production() => {
                    bail!("CORS_ALLOWED_ORIGINS must be set in production")
                }
                None => "http://localhost:3000".to_string(),
            };

            if app.is_production() && allowed_origins.trim() == "*" {
                bail!("CORS_ALLOWED_ORIGINS cannot be '*' in production");
            }

            CorsConfig { allowed_origins }
        };

        let database = DatabaseConfig {
            url: lookup("DATABASE_URL").context("DATABASE_URL environment variable not set")?,
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", default_max_connections())?,
            min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", default_min_connections())?,
        };

        let auth = AuthConfig {
            jwt_secret: lookup("JWT_SECRET").filter(|s| !s.is_empty()),
            jwt_public_key_pem: lookup("JWT_PUBLIC_KEY_PEM").filter(|s| !s.is_empty()),
        };
        if auth.jwt_secret.is_none() && auth.jwt_public_key_pem.is_none() {
            bail!("either JWT_PUBLIC_KEY_PEM or JWT_SECRET must be set");
        }

        let media = MediaConfig {
            bucket: lookup("S3_BUCKET").unwrap_or_else(|| "vidtube-media".to_string()),
            region: lookup("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
            base_url: lookup("S3_BASE_URL").filter(|s| !s.is_empty()),
            max_upload_bytes: parse_or(
                &lookup,
                "MEDIA_MAX_UPLOAD_BYTES",
                default_max_upload_bytes(),
            )?,
        };

        let pagination = PaginationConfig {
            max_limit: parse_or(&lookup, "PAGINATION_MAX_LIMIT", default_max_limit())?,
        };
        if pagination.max_limit < 1 {
            bail!("PAGINATION_MAX_LIMIT must be at least 1");
        }

        Ok(Config {
            app,
            cors,
            database,
            auth,
            media,
            pagination,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://test"),
            ("JWT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.app.env, "development");
        assert_eq!(config.app.host, "0.0.0.0");
        assert_eq!(config.app.port, 8000);
        assert_eq!(config.database.max_connections, 20);
        assert_eq!(config.database.min_connections, 2);
        assert_eq!(config.pagination.max_limit, 100);
        assert_eq!(config.cors.allowed_origins, "http://localhost:3000");
        assert_eq!(
            config.media.public_base_url(),
            "https://vidtube-media.s3.us-east-1.amazonaws.com"
        );
    }

    #[test]
    fn database_url_is_required() {
        let err = Config::from_lookup(lookup_from(&[("JWT_SECRET", "secret")])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn token_key_is_required() {
        let err =
            Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://test")])).unwrap_err();
        assert!(err.to_string().contains("JWT"));
    }

    #[test]
    fn production_rejects_wildcard_cors() {
        let err = Config::from_lookup(lookup_from(&[
            ("APP_ENV", "production"),
            ("CORS_ALLOWED_ORIGINS", "*"),
            ("DATABASE_URL", "postgres://test"),
            ("JWT_SECRET", "secret"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("cannot be '*'"));
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        for key in [
            "PORT",
            "DB_MAX_CONNECTIONS",
            "DB_MIN_CONNECTIONS",
            "MEDIA_MAX_UPLOAD_BYTES",
            "PAGINATION_MAX_LIMIT",
        ] {
            let err = Config::from_lookup(lookup_from(&[
                ("DATABASE_URL", "postgres://test"),
                ("JWT_SECRET", "secret"),
                (key, "eighty"),
            ]))
            .unwrap_err();
            assert!(err.to_string().contains(key), "{}: {}", key, err);
        }
    }

    #[test]
    fn numeric_overrides_are_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://test"),
            ("JWT_SECRET", "secret"),
            ("PORT", "9090"),
            ("DB_MAX_CONNECTIONS", "5"),
            ("PAGINATION_MAX_LIMIT", "50"),
        ]))
        .unwrap();
        assert_eq!(config.app.port, 9090);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.pagination.max_limit, 50);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://test"),
            ("JWT_SECRET", "secret"),
            ("S3_BASE_URL", "https://cdn.vidtube.dev/"),
        ]))
        .unwrap();
        assert_eq!(config.media.public_base_url(), "https://cdn.vidtube.dev");
    }
}
