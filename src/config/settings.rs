//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_JWT_CLIENT_ID, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    MIN_JWT_SECRET_LENGTH,
};
use crate::errors::{AppError, AppResult};

/// Key material used to verify bearer tokens.
#[derive(Clone)]
pub enum TokenKey {
    /// HS256 shared secret
    Secret(String),
    /// RS256 public key in PEM form (identity provider realm key)
    RsaPublicPem(String),
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    token_key: TokenKey,
    pub jwt_client_id: String,
    pub jwt_issuer: Option<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("token_key", &"[REDACTED]")
            .field("jwt_client_id", &self.jwt_client_id)
            .field("jwt_issuer", &self.jwt_issuer)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `JWT_PUBLIC_KEY` takes precedence over `JWT_SECRET`. In debug builds a
    /// development secret is used when neither is set.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let token_key = match (env::var("JWT_PUBLIC_KEY"), env::var("JWT_SECRET")) {
            (Ok(pem), _) => TokenKey::RsaPublicPem(pem),
            (Err(_), Ok(secret)) => TokenKey::Secret(secret),
            (Err(_), Err(_)) if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                TokenKey::Secret("dev-secret-key-minimum-32-chars!!".to_string())
            }
            (Err(_), Err(_)) => {
                return Err(AppError::internal(
                    "JWT_SECRET or JWT_PUBLIC_KEY must be set in production",
                ))
            }
        };

        let config = Self::new(
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            token_key,
        )?;

        Ok(Self {
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: parse_port(env::var("SERVER_PORT").ok())?,
            jwt_client_id: env::var("JWT_CLIENT_ID")
                .unwrap_or_else(|_| DEFAULT_JWT_CLIENT_ID.to_string()),
            jwt_issuer: env::var("JWT_ISSUER").ok().filter(|v| !v.trim().is_empty()),
            ..config
        })
    }

    /// Build a configuration with defaults for everything but the database
    /// and the token key.
    pub fn new(database_url: impl Into<String>, token_key: TokenKey) -> AppResult<Self> {
        if let TokenKey::Secret(secret) = &token_key {
            if secret.len() < MIN_JWT_SECRET_LENGTH {
                return Err(AppError::internal(format!(
                    "JWT_SECRET must be at least {} characters long",
                    MIN_JWT_SECRET_LENGTH
                )));
            }
        }

        Ok(Self {
            database_url: database_url.into(),
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            token_key,
            jwt_client_id: DEFAULT_JWT_CLIENT_ID.to_string(),
            jwt_issuer: None,
        })
    }

    /// Key material for token verification.
    pub fn token_key(&self) -> &TokenKey {
        &self.token_key
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Port from `SERVER_PORT`; unset or blank means the default.
fn parse_port(raw: Option<String>) -> AppResult<u16> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(DEFAULT_SERVER_PORT),
        Some(value) => value.parse().map_err(|_| {
            AppError::internal(format!("SERVER_PORT '{}' is not a valid port number", value))
        }),
    }
}
