//! Bearer token verification.
//!
//! Tokens are issued by an external identity provider. This service only
//! checks signature, expiry and (optionally) issuer, then exposes the
//! client roles found under `resource_access.<client_id>.roles`.

use std::collections::HashMap;

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::config::{Config, TokenKey, ROLE_MODERATOR, ROLE_USER};
use crate::errors::{AppError, AppResult};

/// Catalog roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Read access
    User,
    /// Read and write access
    Moderator,
}

impl Role {
    /// Parse a role name, ignoring case. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Role> {
        if name.eq_ignore_ascii_case(ROLE_USER) {
            Some(Role::User)
        } else if name.eq_ignore_ascii_case(ROLE_MODERATOR) {
            Some(Role::Moderator)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "{}", ROLE_USER),
            Role::Moderator => write!(f, "{}", ROLE_MODERATOR),
        }
    }
}

/// Roles granted for one client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientAccess {
    #[serde(default)]
    pub roles: Vec<String>,
}

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_username: Option<String>,
    #[serde(default)]
    pub resource_access: HashMap<String, ClientAccess>,
}

impl Claims {
    /// Known roles granted to `client_id`; unknown role names are skipped.
    pub fn roles(&self, client_id: &str) -> Vec<Role> {
        self.resource_access
            .get(client_id)
            .map(|access| access.roles.iter().filter_map(|r| Role::parse(r)).collect())
            .unwrap_or_default()
    }
}

/// Token verifier trait for dependency injection.
pub trait TokenVerifier: Send + Sync {
    /// Verify the token and extract its claims
    fn verify(&self, token: &str) -> AppResult<Claims>;

    /// Client whose roles apply to this service
    fn client_id(&self) -> &str;
}

/// Verifies identity provider tokens with a shared secret (HS256) or the
/// provider's RSA public key (RS256).
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
    client_id: String,
}

impl JwtVerifier {
    /// Build a verifier from the configured key material.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let (key, algorithm) = match config.token_key() {
            TokenKey::Secret(secret) => (DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256),
            TokenKey::RsaPublicPem(pem) => (
                DecodingKey::from_rsa_pem(pem.as_bytes())
                    .map_err(|e| AppError::internal(format!("Invalid JWT_PUBLIC_KEY: {}", e)))?,
                Algorithm::RS256,
            ),
        };

        let mut validation = Validation::new(algorithm);
        // Audience is the provider's account client, not this service
        validation.validate_aud = false;
        if let Some(issuer) = &config.jwt_issuer {
            validation.set_issuer(&[issuer]);
        }

        Ok(Self {
            key,
            validation,
            client_id: config.jwt_client_id.clone(),
        })
    }
}

impl TokenVerifier for JwtVerifier {
    fn verify(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(token, &self.key, &self.validation)?;
        Ok(token_data.claims)
    }

    fn client_id(&self) -> &str {
        &self.client_id
    }
}
