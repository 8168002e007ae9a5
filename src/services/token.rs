// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity tokens for hub requests.
//!
//! The hub identifies the user from an HS256 JWT signed with a shared
//! secret. Tokens carry no expiry unless one is configured.

use crate::error::{AppError, Result};
use crate::models::{UserId, UserRecord};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

/// JWT claims structure expected by the hub.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IdentityClaims {
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Expiration time (Unix timestamp), only when a TTL is configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

/// Signs identity tokens with a fixed key.
#[derive(Clone)]
pub struct TokenMinter {
    key: EncodingKey,
    expires_at: Option<u64>,
}

impl TokenMinter {
    pub fn new(signing_key: &[u8]) -> Self {
        Self {
            key: EncodingKey::from_secret(signing_key),
            expires_at: None,
        }
    }

    /// Stamp every token with the same `exp` claim.
    pub fn with_expiry(mut self, expires_at: u64) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Mint the `Authorization` header value for a roster user.
    pub fn mint(&self, user: &UserRecord) -> Result<String> {
        self.mint_claims(&user.id, user.email.as_deref(), user.name.as_deref())
    }

    /// Mint a `Bearer` credential for the given identity.
    ///
    /// Empty `name`/`email` values are left out of the claims.
    pub fn mint_claims(
        &self,
        id: &UserId,
        email: Option<&str>,
        name: Option<&str>,
    ) -> Result<String> {
        let present = |v: Option<&str>| v.filter(|s| !s.is_empty()).map(str::to_string);

        let claims = IdentityClaims {
            id: id.clone(),
            name: present(name),
            email: present(email),
            exp: self.expires_at,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.key)
            .map_err(|e| AppError::Token(e.to_string()))?;

        Ok(format!("Bearer {}", token))
    }
}
