use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

/// Identity middleware.
///
/// Extracts the `Authorization: Bearer <token>` header and resolves the
/// current user id through the [`TokenVerifier`]. On success, inserts
/// `AuthUser` into request extensions for handlers to use.
pub async fn require_auth(
    State(verifier): State<Arc<TokenVerifier>>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let user_id = {
        let auth_header = req
            .headers()
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(StatusCode::UNAUTHORIZED)?;

        verifier
            .user_id(token.trim())
            .ok_or(StatusCode::UNAUTHORIZED)?
    };

    req.extensions_mut().insert(AuthUser { user_id });

    Ok(next.run(req).await)
}

/// Authenticated user. Owns every record it reads or writes.
#[derive(Clone, Copy, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
struct Claims {
    sub: String,
}

/// Checks bearer tokens against the identity provider's key and issuer.
///
/// Signature, issuer and `exp` are all required. The `sub` claim must be a
/// UUID; it becomes the owner id of every record the request touches.
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
    accept_bare_user_ids: bool,
}

impl TokenVerifier {
    /// RS256 tokens, checked with the provider's PEM public key.
    pub fn rs256(public_key_pem: &[u8], issuer: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let key = DecodingKey::from_rsa_pem(public_key_pem)?;
        Ok(Self::with_key(key, Algorithm::RS256, issuer))
    }

    /// HS256 tokens signed with a shared secret.
    pub fn hs256(secret: &[u8], issuer: &str) -> Self {
        Self::with_key(DecodingKey::from_secret(secret), Algorithm::HS256, issuer)
    }

    fn with_key(key: DecodingKey, algorithm: Algorithm, issuer: &str) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[issuer]);
        validation.validate_exp = true;
        Self {
            key,
            validation,
            accept_bare_user_ids: false,
        }
    }

    /// Also accept a bare user id as the whole token. For local runs
    /// without an identity provider.
    pub fn accept_bare_user_ids(mut self, accept: bool) -> Self {
        self.accept_bare_user_ids = accept;
        self
    }

    /// The user id carried by a valid token.
    pub fn user_id(&self, token: &str) -> Option<Uuid> {
        if token.is_empty() {
            return None;
        }
        if self.accept_bare_user_ids {
            if let Ok(id) = token.parse::<Uuid>() {
                return Some(id);
            }
        }
        let data = match decode::<Claims>(token, &self.key, &self.validation) {
            Ok(data) => data,
            Err(e) => {
                debug!(error = %e, "token rejected");
                return None;
            }
        };
        data.claims.sub.parse().ok()
    }
}
