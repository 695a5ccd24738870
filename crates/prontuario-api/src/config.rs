use std::env;
use std::fmt;

use prontuario_export::styles::DocumentStyles;

use crate::middleware::auth::TokenVerifier;

/// Runtime configuration, read once at cold start.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bucket: String,
    pub region: String,
    pub styles: DocumentStyles,
    pub auth: AuthConfig,
}

impl ApiConfig {
    /// `PRONTUARIO_BUCKET`, `AWS_REGION`, the token settings read by
    /// [`AuthConfig::from_env`] and, optionally, `PRONTUARIO_EXPORT_STYLES` as
    /// a JSON object of style overrides.
    pub fn from_env() -> eyre::Result<Self> {
        let bucket = env::var("PRONTUARIO_BUCKET").unwrap_or_else(|_| "prontuario".to_string());
        let region = env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string());
        let styles = match env::var("PRONTUARIO_EXPORT_STYLES") {
            Ok(raw) => parse_styles(&raw)?,
            Err(_) => DocumentStyles::default(),
        };
        Ok(Self {
            bucket,
            region,
            styles,
            auth: AuthConfig::from_env()?,
        })
    }
}

/// Missing keys keep their defaults.
pub fn parse_styles(raw: &str) -> eyre::Result<DocumentStyles> {
    serde_json::from_str(raw)
        .map_err(|e| eyre::eyre!("PRONTUARIO_EXPORT_STYLES is not valid JSON: {e}"))
}

/// How bearer tokens are checked.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub issuer: String,
    pub key: TokenKey,
    /// Accept a bare user id as the token. Never set outside local runs.
    pub dev_user_ids: bool,
}

#[derive(Clone)]
pub enum TokenKey {
    /// PEM public key for RS256 tokens.
    RsaPem(String),
    /// Shared secret for HS256 tokens.
    Secret(String),
}

impl fmt::Debug for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKey::RsaPem(_) => f.write_str("RsaPem(..)"),
            TokenKey::Secret(_) => f.write_str("Secret(..)"),
        }
    }
}

impl AuthConfig {
    /// `PRONTUARIO_JWT_ISSUER` plus one of `PRONTUARIO_JWT_PUBLIC_KEY` (PEM)
    /// or `PRONTUARIO_JWT_SECRET`. `PRONTUARIO_DEV_USER_IDS=true` enables bare
    /// user id tokens.
    pub fn from_env() -> eyre::Result<Self> {
        let issuer = env::var("PRONTUARIO_JWT_ISSUER")
            .map_err(|_| eyre::eyre!("PRONTUARIO_JWT_ISSUER is required"))?;
        let key = match (
            env::var("PRONTUARIO_JWT_PUBLIC_KEY"),
            env::var("PRONTUARIO_JWT_SECRET"),
        ) {
            (Ok(pem), _) => TokenKey::RsaPem(pem),
            (Err(_), Ok(secret)) => TokenKey::Secret(secret),
            (Err(_), Err(_)) => {
                return Err(eyre::eyre!(
                    "set PRONTUARIO_JWT_PUBLIC_KEY or PRONTUARIO_JWT_SECRET"
                ));
            }
        };
        let dev_user_ids = env::var("PRONTUARIO_DEV_USER_IDS")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);
        Ok(Self {
            issuer,
            key,
            dev_user_ids,
        })
    }

    pub fn verifier(&self) -> eyre::Result<TokenVerifier> {
        let verifier = match &self.key {
            TokenKey::RsaPem(pem) => TokenVerifier::rs256(pem.as_bytes(), &self.issuer)
                .map_err(|e| eyre::eyre!("PRONTUARIO_JWT_PUBLIC_KEY is not a valid RSA key: {e}"))?,
            TokenKey::Secret(secret) => TokenVerifier::hs256(secret.as_bytes(), &self.issuer),
        };
        Ok(verifier.accept_bare_user_ids(self.dev_user_ids))
    }
}

/// `true`, `1` and `yes`, in any case.
pub fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}
