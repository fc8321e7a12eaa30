use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    models::auth::{Credential, Session},
    utils::encryption::{open_secret, seal_secret},
};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // portal username
    pub sec: String, // sealed portal password
    #[serde(default)]
    pub demo: bool,
    pub exp: i64,    // expiration time
    pub iat: i64,    // issued at
    pub jti: String, // JWT ID
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("session token expired")]
    Expired,
    #[error("session token invalid: {0}")]
    Invalid(String),
}

impl Claims {
    pub fn new(username: String, sealed_secret: String, demo: bool, expiration_days: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::days(expiration_days as i64);

        Self {
            sub: username,
            sec: sealed_secret,
            demo,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }
}

/// Signs a session token carrying the credential and demo flag.
pub fn create_session_token(
    credential: &Credential,
    is_demo: bool,
    secret: &str,
    expiration_days: u64,
) -> anyhow::Result<(String, Claims)> {
    let sealed = seal_secret(&credential.password, secret)?;
    let claims = Claims::new(
        credential.username.clone(),
        sealed,
        is_demo,
        expiration_days,
    );
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?;

    Ok((token, claims))
}

pub fn verify_access_token(token: &str, secret: &str) -> Result<Claims, TokenError> {
    let validation = Validation::default();
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )
    .map_err(|err| match err.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid(err.to_string()),
    })?;

    Ok(token_data.claims)
}

/// Verifies the token and recovers the session it was issued for.
pub fn verify_session_token(token: &str, secret: &str) -> Result<Session, TokenError> {
    let claims = verify_access_token(token, secret)?;
    let password = open_secret(&claims.sec, secret)
        .map_err(|err| TokenError::Invalid(err.to_string()))?;

    Ok(Session {
        credential: Credential::new(claims.sub, password),
        is_demo: claims.demo,
    })
}
