use anyhow::{anyhow, Context};
use std::env;
use url::Url;

use crate::models::auth::Credential;

const DEFAULT_PORTAL_BASE_URL: &str = "http://127.0.0.1:8081";

#[derive(Debug, Clone)]
pub struct Config {
    pub portal_user: String,
    pub portal_pass: String,
    pub portal_base_url: Url,
    pub jwt_secret: String,
    pub token_expiration_days: u64,
    pub port: u16,
    pub cors_allow_origins: Vec<String>,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let portal_user = required_var(&["PORTAL_USER", "MG_USER"])?;
        let portal_pass = required_var(&["PORTAL_PASS", "MG_PASS"])?;
        let jwt_secret = required_var(&["JWT_SECRET"])?;

        let base_url_raw =
            env::var("PORTAL_BASE_URL").unwrap_or_else(|_| DEFAULT_PORTAL_BASE_URL.to_string());
        let portal_base_url = Url::parse(&base_url_raw)
            .with_context(|| format!("Invalid PORTAL_BASE_URL value: {}", base_url_raw))?;

        let token_expiration_days = env::var("TOKEN_EXPIRATION_DAYS")
            .unwrap_or_else(|_| "7".to_string())
            .parse()
            .unwrap_or(7);

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| anyhow!("PORT must be a valid port number"))?;

        let cors_allow_origins = env::var("CORS_ALLOW_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_default();

        Ok(Config {
            portal_user,
            portal_pass,
            portal_base_url,
            jwt_secret,
            token_expiration_days,
            port,
            cors_allow_origins,
        })
    }

    /// Service credential used to construct the startup portal session.
    pub fn portal_credential(&self) -> Credential {
        Credential::new(self.portal_user.clone(), self.portal_pass.clone())
    }
}

fn required_var(names: &[&str]) -> anyhow::Result<String> {
    names
        .iter()
        .find_map(|name| env::var(name).ok().filter(|value| !value.trim().is_empty()))
        .ok_or_else(|| anyhow!("{} must be set", names.join(" or ")))
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
