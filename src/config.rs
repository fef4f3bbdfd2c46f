use std::env;

use anyhow::bail;

/// Whether protected routes require an `x-access-token`.
///
/// Chosen once per deployment; there is no per-request override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Token,
    Open,
}

impl AuthMode {
    pub fn parse(value: &str) -> anyhow::Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "token" => Ok(AuthMode::Token),
            "open" => Ok(AuthMode::Open),
            other => bail!("APP_AUTH_MODE must be `token` or `open`, got `{other}`"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    pub auth_mode: AuthMode,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET is not set"))?;
        let token_ttl_minutes = env::var("JWT_TTL_MINUTES")
            .ok()
            .and_then(|m| m.parse::<i64>().ok())
            .filter(|m| *m > 0)
            .unwrap_or(30);
        let auth_mode = match env::var("APP_AUTH_MODE") {
            Ok(value) => AuthMode::parse(&value)?,
            Err(_) => AuthMode::default(),
        };
        Ok(Self {
            port,
            database_url,
            host,
            jwt_secret,
            token_ttl_minutes,
            auth_mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_mode_parses_known_values() {
        assert_eq!(AuthMode::parse("token").unwrap(), AuthMode::Token);
        assert_eq!(AuthMode::parse(" OPEN ").unwrap(), AuthMode::Open);
        assert!(AuthMode::parse("maybe").is_err());
    }
}
