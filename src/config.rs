use std::env;
use std::net::SocketAddr;

/// SMTP relay settings for outbound notification mail.
///
/// Optional as a group: when `MAIL_SERVER` is unset the application starts
/// without a relay and the test-email endpoint reports it as unconfigured.
#[derive(Clone)]
pub struct MailConfig {
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
    pub from_name: String,
}

#[derive(Clone)]
pub struct Config {
    // Store
    pub database_url: String,

    // Server
    pub bind_addr: SocketAddr,

    // Token issuance
    pub token_secret: String,
    pub token_ttl_secs: u64,

    // CORS allow-list; empty means deny all cross-origin requests
    pub cors_origins: Vec<String>,

    // Outbound mail
    pub mail: Option<MailConfig>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("bind_addr", &self.bind_addr)
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("cors_origins", &self.cors_origins)
            .field("mail_configured", &self.mail.is_some())
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),

    #[error("Failed to parse {0}: {1}")]
    ParseError(String, String),
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| ConfigError::ParseError(name.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Attempt to load .env file, but don't fail if it doesn't exist
        // (env vars may be set directly in production)
        let _ = dotenvy::dotenv();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingVar("DATABASE_URL".to_string()))?;
        if database_url.is_empty() {
            return Err(ConfigError::InvalidValue(
                "DATABASE_URL".to_string(),
                "cannot be empty".to_string(),
            ));
        }

        let token_secret = env::var("TOKEN_SECRET")
            .map_err(|_| ConfigError::MissingVar("TOKEN_SECRET".to_string()))?;
        if token_secret.len() < 16 {
            return Err(ConfigError::InvalidValue(
                "TOKEN_SECRET".to_string(),
                "must be at least 16 characters".to_string(),
            ));
        }

        let bind_addr: SocketAddr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8000".to_string())
            .parse()
            .map_err(|e| ConfigError::ParseError("BIND_ADDR".to_string(), format!("{}", e)))?;

        let token_ttl_secs = parse_env("TOKEN_TTL_SECS", 1800u64)?;
        if token_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "TOKEN_TTL_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        // Mail settings are all-or-nothing, keyed off MAIL_SERVER
        let mail = match env::var("MAIL_SERVER") {
            Ok(server) => {
                let required = |name: &str| -> Result<String, ConfigError> {
                    env::var(name).map_err(|_| ConfigError::MissingVar(name.to_string()))
                };
                Some(MailConfig {
                    server,
                    port: parse_env("MAIL_PORT", 587u16)?,
                    username: required("MAIL_USERNAME")?,
                    password: required("MAIL_PASSWORD")?,
                    from: required("MAIL_FROM")?,
                    from_name: env::var("MAIL_FROM_NAME")
                        .unwrap_or_else(|_| "Registrar".to_string()),
                })
            }
            Err(_) => None,
        };

        Ok(Config {
            database_url,
            bind_addr,
            token_secret,
            token_ttl_secs,
            cors_origins,
            mail,
        })
    }
}
