use std::net::IpAddr;
use std::path::PathBuf;

use axum::http::HeaderValue;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub cors_origins: Vec<HeaderValue>,
    pub static_dir: Option<PathBuf>,
    pub log_level: String,
    pub mail: MailConfig,
}

/// SMTP transport and addressing for administrator notifications.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    /// Implicit TLS when true, opportunistic STARTTLS otherwise.
    pub secure: bool,
    pub user: Option<String>,
    pub pass: Option<String>,
    pub from: String,
    pub to: String,
}

pub const DEFAULT_MAIL_PORT: u16 = 587;
pub const DEFAULT_MAIL_FROM: &str = "Contact Form <no-reply@example.com>";
pub const DEFAULT_MAIL_TO: &str = "admin@example.com";

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env { lookup };

        let database_url = env.required("DATABASE_URL")?;

        let host: IpAddr = env
            .or("SURVIBE_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid SURVIBE_HOST: {e}"))?;

        let port: u16 = env
            .or("SURVIBE_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid SURVIBE_PORT: {e}"))?;

        let max_body_size: usize = env
            .or("SURVIBE_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid SURVIBE_MAX_BODY_SIZE: {e}"))?;

        let cors_origins: Vec<HeaderValue> = env
            .or("SURVIBE_CORS_ORIGINS", "")
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(|s| {
                HeaderValue::from_str(s.trim())
                    .map_err(|e| format!("Invalid SURVIBE_CORS_ORIGINS entry '{s}': {e}"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let static_dir = env
            .optional("SURVIBE_STATIC_DIR")
            .map(PathBuf::from);

        let log_level = env.or("SURVIBE_LOG_LEVEL", "info");

        let mail = MailConfig {
            host: env.or("EMAIL_HOST", "localhost"),
            port: match env.optional("EMAIL_PORT") {
                Some(port) => port
                    .parse()
                    .map_err(|e| format!("Invalid EMAIL_PORT: {e}"))?,
                None => DEFAULT_MAIL_PORT,
            },
            secure: env.optional("EMAIL_SECURE").as_deref() == Some("true"),
            user: env.optional("EMAIL_USER"),
            pass: env.optional("EMAIL_PASS"),
            from: env.or("EMAIL_FROM", DEFAULT_MAIL_FROM),
            to: env.or("EMAIL_TO", DEFAULT_MAIL_TO),
        };

        Ok(Config {
            database_url,
            host,
            port,
            max_body_size,
            cors_origins,
            static_dir,
            log_level,
            mail,
        })
    }
}

struct Env<F> {
    lookup: F,
}

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    // Blank values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|v| !v.trim().is_empty())
    }

    fn required(&self, key: &str) -> Result<String, String> {
        self.optional(key)
            .ok_or_else(|| format!("Missing required environment variable: {key}"))
    }

    fn or(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}
