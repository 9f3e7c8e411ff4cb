use anyhow::{Context, Result};
use std::env;

/// All configuration the service recognizes, read from the environment
/// once at startup. Anything missing or malformed fails the process
/// before the listener binds.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub groq: GroqConfig,
    pub smtp: SmtpConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct GroqConfig {
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    /// Implicit TLS (port 465 style) when true, STARTTLS otherwise.
    pub secure: bool,
    pub user: String,
    pub pass: String,
    pub from_email: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let user = required("SMTP_USER")?;
        let from_email = optional("FROM_EMAIL").unwrap_or_else(|| user.clone());

        Ok(Self {
            server: ServerConfig {
                port: parse_port("PORT", 3000)?,
            },
            groq: GroqConfig {
                api_key: required("GROQ_API_KEY")?,
            },
            smtp: SmtpConfig {
                host: required("SMTP_HOST")?,
                port: parse_port("SMTP_PORT", 587)?,
                secure: flag_is_true(optional("SMTP_SECURE").as_deref()),
                user,
                pass: required("SMTP_PASS")?,
                from_email,
            },
        })
    }
}

fn required(name: &str) -> Result<String> {
    optional(name).with_context(|| format!("Missing required environment variable {}", name))
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

fn parse_port(name: &str, default: u16) -> Result<u16> {
    match optional(name) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("{} must be a port number, got {:?}", name, raw)),
        None => Ok(default),
    }
}

/// Only the literal string "true" enables a flag.
fn flag_is_true(value: Option<&str>) -> bool {
    value == Some("true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_parses_only_literal_true() {
        assert!(flag_is_true(Some("true")));
        assert!(!flag_is_true(Some("TRUE")));
        assert!(!flag_is_true(Some("1")));
        assert!(!flag_is_true(Some("yes")));
        assert!(!flag_is_true(None));
    }
}
