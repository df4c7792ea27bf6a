use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, bail};

/// Placeholder JWT secrets that MUST NOT be used.
const PLACEHOLDER_SECRETS: &[&str] = &[
    "change-me-to-a-random-string",
    "dev-secret-change-me",
];

#[derive(Debug)]
pub struct Config {
    pub db_path: PathBuf,
    pub addr: SocketAddr,
    pub jwt_secret: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let jwt_secret = lookup("HELPDESK_JWT_SECRET").unwrap_or_default();
        if jwt_secret.is_empty() || PLACEHOLDER_SECRETS.contains(&jwt_secret.as_str()) {
            bail!("HELPDESK_JWT_SECRET is unset or still a placeholder; it must match the dashboard login service");
        }

        let db_path = lookup("HELPDESK_DB_PATH").unwrap_or_else(|| "helpdesk.db".into());
        let host = lookup("HELPDESK_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = lookup("HELPDESK_PORT")
            .unwrap_or_else(|| "3000".into())
            .parse()
            .context("HELPDESK_PORT must be a port number")?;

        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", host, port))?;

        Ok(Self {
            db_path: db_path.into(),
            addr,
            jwt_secret,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[("HELPDESK_JWT_SECRET", "s3cret")]).unwrap();
        assert_eq!(cfg.db_path, PathBuf::from("helpdesk.db"));
        assert_eq!(cfg.addr, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(cfg.jwt_secret, "s3cret");
    }

    #[test]
    fn overrides() {
        let cfg = config(&[
            ("HELPDESK_JWT_SECRET", "s3cret"),
            ("HELPDESK_DB_PATH", "/var/lib/helpdesk/data.db"),
            ("HELPDESK_HOST", "127.0.0.1"),
            ("HELPDESK_PORT", "8080"),
        ])
        .unwrap();
        assert_eq!(cfg.db_path, PathBuf::from("/var/lib/helpdesk/data.db"));
        assert_eq!(cfg.addr, "127.0.0.1:8080".parse().unwrap());
    }

    #[test]
    fn rejects_placeholder_or_missing_secret() {
        assert!(config(&[]).is_err());
        assert!(config(&[("HELPDESK_JWT_SECRET", "dev-secret-change-me")]).is_err());
    }

    #[test]
    fn rejects_bad_port() {
        let err = config(&[("HELPDESK_JWT_SECRET", "s3cret"), ("HELPDESK_PORT", "http")]).unwrap_err();
        assert!(err.to_string().contains("HELPDESK_PORT"));
    }
}
