//! Process configuration read from environment variables.

use std::net::SocketAddr;

use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEV_JWT_SECRET: &str = "dev-secret";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value:?}")]
    InvalidAddr { var: &'static str, value: String },

    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("TRIAD_APPS names unknown app {0:?} (expected fyyur, trivia or coffee)")]
    UnknownApp(String),

    #[error("TRIAD_APPS must enable at least one app")]
    NoApps,
}

/// One of the three mountable applications.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AppKind {
    Fyyur,
    Trivia,
    Coffee,
}

impl AppKind {
    pub const ALL: [AppKind; 3] = [AppKind::Fyyur, AppKind::Trivia, AppKind::Coffee];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fyyur => "fyyur",
            Self::Trivia => "trivia",
            Self::Coffee => "coffee",
        }
    }
}

impl core::str::FromStr for AppKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fyyur" => Ok(Self::Fyyur),
            "trivia" => Ok(Self::Trivia),
            "coffee" => Ok(Self::Coffee),
            other => Err(ConfigError::UnknownApp(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JwtConfig {
    pub secret: String,
    pub audience: Option<String>,
    pub issuer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// `None` runs every app on seeded in-memory stores.
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub apps: Vec<AppKind>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable source (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bind_raw = var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse().map_err(|_| ConfigError::InvalidAddr {
            var: "BIND_ADDR",
            value: bind_raw.clone(),
        })?;

        let database = match var("DATABASE_URL") {
            Some(url) => {
                let max_connections = match var("DATABASE_MAX_CONNECTIONS") {
                    Some(raw) => raw
                        .trim()
                        .parse::<u32>()
                        .ok()
                        .filter(|n| *n > 0)
                        .ok_or(ConfigError::InvalidNumber {
                            var: "DATABASE_MAX_CONNECTIONS",
                            value: raw,
                        })?,
                    None => DEFAULT_MAX_CONNECTIONS,
                };
                Some(DatabaseConfig { url, max_connections })
            }
            None => None,
        };

        let secret = var("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            DEV_JWT_SECRET.to_string()
        });
        let jwt = JwtConfig {
            secret,
            audience: var("JWT_AUDIENCE"),
            issuer: var("JWT_ISSUER"),
        };

        let apps = match var("TRIAD_APPS") {
            Some(raw) => parse_apps(&raw)?,
            None => AppKind::ALL.to_vec(),
        };

        Ok(Self {
            bind_addr,
            database,
            jwt,
            apps,
        })
    }
}

fn parse_apps(raw: &str) -> Result<Vec<AppKind>, ConfigError> {
    let mut apps = Vec::new();
    for name in raw.split(',').filter(|s| !s.trim().is_empty()) {
        let app: AppKind = name.parse()?;
        if !apps.contains(&app) {
            apps.push(app);
        }
    }
    if apps.is_empty() {
        return Err(ConfigError::NoApps);
    }
    Ok(apps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_run_everything_in_memory() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(cfg.database, None);
        assert_eq!(cfg.jwt.secret, "dev-secret");
        assert_eq!(cfg.apps, AppKind::ALL.to_vec());
    }

    #[test]
    fn database_and_apps_are_read() {
        let cfg = config(&[
            ("DATABASE_URL", "postgres://localhost/triad"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("TRIAD_APPS", "trivia, Coffee,trivia"),
            ("JWT_AUDIENCE", "coffee"),
        ])
        .unwrap();
        let db = cfg.database.clone().unwrap();
        assert_eq!(db.max_connections, 12);
        assert_eq!(cfg.apps, vec![AppKind::Trivia, AppKind::Coffee]);
        assert!(!cfg.apps.contains(&AppKind::Fyyur));
        assert_eq!(cfg.jwt.audience.as_deref(), Some("coffee"));
    }

    #[test]
    fn invalid_values_are_reported() {
        assert!(matches!(config(&[("BIND_ADDR", "nowhere")]), Err(ConfigError::InvalidAddr { .. })));
        assert!(matches!(
            config(&[("DATABASE_URL", "postgres://x"), ("DATABASE_MAX_CONNECTIONS", "0")]),
            Err(ConfigError::InvalidNumber { .. })
        ));
        assert_eq!(config(&[("TRIAD_APPS", "tea")]), Err(ConfigError::UnknownApp("tea".to_string())));
        assert_eq!(config(&[("TRIAD_APPS", " , ")]), Err(ConfigError::NoApps));
    }
}
