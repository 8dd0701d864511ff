use std::net::{Ipv4Addr, SocketAddr};

use thiserror::Error;

use crate::models::{DEFAULT_COLLEAGUES, DEFAULT_WIN_THRESHOLD};

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} is not in the correct format: {1}")]
    Invalid(&'static str, String),

    #[error("unknown STORE_BACKEND '{0}', expected 'memory' or 'sqlite'")]
    UnknownBackend(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Sqlite { database_url: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub backend: StoreBackend,
    pub win_threshold: i64,
    pub colleagues: Vec<String>,
}

impl Config {
    /// Read from the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host: Ipv4Addr = parse_or(&lookup, "HOST", Ipv4Addr::UNSPECIFIED)?;
        let port: u16 = parse_or(&lookup, "PORT", 3000)?;

        let backend = match lookup("STORE_BACKEND").as_deref().map(str::trim) {
            None | Some("") | Some("memory") => StoreBackend::Memory,
            Some("sqlite") => StoreBackend::Sqlite {
                database_url: lookup("DATABASE_URL")
                    .unwrap_or_else(|| "sqlite://leaderboard.db".to_string()),
            },
            Some(other) => return Err(ConfigError::UnknownBackend(other.to_string())),
        };

        let win_threshold: i64 = parse_or(&lookup, "WIN_THRESHOLD", DEFAULT_WIN_THRESHOLD)?;
        if win_threshold < 1 {
            return Err(ConfigError::Invalid("WIN_THRESHOLD", win_threshold.to_string()));
        }

        let colleagues = match lookup("COLLEAGUES") {
            Some(raw) => {
                let names: Vec<String> = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .map(String::from)
                    .collect();
                if names.is_empty() {
                    return Err(ConfigError::Invalid("COLLEAGUES", raw));
                }
                names
            }
            None => DEFAULT_COLLEAGUES.iter().map(|n| n.to_string()).collect(),
        };

        Ok(Config {
            addr: SocketAddr::from((host, port)),
            backend,
            win_threshold,
            colleagues,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(key, raw)),
        None => Ok(default),
    }
}
