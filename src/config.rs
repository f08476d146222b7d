use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::{Context, Result};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://todos.db";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Storage {
    Memory,
    Sqlite(String),
}

impl Storage {
    pub fn from_url(url: &str) -> Self {
        match url {
            "memory:" | "memory://" => Storage::Memory,
            _ => Storage::Sqlite(url.to_string()),
        }
    }
}

/// Process configuration, read once at start-up after `.env` is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub storage: Storage,
    pub addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let storage = Storage::from_url(&lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()));
        let host = match lookup("TODO_API_HOST") {
            Some(raw) => raw.parse::<IpAddr>().with_context(|| format!("TODO_API_HOST={raw:?} is not an IP address"))?,
            None => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };
        let port = match lookup("TODO_API_PORT") {
            Some(raw) => raw.parse::<u16>().with_context(|| format!("TODO_API_PORT={raw:?} is not a port number"))?,
            None => DEFAULT_PORT,
        };
        Ok(Self { storage, addr: SocketAddr::new(host, port) })
    }
}
