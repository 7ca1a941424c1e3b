use anyhow::{bail, Context, Result};

use crate::analysis::resources::DEFAULT_RESOURCES_PER_GAP;

/// Application configuration loaded from environment variables.
/// Startup fails if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string. Unset means an in-memory store.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub port: u16,
    pub rust_log: String,
    /// How many learning resources to recommend per gap skill.
    pub resources_per_gap: usize,
    /// Load the sample catalog at startup.
    pub seed_catalog: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let resources_per_gap = parse_resource_cap(optional_env("RESOURCES_PER_GAP").as_deref())?;

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            db_max_connections: optional_env("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "10".to_string())
                .parse::<u32>()
                .context("DB_MAX_CONNECTIONS must be a positive integer")?,
            port: optional_env("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            resources_per_gap,
            seed_catalog: parse_flag(optional_env("SEED_CATALOG").as_deref())?,
        })
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Config {
            database_url: None,
            db_max_connections: 1,
            port: 0,
            rust_log: "debug".to_string(),
            resources_per_gap: DEFAULT_RESOURCES_PER_GAP,
            seed_catalog: true,
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_resource_cap(value: Option<&str>) -> Result<usize> {
    let Some(raw) = value else {
        return Ok(DEFAULT_RESOURCES_PER_GAP);
    };
    let cap = raw
        .trim()
        .parse::<usize>()
        .context("RESOURCES_PER_GAP must be a positive integer")?;
    if cap == 0 {
        bail!("RESOURCES_PER_GAP must be at least 1");
    }
    Ok(cap)
}

fn parse_flag(value: Option<&str>) -> Result<bool> {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None | Some("0") | Some("false") | Some("no") => Ok(false),
        Some("1") | Some("true") | Some("yes") => Ok(true),
        Some(other) => bail!("SEED_CATALOG must be true or false, got '{other}'"),
    }
}
