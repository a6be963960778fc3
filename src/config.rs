use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const BIND_ADDR_VAR: &str = "CINESYNTH_BIND_ADDR";
pub const OUTPUT_DIR_VAR: &str = "CINESYNTH_OUTPUT_DIR";
pub const SEED_VAR: &str = "CINESYNTH_SEED";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3147";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpConfig {
    pub output_dir: PathBuf,
    pub seed: Option<u64>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let raw = non_empty(lookup(BIND_ADDR_VAR)).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw
            .parse()
            .with_context(|| format!("{} is not a socket address: {}", BIND_ADDR_VAR, raw))?;
        Ok(Self { bind_addr })
    }
}

impl DumpConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let output_dir = non_empty(lookup(OUTPUT_DIR_VAR))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let seed = match non_empty(lookup(SEED_VAR)) {
            Some(raw) => Some(
                raw.parse::<u64>()
                    .with_context(|| format!("{} must be an unsigned integer: {}", SEED_VAR, raw))?,
            ),
            None => None,
        };
        Ok(Self { output_dir, seed })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
