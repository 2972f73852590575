//! Server configuration.
//!
//! | Option | Env | Default |
//! |--------|-----|---------|
//! | `--data-dir` | `PRICERANK_DATA_DIR` | `prices` |
//! | `--bind` | `PRICERANK_BIND` | `0.0.0.0:8080` |
//! | `--rate-limit` | `PRICERANK_RATE_LIMIT` | `4` |
//! | `--rate-window-secs` | `PRICERANK_RATE_WINDOW_SECS` | `60` |
//! | `--scale` | `PRICERANK_SCALE` | `8` |
//! | `--utc-offset` | `PRICERANK_UTC_OFFSET` | `+00:00` |

use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use pricerank_core::{parse_offset, RangeScale, ValidationError};
use thiserror::Error;
use time::UtcOffset;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("data directory {} does not exist or is not a directory", .0.display())]
    MissingDataDir(PathBuf),

    #[error("{name} must be greater than zero")]
    Zero { name: &'static str },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// HTTP API over per-symbol price CSV files.
#[derive(Debug, Clone, Parser)]
#[command(name = "pricerank", version, about = "Crypto price statistics over CSV series")]
pub struct ServerArgs {
    /// Directory holding `<SYMBOL>_values.csv` files.
    #[arg(long, env = "PRICERANK_DATA_DIR", default_value = "prices")]
    pub data_dir: PathBuf,

    #[arg(long, env = "PRICERANK_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Requests admitted per window across all clients.
    #[arg(long, env = "PRICERANK_RATE_LIMIT", default_value_t = 4)]
    pub rate_limit: u32,

    #[arg(long, env = "PRICERANK_RATE_WINDOW_SECS", default_value_t = 60)]
    pub rate_window_secs: u64,

    /// Decimal places of the normalized range.
    #[arg(long, env = "PRICERANK_SCALE", default_value_t = pricerank_core::DEFAULT_SCALE)]
    pub scale: u32,

    /// Offset used to present timestamps and to evaluate calendar dates.
    #[arg(long, env = "PRICERANK_UTC_OFFSET", default_value = "+00:00")]
    pub utc_offset: String,
}

/// Validated settings the server is built from.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub data_dir: PathBuf,
    pub bind: SocketAddr,
    pub rate_limit: NonZeroU32,
    pub rate_window: Duration,
    pub scale: RangeScale,
    pub offset: UtcOffset,
}

impl ServerConfig {
    /// Loads `.env` (if any), then parses flags and environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_args(ServerArgs::parse())
    }

    pub fn from_args(args: ServerArgs) -> Result<Self, ConfigError> {
        if !args.data_dir.is_dir() {
            return Err(ConfigError::MissingDataDir(args.data_dir));
        }
        let rate_limit =
            NonZeroU32::new(args.rate_limit).ok_or(ConfigError::Zero { name: "rate limit" })?;
        if args.rate_window_secs == 0 {
            return Err(ConfigError::Zero {
                name: "rate window",
            });
        }

        Ok(Self {
            data_dir: args.data_dir,
            bind: args.bind,
            rate_limit,
            rate_window: Duration::from_secs(args.rate_window_secs),
            scale: RangeScale::new(args.scale)?,
            offset: parse_offset(&args.utc_offset)?,
        })
    }
}
