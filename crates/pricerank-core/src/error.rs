use std::path::PathBuf;

use rust_decimal::Decimal;
use thiserror::Error;
use time::Date;

use crate::PriceTime;

/// Validation errors for values crossing the API boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("timestamp {value} ms is outside the supported range")]
    TimestampOutOfRange { value: i64 },
    #[error("datetime must be RFC3339 or YYYY-MM-DDTHH:MM[:SS]: '{value}'")]
    InvalidDateTime { value: String },
    #[error("date must be YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },
    #[error("utc offset must look like +HH:MM: '{value}'")]
    InvalidOffset { value: String },

    #[error("decimal scale {scale} exceeds max {max}")]
    ScaleTooLarge { scale: u32, max: u32 },
}

/// Errors raised while loading or aggregating price series.
#[derive(Debug, Error)]
pub enum PriceError {
    #[error("no price data for symbol '{symbol}'")]
    NotFound { symbol: String },

    #[error("malformed price data for '{symbol}' at line {line}: {reason}")]
    Parse {
        symbol: String,
        line: u64,
        reason: String,
    },

    #[error("cannot reduce an empty price set")]
    EmptySet,

    #[error("normalized range is undefined for a zero minimum price")]
    DivisionByZero,

    #[error("normalized range of {max} over {min} does not fit a decimal")]
    RangeOverflow { max: Decimal, min: Decimal },

    #[error("no symbol has price data on {date}")]
    NoDataForDate { date: Date },

    #[error("period start {from} is after period end {to}")]
    InvalidRange { from: PriceTime, to: PriceTime },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PriceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
