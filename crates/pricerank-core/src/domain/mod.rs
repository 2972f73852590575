//! # Domain Models
//!
//! | Type | Description |
//! |------|-------------|
//! | [`PriceRecord`] | One `{symbol, timestamp, price}` observation |
//! | [`NormalizedRange`] | `(max - min) / min` for a symbol over a scope |
//! | [`Symbol`] | Validated, upper-cased asset identifier |
//! | [`PriceTime`] | Observation instant in the deployment's UTC offset |
//!
//! Prices are [`rust_decimal::Decimal`] so that comparisons and the
//! normalized-range division never go through binary floating point.

mod models;
mod symbol;
mod timestamp;

pub use models::{NormalizedRange, PriceRecord};
pub use symbol::Symbol;
pub use timestamp::{parse_date, parse_offset, PriceTime};
