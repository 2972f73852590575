//! # Pricerank Core
//!
//! Price-series aggregation for the pricerank service.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`domain`] | Domain models (`PriceRecord`, `NormalizedRange`, `Symbol`, `PriceTime`) |
//! | [`source`] | `PriceSource` / `SymbolCatalog` contracts and file-system / in-memory stores |
//! | [`loader`] | CSV series loader |
//! | [`aggregate`] | Min/max/oldest/newest reducers, date and period filters |
//! | [`normalize`] | `(max - min) / min` with fixed-scale ceiling rounding |
//! | [`ranking`] | Cross-symbol ranking and best-of-day selection |
//! | [`service`] | `PriceService` query facade |
//! | [`error`] | Core error types |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use pricerank_core::{CsvLoader, FsPriceStore, PriceService, RangeScale, Symbol};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let service = PriceService::new(
//!     Arc::new(FsPriceStore::new("prices")),
//!     CsvLoader::default(),
//!     RangeScale::default(),
//! );
//!
//! let btc = Symbol::parse("btc")?;
//! let cheapest = service.get_min_price(&btc)?;
//! println!("{} low: {} at {}", cheapest.symbol, cheapest.price, cheapest.timestamp);
//!
//! for entry in service.get_all_ranked()? {
//!     println!("{}: {}", entry.symbol, entry.normalized_range);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Single-symbol operations fail on the first [`PriceError`]. Whole-series
//! ranking skips symbols that fail and logs them instead.
//!
//! ```rust
//! use pricerank_core::PriceError;
//!
//! fn is_client_error(error: &PriceError) -> bool {
//!     matches!(
//!         error,
//!         PriceError::NotFound { .. }
//!             | PriceError::Validation(_)
//!             | PriceError::InvalidRange { .. }
//!     )
//! }
//! # let _ = is_client_error;
//! ```

pub mod aggregate;
pub mod domain;
pub mod error;
pub mod loader;
pub mod normalize;
pub mod ranking;
pub mod service;
pub mod source;

pub use domain::{parse_date, parse_offset, NormalizedRange, PriceRecord, PriceTime, Symbol};
pub use error::{PriceError, ValidationError};
pub use loader::CsvLoader;
pub use normalize::{normalized_range, RangeScale, DEFAULT_SCALE, MAX_SCALE};
pub use ranking::RankingEngine;
pub use service::PriceService;
pub use source::{FsPriceStore, MemoryPriceStore, PriceSource, PriceStore, SymbolCatalog};
