//! Shared fixtures for the behavior tests.

use std::fs;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
pub use pricerank_core::{
    CsvLoader, FsPriceStore, MemoryPriceStore, PriceError, PriceService, PriceTime, RangeScale,
    Symbol,
};
use pricerank_web::{create_router, AppState, RequestThrottle};
use tempfile::TempDir;
use time::UtcOffset;

/// Directory holding BTC, ETH, XRP and a malformed DOGE series.
pub fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join("prices")
}

pub fn symbol(value: &str) -> Symbol {
    Symbol::parse(value).expect("valid symbol")
}

pub fn at(input: &str) -> PriceTime {
    PriceTime::parse(input, UtcOffset::UTC).expect("valid datetime")
}

pub fn fixture_service() -> PriceService {
    service_over(fixture_dir())
}

pub fn service_over(dir: impl Into<PathBuf>) -> PriceService {
    PriceService::new(
        Arc::new(FsPriceStore::new(dir)),
        CsvLoader::default(),
        RangeScale::default(),
    )
}

/// Scratch data directory populated with `(symbol, csv)` pairs.
pub fn scratch_dir(series: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    for (name, csv) in series {
        fs::write(dir.path().join(format!("{name}_values.csv")), csv).expect("write series");
    }
    dir
}

pub fn router(service: PriceService, limit: u32) -> Router {
    let throttle = RequestThrottle::new(
        Duration::from_secs(60),
        NonZeroU32::new(limit).expect("non-zero limit"),
    );
    create_router(AppState::new(service), throttle)
}
