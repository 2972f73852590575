//! Cross-symbol normalized-range ranking.
//!
//! Whole-series ranking is best effort: a symbol whose series cannot be
//! loaded or reduced is logged and left out. Only a failure to enumerate
//! the catalog fails the ranking itself.

use std::cmp::Ordering;

use time::Date;
use tracing::{debug, warn};

use crate::aggregate::{filter_by_date, min_max};
use crate::normalize::{normalized_range, RangeScale};
use crate::{CsvLoader, NormalizedRange, PriceError, PriceRecord, PriceStore, Symbol};

/// Computes normalized ranges across every symbol of a [`PriceStore`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RankingEngine {
    loader: CsvLoader,
    scale: RangeScale,
}

impl RankingEngine {
    pub const fn new(loader: CsvLoader, scale: RangeScale) -> Self {
        Self { loader, scale }
    }

    /// Every rankable symbol ordered by normalized range, highest first.
    /// Equal ranges are ordered by symbol; none are dropped.
    pub fn all_ranked<S>(&self, store: &S) -> Result<Vec<NormalizedRange>, PriceError>
    where
        S: PriceStore + ?Sized,
    {
        let mut ranked = Vec::new();
        for symbol in store.list_symbols()? {
            match self.whole_series_range(store, &symbol) {
                Ok(range) => ranked.push(range),
                Err(error) => warn!(%symbol, %error, "skipping symbol in ranking"),
            }
        }

        ranked.sort_by(descending_then_symbol);
        Ok(ranked)
    }

    /// Symbol with the highest normalized range over `date` alone.
    pub fn best_for_date<S>(&self, store: &S, date: Date) -> Result<NormalizedRange, PriceError>
    where
        S: PriceStore + ?Sized,
    {
        let mut best: Option<NormalizedRange> = None;
        for symbol in store.list_symbols()? {
            let range = match self.day_range(store, &symbol, date) {
                Ok(range) => range,
                Err(error) => {
                    debug!(%symbol, %date, %error, "no daily range for symbol");
                    continue;
                }
            };

            let replaces = best
                .as_ref()
                .map_or(true, |current| descending_then_symbol(&range, current) == Ordering::Less);
            if replaces {
                best = Some(range);
            }
        }

        best.ok_or(PriceError::NoDataForDate { date })
    }

    /// Normalized range of one symbol's whole series.
    pub fn whole_series_range<S>(
        &self,
        store: &S,
        symbol: &Symbol,
    ) -> Result<NormalizedRange, PriceError>
    where
        S: PriceStore + ?Sized,
    {
        let records = self.loader.load(store, symbol)?;
        self.range_of(symbol, &records)
    }

    fn day_range<S>(
        &self,
        store: &S,
        symbol: &Symbol,
        date: Date,
    ) -> Result<NormalizedRange, PriceError>
    where
        S: PriceStore + ?Sized,
    {
        let records = self.loader.load(store, symbol)?;
        self.range_of(symbol, &filter_by_date(&records, date))
    }

    fn range_of(
        &self,
        symbol: &Symbol,
        records: &[PriceRecord],
    ) -> Result<NormalizedRange, PriceError> {
        let (low, high) = min_max(records)?;
        let value = normalized_range(high.price, low.price, self.scale)?;
        Ok(NormalizedRange::new(symbol.clone(), value))
    }
}

fn descending_then_symbol(left: &NormalizedRange, right: &NormalizedRange) -> Ordering {
    right
        .normalized_range
        .cmp(&left.normalized_range)
        .then_with(|| left.symbol.cmp(&right.symbol))
}
