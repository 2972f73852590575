use std::sync::Arc;

use time::{Date, UtcOffset};

use crate::aggregate::{filter_by_range, max_price, min_price, newest, oldest};
use crate::normalize::RangeScale;
use crate::{
    CsvLoader, NormalizedRange, PriceError, PriceRecord, PriceStore, PriceTime, RankingEngine,
    Symbol,
};

/// Query facade over a [`PriceStore`].
///
/// Every call re-reads the backing series; nothing is cached. Single-symbol
/// lookups fail on the first error, ranking is best effort (see
/// [`RankingEngine::all_ranked`]).
#[derive(Clone)]
pub struct PriceService {
    store: Arc<dyn PriceStore>,
    loader: CsvLoader,
    ranking: RankingEngine,
}

impl PriceService {
    pub fn new(store: Arc<dyn PriceStore>, loader: CsvLoader, scale: RangeScale) -> Self {
        Self {
            store,
            loader,
            ranking: RankingEngine::new(loader, scale),
        }
    }

    /// Offset in which timestamps are presented and calendar dates evaluated.
    pub fn offset(&self) -> UtcOffset {
        self.loader.offset()
    }

    pub fn get_all_prices(&self, symbol: &Symbol) -> Result<Vec<PriceRecord>, PriceError> {
        self.loader.load(self.store.as_ref(), symbol)
    }

    pub fn get_min_price(&self, symbol: &Symbol) -> Result<PriceRecord, PriceError> {
        let records = self.get_all_prices(symbol)?;
        min_price(&records).cloned()
    }

    pub fn get_max_price(&self, symbol: &Symbol) -> Result<PriceRecord, PriceError> {
        let records = self.get_all_prices(symbol)?;
        max_price(&records).cloned()
    }

    pub fn get_oldest_price(&self, symbol: &Symbol) -> Result<PriceRecord, PriceError> {
        let records = self.get_all_prices(symbol)?;
        oldest(&records).cloned()
    }

    pub fn get_newest_price(&self, symbol: &Symbol) -> Result<PriceRecord, PriceError> {
        let records = self.get_all_prices(symbol)?;
        newest(&records).cloned()
    }

    /// Records with `from <= timestamp <= to`, in file order.
    ///
    /// The window is checked before the series is looked up, so a reversed
    /// window fails with [`PriceError::InvalidRange`] even for an unknown
    /// symbol.
    pub fn get_all_prices_in_period(
        &self,
        symbol: &Symbol,
        from: PriceTime,
        to: PriceTime,
    ) -> Result<Vec<PriceRecord>, PriceError> {
        if from > to {
            return Err(PriceError::InvalidRange { from, to });
        }
        let records = self.get_all_prices(symbol)?;
        Ok(filter_by_range(&records, from, to))
    }

    pub fn get_all_ranked(&self) -> Result<Vec<NormalizedRange>, PriceError> {
        self.ranking.all_ranked(self.store.as_ref())
    }

    pub fn get_best_for_date(&self, date: Date) -> Result<NormalizedRange, PriceError> {
        self.ranking.best_for_date(self.store.as_ref(), date)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use time::macros::date;

    use super::*;
    use crate::MemoryPriceStore;

    const BTC_CSV: &str = "symbol,timestamp,price\n\
                           BTC,1641031200000,46813.21\n\
                           BTC,1641042000000,46979.61\n\
                           BTC,1641052800000,47143.98\n";

    fn service() -> PriceService {
        let store = MemoryPriceStore::new()
            .with_series(Symbol::parse("BTC").expect("symbol"), BTC_CSV)
            .with_series(Symbol::parse("EMPTY").expect("symbol"), "symbol,timestamp,price\n");
        PriceService::new(Arc::new(store), CsvLoader::default(), RangeScale::default())
    }

    fn sym(value: &str) -> Symbol {
        Symbol::parse(value).expect("symbol")
    }

    fn at(input: &str) -> PriceTime {
        PriceTime::parse(input, UtcOffset::UTC).expect("datetime")
    }

    #[test]
    fn single_symbol_queries() {
        let service = service();
        let btc = sym("BTC");

        assert_eq!(service.get_all_prices(&btc).expect("all").len(), 3);
        assert_eq!(service.get_min_price(&btc).expect("min").price, dec!(46813.21));
        assert_eq!(service.get_max_price(&btc).expect("max").price, dec!(47143.98));
        assert_eq!(
            service.get_oldest_price(&btc).expect("oldest").timestamp,
            at("2022-01-01T10:00:00")
        );
        assert_eq!(
            service.get_newest_price(&btc).expect("newest").timestamp,
            at("2022-01-01T16:00:00")
        );
    }

    #[test]
    fn period_query_is_inclusive_and_validated() {
        let service = service();
        let btc = sym("BTC");

        let period = service
            .get_all_prices_in_period(&btc, at("2022-01-01T12:00"), at("2022-01-01T16:30"))
            .expect("period");
        let prices: Vec<_> = period.iter().map(|r| r.price).collect();
        assert_eq!(prices, vec![dec!(46979.61), dec!(47143.98)]);

        let err = service
            .get_all_prices_in_period(&btc, at("2022-01-02T00:00"), at("2022-01-01T00:00"))
            .expect_err("reversed");
        assert!(matches!(err, PriceError::InvalidRange { .. }));
    }

    #[test]
    fn empty_series_reducers_fail_with_empty_set() {
        let service = service();
        let empty = sym("EMPTY");

        assert!(service.get_all_prices(&empty).expect("loads").is_empty());
        assert!(matches!(service.get_min_price(&empty), Err(PriceError::EmptySet)));
        assert!(matches!(service.get_newest_price(&empty), Err(PriceError::EmptySet)));
    }

    #[test]
    fn ranking_skips_empty_series_but_best_for_date_finds_btc() {
        let service = service();

        let ranked = service.get_all_ranked().expect("ranked");
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].symbol.as_str(), "BTC");

        let best = service.get_best_for_date(date!(2022 - 01 - 01)).expect("best");
        assert_eq!(best.normalized_range, dec!(0.00706575));
    }
}
