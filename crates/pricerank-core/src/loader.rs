//! CSV price-series loading.
//!
//! Expected layout, header required:
//!
//! ```text
//! symbol,timestamp,price
//! BTC,1641038400000,46813.21
//! ```
//!
//! `timestamp` is milliseconds since the Unix epoch, `price` a decimal
//! literal. Any malformed row fails the whole load.

use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;
use time::UtcOffset;
use tracing::debug;

use crate::{PriceError, PriceRecord, PriceSource, PriceTime, Symbol};

#[derive(Debug, Deserialize)]
struct RawRow<'a> {
    symbol: &'a str,
    timestamp: &'a str,
    price: &'a str,
}

/// Reads a symbol's series from a [`PriceSource`] into [`PriceRecord`]s.
#[derive(Debug, Clone, Copy)]
pub struct CsvLoader {
    offset: UtcOffset,
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self::new(UtcOffset::UTC)
    }
}

impl CsvLoader {
    /// Timestamps are presented in `offset`; calendar-date filtering
    /// follows it.
    pub const fn new(offset: UtcOffset) -> Self {
        Self { offset }
    }

    pub const fn offset(&self) -> UtcOffset {
        self.offset
    }

    /// Load every record for `symbol` in file order.
    pub fn load<S>(&self, source: &S, symbol: &Symbol) -> Result<Vec<PriceRecord>, PriceError>
    where
        S: PriceSource + ?Sized,
    {
        let bytes = source.read(symbol)?;
        let records = self.parse(symbol, &bytes)?;
        debug!(%symbol, count = records.len(), "loaded price series");
        Ok(records)
    }

    /// Parse raw CSV bytes belonging to `symbol`.
    pub fn parse(&self, symbol: &Symbol, bytes: &[u8]) -> Result<Vec<PriceRecord>, PriceError> {
        let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(bytes);

        let headers = reader
            .headers()
            .map_err(|error| parse_error(symbol, 1, error.to_string()))?
            .clone();

        let mut records = Vec::new();
        let mut record = StringRecord::new();
        loop {
            let more = reader.read_record(&mut record).map_err(|error| {
                let line = error.position().map_or(0, |position| position.line());
                parse_error(symbol, line, error.to_string())
            })?;
            if !more {
                break;
            }

            let line = record.position().map_or(0, |position| position.line());
            let row: RawRow<'_> = record
                .deserialize(Some(&headers))
                .map_err(|error| parse_error(symbol, line, error.to_string()))?;
            records.push(self.convert(symbol, line, &row)?);
        }

        Ok(records)
    }

    fn convert(
        &self,
        symbol: &Symbol,
        line: u64,
        row: &RawRow<'_>,
    ) -> Result<PriceRecord, PriceError> {
        let row_symbol =
            Symbol::parse(row.symbol).map_err(|error| parse_error(symbol, line, error.to_string()))?;
        if &row_symbol != symbol {
            return Err(parse_error(
                symbol,
                line,
                format!("row symbol '{row_symbol}' does not match series '{symbol}'"),
            ));
        }

        let millis = i64::from_str(row.timestamp).map_err(|_| {
            parse_error(
                symbol,
                line,
                format!("timestamp '{}' is not integer epoch milliseconds", row.timestamp),
            )
        })?;
        let timestamp = PriceTime::from_unix_millis(millis, self.offset)
            .map_err(|error| parse_error(symbol, line, error.to_string()))?;

        let price = Decimal::from_str_exact(row.price).map_err(|_| {
            parse_error(
                symbol,
                line,
                format!("price '{}' is not a decimal literal", row.price),
            )
        })?;

        Ok(PriceRecord::new(row_symbol, timestamp, price))
    }
}

fn parse_error(symbol: &Symbol, line: u64, reason: String) -> PriceError {
    PriceError::Parse {
        symbol: symbol.to_string(),
        line,
        reason,
    }
}
