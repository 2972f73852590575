//! Reductions and filters over a loaded price series.
//!
//! Inputs are never assumed sorted. On ties every reducer keeps the
//! record encountered first in sequence order.

use time::Date;

use crate::{PriceError, PriceRecord, PriceTime};

/// Record with the lowest price.
pub fn min_price(records: &[PriceRecord]) -> Result<&PriceRecord, PriceError> {
    first_by(records, |candidate, best| candidate.price < best.price)
}

/// Record with the highest price.
pub fn max_price(records: &[PriceRecord]) -> Result<&PriceRecord, PriceError> {
    first_by(records, |candidate, best| candidate.price > best.price)
}

/// Record with the earliest timestamp.
pub fn oldest(records: &[PriceRecord]) -> Result<&PriceRecord, PriceError> {
    first_by(records, |candidate, best| candidate.timestamp < best.timestamp)
}

/// Record with the latest timestamp.
pub fn newest(records: &[PriceRecord]) -> Result<&PriceRecord, PriceError> {
    first_by(records, |candidate, best| candidate.timestamp > best.timestamp)
}

/// Records whose timestamp falls on `date` in the timestamp's own offset.
pub fn filter_by_date(records: &[PriceRecord], date: Date) -> Vec<PriceRecord> {
    records
        .iter()
        .filter(|record| record.timestamp.date() == date)
        .cloned()
        .collect()
}

/// Records with `from <= timestamp <= to`. An empty result is not an error.
pub fn filter_by_range(records: &[PriceRecord], from: PriceTime, to: PriceTime) -> Vec<PriceRecord> {
    records
        .iter()
        .filter(|record| from <= record.timestamp && record.timestamp <= to)
        .cloned()
        .collect()
}

/// Lowest and highest priced records of a series.
pub fn min_max(records: &[PriceRecord]) -> Result<(&PriceRecord, &PriceRecord), PriceError> {
    Ok((min_price(records)?, max_price(records)?))
}

// `replaces` must be strict so that the earlier record survives a tie.
fn first_by<F>(records: &[PriceRecord], replaces: F) -> Result<&PriceRecord, PriceError>
where
    F: Fn(&PriceRecord, &PriceRecord) -> bool,
{
    let mut iter = records.iter();
    let first = iter.next().ok_or(PriceError::EmptySet)?;
    Ok(iter.fold(first, |best, candidate| {
        if replaces(candidate, best) {
            candidate
        } else {
            best
        }
    }))
}
