use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{PriceTime, Symbol};

/// One price observation for a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub symbol: Symbol,
    pub timestamp: PriceTime,
    pub price: Decimal,
}

impl PriceRecord {
    pub fn new(symbol: Symbol, timestamp: PriceTime, price: Decimal) -> Self {
        Self {
            symbol,
            timestamp,
            price,
        }
    }
}

/// `(max - min) / min` of a symbol's prices over some scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRange {
    pub symbol: Symbol,
    pub normalized_range: Decimal,
}

impl NormalizedRange {
    pub fn new(symbol: Symbol, normalized_range: Decimal) -> Self {
        Self {
            symbol,
            normalized_range,
        }
    }
}
