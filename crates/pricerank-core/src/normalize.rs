use rust_decimal::{Decimal, RoundingStrategy};

use crate::{PriceError, ValidationError};

/// Fractional digits kept in a normalized range unless configured otherwise.
pub const DEFAULT_SCALE: u32 = 8;

/// Largest scale a [`Decimal`] can represent.
pub const MAX_SCALE: u32 = 28;

/// Validated rounding scale for normalized ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeScale(u32);

impl RangeScale {
    pub fn new(scale: u32) -> Result<Self, ValidationError> {
        if scale > MAX_SCALE {
            return Err(ValidationError::ScaleTooLarge {
                scale,
                max: MAX_SCALE,
            });
        }
        Ok(Self(scale))
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for RangeScale {
    fn default() -> Self {
        Self(DEFAULT_SCALE)
    }
}

/// `(max - min) / min`, rounded toward positive infinity at `scale`.
pub fn normalized_range(max: Decimal, min: Decimal, scale: RangeScale) -> Result<Decimal, PriceError> {
    if min.is_zero() {
        return Err(PriceError::DivisionByZero);
    }

    let overflow = || PriceError::RangeOverflow { max, min };
    let ratio = max
        .checked_sub(min)
        .and_then(|spread| spread.checked_div(min))
        .ok_or_else(overflow)?;

    Ok(ratio.round_dp_with_strategy(scale.get(), RoundingStrategy::ToPositiveInfinity))
}
