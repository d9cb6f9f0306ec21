//! Money conversion and validation helpers using rust_decimal for precision
//!
//! Amounts are stored as `f64` on the entities and converted to `Decimal`
//! for every calculation, then back to `f64` for storage/serialization.

use crate::error::{AppError, AppResult};
use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed amount per task, sub-task or withdrawal
pub const MAX_AMOUNT: f64 = 1_000_000.0;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Sum a sequence of f64 amounts with precise arithmetic
pub fn sum_amounts<I: IntoIterator<Item = f64>>(amounts: I) -> f64 {
    let total: Decimal = amounts.into_iter().map(to_decimal).sum();
    to_f64(total)
}

/// Validate that a value is a finite, non-negative amount within bounds
pub fn validate_amount(value: f64, field: &str) -> AppResult<()> {
    if !value.is_finite() {
        return Err(AppError::validation(format!(
            "{} must be a finite number, got {}",
            field, value
        )));
    }
    if value < 0.0 {
        return Err(AppError::validation(format!(
            "{} must be non-negative, got {}",
            field, value
        )));
    }
    if value > MAX_AMOUNT {
        return Err(AppError::validation(format!(
            "{} exceeds maximum allowed ({}), got {}",
            field, MAX_AMOUNT, value
        )));
    }
    Ok(())
}

/// Validate that a value is a finite, strictly positive amount within bounds
pub fn validate_positive_amount(value: f64, field: &str) -> AppResult<()> {
    validate_amount(value, field)?;
    if value <= 0.0 {
        return Err(AppError::validation(format!(
            "{} must be positive, got {}",
            field, value
        )));
    }
    Ok(())
}
