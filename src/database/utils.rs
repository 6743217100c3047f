use bigdecimal::{BigDecimal, RoundingMode};
use chrono::NaiveDate;
use std::str::FromStr;

use crate::error::AppError;

/// Scale carried by every stored rate and amount.
pub const MONEY_SCALE: i64 = 2;

/// Parse a `d/M/yyyy` date; ISO `yyyy-mm-dd` is accepted as well.
pub fn parse_date(text: &str, field: &str) -> Result<NaiveDate, AppError> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(text, "%Y-%m-%d"))
        .map_err(|_| AppError::bad_request(format!("Invalid {} date: '{}'", field, text)))
}

/// Parse a decimal amount written with either `,` or `.` as separator.
pub fn parse_amount(text: &str, field: &str) -> Result<BigDecimal, AppError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::bad_request(format!("{} cannot be empty", field)));
    }
    BigDecimal::from_str(&text.replace(',', "."))
        .map_err(|_| AppError::bad_request(format!("{} must be numeric", field)))
}

pub fn parse_non_negative(text: &str, field: &str) -> Result<BigDecimal, AppError> {
    let value = parse_amount(text, field)?;
    if value < BigDecimal::from(0) {
        return Err(AppError::bad_request(format!("{} must not be negative", field)));
    }
    Ok(value)
}

pub fn parse_positive(text: &str, field: &str) -> Result<BigDecimal, AppError> {
    let value = parse_amount(text, field)?;
    if value <= BigDecimal::from(0) {
        return Err(AppError::bad_request(format!("{} must be positive", field)));
    }
    Ok(value)
}

/// Stored rates are kept at scale 2, half-to-even.
pub fn to_stored_scale(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(MONEY_SCALE, RoundingMode::HalfEven)
}

/// Aggregate totals are rounded half-up.
pub fn round_total(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(MONEY_SCALE, RoundingMode::HalfUp)
}

pub fn format_amount(value: &BigDecimal) -> String {
    to_stored_scale(value).to_string().replace('.', ",")
}

/// Hours without trailing zeros: `8`, `2,5`.
pub fn format_hours(value: &BigDecimal) -> String {
    let text = to_stored_scale(value).to_string();
    let text = match text.contains('.') {
        true => text.trim_end_matches('0').trim_end_matches('.').to_string(),
        false => text,
    };
    text.replace('.', ",")
}
