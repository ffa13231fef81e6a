use super::parser::RawCell;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::str::FromStr;

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Stringifies an identifier cell the way a numeric-to-text conversion would,
/// so a float id reads `123456.0` before canonicalization strips the suffix.
pub(crate) fn identifier_text(cell: &RawCell) -> String {
    match cell {
        RawCell::Empty => "nan".to_string(),
        RawCell::Text(value) => value.clone(),
        RawCell::Int(value) => value.to_string(),
        RawCell::Float(value) => float_text(*value),
        RawCell::Bool(true) => "True".to_string(),
        RawCell::Bool(false) => "False".to_string(),
        RawCell::DateTime(value) => value.to_string(),
    }
}

/// Shortest round-trip form, with the exponent signed and padded to two
/// digits (`1e+16`, `1.5e-07`).
fn float_text(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }

    let text = format!("{value:?}");
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => text,
    }
}

pub(crate) fn install_datetime(cell: &RawCell) -> Option<NaiveDateTime> {
    match cell {
        RawCell::DateTime(value) => Some(*value),
        RawCell::Text(value) => parse_datetime(value),
        _ => None,
    }
}

pub(crate) fn monthly_fee(cell: &RawCell) -> Option<Decimal> {
    match cell {
        RawCell::Int(value) => Some(Decimal::from(*value)),
        RawCell::Float(value) => Decimal::try_from(*value).ok(),
        RawCell::Text(value) => Decimal::from_str(value.trim()).ok(),
        _ => None,
    }
}

/// Remaining discount months; anything unusable collapses to zero.
pub(crate) fn discount_months(cell: Option<&RawCell>) -> f64 {
    let value = match cell {
        Some(RawCell::Int(value)) => *value as f64,
        Some(RawCell::Float(value)) => *value,
        Some(RawCell::Bool(value)) => f64::from(u8::from(*value)),
        Some(RawCell::Text(value)) => value.trim().parse::<f64>().unwrap_or(0.0),
        Some(RawCell::Empty) | Some(RawCell::DateTime(_)) | None => 0.0,
    };

    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_local());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
