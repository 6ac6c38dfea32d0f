//! Feature Engineering - transaction record to model input
//!
//! **The column order in `FEATURE_LAYOUT` is the order the scaler was fitted on.**
//! Changing it silently breaks every deployed artifact pair.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::models::TransactionRecord;

// ============================================================================
// FEATURE LAYOUT
// ============================================================================

/// Feature names in the exact order they appear in the vector.
/// These are the training DataFrame's column names, which a fitted scaler
/// records as its feature names.
pub const FEATURE_LAYOUT: &[&str] = &[
    "Nominal yang Dibayarkan", // 0: amount paid
    "DPP",                     // 1: tax base
    "PPM",                     // 2: second levy
    "Biaya Administrasi",      // 3: amount paid - (DPP + PPM)
];

/// Must match FEATURE_LAYOUT.len()
pub const FEATURE_COUNT: usize = 4;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

// ============================================================================
// DATA STRUCTURES
// ============================================================================

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FeatureError {
    #[error("invalid date '{0}': expected YYYY-MM-DD or an ISO 8601 timestamp")]
    InvalidDate(String),

    #[error("feature '{name}' is not a finite number")]
    NonFinite { name: &'static str },
}

/// Model input, ordered by FEATURE_LAYOUT
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn admin_cost(&self) -> f64 {
        self.values[3]
    }
}

/// Everything derived from one record
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedFeatures {
    pub date: NaiveDate,
    /// Month-year bucket (`YYYY-MM`). Not a model input.
    pub period: String,
    pub vector: FeatureVector,
}

// ============================================================================
// DERIVATION
// ============================================================================

/// Administrative cost: what was paid beyond the tax base and the levy.
pub fn admin_cost(amount_paid: f64, dpp: f64, ppm: f64) -> f64 {
    amount_paid - (dpp + ppm)
}

/// Parse the transaction date.
///
/// Accepts plain dates (`2024-01-15`, `2024/01/15`), naive timestamps with a
/// `T` or space separator, and RFC 3339 timestamps. For offset timestamps the
/// calendar date is taken in the timestamp's own offset.
pub fn parse_date(raw: &str) -> Result<NaiveDate, FeatureError> {
    let trimmed = raw.trim();

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(datetime.date());
        }
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|datetime| datetime.date_naive())
        .map_err(|_| FeatureError::InvalidDate(raw.to_string()))
}

/// Build the model input for one record. Pure, no I/O.
pub fn derive(record: &TransactionRecord) -> Result<DerivedFeatures, FeatureError> {
    let date = parse_date(&record.date)?;
    let period = date.format("%Y-%m").to_string();

    let values = [
        record.amount_paid,
        record.dpp,
        record.ppm,
        admin_cost(record.amount_paid, record.dpp, record.ppm),
    ];

    // Finite inputs can still overflow in the subtraction
    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(FeatureError::NonFinite { name: FEATURE_LAYOUT[index] });
    }

    Ok(DerivedFeatures {
        date,
        period,
        vector: FeatureVector { values },
    })
}
