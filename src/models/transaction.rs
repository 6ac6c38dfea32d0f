//! Transaction model - inbound request schema
//!
//! Schema version 1. Field names follow the deployed clients (`Customer`,
//! not `Pelanggan`); any rename must bump `SCHEMA_VERSION`.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::{Validate, ValidationError, ValidationErrors};

pub const SCHEMA_VERSION: u32 = 1;

/// Wire names of the request fields
pub mod field {
    pub const BODY: &str = "body";
    pub const DATE: &str = "Tanggal";
    pub const CUSTOMER: &str = "Customer";
    pub const VESSEL_NAME: &str = "Nama_Kapal";
    pub const AMOUNT_PAID: &str = "Nominal_yang_Dibayarkan";
    pub const DPP: &str = "DPP";
    pub const PPM: &str = "PPM";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "Tanggal")]
    pub date: String,
    #[serde(rename = "Customer")]
    pub customer: String,
    #[serde(rename = "Nama_Kapal")]
    pub vessel_name: String,
    #[serde(rename = "Nominal_yang_Dibayarkan")]
    pub amount_paid: f64,
    #[serde(rename = "DPP")]
    pub dpp: f64,
    #[serde(rename = "PPM")]
    pub ppm: f64,
}

impl TransactionRecord {
    /// Build a record from a parsed JSON body, collecting every field error
    /// instead of stopping at the first one.
    pub fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let Some(object) = body.as_object() else {
            errors.add(
                field::BODY,
                shape_error("type", format!("expected a JSON object, got {}", json_type(body))),
            );
            return Err(errors);
        };

        let date = take_string(object, field::DATE, &mut errors);
        let customer = take_string(object, field::CUSTOMER, &mut errors);
        let vessel_name = take_string(object, field::VESSEL_NAME, &mut errors);
        let amount_paid = take_number(object, field::AMOUNT_PAID, &mut errors);
        let dpp = take_number(object, field::DPP, &mut errors);
        let ppm = take_number(object, field::PPM, &mut errors);

        match (date, customer, vessel_name, amount_paid, dpp, ppm) {
            (Some(date), Some(customer), Some(vessel_name), Some(amount_paid), Some(dpp), Some(ppm))
                if errors.is_empty() =>
            {
                let record = Self { date, customer, vessel_name, amount_paid, dpp, ppm };
                record.validate()?;
                Ok(record)
            }
            _ => Err(errors),
        }
    }
}

impl Validate for TransactionRecord {
    /// Monetary fields must be finite; their sign is not constrained.
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        for (name, value) in [
            (field::AMOUNT_PAID, self.amount_paid),
            (field::DPP, self.dpp),
            (field::PPM, self.ppm),
        ] {
            if !value.is_finite() {
                errors.add(name, shape_error("finite", format!("{} must be a finite number", name)));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

// Helpers

fn shape_error(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    error
}

fn missing(name: &'static str) -> ValidationError {
    shape_error("missing", format!("field {} is required", name))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn take_string(object: &Map<String, Value>, name: &'static str, errors: &mut ValidationErrors) -> Option<String> {
    match object.get(name) {
        None | Some(Value::Null) => {
            errors.add(name, missing(name));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            errors.add(name, shape_error("type", format!("expected a string, got {}", json_type(other))));
            None
        }
    }
}

/// Numbers, or strings holding a number (`"1000.50"`), are accepted.
fn take_number(object: &Map<String, Value>, name: &'static str, errors: &mut ValidationErrors) -> Option<f64> {
    match object.get(name) {
        None | Some(Value::Null) => {
            errors.add(name, missing(name));
            None
        }
        Some(Value::Number(n)) => match n.as_f64() {
            Some(v) => Some(v),
            None => {
                errors.add(name, shape_error("type", format!("{} is not representable as a decimal", n)));
                None
            }
        },
        Some(Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(v) => Some(v),
            Err(_) => {
                errors.add(name, shape_error("type", format!("expected a number, got string {:?}", s)));
                None
            }
        },
        Some(other) => {
            errors.add(name, shape_error("type", format!("expected a number, got {}", json_type(other))));
            None
        }
    }
}
