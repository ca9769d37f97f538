//! Raw SNMP scalars to domain values
//!
//! Pure functions. A shape mismatch is a `NormalizeError`, which the probe
//! treats as a failed query.

use crate::error::NormalizeError;
use crate::model::{HealthCode, PowerModuleState, Temperature};
use crate::snmp::SnmpValue;
use regex::Regex;
use std::sync::LazyLock;

static TEMPERATURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<value>-?\d+(?:\.\d+)?)\s+(?P<unit>Centigrade|Fahrenheit)$")
        .expect("valid temperature regex")
});

static PERCENTAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<value>\d+)% of maximum$").expect("valid percentage regex")
});

fn integer(value: &SnmpValue) -> Result<i64, NormalizeError> {
    match value {
        SnmpValue::Integer(v) => Ok(*v),
        SnmpValue::Str(s) => Err(NormalizeError::ExpectedInteger(s.clone())),
    }
}

/// STRING payload with quote characters removed and surrounding blanks trimmed
pub fn text(value: &SnmpValue) -> Result<String, NormalizeError> {
    match value {
        SnmpValue::Str(s) => Ok(s.replace('"', "").trim().to_string()),
        SnmpValue::Integer(v) => Err(NormalizeError::ExpectedString(*v)),
    }
}

/// An unmapped code is unresolved and therefore an error
pub fn health_code(value: &SnmpValue) -> Result<HealthCode, NormalizeError> {
    let raw = integer(value)?;
    match HealthCode::from_raw(raw) {
        HealthCode::Unknown => Err(NormalizeError::HealthCode(raw)),
        code => Ok(code),
    }
}

pub fn temperature(value: &SnmpValue) -> Result<Temperature, NormalizeError> {
    let raw = text(value)?;
    let caps = TEMPERATURE
        .captures(&raw)
        .ok_or_else(|| NormalizeError::Temperature(raw.clone()))?;
    let reading: f64 = caps["value"]
        .parse()
        .map_err(|_| NormalizeError::Temperature(raw.clone()))?;

    Ok(match &caps["unit"] {
        "Fahrenheit" => Temperature::from_fahrenheit(reading),
        _ => Temperature::from_celsius(reading),
    })
}

pub fn percentage(value: &SnmpValue) -> Result<u32, NormalizeError> {
    let raw = text(value)?;
    PERCENTAGE
        .captures(&raw)
        .and_then(|caps| caps["value"].parse().ok())
        .ok_or(NormalizeError::Percentage(raw))
}

/// Only 1 means a module sits in the bay
pub fn installed(value: &SnmpValue) -> Result<bool, NormalizeError> {
    Ok(integer(value)? == 1)
}

pub fn power_module_state(value: &SnmpValue) -> Result<PowerModuleState, NormalizeError> {
    Ok(PowerModuleState::from_raw(integer(value)?))
}
