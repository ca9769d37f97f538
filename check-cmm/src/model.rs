//! Domain values read from the chassis and the findings derived from them
//!
//! Everything here is fully resolved: a `ChassisReadings` only exists once
//! every query of the run has produced a usable value.

use std::fmt;

/// Fixed chassis layout: fan bays
pub const FAN_SLOTS: u8 = 10;

/// Fixed chassis layout: power module bays
pub const POWER_MODULE_SLOTS: u8 = 6;

/// Check outcome, ordered from best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Severity {
    /// Process exit code expected by the monitoring system
    pub fn exit_code(self) -> i32 {
        match self {
            Severity::Ok => 0,
            Severity::Warning => 1,
            Severity::Critical => 2,
            Severity::Unknown => 3,
        }
    }

    pub fn word(self) -> &'static str {
        match self {
            Severity::Ok => "OK",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
            Severity::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.word())
    }
}

/// Overall CMM health as reported by the system health OID
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthCode {
    Critical,
    NonCritical,
    SystemLevelError,
    Ok,
    Unknown,
}

impl HealthCode {
    /// 0 critical, 2 non-critical, 4 system level error, 255 normal
    pub fn from_raw(raw: i64) -> Self {
        match raw {
            0 => HealthCode::Critical,
            2 => HealthCode::NonCritical,
            4 => HealthCode::SystemLevelError,
            255 => HealthCode::Ok,
            _ => HealthCode::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HealthCode::Critical => "Critical",
            HealthCode::NonCritical => "Non-Critical",
            HealthCode::SystemLevelError => "System-Level Error",
            HealthCode::Ok => "OK",
            HealthCode::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for HealthCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ambient temperature, always held in Celsius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Temperature {
    celsius: f64,
}

impl Temperature {
    pub fn from_celsius(celsius: f64) -> Self {
        Self { celsius }
    }

    /// Converts with the 32°F reading nudged to 33°F first. The result is
    /// rounded to the CMM's two decimals so thresholds see the displayed value.
    pub fn from_fahrenheit(fahrenheit: f64) -> Self {
        let fahrenheit = if fahrenheit == 32.0 { 33.0 } else { fahrenheit };
        let celsius = (fahrenheit - 32.0) * 5.0 / 9.0;
        Self::from_celsius((celsius * 100.0).round() / 100.0)
    }

    pub fn celsius(self) -> f64 {
        self.celsius
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} C", self.celsius)
    }
}

/// Speed of one chassis fan, in percent of its maximum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanReading {
    pub slot: u8,
    pub percent: u32,
}

/// Power module state as reported by the CMM
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerModuleState {
    Unknown,
    Good,
    Warning,
    NotAvailable,
    /// Never read from the CMM, set locally for empty bays
    NotInstalled,
}

impl PowerModuleState {
    /// 0 unknown, 1 good, 2 warning, 3 not available; anything else is unknown
    pub fn from_raw(raw: i64) -> Self {
        match raw {
            1 => PowerModuleState::Good,
            2 => PowerModuleState::Warning,
            3 => PowerModuleState::NotAvailable,
            _ => PowerModuleState::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PowerModuleState::Unknown => "Unknown",
            PowerModuleState::Good => "Good",
            PowerModuleState::Warning => "Warning",
            PowerModuleState::NotAvailable => "NotAvailable",
            PowerModuleState::NotInstalled => "NotInstalled",
        }
    }
}

impl fmt::Display for PowerModuleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerModuleReading {
    pub slot: u8,
    pub installed: bool,
    pub state: PowerModuleState,
}

impl PowerModuleReading {
    pub fn not_installed(slot: u8) -> Self {
        Self {
            slot,
            installed: false,
            state: PowerModuleState::NotInstalled,
        }
    }

    pub fn installed(slot: u8, state: PowerModuleState) -> Self {
        Self {
            slot,
            installed: true,
            state,
        }
    }
}

/// Informational chassis data, never drives severity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    /// `<machine type>-<machine model>`
    pub model: String,
    pub serial: String,
    pub firmware: String,
}

/// Every reading of one run, threaded through evaluation and reporting
#[derive(Debug, Clone, PartialEq)]
pub struct ChassisReadings {
    pub health: HealthCode,
    pub ambient: Temperature,
    pub inventory: Inventory,
    /// Slots 1..=10 in ascending order
    pub fans: Vec<FanReading>,
    /// Slots 1..=6 in ascending order, empty bays included
    pub power_modules: Vec<PowerModuleReading>,
}

/// Result of one subsystem evaluator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    pub fn ok() -> Self {
        Self {
            severity: Severity::Ok,
            message: String::new(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn critical(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Critical,
            message: message.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.severity == Severity::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Severity::Ok.exit_code(), 0);
        assert_eq!(Severity::Warning.exit_code(), 1);
        assert_eq!(Severity::Critical.exit_code(), 2);
        assert_eq!(Severity::Unknown.exit_code(), 3);
    }

    #[test]
    fn test_health_code_mapping() {
        assert_eq!(HealthCode::from_raw(0), HealthCode::Critical);
        // 2 keeps its own label instead of being folded into SystemLevelError
        assert_eq!(HealthCode::from_raw(2), HealthCode::NonCritical);
        assert_eq!(HealthCode::from_raw(4), HealthCode::SystemLevelError);
        assert_eq!(HealthCode::from_raw(255), HealthCode::Ok);
        assert_eq!(HealthCode::from_raw(1), HealthCode::Unknown);
        assert_eq!(HealthCode::from_raw(-1), HealthCode::Unknown);
    }

    #[test]
    fn test_fahrenheit_conversion() {
        let body = Temperature::from_fahrenheit(98.6);
        assert!((body.celsius() - 37.0).abs() < 0.01);

        let freezing = Temperature::from_fahrenheit(32.0);
        assert!(freezing.celsius().is_finite());
        assert_eq!(freezing.celsius(), 0.56);
    }

    #[test]
    fn test_power_state_mapping() {
        assert_eq!(PowerModuleState::from_raw(0), PowerModuleState::Unknown);
        assert_eq!(PowerModuleState::from_raw(1), PowerModuleState::Good);
        assert_eq!(PowerModuleState::from_raw(2), PowerModuleState::Warning);
        assert_eq!(PowerModuleState::from_raw(3), PowerModuleState::NotAvailable);
        assert_eq!(PowerModuleState::from_raw(42), PowerModuleState::Unknown);
    }

    #[test]
    fn test_temperature_display() {
        assert_eq!(Temperature::from_celsius(22.5).to_string(), "22.50 C");
        assert_eq!(Temperature::from_celsius(-3.04).to_string(), "-3.04 C");
    }
}
