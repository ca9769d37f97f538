//! Subsystem evaluators: one resolved reading in, one `Finding` out
//!
//! Slot based evaluators walk slots in ascending order and stop at the first
//! offending slot.

use crate::model::{
    FanReading, Finding, HealthCode, PowerModuleReading, PowerModuleState, Temperature,
};

pub const AMBIENT_CRITICAL_ABOVE: f64 = 30.0;
pub const AMBIENT_WARNING_ABOVE: f64 = 28.0;
pub const AMBIENT_WARNING_BELOW: f64 = 10.0;

pub const FAN_HIGH_ABOVE: u32 = 90;
pub const FAN_LOW_BELOW: u32 = 10;

pub fn ambient_temperature(ambient: Temperature) -> Finding {
    let t = ambient.celsius();

    if t > AMBIENT_CRITICAL_ABOVE {
        Finding::critical(format!(
            "Ambient temperature is {}, air conditioning may have failed, consider shutdown.",
            ambient
        ))
    } else if t > AMBIENT_WARNING_ABOVE {
        Finding::warning(format!(
            "Ambient temperature is {}, air conditioning may have failed, consider shutdown.",
            ambient
        ))
    } else if t < AMBIENT_WARNING_BELOW {
        Finding::warning(format!(
            "Ambient temperature is {}, which is unreasonably cold, check air conditioning.",
            ambient
        ))
    } else {
        Finding::ok()
    }
}

pub fn fans(fans: &[FanReading]) -> Finding {
    for fan in fans {
        if fan.percent > FAN_HIGH_ABOVE {
            return Finding::warning(format!(
                "Fan {} speed is {}% of maximum, which is unusually high, check fan status and ambient temperature.",
                fan.slot, fan.percent
            ));
        }
        if fan.percent < FAN_LOW_BELOW {
            return Finding::warning(format!(
                "Fan {} speed is {}% of maximum, which is unusually low, check fan status.",
                fan.slot, fan.percent
            ));
        }
    }
    Finding::ok()
}

pub fn power_modules(modules: &[PowerModuleReading]) -> Finding {
    modules
        .iter()
        .filter(|m| m.installed)
        .find(|m| m.state != PowerModuleState::Good)
        .map(|m| {
            Finding::warning(format!(
                "Power module {} state is {}, please investigate.",
                m.slot, m.state
            ))
        })
        .unwrap_or_else(Finding::ok)
}

pub fn cmm_health(health: HealthCode) -> Finding {
    match health {
        HealthCode::Critical => Finding::critical("CMM health status is Critical."),
        HealthCode::NonCritical => Finding::warning("CMM health status is Non-Critical."),
        HealthCode::SystemLevelError => {
            Finding::warning("CMM health status is System-Level Error.")
        }
        HealthCode::Ok => Finding::ok(),
        // rejected during normalization, kept total for callers building readings by hand
        HealthCode::Unknown => Finding::warning("CMM health status is Unknown."),
    }
}
