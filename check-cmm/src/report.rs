//! Aggregation of findings into the single status line
//!
//! Evaluators run in fixed priority order (temperature, fans, power modules,
//! CMM health) and the first non-OK finding is reported. Evaluators after it
//! are never called.

use crate::evaluate;
use crate::model::{ChassisReadings, Finding, Severity};
use std::fmt::Write as _;

type Evaluator = fn(&ChassisReadings) -> Finding;

const PRIORITY: [(&str, Evaluator); 4] = [
    ("ambient temperature", |r: &ChassisReadings| evaluate::ambient_temperature(r.ambient)),
    ("fans", |r: &ChassisReadings| evaluate::fans(&r.fans)),
    ("power modules", |r: &ChassisReadings| evaluate::power_modules(&r.power_modules)),
    ("CMM health", |r: &ChassisReadings| evaluate::cmm_health(r.health)),
];

/// Final verdict of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub severity: Severity,
    pub message: String,
}

impl Report {
    pub fn unknown(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Unknown,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.severity.exit_code()
    }

    /// `<check name> <SEVERITY> - <message>`, always a single line
    pub fn render(&self, check_name: &str) -> String {
        let line = format!("{} {} - {}", check_name, self.severity.word(), self.message);
        line.replace(['\r', '\n'], " ")
    }
}

pub fn aggregate(readings: &ChassisReadings) -> Report {
    let summary = summary(readings);

    let failing = PRIORITY.iter().find_map(|(name, evaluator)| {
        let finding = evaluator(readings);
        tracing::debug!("{} evaluated: {:?}", name, finding.severity);
        (!finding.is_ok()).then_some(finding)
    });

    match failing {
        Some(finding) => Report {
            severity: finding.severity,
            message: format!("{} {}", finding.message, summary),
        },
        None => Report {
            severity: Severity::Ok,
            message: summary,
        },
    }
}

/// Full detail of the run, identical whatever the verdict
pub fn summary(readings: &ChassisReadings) -> String {
    let mut out = String::new();

    let _ = write!(
        out,
        "CMM health {}, ambient {}, fans",
        readings.health, readings.ambient
    );
    for fan in &readings.fans {
        let _ = write!(out, " {}:{}%", fan.slot, fan.percent);
    }
    out.push_str(", power modules");
    for module in &readings.power_modules {
        let _ = write!(out, " {}:{}", module.slot, module.state);
    }
    let _ = write!(
        out,
        ", model {}, serial {}, firmware {}",
        readings.inventory.model, readings.inventory.serial, readings.inventory.firmware
    );
    out
}
