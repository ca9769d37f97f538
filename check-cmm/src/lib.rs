//! check-cmm - health check for IBM/Lenovo PureFlex Chassis Management Modules
//!
//! Reads the CMM over SNMP and reduces it to one status line plus an exit code:
//! - Reachability pre-check (single ping)
//! - Sequential SNMP queries, first failure aborts the run
//! - Normalization of raw values (health codes, temperatures, fan speeds)
//! - Per-subsystem evaluators (ambient, fans, power modules, CMM health)
//! - First-failure-wins aggregation into the final report

pub mod cli;
pub mod config;
pub mod error;
pub mod evaluate;
pub mod logging;
pub mod model;
pub mod normalize;
pub mod probe;
pub mod reachability;
pub mod report;
pub mod snmp;

pub use config::ProbeConfig;
pub use error::{NormalizeError, ProbeError, QueryFailure, ReachabilityError, SnmpError};
pub use model::{ChassisReadings, Finding, Severity};
pub use probe::{collect, run_check};
pub use reachability::{Reachability, SystemPing};
pub use report::{aggregate, Report};
pub use snmp::{NetSnmpClient, SnmpAccessor, SnmpValue};
