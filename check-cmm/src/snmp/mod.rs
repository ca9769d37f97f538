//! SNMP access to the Chassis Management Module
//!
//! The probe only talks to the `SnmpAccessor` trait. `NetSnmpClient` is the
//! production implementation (net-snmp command line tools); the devkit crate
//! provides a scripted mock for tests.

mod netsnmp;
pub mod oids;

pub use netsnmp::{parse_response_line, NetSnmpClient};

use crate::error::SnmpError;
use async_trait::async_trait;
use std::fmt;

/// A scalar as returned by the agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnmpValue {
    Integer(i64),
    Str(String),
}

impl fmt::Display for SnmpValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnmpValue::Integer(v) => write!(f, "INTEGER: {}", v),
            SnmpValue::Str(s) => write!(f, "STRING: {}", s),
        }
    }
}

#[async_trait]
pub trait SnmpAccessor: Send + Sync {
    /// GET a single scalar
    async fn get(&self, oid: &str) -> Result<SnmpValue, SnmpError>;

    /// Enumerate every value below `prefix`, in agent order
    async fn walk(&self, prefix: &str) -> Result<Vec<(String, SnmpValue)>, SnmpError>;
}
