//! Error taxonomy for the CMM check
//!
//! Every variant here ends up as a single UNKNOWN line. Threshold or state
//! violations are not errors; they are findings (see `evaluate`).

use thiserror::Error;

/// Failure of one SNMP request at the transport boundary
#[derive(Debug, Error)]
pub enum SnmpError {
    #[error("timeout, no response from agent")]
    Timeout,

    #[error("no such object on this agent")]
    NoSuchObject,

    #[error("unsupported value type {0}")]
    UnsupportedType(String),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Transport(String),
}

/// Reachability pre-check failures, one message per failure mode
#[derive(Debug, Error)]
pub enum ReachabilityError {
    #[error("no ping reply from {host}")]
    NoReply { host: String },

    #[error("could not resolve hostname {host}")]
    NameResolution { host: String },

    #[error("no route to host {host}")]
    NoRoute { host: String },

    #[error("failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// A raw value that does not have the shape expected for its OID
#[derive(Debug, Error, PartialEq)]
pub enum NormalizeError {
    #[error("expected an INTEGER value, got STRING {0:?}")]
    ExpectedInteger(String),

    #[error("expected a STRING value, got INTEGER {0}")]
    ExpectedString(i64),

    #[error("unparseable temperature {0:?}")]
    Temperature(String),

    #[error("unparseable fan speed {0:?}")]
    Percentage(String),

    #[error("unknown health code {0}")]
    HealthCode(i64),
}

/// Why a single reading could not be resolved
#[derive(Debug, Error)]
pub enum QueryFailure {
    #[error(transparent)]
    Snmp(#[from] SnmpError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

/// Fatal failure of the whole probe run
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error(transparent)]
    Unreachable(#[from] ReachabilityError),

    #[error("could not read {reading} ({oid}): {reason}")]
    Query {
        reading: String,
        oid: String,
        #[source]
        reason: QueryFailure,
    },
}
