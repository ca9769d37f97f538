//! SNMP transport backed by the net-snmp command line tools
//!
//! Runs `snmpget` / `snmpwalk` with numeric OID and enum output and parses
//! their `<oid> = <TYPE>: <value>` lines. Retries and the per-request
//! timeout are left to net-snmp; the process itself gets an outer guard.

use super::{SnmpAccessor, SnmpValue};
use crate::config::SnmpConfig;
use crate::error::SnmpError;
use async_trait::async_trait;
use regex::Regex;
use std::process::Stdio;
use std::sync::LazyLock;
use std::time::Duration;
use tokio::process::Command as AsyncCommand;
use tracing::debug;

static RESPONSE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<oid>\S+) = (?:(?P<kind>[A-Za-z0-9-]+):\s?)?(?P<payload>.*)$")
        .expect("valid response line regex")
});

static ENUM_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((?P<value>-?\d+)\)$").expect("valid enum regex"));

/// net-snmp backed accessor for one agent
#[derive(Debug, Clone)]
pub struct NetSnmpClient {
    host: String,
    community: String,
    version: String,
    timeout_secs: u64,
    retries: u32,
    get_command: String,
    walk_command: String,
}

impl NetSnmpClient {
    pub fn new(host: impl Into<String>, community: impl Into<String>, cfg: &SnmpConfig) -> Self {
        Self {
            host: host.into(),
            community: community.into(),
            version: cfg.version.clone(),
            timeout_secs: cfg.timeout_secs,
            retries: cfg.retries,
            get_command: cfg.get_command.clone(),
            walk_command: cfg.walk_command.clone(),
        }
    }

    fn args(&self, oid: &str) -> Vec<String> {
        vec![
            "-v".into(),
            self.version.clone(),
            "-c".into(),
            self.community.clone(),
            "-t".into(),
            self.timeout_secs.to_string(),
            "-r".into(),
            self.retries.to_string(),
            "-On".into(),
            "-Oe".into(),
            self.host.clone(),
            oid.to_string(),
        ]
    }

    /// net-snmp already retries; this only catches a hung process
    fn guard_timeout(&self) -> Duration {
        let attempts = u64::from(self.retries).saturating_add(1);
        Duration::from_secs(self.timeout_secs.saturating_mul(attempts).saturating_add(2))
    }

    async fn run(&self, command: &str, oid: &str) -> Result<String, SnmpError> {
        debug!("{} {} {}", command, self.host, oid);

        let child = AsyncCommand::new(command)
            .args(self.args(oid))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.guard_timeout(), child)
            .await
            .map_err(|_| SnmpError::Timeout)?
            .map_err(|source| SnmpError::Spawn {
                command: command.to_string(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            return Err(classify_failure(&stderr));
        }
        Ok(stdout)
    }
}

#[async_trait]
impl SnmpAccessor for NetSnmpClient {
    async fn get(&self, oid: &str) -> Result<SnmpValue, SnmpError> {
        let stdout = self.run(&self.get_command, oid).await?;
        let line = stdout
            .lines()
            .find(|l| !l.trim().is_empty())
            .ok_or_else(|| SnmpError::Malformed("empty response".into()))?;
        let (_, value) = parse_response_line(line)?;
        Ok(value)
    }

    async fn walk(&self, prefix: &str) -> Result<Vec<(String, SnmpValue)>, SnmpError> {
        let stdout = self.run(&self.walk_command, prefix).await?;
        let mut values = Vec::new();

        for line in stdout.lines().filter(|l| !l.trim().is_empty()) {
            if line.starts_with("End of MIB") || line.contains("No more variables left") {
                break;
            }
            match parse_response_line(line) {
                Ok(entry) => values.push(entry),
                // wrapped continuation of a long STRING
                Err(SnmpError::Malformed(_)) if !line.starts_with('.') => {
                    if let Some((_, SnmpValue::Str(s))) = values.last_mut() {
                        s.push('\n');
                        s.push_str(line);
                    }
                }
                Err(SnmpError::NoSuchObject) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(values)
    }
}

fn classify_failure(stderr: &str) -> SnmpError {
    if stderr.starts_with("Timeout") {
        SnmpError::Timeout
    } else if stderr.is_empty() {
        SnmpError::Transport("command failed without output".into())
    } else {
        SnmpError::Transport(stderr.lines().next().unwrap_or(stderr).to_string())
    }
}

/// Parse one `-On -Oe` output line into `(oid, value)`
pub fn parse_response_line(line: &str) -> Result<(String, SnmpValue), SnmpError> {
    let caps = RESPONSE_LINE
        .captures(line.trim_end())
        .ok_or_else(|| SnmpError::Malformed(line.to_string()))?;

    let oid = caps["oid"].to_string();
    let payload = caps["payload"].trim_end();

    let Some(kind) = caps.name("kind").map(|m| m.as_str()) else {
        if payload.starts_with("No Such Object") || payload.starts_with("No Such Instance") {
            return Err(SnmpError::NoSuchObject);
        }
        return Err(SnmpError::Malformed(line.to_string()));
    };

    let value = match kind {
        "INTEGER" | "Gauge32" | "Counter32" | "Counter64" | "Unsigned32" => {
            SnmpValue::Integer(parse_integer(payload).ok_or_else(|| SnmpError::Malformed(line.to_string()))?)
        }
        "STRING" | "Hex-STRING" => SnmpValue::Str(payload.to_string()),
        other => return Err(SnmpError::UnsupportedType(other.to_string())),
    };

    Ok((oid, value))
}

/// Plain `255` or symbolic `normal(255)` when enum output is not numeric
fn parse_integer(payload: &str) -> Option<i64> {
    payload.parse().ok().or_else(|| {
        ENUM_INTEGER
            .captures(payload)
            .and_then(|c| c["value"].parse().ok())
    })
}
