//! Reachability pre-check: one low-timeout ping before any SNMP traffic

use crate::config::PingConfig;
use crate::error::ReachabilityError;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command as AsyncCommand;
use tracing::debug;

#[async_trait]
pub trait Reachability: Send + Sync {
    async fn probe(&self, host: &str) -> Result<(), ReachabilityError>;
}

/// System `ping`, single echo request
#[derive(Debug, Clone)]
pub struct SystemPing {
    command: String,
    timeout_secs: u64,
}

impl SystemPing {
    pub fn new(cfg: &PingConfig) -> Self {
        Self {
            command: cfg.command.clone(),
            timeout_secs: cfg.timeout_secs,
        }
    }
}

#[async_trait]
impl Reachability for SystemPing {
    async fn probe(&self, host: &str) -> Result<(), ReachabilityError> {
        debug!("{} -c 1 -W {} {}", self.command, self.timeout_secs, host);

        let output = AsyncCommand::new(&self.command)
            .args(["-c", "1", "-W", &self.timeout_secs.to_string(), host])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ReachabilityError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        let combined = format!(
            "{}\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        classify(host, output.status.success(), &combined)
    }
}

/// Map a ping run to one of the reachability failure modes
pub fn classify(host: &str, success: bool, output: &str) -> Result<(), ReachabilityError> {
    const NAME_FAILURES: [&str; 3] = [
        "unknown host",
        "Name or service not known",
        "Temporary failure in name resolution",
    ];
    const ROUTE_FAILURES: [&str; 3] = [
        "Network is unreachable",
        "No route to host",
        "Destination Host Unreachable",
    ];

    let host = host.to_string();
    if NAME_FAILURES.iter().any(|m| output.contains(m)) {
        return Err(ReachabilityError::NameResolution { host });
    }
    if ROUTE_FAILURES.iter().any(|m| output.contains(m)) {
        return Err(ReachabilityError::NoRoute { host });
    }
    if !success || output.contains("100% packet loss") {
        return Err(ReachabilityError::NoReply { host });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply() {
        let out = "64 bytes from 10.0.0.5: icmp_seq=1 ttl=64 time=0.3 ms\n\
                   1 packets transmitted, 1 received, 0% packet loss, time 0ms";
        assert!(classify("10.0.0.5", true, out).is_ok());
    }

    #[test]
    fn test_packet_loss() {
        let out = "1 packets transmitted, 0 received, 100% packet loss, time 0ms";
        let err = classify("10.0.0.5", false, out).unwrap_err();
        assert_eq!(err.to_string(), "no ping reply from 10.0.0.5");
    }

    #[test]
    fn test_name_resolution() {
        let err = classify("cmm-x", false, "ping: cmm-x: Name or service not known").unwrap_err();
        assert!(matches!(err, ReachabilityError::NameResolution { .. }));
        let err = classify("cmm-x", false, "ping: unknown host cmm-x").unwrap_err();
        assert!(matches!(err, ReachabilityError::NameResolution { .. }));
    }

    #[test]
    fn test_routing() {
        let err = classify("10.9.9.9", false, "connect: Network is unreachable").unwrap_err();
        assert!(matches!(err, ReachabilityError::NoRoute { .. }));

        let out = "From 10.0.0.1 icmp_seq=1 Destination Host Unreachable\n\
                   1 packets transmitted, 0 received, +1 errors, 100% packet loss";
        let err = classify("10.0.0.7", false, out).unwrap_err();
        assert_eq!(err.to_string(), "no route to host 10.0.0.7");
    }

    #[tokio::test]
    async fn test_missing_ping_binary() {
        let ping = SystemPing::new(&PingConfig {
            command: "/nonexistent/ping".into(),
            timeout_secs: 1,
        });
        let err = ping.probe("127.0.0.1").await.unwrap_err();
        assert!(matches!(err, ReachabilityError::Spawn { .. }));
    }
}
