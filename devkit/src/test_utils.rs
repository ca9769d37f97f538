/*!
Test Harness pour le check CMM

Facilite l'écriture de tests avec:
- Setup automatique des stubs SNMP et ping
- Exécution du check complet (ping, requêtes, évaluation, rapport)
- Assertions sur la ligne produite et les requêtes émises
*/

use crate::chassis_fixture::ChassisFixture;
use crate::snmp_stub::{MockPinger, MockSnmpAccessor, PingOutcome};
use anyhow::Result;
use check_cmm::{run_check, Report, Severity};

pub const TEST_HOST: &str = "cmm-test.example";
pub const CHECK_NAME: &str = "CMM";

/// Harness de test complet pour le check CMM
pub struct TestHarness {
    pub snmp: MockSnmpAccessor,
    pub pinger: MockPinger,
    pub host: String,
}

impl TestHarness {
    /// Crée un harness sur un châssis sain
    pub fn new() -> Self {
        Self::with_fixture(&ChassisFixture::healthy())
    }

    pub fn with_fixture(fixture: &ChassisFixture) -> Self {
        env_logger::builder().is_test(true).try_init().ok();

        Self {
            snmp: fixture.to_accessor(),
            pinger: MockPinger::default(),
            host: TEST_HOST.to_string(),
        }
    }

    pub fn unreachable(mut self, outcome: PingOutcome) -> Self {
        self.pinger.set_outcome(outcome);
        self
    }

    /// Exécute le check complet
    pub async fn run(&self) -> Report {
        let report = run_check(&self.host, &self.pinger, &self.snmp).await;
        log::info!("🔍 {}", report.render(CHECK_NAME));
        report
    }

    /// Ligne exacte telle qu'imprimée par le binaire
    pub async fn run_line(&self) -> String {
        self.run().await.render(CHECK_NAME)
    }

    /// Assert sévérité + fragment du message
    pub async fn expect(&self, severity: Severity, fragment: &str) -> Result<Report> {
        let report = self.run().await;
        if report.severity != severity {
            anyhow::bail!(
                "expected {} but got {}: {}",
                severity,
                report.severity,
                report.message
            );
        }
        if !report.message.contains(fragment) {
            anyhow::bail!("'{}' not found in: {}", fragment, report.message);
        }
        log::info!("✅ {} with '{}'", severity, fragment);
        Ok(report)
    }

    pub fn queried_oids(&self) -> Vec<String> {
        self.snmp.queried_oids()
    }

    /// Reset des journaux entre deux exécutions
    pub fn reset(&self) {
        self.snmp.clear_queries();
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_harness_basic_functionality() {
        let harness = TestHarness::new();
        let report = harness.expect(Severity::Ok, "serial 06ABCDE").await.unwrap();
        assert_eq!(report.exit_code(), 0);
        assert_eq!(harness.pinger.probed_hosts(), vec![TEST_HOST]);
    }

    #[tokio::test]
    async fn test_expect_reports_mismatch() {
        let harness = TestHarness::new();
        assert!(harness.expect(Severity::Critical, "").await.is_err());
        assert!(harness.expect(Severity::Ok, "no such text").await.is_err());
    }

    #[tokio::test]
    async fn test_reset_clears_queries() {
        let harness = TestHarness::new();
        harness.run().await;
        assert!(!harness.queried_oids().is_empty());
        harness.reset();
        assert!(harness.queried_oids().is_empty());
    }
}
