/*!
Stubs SNMP et ping pour développement sans châssis

Permet de tester le check sans CMM réel ni réseau.
Enregistre toutes les requêtes reçues et renvoie des réponses scriptées.
*/

use async_trait::async_trait;
use check_cmm::{Reachability, ReachabilityError, SnmpAccessor, SnmpError, SnmpValue};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Réponse scriptée pour un OID
#[derive(Debug, Clone, PartialEq)]
pub enum MockResponse {
    Value(SnmpValue),
    Timeout,
}

/// Mock SNMP qui simule un agent CMM
#[derive(Clone, Default)]
pub struct MockSnmpAccessor {
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl MockSnmpAccessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Répond INTEGER pour cet OID
    pub fn set_integer(&self, oid: impl Into<String>, value: i64) {
        self.set(oid, MockResponse::Value(SnmpValue::Integer(value)));
    }

    /// Répond STRING pour cet OID (guillemets inclus, comme net-snmp)
    pub fn set_string(&self, oid: impl Into<String>, value: impl AsRef<str>) {
        self.set(
            oid,
            MockResponse::Value(SnmpValue::Str(format!("\"{}\"", value.as_ref()))),
        );
    }

    /// Simule un agent muet sur cet OID
    pub fn set_timeout(&self, oid: impl Into<String>) {
        self.set(oid, MockResponse::Timeout);
    }

    /// Retire l'OID: l'agent répondra "No Such Object"
    pub fn remove(&self, oid: &str) {
        self.responses.lock().unwrap().remove(oid);
    }

    pub fn set(&self, oid: impl Into<String>, response: MockResponse) {
        self.responses.lock().unwrap().insert(oid.into(), response);
    }

    /// Tous les OID interrogés, dans l'ordre (pour assertions de tests)
    pub fn queried_oids(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    /// Reset du journal de requêtes
    pub fn clear_queries(&self) {
        self.queries.lock().unwrap().clear();
    }

    fn respond(response: Option<MockResponse>) -> Result<SnmpValue, SnmpError> {
        match response {
            Some(MockResponse::Value(value)) => Ok(value),
            Some(MockResponse::Timeout) => Err(SnmpError::Timeout),
            None => Err(SnmpError::NoSuchObject),
        }
    }
}

#[async_trait]
impl SnmpAccessor for MockSnmpAccessor {
    async fn get(&self, oid: &str) -> Result<SnmpValue, SnmpError> {
        self.queries.lock().unwrap().push(oid.to_string());
        let response = self.responses.lock().unwrap().get(oid).cloned();
        log::debug!("[MOCK] GET {} -> {:?}", oid, response);
        Self::respond(response)
    }

    async fn walk(&self, prefix: &str) -> Result<Vec<(String, SnmpValue)>, SnmpError> {
        self.queries.lock().unwrap().push(prefix.to_string());
        let below = format!("{}.", prefix.trim_end_matches('.'));

        let mut entries: Vec<(String, MockResponse)> = self
            .responses
            .lock()
            .unwrap()
            .iter()
            .filter(|(oid, _)| oid.starts_with(&below))
            .map(|(oid, r)| (oid.clone(), r.clone()))
            .collect();
        entries.sort_by_key(|(oid, _)| oid_key(oid));

        entries
            .into_iter()
            .map(|(oid, r)| Self::respond(Some(r)).map(|v| (oid, v)))
            .collect()
    }
}

/// Ordre lexicographique numérique (1.10 après 1.9)
fn oid_key(oid: &str) -> Vec<u64> {
    oid.split('.')
        .filter(|p| !p.is_empty())
        .map(|p| p.parse().unwrap_or(u64::MAX))
        .collect()
}

/// Résultat simulé du ping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PingOutcome {
    Reply,
    NoReply,
    NameResolution,
    NoRoute,
}

/// Mock du pré-contrôle de joignabilité
#[derive(Clone)]
pub struct MockPinger {
    outcome: Arc<Mutex<PingOutcome>>,
    probes: Arc<Mutex<Vec<String>>>,
}

impl MockPinger {
    pub fn new(outcome: PingOutcome) -> Self {
        Self {
            outcome: Arc::new(Mutex::new(outcome)),
            probes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn set_outcome(&self, outcome: PingOutcome) {
        *self.outcome.lock().unwrap() = outcome;
    }

    /// Hôtes pingés (pour assertions de tests)
    pub fn probed_hosts(&self) -> Vec<String> {
        self.probes.lock().unwrap().clone()
    }
}

impl Default for MockPinger {
    fn default() -> Self {
        Self::new(PingOutcome::Reply)
    }
}

#[async_trait]
impl Reachability for MockPinger {
    async fn probe(&self, host: &str) -> Result<(), ReachabilityError> {
        self.probes.lock().unwrap().push(host.to_string());
        let host = host.to_string();
        match *self.outcome.lock().unwrap() {
            PingOutcome::Reply => Ok(()),
            PingOutcome::NoReply => Err(ReachabilityError::NoReply { host }),
            PingOutcome::NameResolution => Err(ReachabilityError::NameResolution { host }),
            PingOutcome::NoRoute => Err(ReachabilityError::NoRoute { host }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_get_records_queries() {
        let snmp = MockSnmpAccessor::new();
        snmp.set_integer(".1.2.3", 255);
        snmp.set_string(".1.2.4", "8721");

        assert_eq!(snmp.get(".1.2.3").await.unwrap(), SnmpValue::Integer(255));
        assert_eq!(
            snmp.get(".1.2.4").await.unwrap(),
            SnmpValue::Str("\"8721\"".into())
        );
        assert!(matches!(snmp.get(".9.9").await, Err(SnmpError::NoSuchObject)));
        assert_eq!(snmp.queried_oids(), vec![".1.2.3", ".1.2.4", ".9.9"]);
    }

    #[tokio::test]
    async fn test_mock_timeout() {
        let snmp = MockSnmpAccessor::new();
        snmp.set_timeout(".1.2.3");
        assert!(matches!(snmp.get(".1.2.3").await, Err(SnmpError::Timeout)));
    }

    #[tokio::test]
    async fn test_walk_orders_numerically() {
        let snmp = MockSnmpAccessor::new();
        for slot in [10, 2, 1] {
            snmp.set_integer(format!(".1.5.{}", slot), slot);
        }
        snmp.set_integer(".1.50.1", 0);

        let oids: Vec<String> = snmp
            .walk(".1.5")
            .await
            .unwrap()
            .into_iter()
            .map(|(oid, _)| oid)
            .collect();
        assert_eq!(oids, vec![".1.5.1", ".1.5.2", ".1.5.10"]);
    }

    #[tokio::test]
    async fn test_mock_pinger() {
        let pinger = MockPinger::default();
        assert!(pinger.probe("cmm01").await.is_ok());

        pinger.set_outcome(PingOutcome::NameResolution);
        let err = pinger.probe("cmm01").await.unwrap_err();
        assert_eq!(err.to_string(), "could not resolve hostname cmm01");
        assert_eq!(pinger.probed_hosts(), vec!["cmm01", "cmm01"]);
    }
}
