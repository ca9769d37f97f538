/*!
# CMM DevKit - Stubs et Utilitaires pour Développement

Bibliothèque facilitant le développement et les tests du check CMM avec:
- Stubs SNMP et ping pour tests sans châssis réel
- Fixtures de châssis figées (valeurs SNMP brutes, format JSON)
- Harness exécutant le check complet contre les stubs
*/

pub mod snmp_stub;
pub mod chassis_fixture;
pub mod test_utils;

pub use snmp_stub::{MockPinger, MockSnmpAccessor, PingOutcome};
pub use chassis_fixture::{ChassisFixture, PowerModuleFixture};
pub use test_utils::TestHarness;
