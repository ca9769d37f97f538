/*!
Fixtures de châssis figées

Décrit un CMM par ses valeurs SNMP brutes (avant normalisation) et sait:
- Charger / sauver ces valeurs en JSON
- Construire des variantes (ventilateur, alimentation, température)
- Installer les valeurs dans un `MockSnmpAccessor`
*/

use crate::snmp_stub::MockSnmpAccessor;
use anyhow::{Context, Result};
use check_cmm::model::{FAN_SLOTS, POWER_MODULE_SLOTS};
use check_cmm::snmp::oids;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerModuleFixture {
    pub exists: i64,
    pub state: i64,
}

/// Valeurs brutes d'un châssis complet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChassisFixture {
    pub health: i64,
    pub ambient: String,
    pub machine_type: String,
    pub machine_model: String,
    pub serial: String,
    pub firmware: String,
    /// Index 0 = ventilateur 1
    pub fans: Vec<String>,
    /// Index 0 = alimentation 1
    pub power_modules: Vec<PowerModuleFixture>,
}

impl ChassisFixture {
    /// Châssis sain: 22.50 °C, ventilateurs 40-49 %, 6 alimentations Good
    pub fn healthy() -> Self {
        Self {
            health: 255,
            ambient: " 22.50 Centigrade".to_string(),
            machine_type: "8721".to_string(),
            machine_model: "HC1".to_string(),
            serial: "06ABCDE".to_string(),
            firmware: "2PET12K".to_string(),
            fans: (1..=FAN_SLOTS)
                .map(|slot| format!("{}% of maximum", 39 + u32::from(slot)))
                .collect(),
            power_modules: (1..=POWER_MODULE_SLOTS)
                .map(|_| PowerModuleFixture { exists: 1, state: 1 })
                .collect(),
        }
    }

    pub fn with_health(mut self, raw: i64) -> Self {
        self.health = raw;
        self
    }

    pub fn with_ambient(mut self, raw: impl Into<String>) -> Self {
        self.ambient = raw.into();
        self
    }

    pub fn with_fan_percent(self, slot: u8, percent: u32) -> Self {
        self.with_fan_raw(slot, format!("{}% of maximum", percent))
    }

    pub fn with_fan_raw(mut self, slot: u8, raw: impl Into<String>) -> Self {
        self.fans[usize::from(slot) - 1] = raw.into();
        self
    }

    pub fn with_power_module(mut self, slot: u8, exists: i64, state: i64) -> Self {
        self.power_modules[usize::from(slot) - 1] = PowerModuleFixture { exists, state };
        self
    }

    pub fn without_power_module(self, slot: u8) -> Self {
        self.with_power_module(slot, 0, 0)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let fixture: Self = serde_json::from_str(json).context("invalid chassis fixture")?;
        anyhow::ensure!(
            fixture.fans.len() == usize::from(FAN_SLOTS),
            "fixture needs {} fans, got {}",
            FAN_SLOTS,
            fixture.fans.len()
        );
        anyhow::ensure!(
            fixture.power_modules.len() == usize::from(POWER_MODULE_SLOTS),
            "fixture needs {} power modules, got {}",
            POWER_MODULE_SLOTS,
            fixture.power_modules.len()
        );
        Ok(fixture)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read fixture {}", path.display()))?;
        let fixture = Self::from_json(&content)?;
        log::info!("📜 Loaded chassis fixture: {}", path.display());
        Ok(fixture)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Installe toutes les valeurs dans le mock SNMP
    pub fn install(&self, snmp: &MockSnmpAccessor) {
        snmp.set_integer(oids::SYSTEM_HEALTH, self.health);
        snmp.set_string(oids::AMBIENT_TEMPERATURE, &self.ambient);
        snmp.set_string(oids::MACHINE_TYPE, &self.machine_type);
        snmp.set_string(oids::MACHINE_MODEL, &self.machine_model);
        snmp.set_string(oids::SERIAL_NUMBER, &self.serial);
        snmp.set_string(oids::FIRMWARE_VERSION, &self.firmware);

        for (slot, raw) in (1..=FAN_SLOTS).zip(&self.fans) {
            snmp.set_string(oids::fan_speed(slot), raw);
        }
        for (slot, module) in (1..=POWER_MODULE_SLOTS).zip(&self.power_modules) {
            snmp.set_integer(oids::power_module_exists(slot), module.exists);
            snmp.set_integer(oids::power_module_state(slot), module.state);
        }
    }

    pub fn to_accessor(&self) -> MockSnmpAccessor {
        let snmp = MockSnmpAccessor::new();
        self.install(&snmp);
        snmp
    }
}

impl Default for ChassisFixture {
    fn default() -> Self {
        Self::healthy()
    }
}
