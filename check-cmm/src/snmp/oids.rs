//! Object identifiers read from the CMM (IBM MM MIB, enterprise 2.3.51.2)

const MM: &str = ".1.3.6.1.4.1.2.3.51.2";

/// systemHealthStat: 0 critical, 2 non-critical, 4 system level, 255 normal
pub const SYSTEM_HEALTH: &str = ".1.3.6.1.4.1.2.3.51.2.2.7.1.0";

/// frontPanelTemp, e.g. `" 22.50 Centigrade"`
pub const AMBIENT_TEMPERATURE: &str = ".1.3.6.1.4.1.2.3.51.2.2.1.5.1.0";

pub const MACHINE_TYPE: &str = ".1.3.6.1.4.1.2.3.51.2.2.21.1.1.1.0";
pub const MACHINE_MODEL: &str = ".1.3.6.1.4.1.2.3.51.2.2.21.1.1.2.0";
pub const SERIAL_NUMBER: &str = ".1.3.6.1.4.1.2.3.51.2.2.21.1.1.3.0";

/// Build id of the running CMM main application
pub const FIRMWARE_VERSION: &str = ".1.3.6.1.4.1.2.3.51.2.2.21.3.1.1.3.1";

/// Fan speed (`"45% of maximum"`) for slot 1..=10
pub fn fan_speed(slot: u8) -> String {
    format!("{}.2.3.50.1.4.{}", MM, slot)
}

/// Power module presence (0/1) for slot 1..=6
pub fn power_module_exists(slot: u8) -> String {
    format!("{}.2.4.1.1.2.{}", MM, slot)
}

/// Power module state (0 unknown, 1 good, 2 warning, 3 not available)
pub fn power_module_state(slot: u8) -> String {
    format!("{}.2.4.1.1.3.{}", MM, slot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_oids() {
        assert_eq!(fan_speed(10), ".1.3.6.1.4.1.2.3.51.2.2.3.50.1.4.10");
        assert_eq!(power_module_exists(1), ".1.3.6.1.4.1.2.3.51.2.2.4.1.1.2.1");
        assert_eq!(power_module_state(6), ".1.3.6.1.4.1.2.3.51.2.2.4.1.1.3.6");
    }

    #[test]
    fn test_scalars_live_under_mm_tree() {
        for oid in [
            SYSTEM_HEALTH,
            AMBIENT_TEMPERATURE,
            MACHINE_TYPE,
            MACHINE_MODEL,
            SERIAL_NUMBER,
            FIRMWARE_VERSION,
        ] {
            assert!(oid.starts_with(MM), "{} outside {}", oid, MM);
        }
    }
}
