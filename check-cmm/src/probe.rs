//! Query sequence against the CMM and the full check run
//!
//! Queries are strictly sequential, in a fixed order, and the first failure
//! ends the run. No query is retried here.

use crate::error::{NormalizeError, ProbeError, QueryFailure};
use crate::model::{
    ChassisReadings, FanReading, Inventory, PowerModuleReading, FAN_SLOTS, POWER_MODULE_SLOTS,
};
use crate::normalize;
use crate::reachability::Reachability;
use crate::report::{aggregate, Report};
use crate::snmp::{oids, SnmpAccessor, SnmpValue};
use tracing::{debug, info};

/// GET one OID and normalize it, naming the reading on failure
async fn read<A, T, F>(snmp: &A, reading: &str, oid: &str, convert: F) -> Result<T, ProbeError>
where
    A: SnmpAccessor + ?Sized,
    F: FnOnce(&SnmpValue) -> Result<T, NormalizeError>,
{
    let fail = |reason: QueryFailure| ProbeError::Query {
        reading: reading.to_string(),
        oid: oid.to_string(),
        reason,
    };

    let value = snmp.get(oid).await.map_err(|e| fail(e.into()))?;
    debug!("{} = {}", reading, value);
    convert(&value).map_err(|e| fail(e.into()))
}

/// Read every value the evaluators need
pub async fn collect<A: SnmpAccessor + ?Sized>(snmp: &A) -> Result<ChassisReadings, ProbeError> {
    let health = read(snmp, "CMM health", oids::SYSTEM_HEALTH, normalize::health_code).await?;
    info!("CMM health: {}", health);

    let ambient = read(
        snmp,
        "ambient temperature",
        oids::AMBIENT_TEMPERATURE,
        normalize::temperature,
    )
    .await?;
    info!("Ambient temperature: {}", ambient);

    let machine_type = read(snmp, "machine type", oids::MACHINE_TYPE, normalize::text).await?;
    let machine_model = read(snmp, "machine model", oids::MACHINE_MODEL, normalize::text).await?;
    let serial = read(snmp, "serial number", oids::SERIAL_NUMBER, normalize::text).await?;
    let firmware = read(snmp, "firmware version", oids::FIRMWARE_VERSION, normalize::text).await?;
    let inventory = Inventory {
        model: format!("{}-{}", machine_type, machine_model),
        serial,
        firmware,
    };
    info!(
        "Chassis {} serial {} firmware {}",
        inventory.model, inventory.serial, inventory.firmware
    );

    let mut fans = Vec::with_capacity(usize::from(FAN_SLOTS));
    for slot in 1..=FAN_SLOTS {
        let percent = read(
            snmp,
            &format!("fan {} speed", slot),
            &oids::fan_speed(slot),
            normalize::percentage,
        )
        .await?;
        info!("Fan {}: {}% of maximum", slot, percent);
        fans.push(FanReading { slot, percent });
    }

    let mut power_modules = Vec::with_capacity(usize::from(POWER_MODULE_SLOTS));
    for slot in 1..=POWER_MODULE_SLOTS {
        let installed = read(
            snmp,
            &format!("power module {} presence", slot),
            &oids::power_module_exists(slot),
            normalize::installed,
        )
        .await?;

        let module = if installed {
            let state = read(
                snmp,
                &format!("power module {} state", slot),
                &oids::power_module_state(slot),
                normalize::power_module_state,
            )
            .await?;
            PowerModuleReading::installed(slot, state)
        } else {
            PowerModuleReading::not_installed(slot)
        };
        info!("Power module {}: {}", slot, module.state);
        power_modules.push(module);
    }

    Ok(ChassisReadings {
        health,
        ambient,
        inventory,
        fans,
        power_modules,
    })
}

/// Reachability, collection, evaluation; every failure becomes UNKNOWN
pub async fn run_check<P, A>(host: &str, pinger: &P, snmp: &A) -> Report
where
    P: Reachability + ?Sized,
    A: SnmpAccessor + ?Sized,
{
    info!("Checking CMM {}", host);

    let outcome: Result<ChassisReadings, ProbeError> = async {
        pinger.probe(host).await?;
        debug!("{} answers ping", host);
        collect(snmp).await
    }
    .await;

    match outcome {
        Ok(readings) => {
            let report = aggregate(&readings);
            info!("Verdict: {}", report.severity);
            report
        }
        Err(e) => {
            info!("Check aborted: {}", e);
            Report::unknown(e.to_string())
        }
    }
}
