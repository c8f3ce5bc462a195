//! Battery and power source facts.

use super::{FactContext, bool_field, integer_field, text_field};
use crate::derive::text::single_quoted;
use crate::domain::{FactValue, Structured};
use crate::error::{FactResult, ResolveError};
use crate::registry::RegistryBuilder;

const BATTERY_QUERY: &str = "ioreg -a -r -c AppleSmartBattery";
const BATTERY_ARGS: &[&str] = &["-a", "-r", "-c", "AppleSmartBattery"];

pub(super) fn register(builder: &mut RegistryBuilder) {
    builder
        .register("batterycyclecount", |ctx| Box::pin(batterycyclecount(ctx)))
        .register("batteryhealth", |ctx| Box::pin(batteryhealth(ctx)))
        .register("batteryserial", |ctx| Box::pin(batteryserial(ctx)))
        .register("batterycharging", |ctx| Box::pin(batterycharging(ctx)))
        .register("batterypercent", |ctx| Box::pin(batterypercent(ctx)))
        .register("powersource", |ctx| Box::pin(powersource(ctx)));
}

/// The smart battery entry. Hosts without a battery fail here.
async fn battery(ctx: &FactContext) -> Result<Structured, ResolveError> {
    let entries = ctx.run_structured("ioreg", BATTERY_ARGS).await?;
    entries
        .first_entry()
        .cloned()
        .ok_or_else(|| ResolveError::MissingEntry {
            query: BATTERY_QUERY.to_string(),
        })
}

pub async fn batterycyclecount(ctx: &FactContext) -> FactResult {
    let entry = battery(ctx).await?;
    Ok(integer_field(&entry, BATTERY_QUERY, "CycleCount")?.into())
}

/// `Good` when no permanent failure is flagged, `Failing` otherwise.
pub async fn batteryhealth(ctx: &FactContext) -> FactResult {
    let entry = battery(ctx).await?;
    let status = integer_field(&entry, BATTERY_QUERY, "PermanentFailureStatus")?;
    Ok(FactValue::text(if status == 0 { "Good" } else { "Failing" }))
}

pub async fn batteryserial(ctx: &FactContext) -> FactResult {
    let entry = battery(ctx).await?;
    Ok(text_field(&entry, BATTERY_QUERY, "BatterySerialNumber")?.into())
}

pub async fn batterycharging(ctx: &FactContext) -> FactResult {
    let entry = battery(ctx).await?;
    Ok(bool_field(&entry, BATTERY_QUERY, "IsCharging")?.into())
}

/// Current charge as a percentage of the present full-charge capacity.
pub async fn batterypercent(ctx: &FactContext) -> FactResult {
    let entry = battery(ctx).await?;
    let current = integer_field(&entry, BATTERY_QUERY, "CurrentCapacity")?;
    let max = integer_field(&entry, BATTERY_QUERY, "MaxCapacity")?;
    if max <= 0 {
        return Err(ResolveError::unexpected(
            BATTERY_QUERY,
            format!("MaxCapacity is {max}"),
        ));
    }
    Ok((current * 100 / max).into())
}

/// Name of the source the host is drawing from, e.g. `AC Power`.
pub async fn powersource(ctx: &FactContext) -> FactResult {
    let report = ctx.run_text("pmset", &["-g", "batt"]).await?;
    single_quoted(&report)
        .map(FactValue::text)
        .ok_or_else(|| ResolveError::unexpected("pmset -g batt", "no quoted power source"))
}
