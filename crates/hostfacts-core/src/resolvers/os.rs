//! Operating system facts.

use chrono::{DateTime, SecondsFormat};

use super::FactContext;
use crate::derive::text::{major_version, zone_from_link};
use crate::domain::FactValue;
use crate::error::{FactResult, ResolveError};
use crate::registry::RegistryBuilder;

pub(super) fn register(builder: &mut RegistryBuilder) {
    builder
        .register("productname", |ctx| Box::pin(productname(ctx)))
        .register("productversion", |ctx| Box::pin(productversion(ctx)))
        .register("productversionmajor", |ctx| Box::pin(productversionmajor(ctx)))
        .register("buildversion", |ctx| Box::pin(buildversion(ctx)))
        .register("kernelversion", |ctx| Box::pin(kernelversion(ctx)))
        .register("architecture", |ctx| Box::pin(architecture(ctx)))
        .register("uptime", |ctx| Box::pin(uptime(ctx)))
        .register("boottime", |ctx| Box::pin(boottime(ctx)))
        .register("timezone", |ctx| Box::pin(timezone(ctx)));
}

pub async fn productname(ctx: &FactContext) -> FactResult {
    Ok(ctx.run_line("sw_vers", &["-productName"]).await?.into())
}

pub async fn productversion(ctx: &FactContext) -> FactResult {
    Ok(ctx.run_line("sw_vers", &["-productVersion"]).await?.into())
}

/// Leading component of `productversion` as an integer.
pub async fn productversionmajor(ctx: &FactContext) -> FactResult {
    let version = productversion(ctx).await?;
    let text = version.as_text().unwrap_or_default();
    major_version(text).map(FactValue::Integer).ok_or_else(|| {
        ResolveError::unexpected("sw_vers -productVersion", format!("'{text}' has no major version"))
    })
}

pub async fn buildversion(ctx: &FactContext) -> FactResult {
    Ok(ctx.run_line("sw_vers", &["-buildVersion"]).await?.into())
}

pub async fn kernelversion(ctx: &FactContext) -> FactResult {
    Ok(ctx.run_line("uname", &["-r"]).await?.into())
}

pub async fn architecture(ctx: &FactContext) -> FactResult {
    Ok(ctx.run_line("uname", &["-m"]).await?.into())
}

/// Seconds since boot.
pub async fn uptime(ctx: &FactContext) -> FactResult {
    let secs = ctx.services.host.uptime_secs();
    i64::try_from(secs)
        .map(FactValue::Integer)
        .map_err(|_| ResolveError::unexpected("uptime", format!("{secs} is out of range")))
}

/// Boot time in RFC 3339, UTC.
pub async fn boottime(ctx: &FactContext) -> FactResult {
    let secs = ctx.services.host.boot_time_secs();
    i64::try_from(secs)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|at| FactValue::text(at.to_rfc3339_opts(SecondsFormat::Secs, true)))
        .ok_or_else(|| ResolveError::unexpected("boot time", format!("{secs} is out of range")))
}

/// IANA zone name from the `/etc/localtime` link.
pub async fn timezone(ctx: &FactContext) -> FactResult {
    let target = ctx.run_line("readlink", &["/etc/localtime"]).await?;
    zone_from_link(&target).map(FactValue::Text).ok_or_else(|| {
        ResolveError::unexpected("readlink /etc/localtime", format!("'{target}' is not a zoneinfo path"))
    })
}
