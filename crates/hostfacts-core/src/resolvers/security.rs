//! Security posture facts.

use super::FactContext;
use crate::domain::FactValue;
use crate::error::{FactResult, ResolveError};
use crate::registry::RegistryBuilder;

const FIREWALL_DOMAIN: &str = "/Library/Preferences/com.apple.alf";
const LOGIN_WINDOW_DOMAIN: &str = "/Library/Preferences/com.apple.loginwindow";
const SOFTWARE_UPDATE_DOMAIN: &str = "/Library/Preferences/com.apple.SoftwareUpdate";

/// Value of `remotelogin` when the process lacks root privileges.
pub const REQUIRES_ROOT: &str = "requires root privileges";

pub(super) fn register(builder: &mut RegistryBuilder) {
    builder
        .register("sipstatus", |ctx| Box::pin(sipstatus(ctx)))
        .register("gatekeeper", |ctx| Box::pin(gatekeeper(ctx)))
        .register("filevault", |ctx| Box::pin(filevault(ctx)))
        .register("firewall", |ctx| Box::pin(firewall(ctx)))
        .register("autologinuser", |ctx| Box::pin(autologinuser(ctx)))
        .register("guestaccount", |ctx| Box::pin(guestaccount(ctx)))
        .register("autoupdatecheck", |ctx| Box::pin(autoupdatecheck(ctx)))
        .register("remotelogin", |ctx| Box::pin(remotelogin(ctx)));
}

pub async fn sipstatus(ctx: &FactContext) -> FactResult {
    Ok(ctx.run_line("csrutil", &["status"]).await?.into())
}

pub async fn gatekeeper(ctx: &FactContext) -> FactResult {
    Ok(ctx.run_line("spctl", &["--status"]).await?.into())
}

pub async fn filevault(ctx: &FactContext) -> FactResult {
    Ok(ctx.run_line("fdesetup", &["status"]).await?.into())
}

/// Application firewall global state: 0 off, 1 on, 2 essential services only.
pub async fn firewall(ctx: &FactContext) -> FactResult {
    let Some(raw) = ctx
        .services
        .preferences
        .read(FIREWALL_DOMAIN, "globalstate")
        .await?
    else {
        return Ok(FactValue::Absent);
    };
    raw.trim().parse::<i64>().map(FactValue::Integer).map_err(|_| {
        ResolveError::unexpected(
            format!("{FIREWALL_DOMAIN} globalstate"),
            format!("'{raw}' is not an integer"),
        )
    })
}

pub async fn autologinuser(ctx: &FactContext) -> FactResult {
    let user = ctx
        .services
        .preferences
        .read(LOGIN_WINDOW_DOMAIN, "autoLoginUser")
        .await?;
    Ok(FactValue::optional_text(user))
}

pub async fn guestaccount(ctx: &FactContext) -> FactResult {
    preference_flag(ctx, LOGIN_WINDOW_DOMAIN, "GuestEnabled").await
}

pub async fn autoupdatecheck(ctx: &FactContext) -> FactResult {
    preference_flag(ctx, SOFTWARE_UPDATE_DOMAIN, "AutomaticCheckEnabled").await
}

/// Remote login state; only root may ask `systemsetup`.
pub async fn remotelogin(ctx: &FactContext) -> FactResult {
    if ctx.services.host.effective_uid()? != 0 {
        return Ok(FactValue::text(REQUIRES_ROOT));
    }
    Ok(ctx
        .run_line("systemsetup", &["-getremotelogin"])
        .await?
        .into())
}

async fn preference_flag(ctx: &FactContext, domain: &str, key: &str) -> FactResult {
    let Some(raw) = ctx.services.preferences.read(domain, key).await? else {
        return Ok(FactValue::Absent);
    };
    parse_flag(&raw).map(FactValue::Boolean).ok_or_else(|| {
        ResolveError::unexpected(format!("{domain} {key}"), format!("'{raw}' is not a boolean"))
    })
}

/// `defaults read` prints booleans as `1`/`0`; plists may also say
/// `true`/`false` or `YES`/`NO`.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
