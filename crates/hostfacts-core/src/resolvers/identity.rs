//! Host and user identity facts.

use super::FactContext;
use crate::derive::normalize_hostname;
use crate::domain::FactValue;
use crate::error::FactResult;
use crate::registry::RegistryBuilder;

pub(super) fn register(builder: &mut RegistryBuilder) {
    builder
        .register("hostname", |ctx| Box::pin(hostname(ctx)))
        .register("computername", |ctx| Box::pin(computername(ctx)))
        .register("localhostname", |ctx| Box::pin(localhostname(ctx)))
        .register("currentuser", |ctx| Box::pin(currentuser(ctx)))
        .register("homedirectory", |ctx| Box::pin(homedirectory(ctx)))
        .register("shell", |ctx| Box::pin(shell(ctx)))
        .register("lang", |ctx| Box::pin(lang(ctx)))
        .register("workingdirectory", |ctx| Box::pin(workingdirectory(ctx)))
        .register("uid", |ctx| Box::pin(uid(ctx)))
        .register("gid", |ctx| Box::pin(gid(ctx)))
        .register("groups", |ctx| Box::pin(groups(ctx)))
        .register("consoleuser", |ctx| Box::pin(consoleuser(ctx)));
}

/// Kernel host name, with `.local` appended when it has no domain part.
pub async fn hostname(ctx: &FactContext) -> FactResult {
    let raw = ctx.services.host.hostname()?;
    Ok(FactValue::text(normalize_hostname(&raw)))
}

pub async fn computername(ctx: &FactContext) -> FactResult {
    Ok(ctx.run_line("scutil", &["--get", "ComputerName"]).await?.into())
}

pub async fn localhostname(ctx: &FactContext) -> FactResult {
    Ok(ctx.run_line("scutil", &["--get", "LocalHostName"]).await?.into())
}

fn env_fact(ctx: &FactContext, name: &str) -> FactValue {
    FactValue::optional_text(ctx.services.host.var(name))
}

pub async fn currentuser(ctx: &FactContext) -> FactResult {
    Ok(env_fact(ctx, "USER"))
}

pub async fn homedirectory(ctx: &FactContext) -> FactResult {
    Ok(env_fact(ctx, "HOME"))
}

pub async fn shell(ctx: &FactContext) -> FactResult {
    Ok(env_fact(ctx, "SHELL"))
}

pub async fn lang(ctx: &FactContext) -> FactResult {
    Ok(env_fact(ctx, "LANG"))
}

pub async fn workingdirectory(ctx: &FactContext) -> FactResult {
    Ok(ctx.services.host.current_dir()?.into())
}

pub async fn uid(ctx: &FactContext) -> FactResult {
    Ok(i64::from(ctx.services.host.uid()?).into())
}

pub async fn gid(ctx: &FactContext) -> FactResult {
    Ok(i64::from(ctx.services.host.gid()?).into())
}

/// Space-separated group names of the current user.
pub async fn groups(ctx: &FactContext) -> FactResult {
    Ok(ctx.run_line("id", &["-Gn"]).await?.into())
}

/// Owner of the console device, i.e. the user logged in at the screen.
pub async fn consoleuser(ctx: &FactContext) -> FactResult {
    Ok(ctx
        .run_line("stat", &["-f", "%Su", "/dev/console"])
        .await?
        .into())
}
