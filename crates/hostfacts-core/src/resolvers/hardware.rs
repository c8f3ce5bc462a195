//! Platform, CPU, memory and display facts.

use super::{FactContext, text_field};
use crate::derive::text::has_token;
use crate::domain::{FactValue, Structured};
use crate::error::{FactResult, ResolveError};
use crate::registry::RegistryBuilder;

const PLATFORM_QUERY: &str = "ioreg -a -d 2 -c IOPlatformExpertDevice";
const PLATFORM_ARGS: &[&str] = &["-a", "-d", "2", "-c", "IOPlatformExpertDevice"];
const CHILDREN_KEY: &str = "IORegistryEntryChildren";

/// CPU feature flag set when running under a hypervisor.
const HYPERVISOR_FLAG: &str = "VMM";

pub(super) fn register(builder: &mut RegistryBuilder) {
    builder
        .register("serialnumber", |ctx| Box::pin(serialnumber(ctx)))
        .register("platformuuid", |ctx| Box::pin(platformuuid(ctx)))
        .register("boardid", |ctx| Box::pin(boardid(ctx)))
        .register("modelidentifier", |ctx| Box::pin(modelidentifier(ctx)))
        .register("cpubrand", |ctx| Box::pin(cpubrand(ctx)))
        .register("cpucores", |ctx| Box::pin(cpucores(ctx)))
        .register("cputhreads", |ctx| Box::pin(cputhreads(ctx)))
        .register("memorysize", |ctx| Box::pin(memorysize(ctx)))
        .register("is64bit", |ctx| Box::pin(is64bit(ctx)))
        .register("isvirtualmachine", |ctx| Box::pin(isvirtualmachine(ctx)))
        .register("screenresolution", |ctx| Box::pin(screenresolution(ctx)));
}

/// Platform expert entry, the first child of the registry root.
async fn platform_expert(ctx: &FactContext) -> Result<Structured, ResolveError> {
    let root = ctx.run_structured("ioreg", PLATFORM_ARGS).await?;
    root.first_child(CHILDREN_KEY)
        .cloned()
        .ok_or_else(|| ResolveError::MissingEntry {
            query: PLATFORM_QUERY.to_string(),
        })
}

async fn platform_field(ctx: &FactContext, key: &str) -> FactResult {
    let entry = platform_expert(ctx).await?;
    Ok(text_field(&entry, PLATFORM_QUERY, key)?.into())
}

pub async fn serialnumber(ctx: &FactContext) -> FactResult {
    platform_field(ctx, "IOPlatformSerialNumber").await
}

pub async fn platformuuid(ctx: &FactContext) -> FactResult {
    platform_field(ctx, "IOPlatformUUID").await
}

/// Board identifier; stored as NUL-padded data.
pub async fn boardid(ctx: &FactContext) -> FactResult {
    platform_field(ctx, "board-id").await
}

pub async fn modelidentifier(ctx: &FactContext) -> FactResult {
    Ok(ctx.sysctl("hw.model").await?.into())
}

pub async fn cpubrand(ctx: &FactContext) -> FactResult {
    Ok(ctx.sysctl("machdep.cpu.brand_string").await?.into())
}

pub async fn cpucores(ctx: &FactContext) -> FactResult {
    Ok(ctx.sysctl_integer("hw.physicalcpu").await?.into())
}

pub async fn cputhreads(ctx: &FactContext) -> FactResult {
    Ok(ctx.sysctl_integer("hw.logicalcpu").await?.into())
}

/// Physical memory in bytes.
pub async fn memorysize(ctx: &FactContext) -> FactResult {
    Ok(ctx.sysctl_integer("hw.memsize").await?.into())
}

pub async fn is64bit(ctx: &FactContext) -> FactResult {
    Ok((ctx.sysctl_integer("hw.cpu64bit_capable").await? != 0).into())
}

pub async fn isvirtualmachine(ctx: &FactContext) -> FactResult {
    let features = ctx.sysctl("machdep.cpu.features").await?;
    Ok(has_token(&features, HYPERVISOR_FLAG).into())
}

/// Main display size in pixels, absent on headless hosts.
pub async fn screenresolution(ctx: &FactContext) -> FactResult {
    Ok(ctx
        .services
        .display
        .main_display_size()
        .await?
        .map_or(FactValue::Absent, |(width, height)| {
            FactValue::Pair(width, height)
        }))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::testing::{FakeHost, KeyedDecoder, ScriptedCommands, StaticDisplay};

    fn dict(entries: Vec<(&str, Structured)>) -> Structured {
        Structured::Dict(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    fn platform_tree() -> Structured {
        dict(vec![(
            CHILDREN_KEY,
            Structured::Array(vec![dict(vec![
                ("IOPlatformSerialNumber", Structured::String("C02XK0AAJGH5".into())),
                (
                    "IOPlatformUUID",
                    Structured::String("8A7B1C2D-0000-4E5F-9A8B-112233445566".into()),
                ),
                ("board-id", Structured::Data(b"Mac-827FB448E656EC26\0".to_vec())),
            ])]),
        )])
    }

    #[tokio::test]
    async fn platform_fields_come_from_first_child() {
        let ctx = FakeHost::new()
            .commands(ScriptedCommands::new().ok(PLATFORM_QUERY, "<platform/>"))
            .decoder(KeyedDecoder::new().entry("<platform/>", platform_tree()))
            .context()
            .await;

        assert_eq!(serialnumber(&ctx).await.unwrap(), FactValue::text("C02XK0AAJGH5"));
        assert_eq!(boardid(&ctx).await.unwrap(), FactValue::text("Mac-827FB448E656EC26"));
        assert_eq!(
            platformuuid(&ctx).await.unwrap(),
            FactValue::text("8A7B1C2D-0000-4E5F-9A8B-112233445566")
        );
    }

    #[tokio::test]
    async fn missing_child_is_a_failure_not_absent() {
        let ctx = FakeHost::new()
            .commands(ScriptedCommands::new().ok(PLATFORM_QUERY, "<empty/>"))
            .decoder(KeyedDecoder::new().entry("<empty/>", Structured::Dict(BTreeMap::new())))
            .context()
            .await;
        assert!(matches!(
            serialnumber(&ctx).await,
            Err(ResolveError::MissingEntry { .. })
        ));
    }

    #[tokio::test]
    async fn missing_field_is_a_failure() {
        let tree = dict(vec![(CHILDREN_KEY, Structured::Array(vec![dict(vec![])]))]);
        let ctx = FakeHost::new()
            .commands(ScriptedCommands::new().ok(PLATFORM_QUERY, "<bare/>"))
            .decoder(KeyedDecoder::new().entry("<bare/>", tree))
            .context()
            .await;
        assert!(matches!(
            serialnumber(&ctx).await,
            Err(ResolveError::MissingField { ref field, .. }) if field == "IOPlatformSerialNumber"
        ));
    }

    #[tokio::test]
    async fn flags_derive_from_sysctl() {
        let ctx = FakeHost::new()
            .commands(
                ScriptedCommands::new()
                    .ok("sysctl -n hw.cpu64bit_capable", "1\n")
                    .ok("sysctl -n machdep.cpu.features", "FPU VME DE PSE TSC MSR VMM\n")
                    .ok("sysctl -n hw.memsize", "17179869184\n")
                    .ok("sysctl -n hw.physicalcpu", "not-a-number\n"),
            )
            .context()
            .await;

        assert_eq!(is64bit(&ctx).await.unwrap(), FactValue::Boolean(true));
        assert_eq!(isvirtualmachine(&ctx).await.unwrap(), FactValue::Boolean(true));
        assert_eq!(memorysize(&ctx).await.unwrap(), FactValue::Integer(17_179_869_184));
        assert!(matches!(
            cpucores(&ctx).await,
            Err(ResolveError::Unexpected { .. })
        ));
    }

    #[tokio::test]
    async fn screen_resolution_is_a_pair_or_absent() {
        let ctx = FakeHost::new()
            .display(StaticDisplay::new(Some((3024, 1964))))
            .context()
            .await;
        assert_eq!(screenresolution(&ctx).await.unwrap(), FactValue::Pair(3024, 1964));

        let ctx = FakeHost::new().display(StaticDisplay::new(None)).context().await;
        assert!(screenresolution(&ctx).await.unwrap().is_absent());
    }
}
