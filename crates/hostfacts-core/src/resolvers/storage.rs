//! Boot drive and volume facts.

use super::{FactContext, integer_field, text_field};
use crate::domain::Structured;
use crate::error::{FactResult, ResolveError};
use crate::registry::RegistryBuilder;

const DRIVE_QUERY: &str = "ioreg -a -r -d 1 -c IOBlockStorageDevice";
const DRIVE_ARGS: &[&str] = &["-a", "-r", "-d", "1", "-c", "IOBlockStorageDevice"];
const CHARACTERISTICS_KEY: &str = "Device Characteristics";

const VOLUME_QUERY: &str = "diskutil info -plist /";
const VOLUME_ARGS: &[&str] = &["info", "-plist", "/"];

const LAYOUT_QUERY: &str = "diskutil list -plist";
const LAYOUT_ARGS: &[&str] = &["list", "-plist"];
const RECOVERY_VOLUME: &str = "Recovery";

pub(super) fn register(builder: &mut RegistryBuilder) {
    builder
        .register("drivemodel", |ctx| Box::pin(drivemodel(ctx)))
        .register("driverevision", |ctx| Box::pin(driverevision(ctx)))
        .register("driveserial", |ctx| Box::pin(driveserial(ctx)))
        .register("bootvolume", |ctx| Box::pin(bootvolume(ctx)))
        .register("bootvolumeuuid", |ctx| Box::pin(bootvolumeuuid(ctx)))
        .register("diskuuid", |ctx| Box::pin(diskuuid(ctx)))
        .register("filesystem", |ctx| Box::pin(filesystem(ctx)))
        .register("bootvolumefree", |ctx| Box::pin(bootvolumefree(ctx)))
        .register("recoveryuuid", |ctx| Box::pin(recoveryuuid(ctx)));
}

/// `Device Characteristics` of the first block storage device.
async fn drive_characteristics(ctx: &FactContext) -> Result<Structured, ResolveError> {
    let entries = ctx.run_structured("ioreg", DRIVE_ARGS).await?;
    let entry = entries.first_entry().ok_or_else(|| ResolveError::MissingEntry {
        query: DRIVE_QUERY.to_string(),
    })?;
    entry
        .get(CHARACTERISTICS_KEY)
        .cloned()
        .ok_or_else(|| ResolveError::missing_field(DRIVE_QUERY, CHARACTERISTICS_KEY))
}

async fn drive_field(ctx: &FactContext, key: &str) -> FactResult {
    let characteristics = drive_characteristics(ctx).await?;
    let value = text_field(&characteristics, DRIVE_QUERY, key)?;
    Ok(value.trim().to_string().into())
}

pub async fn drivemodel(ctx: &FactContext) -> FactResult {
    drive_field(ctx, "Product Name").await
}

pub async fn driverevision(ctx: &FactContext) -> FactResult {
    drive_field(ctx, "Product Revision Level").await
}

pub async fn driveserial(ctx: &FactContext) -> FactResult {
    drive_field(ctx, "Serial Number").await
}

async fn boot_volume_info(ctx: &FactContext) -> Result<Structured, ResolveError> {
    ctx.run_structured("diskutil", VOLUME_ARGS).await
}

async fn volume_field(ctx: &FactContext, key: &str) -> FactResult {
    let info = boot_volume_info(ctx).await?;
    Ok(text_field(&info, VOLUME_QUERY, key)?.into())
}

pub async fn bootvolume(ctx: &FactContext) -> FactResult {
    volume_field(ctx, "VolumeName").await
}

pub async fn bootvolumeuuid(ctx: &FactContext) -> FactResult {
    volume_field(ctx, "VolumeUUID").await
}

pub async fn diskuuid(ctx: &FactContext) -> FactResult {
    volume_field(ctx, "DiskUUID").await
}

pub async fn filesystem(ctx: &FactContext) -> FactResult {
    volume_field(ctx, "FilesystemType").await
}

/// Free bytes on the boot volume. APFS reports free space per container.
pub async fn bootvolumefree(ctx: &FactContext) -> FactResult {
    let info = boot_volume_info(ctx).await?;
    let free = integer_field(&info, VOLUME_QUERY, "APFSContainerFree")
        .or_else(|_| integer_field(&info, VOLUME_QUERY, "FreeSpace"))?;
    Ok(free.into())
}

/// UUID of the APFS volume named `Recovery`.
pub async fn recoveryuuid(ctx: &FactContext) -> FactResult {
    let layout = ctx.run_structured("diskutil", LAYOUT_ARGS).await?;
    let disks = layout
        .get("AllDisksAndPartitions")
        .and_then(Structured::as_array)
        .ok_or_else(|| ResolveError::missing_field(LAYOUT_QUERY, "AllDisksAndPartitions"))?;

    let recovery = disks
        .iter()
        .filter_map(|disk| disk.get("APFSVolumes").and_then(Structured::as_array))
        .flatten()
        .find(|volume| {
            volume.get("VolumeName").and_then(Structured::as_str) == Some(RECOVERY_VOLUME)
        })
        .ok_or_else(|| ResolveError::MissingEntry {
            query: format!("{LAYOUT_QUERY} ({RECOVERY_VOLUME} volume)"),
        })?;

    Ok(text_field(recovery, LAYOUT_QUERY, "VolumeUUID")?.into())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::domain::FactValue;
    use crate::testing::{FakeHost, KeyedDecoder, ScriptedCommands};

    fn dict(entries: Vec<(&str, Structured)>) -> Structured {
        Structured::Dict(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect::<BTreeMap<_, _>>(),
        )
    }

    fn text(value: &str) -> Structured {
        Structured::String(value.to_string())
    }

    #[tokio::test]
    async fn drive_fields_are_nested_and_trimmed() {
        let tree = Structured::Array(vec![dict(vec![(
            CHARACTERISTICS_KEY,
            dict(vec![
                ("Product Name", text("APPLE SSD AP0512Q")),
                ("Product Revision Level", text("387.100.")),
                ("Serial Number", text("  0ba0178a4c2b4a12  ")),
            ]),
        )])]);
        let ctx = FakeHost::new()
            .commands(ScriptedCommands::new().ok(DRIVE_QUERY, "<drives/>"))
            .decoder(KeyedDecoder::new().entry("<drives/>", tree))
            .context()
            .await;

        assert_eq!(drivemodel(&ctx).await.unwrap(), FactValue::text("APPLE SSD AP0512Q"));
        assert_eq!(driverevision(&ctx).await.unwrap(), FactValue::text("387.100."));
        assert_eq!(driveserial(&ctx).await.unwrap(), FactValue::text("0ba0178a4c2b4a12"));
    }

    #[tokio::test]
    async fn free_space_falls_back_to_volume_free_space() {
        let tree = dict(vec![
            ("VolumeName", text("Macintosh HD")),
            ("FilesystemType", text("apfs")),
            ("FreeSpace", Structured::Integer(120_000_000_000)),
        ]);
        let ctx = FakeHost::new()
            .commands(ScriptedCommands::new().ok(VOLUME_QUERY, "<info/>"))
            .decoder(KeyedDecoder::new().entry("<info/>", tree))
            .context()
            .await;

        assert_eq!(bootvolume(&ctx).await.unwrap(), FactValue::text("Macintosh HD"));
        assert_eq!(
            bootvolumefree(&ctx).await.unwrap(),
            FactValue::Integer(120_000_000_000)
        );
        assert!(matches!(
            diskuuid(&ctx).await,
            Err(ResolveError::MissingField { .. })
        ));
    }

    #[tokio::test]
    async fn recovery_volume_is_found_across_containers() {
        let tree = dict(vec![(
            "AllDisksAndPartitions",
            Structured::Array(vec![
                dict(vec![("DeviceIdentifier", text("disk0"))]),
                dict(vec![(
                    "APFSVolumes",
                    Structured::Array(vec![
                        dict(vec![("VolumeName", text("Macintosh HD")), ("VolumeUUID", text("AAAA"))]),
                        dict(vec![("VolumeName", text("Recovery")), ("VolumeUUID", text("BBBB"))]),
                    ]),
                )]),
            ]),
        )]);
        let ctx = FakeHost::new()
            .commands(ScriptedCommands::new().ok(LAYOUT_QUERY, "<list/>"))
            .decoder(KeyedDecoder::new().entry("<list/>", tree))
            .context()
            .await;
        assert_eq!(recoveryuuid(&ctx).await.unwrap(), FactValue::text("BBBB"));
    }

    #[tokio::test]
    async fn no_recovery_volume_is_a_failure() {
        let tree = dict(vec![("AllDisksAndPartitions", Structured::Array(vec![]))]);
        let ctx = FakeHost::new()
            .commands(ScriptedCommands::new().ok(LAYOUT_QUERY, "<list/>"))
            .decoder(KeyedDecoder::new().entry("<list/>", tree))
            .context()
            .await;
        assert!(matches!(
            recoveryuuid(&ctx).await,
            Err(ResolveError::MissingEntry { .. })
        ));
    }
}
