//! Handlers against a fake host.

use hostfacts_cli::handlers::{get, list, snapshot};
use hostfacts_cli::{CliError, OutputFormat};
use hostfacts_core::testing::{FakeHost, StaticNetwork};
use hostfacts_core::{FactRegistry, Settings};

async fn registry() -> FactRegistry {
    let services = FakeHost::new()
        .network(
            StaticNetwork::new()
                .service("Wi-Fi")
                .port("Wi-Fi", "en0", "AA:BB:CC:DD:EE:FF")
                .wireless("en0"),
        )
        .build();
    FactRegistry::new(services, Settings::default()).await.unwrap()
}

async fn get_text(registry: &FactRegistry, name: &str) -> Result<String, CliError> {
    let mut out = Vec::new();
    get::execute(registry, name, OutputFormat::Text, &mut out).await?;
    Ok(String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn wifi_interface_and_address_come_from_the_wifi_port() {
    let registry = registry().await;
    assert_eq!(get_text(&registry, "wifiinterface").await.unwrap(), "en0\n");
    assert_eq!(
        get_text(&registry, "wifimacaddress").await.unwrap(),
        "AA:BB:CC:DD:EE:FF\n"
    );
}

#[tokio::test]
async fn unknown_fact_exits_with_not_found() {
    let registry = registry().await;
    let err = get_text(&registry, "nosuchfact").await.unwrap_err();
    assert!(matches!(err, CliError::NotFound(_)));
    assert_eq!(err.exit_code(), 2);
}

#[tokio::test]
async fn failing_fact_exits_with_resolve_error() {
    let registry = registry().await;
    // No command output is scripted, so sw_vers cannot run.
    let err = get_text(&registry, "productversion").await.unwrap_err();
    assert_eq!(err.exit_code(), 1);
}

#[tokio::test]
async fn list_prints_sorted_unique_names() {
    let registry = registry().await;
    let mut out = Vec::new();
    list::execute(&registry, OutputFormat::Text, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let names: Vec<&str> = text.lines().collect();

    assert_eq!(names.len(), 69);
    assert!(names.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(names.contains(&"wifiinterface"));
}

#[tokio::test]
async fn snapshot_survives_failing_facts() {
    let registry = registry().await;
    let mut out = Vec::new();
    snapshot::execute(&registry, OutputFormat::Text, false, &mut out)
        .await
        .unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(text.lines().count(), 69);
    assert!(text.contains("wifiinterface => en0\n"));
    assert!(text.contains("productversion => <failed: "));
    assert!(text.contains("uid => 501\n"));
}

#[tokio::test]
async fn json_snapshot_is_an_object_keyed_by_name() {
    let registry = registry().await;
    let mut out = Vec::new();
    snapshot::execute(&registry, OutputFormat::Json, false, &mut out)
        .await
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(parsed.as_object().unwrap().len(), 69);
    assert_eq!(parsed["wifiinterface"], "en0");
    assert!(parsed["productversion"]["error"].is_string());
}
