// Integration tests for `SubmodelClient` using wiremock.
#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use boardwatch_api::{Error, SubmodelClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, SubmodelClient) {
    let server = MockServer::start().await;
    let client = SubmodelClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn system_information_body() -> serde_json::Value {
    json!({
        "Hardware": {
            "Processor": {
                "CpuType": "ARMv8",
                "CpuCores": "4",
                "CpuUsage": "17 %"
            },
            "Memory": {
                "RAMFree": "729 MB",
                "RAMInstalled": "16Gi"
            },
            "BoardTemperature": "42 °C"
        },
        "OperatingSystem": "Linux",
        "LastUpdate": "2024-05-02T10:30:00+00:00"
    })
}

// ── GET /submodels/{name} ───────────────────────────────────────────

#[tokio::test]
async fn test_get_system_information() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/submodels/SystemInformation"))
        .respond_with(ResponseTemplate::new(200).set_body_json(system_information_body()))
        .mount(&server)
        .await;

    let info = client.get_system_information().await.unwrap();

    assert_eq!(info.hardware.processor.cpu_usage, "17 %");
    assert_eq!(info.hardware.board_temperature, "42 °C");
    assert_eq!(info.hardware.memory.ram_free, "729 MB");
    assert_eq!(info.hardware.memory.ram_installed, "16Gi");
    assert!(info.last_update.is_some());
    // Unknown fields are preserved in the flatten catch-all.
    assert_eq!(
        info.extra.get("OperatingSystem").and_then(|v| v.as_str()),
        Some("Linux")
    );
    assert_eq!(
        info.hardware
            .processor
            .extra
            .get("CpuCores")
            .and_then(|v| v.as_str()),
        Some("4")
    );
}

#[tokio::test]
async fn test_get_network_configuration() {
    let (server, client) = setup().await;

    let body = json!({
        "NetworkSetting": {
            "eth0": { "IPAddress": "192.168.0.10", "SubnetMask": "255.255.255.0" },
            "wlan0": { "IPAddress": "", "SSID": "factory-floor" }
        }
    });

    Mock::given(method("GET"))
        .and(path("/submodels/NetworkConfiguration"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let config = client.get_network_configuration().await.unwrap();

    assert_eq!(config.network_setting.len(), 2);
    assert_eq!(
        config.network_setting["eth0"]["IPAddress"],
        "192.168.0.10"
    );
    // IndexMap preserves document order.
    let names: Vec<&String> = config.network_setting.keys().collect();
    assert_eq!(names, ["eth0", "wlan0"]);
}

#[tokio::test]
async fn test_list_submodels() {
    let (server, client) = setup().await;

    let body = json!({
        "SystemInformation": { "Hardware": {} },
        "NetworkConfiguration": { "NetworkSetting": {} },
        "ManagedDevice": {}
    });

    Mock::given(method("GET"))
        .and(path("/submodels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let submodels = client.list_submodels().await.unwrap();
    assert_eq!(submodels.len(), 3);
    assert!(submodels.contains_key("SystemInformation"));
}

// ── PATCH /submodels/{name} ─────────────────────────────────────────

#[tokio::test]
async fn test_patch_submodel_sends_full_body() {
    let (server, client) = setup().await;

    let body = json!({
        "NetworkSetting": {
            "eth0": { "IPAddress": "10.0.0.2" }
        }
    });

    Mock::given(method("PATCH"))
        .and(path("/submodels/NetworkConfiguration"))
        .and(body_json(&body))
        .respond_with(ResponseTemplate::new(200).set_body_string("Submodel patched successfully"))
        .expect(1)
        .mount(&server)
        .await;

    client
        .patch_submodel("NetworkConfiguration", &body)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_patch_failure_surfaces_body() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/submodels/NetworkConfiguration"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string("Error patching submodel in database"),
        )
        .mount(&server)
        .await;

    let err = client
        .patch_submodel("NetworkConfiguration", &json!({}))
        .await
        .unwrap_err();

    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("Error patching submodel"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

// ── Error paths ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_unknown_submodel_is_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/submodels/NoSuchModel"))
        .respond_with(ResponseTemplate::new(404).set_body_string("submodel not found"))
        .mount(&server)
        .await;

    let err = client.get_submodel("NoSuchModel").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_malformed_body_keeps_raw_text() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/submodels/SystemInformation"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = client.get_system_information().await.unwrap_err();
    match err {
        Error::Deserialization { body, .. } => assert!(body.contains("not json")),
        other => panic!("expected Deserialization error, got {other:?}"),
    }
}
