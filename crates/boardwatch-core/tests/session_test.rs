// Edit-commit lifecycle against a mock device: canonical state only
// changes on a confirmed save, and a failed save loses nothing.

use boardwatch_api::{SubmodelClient, TransportConfig};
use boardwatch_core::{CoreError, EditSession, SessionMode};
use pretty_assertions::assert_eq;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_body() -> serde_json::Value {
    serde_json::json!({
        "NetworkSetting": {
            "eth0": { "IPAddress": "192.168.1.50", "SubnetMask": "255.255.255.0" },
            "wlan0": { "IPAddress": "10.0.0.3", "SubnetMask": "255.255.255.0" }
        },
        "Hostname": "board-1",
        "LastUpdate": "2026-08-25T10:00:00Z"
    })
}

fn client_for(server: &MockServer) -> SubmodelClient {
    let base = Url::parse(&server.uri()).expect("mock server uri");
    SubmodelClient::new(base, &TransportConfig::default()).expect("client")
}

async fn mount_get(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/submodels/NetworkConfiguration"))
        .respond_with(ResponseTemplate::new(200).set_body_json(config_body()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn successful_save_promotes_draft_to_canonical() {
    let server = MockServer::start().await;
    mount_get(&server).await;

    // The PATCH body must be the whole document with the one field
    // changed and unmodelled fields (Hostname) intact.
    let mut expected = config_body();
    expected["NetworkSetting"]["eth0"]["IPAddress"] = "10.0.0.1".into();
    Mock::given(method("PATCH"))
        .and(path("/submodels/NetworkConfiguration"))
        .and(body_json(&expected))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = EditSession::load(client_for(&server))
        .await
        .expect("load");
    session.begin_edit().expect("begin");
    session
        .update_field("eth0", "IPAddress", "10.0.0.1")
        .expect("update");
    session.save().await.expect("save");

    assert_eq!(session.mode(), SessionMode::Viewing);
    assert!(session.draft().is_none());
    assert_eq!(
        session.canonical().network_setting["eth0"]["IPAddress"],
        "10.0.0.1"
    );
}

#[tokio::test]
async fn failed_save_returns_to_editing_with_draft_intact() {
    let server = MockServer::start().await;
    mount_get(&server).await;
    Mock::given(method("PATCH"))
        .and(path("/submodels/NetworkConfiguration"))
        .respond_with(ResponseTemplate::new(500).set_body_string("device busy"))
        .mount(&server)
        .await;

    let mut session = EditSession::load(client_for(&server))
        .await
        .expect("load");
    session.begin_edit().expect("begin");
    session
        .update_field("eth0", "IPAddress", "10.0.0.1")
        .expect("update");

    let err = session.save().await.expect_err("save must fail");
    assert!(matches!(err, CoreError::SaveRejected { .. }));

    // Nothing the user typed is lost, and the canonical copy is untouched.
    assert_eq!(session.mode(), SessionMode::Editing);
    assert!(session.is_dirty());
    assert_eq!(session.draft().expect("draft")["eth0"]["IPAddress"], "10.0.0.1");
    assert_eq!(
        session.canonical().network_setting["eth0"]["IPAddress"],
        "192.168.1.50"
    );
}

#[tokio::test]
async fn cancel_after_failed_save_restores_viewing() {
    let server = MockServer::start().await;
    mount_get(&server).await;
    Mock::given(method("PATCH"))
        .and(path("/submodels/NetworkConfiguration"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut session = EditSession::load(client_for(&server))
        .await
        .expect("load");
    session.begin_edit().expect("begin");
    session
        .update_field("wlan0", "IPAddress", "10.0.0.9")
        .expect("update");
    session.save().await.expect_err("save must fail");

    session.cancel_edit().expect("cancel");
    assert_eq!(session.mode(), SessionMode::Viewing);
    assert_eq!(
        session.visible_settings()["wlan0"]["IPAddress"],
        "10.0.0.3"
    );
}

#[tokio::test]
async fn interface_order_survives_load_and_save() {
    let server = MockServer::start().await;
    mount_get(&server).await;

    let session = EditSession::load(client_for(&server))
        .await
        .expect("load");
    let names: Vec<&String> = session.canonical().network_setting.keys().collect();
    assert_eq!(names, ["eth0", "wlan0"]);
}
