//! End-to-end tests wiring the resolution flows to the real host adapters.
//!
//! The connect program is a small `sh` script, so these only run on unix.
#![cfg(unix)]

use base64::Engine;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use sandbox_connect_core::mocks::{RecordingShell, ScriptedPrompter, StaticSourceControl};
use sandbox_connect_core::ConnectionConfig;
use sandbox_connect_host::{ActiveConnection, CommandInvoker, JsonConfigStore};
use sandbox_connect_resolver::{
    BootstrapOutcome, BootstrapResolver, ConfigureOutcome, LinkHandler, LinkOutcome, SandboxEnv,
};

// =============================================================================
// Helpers
// =============================================================================

fn env_of(pairs: &[(&str, &str)]) -> SandboxEnv {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    SandboxEnv::from_lookup(|name| vars.get(name).cloned())
}

/// Connect program that saves its payload and exits with `code`.
fn connect_program(payload: &Path, code: i32, active: ActiveConnection) -> CommandInvoker {
    CommandInvoker::new(
        "sh",
        vec![
            "-c".to_string(),
            format!("cat > '{}'; exit {}", payload.display(), code),
        ],
        active,
    )
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

async fn startup(
    env: SandboxEnv,
    settings: &Path,
    payload: &Path,
    exit_code: i32,
) -> (BootstrapOutcome, Arc<RecordingShell>) {
    let active = ActiveConnection::new();
    let shell = Arc::new(RecordingShell::new());
    let resolver = BootstrapResolver::new(
        env,
        Arc::new(StaticSourceControl::none()),
        Arc::new(connect_program(payload, exit_code, active.clone())),
        Arc::new(JsonConfigStore::new(settings, active)),
        shell.clone(),
    );
    (resolver.run().await, shell)
}

// =============================================================================
// Startup
// =============================================================================

#[tokio::test]
async fn test_startup_connects_and_configures_once() {
    let dir = tempfile::tempdir().unwrap();
    let settings = dir.path().join("settings").join("connections.json");
    let payload = dir.path().join("payload.json");
    let env = env_of(&[
        ("SANDBOX_SERVER", "host1"),
        ("SANDBOX_USER", "bob"),
        ("SANDBOX_PASS", "secret"),
    ]);

    let (outcome, _) = startup(env.clone(), &settings, &payload, 0).await;
    assert_eq!(outcome, BootstrapOutcome::Connected(Some(ConfigureOutcome::Updated)));

    let sent = read_json(&payload);
    assert_eq!(sent["host"], "host1");
    assert_eq!(sent["username"], "bob");
    assert_eq!(sent["password"], "secret");
    assert_eq!(sent["name"], "Sandbox-bob");

    let stored: HashMap<String, ConnectionConfig> =
        serde_json::from_value(read_json(&settings)).unwrap();
    let config = &stored["Sandbox-bob"];
    assert_eq!(config.library_list, vec!["bob"]);
    assert_eq!(config.object_filters.len(), 2);
    assert!(config.object_filters.iter().all(|f| f.library == "bob"));

    // A later startup for the same user leaves the settings alone.
    let before = std::fs::read_to_string(&settings).unwrap();
    let (outcome, _) = startup(env, &settings, &payload, 0).await;
    assert_eq!(
        outcome,
        BootstrapOutcome::Connected(Some(ConfigureOutcome::AlreadyConfigured))
    );
    assert_eq!(std::fs::read_to_string(&settings).unwrap(), before);
}

#[tokio::test]
async fn test_startup_failure_leaves_settings_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let settings = dir.path().join("connections.json");
    let payload = dir.path().join("payload.json");
    let env = env_of(&[
        ("VSCODE_IBMI_SANDBOX", "1"),
        ("SANDBOX_SERVER", "host1"),
        ("SANDBOX_USER", "bob"),
    ]);

    let (outcome, shell) = startup(env, &settings, &payload, 1).await;

    assert_eq!(outcome, BootstrapOutcome::Unavailable);
    assert!(!settings.exists());
    assert_eq!(read_json(&payload)["password"], "BOB");
    // Disclaimer, then the outage notice.
    assert_eq!(shell.events().len(), 2);
}

#[tokio::test]
async fn test_startup_keeps_user_filters_byte_for_byte() {
    let dir = tempfile::tempdir().unwrap();
    let settings = dir.path().join("connections.json");
    let payload = dir.path().join("payload.json");
    let user_filter = serde_json::json!({
        "name": "Mine",
        "filterType": "simple",
        "protected": true,
        "library": "QGPL",
        "object": "*",
        "types": ["*PGM", "*FILE"],
        "member": "*",
        "memberType": ""
    });
    let existing = serde_json::json!({
        "Sandbox-bob": {
            "name": "Sandbox-bob",
            "libraryList": ["QGPL"],
            "objectFilters": [user_filter, {"name": "No member", "library": "QSYS"}]
        }
    });
    std::fs::write(&settings, existing.to_string()).unwrap();
    let env = env_of(&[
        ("SANDBOX_SERVER", "host1"),
        ("SANDBOX_USER", "bob"),
        ("SANDBOX_PASS", "secret"),
    ]);

    let (outcome, _) = startup(env, &settings, &payload, 0).await;
    assert_eq!(outcome, BootstrapOutcome::Connected(Some(ConfigureOutcome::Updated)));

    let stored = read_json(&settings);
    let config = &stored["Sandbox-bob"];
    assert_eq!(config["libraryList"], serde_json::json!(["QGPL", "bob"]));
    let filters = config["objectFilters"].as_array().unwrap();
    assert_eq!(filters.len(), 4);
    assert_eq!(filters[0], user_filter);
    assert_eq!(filters[1]["name"], "No member");
    assert_eq!(filters[2]["name"], "Sandbox Sources");
    assert_eq!(filters[3]["name"], "Sandbox Object Filters");
}

// =============================================================================
// Links
// =============================================================================

#[tokio::test]
async fn test_link_password_reaches_connect_program_decoded() {
    let dir = tempfile::tempdir().unwrap();
    let payload = dir.path().join("payload.json");
    let active = ActiveConnection::new();
    let handler = LinkHandler::new(
        Arc::new(connect_program(&payload, 0, active.clone())),
        Arc::new(ScriptedPrompter::cancelled()),
        Arc::new(RecordingShell::new()),
    );

    let encoded = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode("p4ss?word>");
    let uri = format!("vscode://ext.id/connect?server=pub400.com&user=alice&pass={}", encoded);

    assert_eq!(handler.handle_uri(&uri).await, LinkOutcome::Connected);
    assert_eq!(read_json(&payload)["password"], "p4ss?word>");
    assert_eq!(active.get().as_deref(), Some("pub400.com"));
}
