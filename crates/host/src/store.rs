//! Per-connection settings persisted as JSON.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::PathBuf;

use sandbox_connect_core::{ConfigProvider, ConnectionConfig, Error, Result};

use crate::session::ActiveConnection;

/// Settings store keeping one JSON object per connection name.
///
/// The current configuration is the one stored for the active connection;
/// a connection without stored settings starts from an empty configuration.
pub struct JsonConfigStore {
    path: PathBuf,
    active: ActiveConnection,
}

impl JsonConfigStore {
    pub fn new(path: impl Into<PathBuf>, active: ActiveConnection) -> Self {
        Self {
            path: path.into(),
            active,
        }
    }

    /// All stored connections.
    pub async fn load(&self) -> Result<BTreeMap<String, ConnectionConfig>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(Error::storage(format!(
                    "Failed to read settings file {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let mut connections: BTreeMap<String, ConnectionConfig> = serde_json::from_str(&content)
            .map_err(|e| Error::storage(format!("Failed to parse settings file: {}", e)))?;

        // Older files may omit the name inside each entry.
        for (name, config) in connections.iter_mut() {
            if config.name.is_empty() {
                config.name = name.clone();
            }
        }
        Ok(connections)
    }

    async fn save(&self, connections: &BTreeMap<String, ConnectionConfig>) -> Result<()> {
        let content = serde_json::to_string_pretty(connections)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                Error::storage(format!("Failed to create settings directory: {}", e))
            })?;
        }
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| Error::storage(format!("Failed to write settings file: {}", e)))?;
        Ok(())
    }
}

#[async_trait]
impl ConfigProvider for JsonConfigStore {
    async fn current_config(&self) -> Result<Option<ConnectionConfig>> {
        let Some(name) = self.active.get() else {
            return Ok(None);
        };

        let mut connections = self.load().await?;
        Ok(Some(
            connections
                .remove(&name)
                .unwrap_or_else(|| ConnectionConfig::named(name)),
        ))
    }

    async fn update(&self, config: &ConnectionConfig) -> Result<()> {
        if config.name.is_empty() {
            return Err(Error::invalid_request("cannot store settings without a connection name"));
        }

        let mut connections = self.load().await?;
        connections.insert(config.name.clone(), config.clone());
        self.save(&connections).await?;

        tracing::debug!(connection = %config.name, path = %self.path.display(), "Saved connection settings");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandbox_connect_core::ObjectFilter;

    #[tokio::test]
    async fn test_no_active_connection() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonConfigStore::new(dir.path().join("settings.json"), ActiveConnection::new());

        assert!(store.current_config().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_new_connection_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let active = ActiveConnection::new();
        active.set("Sandbox-BOB");
        let store = JsonConfigStore::new(dir.path().join("settings.json"), active);

        let config = store.current_config().await.unwrap().unwrap();
        assert_eq!(config, ConnectionConfig::named("Sandbox-BOB"));
    }

    #[tokio::test]
    async fn test_update_persists_and_keeps_other_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let active = ActiveConnection::new();
        let store = JsonConfigStore::new(&path, active.clone());

        let mut other = ConnectionConfig::named("pub400.com");
        other.library_list = vec!["QGPL".into()];
        store.update(&other).await.unwrap();

        active.set("Sandbox-BOB");
        let mut config = store.current_config().await.unwrap().unwrap();
        config.library_list.push("BOB".into());
        config.object_filters.push(ObjectFilter::sandbox_sources("BOB"));
        store.update(&config).await.unwrap();

        let reopened = JsonConfigStore::new(&path, active);
        let stored = reopened.load().await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored["pub400.com"], other);
        assert_eq!(reopened.current_config().await.unwrap().unwrap(), config);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        let active = ActiveConnection::new();
        active.set("Sandbox-BOB");
        let store = JsonConfigStore::new(&path, active);

        assert!(matches!(
            store.current_config().await,
            Err(Error::Storage(_))
        ));
    }

    #[tokio::test]
    async fn test_update_leaves_user_filters_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
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
        let partial_filter = serde_json::json!({
            "name": "Partial",
            "library": "QSYS",
            "object": "*"
        });
        let raw = serde_json::json!({
            "Sandbox-BOB": {
                "name": "Sandbox-BOB",
                "libraryList": ["QGPL"],
                "objectFilters": [user_filter, partial_filter]
            }
        });
        std::fs::write(&path, raw.to_string()).unwrap();

        let active = ActiveConnection::new();
        active.set("Sandbox-BOB");
        let store = JsonConfigStore::new(&path, active);

        let mut config = store.current_config().await.unwrap().unwrap();
        assert_eq!(config.object_filters.len(), 2);
        assert!(config.object_filters[1].member.is_empty());
        config.object_filters.push(ObjectFilter::sandbox_sources("BOB"));
        store.update(&config).await.unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let filters = written["Sandbox-BOB"]["objectFilters"].as_array().unwrap();
        assert_eq!(filters.len(), 3);
        assert_eq!(filters[0], user_filter);
        assert_eq!(filters[1]["name"], "Partial");
        assert_eq!(filters[2]["name"], "Sandbox Sources");
    }
}
