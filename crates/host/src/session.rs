use std::sync::{Arc, RwLock};

/// Name of the connection most recently established in this process.
///
/// Shared between the invoker, which records a successful connection, and
/// the settings store, which serves that connection's settings.
#[derive(Debug, Clone, Default)]
pub struct ActiveConnection {
    name: Arc<RwLock<Option<String>>>,
}

impl ActiveConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name` as the active connection.
    pub fn set(&self, name: impl Into<String>) {
        let mut guard = self.name.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(name.into());
    }

    /// Active connection name, if any.
    pub fn get(&self) -> Option<String> {
        self.name
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
