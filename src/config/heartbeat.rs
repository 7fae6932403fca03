use serde::Deserialize;

/// Liveness endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HeartbeatConfig {
    /// Path answered by the heartbeat stage (e.g., "/ping")
    pub path: String,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            path: "/ping".to_string(),
        }
    }
}

impl HeartbeatConfig {
    /// Validate heartbeat configuration values
    pub fn validate(&self) -> Result<(), String> {
        if !self.path.starts_with('/') {
            return Err("HEARTBEAT_PATH must start with '/'".to_string());
        }

        Ok(())
    }
}
