use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub enabled: bool,
    /// Default level filter. The `RUST_LOG` environment variable overrides
    /// this when set.
    pub level: String,
    pub color: bool,
    pub timestamps: bool,
    /// Include thread names and ids in log lines.
    pub threads: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            color: true,
            timestamps: true,
            threads: false,
        }
    }
}
