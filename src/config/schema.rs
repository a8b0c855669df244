use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub workers: WorkerConfig,
    pub singleton: SingletonConfig,
    pub orchestrator: OrchestratorConfig,
    pub diagnostics: DiagnosticsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WorkerConfig {
    pub count: usize,
    pub message_prefix: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            count: 5,
            message_prefix: "Thread ".to_owned(),
        }
    }
}

impl WorkerConfig {
    pub fn labels(&self) -> impl Iterator<Item = String> {
        (1..=self.count).map(|index| index.to_string())
    }

    pub fn message_for(&self, label: &str) -> String {
        format!("{}{label}", self.message_prefix)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SingletonConfig {
    pub construction_delay_ms: u64,
}

impl SingletonConfig {
    pub fn construction_delay(&self) -> Duration {
        Duration::from_millis(self.construction_delay_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OrchestratorConfig {
    pub poll_interval_ms: u64,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 50,
        }
    }
}

impl OrchestratorConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DiagnosticsConfig {
    pub log_level: String,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
        }
    }
}
