use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Period of the host timer that drives animated sliders.
    pub animation_interval_ms: u32,
    /// Upper bound on programmatic widget changes inside one batch.
    pub max_reactions: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            animation_interval_ms: 100,
            max_reactions: 32,
        }
    }
}
