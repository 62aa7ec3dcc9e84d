// Persisted application flags

use serde::{Deserialize, Serialize};

/// Flags stored in the preferences file. Per-field defaults let a partial
/// file from an older version still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub auto_start_enabled: bool,
    #[serde(default = "default_first_launch")]
    pub first_launch: bool,
}

fn default_first_launch() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            auto_start_enabled: false,
            first_launch: true,
        }
    }
}
