use serde::{Deserialize, Serialize};

/// Bounds substituted when a program leaves its age window open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub default_age_min: u32,
    pub default_age_max: u32,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            default_age_min: 0,
            default_age_max: 100,
        }
    }
}
