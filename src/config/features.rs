//! Feature flags configuration

use serde::Deserialize;

use crate::domain::activity::ActivityRules;

/// Feature flags for optional rules
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FeatureFlags {
    /// Reject activities whose end time is not after their start time
    #[serde(default)]
    pub enforce_activity_time_order: bool,
}

impl FeatureFlags {
    pub fn activity_rules(&self) -> ActivityRules {
        ActivityRules {
            enforce_time_order: self.enforce_activity_time_order,
        }
    }
}
