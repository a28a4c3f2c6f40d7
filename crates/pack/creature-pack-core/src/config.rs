//! Core configuration for creature-pack-core.

use serde::{Deserialize, Serialize};

/// Configuration for registry sizing.
/// Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial capacity hint for the asset map.
    pub asset_capacity: usize,
    /// Initial capacity hint for the player map.
    pub player_capacity: usize,
    /// Highest handle the allocator may issue.
    pub max_handle: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            asset_capacity: 8,
            player_capacity: 64,
            max_handle: i32::MAX as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: Config = serde_json::from_str(r#"{ "player_capacity": 4 }"#).unwrap();
        assert_eq!(cfg.player_capacity, 4);
        assert_eq!(cfg.asset_capacity, Config::default().asset_capacity);
        assert_eq!(cfg.max_handle, i32::MAX as u32);
    }
}
