//! Game configuration
//!
//! Board geometry and tuning for one game instance. Defaults reproduce the
//! classic 360x640 board; a JSON document may override any subset of fields.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;
use crate::sim::TierSet;

/// Upper bound on the number of tiers a config may declare
pub const MAX_TIER_COUNT: u32 = 256;

/// Board geometry, physics tuning and tier layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Board ===
    /// World width in pixels
    pub width: f32,
    /// World height in pixels
    pub height: f32,
    /// Y of the starting line (y grows downward)
    pub starting_line_y: f32,
    /// Overflow threshold below the starting line (None = height - starting line)
    pub container_height: Option<f32>,
    /// Drop point, measured downward from the starting line
    pub drop_offset: f32,

    // === Physics ===
    /// Gravity applied to each piece (pixels/s²)
    pub gravity: f32,
    /// Restitution (0.0 - 1.0)
    pub bounce: f32,

    // === Tiers ===
    /// Smallest piece size
    pub tier_min: u32,
    /// Size difference between adjacent tiers
    pub tier_step: u32,
    /// Number of tiers
    pub tier_count: u32,

    /// Seed for next-piece draws
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            starting_line_y: STARTING_LINE_Y,
            container_height: None,
            drop_offset: DROP_OFFSET,

            gravity: GRAVITY,
            bounce: BOUNCE,

            tier_min: TIER_MIN,
            tier_step: TIER_STEP,
            tier_count: TIER_COUNT,

            seed: 0,
        }
    }
}

impl GameConfig {
    /// Default board with the given seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, GameError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configs the rule engine cannot run with
    pub fn validate(&self) -> Result<(), GameError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(GameError::InvalidConfig(format!(
                "world must have positive size, got {}x{}",
                self.width, self.height
            )));
        }
        if !(0.0..self.height).contains(&self.starting_line_y) {
            return Err(GameError::InvalidConfig(format!(
                "starting line {} lies outside the world",
                self.starting_line_y
            )));
        }
        if self.container_height() <= 0.0 {
            return Err(GameError::InvalidConfig(
                "container height must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.bounce) {
            return Err(GameError::InvalidConfig(format!(
                "bounce {} outside 0.0 - 1.0",
                self.bounce
            )));
        }
        if !self.gravity.is_finite() {
            return Err(GameError::InvalidConfig("gravity must be finite".to_string()));
        }
        if self.tier_min == 0 || self.tier_step == 0 || self.tier_count == 0 {
            return Err(GameError::InvalidConfig(
                "tier min, step and count must all be non-zero".to_string(),
            ));
        }
        if self.tier_count > MAX_TIER_COUNT {
            return Err(GameError::InvalidConfig(format!(
                "tier count {} exceeds {}",
                self.tier_count, MAX_TIER_COUNT
            )));
        }
        let top = (self.tier_count - 1)
            .checked_mul(self.tier_step)
            .and_then(|span| self.tier_min.checked_add(span));
        if top.is_none() {
            return Err(GameError::InvalidConfig(format!(
                "largest tier overflows ({} + ({} - 1) * {})",
                self.tier_min, self.tier_count, self.tier_step
            )));
        }
        Ok(())
    }

    /// Effective overflow threshold
    pub fn container_height(&self) -> f32 {
        self.container_height
            .unwrap_or(self.height - self.starting_line_y)
    }

    /// Y coordinate new pieces are dropped from
    pub fn drop_y(&self) -> f32 {
        self.starting_line_y + self.drop_offset
    }

    pub fn tiers(&self) -> TierSet {
        TierSet::new(self.tier_min, self.tier_step, self.tier_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_board() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.container_height(), 540.0);
        assert_eq!(config.drop_y(), 150.0);

        let tiers = config.tiers();
        assert_eq!(tiers.min(), 20);
        assert_eq!(tiers.max(), 160);
        assert_eq!(tiers.len(), 15);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "seed": 7, "tier_count": 3 }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.tiers().max(), 40);
        assert_eq!(config.width, WORLD_WIDTH);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = GameConfig {
            container_height: Some(300.0),
            ..GameConfig::with_seed(42)
        };
        let json = config.to_json().unwrap();
        assert_eq!(GameConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_values() {
        let bad_bounce = GameConfig {
            bounce: 1.5,
            ..GameConfig::default()
        };
        assert!(matches!(bad_bounce.validate(), Err(GameError::InvalidConfig(_))));

        let no_tiers = GameConfig {
            tier_count: 0,
            ..GameConfig::default()
        };
        assert!(matches!(no_tiers.validate(), Err(GameError::InvalidConfig(_))));

        let line_below_floor = GameConfig {
            starting_line_y: 700.0,
            ..GameConfig::default()
        };
        assert!(line_below_floor.validate().is_err());
    }

    #[test]
    fn test_rejects_overflowing_tiers() {
        let overflowing = GameConfig::from_json(
            r#"{"tier_min":4000000000,"tier_step":1000000000,"tier_count":2}"#,
        );
        assert!(matches!(overflowing, Err(GameError::InvalidConfig(_))));

        let huge_count = GameConfig {
            tier_count: u32::MAX,
            tier_step: 1,
            ..GameConfig::default()
        };
        assert!(matches!(huge_count.validate(), Err(GameError::InvalidConfig(_))));

        // Largest tier exactly at u32::MAX still fits
        let at_limit = GameConfig {
            tier_min: u32::MAX - 10,
            tier_step: 10,
            tier_count: 2,
            ..GameConfig::default()
        };
        assert!(at_limit.validate().is_ok());
        assert_eq!(at_limit.tiers().max(), u32::MAX);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("circle_merge_config_{}.json", std::process::id()));
        let config = GameConfig {
            tier_count: 5,
            ..GameConfig::with_seed(99)
        };
        std::fs::write(&path, config.to_json().unwrap()).unwrap();

        let loaded = GameConfig::load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("circle_merge_no_such_config.json");
        assert!(matches!(GameConfig::load(&path), Err(GameError::Io(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(GameError::Config(_))
        ));
    }
}
