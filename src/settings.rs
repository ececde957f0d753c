//! Game settings and tuning
//!
//! Loaded from an optional JSON file; any missing field falls back to the
//! built-in defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};
use crate::sim::{ForkGeometry, PathVariant, allowed_distance};

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Which path layout levels use
    pub variant: PathVariant,

    // === Movement ===
    /// Runner speed (units per second)
    pub player_speed: f32,
    /// Arrival radius around each target point
    pub arrive_threshold: f32,

    // === Path ===
    /// Length of each polyline segment
    pub segment_length: f32,
    /// Visual width of the path
    pub path_width: f32,
    /// Tolerance beyond half the path width before the runner is off-path
    pub off_path_margin: f32,
    /// Fork layout (fork variant only)
    pub fork: ForkGeometry,

    // === Progression ===
    /// Turns required per level number
    pub turns_per_level: u32,
    /// Highest selectable level
    pub max_level: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: PathVariant::Polyline,

            player_speed: PLAYER_SPEED,
            arrive_threshold: ARRIVE_THRESHOLD,

            segment_length: SEGMENT_LENGTH,
            path_width: PATH_WIDTH,
            off_path_margin: OFF_PATH_MARGIN,
            fork: ForkGeometry::default(),

            turns_per_level: TURNS_PER_LEVEL,
            max_level: MAX_LEVEL,
        }
    }
}

impl Settings {
    /// Default tuning with the given path variant
    pub fn with_variant(variant: PathVariant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("player_speed", self.player_speed),
            ("arrive_threshold", self.arrive_threshold),
            ("segment_length", self.segment_length),
            ("path_width", self.path_width),
            ("fork.fork_distance", self.fork.fork_distance),
            ("fork.branch_length", self.fork.branch_length),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidSettings(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !(self.off_path_margin.is_finite() && self.off_path_margin >= 0.0) {
            return Err(Error::InvalidSettings(format!(
                "off_path_margin must be non-negative, got {}",
                self.off_path_margin
            )));
        }
        if !self.fork.branch_offset.is_finite() {
            return Err(Error::InvalidSettings(
                "fork.branch_offset must be finite".to_string(),
            ));
        }
        if self.max_level == 0 {
            return Err(Error::InvalidSettings(
                "max_level must be at least 1".to_string(),
            ));
        }

        // Arrival is declared this far short of a junction, so the runner must
        // still be on the outgoing segment and short of every leg's end
        let allowed = self.allowed_deviation();
        let limits = [
            ("the allowed deviation", allowed),
            ("segment_length", self.segment_length),
            ("fork.fork_distance", self.fork.fork_distance),
            ("fork.branch_length", self.fork.branch_length),
        ];
        for (name, limit) in limits {
            if self.arrive_threshold >= limit {
                return Err(Error::InvalidSettings(format!(
                    "arrive_threshold ({}) must be below {name} ({limit})",
                    self.arrive_threshold
                )));
            }
        }

        let total_turns = u64::from(self.turns_per_level) * u64::from(self.max_level);
        if total_turns > MAX_TOTAL_TURNS {
            return Err(Error::InvalidSettings(format!(
                "turns_per_level * max_level must not exceed {MAX_TOTAL_TURNS}, got {total_turns}"
            )));
        }
        Ok(())
    }

    /// Tolerated distance from a segment's centerline
    pub fn allowed_deviation(&self) -> f32 {
        allowed_distance(self.path_width, self.off_path_margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.allowed_deviation(), 26.0);
        assert_eq!(settings.variant, PathVariant::Polyline);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "variant": "fork", "player_speed": 200.0 }"#)
            .expect("valid settings");
        assert_eq!(settings.variant, PathVariant::Fork);
        assert_eq!(settings.player_speed, 200.0);
        assert_eq!(settings.segment_length, SEGMENT_LENGTH);
        assert_eq!(settings.fork, ForkGeometry::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Settings::from_json(r#"{ "path_width": 0.0 }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidSettings(_)));

        let err = Settings::from_json(r#"{ "off_path_margin": -1.0 }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidSettings(_)));

        let err = Settings::from_json(r#"{ "max_level": 0 }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidSettings(_)));

        // Arrival radius wider than the on-path band
        let err = Settings::from_json(r#"{ "arrive_threshold": 30.0 }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidSettings(_)));

        let err = Settings::from_json(
            r#"{ "arrive_threshold": 20.0, "path_width": 200.0, "segment_length": 15.0 }"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidSettings(_)));

        let err = Settings::from_json(r#"{ "fork": { "fork_distance": 5.0 } }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidSettings(_)));

        let err = Settings::from_json(r#"{ "turns_per_level": 4294967295, "max_level": 10 }"#)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSettings(_)));

        let err = Settings::from_json(r#"{ "turns_per_level": 1001 }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidSettings(_)));
        assert!(Settings::from_json(r#"{ "turns_per_level": 1000 }"#).is_ok());
        assert!(Settings::from_json(r#"{ "arrive_threshold": 25.0 }"#).is_ok());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");

        let mut settings = Settings::with_variant(PathVariant::Fork);
        settings.turns_per_level = 1;
        settings.save(&path).expect("save");

        let loaded = Settings::load(&path).expect("load");
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = Settings::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
