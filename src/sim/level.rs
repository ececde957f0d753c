//! Per-level configuration
//!
//! Everything a level needs is derived from its number plus the global settings.

use serde::{Deserialize, Serialize};

use super::collision::allowed_distance;
use super::path::ForkGeometry;
use crate::settings::Settings;

/// Which path layout a level uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathVariant {
    /// Seeded zig-zag, identical on every attempt
    #[default]
    Polyline,
    /// Chained binary forks, re-rolled on every attempt
    Fork,
}

/// Number of junctions a level asks for (never less than one)
#[inline]
pub fn required_turns(level: u32, turns_per_level: u32) -> u32 {
    level.max(1).saturating_mul(turns_per_level).max(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// 1-based level number
    pub level: u32,
    pub required_turns: u32,
    pub variant: PathVariant,
    pub speed: f32,
    pub segment_length: f32,
    pub path_width: f32,
    pub off_path_margin: f32,
    pub arrive_threshold: f32,
    pub fork: ForkGeometry,
}

impl LevelConfig {
    pub fn from_level(level: u32, settings: &Settings) -> Self {
        let level = level.max(1);
        Self {
            level,
            required_turns: required_turns(level, settings.turns_per_level),
            variant: settings.variant,
            speed: settings.player_speed,
            segment_length: settings.segment_length,
            path_width: settings.path_width,
            off_path_margin: settings.off_path_margin,
            arrive_threshold: settings.arrive_threshold,
            fork: settings.fork,
        }
    }

    /// Tolerated distance from the live segment's centerline
    #[inline]
    pub fn allowed_deviation(&self) -> f32 {
        allowed_distance(self.path_width, self.off_path_margin)
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self::from_level(1, &Settings::default())
    }
}
