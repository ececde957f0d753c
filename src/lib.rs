//! Catrunner - a tap-to-turn path runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (path generation, motion, off-path checks, turns)
//! - `session`: Attempt lifecycle and presentation notifications
//! - `screen`: Menu / level select / playing flow
//! - `settings`: Data-driven game tuning

pub mod error;
pub mod screen;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use screen::{Flow, Screen};
pub use session::{GameListener, NextStep, NullListener, Session};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Runner speed (units per second)
    pub const PLAYER_SPEED: f32 = 160.0;
    /// Length of each polyline segment
    pub const SEGMENT_LENGTH: f32 = 300.0;
    /// Distance at which the runner counts as having reached its target
    pub const ARRIVE_THRESHOLD: f32 = 8.0;
    /// Visual width of the path
    pub const PATH_WIDTH: f32 = 40.0;
    /// Extra tolerance beyond half the path width
    pub const OFF_PATH_MARGIN: f32 = 6.0;
    /// Guard against normalizing a near-zero direction
    pub const MIN_STEP_DISTANCE: f32 = 0.001;

    /// Turns required per level number
    pub const TURNS_PER_LEVEL: u32 = 2;
    /// Number of selectable levels
    pub const MAX_LEVEL: u32 = 10;
    /// Ceiling on turns in the hardest level (`turns_per_level * max_level`)
    pub const MAX_TOTAL_TURNS: u64 = 10_000;

    /// Fork geometry
    pub const FORK_DISTANCE: f32 = 300.0;
    pub const BRANCH_OFFSET: f32 = 150.0;
    pub const BRANCH_LENGTH: f32 = 300.0;

    /// The sprite faces +Y, so headings are rotated a quarter turn
    pub const HEADING_OFFSET: f32 = std::f32::consts::FRAC_PI_2;
}

/// Sprite heading for a direction of travel
#[inline]
pub fn heading_for(direction: Vec2) -> f32 {
    direction.y.atan2(direction.x) - consts::HEADING_OFFSET
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_heading_up_is_zero() {
        assert!(heading_for(Vec2::Y).abs() < 1e-6);
    }

    #[test]
    fn test_heading_sideways() {
        assert!((heading_for(Vec2::X) + FRAC_PI_2).abs() < 1e-6);
        assert!((heading_for(Vec2::NEG_X) - FRAC_PI_2).abs() < 1e-6);
        assert!((heading_for(Vec2::NEG_Y) + PI).abs() < 1e-6);
    }
}
