//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod motion;
pub mod path;
pub mod state;
pub mod tick;

pub use collision::{
    OffPathCheck, allowed_distance, check_off_path, distance_to_segment, measure_off_path,
};
pub use level::{LevelConfig, PathVariant, required_turns};
pub use motion::{Actor, Motion};
pub use path::{
    Fork, ForkGeometry, Path, PathSegment, TurnChoice, TurnRng, generate, generate_fork,
    generate_polyline,
};
pub use state::{Cursor, FailureReason, Outcome, RunEvent, RunState, TurnPhase};
pub use tick::{TickInput, tick};
