//! Path generation
//!
//! Two layouts exist:
//! - Polyline: a fixed zig-zag of axis-aligned segments, seeded by level number
//!   so a level always looks the same.
//! - Fork: a single junction with a left and right branch, one of which is the
//!   correct way. A fork-variant level chains several of these end to end.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::level::{LevelConfig, PathVariant};
use crate::consts::*;

/// Direction of a turn at a junction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnChoice {
    Left,
    Right,
}

impl TurnChoice {
    /// Rotate a direction a quarter turn (left = counter-clockwise)
    #[inline]
    pub fn rotate(self, dir: Vec2) -> Vec2 {
        match self {
            TurnChoice::Left => Vec2::new(-dir.y, dir.x),
            TurnChoice::Right => Vec2::new(dir.y, -dir.x),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            TurnChoice::Left => TurnChoice::Right,
            TurnChoice::Right => TurnChoice::Left,
        }
    }

    /// Which way the path bends going from `incoming` to `outgoing`
    pub fn between(incoming: Vec2, outgoing: Vec2) -> Option<Self> {
        let cross = incoming.perp_dot(outgoing);
        if cross > 0.0 {
            Some(TurnChoice::Left)
        } else if cross < 0.0 {
            Some(TurnChoice::Right)
        } else {
            None
        }
    }
}

const LCG_MULTIPLIER: u64 = 6364136223846793005;
const LCG_INCREMENT: u64 = 1;

/// Linear congruential turn generator; the top bit picks the direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRng {
    state: u64,
}

impl TurnRng {
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed_state(seed),
        }
    }

    /// Generator for a level; the same level always yields the same turns
    pub fn for_level(level: u32) -> Self {
        Self::new(u64::from(level.max(1)))
    }

    pub fn next_choice(&mut self) -> TurnChoice {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        if self.state >> 63 == 0 {
            TurnChoice::Left
        } else {
            TurnChoice::Right
        }
    }
}

#[inline]
fn seed_state(seed: u64) -> u64 {
    seed.wrapping_mul(LCG_MULTIPLIER).wrapping_add(LCG_INCREMENT)
}

/// A straight piece of path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathSegment {
    pub start: Vec2,
    pub end: Vec2,
}

impl PathSegment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Shortest distance from a point to this segment
    #[inline]
    pub fn distance_to(&self, point: Vec2) -> f32 {
        super::collision::distance_to_segment(point, self.start, self.end)
    }
}

/// Fork layout parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForkGeometry {
    /// Straight run from the fork origin to the junction
    pub fork_distance: f32,
    /// Sideways offset of each branch end
    pub branch_offset: f32,
    /// Forward length of each branch
    pub branch_length: f32,
}

impl Default for ForkGeometry {
    fn default() -> Self {
        Self {
            fork_distance: FORK_DISTANCE,
            branch_offset: BRANCH_OFFSET,
            branch_length: BRANCH_LENGTH,
        }
    }
}

/// A single binary junction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fork {
    /// Where the approach to the junction starts
    pub origin: Vec2,
    pub fork_point: Vec2,
    pub left_end: Vec2,
    pub right_end: Vec2,
    /// The branch the player has to take
    pub correct: TurnChoice,
}

impl Fork {
    pub fn branch_end(&self, side: TurnChoice) -> Vec2 {
        match side {
            TurnChoice::Left => self.left_end,
            TurnChoice::Right => self.right_end,
        }
    }

    pub fn approach(&self) -> PathSegment {
        PathSegment::new(self.origin, self.fork_point)
    }

    pub fn branch(&self, side: TurnChoice) -> PathSegment {
        PathSegment::new(self.fork_point, self.branch_end(side))
    }
}

/// Generated path for one attempt (or, for forks, the live junction)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Path {
    Polyline(Vec<Vec2>),
    Fork(Fork),
}

impl Path {
    /// Every drawable segment of the path
    pub fn segments(&self) -> Vec<PathSegment> {
        match self {
            Path::Polyline(points) => points
                .windows(2)
                .map(|w| PathSegment::new(w[0], w[1]))
                .collect(),
            Path::Fork(fork) => vec![
                fork.approach(),
                fork.branch(TurnChoice::Left),
                fork.branch(TurnChoice::Right),
            ],
        }
    }

    /// Finish marker position (polyline only; forks end on whichever branch is taken)
    pub fn finish(&self) -> Option<Vec2> {
        match self {
            Path::Polyline(points) => points.last().copied(),
            Path::Fork(_) => None,
        }
    }
}

/// Build the polyline for a level: `required_turns + 2` points starting at the origin
pub fn generate_polyline(config: &LevelConfig) -> Vec<Vec2> {
    let mut rng = TurnRng::for_level(config.level);
    let turns = config.required_turns.max(1) as usize;

    let mut points = Vec::with_capacity(turns + 2);
    let mut current = Vec2::ZERO;
    points.push(current);

    let mut direction = Vec2::Y;
    for _ in 0..turns {
        current += direction * config.segment_length;
        points.push(current);
        direction = rng.next_choice().rotate(direction);
    }

    current += direction * config.segment_length;
    points.push(current);

    points
}

/// Build one fork starting at `origin`; the correct side is a fair coin flip
pub fn generate_fork<R: Rng + ?Sized>(
    origin: Vec2,
    geometry: &ForkGeometry,
    rng: &mut R,
) -> Fork {
    let fork_point = origin + Vec2::new(0.0, geometry.fork_distance);
    let correct = if rng.random_bool(0.5) {
        TurnChoice::Left
    } else {
        TurnChoice::Right
    };
    Fork {
        origin,
        fork_point,
        left_end: fork_point + Vec2::new(-geometry.branch_offset, geometry.branch_length),
        right_end: fork_point + Vec2::new(geometry.branch_offset, geometry.branch_length),
        correct,
    }
}

/// Generate the starting path for an attempt
///
/// The polyline layout ignores `rng`; it is fully determined by the level.
pub fn generate<R: Rng + ?Sized>(config: &LevelConfig, rng: &mut R) -> Path {
    match config.variant {
        PathVariant::Polyline => Path::Polyline(generate_polyline(config)),
        PathVariant::Fork => Path::Fork(generate_fork(Vec2::ZERO, &config.fork, rng)),
    }
}
