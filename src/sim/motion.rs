//! Runner motion toward a target point

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::MIN_STEP_DISTANCE;
use crate::heading_for;

/// The moving runner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Actor {
    pub pos: Vec2,
    /// Sprite rotation (radians, 0 = facing +Y)
    pub heading: f32,
}

/// What a motion step did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// No target; nothing to do
    Idle,
    /// Within the arrive threshold; the runner did not move
    Arrived,
    /// Moved by `step` units
    Moved { step: f32 },
}

impl Actor {
    pub fn at(pos: Vec2) -> Self {
        Self { pos, heading: 0.0 }
    }

    /// Advance toward `target` at constant speed for one fixed step
    pub fn step_toward(
        &mut self,
        target: Option<Vec2>,
        speed: f32,
        dt: f32,
        arrive_threshold: f32,
    ) -> Motion {
        let Some(target) = target else {
            return Motion::Idle;
        };

        let direction = target - self.pos;
        let distance = direction.length();
        if distance <= arrive_threshold {
            return Motion::Arrived;
        }

        let step = (speed * dt).min(distance);
        let normal = direction / distance.max(MIN_STEP_DISTANCE);
        self.pos += normal * step;
        self.heading = heading_for(normal);

        Motion::Moved { step }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use proptest::prelude::*;

    #[test]
    fn test_no_target_is_idle() {
        let mut actor = Actor::at(Vec2::new(3.0, 4.0));
        let motion = actor.step_toward(None, PLAYER_SPEED, SIM_DT, ARRIVE_THRESHOLD);
        assert_eq!(motion, Motion::Idle);
        assert_eq!(actor.pos, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_arrival_does_not_move() {
        let mut actor = Actor::at(Vec2::new(0.0, 295.0));
        let motion = actor.step_toward(
            Some(Vec2::new(0.0, 300.0)),
            PLAYER_SPEED,
            SIM_DT,
            ARRIVE_THRESHOLD,
        );
        assert_eq!(motion, Motion::Arrived);
        assert_eq!(actor.pos, Vec2::new(0.0, 295.0));
    }

    #[test]
    fn test_step_and_heading() {
        let mut actor = Actor::default();
        let motion = actor.step_toward(Some(Vec2::new(300.0, 0.0)), 60.0, 0.5, ARRIVE_THRESHOLD);
        assert_eq!(motion, Motion::Moved { step: 30.0 });
        assert!((actor.pos - Vec2::new(30.0, 0.0)).length() < 1e-4);
        assert!((actor.heading + std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_step_never_overshoots() {
        let mut actor = Actor::default();
        let target = Vec2::new(0.0, 10.0);
        actor.step_toward(Some(target), 10_000.0, SIM_DT, 1.0);
        assert!((actor.pos - target).length() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_arrives_within_bound(
            tx in -1000.0f32..1000.0,
            ty in -1000.0f32..1000.0,
            speed in 20.0f32..400.0,
        ) {
            let target = Vec2::new(tx, ty);
            let mut actor = Actor::default();
            let distance = target.length();
            let ticks = (distance / (speed * SIM_DT)).ceil() as u32;
            for _ in 0..ticks {
                actor.step_toward(Some(target), speed, SIM_DT, ARRIVE_THRESHOLD);
            }
            prop_assert!(actor.pos.distance(target) <= ARRIVE_THRESHOLD + 1e-2);
        }
    }
}
