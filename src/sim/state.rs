//! Per-attempt run state
//!
//! A `RunState` is built fresh for every attempt and never partially reset.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::level::LevelConfig;
use super::motion::Actor;
use super::path::{Path, PathSegment, TurnChoice, generate};

/// How an attempt ended (or that it hasn't)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    Completed,
    Failed,
}

/// Turn state machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// No live target: the attempt has not started moving or is over
    Idle,
    /// Moving along the current segment toward a junction or the finish
    Advancing,
}

/// Why an attempt was failed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FailureReason {
    /// Strayed too far from the live segment
    OffPath { distance: f32, allowed: f32 },
    /// Reached a junction without a pending turn request
    MissedTurn,
    /// Took the wrong branch of a fork
    WrongBranch { chosen: TurnChoice, correct: TurnChoice },
    /// Junction cursor does not belong to the current path layout
    CursorMismatch,
}

/// Where the runner is headed on the current path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cursor {
    /// Polyline: index of the target point
    Vertex(usize),
    /// Fork: heading to the junction
    Approach,
    /// Fork: heading to the end of the chosen branch
    Branch(TurnChoice),
}

/// Things the presentation layer cares about, emitted by `tick`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RunEvent {
    /// A junction was turned successfully
    Progress { turns_made: u32, required_turns: u32 },
    Completed,
    Failed(FailureReason),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub config: LevelConfig,
    pub path: Path,
    pub cursor: Cursor,
    pub actor: Actor,
    /// Point the runner is moving to (None once the attempt is over)
    pub target: Option<Vec2>,
    /// Segment most recently traversed or being traversed
    pub segment: PathSegment,
    pub turns_made: u32,
    /// Unconsumed turn request and the side it was made on
    pub pending_turn: Option<TurnChoice>,
    pub outcome: Outcome,
    pub failure: Option<FailureReason>,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl RunState {
    /// Fresh attempt: generate the path and aim at its first target
    pub fn new<R: Rng + ?Sized>(config: LevelConfig, rng: &mut R) -> Self {
        let path = generate(&config, rng);
        let (cursor, segment) = match &path {
            Path::Polyline(points) => {
                (Cursor::Vertex(1), PathSegment::new(points[0], points[1]))
            }
            Path::Fork(fork) => (Cursor::Approach, fork.approach()),
        };
        Self {
            config,
            path,
            cursor,
            actor: Actor::at(segment.start),
            target: Some(segment.end),
            segment,
            turns_made: 0,
            pending_turn: None,
            outcome: Outcome::InProgress,
            failure: None,
            time_ticks: 0,
        }
    }

    /// Latch a turn request; repeated requests before arrival do not stack
    pub fn request_turn(&mut self, side: TurnChoice) {
        if self.outcome == Outcome::InProgress {
            self.pending_turn = Some(side);
        }
    }

    #[inline]
    pub fn tapped_for_turn(&self) -> bool {
        self.pending_turn.is_some()
    }

    pub fn phase(&self) -> TurnPhase {
        if self.outcome == Outcome::InProgress && self.target.is_some() {
            TurnPhase::Advancing
        } else {
            TurnPhase::Idle
        }
    }

    /// The turn the upcoming junction calls for, if the runner is heading to one
    pub fn expected_turn(&self) -> Option<TurnChoice> {
        if self.outcome != Outcome::InProgress {
            return None;
        }
        match (&self.path, self.cursor) {
            (Path::Polyline(points), Cursor::Vertex(index)) if index + 1 < points.len() => {
                let incoming = points[index] - points[index - 1];
                let outgoing = points[index + 1] - points[index];
                TurnChoice::between(incoming, outgoing)
            }
            (Path::Fork(fork), Cursor::Approach) => Some(fork.correct),
            _ => None,
        }
    }

    /// Whether the runner is headed to the final point of the attempt
    pub fn on_final_leg(&self) -> bool {
        match (&self.path, self.cursor) {
            (Path::Polyline(points), Cursor::Vertex(index)) => index + 1 == points.len(),
            (Path::Fork(_), Cursor::Branch(_)) => self.turns_made >= self.config.required_turns,
            _ => false,
        }
    }

    pub(super) fn fail(&mut self, reason: FailureReason) -> RunEvent {
        self.outcome = Outcome::Failed;
        self.failure = Some(reason);
        self.target = None;
        self.pending_turn = None;
        RunEvent::Failed(reason)
    }

    pub(super) fn complete(&mut self) -> RunEvent {
        self.outcome = Outcome::Completed;
        self.target = None;
        self.pending_turn = None;
        RunEvent::Completed
    }

    /// Aim at a new segment
    pub(super) fn advance_to(&mut self, cursor: Cursor, segment: PathSegment) {
        self.cursor = cursor;
        self.segment = segment;
        self.target = Some(segment.end);
    }
}
