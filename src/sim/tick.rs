//! Fixed timestep simulation tick
//!
//! One call moves the runner, checks that it is still on the path, and resolves
//! junctions on arrival.

use rand::Rng;

use super::collision::measure_off_path;
use super::motion::Motion;
use super::path::{Path, PathSegment, TurnChoice, generate_fork};
use super::state::{Cursor, FailureReason, Outcome, RunEvent, RunState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Turn request captured since the last tick, with the side tapped
    pub turn: Option<TurnChoice>,
}

/// Advance the run by one fixed timestep
///
/// `rng` is only drawn from when a fork-variant run needs its next junction.
pub fn tick<R: Rng + ?Sized>(
    state: &mut RunState,
    input: &TickInput,
    dt: f32,
    rng: &mut R,
) -> Option<RunEvent> {
    if state.outcome != Outcome::InProgress {
        return None;
    }

    if let Some(side) = input.turn {
        state.request_turn(side);
    }

    state.time_ticks += 1;

    let config = state.config;
    match state
        .actor
        .step_toward(state.target, config.speed, dt, config.arrive_threshold)
    {
        Motion::Idle => None,
        Motion::Arrived => resolve_arrival(state, rng),
        Motion::Moved { .. } => {
            let check = measure_off_path(
                state.actor.pos,
                &state.segment,
                config.path_width,
                config.off_path_margin,
            );
            if check.in_bounds() {
                None
            } else {
                log::warn!(
                    "Level {}: off path by {:.1} (allowed {:.1})",
                    config.level,
                    check.distance,
                    check.allowed
                );
                Some(state.fail(FailureReason::OffPath {
                    distance: check.distance,
                    allowed: check.allowed,
                }))
            }
        }
    }
}

/// Turn state machine: decide what reaching the current target means
fn resolve_arrival<R: Rng + ?Sized>(state: &mut RunState, rng: &mut R) -> Option<RunEvent> {
    if state.on_final_leg() {
        log::info!(
            "Level {} completed ({} turns)",
            state.config.level,
            state.turns_made
        );
        return Some(state.complete());
    }

    match (&state.path, state.cursor) {
        (Path::Polyline(points), Cursor::Vertex(index)) => {
            let next = PathSegment::new(points[index], points[index + 1]);
            if state.pending_turn.take().is_none() {
                return Some(missed_turn(state));
            }
            state.turns_made += 1;
            state.advance_to(Cursor::Vertex(index + 1), next);
            Some(progress(state))
        }
        (Path::Fork(fork), Cursor::Approach) => {
            let fork = *fork;
            let Some(chosen) = state.pending_turn.take() else {
                return Some(missed_turn(state));
            };
            if chosen != fork.correct {
                log::warn!(
                    "Level {}: took {:?} branch, needed {:?}",
                    state.config.level,
                    chosen,
                    fork.correct
                );
                return Some(state.fail(FailureReason::WrongBranch {
                    chosen,
                    correct: fork.correct,
                }));
            }
            state.turns_made += 1;
            state.advance_to(Cursor::Branch(chosen), fork.branch(chosen));
            Some(progress(state))
        }
        (Path::Fork(fork), Cursor::Branch(side)) => {
            // Branch end: chain the next junction from here
            let origin = fork.branch_end(side);
            let next = generate_fork(origin, &state.config.fork, rng);
            log::debug!(
                "Level {}: next fork at ({:.0}, {:.0})",
                state.config.level,
                next.fork_point.x,
                next.fork_point.y
            );
            state.path = Path::Fork(next);
            state.advance_to(Cursor::Approach, next.approach());
            // Taps on the branch leg don't count toward the new junction
            state.pending_turn = None;
            None
        }
        (path, cursor) => {
            log::error!("Cursor {:?} does not fit path {:?}", cursor, path);
            Some(state.fail(FailureReason::CursorMismatch))
        }
    }
}

fn missed_turn(state: &mut RunState) -> RunEvent {
    log::warn!(
        "Level {}: reached junction {} without a turn request",
        state.config.level,
        state.turns_made + 1
    );
    state.fail(FailureReason::MissedTurn)
}

fn progress(state: &RunState) -> RunEvent {
    log::debug!(
        "Level {}: turn {}/{}",
        state.config.level,
        state.turns_made,
        state.config.required_turns
    );
    RunEvent::Progress {
        turns_made: state.turns_made,
        required_turns: state.config.required_turns,
    }
}
