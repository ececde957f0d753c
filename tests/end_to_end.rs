use catrunner::consts::SIM_DT;
use catrunner::sim::{
    FailureReason, LevelConfig, Outcome, Path, PathVariant, RunEvent, RunState, TickInput,
    TurnChoice, tick,
};
use catrunner::{GameListener, NextStep, Session, Settings};
use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn one_turn_settings() -> Settings {
    Settings {
        turns_per_level: 1,
        ..Settings::default()
    }
}

#[derive(Default)]
struct Recorder {
    started: u32,
    progress: Vec<(u32, u32)>,
    failures: Vec<FailureReason>,
    completed: Vec<NextStep>,
}

impl GameListener for Recorder {
    fn on_attempt_started(&mut self, _config: &LevelConfig) {
        self.started += 1;
    }
    fn on_progress(&mut self, turns_made: u32, required_turns: u32) {
        self.progress.push((turns_made, required_turns));
    }
    fn on_attempt_failed(&mut self, reason: FailureReason) {
        self.failures.push(reason);
    }
    fn on_attempt_completed(&mut self, next: NextStep) {
        self.completed.push(next);
    }
}

#[test]
fn test_level_one_completes_with_taps() {
    let mut rng = Pcg32::seed_from_u64(1);
    let config = LevelConfig::from_level(1, &one_turn_settings());
    assert_eq!(config.required_turns, 1);
    let mut state = RunState::new(config, &mut rng);

    let allowed = config.allowed_deviation();
    let mut ticks = 0;
    while state.outcome == Outcome::InProgress {
        // Tap while heading for a junction
        let input = TickInput {
            turn: state.expected_turn(),
        };
        tick(&mut state, &input, SIM_DT, &mut rng);

        if state.outcome == Outcome::InProgress {
            assert!(state.segment.distance_to(state.actor.pos) <= allowed);
            assert!(state.turns_made <= config.required_turns);
        }
        ticks += 1;
        assert!(ticks < 10_000, "run did not finish");
    }

    assert_eq!(state.outcome, Outcome::Completed);
    assert_eq!(state.turns_made, 1);
    let Path::Polyline(points) = &state.path else {
        panic!("level 1 should be a polyline");
    };
    let finish = points[points.len() - 1];
    assert!(state.actor.pos.distance(finish) <= config.arrive_threshold);
}

#[test]
fn test_drift_fails_and_reset_reproduces_path() {
    let mut rng = Pcg32::seed_from_u64(2);
    let config = LevelConfig::from_level(1, &one_turn_settings());
    let mut state = RunState::new(config, &mut rng);
    let initial_path = state.path.clone();

    // Halfway along the first segment
    for _ in 0..56 {
        assert_eq!(tick(&mut state, &TickInput::default(), SIM_DT, &mut rng), None);
    }
    state.actor.pos += Vec2::X * (config.allowed_deviation() + 5.0);

    let event = tick(&mut state, &TickInput::default(), SIM_DT, &mut rng);
    assert!(matches!(
        event,
        Some(RunEvent::Failed(FailureReason::OffPath { .. }))
    ));
    assert_eq!(state.outcome, Outcome::Failed);

    let reset = RunState::new(config, &mut rng);
    assert_eq!(reset.path, initial_path);
    assert_eq!(reset.turns_made, 0);
    assert_eq!(reset.outcome, Outcome::InProgress);
    assert_eq!(reset.actor.pos, Vec2::ZERO);
}

#[test]
fn test_session_plays_through_levels() {
    let settings = Settings {
        max_level: 3,
        ..one_turn_settings()
    };
    let mut session = Session::with_seed(1, settings, Recorder::default(), 77).expect("session");

    for _ in 0..100_000 {
        if session.is_finished() {
            break;
        }
        if !session.run().tapped_for_turn()
            && let Some(side) = session.run().expected_turn()
        {
            session.on_turn_requested(side);
        }
        session.tick();
    }

    assert!(session.is_finished());
    let hud = session.listener();
    assert_eq!(
        hud.completed,
        vec![NextStep::Level(2), NextStep::Level(3), NextStep::LevelSelect]
    );
    assert!(hud.failures.is_empty());
    assert_eq!(hud.started, 3);
    // 1 + 2 + 3 turns across the three levels
    let turns: Vec<_> = hud.progress.iter().filter(|(made, _)| *made > 0).collect();
    assert_eq!(turns.len(), 6);
}

#[test]
fn test_fork_session_missing_taps_keeps_resetting() {
    let settings = Settings::with_variant(PathVariant::Fork);
    let mut session = Session::with_seed(2, settings, Recorder::default(), 3).expect("session");

    for _ in 0..2_000 {
        session.tick();
    }

    let hud = session.listener();
    assert!(hud.failures.len() >= 2);
    assert!(hud.failures.iter().all(|f| *f == FailureReason::MissedTurn));
    assert_eq!(hud.started as usize, hud.failures.len() + 1);
    assert_eq!(session.level(), 2);
    assert!(hud.completed.is_empty());
}

#[test]
fn test_fork_wrong_side_fails() {
    let settings = Settings::with_variant(PathVariant::Fork);
    let mut session = Session::with_seed(1, settings, Recorder::default(), 11).expect("session");
    let wrong = session
        .run()
        .expected_turn()
        .map(TurnChoice::opposite)
        .expect("fork approach expects a turn");

    let mut event = None;
    for _ in 0..1_000 {
        session.on_turn_requested(wrong);
        event = session.tick();
        if event.is_some() {
            break;
        }
    }
    assert!(matches!(
        event,
        Some(RunEvent::Failed(FailureReason::WrongBranch { .. }))
    ));
    assert_eq!(session.turns_made(), 0);
    assert_eq!(session.outcome(), Outcome::InProgress);
}
