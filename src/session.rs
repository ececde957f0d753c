//! Attempt lifecycle
//!
//! A `Session` plays one level at a time. It turns host taps into tick input,
//! runs fixed simulation steps, resets the attempt on failure and moves on to
//! the next level on completion, notifying the presentation layer as it goes.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::error::Result;
use crate::settings::Settings;
use crate::sim::{
    FailureReason, LevelConfig, Outcome, Path, RunEvent, RunState, TickInput, TurnChoice, tick,
};

/// Where the player goes after finishing a level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    Level(u32),
    LevelSelect,
}

/// Presentation-layer hooks; every method defaults to a no-op
pub trait GameListener {
    fn on_attempt_started(&mut self, _config: &LevelConfig) {}
    fn on_progress(&mut self, _turns_made: u32, _required_turns: u32) {}
    fn on_attempt_failed(&mut self, _reason: FailureReason) {}
    fn on_attempt_completed(&mut self, _next: NextStep) {}
}

/// Listener that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullListener;

impl GameListener for NullListener {}

pub struct Session<L: GameListener = NullListener> {
    settings: Settings,
    level: u32,
    run: RunState,
    /// Fork layouts draw from here; polyline layouts never touch it
    rng: Pcg32,
    /// One-shot input latched between ticks
    input: TickInput,
    accumulator: f32,
    attempts: u32,
    finished: bool,
    listener: L,
}

impl<L: GameListener> Session<L> {
    /// Start playing `level`; fork layouts are seeded from OS entropy
    pub fn new(level: u32, settings: Settings, listener: L) -> Result<Self> {
        Self::with_seed(level, settings, listener, rand::random())
    }

    /// Start playing `level` with a fixed seed for fork layouts (replays, tests)
    pub fn with_seed(level: u32, settings: Settings, listener: L, seed: u64) -> Result<Self> {
        settings.validate()?;
        let level = level.clamp(1, settings.max_level);
        let mut rng = Pcg32::seed_from_u64(seed);
        let run = RunState::new(LevelConfig::from_level(level, &settings), &mut rng);
        let mut session = Self {
            settings,
            level,
            run,
            rng,
            input: TickInput::default(),
            accumulator: 0.0,
            attempts: 0,
            finished: false,
            listener,
        };
        session.announce_attempt();
        Ok(session)
    }

    /// Host tap; takes effect at the next tick boundary
    pub fn on_turn_requested(&mut self, side: TurnChoice) {
        if !self.finished {
            self.input.turn = Some(side);
        }
    }

    /// Run as many fixed ticks as `frame_dt` of wall-clock time covers
    ///
    /// Returns the number of ticks run.
    pub fn update(&mut self, frame_dt: f32) -> u32 {
        let frame_dt = frame_dt.clamp(0.0, 0.1);
        self.accumulator += frame_dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.tick();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    /// Run exactly one fixed tick
    pub fn tick(&mut self) -> Option<RunEvent> {
        if self.finished {
            return None;
        }

        let input = std::mem::take(&mut self.input);
        let event = tick(&mut self.run, &input, SIM_DT, &mut self.rng);

        match event {
            Some(RunEvent::Progress {
                turns_made,
                required_turns,
            }) => self.listener.on_progress(turns_made, required_turns),
            Some(RunEvent::Failed(reason)) => {
                self.listener.on_attempt_failed(reason);
                self.restart_attempt();
            }
            Some(RunEvent::Completed) => self.finish_level(),
            None => {}
        }

        event
    }

    /// Throw away the current attempt and start the level over
    pub fn restart_attempt(&mut self) {
        let config = LevelConfig::from_level(self.level, &self.settings);
        self.run = RunState::new(config, &mut self.rng);
        self.input = TickInput::default();
        self.announce_attempt();
    }

    fn finish_level(&mut self) {
        let next = if self.level < self.settings.max_level {
            NextStep::Level(self.level + 1)
        } else {
            NextStep::LevelSelect
        };
        log::info!("Level {} cleared, next: {:?}", self.level, next);
        self.listener.on_attempt_completed(next);

        match next {
            NextStep::Level(level) => {
                self.level = level;
                self.attempts = 0;
                self.restart_attempt();
            }
            NextStep::LevelSelect => self.finished = true,
        }
    }

    fn announce_attempt(&mut self) {
        self.attempts += 1;
        log::info!(
            "Level {} attempt {}: {} turns required",
            self.level,
            self.attempts,
            self.run.config.required_turns
        );
        self.listener.on_attempt_started(&self.run.config);
        self.listener
            .on_progress(self.run.turns_made, self.run.config.required_turns);
    }

    pub fn current_path(&self) -> &Path {
        &self.run.path
    }

    pub fn position(&self) -> Vec2 {
        self.run.actor.pos
    }

    pub fn heading(&self) -> f32 {
        self.run.actor.heading
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn turns_made(&self) -> u32 {
        self.run.turns_made
    }

    pub fn required_turns(&self) -> u32 {
        self.run.config.required_turns
    }

    pub fn outcome(&self) -> Outcome {
        self.run.outcome
    }

    /// Attempts made at the current level (1 on the first try)
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// True once the last level has been cleared
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }
}
