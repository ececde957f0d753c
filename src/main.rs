//! Catrunner entry point
//!
//! The native build is a headless autopilot: it plays levels by tapping once
//! per junction and logs what happens. Useful for checking tuning changes.
//!
//! Usage: `catrunner [settings.json] [--level N] [--levels M]`

mod native {
    use std::process::ExitCode;

    use catrunner::sim::{FailureReason, LevelConfig};
    use catrunner::{GameListener, NextStep, Session, Settings};

    /// Safety net so a bad settings file can't spin forever
    const MAX_TICKS_PER_LEVEL: u64 = 60 * 60 * 10;

    struct Args {
        settings: Option<String>,
        level: u32,
        levels: u32,
    }

    fn parse_args() -> Result<Args, String> {
        let mut args = Args {
            settings: None,
            level: 1,
            levels: 3,
        };
        let mut it = std::env::args().skip(1);
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "--level" | "--levels" => {
                    let value = it
                        .next()
                        .ok_or_else(|| format!("{arg} needs a value"))?
                        .parse::<u32>()
                        .map_err(|e| format!("{arg}: {e}"))?;
                    if arg == "--level" {
                        args.level = value;
                    } else {
                        args.levels = value;
                    }
                }
                _ if args.settings.is_none() && !arg.starts_with("--") => {
                    args.settings = Some(arg);
                }
                _ => return Err(format!("unexpected argument: {arg}")),
            }
        }
        Ok(args)
    }

    /// Logs every notification, standing in for the HUD
    #[derive(Default)]
    struct HudLog {
        failures: u32,
        cleared: u32,
    }

    impl GameListener for HudLog {
        fn on_attempt_started(&mut self, config: &LevelConfig) {
            log::info!("Level {} ({:?})", config.level, config.variant);
        }

        fn on_progress(&mut self, turns_made: u32, required_turns: u32) {
            log::info!("Turns: {}/{}", turns_made, required_turns);
        }

        fn on_attempt_failed(&mut self, reason: FailureReason) {
            self.failures += 1;
            log::warn!("Attempt failed: {:?}", reason);
        }

        fn on_attempt_completed(&mut self, next: NextStep) {
            self.cleared += 1;
            log::info!("Level cleared, next: {:?}", next);
        }
    }

    pub fn run() -> ExitCode {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        log::info!("Catrunner (headless) starting...");

        let args = match parse_args() {
            Ok(args) => args,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::from(2);
            }
        };

        let settings = match args.settings.as_deref() {
            Some(path) => match Settings::load(path) {
                Ok(settings) => settings,
                Err(e) => {
                    log::error!("Failed to load settings: {e}");
                    return ExitCode::FAILURE;
                }
            },
            None => Settings::default(),
        };

        let mut session = match Session::new(args.level, settings, HudLog::default()) {
            Ok(session) => session,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        };

        for _ in 0..args.levels {
            let level = session.level();
            let mut ticks = 0u64;
            while session.level() == level && !session.is_finished() {
                let run = session.run();
                if !run.tapped_for_turn()
                    && let Some(side) = run.expected_turn()
                {
                    session.on_turn_requested(side);
                }
                session.tick();
                ticks += 1;
                if ticks > MAX_TICKS_PER_LEVEL {
                    log::error!("Level {level} did not finish within {MAX_TICKS_PER_LEVEL} ticks");
                    return ExitCode::FAILURE;
                }
            }
            log::info!(
                "Level {} took {} ticks ({:.1}s)",
                level,
                ticks,
                ticks as f32 * catrunner::consts::SIM_DT
            );
            if session.is_finished() {
                break;
            }
        }

        let hud = session.listener();
        log::info!(
            "Done: {} levels cleared, {} failed attempts",
            hud.cleared,
            hud.failures
        );
        ExitCode::SUCCESS
    }
}

fn main() -> std::process::ExitCode {
    native::run()
}
