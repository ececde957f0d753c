//! Screen flow
//!
//! Menu -> level select -> playing. Clearing the last level drops back to
//! level select. Only the transitions are modelled here; drawing each screen
//! is up to the host.

use crate::error::{Error, Result};
use crate::session::{GameListener, Session};
use crate::settings::Settings;
use crate::sim::TurnChoice;

/// The screen currently shown
pub enum Screen<L: GameListener> {
    Menu,
    LevelSelect,
    Playing(Box<Session<L>>),
}

impl<L: GameListener> Screen<L> {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Menu => "Menu",
            Screen::LevelSelect => "LevelSelect",
            Screen::Playing(_) => "Playing",
        }
    }
}

/// Owns the active screen and the settings new sessions are started with
pub struct Flow<L: GameListener> {
    settings: Settings,
    screen: Screen<L>,
}

impl<L: GameListener> Flow<L> {
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            screen: Screen::Menu,
        })
    }

    pub fn screen(&self) -> &Screen<L> {
        &self.screen
    }

    pub fn session(&self) -> Option<&Session<L>> {
        match &self.screen {
            Screen::Playing(session) => Some(&**session),
            _ => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut Session<L>> {
        match &mut self.screen {
            Screen::Playing(session) => Some(&mut **session),
            _ => None,
        }
    }

    /// "Start" on the menu
    pub fn start(&mut self) {
        if matches!(self.screen, Screen::Menu) {
            self.go_to(Screen::LevelSelect);
        }
    }

    /// Pick a level on the level-select screen
    pub fn select_level(&mut self, level: u32, listener: L) -> Result<()> {
        if !(1..=self.settings.max_level).contains(&level) {
            return Err(Error::LevelOutOfRange {
                level,
                max: self.settings.max_level,
            });
        }
        let session = Session::new(level, self.settings.clone(), listener)?;
        self.go_to(Screen::Playing(Box::new(session)));
        Ok(())
    }

    /// Leave whatever is showing and return to the menu
    pub fn back_to_menu(&mut self) {
        self.go_to(Screen::Menu);
    }

    /// Tap while playing
    pub fn tap(&mut self, side: TurnChoice) {
        if let Some(session) = self.session_mut() {
            session.on_turn_requested(side);
        }
    }

    /// Advance the playing screen by a frame
    pub fn update(&mut self, frame_dt: f32) {
        let finished = match self.session_mut() {
            Some(session) => {
                session.update(frame_dt);
                session.is_finished()
            }
            None => false,
        };
        if finished {
            self.go_to(Screen::LevelSelect);
        }
    }

    fn go_to(&mut self, next: Screen<L>) {
        log::info!("Screen: {} -> {}", self.screen.name(), next.name());
        self.screen = next;
    }
}
