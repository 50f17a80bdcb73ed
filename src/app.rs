use std::io;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use log::{info, warn};
use rand::{rngs::StdRng, SeedableRng};

use crate::config::{Config, SoundMode};
use crate::food::RngSource;
use crate::game::Game;
use crate::input::{self, KeyAction};
use crate::render;
use crate::sound::{Bell, Mute, SoundEffect};
use crate::term::{TermManager, FIELD_ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Restart,
    Quit,
}

pub fn make_sound(mode: SoundMode) -> Box<dyn SoundEffect> {
    match mode {
        SoundMode::Mute => Box::new(Mute),
        SoundMode::Bell => Box::new(Bell::new(io::stdout())),
        SoundMode::Tone => tone_or_bell(),
    }
}

#[cfg(feature = "audio")]
fn tone_or_bell() -> Box<dyn SoundEffect> {
    match crate::sound::Tone::new() {
        Ok(tone) => Box::new(tone),
        Err(err) => {
            warn!("No audio output ({}), using the terminal bell", err);
            Box::new(Bell::new(io::stdout()))
        }
    }
}

#[cfg(not(feature = "audio"))]
fn tone_or_bell() -> Box<dyn SoundEffect> {
    warn!("Built without the `audio` feature, using the terminal bell");
    Box::new(Bell::new(io::stdout()))
}

/// Owns the terminal and runs game sessions until the player quits.
pub struct App {
    term: TermManager,
    sound: Box<dyn SoundEffect>,
    seed: Option<u64>,
    show_intro: bool,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let term = TermManager::stdout().context("Failed to size up the terminal")?;
        Ok(App {
            term,
            sound: make_sound(config.sound),
            seed: config.seed,
            show_intro: !config.no_intro,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        self.term.setup().context("Failed to prepare the terminal")?;

        let result = self.run_sessions();

        let restored = self.term.restore();
        if let Err(err) = &restored {
            warn!("Failed to restore the terminal: {}", err);
        }
        result?;
        restored.context("Failed to restore the terminal")
    }

    fn run_sessions(&mut self) -> Result<()> {
        if self.show_intro && self.show_intro_screen()? == SessionEnd::Quit {
            return Ok(());
        }

        let mut sessions = 0u32;
        loop {
            sessions += 1;
            match self.play(sessions)? {
                SessionEnd::Restart => continue,
                SessionEnd::Quit => break,
            }
        }
        info!("Quitting after {} session(s)", sessions);
        Ok(())
    }

    fn show_intro_screen(&mut self) -> Result<SessionEnd> {
        self.term.clear_screen()?;
        self.term.show_message(&[
            "Arrow keys or WASD to move",
            "Esc or Q to quit",
            "",
            "Press any key to begin",
        ])?;

        let key = read_key_blocking()?;
        Ok(match input::action_for(&key) {
            KeyAction::Quit => SessionEnd::Quit,
            _ => SessionEnd::Restart,
        })
    }

    /// One session: ticks are driven by a deadline re-armed after each
    /// tick while the game runs. Keys read in between only update the
    /// buffered direction, so the newest one wins.
    fn play(&mut self, session: u32) -> Result<SessionEnd> {
        let seed = self.seed.unwrap_or_else(rand::random);
        info!("Session {} started with seed {}", session, seed);
        let mut game = Game::new(RngSource(StdRng::seed_from_u64(seed)));

        self.term.clear_screen()?;
        self.term.draw_borders()?;
        render::draw_frame(&mut self.term, &game.snapshot());
        self.term.present().context("Failed to draw frame")?;

        let mut deadline = Instant::now() + game.tick_interval();
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !timeout.is_zero() && event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    match input::action_for(&key) {
                        KeyAction::Steer(dir) => {
                            game.steer(dir);
                        }
                        KeyAction::Quit => return Ok(SessionEnd::Quit),
                        KeyAction::Restart | KeyAction::None => {}
                    }
                }
                continue;
            }

            let outcome = game.tick(&mut self.term, self.sound.as_mut());
            self.term.present().context("Failed to draw frame")?;
            match outcome.next_tick {
                Some(interval) => deadline = Instant::now() + interval,
                None => break,
            }
        }

        self.game_over_prompt(game.score())
    }

    fn game_over_prompt(&mut self, score: u32) -> Result<SessionEnd> {
        let (_, top) = self.term.field_origin();
        let score_line = format!("Score: {}", score);
        self.term.show_message_at(
            &[score_line.as_str(), "", "Press R to play again,", "any other key to quit"],
            top + FIELD_ROWS * 3 / 4,
        )?;

        let key = read_key_blocking()?;
        Ok(match input::action_for(&key) {
            KeyAction::Restart => SessionEnd::Restart,
            _ => SessionEnd::Quit,
        })
    }
}

fn read_key_blocking() -> io::Result<KeyEvent> {
    loop {
        if let Event::Key(ev) = event::read()? {
            if ev.kind == KeyEventKind::Press {
                return Ok(ev);
            }
        }
    }
}
