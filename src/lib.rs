//! Snake on a fixed 20x20 grid.
//!
//! The rules live in `grid`, `snake`, `food`, `collision` and `game`; they
//! never touch a terminal, clock or audio device. Drawing, sound and input
//! come in through the `render::DrawSurface` and `sound::SoundEffect`
//! traits and the `input` key mapping, and `app` drives ticks in a
//! terminal.

pub mod app;
pub mod collision;
pub mod config;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod render;
pub mod snake;
pub mod sound;
pub mod term;
