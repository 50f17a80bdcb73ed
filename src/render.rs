use crate::game::Snapshot;
use crate::grid::{Position, CANVAS_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Green,
    Orange,
    Red,
    White,
    DodgerBlue,
}

pub const BACKGROUND_COLOR: Color = Color::Black;
pub const BODY_COLOR: Color = Color::Green;
pub const HEAD_COLOR: Color = Color::Orange;
pub const FOOD_COLOR: Color = Color::Red;
pub const SCORE_COLOR: Color = Color::White;
pub const GAME_OVER_COLOR: Color = Color::DodgerBlue;

pub const GAME_OVER_TEXT: &str = "Game Over!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// A point on the canvas, `0..CANVAS_SIZE` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

pub const SCORE_ANCHOR: PixelPoint = PixelPoint { x: CANVAS_SIZE - 80, y: 25 };
pub const CENTER: PixelPoint = PixelPoint { x: CANVAS_SIZE / 2, y: CANVAS_SIZE / 2 };

/// Whatever the game draws onto. Implementations own their failure handling.
pub trait DrawSurface {
    fn clear(&mut self, color: Color);
    fn fill_cell(&mut self, cell: Position, color: Color);
    fn fill_text(&mut self, text: &str, at: PixelPoint, align: TextAlign, color: Color);
}

/// Clear, food, body, head, then score, so the head is painted over any
/// body segment sharing its cell.
pub fn draw_frame(surface: &mut dyn DrawSurface, snapshot: &Snapshot) {
    surface.clear(BACKGROUND_COLOR);
    surface.fill_cell(snapshot.food, FOOD_COLOR);
    for segment in &snapshot.body {
        surface.fill_cell(*segment, BODY_COLOR);
    }
    surface.fill_cell(snapshot.head, HEAD_COLOR);
    surface.fill_text(
        &format!("Score {}", snapshot.score),
        SCORE_ANCHOR,
        TextAlign::Left,
        SCORE_COLOR,
    );
}

pub fn draw_game_over(surface: &mut dyn DrawSurface) {
    surface.fill_text(GAME_OVER_TEXT, CENTER, TextAlign::Center, GAME_OVER_COLOR);
}
