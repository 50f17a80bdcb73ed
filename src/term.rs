use std::io::{self, Stdout, Write};

use crossterm::style::{self, Color as TermColor};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, terminal};

use crate::grid::{Position, CANVAS_SIZE, TILE_COUNT};
use crate::render::{Color, DrawSurface, PixelPoint, TextAlign};

pub type TermInt = u16;
pub type Coords = (TermInt, TermInt);

/// Each grid cell is two columns wide so cells look square.
const CELL_COLUMNS: TermInt = 2;
const CELL_GLYPH: &str = "■ ";
pub const FIELD_COLUMNS: TermInt = TILE_COUNT as TermInt * CELL_COLUMNS;
pub const FIELD_ROWS: TermInt = TILE_COUNT as TermInt;

fn term_color(color: Color) -> TermColor {
    match color {
        Color::Black => TermColor::Black,
        Color::Green => TermColor::Green,
        Color::Orange => TermColor::Rgb { r: 255, g: 165, b: 0 },
        Color::Red => TermColor::Red,
        Color::White => TermColor::White,
        Color::DodgerBlue => TermColor::Rgb { r: 30, g: 144, b: 255 },
    }
}

/// Draws the play field, framed by a border, in the middle of a terminal.
pub struct TermManager<W: Write = Stdout> {
    out: W,
    width: TermInt,
    height: TermInt,
    /// Top-left terminal cell of the play field, inside the border.
    origin: Coords,
    /// First write error since the last `present`.
    error: Option<io::Error>,
}

impl TermManager<Stdout> {
    pub fn stdout() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Self::new(io::stdout(), width, height)
    }
}

impl<W: Write> TermManager<W> {
    pub fn new(out: W, width: TermInt, height: TermInt) -> io::Result<Self> {
        if width < FIELD_COLUMNS + 2 || height < FIELD_ROWS + 2 {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!(
                    "terminal is {}x{}, at least {}x{} is needed",
                    width,
                    height,
                    FIELD_COLUMNS + 2,
                    FIELD_ROWS + 2
                ),
            ));
        }
        let origin = ((width - FIELD_COLUMNS) / 2, (height - FIELD_ROWS) / 2);
        Ok(TermManager { out, width, height, origin, error: None })
    }

    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.out, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.out, cursor::Hide, cursor::DisableBlinking)
    }

    pub fn restore(&mut self) -> io::Result<()> {
        let raw = terminal::disable_raw_mode();
        execute!(self.out, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        raw
    }

    pub fn get_terminal_size(&self) -> Coords {
        (self.width, self.height)
    }

    pub fn field_origin(&self) -> Coords {
        self.origin
    }

    pub fn clear_screen(&mut self) -> io::Result<()> {
        execute!(self.out, style::ResetColor, terminal::Clear(ClearType::All))
    }

    pub fn draw_borders(&mut self) -> io::Result<()> {
        let (left, top) = (self.origin.0 - 1, self.origin.1 - 1);
        let (right, bottom) = (self.origin.0 + FIELD_COLUMNS, self.origin.1 + FIELD_ROWS);

        queue!(self.out, style::ResetColor)?;
        for x in left..=right {
            let ch = if x == left || x == right { '+' } else { '-' };
            queue!(self.out, cursor::MoveTo(x, top), style::Print(ch))?;
            queue!(self.out, cursor::MoveTo(x, bottom), style::Print(ch))?;
        }
        for y in top + 1..bottom {
            queue!(self.out, cursor::MoveTo(left, y), style::Print('|'))?;
            queue!(self.out, cursor::MoveTo(right, y), style::Print('|'))?;
        }
        self.out.flush()
    }

    /// A box of centered lines over the middle of the screen.
    pub fn show_message(&mut self, lines: &[&str]) -> io::Result<()> {
        self.show_message_at(lines, self.height / 2)
    }

    /// Like `show_message`, with the box centered on `center_row`.
    pub fn show_message_at(&mut self, lines: &[&str], center_row: TermInt) -> io::Result<()> {
        let msg_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as TermInt + 2;
        let msg_height = lines.len() as TermInt + 2;
        let top_left = (
            (self.width / 2).saturating_sub(msg_width / 2),
            center_row.saturating_sub(msg_height / 2),
        );

        queue!(self.out, style::ResetColor)?;
        let blank = " ".repeat(msg_width as usize);
        for y in [top_left.1, top_left.1 + msg_height - 1] {
            queue!(self.out, cursor::MoveTo(top_left.0, y), style::Print(&blank))?;
        }
        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            queue!(self.out, cursor::MoveTo(top_left.0, y), style::Print(padded_line))?;
        }
        self.out.flush()
    }

    /// Flushes the queued frame and reports any error hit while drawing it.
    pub fn present(&mut self) -> io::Result<()> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()
    }

    fn record(&mut self, res: io::Result<()>) {
        if let Err(err) = res {
            self.error.get_or_insert(err);
        }
    }

    fn cell_coords(&self, cell: Position) -> Coords {
        (
            self.origin.0 + cell.x as TermInt * CELL_COLUMNS,
            self.origin.1 + cell.y as TermInt,
        )
    }

    fn pixel_coords(&self, at: PixelPoint) -> Coords {
        let col = at.x.clamp(0, CANVAS_SIZE - 1) * FIELD_COLUMNS as i32 / CANVAS_SIZE;
        let row = at.y.clamp(0, CANVAS_SIZE - 1) * FIELD_ROWS as i32 / CANVAS_SIZE;
        (col as TermInt, row as TermInt)
    }
}

impl<W: Write> DrawSurface for TermManager<W> {
    fn clear(&mut self, color: Color) {
        let blank = " ".repeat(FIELD_COLUMNS as usize);
        let mut res = queue!(self.out, style::SetBackgroundColor(term_color(color)));
        for row in 0..FIELD_ROWS {
            if res.is_err() {
                break;
            }
            res = queue!(self.out, cursor::MoveTo(self.origin.0, self.origin.1 + row), style::Print(&blank));
        }
        self.record(res);
    }

    fn fill_cell(&mut self, cell: Position, color: Color) {
        if !cell.in_bounds() {
            return;
        }
        let (x, y) = self.cell_coords(cell);
        let res = queue!(
            self.out,
            cursor::MoveTo(x, y),
            style::SetForegroundColor(term_color(color)),
            style::Print(CELL_GLYPH)
        );
        self.record(res);
    }

    fn fill_text(&mut self, text: &str, at: PixelPoint, align: TextAlign, color: Color) {
        let (col, row) = self.pixel_coords(at);
        let len = text.chars().count() as TermInt;
        let start = match align {
            TextAlign::Left => col,
            TextAlign::Center => col.saturating_sub(len / 2),
        };
        let room = FIELD_COLUMNS.saturating_sub(start) as usize;
        let shown: String = text.chars().take(room).collect();
        let res = queue!(
            self.out,
            cursor::MoveTo(self.origin.0 + start, self.origin.1 + row),
            style::SetForegroundColor(term_color(color)),
            style::Print(shown)
        );
        self.record(res);
    }
}
