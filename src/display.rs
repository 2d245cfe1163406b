/// Terminal surface — all crossterm I/O lives here.
///
/// The game draws in a fixed virtual viewport; this surface scales those
/// coordinates onto however many columns and rows the terminal has.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use lane_rush::entities::Point;
use lane_rush::render::{Surface, Tint};

// ── Colour palette ────────────────────────────────────────────────────────────

fn colour(tint: Tint) -> Color {
    match tint {
        Tint::Guide => Color::DarkBlue,
        Tint::HitZone => Color::DarkGrey,
        Tint::Receptor => Color::White,
        Tint::Red => Color::Red,
        Tint::Blue => Color::Blue,
        Tint::Bomb => Color::Magenta,
        Tint::Score => Color::Yellow,
        Tint::Misses => Color::Red,
        Tint::Level => Color::Cyan,
        Tint::Hit => Color::Green,
        Tint::Miss => Color::Red,
        Tint::WrongKey => Color::Yellow,
        Tint::Overlay => Color::Black,
        Tint::Hint => Color::DarkGrey,
    }
}

pub struct TerminalSurface<W: Write> {
    out: W,
    viewport: (f32, f32),
    cols: u16,
    rows: u16,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, viewport_width: f32, viewport_height: f32) -> Self {
        TerminalSurface {
            out,
            viewport: (viewport_width, viewport_height),
            cols: 80,
            rows: 24,
        }
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    /// Track the terminal size; called once per frame.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols.max(1);
        self.rows = rows.max(1);
    }

    /// Fractional cell coordinates for a viewport point.
    fn project(&self, p: Point) -> (f32, f32) {
        (
            p.x / self.viewport.0 * self.cols as f32,
            p.y / self.viewport.1 * self.rows as f32,
        )
    }

    fn cell(&self, col: f32, row: f32) -> Option<(u16, u16)> {
        let (c, r) = (col.floor(), row.floor());
        if c < 0.0 || r < 0.0 || c >= self.cols as f32 || r >= self.rows as f32 {
            None
        } else {
            Some((c as u16, r as u16))
        }
    }

    fn put(&mut self, col: f32, row: f32, s: &str) -> std::io::Result<()> {
        if let Some((c, r)) = self.cell(col, row) {
            self.out.queue(cursor::MoveTo(c, r))?;
            self.out.queue(Print(s))?;
        }
        Ok(())
    }
}

/// Character used to draw a line segment of the given slope.
fn stroke(dx: f32, dy: f32) -> &'static str {
    if dy.abs() < dx.abs() * 0.4 {
        "─"
    } else if dx.abs() < dy.abs() * 0.4 {
        "│"
    } else if (dx > 0.0) == (dy > 0.0) {
        "╲"
    } else {
        "╱"
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn clear(&mut self) -> std::io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn line(&mut self, from: Point, to: Point, tint: Tint) -> std::io::Result<()> {
        let (c0, r0) = self.project(from);
        let (c1, r1) = self.project(to);
        let (dx, dy) = (c1 - c0, r1 - r0);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as u32;
        let glyph = stroke(dx, dy);

        self.out.queue(style::SetForegroundColor(colour(tint)))?;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.put(c0 + dx * t, r0 + dy * t, glyph)?;
        }
        Ok(())
    }

    fn rect(&mut self, centre: Point, width: f32, height: f32, tint: Tint) -> std::io::Result<()> {
        let top_left = Point::new(centre.x - width / 2.0, centre.y - height / 2.0);
        let bottom_right = Point::new(centre.x + width / 2.0, centre.y + height / 2.0);
        let (c0, r0) = self.project(top_left);
        let (c1, r1) = self.project(bottom_right);

        // Overlays blank the area behind them; everything else is a solid block.
        let fill = if tint == Tint::Overlay { " " } else { "▓" };
        self.out.queue(style::SetForegroundColor(colour(tint)))?;

        let mut row = r0.floor();
        loop {
            let mut col = c0.floor();
            loop {
                self.put(col, row, fill)?;
                col += 1.0;
                if col > c1 {
                    break;
                }
            }
            row += 1.0;
            if row > r1 {
                break;
            }
        }
        Ok(())
    }

    fn text(&mut self, at: Point, text: &str, tint: Tint) -> std::io::Result<()> {
        let (col, row) = self.project(at);
        let col = (col - text.chars().count() as f32 / 2.0).max(0.0);
        self.out.queue(style::SetForegroundColor(colour(tint)))?;
        self.put(col, row, text)
    }

    fn present(&mut self) -> std::io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()
    }
}
