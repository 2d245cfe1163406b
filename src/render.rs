/// Presentation — translates game state into draw calls on a `Surface`.
///
/// Nothing here mutates the game.  Coordinates are viewport units; the
/// surface decides how those map onto real pixels or terminal cells.

use std::io;

use crate::compute::GameManager;
use crate::entities::{FeedbackKind, Lane, Point, Target, TargetKind, HIT_ZONE_END, HIT_ZONE_START};

/// Edge length of a target at full scale.
const TARGET_SIZE: f32 = 50.0;

/// Semantic colour for a draw call; surfaces pick the actual palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
    Guide,
    HitZone,
    Receptor,
    Red,
    Blue,
    Bomb,
    Score,
    Misses,
    Level,
    Hit,
    Miss,
    WrongKey,
    Overlay,
    Hint,
}

/// A drawing target the game can issue primitives to.
pub trait Surface {
    /// Called once before a frame is drawn.
    fn clear(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn line(&mut self, from: Point, to: Point, tint: Tint) -> io::Result<()>;

    /// Filled axis-aligned rectangle centred on `centre`.
    fn rect(&mut self, centre: Point, width: f32, height: f32, tint: Tint) -> io::Result<()>;

    /// Text centred on `at`.
    fn text(&mut self, at: Point, text: &str, tint: Tint) -> io::Result<()>;

    /// Called once after a frame is drawn.
    fn present(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

impl GameManager {
    /// Render one complete frame.
    pub fn render<S: Surface>(&self, surface: &mut S) -> io::Result<()> {
        surface.clear()?;

        for lane in self.lanes() {
            draw_lane(surface, lane)?;
        }
        draw_hit_zone(surface, self.lanes())?;

        // Far targets first so near ones paint over them.
        let mut live: Vec<&Target> = self.targets.iter().filter(|t| t.active).collect();
        live.sort_by(|a, b| a.progress.total_cmp(&b.progress));
        for target in live {
            draw_target(surface, &self.lanes()[target.lane], target)?;
        }

        draw_hud(surface, self)?;
        draw_feedback(surface, self)?;

        if self.is_game_over() {
            draw_game_over(surface, self)?;
        }

        surface.present()
    }
}

// ── Lanes ─────────────────────────────────────────────────────────────────────

/// Two edges of the guide, `width(p)` apart, plus the receptor glyph.
fn draw_lane<S: Surface>(surface: &mut S, lane: &Lane) -> io::Result<()> {
    let near = lane.position(1.0);
    let (w0, w1) = (lane.width(0.0) / 2.0, lane.width(1.0) / 2.0);
    let far = lane.position(0.0);

    surface.line(
        Point::new(far.x - w0, far.y),
        Point::new(near.x - w1, near.y),
        Tint::Guide,
    )?;
    surface.line(
        Point::new(far.x + w0, far.y),
        Point::new(near.x + w1, near.y),
        Tint::Guide,
    )?;
    surface.text(near, lane.direction.glyph(), Tint::Receptor)
}

fn draw_hit_zone<S: Surface>(surface: &mut S, lanes: &[Lane]) -> io::Result<()> {
    let (Some(first), Some(last)) = (lanes.first(), lanes.last()) else {
        return Ok(());
    };
    for p in [HIT_ZONE_START, HIT_ZONE_END] {
        let left = first.position(p);
        let right = last.position(p);
        let pad = first.width(p) / 2.0;
        surface.line(
            Point::new(left.x - pad, left.y),
            Point::new(right.x + pad, right.y),
            Tint::HitZone,
        )?;
    }
    Ok(())
}

// ── Targets ───────────────────────────────────────────────────────────────────

fn draw_target<S: Surface>(surface: &mut S, lane: &Lane, target: &Target) -> io::Result<()> {
    let at = lane.position(target.progress);
    let size = TARGET_SIZE * lane.scale(target.progress);
    let (tint, glyph) = match target.kind {
        TargetKind::Red => (Tint::Red, target.direction.glyph()),
        TargetKind::Blue => (Tint::Blue, target.direction.glyph()),
        TargetKind::Bomb => (Tint::Bomb, "✹"),
    };
    surface.rect(at, size, size, tint)?;
    surface.text(at, glyph, tint)
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn draw_hud<S: Surface>(surface: &mut S, game: &GameManager) -> io::Result<()> {
    let top = game.height * 0.04;
    surface.text(
        Point::new(game.width * 0.15, top),
        &format!("Score: {}", game.score),
        Tint::Score,
    )?;
    surface.text(
        Point::new(game.width * 0.5, top),
        &format!("Level {}", game.level + 1),
        Tint::Level,
    )?;
    surface.text(
        Point::new(game.width * 0.85, top),
        &format!("Misses: {}/{}", game.misses, game.tuning().max_misses),
        Tint::Misses,
    )?;
    surface.text(
        Point::new(game.width * 0.5, game.height * 0.96),
        "Red: arrows   Blue: W A S D   Bombs: hands off   Esc: quit",
        Tint::Hint,
    )
}

fn draw_feedback<S: Surface>(surface: &mut S, game: &GameManager) -> io::Result<()> {
    let Some(kind) = game.active_feedback() else {
        return Ok(());
    };
    let tint = match kind {
        FeedbackKind::Hit => Tint::Hit,
        FeedbackKind::Miss => Tint::Miss,
        FeedbackKind::WrongKey => Tint::WrongKey,
        FeedbackKind::Bomb => Tint::Bomb,
    };
    surface.text(
        Point::new(game.width / 2.0, game.height * 0.5),
        kind.message(),
        tint,
    )
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<S: Surface>(surface: &mut S, game: &GameManager) -> io::Result<()> {
    let cx = game.width / 2.0;
    let cy = game.height / 2.0;
    surface.rect(Point::new(cx, cy), game.width * 0.5, game.height * 0.3, Tint::Overlay)?;

    let lines = [
        ("GAME  OVER".to_string(), Tint::Miss),
        (format!("Final Score: {}", game.score), Tint::Score),
        (
            format!("Hits: {}   Bombs: {}   Level: {}", game.hits, game.bombs_triggered, game.level + 1),
            Tint::Level,
        ),
        ("R - Play Again  Q - Quit".to_string(), Tint::Hint),
    ];
    let row = game.height * 0.05;
    let start = cy - row * (lines.len() as f32 - 1.0) / 2.0;
    for (i, (text, tint)) in lines.iter().enumerate() {
        surface.text(Point::new(cx, start + row * i as f32), text, *tint)?;
    }
    Ok(())
}
