use std::io;

use lane_rush::compute::GameManager;
use lane_rush::config::Tuning;
use lane_rush::entities::*;
use lane_rush::keys::Key;
use lane_rush::render::{Surface, Tint};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Clear,
    Line(Point, Point, Tint),
    Rect(Point, f32, f32, Tint),
    Text(Point, String, Tint),
    Present,
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
}

impl Recorder {
    fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Text(_, s, _) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    fn rects(&self, tint: Tint) -> Vec<(Point, f32)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Rect(p, w, _, t) if *t == tint => Some((*p, *w)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for Recorder {
    fn clear(&mut self) -> io::Result<()> {
        self.calls.push(Call::Clear);
        Ok(())
    }

    fn line(&mut self, from: Point, to: Point, tint: Tint) -> io::Result<()> {
        self.calls.push(Call::Line(from, to, tint));
        Ok(())
    }

    fn rect(&mut self, centre: Point, width: f32, height: f32, tint: Tint) -> io::Result<()> {
        self.calls.push(Call::Rect(centre, width, height, tint));
        Ok(())
    }

    fn text(&mut self, at: Point, text: &str, tint: Tint) -> io::Result<()> {
        self.calls.push(Call::Text(at, text.to_string(), tint));
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        self.calls.push(Call::Present);
        Ok(())
    }
}

fn quiet_game() -> GameManager {
    let tuning = Tuning {
        spawn_interval: 1_000_000,
        min_spawn_interval: 1_000_000,
        ..Tuning::default()
    };
    GameManager::with_tuning(800.0, 600.0, tuning)
}

#[test]
fn frame_is_bracketed_by_clear_and_present() {
    let game = quiet_game();
    let mut rec = Recorder::default();
    game.render(&mut rec).unwrap();
    assert_eq!(rec.calls.first(), Some(&Call::Clear));
    assert_eq!(rec.calls.last(), Some(&Call::Present));
}

#[test]
fn lanes_draw_two_guide_edges_each() {
    let game = quiet_game();
    let mut rec = Recorder::default();
    game.render(&mut rec).unwrap();
    let guides = rec
        .calls
        .iter()
        .filter(|c| matches!(c, Call::Line(_, _, Tint::Guide)))
        .count();
    assert_eq!(guides, 8);

    // Left edge of lane 0 ends half the full width left of its end point.
    let lane = &game.lanes()[0];
    assert!(rec.calls.contains(&Call::Line(
        Point::new(lane.vanishing_point.x - 1.0, lane.vanishing_point.y),
        Point::new(lane.end_point.x - 30.0, lane.end_point.y),
        Tint::Guide,
    )));
}

#[test]
fn targets_scale_with_progress_and_hit_ones_are_hidden() {
    let mut game = quiet_game();
    game.spawn(0, TargetKind::Red);
    game.spawn(1, TargetKind::Blue);
    game.targets[0].progress = 0.5;
    game.targets[1].progress = 0.9;
    game.targets[1].in_hit_zone = true;

    let mut rec = Recorder::default();
    game.render(&mut rec).unwrap();
    let red = rec.rects(Tint::Red);
    assert_eq!(red.len(), 1);
    assert_eq!(red[0].0, game.lanes()[0].position(0.5));
    assert!((red[0].1 - 50.0 * 0.55).abs() < 1e-4);
    assert_eq!(rec.rects(Tint::Blue).len(), 1);

    game.handle_input(Key::Char('s'));
    let mut rec = Recorder::default();
    game.render(&mut rec).unwrap();
    assert!(rec.rects(Tint::Blue).is_empty());
}

#[test]
fn hud_and_feedback_text() {
    let mut game = quiet_game();
    game.spawn(2, TargetKind::Red);
    game.targets[0].progress = 0.8;
    game.targets[0].in_hit_zone = true;
    game.handle_input(Key::Arrow(Direction::Up));

    let mut rec = Recorder::default();
    game.render(&mut rec).unwrap();
    let texts = rec.texts();
    assert!(texts.contains(&"Score: 10"));
    assert!(texts.contains(&"Misses: 0/10"));
    assert!(texts.contains(&"Level 1"));
    assert!(texts.contains(&"HIT"));
    assert!(!texts.contains(&"GAME  OVER"));
}

#[test]
fn game_over_overlay() {
    let mut game = quiet_game();
    game.misses = 10;
    game.status = GameStatus::GameOver;
    let mut rec = Recorder::default();
    game.render(&mut rec).unwrap();
    let texts = rec.texts();
    assert!(texts.contains(&"GAME  OVER"));
    assert!(texts.contains(&"Final Score: 0"));
    assert!(texts.contains(&"R - Play Again  Q - Quit"));
    assert_eq!(rec.rects(Tint::Overlay).len(), 1);
}

#[test]
fn render_does_not_mutate() {
    let mut game = quiet_game();
    game.spawn(3, TargetKind::Bomb);
    game.targets[0].progress = 0.3;
    let before = (game.score, game.misses, game.frame, game.targets.len(), game.targets[0].progress);
    let mut rec = Recorder::default();
    game.render(&mut rec).unwrap();
    game.render(&mut rec).unwrap();
    let after = (game.score, game.misses, game.frame, game.targets.len(), game.targets[0].progress);
    assert_eq!(before, after);
}
