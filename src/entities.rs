/// Game entity types — lanes, targets and the small enums they share.
///
/// `Lane` is pure geometry.  `Target` is a tiny state machine that only
/// changes through its own `update` and `check_key`.

use serde::{Deserialize, Serialize};

use crate::keys::{self, Key};

/// Start of the hit window (inclusive).
pub const HIT_ZONE_START: f32 = 0.75;
/// End of the hit window (inclusive).
pub const HIT_ZONE_END: f32 = 1.0;
/// Progress past which a target is discarded.
pub const DROP_THRESHOLD: f32 = 1.1;

// ── Enums ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Arrow glyph drawn for this direction.
    pub fn glyph(self) -> &'static str {
        match self {
            Direction::Up => "↑",
            Direction::Down => "↓",
            Direction::Left => "←",
            Direction::Right => "→",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetKind {
    /// Hit with the arrow key of the lane's direction.
    Red,
    /// Hit with the WASD key of the lane's direction.
    Blue,
    /// Any key "hits" it, and that costs misses.
    Bomb,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedbackKind {
    Hit,
    Miss,
    WrongKey,
    Bomb,
}

impl FeedbackKind {
    pub fn message(self) -> &'static str {
        match self {
            FeedbackKind::Hit => "HIT",
            FeedbackKind::Miss => "MISS",
            FeedbackKind::WrongKey => "WRONG KEY",
            FeedbackKind::Bomb => "BOMB",
        }
    }
}

/// Transient on-screen message and the frames it has left.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub frames_left: u32,
}

// ── Lane geometry ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    /// Linear interpolation; `t` is not clamped.
    pub fn lerp(self, to: Point, t: f32) -> Point {
        Point {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
        }
    }
}

/// One travel path from the shared vanishing point to the hit line.
#[derive(Clone, Debug, PartialEq)]
pub struct Lane {
    pub id: usize,
    pub direction: Direction,
    pub vanishing_point: Point,
    pub end_point: Point,
    pub width_start: f32,
    pub width_end: f32,
}

impl Lane {
    pub fn new(id: usize, direction: Direction, vanishing_point: Point, end_point: Point) -> Self {
        Lane {
            id,
            direction,
            vanishing_point,
            end_point,
            width_start: 2.0,
            width_end: 60.0,
        }
    }

    pub fn with_widths(self, width_start: f32, width_end: f32) -> Self {
        Lane {
            width_start,
            width_end,
            ..self
        }
    }

    pub fn position(&self, progress: f32) -> Point {
        self.vanishing_point.lerp(self.end_point, progress)
    }

    /// 10% at the vanishing point, 100% on the hit line, and still growing
    /// past it so overshooting targets swell before they are dropped.
    pub fn scale(&self, progress: f32) -> f32 {
        0.1 + 0.9 * progress
    }

    pub fn width(&self, progress: f32) -> f32 {
        self.width_start + (self.width_end - self.width_start) * progress
    }
}

// ── Targets ───────────────────────────────────────────────────────────────────

/// What the owner should do with a target after `Target::update`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetStep {
    Keep,
    Drop,
}

#[derive(Clone, Debug)]
pub struct Target {
    /// Index of the owning lane in the manager's lane list.
    pub lane: usize,
    pub kind: TargetKind,
    pub direction: Direction,
    pub progress: f32,
    /// Progress per frame, fixed at spawn.
    pub speed: f32,
    pub active: bool,
    pub was_hit: bool,
    pub in_hit_zone: bool,
}

impl Target {
    pub fn new(lane: &Lane, kind: TargetKind, speed: f32) -> Self {
        Target {
            lane: lane.id,
            kind,
            direction: lane.direction,
            progress: 0.0,
            speed,
            active: true,
            was_hit: false,
            in_hit_zone: false,
        }
    }

    /// Advance one frame.
    pub fn update(&mut self) -> TargetStep {
        if !self.active {
            return TargetStep::Drop;
        }
        self.progress += self.speed;
        if self.progress > DROP_THRESHOLD {
            self.active = false;
            return TargetStep::Drop;
        }
        self.in_hit_zone = (HIT_ZONE_START..=HIT_ZONE_END).contains(&self.progress);
        TargetStep::Keep
    }

    /// Try to resolve this target with a key press.  Returns `true` only on
    /// the press that hits it; a target outside its window never matches.
    pub fn check_key(&mut self, key: Key) -> bool {
        if !self.in_hit_zone || !self.active {
            return false;
        }
        if !keys::matches(self.kind, self.direction, key) {
            return false;
        }
        self.active = false;
        self.was_hit = true;
        true
    }

    /// Whether dropping this target costs the player a miss.
    /// Bombs that time out are neither hits nor misses.
    pub fn counts_as_miss(&self) -> bool {
        !self.was_hit && self.progress > HIT_ZONE_START && self.kind != TargetKind::Bomb
    }
}
