/// Game logic — the per-frame simulation and key handling.
///
/// `GameManager` owns the lanes and every live target.  The frame driver
/// constructs one, calls `update` then `render` once per frame, and hands it
/// each key press.  All randomness comes through an injected `Rng` so tests
/// can run against a seeded generator.

use log::{debug, info};
use rand::Rng;

use crate::config::Tuning;
use crate::entities::{
    Feedback, FeedbackKind, GameStatus, Lane, Point, Target, TargetKind, TargetStep,
};
use crate::keys::Key;

/// Vertical position of the shared vanishing point, as a share of height.
const HORIZON_Y: f32 = 0.15;
/// Vertical position of the hit line, as a share of height.
const HIT_LINE_Y: f32 = 0.85;

pub struct GameManager {
    tuning: Tuning,
    lanes: Vec<Lane>,
    pub width: f32,
    pub height: f32,
    pub targets: Vec<Target>,
    pub score: u32,
    pub misses: u32,
    /// Successful red/blue hits this run.
    pub hits: u32,
    pub bombs_triggered: u32,
    pub spawn_timer: u32,
    pub spawn_interval: u32,
    pub frame: u64,
    pub level: u32,
    /// Speed handed to the next spawned target.
    pub target_speed: f32,
    pub feedback: Option<Feedback>,
    pub status: GameStatus,
}

// ── Constructors ─────────────────────────────────────────────────────────────

impl GameManager {
    /// Build a manager with default tuning for a viewport of the given size.
    pub fn initialize(width: f32, height: f32) -> Self {
        Self::with_tuning(width, height, Tuning::default())
    }

    pub fn with_tuning(width: f32, height: f32, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let lanes = build_lanes(width, height, &tuning);
        GameManager {
            lanes,
            width,
            height,
            targets: Vec::new(),
            score: 0,
            misses: 0,
            hits: 0,
            bombs_triggered: 0,
            spawn_timer: 0,
            spawn_interval: tuning.spawn_interval,
            frame: 0,
            level: 0,
            target_speed: tuning.initial_speed,
            feedback: None,
            status: GameStatus::Playing,
            tuning,
        }
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    /// Start a fresh run on the same lanes.
    pub fn restart(&mut self) {
        self.targets.clear();
        self.score = 0;
        self.misses = 0;
        self.hits = 0;
        self.bombs_triggered = 0;
        self.spawn_timer = 0;
        self.spawn_interval = self.tuning.spawn_interval;
        self.frame = 0;
        self.level = 0;
        self.target_speed = self.tuning.initial_speed;
        self.feedback = None;
        self.status = GameStatus::Playing;
        info!("game restarted");
    }
}

/// One shared vanishing point, four end points on the hit line centred on
/// the viewport and `lane_spacing` apart, ordered left to right.
fn build_lanes(width: f32, height: f32, tuning: &Tuning) -> Vec<Lane> {
    let vanishing_point = Point::new(width / 2.0, height * HORIZON_Y);
    let hit_y = height * HIT_LINE_Y;
    let count = tuning.lane_order.len();
    let centre = (count as f32 - 1.0) / 2.0;

    tuning
        .lane_order
        .iter()
        .enumerate()
        .map(|(i, &direction)| {
            let x = width / 2.0 + (i as f32 - centre) * tuning.lane_spacing;
            Lane::new(i, direction, vanishing_point, Point::new(x, hit_y))
                .with_widths(tuning.lane_width_start, tuning.lane_width_end)
        })
        .collect()
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

impl GameManager {
    /// Advance the simulation by one frame.  A finished game is frozen.
    pub fn update(&mut self, rng: &mut impl Rng) {
        if self.is_game_over() {
            return;
        }

        // ── 1. Difficulty ramp (step function) ───────────────────────────────
        self.frame += 1;
        if self.frame % self.tuning.frames_per_level == 0 {
            self.level_up();
        }

        // ── 2. Spawn ─────────────────────────────────────────────────────────
        self.spawn_timer += 1;
        if self.spawn_timer >= self.spawn_interval {
            self.spawn_timer = 0;
            self.spawn_target(rng);
        }

        // ── 3. Advance targets, then cull in a second pass ───────────────────
        let steps: Vec<TargetStep> = self.targets.iter_mut().map(Target::update).collect();
        let (dropped, kept): (Vec<(Target, TargetStep)>, Vec<(Target, TargetStep)>) = self
            .targets
            .drain(..)
            .zip(steps)
            .partition(|(_, step)| *step == TargetStep::Drop);
        self.targets = kept.into_iter().map(|(t, _)| t).collect();

        for (target, _) in &dropped {
            if target.counts_as_miss() {
                self.register_miss(target);
            }
        }

        // ── 4. Feedback countdown ────────────────────────────────────────────
        if let Some(feedback) = self.feedback.as_mut() {
            feedback.frames_left = feedback.frames_left.saturating_sub(1);
        }
    }

    fn level_up(&mut self) {
        self.level += 1;
        self.spawn_interval = self
            .spawn_interval
            .saturating_sub(self.tuning.spawn_interval_step)
            .max(self.tuning.min_spawn_interval);
        self.target_speed += self.tuning.speed_step;
        info!(
            "level {} (spawn every {} frames, speed {:.4})",
            self.level, self.spawn_interval, self.target_speed
        );
    }

    /// Spawn one target on a random lane with a rolled kind.
    pub fn spawn_target(&mut self, rng: &mut impl Rng) {
        let lane = rng.gen_range(0..self.lanes.len());
        let kind = roll_kind(self.tuning.bomb_chance, rng);
        self.spawn(lane, kind);
    }

    /// Spawn a target of `kind` on `lane` at the current speed.
    pub fn spawn(&mut self, lane: usize, kind: TargetKind) {
        let target = Target::new(&self.lanes[lane], kind, self.target_speed);
        debug!("spawned {:?} on lane {} at speed {:.4}", kind, lane, target.speed);
        self.targets.push(target);
    }

    fn register_miss(&mut self, target: &Target) {
        self.misses += 1;
        self.show(FeedbackKind::Miss);
        debug!(
            "missed {:?} on lane {} ({}/{})",
            target.kind, target.lane, self.misses, self.tuning.max_misses
        );
        self.check_game_over();
    }

    fn check_game_over(&mut self) {
        if self.misses >= self.tuning.max_misses && !self.is_game_over() {
            self.status = GameStatus::GameOver;
            info!(
                "game over at frame {}: score {}, {} hits, level {}",
                self.frame, self.score, self.hits, self.level
            );
        }
    }

    fn show(&mut self, kind: FeedbackKind) {
        self.feedback = Some(Feedback {
            kind,
            frames_left: self.tuning.feedback_frames,
        });
    }
}

/// `bomb_chance` bombs, the rest split evenly between red and blue.
fn roll_kind(bomb_chance: f64, rng: &mut impl Rng) -> TargetKind {
    if rng.gen_bool(bomb_chance) {
        TargetKind::Bomb
    } else if rng.gen_bool(0.5) {
        TargetKind::Red
    } else {
        TargetKind::Blue
    }
}

// ── Input ────────────────────────────────────────────────────────────────────

impl GameManager {
    /// Entry point for every key press from the driver.  Once the game is
    /// over only 'r' / 'R' does anything.
    pub fn handle_key(&mut self, key: Key) {
        if self.is_game_over() {
            if matches!(key, Key::Char('r') | Key::Char('R')) {
                self.restart();
            }
            return;
        }
        self.handle_input(key);
    }

    /// Resolve at most one target with this press: the first live target
    /// that accepts it.
    pub fn handle_input(&mut self, key: Key) {
        let Some(index) = self.targets.iter_mut().position(|t| t.check_key(key)) else {
            if self.targets.iter().any(|t| t.in_hit_zone) {
                self.show(FeedbackKind::WrongKey);
            }
            return;
        };

        let target = &self.targets[index];
        let (kind, lane) = (target.kind, target.lane);
        match kind {
            TargetKind::Bomb => {
                self.misses += self.tuning.bomb_penalty;
                self.bombs_triggered += 1;
                self.show(FeedbackKind::Bomb);
                debug!("bomb on lane {} ({}/{})", lane, self.misses, self.tuning.max_misses);
                self.check_game_over();
            }
            TargetKind::Red | TargetKind::Blue => {
                self.score += self.tuning.hit_score;
                self.hits += 1;
                self.show(FeedbackKind::Hit);
                debug!("hit {:?} on lane {}, score {}", kind, lane, self.score);
            }
        }
    }

    /// The message to show this frame, if any.
    pub fn active_feedback(&self) -> Option<FeedbackKind> {
        self.feedback
            .filter(|f| f.frames_left > 0)
            .map(|f| f.kind)
    }
}
