use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::entities::Direction;

/// Every gameplay constant the manager reads.  Missing fields in a config
/// file fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Frames between spawns at level 0.
    pub spawn_interval: u32,
    pub min_spawn_interval: u32,
    pub spawn_interval_step: u32,
    /// Progress per frame for targets spawned at level 0.
    pub initial_speed: f32,
    pub speed_step: f32,
    /// Frames per difficulty level.
    pub frames_per_level: u64,
    pub max_misses: u32,
    pub bomb_chance: f64,
    pub hit_score: u32,
    pub bomb_penalty: u32,
    pub feedback_frames: u32,
    /// Horizontal distance between neighbouring lane end points.
    pub lane_spacing: f32,
    pub lane_width_start: f32,
    pub lane_width_end: f32,
    /// Lane directions, left to right.
    pub lane_order: [Direction; 4],
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawn_interval: 80,
            min_spawn_interval: 40,
            spawn_interval_step: 5,
            initial_speed: 0.005,
            speed_step: 0.001,
            frames_per_level: 600,
            max_misses: 10,
            bomb_chance: 0.15,
            hit_score: 10,
            bomb_penalty: 3,
            feedback_frames: 45,
            lane_spacing: 150.0,
            lane_width_start: 2.0,
            lane_width_end: 60.0,
            lane_order: [Direction::Left, Direction::Down, Direction::Up, Direction::Right],
        }
    }
}

impl Tuning {
    pub fn sanitized(mut self) -> Self {
        let defaults = Tuning::default();
        self.min_spawn_interval = self.min_spawn_interval.max(1);
        self.spawn_interval = self.spawn_interval.max(self.min_spawn_interval);
        if !(self.initial_speed > 0.0) {
            self.initial_speed = defaults.initial_speed;
        }
        if !(self.speed_step >= 0.0) {
            self.speed_step = defaults.speed_step;
        }
        self.frames_per_level = self.frames_per_level.max(1);
        self.max_misses = self.max_misses.max(1);
        self.bomb_chance = if self.bomb_chance.is_nan() {
            defaults.bomb_chance
        } else {
            self.bomb_chance.clamp(0.0, 1.0)
        };
        self
    }
}

/// Locates and reads the tuning file.
#[derive(Debug, Clone)]
pub struct TuningStore {
    path: PathBuf,
}

impl TuningStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_env() -> Self {
        if let Some(explicit) = std::env::var_os("LANE_RUSH_CONFIG") {
            return Self::new(explicit);
        }

        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME").map(|home| {
                    let mut p = PathBuf::from(home);
                    p.push(".config");
                    p
                })
            })
            .unwrap_or_else(|| PathBuf::from("."));

        let mut path = base;
        path.push("lane-rush");
        path.push("tuning.json");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Defaults when the file is missing or unreadable.
    pub fn load(&self) -> Tuning {
        let Ok(bytes) = fs::read(&self.path) else {
            return Tuning::default();
        };
        match serde_json::from_slice::<Tuning>(&bytes) {
            Ok(tuning) => tuning.sanitized(),
            Err(e) => {
                warn!("ignoring malformed tuning file {}: {}", self.path.display(), e);
                Tuning::default()
            }
        }
    }

    pub fn save(&self, tuning: &Tuning) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(tuning)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, text)
    }
}
