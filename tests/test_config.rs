use std::fs;
use std::path::PathBuf;

use lane_rush::config::*;
use lane_rush::entities::Direction;

fn scratch_path(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("lane_rush_test_{}_{}", std::process::id(), name));
    let _ = fs::remove_dir_all(&dir);
    dir.push("nested");
    dir.push("tuning.json");
    dir
}

#[test]
fn defaults_match_the_game_rules() {
    let t = Tuning::default();
    assert_eq!(t.spawn_interval, 80);
    assert_eq!(t.min_spawn_interval, 40);
    assert_eq!(t.spawn_interval_step, 5);
    assert_eq!(t.frames_per_level, 600);
    assert_eq!(t.max_misses, 10);
    assert_eq!(t.hit_score, 10);
    assert_eq!(t.bomb_penalty, 3);
    assert_eq!(t.lane_spacing, 150.0);
    assert_eq!(t.bomb_chance, 0.15);
}

#[test]
fn sanitized_repairs_nonsense() {
    let t = Tuning {
        spawn_interval: 0,
        min_spawn_interval: 0,
        initial_speed: -1.0,
        speed_step: f32::NAN,
        frames_per_level: 0,
        max_misses: 0,
        bomb_chance: 4.0,
        ..Tuning::default()
    }
    .sanitized();
    assert_eq!(t.min_spawn_interval, 1);
    assert_eq!(t.spawn_interval, 1);
    assert_eq!(t.initial_speed, Tuning::default().initial_speed);
    assert_eq!(t.speed_step, Tuning::default().speed_step);
    assert_eq!(t.frames_per_level, 1);
    assert_eq!(t.max_misses, 1);
    assert_eq!(t.bomb_chance, 1.0);
}

#[test]
fn missing_file_loads_defaults() {
    let store = TuningStore::new(scratch_path("missing"));
    assert_eq!(store.load(), Tuning::default());
}

#[test]
fn malformed_file_loads_defaults() {
    let path = scratch_path("malformed");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "{ not json").unwrap();
    assert_eq!(TuningStore::new(&path).load(), Tuning::default());
}

#[test]
fn save_then_load_keeps_custom_values() {
    let path = scratch_path("roundtrip");
    let store = TuningStore::new(&path);
    let custom = Tuning {
        max_misses: 5,
        lane_order: [Direction::Up, Direction::Down, Direction::Left, Direction::Right],
        ..Tuning::default()
    };
    store.save(&custom).unwrap();
    assert!(path.exists());
    assert_eq!(store.load(), custom);
}

#[test]
fn partial_file_fills_in_defaults() {
    let path = scratch_path("partial");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, r#"{ "max_misses": 3, "hit_score": 25 }"#).unwrap();
    let t = TuningStore::new(&path).load();
    assert_eq!(t.max_misses, 3);
    assert_eq!(t.hit_score, 25);
    assert_eq!(t.spawn_interval, 80);
}
