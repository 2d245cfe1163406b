/// Key presses as the game sees them, and the table deciding which press
/// resolves which target.

use crate::entities::{Direction, TargetKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Arrow(Direction),
    Other,
}

/// Required key per (kind, direction).  Bombs are absent: any key matches.
const KEY_TABLE: [(TargetKind, Direction, Key); 8] = [
    (TargetKind::Red, Direction::Up, Key::Arrow(Direction::Up)),
    (TargetKind::Red, Direction::Down, Key::Arrow(Direction::Down)),
    (TargetKind::Red, Direction::Left, Key::Arrow(Direction::Left)),
    (TargetKind::Red, Direction::Right, Key::Arrow(Direction::Right)),
    (TargetKind::Blue, Direction::Up, Key::Char('w')),
    (TargetKind::Blue, Direction::Down, Key::Char('s')),
    (TargetKind::Blue, Direction::Left, Key::Char('a')),
    (TargetKind::Blue, Direction::Right, Key::Char('d')),
];

/// The key a target of `kind` in a lane facing `direction` needs, or `None`
/// when any key will do.
pub fn required_key(kind: TargetKind, direction: Direction) -> Option<Key> {
    KEY_TABLE
        .iter()
        .find(|(k, d, _)| *k == kind && *d == direction)
        .map(|(_, _, key)| *key)
}

pub fn matches(kind: TargetKind, direction: Direction, pressed: Key) -> bool {
    match required_key(kind, direction) {
        None => true,
        Some(required) => normalize(pressed) == required,
    }
}

// WASD matches regardless of shift / caps lock.
fn normalize(key: Key) -> Key {
    match key {
        Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
