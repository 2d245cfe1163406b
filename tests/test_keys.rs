use lane_rush::entities::{Direction, TargetKind};
use lane_rush::keys::*;

const DIRECTIONS: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

#[test]
fn red_maps_to_matching_arrow() {
    for d in DIRECTIONS {
        assert_eq!(required_key(TargetKind::Red, d), Some(Key::Arrow(d)));
    }
}

#[test]
fn blue_maps_to_wasd() {
    assert_eq!(required_key(TargetKind::Blue, Direction::Up), Some(Key::Char('w')));
    assert_eq!(required_key(TargetKind::Blue, Direction::Down), Some(Key::Char('s')));
    assert_eq!(required_key(TargetKind::Blue, Direction::Left), Some(Key::Char('a')));
    assert_eq!(required_key(TargetKind::Blue, Direction::Right), Some(Key::Char('d')));
}

#[test]
fn bombs_have_no_required_key() {
    for d in DIRECTIONS {
        assert_eq!(required_key(TargetKind::Bomb, d), None);
        assert!(matches(TargetKind::Bomb, d, Key::Other));
        assert!(matches(TargetKind::Bomb, d, Key::Char('q')));
    }
}

#[test]
fn wasd_is_case_insensitive() {
    assert!(matches(TargetKind::Blue, Direction::Right, Key::Char('D')));
    assert!(matches(TargetKind::Blue, Direction::Right, Key::Char('d')));
    assert!(!matches(TargetKind::Blue, Direction::Right, Key::Char('A')));
}

#[test]
fn schemes_do_not_cross() {
    for d in DIRECTIONS {
        let Some(blue_key) = required_key(TargetKind::Blue, d) else {
            panic!("blue {:?} has no key", d);
        };
        assert!(!matches(TargetKind::Red, d, blue_key));
        assert!(!matches(TargetKind::Blue, d, Key::Arrow(d)));
        assert!(!matches(TargetKind::Red, d, Key::Other));
    }
}
