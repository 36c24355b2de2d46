// QWERTY finger assignment for the show-hands hint.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Hand {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Finger {
    Pinky,
    Ring,
    Middle,
    Index,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FingerHint {
    pub hand: Hand,
    pub finger: Finger,
}

impl FingerHint {
    pub fn label(&self) -> &'static str {
        match (self.hand, self.finger) {
            (Hand::Left, Finger::Pinky) => "left pinky",
            (Hand::Left, Finger::Ring) => "left ring",
            (Hand::Left, Finger::Middle) => "left middle",
            (Hand::Left, Finger::Index) => "left index",
            (Hand::Right, Finger::Pinky) => "right pinky",
            (Hand::Right, Finger::Ring) => "right ring",
            (Hand::Right, Finger::Middle) => "right middle",
            (Hand::Right, Finger::Index) => "right index",
        }
    }
}

/// Finger for a typeable key, `None` for anything else.
pub fn finger_for(key: char) -> Option<FingerHint> {
    use Finger::*;
    use Hand::*;
    let (hand, finger) = match key.to_ascii_uppercase() {
        '1' | 'Q' | 'A' | 'Z' => (Left, Pinky),
        '2' | 'W' | 'S' | 'X' => (Left, Ring),
        '3' | 'E' | 'D' | 'C' => (Left, Middle),
        '4' | '5' | 'R' | 'T' | 'F' | 'G' | 'V' | 'B' => (Left, Index),
        '6' | '7' | 'Y' | 'U' | 'H' | 'J' | 'N' | 'M' => (Right, Index),
        '8' | 'I' | 'K' | ',' => (Right, Middle),
        '9' | 'O' | 'L' | '.' => (Right, Ring),
        '0' | '-' | 'P' => (Right, Pinky),
        _ => return None,
    };
    Some(FingerHint { hand, finger })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::romaji::is_typeable;

    #[test]
    fn anchors_are_index_fingers() {
        assert_eq!(finger_for('F'), Some(FingerHint { hand: Hand::Left, finger: Finger::Index }));
        assert_eq!(finger_for('j'), Some(FingerHint { hand: Hand::Right, finger: Finger::Index }));
    }

    #[test]
    fn every_typeable_key_has_a_finger() {
        let keys = ('A'..='Z').chain('0'..='9').chain(['-', ',', '.']);
        for k in keys {
            assert!(is_typeable(k));
            assert!(finger_for(k).is_some(), "no finger for {}", k);
        }
        assert_eq!(finger_for(';'), None);
    }
}
