// Dataset invariants for the stage files and the romaji table.
// These tests are native-friendly and avoid wasm/browser APIs.

use std::collections::HashSet;

use kana_cat::romaji::{SPELLINGS, is_typeable};
use kana_cat::stage::{self, ANCHORS};

#[test]
fn spelling_table_has_unique_characters() {
    let mut seen = HashSet::new();
    for (c, _) in SPELLINGS {
        assert!(seen.insert(*c), "duplicate character '{}' in SPELLINGS", c);
    }
}

#[test]
fn spellings_are_typeable_and_distinct_per_character() {
    for (c, options) in SPELLINGS {
        assert!(!options.is_empty(), "'{}' has no spellings", c);
        let mut seen = HashSet::new();
        for s in options.iter() {
            assert!(!s.is_empty(), "empty spelling for '{}'", c);
            assert!(s.chars().all(is_typeable), "untypeable spelling '{}' for '{}'", s, c);
            assert!(seen.insert(*s), "spelling '{}' repeated for '{}'", s, c);
        }
    }
}

#[test]
fn stages_have_unique_ids_and_characters() {
    let mut ids = HashSet::new();
    for s in stage::builtin() {
        assert!(ids.insert(s.id), "duplicate stage id {}", s.id);
        assert!(s.background.starts_with('#'), "stage {} background", s.id);
        let mut chars = HashSet::new();
        for c in s.chars {
            assert!(chars.insert(*c), "'{}' repeated in stage {}", c, s.id);
        }
    }
}

#[test]
fn every_stage_has_non_anchor_characters() {
    for s in stage::builtin() {
        let playable = s.chars.iter().filter(|c| !ANCHORS.contains(*c)).count();
        assert!(playable >= 2, "stage {} offers {} non-anchor characters", s.id, playable);
    }
}

#[test]
fn anchors_are_home_row_keys() {
    let home = ["A", "S", "D", "F", "G", "H", "J", "K", "L"];
    for a in ANCHORS {
        assert!(home.contains(&a));
    }
}

#[test]
fn every_spelling_key_has_a_finger() {
    for (c, options) in SPELLINGS {
        for s in options.iter() {
            for key in s.chars() {
                assert!(
                    kana_cat::hands::finger_for(key).is_some(),
                    "no finger for '{}' in spelling of '{}'",
                    key,
                    c
                );
            }
        }
    }
}
