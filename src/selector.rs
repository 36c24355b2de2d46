//! Word selector: picks the next prompt character.
//!
//! Every 4th question of a stage (question index % 4 == 3) is a home-row drill
//! on one of the two anchors. Other questions draw uniformly from the pool with
//! the anchors removed and the previous character removed; if removing the
//! previous character empties the pool that constraint is dropped. The anchor
//! exclusion is never dropped; a pool made only of anchors falls back to a drill.

use crate::rng::RandomSource;

/// Questions between anchor drills.
pub const DRILL_INTERVAL: u8 = 4;

pub fn is_drill_question(question_index: u8) -> bool {
    question_index % DRILL_INTERVAL == DRILL_INTERVAL - 1
}

#[derive(Clone, Debug)]
pub struct WordSelector {
    anchors: [&'static str; 2],
    previous: Option<&'static str>,
}

impl WordSelector {
    pub fn new(anchors: [&'static str; 2]) -> Self {
        Self {
            anchors,
            previous: None,
        }
    }

    pub fn previous(&self) -> Option<&'static str> {
        self.previous
    }

    pub fn forget(&mut self) {
        self.previous = None;
    }

    pub fn next(
        &mut self,
        question_index: u8,
        pool: &[&'static str],
        rng: &mut dyn RandomSource,
    ) -> &'static str {
        let choice = if is_drill_question(question_index) {
            self.drill(rng)
        } else {
            let candidates: Vec<&'static str> = pool
                .iter()
                .copied()
                .filter(|c| !self.anchors.contains(c))
                .collect();
            let fresh: Vec<&'static str> = candidates
                .iter()
                .copied()
                .filter(|c| Some(*c) != self.previous)
                .collect();
            if !fresh.is_empty() {
                fresh[rng.below(fresh.len())]
            } else if !candidates.is_empty() {
                candidates[rng.below(candidates.len())]
            } else {
                self.drill(rng)
            }
        };
        self.previous = Some(choice);
        choice
    }

    fn drill(&self, rng: &mut dyn RandomSource) -> &'static str {
        self.anchors[rng.below(self.anchors.len())]
    }
}
