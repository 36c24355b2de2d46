//! Validated lookup tables: stage id → stage, character → accepted spellings.
//!
//! Built once at startup from the static stage files and the romaji table.
//! Every character a stage (or the anchor drill) can serve must have at least
//! one spelling made only of typeable keys; `build` refuses anything else so
//! a prompt can never be unanswerable.

use std::collections::{HashMap, HashSet};

use crate::error::GameError;
use crate::romaji::{self, SPELLINGS};
use crate::stage::{self, ANCHORS, StageDesc};

#[derive(Clone, Debug)]
pub struct Catalog {
    stages: Vec<&'static StageDesc>,
    spellings: HashMap<&'static str, &'static [&'static str]>,
    anchors: [&'static str; 2],
}

impl Catalog {
    pub fn build(
        stages: &[&'static StageDesc],
        spellings: &[(&'static str, &'static [&'static str])],
        anchors: [&'static str; 2],
    ) -> Result<Self, GameError> {
        let table: HashMap<&'static str, &'static [&'static str]> =
            spellings.iter().copied().collect();

        let mut seen_ids = HashSet::new();
        for stage in stages {
            if !seen_ids.insert(stage.id) {
                return Err(GameError::DuplicateStage(stage.id));
            }
        }

        let required = stages.iter().flat_map(|s| s.chars.iter().copied()).chain(anchors);
        for character in required {
            let Some(options) = table.get(character) else {
                return Err(GameError::MissingSpelling(character));
            };
            if options.is_empty() {
                return Err(GameError::MissingSpelling(character));
            }
            for &spelling in options.iter() {
                if spelling.is_empty() || !spelling.chars().all(romaji::is_typeable) {
                    return Err(GameError::InvalidSpelling { character, spelling });
                }
            }
        }

        Ok(Self {
            stages: stages.to_vec(),
            spellings: table,
            anchors,
        })
    }

    /// The shipped stages and romaji table.
    pub fn builtin() -> Result<Self, GameError> {
        Self::build(stage::builtin(), SPELLINGS, ANCHORS)
    }

    pub fn stage(&self, id: u8) -> Option<&'static StageDesc> {
        self.stages.iter().copied().find(|s| s.id == id)
    }

    pub fn stages(&self) -> &[&'static StageDesc] {
        &self.stages
    }

    pub fn anchors(&self) -> [&'static str; 2] {
        self.anchors
    }

    /// Empty for characters the catalog does not know.
    pub fn spellings(&self, character: &str) -> &'static [&'static str] {
        self.spellings.get(character).copied().unwrap_or(&[])
    }

    /// Union of the given stages' characters, first occurrence order, no duplicates.
    pub fn pool(&self, stage_ids: &[u8]) -> Vec<&'static str> {
        let mut seen = HashSet::new();
        stage_ids
            .iter()
            .filter_map(|id| self.stage(*id))
            .flat_map(|s| s.chars.iter().copied())
            .filter(|c| seen.insert(*c))
            .collect()
    }
}
