//! Player settings, delivered as JSON by the host page.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::GameError;
use crate::scorer::{MAX_SPEED, MIN_SPEED};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// 1 (10 s per prompt) ..= 5 (2 s per prompt).
    pub speed: u8,
    /// Stage ids, played in order unless `random_mode` is set.
    pub selected_stages: Vec<u8>,
    pub random_mode: bool,
    /// Stages to clear before the session ends in random mode.
    pub random_target: u32,
    /// Display scale applied to the board canvas.
    pub scale: f64,
    pub show_hands: bool,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            speed: 1,
            selected_stages: vec![1],
            random_mode: false,
            random_target: 3,
            scale: 1.0,
            show_hands: true,
            muted: false,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn validate(&self, catalog: &Catalog) -> Result<(), GameError> {
        if !(MIN_SPEED..=MAX_SPEED).contains(&self.speed) {
            return Err(GameError::InvalidSettings(format!(
                "speed {} outside {}..={}",
                self.speed, MIN_SPEED, MAX_SPEED
            )));
        }
        if self.selected_stages.is_empty() {
            return Err(GameError::InvalidSettings("no stages selected".into()));
        }
        let mut seen = Vec::with_capacity(self.selected_stages.len());
        for &id in &self.selected_stages {
            if seen.contains(&id) {
                return Err(GameError::InvalidSettings(format!("stage {} selected twice", id)));
            }
            seen.push(id);
        }
        if let Some(id) = self
            .selected_stages
            .iter()
            .copied()
            .find(|id| catalog.stage(*id).is_none())
        {
            return Err(GameError::UnknownStage(id));
        }
        if self.random_mode && self.random_target == 0 {
            return Err(GameError::InvalidSettings("random target must be at least 1".into()));
        }
        if !(0.5..=2.0).contains(&self.scale) {
            return Err(GameError::InvalidSettings(format!("scale {} outside 0.5..=2.0", self.scale)));
        }
        Ok(())
    }
}
