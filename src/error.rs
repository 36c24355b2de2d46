use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Stage {0} does not exist")]
    UnknownStage(u8),
    #[error("Character '{0}' has no accepted spelling")]
    MissingSpelling(&'static str),
    #[error("Spelling '{spelling}' for '{character}' contains a key that cannot be typed")]
    InvalidSpelling {
        character: &'static str,
        spelling: &'static str,
    },
    #[error("Stage id {0} is defined more than once")]
    DuplicateStage(u8),
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
    #[error("Settings could not be parsed")]
    SettingsFormat(#[from] serde_json::Error),
    #[error("Storage failure: {0}")]
    Storage(String),
    #[error("Audio failure: {0}")]
    Audio(String),
    #[error("Browser call failed: {0}")]
    Js(String),
}

impl GameError {
    /// Stringify a thrown JS value; `JsValue` is not `Send` and has no `Error` impl.
    pub fn js(value: JsValue) -> Self {
        GameError::Js(format!("{:?}", value))
    }
}

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
