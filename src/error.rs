use std::fmt;

use wasm_bindgen::JsValue;

/// Fatal construction-time failures. Runtime situations (falling off the
/// board, running out of platforms below) end the game instead.
#[derive(Clone, Debug, PartialEq)]
pub enum GameError {
    /// An entity was created with a coordinate that is NaN or infinite.
    InvalidPosition {
        entity: &'static str,
        left: f64,
        bottom: f64,
    },
    /// The doodle was placed before any platform existed.
    NoPlatforms,
    /// A configuration value failed validation.
    InvalidConfig(String),
    /// Configuration JSON could not be parsed.
    Config(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidPosition { entity, left, bottom } => write!(
                f,
                "{entity} cannot be created at left={left}, bottom={bottom}: coordinates must be finite"
            ),
            GameError::NoPlatforms => f.write_str("platforms must be initialized before the doodle"),
            GameError::InvalidConfig(msg) => write!(f, "invalid game config: {msg}"),
            GameError::Config(msg) => write!(f, "failed to parse game config: {msg}"),
        }
    }
}

impl std::error::Error for GameError {}

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
