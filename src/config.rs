//! Game tuning constants.
//!
//! `GameConfig::default()` reproduces the classic board: 400 × 600 px, five
//! 60 × 15 platforms scrolling 3 px every 100 ms, a 65 × 65 doodle that
//! jumps 200 px in 7 px steps.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub board_width: f64,
    pub board_height: f64,

    pub doodle_width: f64,
    pub doodle_height: f64,

    pub platform_count: usize,
    pub platform_width: f64,
    pub platform_height: f64,
    /// Bottom of the lowest platform at game start.
    pub first_platform_bottom: f64,
    /// Pixels every platform drops per scroll tick. Falling uses twice this.
    pub platform_speed: f64,

    pub jump_height: f64,
    pub jump_step: f64,
    pub move_step: f64,
    /// Distance kept between the doodle and the board's side edges.
    pub edge_margin: f64,
    /// Max rounded gap between doodle feet and platform top that still counts as standing on it.
    pub landing_tolerance: f64,
    /// Fraction of the doodle width that must reach past the platform's left edge.
    pub left_overlap_ratio: f64,
    /// Fraction of the platform width the doodle's left edge may reach.
    pub right_overlap_ratio: f64,

    pub scroll_interval_ms: f64,
    pub jump_interval_ms: f64,
    pub fall_interval_ms: f64,
    pub game_over_interval_ms: f64,
    /// Length of one simulation quantum. Every interval must be a multiple of it.
    pub quantum_ms: f64,
    /// Quanta run per `advance` at most; the rest of a long frame is dropped.
    pub max_steps_per_advance: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: 400.0,
            board_height: 600.0,
            doodle_width: 65.0,
            doodle_height: 65.0,
            platform_count: 5,
            platform_width: 60.0,
            platform_height: 15.0,
            first_platform_bottom: 100.0,
            platform_speed: 3.0,
            jump_height: 200.0,
            jump_step: 7.0,
            move_step: 15.0,
            edge_margin: 5.0,
            landing_tolerance: 5.0,
            left_overlap_ratio: 0.65,
            right_overlap_ratio: 0.9,
            scroll_interval_ms: 100.0,
            jump_interval_ms: 25.0,
            fall_interval_ms: 20.0,
            game_over_interval_ms: 10.0,
            quantum_ms: 5.0,
            max_steps_per_advance: 50,
        }
    }
}

impl GameConfig {
    /// Vertical distance between neighbouring platforms at game start.
    pub fn platform_spacing(&self) -> f64 {
        self.board_height / self.platform_count as f64
    }

    /// Bottom coordinate given to platforms spawned by recycling.
    pub fn spawn_bottom(&self) -> f64 {
        self.board_height - self.platform_height
    }

    /// Exclusive upper bound for a platform's random left offset.
    pub fn max_platform_left(&self) -> f64 {
        self.board_width - self.platform_width
    }

    pub fn validate(&self) -> Result<()> {
        if self.platform_count == 0 {
            return Err(GameError::InvalidConfig("platform_count must be at least 1".into()));
        }
        let positive = [
            ("board_width", self.board_width),
            ("board_height", self.board_height),
            ("doodle_width", self.doodle_width),
            ("doodle_height", self.doodle_height),
            ("platform_width", self.platform_width),
            ("platform_height", self.platform_height),
            ("platform_speed", self.platform_speed),
            ("jump_height", self.jump_height),
            ("jump_step", self.jump_step),
            ("move_step", self.move_step),
            ("quantum_ms", self.quantum_ms),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(GameError::InvalidConfig(format!("{name} must be positive, got {value}")));
            }
        }
        if self.platform_width > self.board_width {
            return Err(GameError::InvalidConfig(format!(
                "platform_width {} exceeds board_width {}",
                self.platform_width, self.board_width
            )));
        }
        if self.max_steps_per_advance == 0 {
            return Err(GameError::InvalidConfig("max_steps_per_advance must be at least 1".into()));
        }
        for (name, interval) in self.intervals() {
            let quanta = interval / self.quantum_ms;
            if !(interval > 0.0 && quanta.fract() == 0.0) {
                return Err(GameError::InvalidConfig(format!(
                    "{name} ({interval} ms) must be a positive multiple of quantum_ms ({} ms)",
                    self.quantum_ms
                )));
            }
        }
        Ok(())
    }

    fn intervals(&self) -> [(&'static str, f64); 4] {
        [
            ("scroll_interval_ms", self.scroll_interval_ms),
            ("jump_interval_ms", self.jump_interval_ms),
            ("fall_interval_ms", self.fall_interval_ms),
            ("game_over_interval_ms", self.game_over_interval_ms),
        ]
    }

    /// Parse overrides from JSON. Missing fields keep their defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig =
            serde_json::from_str(json).map_err(|e| GameError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn default_layout_helpers() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.platform_spacing(), 120.0);
        assert_eq!(cfg.spawn_bottom(), 585.0);
        assert_eq!(cfg.max_platform_left(), 340.0);
    }

    #[test]
    fn rejects_zero_platforms() {
        let cfg = GameConfig { platform_count: 0, ..GameConfig::default() };
        assert!(matches!(cfg.validate(), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_interval_off_quantum() {
        let cfg = GameConfig { fall_interval_ms: 22.0, ..GameConfig::default() };
        assert!(matches!(cfg.validate(), Err(GameError::InvalidConfig(msg)) if msg.contains("fall_interval_ms")));
    }

    #[test]
    fn rejects_platform_wider_than_board() {
        let cfg = GameConfig { platform_width: 500.0, ..GameConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn from_json_keeps_defaults_for_missing_fields() {
        let cfg = GameConfig::from_json(r#"{ "platform_count": 7, "platform_speed": 4.5 }"#).unwrap();
        assert_eq!(cfg.platform_count, 7);
        assert_eq!(cfg.platform_speed, 4.5);
        assert_eq!(cfg.board_width, 400.0);
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn from_json_reports_parse_errors() {
        assert!(matches!(GameConfig::from_json("{ nope"), Err(GameError::Config(_))));
    }
}
