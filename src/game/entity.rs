//! Passive entities moved around by [`GameState`](super::GameState).
//!
//! Coordinates are board pixels measured from the bottom-left corner, the
//! same way the renderer positions nodes with `left` / `bottom`.

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::error::{GameError, Result};

fn check_position(entity: &'static str, left: f64, bottom: f64) -> Result<()> {
    if left.is_finite() && bottom.is_finite() {
        Ok(())
    } else {
        Err(GameError::InvalidPosition { entity, left, bottom })
    }
}

/// The player character.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Doodle {
    left: f64,
    bottom: f64,
}

impl Doodle {
    pub fn new(left: f64, bottom: f64) -> Result<Self> {
        check_position("Doodle", left, bottom)?;
        Ok(Self { left, bottom })
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    pub fn move_left(&mut self, step: f64) {
        self.left -= step;
    }

    pub fn move_right(&mut self, step: f64) {
        self.left += step;
    }

    pub fn move_up(&mut self, step: f64) {
        self.bottom += step;
    }

    pub fn move_down(&mut self, speed: f64) {
        self.bottom -= speed;
    }

    /// Snap the feet to `bottom`, e.g. the top surface of a platform.
    pub fn align(&mut self, bottom: f64) {
        self.bottom = bottom;
    }
}

/// A surface the doodle rests on. `id` is unique per game and lets the
/// renderer pair nodes with platforms across recycling.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Platform {
    id: u64,
    left: f64,
    bottom: f64,
}

impl Platform {
    pub fn new(id: u64, left: f64, bottom: f64) -> Result<Self> {
        check_position("Platform", left, bottom)?;
        Ok(Self { id, left, bottom })
    }

    /// For coordinates derived from a validated config.
    pub(crate) fn spawned(id: u64, left: f64, bottom: f64) -> Self {
        Self { id, left, bottom }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    pub fn move_down(&mut self, speed: f64) {
        self.bottom -= speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doodle_moves_by_given_steps() {
        let mut d = Doodle::new(150.0, 50.0).unwrap();
        d.move_left(15.0);
        d.move_up(7.0);
        assert_eq!((d.left(), d.bottom()), (135.0, 57.0));
        d.move_right(30.0);
        d.move_down(6.0);
        assert_eq!((d.left(), d.bottom()), (165.0, 51.0));
        d.align(115.0);
        assert_eq!(d.bottom(), 115.0);
    }

    #[test]
    fn zero_is_a_valid_coordinate() {
        assert!(Platform::new(0, 0.0, 0.0).is_ok());
        assert!(Doodle::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        assert!(matches!(
            Doodle::new(f64::NAN, 10.0),
            Err(GameError::InvalidPosition { entity: "Doodle", .. })
        ));
        assert!(matches!(
            Platform::new(1, 10.0, f64::INFINITY),
            Err(GameError::InvalidPosition { entity: "Platform", .. })
        ));
    }

    #[test]
    fn platform_only_moves_down() {
        let mut p = Platform::new(3, 20.0, 100.0).unwrap();
        p.move_down(3.0);
        assert_eq!((p.id(), p.left(), p.bottom()), (3, 20.0, 97.0));
    }
}
