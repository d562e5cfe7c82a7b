//! Game controller: platforms, the doodle, scoring and game over.
//!
//! All mutation goes through [`GameState`]. The frame loop calls
//! [`GameState::advance`] with elapsed wall time; the individual phase
//! functions (`scroll_tick`, `jump_tick`, `fall_tick`, `check_game_over`)
//! are public so scenarios can be stepped by hand.

pub mod clock;
pub mod entity;
pub mod rng;

use std::collections::VecDeque;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::input::Command;

pub use clock::{Phase, TickClock};
pub use entity::{Doodle, Platform};
use rng::SplitMix64;

/// What the doodle is doing. Exactly one state holds at a time.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Motion {
    /// Resting on a platform and riding it down with the scroll.
    Grounded,
    /// Rising; `origin` is the bottom coordinate the jump started from.
    Jumping { origin: f64 },
    Falling,
}

/// State changes the renderer cares about, in the order they happened.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    PlatformRecycled { removed: u64, added: Platform },
    JumpStarted,
    FallStarted,
    Landed { platform: u64, score: u32 },
    GameOver { score: u32 },
}

/// Serializable copy of everything visible on the board.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Snapshot {
    pub doodle: Option<Doodle>,
    pub platforms: Vec<Platform>,
    pub motion: Motion,
    pub score: u32,
    pub game_over: bool,
    pub tick: u64,
}

pub struct GameState {
    config: GameConfig,
    platforms: VecDeque<Platform>,
    doodle: Option<Doodle>,
    motion: Motion,
    score: u32,
    game_over: bool,
    clock: TickClock,
    rng: SplitMix64,
    next_platform_id: u64,
    events: Vec<GameEvent>,
}

/// `Math.round` semantics: halves round towards +∞.
fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

impl GameState {
    /// Start a game: evenly spaced platforms with random offsets and the
    /// doodle standing on the lowest one.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let mut state = Self::empty(config, seed);
        state.init_platforms();
        state.place_doodle()?;
        log::info!(
            "game started: {} platforms on a {}x{} board",
            state.platforms.len(),
            state.config.board_width,
            state.config.board_height
        );
        Ok(state)
    }

    /// Start a game from explicit `(left, bottom)` platform positions,
    /// lowest first. The layout must hold `platform_count` entries.
    pub fn with_layout(config: GameConfig, layout: &[(f64, f64)], seed: u64) -> Result<Self> {
        config.validate()?;
        let mut state = Self::empty(config, seed);
        for &(left, bottom) in layout {
            let platform = Platform::new(state.next_platform_id, left, bottom)?;
            state.next_platform_id += 1;
            state.platforms.push_back(platform);
        }
        state.place_doodle()?;
        if state.platforms.len() != state.config.platform_count {
            return Err(GameError::InvalidConfig(format!(
                "layout has {} platforms, config expects {}",
                state.platforms.len(),
                state.config.platform_count
            )));
        }
        Ok(state)
    }

    fn empty(config: GameConfig, seed: u64) -> Self {
        Self {
            clock: TickClock::new(&config),
            platforms: VecDeque::with_capacity(config.platform_count),
            config,
            doodle: None,
            motion: Motion::Grounded,
            score: 0,
            game_over: false,
            rng: SplitMix64::new(seed),
            next_platform_id: 0,
            events: Vec::new(),
        }
    }

    fn init_platforms(&mut self) {
        let spacing = self.config.platform_spacing();
        for i in 0..self.config.platform_count {
            let bottom = self.config.first_platform_bottom + i as f64 * spacing;
            self.spawn_platform(bottom);
        }
    }

    fn spawn_platform(&mut self, bottom: f64) -> Platform {
        let left = self.rng.below(self.config.max_platform_left());
        let platform = Platform::spawned(self.next_platform_id, left, bottom);
        self.next_platform_id += 1;
        self.platforms.push_back(platform);
        platform
    }

    /// Put the doodle on top of the lowest platform, grounded.
    pub fn place_doodle(&mut self) -> Result<()> {
        let lowest = self.platforms.front().ok_or(GameError::NoPlatforms)?;
        let doodle = Doodle::new(lowest.left(), lowest.bottom() + self.config.platform_height)?;
        self.doodle = Some(doodle);
        self.motion = Motion::Grounded;
        Ok(())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Platforms ordered bottom-most first.
    pub fn platforms(&self) -> impl ExactSizeIterator<Item = &Platform> {
        self.platforms.iter()
    }

    pub fn doodle(&self) -> Option<&Doodle> {
        self.doodle.as_ref()
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    pub fn is_grounded(&self) -> bool {
        matches!(self.motion, Motion::Grounded)
    }

    pub fn is_jumping(&self) -> bool {
        matches!(self.motion, Motion::Jumping { .. })
    }

    pub fn is_falling(&self) -> bool {
        matches!(self.motion, Motion::Falling)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn tick(&self) -> u64 {
        self.clock.tick()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            doodle: self.doodle,
            platforms: self.platforms.iter().copied().collect(),
            motion: self.motion,
            score: self.score,
            game_over: self.game_over,
            tick: self.clock.tick(),
        }
    }

    /// Events produced since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // --- Driving loop ---------------------------------------------------

    /// Run every quantum that fits into `elapsed_ms` and return the events
    /// produced, including those from commands applied since the last call.
    pub fn advance(&mut self, elapsed_ms: f64) -> Vec<GameEvent> {
        let steps = self.clock.accumulate(elapsed_ms);
        for _ in 0..steps {
            if self.game_over {
                break;
            }
            let tick = self.clock.next_tick();
            for phase in Phase::ORDER {
                if self.clock.is_due(phase, tick) {
                    self.run_phase(phase);
                }
            }
        }
        self.take_events()
    }

    pub fn run_phase(&mut self, phase: Phase) {
        match phase {
            Phase::Scroll => self.scroll_tick(),
            Phase::Jump => self.jump_tick(),
            Phase::Fall => self.fall_tick(),
            Phase::GameOverCheck => {
                self.check_game_over();
            }
        }
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::Jump => {
                self.jump();
            }
        }
    }

    // --- Phases -----------------------------------------------------------

    /// Recycle the lowest platform once it is below the board, otherwise
    /// scroll everything down. A grounded doodle rides along.
    pub fn scroll_tick(&mut self) {
        if self.game_over {
            return;
        }
        let Some(lowest) = self.platforms.front() else { return };
        if lowest.bottom() < 0.0 {
            if let Some(removed) = self.platforms.pop_front() {
                let added = self.spawn_platform(self.config.spawn_bottom());
                log::debug!("recycled platform {} as {} at left {:.1}", removed.id(), added.id(), added.left());
                self.events.push(GameEvent::PlatformRecycled { removed: removed.id(), added });
            }
            return;
        }
        let speed = self.config.platform_speed;
        for platform in self.platforms.iter_mut() {
            platform.move_down(speed);
        }
        if self.is_grounded() {
            if let Some(doodle) = self.doodle.as_mut() {
                doodle.move_down(speed);
            }
        }
    }

    /// Begin a jump. Only a grounded doodle can jump; returns whether it did.
    pub fn jump(&mut self) -> bool {
        if self.game_over || !self.is_grounded() {
            return false;
        }
        let Some(doodle) = self.doodle.as_ref() else { return false };
        self.motion = Motion::Jumping { origin: doodle.bottom() };
        self.events.push(GameEvent::JumpStarted);
        true
    }

    /// Rise one step, never past `jump_height` above the origin. Once the
    /// full height is reached the next tick switches to falling.
    pub fn jump_tick(&mut self) {
        let Motion::Jumping { origin } = self.motion else { return };
        let Some(doodle) = self.doodle.as_mut() else { return };
        let gained = doodle.bottom() - origin;
        if gained < self.config.jump_height {
            doodle.move_up(self.config.jump_step.min(self.config.jump_height - gained));
        } else {
            self.motion = Motion::Falling;
            self.events.push(GameEvent::FallStarted);
        }
    }

    /// Land on a platform under the doodle's feet or keep falling at twice
    /// the scroll speed.
    pub fn fall_tick(&mut self) {
        if !self.is_falling() {
            return;
        }
        match self.supporting_platform().map(|p| (p.id(), p.bottom())) {
            Some((id, bottom)) => {
                let top = bottom + self.config.platform_height;
                if let Some(doodle) = self.doodle.as_mut() {
                    doodle.align(top);
                }
                self.motion = Motion::Grounded;
                self.score += 1;
                log::debug!("landed on platform {id}, score {}", self.score);
                self.events.push(GameEvent::Landed { platform: id, score: self.score });
            }
            None => {
                let speed = 2.0 * self.config.platform_speed;
                if let Some(doodle) = self.doodle.as_mut() {
                    doodle.move_down(speed);
                }
            }
        }
    }

    /// End the game once the doodle drops below the board. Returns true only
    /// on the call that ended it.
    pub fn check_game_over(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let Some(doodle) = self.doodle.as_ref() else { return false };
        if doodle.bottom() >= 0.0 {
            return false;
        }
        self.game_over = true;
        self.doodle = None;
        self.clock.stop();
        log::info!("game over, score {}", self.score);
        self.events.push(GameEvent::GameOver { score: self.score });
        true
    }

    // --- Horizontal movement ----------------------------------------------

    pub fn move_left(&mut self) {
        if self.game_over {
            return;
        }
        let margin = self.config.edge_margin;
        let step = self.config.move_step;
        let Some(doodle) = self.doodle.as_mut() else { return };
        if doodle.left() > margin {
            doodle.move_left(step);
            self.fall_if_unsupported();
        }
    }

    pub fn move_right(&mut self) {
        if self.game_over {
            return;
        }
        let limit = self.config.board_width - self.config.edge_margin;
        let width = self.config.doodle_width;
        let step = self.config.move_step;
        let Some(doodle) = self.doodle.as_mut() else { return };
        if doodle.left() + width < limit {
            doodle.move_right(step);
            self.fall_if_unsupported();
        }
    }

    fn fall_if_unsupported(&mut self) {
        if self.is_grounded() && self.supporting_platform().is_none() {
            self.motion = Motion::Falling;
            self.events.push(GameEvent::FallStarted);
        }
    }

    // --- Collision ----------------------------------------------------------

    /// The lowest platform whose top is within `landing_tolerance` below the
    /// doodle's feet and that overlaps it horizontally. The overlap test is
    /// lenient: 65% of the doodle must reach past the platform's left edge,
    /// and the doodle may start as far right as 90% along the platform.
    pub fn supporting_platform(&self) -> Option<&Platform> {
        let doodle = self.doodle.as_ref()?;
        let cfg = &self.config;
        let feet = round_half_up(doodle.bottom());
        self.platforms.iter().find(|p| {
            let gap = feet - round_half_up(p.bottom() + cfg.platform_height);
            (0.0..=cfg.landing_tolerance).contains(&gap)
                && doodle.left() + cfg.doodle_width * cfg.left_overlap_ratio >= p.left()
                && doodle.left() <= p.left() + cfg.platform_width * cfg.right_overlap_ratio
        })
    }
}
