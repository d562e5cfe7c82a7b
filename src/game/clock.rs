//! Fixed-timestep driver.
//!
//! Wall time from the frame loop is cut into quanta of `quantum_ms`. Each
//! [`Phase`] runs on every quantum whose index is a multiple of its period,
//! and phases due on the same quantum always run in [`Phase::ORDER`].

use crate::config::GameConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Phase {
    Scroll,
    Jump,
    Fall,
    GameOverCheck,
}

impl Phase {
    pub const ORDER: [Phase; 4] = [Phase::Scroll, Phase::Jump, Phase::Fall, Phase::GameOverCheck];
}

#[derive(Clone, Debug)]
pub struct TickClock {
    quantum_ms: f64,
    max_steps: u32,
    /// Period of each phase in quanta, indexed like `Phase::ORDER`.
    periods: [u64; 4],
    carry_ms: f64,
    tick: u64,
    stopped: bool,
}

impl TickClock {
    /// Build a clock from a config that already passed `validate`.
    pub fn new(config: &GameConfig) -> Self {
        let quanta = |ms: f64| ((ms / config.quantum_ms).round() as u64).max(1);
        Self {
            quantum_ms: config.quantum_ms,
            max_steps: config.max_steps_per_advance,
            periods: [
                quanta(config.scroll_interval_ms),
                quanta(config.jump_interval_ms),
                quanta(config.fall_interval_ms),
                quanta(config.game_over_interval_ms),
            ],
            carry_ms: 0.0,
            tick: 0,
            stopped: false,
        }
    }

    /// Number of quanta run since the clock started.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    #[cfg(test)]
    fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Stop releasing quanta for good. Used on game over.
    pub fn stop(&mut self) {
        self.stopped = true;
        self.carry_ms = 0.0;
    }

    pub fn is_due(&self, phase: Phase, tick: u64) -> bool {
        let period = match phase {
            Phase::Scroll => self.periods[0],
            Phase::Jump => self.periods[1],
            Phase::Fall => self.periods[2],
            Phase::GameOverCheck => self.periods[3],
        };
        tick % period == 0
    }

    /// Phases due on quantum `tick`, in run order.
    #[cfg(test)]
    fn due(&self, tick: u64) -> impl Iterator<Item = Phase> + '_ {
        Phase::ORDER.into_iter().filter(move |&phase| self.is_due(phase, tick))
    }

    /// Feed `elapsed_ms` of wall time and return how many whole quanta are
    /// ready to run. Time beyond `max_steps` quanta is discarded.
    pub fn accumulate(&mut self, elapsed_ms: f64) -> u32 {
        if self.stopped || !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
            return 0;
        }
        self.carry_ms += elapsed_ms;
        let ready = (self.carry_ms / self.quantum_ms).floor();
        if ready > self.max_steps as f64 {
            log::warn!(
                "frame of {:.1} ms exceeds {} quanta, dropping the excess",
                self.carry_ms,
                self.max_steps
            );
            self.carry_ms = 0.0;
            return self.max_steps;
        }
        self.carry_ms -= ready * self.quantum_ms;
        ready as u32
    }

    /// Advance to the next quantum and return its index. The first quantum
    /// is 1, so no phase fires the instant the game starts.
    pub fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock() -> TickClock {
        TickClock::new(&GameConfig::default())
    }

    #[test]
    fn accumulates_whole_quanta_and_keeps_remainder() {
        let mut c = clock();
        assert_eq!(c.accumulate(12.0), 2);
        assert_eq!(c.accumulate(3.0), 1);
        assert_eq!(c.accumulate(4.9), 0);
    }

    #[test]
    fn ignores_bad_elapsed_values() {
        let mut c = clock();
        assert_eq!(c.accumulate(-16.0), 0);
        assert_eq!(c.accumulate(f64::NAN), 0);
        assert_eq!(c.accumulate(f64::INFINITY), 0);
    }

    #[test]
    fn caps_long_frames() {
        let mut c = clock();
        assert_eq!(c.accumulate(10_000.0), 50);
        // excess was dropped, not carried
        assert_eq!(c.accumulate(5.0), 1);
    }

    #[test]
    fn phase_cadence_matches_intervals() {
        let c = clock();
        assert_eq!(c.due(2).collect::<Vec<_>>(), vec![Phase::GameOverCheck]);
        assert_eq!(c.due(4).collect::<Vec<_>>(), vec![Phase::Fall, Phase::GameOverCheck]);
        assert_eq!(c.due(5).collect::<Vec<_>>(), vec![Phase::Jump]);
        assert_eq!(c.due(20).collect::<Vec<_>>(), Phase::ORDER.to_vec());
        assert_eq!(c.due(3).count(), 0);
    }

    #[test]
    fn stopped_clock_releases_nothing() {
        let mut c = clock();
        c.accumulate(2.0);
        c.stop();
        assert!(c.is_stopped());
        assert_eq!(c.accumulate(100.0), 0);
    }
}
