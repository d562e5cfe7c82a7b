//! Horizontal offsets for new platforms.
//!
//! SplitMix64 keeps the game reproducible from a seed; only the seed itself
//! comes from the environment.

#[derive(Clone, Debug)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Uniform in `[0, upper)`; `0.0` when `upper` is not positive.
    pub fn below(&mut self, upper: f64) -> f64 {
        if upper > 0.0 { self.next_f64() * upper } else { 0.0 }
    }
}

/// Fresh seed for a new game.
#[cfg(feature = "rng")]
pub fn entropy_seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(err) => {
            log::warn!("getrandom failed ({err}), seeding from the clock");
            clock_seed()
        }
    }
}

/// Fresh seed for a new game.
#[cfg(not(feature = "rng"))]
pub fn entropy_seed() -> u64 {
    clock_seed()
}

fn clock_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    let now = web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0);
    #[cfg(not(target_arch = "wasm32"))]
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0);
    now.to_bits().wrapping_mul(1664525).wrapping_add(1013904223)
}
