//! Value sources that drive a [`DataProvider`](crate::DataProvider) each frame.
//!
//! The dashboard publishes one value per tick. [`UniformFeed`] draws uniformly
//! from an inclusive range with a seeded RNG, [`SineFeed`] sweeps a smooth wave.
//! Any `FnMut() -> i32` closure is a feed as well.

#[cfg(not(test))]
use micromath::F32Ext;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Lowest value of the default uniform range.
pub const DEFAULT_LOW: i32 = 0;

/// Highest value of the default uniform range.
pub const DEFAULT_HIGH: i32 = 100;

/// Source of per-frame data values.
pub trait DataFeed {
    fn next_value(&mut self) -> i32;
}

impl<F: FnMut() -> i32> DataFeed for F {
    fn next_value(&mut self) -> i32 { self() }
}

// =============================================================================
// Uniform Feed
// =============================================================================

/// Uniform integers in `low..=high` from a seeded [`SmallRng`].
#[derive(Clone, Debug)]
pub struct UniformFeed {
    rng: SmallRng,
    low: i32,
    high: i32,
}

impl UniformFeed {
    /// Feed over `low..=high`. Bounds are swapped if given in reverse.
    pub fn new(
        seed: u64,
        low: i32,
        high: i32,
    ) -> Self {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        Self {
            rng: SmallRng::seed_from_u64(seed),
            low,
            high,
        }
    }

    /// Feed over the default `0..=100` range.
    pub fn with_seed(seed: u64) -> Self { Self::new(seed, DEFAULT_LOW, DEFAULT_HIGH) }

    #[inline]
    pub const fn low(&self) -> i32 { self.low }

    #[inline]
    pub const fn high(&self) -> i32 { self.high }
}

impl DataFeed for UniformFeed {
    fn next_value(&mut self) -> i32 { self.rng.gen_range(self.low..=self.high) }
}

// =============================================================================
// Sine Feed
// =============================================================================

/// Rounded `offset + amplitude * sin(phase)`, advancing `step` radians per call.
#[derive(Clone, Copy, Debug)]
pub struct SineFeed {
    amplitude: f32,
    offset: f32,
    step: f32,
    phase: f32,
}

impl SineFeed {
    pub const fn new(
        amplitude: f32,
        offset: f32,
        step: f32,
    ) -> Self {
        Self {
            amplitude,
            offset,
            step,
            phase: 0.0,
        }
    }
}

impl Default for SineFeed {
    /// Sweeps 0..=100 over roughly two seconds at 60 FPS.
    fn default() -> Self { Self::new(50.0, 50.0, 0.05) }
}

impl DataFeed for SineFeed {
    fn next_value(&mut self) -> i32 {
        let value = self.offset + self.amplitude * self.phase.sin();
        self.phase += self.step;
        if self.phase > core::f32::consts::TAU {
            self.phase -= core::f32::consts::TAU;
        }
        value.round() as i32
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
