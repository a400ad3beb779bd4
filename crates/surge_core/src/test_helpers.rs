//! Test helpers: deterministic random sources and world setup.
//!
//! This module provides shared test utilities to reduce duplication across
//! test files.

use bevy_ecs::prelude::World;
use rand::{Error, RngCore};

use crate::generator::LocalTime;
use crate::scenario::{build_tracker, TrackerParams};

/// Random source that yields the same word on every draw.
///
/// [`FixedRng::min`] makes every uniform f64 draw exactly 0.0;
/// [`FixedRng::max`] makes every draw just under 1.0.
#[derive(Debug, Clone)]
pub struct FixedRng(pub u64);

impl FixedRng {
    pub fn min() -> Self {
        Self(0)
    }

    pub fn max() -> Self {
        Self(u64::MAX)
    }
}

impl RngCore for FixedRng {
    fn next_u32(&mut self) -> u32 {
        (self.0 >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        fill_from_words(self.0, dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Random source that replays a scripted sequence of uniform draws, cycling
/// once exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    words: Vec<u64>,
    next: usize,
}

impl ScriptedRng {
    /// Script the exact values `gen::<f64>()` will return, in order.
    pub fn from_f64s(values: &[f64]) -> Self {
        assert!(!values.is_empty(), "scripted draws must not be empty");
        let words = values.iter().map(|value| f64_to_word(*value)).collect();
        Self { words, next: 0 }
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let word = self.words[self.next % self.words.len()];
        self.next += 1;
        word
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let word = self.next_u64();
        fill_from_words(word, dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Encode a uniform [0,1) value as the word the standard f64 distribution
/// decodes back to that exact value (53-bit mantissa in the high bits).
fn f64_to_word(value: f64) -> u64 {
    debug_assert!((0.0..1.0).contains(&value), "draw must be in [0,1)");
    ((value * (1u64 << 53) as f64) as u64) << 11
}

fn fill_from_words(word: u64, dest: &mut [u8]) {
    let bytes = word.to_le_bytes();
    for chunk in dest.chunks_mut(8) {
        chunk.copy_from_slice(&bytes[..chunk.len()]);
    }
}

/// A valid time in the quiet mid-afternoon window (no baseline draw).
pub fn test_time(hour: u8, day_of_week: u8) -> LocalTime {
    LocalTime::new(hour, day_of_week).expect("valid test time")
}

/// Create a seeded tracker world with default parameters.
///
/// For more specific scenarios, use [`build_tracker`] directly.
pub fn create_test_world() -> World {
    let mut world = World::new();
    build_tracker(&mut world, TrackerParams::default().with_seed(42));
    world
}
