//! Random draw sources for growth and combat rolls.
//!
//! Every random decision in the rules goes through [`RngSource`], in a fixed
//! draw order documented on each rule. Given the same sequence of draws the
//! rules produce the same outcome, which is what makes combats replayable.

use std::collections::VecDeque;

/// Source of random draws used by the rules.
pub trait RngSource {
    /// Uniform integer in `[min, max]` inclusive.
    fn int_in(&mut self, min: i64, max: i64) -> i64;

    /// Uniform float in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Uniform float in `[min, max]`.
    fn float_in(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.unit()
    }

    /// Bernoulli trial that succeeds with `probability`.
    fn chance(&mut self, probability: f64) -> bool {
        self.unit() < probability
    }
}

impl<R: RngSource + ?Sized> RngSource for &mut R {
    fn int_in(&mut self, min: i64, max: i64) -> i64 {
        (**self).int_in(min, max)
    }

    fn unit(&mut self) -> f64 {
        (**self).unit()
    }

    fn float_in(&mut self, min: f64, max: f64) -> f64 {
        (**self).float_in(min, max)
    }

    fn chance(&mut self, probability: f64) -> bool {
        (**self).chance(probability)
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR variant: 32-bit output from 64-bit state. Seeded and fully
/// deterministic, so it is suitable for simulations and reproducible runs.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        let mut rng = Self { state: 0 };
        rng.step();
        rng.state = rng.state.wrapping_add(seed);
        rng.step();
        rng
    }

    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn step(&mut self) {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
    }

    /// XSH-RR output permutation of the pre-step state.
    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    pub fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.step();
        Self::output(old)
    }

    fn next_u64(&mut self) -> u64 {
        (u64::from(self.next_u32()) << 32) | u64::from(self.next_u32())
    }
}

impl RngSource for PcgRng {
    fn int_in(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        let span = max.abs_diff(min) + 1;
        min.wrapping_add((self.next_u64() % span) as i64)
    }

    fn unit(&mut self) -> f64 {
        // 53 significant bits
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

/// Draw source that replays a fixed script.
///
/// Integer draws are taken from `ints`, float draws (`unit`, `float_in`,
/// `chance`) from `floats`. Float values are returned verbatim, so a script
/// states the factor itself (`1.0` for a `uniform(0.5, 1.8)` base factor)
/// rather than a position inside the range.
///
/// # Panics
///
/// Drawing from an exhausted queue panics; a script must cover every draw
/// the exercised rule makes.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRolls {
    ints: VecDeque<i64>,
    floats: VecDeque<f64>,
}

impl ScriptedRolls {
    pub fn new(
        ints: impl IntoIterator<Item = i64>,
        floats: impl IntoIterator<Item = f64>,
    ) -> Self {
        Self {
            ints: ints.into_iter().collect(),
            floats: floats.into_iter().collect(),
        }
    }

    pub fn ints(ints: impl IntoIterator<Item = i64>) -> Self {
        Self::new(ints, [])
    }

    /// Append float draws after the ones already scripted.
    pub fn then_floats(mut self, floats: impl IntoIterator<Item = f64>) -> Self {
        self.floats.extend(floats);
        self
    }

    /// Append integer draws after the ones already scripted.
    pub fn then_ints(mut self, ints: impl IntoIterator<Item = i64>) -> Self {
        self.ints.extend(ints);
        self
    }

    /// True when every scripted draw was consumed.
    pub fn is_exhausted(&self) -> bool {
        self.ints.is_empty() && self.floats.is_empty()
    }

    fn next_float(&mut self) -> f64 {
        self.floats.pop_front().expect("scripted float draws exhausted")
    }
}

impl RngSource for ScriptedRolls {
    fn int_in(&mut self, min: i64, max: i64) -> i64 {
        let value = self.ints.pop_front().expect("scripted integer draws exhausted");
        debug_assert!(
            (min..=max).contains(&value),
            "scripted draw {value} outside [{min}, {max}]"
        );
        value
    }

    fn unit(&mut self) -> f64 {
        self.next_float()
    }

    fn float_in(&mut self, _min: f64, _max: f64) -> f64 {
        self.next_float()
    }
}
