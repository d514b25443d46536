//! Burst spawning and the simulation's random source.
//!
//! [`SpawnContext`] owns the only RNG a simulation uses, for both spawning
//! and the per-frame glint flicker. Seeding it makes whole runs reproducible.
//!
//! ```ignore
//! let mut ctx = SpawnContext::new(Some(42));
//! let burst = ctx.resolve(&config.burst, BurstParams::default());
//! ctx.spawn_shells(origin, &burst, &config.burst, life_scale, &mut particles);
//! ctx.spawn_glints(origin, &config.burst, life_scale, &mut particles);
//! ```

use crate::color::{Color, Palette};
use crate::config::BurstConfig;
use crate::particle::{Particle, ParticleKind};
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// Optional overrides for a single burst.
///
/// Anything left as `None`, or out of range, falls back to the configured
/// defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BurstParams {
    /// Number of shell particles.
    pub count: Option<usize>,
    /// Initial speed magnitude.
    pub power: Option<f32>,
    /// Shared color for every shell particle. `None` picks per particle.
    pub color: Option<Color>,
}

impl BurstParams {
    /// A burst with an explicit count and power.
    pub fn new(count: usize, power: f32) -> Self {
        Self {
            count: Some(count),
            power: Some(power),
            color: None,
        }
    }

    /// Give every shell particle the same color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// A burst with every parameter decided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedBurst {
    pub count: usize,
    pub power: f32,
    pub color: Option<Color>,
}

/// Random source for spawning and rendering.
pub struct SpawnContext {
    rng: SmallRng,
}

impl SpawnContext {
    /// Seeded when `seed` is given, otherwise seeded from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self { rng }
    }

    // ========== Random primitives ==========

    /// Random f32 between 0.0 and 1.0.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in `min..max`. Returns `min` when the range is empty or
    /// not finite.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        if max > min && (max - min).is_finite() {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }

    /// True with the given probability.
    #[inline]
    pub fn chance(&mut self, probability: f32) -> bool {
        self.random() < probability
    }

    /// Unit vector at a uniformly random angle.
    pub fn random_direction(&mut self) -> Vec2 {
        Vec2::from_angle(self.rng.gen_range(0.0..TAU))
    }

    /// Uniform pick from `palette`.
    pub fn pick(&mut self, palette: &Palette) -> Color {
        palette.pick(&mut self.rng)
    }

    // ========== Bursts ==========

    /// Fill in defaults for anything the caller left out or got wrong.
    pub fn resolve(&mut self, config: &BurstConfig, params: BurstParams) -> ResolvedBurst {
        let count = match params.count {
            Some(count) if count > 0 => count,
            _ => config.count,
        };
        let power = match params.power {
            Some(power) if power.is_finite() && power > 0.0 => power,
            _ => self.random_range(config.power_min, config.power_max),
        };
        ResolvedBurst {
            count,
            power,
            color: params.color,
        }
    }

    /// Append `burst.count` shell particles spaced evenly around `origin`.
    ///
    /// Each angle is `TAU * i / count` plus a random jitter, and each speed is
    /// `power * (0.5 + 0.5 * r)`.
    pub fn spawn_shells(
        &mut self,
        origin: Vec2,
        burst: &ResolvedBurst,
        config: &BurstConfig,
        life_scale: f32,
        out: &mut Vec<Particle>,
    ) {
        out.reserve(burst.count);
        for i in 0..burst.count {
            let angle = TAU * i as f32 / burst.count as f32
                + self.random_range(0.0, config.angle_jitter);
            let speed = burst.power * (0.5 + 0.5 * self.random());
            let life = self.random_range(config.life_min, config.life_max);
            let color = match burst.color {
                Some(color) => color,
                None => self.pick(&config.palette),
            };
            let size = self.random_range(config.size_min, config.size_max);
            let sparkle = self.chance(config.sparkle_chance);

            out.push(
                Particle::new(ParticleKind::Shell, origin, Vec2::from_angle(angle) * speed)
                    .with_life(life, life_scale)
                    .with_look(color, size)
                    .with_sparkle(sparkle),
            );
        }
    }

    /// Append `config.glint_count` glints flying off in random directions.
    pub fn spawn_glints(
        &mut self,
        origin: Vec2,
        config: &BurstConfig,
        life_scale: f32,
        out: &mut Vec<Particle>,
    ) {
        out.reserve(config.glint_count);
        for _ in 0..config.glint_count {
            let direction = self.random_direction();
            let speed = self.random_range(config.glint_speed_min, config.glint_speed_max);
            let life = self.random_range(config.glint_life_min, config.glint_life_max);
            let color = if self.chance(0.5) { Color::WHITE } else { Color::GOLD };
            let size = self.random_range(config.glint_size_min, config.glint_size_max);

            out.push(
                Particle::new(ParticleKind::Glint, origin, direction * speed)
                    .with_life(life, life_scale)
                    .with_look(color, size),
            );
        }
    }
}
