//! Firework particles and their per-frame kinematics.
//!
//! A particle is born inside a burst, advanced once per tick and discarded by
//! the same tick that finds it expired. Its opacity is always derived from its
//! remaining life:
//!
//! ```text
//! opacity = max(0, life / life_scale)
//! ```

use crate::color::Color;
use crate::config::PhysicsConfig;
use glam::Vec2;
use std::collections::VecDeque;

/// Which part of a burst a particle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    /// Main burst particle, evenly spaced around the origin.
    Shell,
    /// Fast secondary spark that always glints in near-white.
    Glint,
}

/// A past position kept for drawing the particle's trail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub position: Vec2,
    pub opacity: f32,
}

/// A single firework particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub kind: ParticleKind,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Remaining life in frames.
    pub life: f32,
    /// Derived from `life` on every advance.
    pub opacity: f32,
    pub color: Color,
    /// Radius in pixels.
    pub size: f32,
    /// Enables the probabilistic glint draw.
    pub sparkle: bool,
    trail: VecDeque<TrailPoint>,
}

/// Opacity for a given remaining life.
#[inline]
pub fn opacity_for(life: f32, life_scale: f32) -> f32 {
    (life / life_scale).max(0.0)
}

impl Particle {
    /// A particle at `position` with one frame of life and a white 1px look.
    ///
    /// Use the `with_*` methods to fill in the rest.
    pub fn new(kind: ParticleKind, position: Vec2, velocity: Vec2) -> Self {
        Self {
            kind,
            position,
            velocity,
            life: 1.0,
            opacity: 1.0,
            color: Color::WHITE,
            size: 1.0,
            sparkle: kind == ParticleKind::Glint,
            trail: VecDeque::new(),
        }
    }

    /// Set remaining life; opacity follows as `life / life_scale`.
    pub fn with_life(mut self, life: f32, life_scale: f32) -> Self {
        self.life = life;
        self.opacity = opacity_for(life, life_scale);
        self
    }

    /// Set color and radius.
    pub fn with_look(mut self, color: Color, size: f32) -> Self {
        self.color = color;
        self.size = size;
        self
    }

    /// Let the particle draw glints.
    pub fn with_sparkle(mut self, sparkle: bool) -> Self {
        self.sparkle = sparkle;
        self
    }

    /// Advance one frame.
    ///
    /// Records the current position in the trail, applies drag then gravity,
    /// integrates position, burns one frame of life and recomputes opacity.
    pub fn advance(&mut self, physics: &PhysicsConfig, trail_length: usize) {
        if trail_length > 0 {
            self.trail.push_back(TrailPoint {
                position: self.position,
                opacity: self.opacity,
            });
            while self.trail.len() > trail_length {
                self.trail.pop_front();
            }
        }

        self.velocity *= physics.drag;
        self.velocity.y += physics.gravity;
        self.position += self.velocity;
        self.life -= 1.0;
        self.opacity = opacity_for(self.life, physics.life_scale);
    }

    /// Whether the particle must leave the live set.
    #[inline]
    pub fn is_expired(&self, surface_height: f32, margin: f32) -> bool {
        self.life <= 0.0 || self.opacity <= 0.0 || self.position.y > surface_height + margin
    }

    /// Trail samples, oldest first.
    pub fn trail(&self) -> impl ExactSizeIterator<Item = &TrailPoint> {
        self.trail.iter()
    }
}
