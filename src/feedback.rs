//! Click feedback pulses.
//!
//! Every burst launched by hand leaves a short expanding pulse where the
//! pointer or finger touched, so a press that lands reads as acknowledged
//! even before the particles spread.

use crate::color::Color;
use crate::surface::Surface;
use glam::Vec2;

/// Seconds a pulse stays visible.
pub const PULSE_LIFETIME: f32 = 0.6;
/// Radius a pulse starts growing from, in pixels.
pub const PULSE_BASE_RADIUS: f32 = 10.0;
/// Final radius as a multiple of the base radius.
pub const PULSE_GROWTH: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    pub origin: Vec2,
    /// Seconds since the pulse appeared.
    pub age: f32,
}

impl Pulse {
    /// How far along its life the pulse is, `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        (self.age / PULSE_LIFETIME).clamp(0.0, 1.0)
    }

    /// Current radius in pixels; grows linearly over the pulse's life.
    pub fn radius(&self) -> f32 {
        PULSE_BASE_RADIUS * PULSE_GROWTH * self.progress()
    }

    /// Current opacity; fades linearly to zero.
    pub fn alpha(&self) -> f32 {
        1.0 - self.progress()
    }
}

/// The set of live pulses.
#[derive(Debug, Clone, Default)]
pub struct Pulses {
    pulses: Vec<Pulse>,
}

impl Pulses {
    /// Start a new pulse centred on `origin`.
    pub fn push(&mut self, origin: Vec2) {
        self.pulses.push(Pulse { origin, age: 0.0 });
    }

    /// Age every pulse by `dt` seconds and drop finished ones.
    pub fn update(&mut self, dt: f32) {
        for pulse in &mut self.pulses {
            pulse.age += dt;
        }
        self.pulses.retain(|p| p.age < PULSE_LIFETIME);
    }

    /// Draw every live pulse as a translucent ember disc.
    pub fn render<S: Surface>(&self, surface: &mut S) {
        for pulse in &self.pulses {
            surface.fill_circle(pulse.origin, pulse.radius(), Color::EMBER, pulse.alpha());
        }
    }

    /// Number of live pulses.
    pub fn len(&self) -> usize {
        self.pulses.len()
    }

    /// True when no pulse is live.
    pub fn is_empty(&self) -> bool {
        self.pulses.is_empty()
    }

    /// Drop every pulse at once.
    pub fn clear(&mut self) {
        self.pulses.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    #[test]
    fn test_pulse_grows_and_fades() {
        let start = Pulse { origin: Vec2::ZERO, age: 0.0 };
        assert_eq!(start.radius(), 0.0);
        assert_eq!(start.alpha(), 1.0);

        let half = Pulse { age: 0.3, ..start };
        assert!((half.radius() - 15.0).abs() < 1e-4);
        assert!((half.alpha() - 0.5).abs() < 1e-4);

        let end = Pulse { age: 5.0, ..start };
        assert_eq!(end.radius(), 30.0);
        assert_eq!(end.alpha(), 0.0);
    }

    #[test]
    fn test_pulses_expire() {
        let mut pulses = Pulses::default();
        pulses.push(Vec2::new(10.0, 10.0));
        pulses.update(0.25);
        pulses.push(Vec2::new(20.0, 20.0));
        pulses.update(0.25);
        assert_eq!(pulses.len(), 2);

        pulses.update(0.2);
        assert_eq!(pulses.len(), 1);
        assert_eq!(pulses.pulses[0].origin, Vec2::new(20.0, 20.0));

        pulses.update(1.0);
        assert!(pulses.is_empty());
    }

    #[test]
    fn test_render_draws_ember_circles() {
        let mut pulses = Pulses::default();
        pulses.push(Vec2::new(5.0, 6.0));
        pulses.update(0.3);

        let mut surface = RecordingSurface::new(100, 100);
        pulses.render(&mut surface);
        let circles: Vec<_> = surface.circles().collect();
        assert_eq!(circles.len(), 1);
        assert_eq!(circles[0].0, Vec2::new(5.0, 6.0));
        assert!((circles[0].2 - 0.5).abs() < 1e-4);
    }
}
