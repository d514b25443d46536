//! The particle field simulator.
//!
//! A [`Simulation`] owns its drawing surface, the live particle set and the
//! random source. Nothing is global: trigger sources (the launcher timer,
//! pointer and touch routing) are handed `&mut Simulation` and call
//! [`Simulation::spawn`]. The host's redraw callback calls
//! [`Simulation::tick`] once per display refresh.
//!
//! ```ignore
//! let mut sim = Simulation::init(Pixmap::new(800, 600), FieldConfig::default())?;
//! sim.spawn_burst(Vec2::new(400.0, 300.0), 60, 5.0);
//! while sim.tick() {
//!     present(sim.surface());
//! }
//! ```

use crate::color::Color;
use crate::config::{Backdrop, FieldConfig, RenderConfig};
use crate::error::{Error, Result};
use crate::particle::{Particle, ParticleKind};
use crate::spawn::{BurstParams, SpawnContext};
use crate::surface::Surface;
use glam::Vec2;

/// Trail dots are drawn at this fraction of the particle's opacity.
const TRAIL_ALPHA: f32 = 0.4;
/// Glow halo radius relative to the particle radius.
const GLOW_SCALE: f32 = 2.5;
/// Glints glow wider than shells.
const GLINT_GLOW_SCALE: f32 = 3.75;
const GLOW_ALPHA: f32 = 0.15;

/// Fireworks simulator bound to one drawing surface.
pub struct Simulation<S: Surface> {
    surface: S,
    config: FieldConfig,
    particles: Vec<Particle>,
    ctx: SpawnContext,
    frame: u64,
    running: bool,
}

impl<S: Surface> Simulation<S> {
    /// Validate `config`, check the surface and start the simulator.
    ///
    /// A surface without area is a setup error, reported here once rather
    /// than on every frame. With a fade backdrop the surface is primed with
    /// an opaque fill of the backdrop color.
    pub fn init(mut surface: S, config: FieldConfig) -> Result<Self> {
        config.validate()?;
        let (width, height) = surface.size();
        if width == 0 || height == 0 {
            return Err(Error::ZeroSizedSurface { width, height });
        }

        match config.render.backdrop {
            Backdrop::Clear => surface.clear(),
            Backdrop::Fade { color, .. } => surface.fade(color, 1.0),
        }

        let ctx = SpawnContext::new(config.seed);
        log::info!(
            "Fireworks field ready on {}x{} surface (seed: {:?})",
            width,
            height,
            config.seed
        );

        Ok(Self {
            surface,
            config,
            particles: Vec::new(),
            ctx,
            frame: 0,
            running: true,
        })
    }

    /// Spawn a burst of `count` shells at `power` around `origin`.
    ///
    /// Zero counts and non-positive powers fall back to the configured
    /// defaults. The live set grows by `count + burst.glint_count`.
    pub fn spawn_burst(&mut self, origin: Vec2, count: usize, power: f32) {
        self.spawn(origin, BurstParams::new(count, power));
    }

    /// Spawn a burst with optional overrides.
    ///
    /// The origin is not clamped, so bursts may start off-surface. Non-finite
    /// origins are dropped.
    pub fn spawn(&mut self, origin: Vec2, params: BurstParams) {
        if !self.running {
            log::debug!("Ignoring burst at {origin} after shutdown");
            return;
        }
        if !origin.is_finite() {
            log::warn!("Ignoring burst with non-finite origin {origin}");
            return;
        }

        let burst_config = &self.config.burst;
        let life_scale = self.config.physics.life_scale;
        let burst = self.ctx.resolve(burst_config, params);
        self.ctx
            .spawn_shells(origin, &burst, burst_config, life_scale, &mut self.particles);
        self.ctx
            .spawn_glints(origin, burst_config, life_scale, &mut self.particles);

        log::debug!(
            "Burst at ({:.0}, {:.0}): {} shells, {} glints, power {:.2}; {} live",
            origin.x,
            origin.y,
            burst.count,
            burst_config.glint_count,
            burst.power,
            self.particles.len()
        );
    }

    /// Advance and render one frame.
    ///
    /// Prepares the backdrop, then for every live particle: advance the
    /// kinematics, draw it, and drop it if it has expired. Physics steps are
    /// fixed per call regardless of wall-clock time.
    ///
    /// Returns `true` while the simulator is running, so the host should
    /// schedule another frame.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }

        let Self {
            surface,
            config,
            particles,
            ctx,
            ..
        } = self;

        match config.render.backdrop {
            Backdrop::Clear => surface.clear(),
            Backdrop::Fade { color, alpha } => surface.fade(color, alpha),
        }

        let floor = surface.height() as f32;
        let physics = &config.physics;
        let render = &config.render;

        particles.retain_mut(|p| {
            p.advance(physics, render.trail_length);
            draw_particle(surface, ctx, render, p);
            !p.is_expired(floor, physics.expiry_margin)
        });

        self.frame += 1;
        log::trace!("Frame {}: {} live particles", self.frame, self.particles.len());
        true
    }

    /// Stop the simulator and drop every live particle.
    ///
    /// Later `tick` calls return `false` and spawns are ignored.
    pub fn shutdown(&mut self) {
        if self.running {
            log::info!(
                "Shutting down fireworks field after {} frames ({} particles dropped)",
                self.frame,
                self.particles.len()
            );
        }
        self.running = false;
        self.particles.clear();
    }

    /// False once [`shutdown`](Self::shutdown) has been called.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Follow a viewport resize. Zero-sized requests are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("Ignoring resize to {width}x{height}");
            return;
        }
        self.surface.resize(width, height);
        if let Backdrop::Fade { color, .. } = self.config.render.backdrop {
            self.surface.fade(color, 1.0);
        }
    }

    /// Live particles in spawn order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of live particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// True when no particle is live.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Frames ticked so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// The drawing surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the drawing surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Give the surface back, ending the simulation.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// The simulation's random source, shared with trigger sources so a
    /// seeded run stays reproducible end to end.
    pub fn spawn_context(&mut self) -> &mut SpawnContext {
        &mut self.ctx
    }

    /// A color from the burst palette.
    pub fn random_color(&mut self) -> Color {
        self.ctx.pick(&self.config.burst.palette)
    }
}

/// Draw one particle: trail, optional glow, body and the occasional glint.
fn draw_particle<S: Surface>(
    surface: &mut S,
    ctx: &mut SpawnContext,
    render: &RenderConfig,
    p: &Particle,
) {
    let trail_len = p.trail().len();
    for (i, point) in p.trail().enumerate() {
        let t = i as f32 / trail_len as f32;
        if t > 0.0 {
            let alpha = point.opacity * t * TRAIL_ALPHA;
            surface.fill_circle(point.position, p.size * t, p.color, alpha);
        }
    }

    if render.glow {
        let scale = match p.kind {
            ParticleKind::Shell => GLOW_SCALE,
            ParticleKind::Glint => GLINT_GLOW_SCALE,
        };
        surface.fill_circle(p.position, p.size * scale, p.color, p.opacity * GLOW_ALPHA);
    }

    surface.fill_circle(p.position, p.size, p.color, p.opacity);

    if p.sparkle && ctx.chance(render.glint_chance) {
        let jitter = Vec2::new(ctx.random() - 0.5, ctx.random() - 0.5) * 2.0 * render.glint_offset;
        let color = match p.kind {
            ParticleKind::Glint => Color::WHITE,
            ParticleKind::Shell => Color::GOLD,
        };
        surface.fill_circle(p.position + jitter, p.size * 0.8, color, p.opacity * 0.9);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};

    fn quiet_config() -> FieldConfig {
        let mut config = FieldConfig::default();
        config.seed = Some(11);
        config.render.glow = false;
        config.render.trail_length = 0;
        config.render.glint_chance = 0.0;
        config
    }

    fn sim(config: FieldConfig) -> Simulation<RecordingSurface> {
        Simulation::init(RecordingSurface::new(800, 600), config).unwrap()
    }

    #[test]
    fn test_init_rejects_zero_sized_surface() {
        let result = Simulation::init(RecordingSurface::new(0, 600), FieldConfig::default());
        assert!(matches!(
            result,
            Err(Error::ZeroSizedSurface { width: 0, height: 600 })
        ));
    }

    #[test]
    fn test_init_rejects_invalid_config() {
        let mut config = FieldConfig::default();
        config.physics.drag = 0.0;
        let result = Simulation::init(RecordingSurface::new(10, 10), config);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_init_primes_fade_backdrop() {
        let sim = sim(FieldConfig::default());
        assert_eq!(
            sim.surface().commands(),
            &[DrawCommand::Fade { color: Color::NIGHT, alpha: 1.0 }]
        );
    }

    #[test]
    fn test_spawn_burst_adds_shells_and_glints() {
        let mut sim = sim(quiet_config());
        sim.spawn_burst(Vec2::new(400.0, 300.0), 60, 5.0);
        assert_eq!(sim.len(), 70);
        let shells = sim.particles().iter().filter(|p| p.kind == ParticleKind::Shell).count();
        assert_eq!(shells, 60);
    }

    #[test]
    fn test_spawn_off_surface_is_not_clamped() {
        let mut sim = sim(quiet_config());
        sim.spawn_burst(Vec2::new(-500.0, 5000.0), 8, 3.0);
        assert!(sim.particles().iter().all(|p| p.position == Vec2::new(-500.0, 5000.0)));
    }

    #[test]
    fn test_spawn_non_finite_origin_ignored() {
        let mut sim = sim(quiet_config());
        sim.spawn_burst(Vec2::new(f32::NAN, 1.0), 8, 3.0);
        sim.spawn_burst(Vec2::new(1.0, f32::INFINITY), 8, 3.0);
        assert!(sim.is_empty());
    }

    #[test]
    fn test_shared_color_burst() {
        let mut sim = sim(quiet_config());
        sim.spawn(Vec2::ZERO, BurstParams::new(20, 4.0).with_color(Color::GOLD));
        assert!(sim
            .particles()
            .iter()
            .filter(|p| p.kind == ParticleKind::Shell)
            .all(|p| p.color == Color::GOLD));
    }

    #[test]
    fn test_empty_tick_only_prepares_backdrop() {
        let mut sim = sim(quiet_config());
        sim.surface_mut().take();
        assert!(sim.tick());
        assert!(sim.is_empty());
        assert_eq!(
            sim.surface().commands(),
            &[DrawCommand::Fade { color: Color::NIGHT, alpha: 0.08 }]
        );

        let mut config = quiet_config();
        config.render.backdrop = Backdrop::Clear;
        let mut sim = self::sim(config);
        sim.surface_mut().take();
        sim.tick();
        assert_eq!(sim.surface().commands(), &[DrawCommand::Clear]);
    }

    #[test]
    fn test_one_circle_per_particle_when_quiet() {
        let mut sim = sim(quiet_config());
        sim.spawn_burst(Vec2::new(400.0, 300.0), 30, 5.0);
        sim.surface_mut().take();
        sim.tick();
        assert_eq!(sim.surface().circles().count(), 40);
    }

    #[test]
    fn test_glow_trail_and_glint_draws() {
        let mut config = quiet_config();
        config.render.glow = true;
        config.render.trail_length = 3;
        config.render.glint_chance = 1.0;
        config.burst.sparkle_chance = 1.0;
        config.burst.glint_count = 0;
        let mut sim = sim(config);
        sim.spawn_burst(Vec2::new(400.0, 300.0), 1, 5.0);

        sim.surface_mut().take();
        sim.tick();
        // Trail holds one sample (t = 0, skipped), then glow, body and glint.
        assert_eq!(sim.surface().circles().count(), 3);

        sim.surface_mut().take();
        sim.tick();
        // Two trail samples, the second one drawn.
        assert_eq!(sim.surface().circles().count(), 4);

        let glint = sim.surface().circles().last().unwrap();
        let body = sim.particles()[0].position;
        assert!((glint.0 - body).abs().max_element() <= 4.0 + 1e-4);
    }

    #[test]
    fn test_glints_glow_wider_than_shells() {
        let mut config = quiet_config();
        config.render.glow = true;
        config.burst.glint_count = 3;
        let mut sim = sim(config);
        sim.spawn_burst(Vec2::new(400.0, 300.0), 3, 5.0);

        sim.surface_mut().take();
        sim.tick();
        let circles: Vec<_> = sim.surface().circles().collect();
        assert_eq!(circles.len(), 12);

        // Each particle draws its halo, then its body.
        for (p, pair) in sim.particles().iter().zip(circles.chunks(2)) {
            let expected = match p.kind {
                ParticleKind::Shell => p.size * 2.5,
                ParticleKind::Glint => p.size * 3.75,
            };
            assert!((pair[0].1 - expected).abs() < 1e-5);
            assert!((pair[1].1 - p.size).abs() < 1e-5);
        }
    }

    #[test]
    fn test_particle_alpha_matches_life() {
        let mut sim = sim(quiet_config());
        sim.spawn_burst(Vec2::new(400.0, 100.0), 10, 2.0);
        sim.surface_mut().take();
        sim.tick();
        let alphas: Vec<f32> = sim.surface().circles().map(|c| c.2).collect();
        let expected: Vec<f32> = sim.particles().iter().map(|p| p.opacity).collect();
        assert_eq!(alphas, expected);
        assert!(sim.particles().iter().all(|p| p.opacity == (p.life / 150.0).max(0.0)));
    }

    #[test]
    fn test_shutdown_stops_everything() {
        let mut sim = sim(quiet_config());
        sim.spawn_burst(Vec2::new(10.0, 10.0), 10, 2.0);
        sim.shutdown();
        assert!(!sim.is_running());
        assert!(sim.is_empty());
        assert!(!sim.tick());
        sim.spawn_burst(Vec2::new(10.0, 10.0), 10, 2.0);
        assert!(sim.is_empty());
        assert_eq!(sim.frame(), 0);
    }

    #[test]
    fn test_resize() {
        let mut sim = sim(quiet_config());
        sim.resize(1024, 768);
        assert_eq!(sim.surface().size(), (1024, 768));
        sim.resize(0, 768);
        assert_eq!(sim.surface().size(), (1024, 768));
    }
}
