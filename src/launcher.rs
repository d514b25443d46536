//! Automatic burst launcher.
//!
//! Polled once per frame with the frame delta. Every `interval_secs` it picks
//! a point in the upper part of the surface, away from the edges, and
//! launches a single-colored burst there.

use crate::config::LauncherConfig;
use crate::simulation::Simulation;
use crate::spawn::{BurstParams, SpawnContext};
use crate::surface::Surface;
use glam::Vec2;

#[derive(Debug, Clone)]
pub struct AutoLauncher {
    config: LauncherConfig,
    elapsed: f32,
    launched: u64,
}

impl AutoLauncher {
    /// A launcher whose first burst fires one interval from now.
    pub fn new(config: LauncherConfig) -> Self {
        Self {
            config,
            elapsed: 0.0,
            launched: 0,
        }
    }

    /// Bursts launched so far.
    pub fn launched(&self) -> u64 {
        self.launched
    }

    /// Advance the timer by `dt` seconds, launching into `sim` when due.
    ///
    /// Returns the number of bursts launched this call. A long stall catches
    /// up with one burst per elapsed interval.
    pub fn update<S: Surface>(&mut self, dt: f32, sim: &mut Simulation<S>) -> u32 {
        if !self.config.enabled || !sim.is_running() || !dt.is_finite() || dt <= 0.0 {
            return 0;
        }

        self.elapsed += dt;
        let mut fired = 0;
        while self.elapsed >= self.config.interval_secs {
            self.elapsed -= self.config.interval_secs;
            self.launch(sim);
            fired += 1;
        }
        fired
    }

    /// Launch one burst right away.
    pub fn launch<S: Surface>(&mut self, sim: &mut Simulation<S>) {
        let (width, height) = sim.surface().size();
        let origin = self.launch_point(width, height, sim.spawn_context());
        let color = sim.random_color();
        sim.spawn(origin, BurstParams::default().with_color(color));
        self.launched += 1;
        log::debug!("Auto launch #{} at ({:.0}, {:.0})", self.launched, origin.x, origin.y);
    }

    /// A random launch point for a `width` x `height` surface.
    ///
    /// `x = margin + r * (width - 2 * margin)` and
    /// `y = margin + r * (height * height_fraction)`. The margin shrinks so
    /// small surfaces still get on-surface points.
    pub fn launch_point(&self, width: u32, height: u32, ctx: &mut SpawnContext) -> Vec2 {
        let (w, h) = (width as f32, height as f32);
        let margin = self.config.margin.min(w / 4.0).min(h / 4.0);
        let x = margin + ctx.random() * (w - 2.0 * margin);
        let y = margin + ctx.random() * (h * self.config.height_fraction);
        Vec2::new(x, y)
    }
}
