//! # Fireworks Field
//!
//! Festive firework bursts and falling petals on a 2D drawing surface.
//!
//! The heart of the crate is [`Simulation`]: it owns a drawing surface and a
//! set of live particles, spawns radial bursts on request and advances and
//! renders everything once per display refresh. Trigger sources (the
//! [`AutoLauncher`] timer and the [`InputRouter`] for pointer and touch
//! input) are handed the simulation by `&mut`; nothing is global.
//!
//! ## Quick Start
//!
//! ```ignore
//! use fireworks_field::prelude::*;
//!
//! fn main() -> fireworks_field::Result<()> {
//!     let config = FieldConfig { seed: Some(42), ..FieldConfig::default() };
//!     let mut sim = Simulation::init(Pixmap::new(800, 600), config)?;
//!
//!     sim.spawn_burst(Vec2::new(400.0, 300.0), 60, 5.0);
//!     for _ in 0..60 {
//!         sim.tick();
//!     }
//!     sim.surface().save_png("burst.png")
//! }
//! ```
//!
//! Or open a window with the whole show, launcher and petals included:
//!
//! ```ignore
//! fireworks_field::run(FieldConfig::default())?;
//! ```
//!
//! ## Per-frame model
//!
//! Each [`Simulation::tick`] lays down the backdrop (a clear, or a
//! translucent fade that leaves motion trails), then for every particle
//! applies drag, gravity and velocity as fixed per-frame increments, burns
//! one frame of life, draws it, and drops it once it is spent or has fallen
//! below the surface. Opacity is always `max(0, life / life_scale)`.
//!
//! ## Surfaces
//!
//! Anything implementing [`Surface`] can host a simulation. [`Pixmap`] is
//! an RGBA8 raster canvas that can be saved as PNG or presented in a window;
//! [`RecordingSurface`] records draw calls for tests.

pub mod color;
pub mod config;
pub mod error;
pub mod feedback;
mod gpu;
pub mod input;
pub mod launcher;
pub mod particle;
pub mod petals;
pub mod raster;
pub mod scene;
mod simulation;
pub mod spawn;
pub mod surface;
pub mod time;
mod window;

pub use color::{Color, Palette};
pub use config::{
    Backdrop, BurstConfig, FieldConfig, InputConfig, LauncherConfig, PetalConfig, PhysicsConfig,
    RenderConfig, WindowConfig,
};
pub use error::{Error, GpuError, Result};
pub use feedback::Pulses;
pub use glam::Vec2;
pub use input::{InputRouter, Rect, Trigger};
pub use launcher::AutoLauncher;
pub use particle::{Particle, ParticleKind};
pub use petals::PetalField;
pub use raster::Pixmap;
pub use scene::{render_snapshot, Scene};
pub use simulation::Simulation;
pub use spawn::{BurstParams, SpawnContext};
pub use surface::{DrawCommand, RecordingSurface, Surface};
pub use window::run;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use fireworks_field::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::{Color, Palette};
    pub use crate::config::{Backdrop, FieldConfig};
    pub use crate::input::{InputRouter, Trigger};
    pub use crate::launcher::AutoLauncher;
    pub use crate::raster::Pixmap;
    pub use crate::simulation::Simulation;
    pub use crate::spawn::BurstParams;
    pub use crate::surface::{RecordingSurface, Surface};
    pub use crate::time::Time;
    pub use crate::Vec2;
}
