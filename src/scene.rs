//! Everything on screen, wired together.
//!
//! A `Scene` owns the simulator and the pieces that feed it: the launcher
//! timer, the input router, the petal layer and the click pulses. The window
//! drives it once per redraw; the headless snapshot drives it with a fixed
//! delta.

use crate::config::FieldConfig;
use crate::error::Result;
use crate::feedback::Pulses;
use crate::input::InputRouter;
use crate::launcher::AutoLauncher;
use crate::petals::PetalField;
use crate::raster::Pixmap;
use crate::simulation::Simulation;
use crate::time::Time;
use winit::event::WindowEvent;

/// The simulator plus every layer and trigger source around it.
pub struct Scene {
    sim: Simulation<Pixmap>,
    launcher: AutoLauncher,
    router: InputRouter,
    petals: PetalField,
    pulses: Pulses,
    /// Fireworks layer with petals and pulses drawn on top.
    frame: Pixmap,
}

impl Scene {
    /// Build every layer for a `width` x `height` surface.
    ///
    /// Petals draw from the simulator's random source, so a seeded config
    /// fixes the whole scene.
    pub fn new(config: FieldConfig, width: u32, height: u32) -> Result<Self> {
        let launcher = AutoLauncher::new(config.launcher.clone());
        let router = InputRouter::new(config.input.clone(), width, height);
        let petal_config = config.petals.clone();

        let mut sim = Simulation::init(Pixmap::new(width, height), config)?;
        let petals = PetalField::new(&petal_config, width, height, sim.spawn_context());
        log::debug!("Scene ready with {} petals", petals.len());

        Ok(Self {
            sim,
            launcher,
            router,
            petals,
            pulses: Pulses::default(),
            frame: Pixmap::new(width, height),
        })
    }

    /// Advance every layer by one frame of `dt` seconds.
    ///
    /// Returns `false` once the simulator has shut down.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.launcher.update(dt, &mut self.sim);
        self.petals.update(dt);
        self.petals.hover(self.router.cursor());
        self.pulses.update(dt);
        self.sim.tick()
    }

    /// Route a window event to the input layer, launching a burst if it
    /// asks for one.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        if let Some(trigger) = self.router.handle_event(event) {
            self.router
                .dispatch(trigger, &mut self.sim, &self.petals, &mut self.pulses);
        }
    }

    /// Launch `count` bursts right away at random launch points.
    pub fn launch(&mut self, count: u32) {
        for _ in 0..count {
            self.launcher.launch(&mut self.sim);
        }
    }

    /// Resize every layer. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.sim.resize(width, height);
        self.petals.resize(width, height);
        self.router.set_window_size(width, height);
    }

    /// Compose the layers into the frame and return it.
    pub fn compose(&mut self) -> &Pixmap {
        self.frame.copy_from(self.sim.surface());
        self.petals.render(&mut self.frame);
        self.pulses.render(&mut self.frame);
        &self.frame
    }

    /// Stop the simulator and drop pending pulses.
    pub fn shutdown(&mut self) {
        self.sim.shutdown();
        self.pulses.clear();
    }

    /// The simulator, for inspection.
    pub fn sim(&self) -> &Simulation<Pixmap> {
        &self.sim
    }

}

/// Render `frames` frames headlessly at `config.window` size and return the
/// composed last frame.
///
/// `bursts` bursts are launched before the first frame. Time advances by a
/// fixed 1/60 s per frame, so a seeded configuration always produces the
/// same image.
pub fn render_snapshot(config: FieldConfig, frames: u32, bursts: u32) -> Result<Pixmap> {
    let (width, height) = (config.window.width, config.window.height);
    let mut scene = Scene::new(config, width, height)?;
    let mut time = Time::fixed(1.0 / 60.0);

    scene.launch(bursts);
    for _ in 0..frames {
        let dt = time.update();
        scene.advance(dt);
    }
    log::info!(
        "Rendered {} frames ({:.2}s) at {}x{}, {} bursts launched, {} particles live",
        time.frame(),
        time.elapsed(),
        width,
        height,
        scene.launcher.launched(),
        scene.sim().len()
    );
    Ok(scene.compose().clone())
}
