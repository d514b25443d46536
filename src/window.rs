use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::config::FieldConfig;
use crate::error::{Error, GpuError, Result};
use crate::gpu::Presenter;
use crate::scene::Scene;
use crate::time::Time;

/// Open a window and run the fireworks field until it is closed.
pub fn run(config: FieldConfig) -> Result<()> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// winit application state for the windowed show.
pub struct App {
    config: FieldConfig,
    window: Option<Arc<Window>>,
    presenter: Option<Presenter>,
    scene: Option<Scene>,
    time: Time,
    /// Title currently shown, to skip redundant `set_title` calls.
    title: String,
    /// First fatal error; returned from [`run`] once the loop exits.
    error: Option<Error>,
}

impl App {
    /// App with nothing created yet; the window opens on `resumed`.
    pub fn new(config: FieldConfig) -> Self {
        Self {
            config,
            window: None,
            presenter: None,
            scene: None,
            time: Time::new(),
            title: String::new(),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attrs = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let presenter = pollster::block_on(Presenter::new(window.clone()))?;
        let (width, height) = presenter.size();
        let scene = Scene::new(self.config.clone(), width, height)?;

        log::info!("Window open at {}x{}", width, height);
        window.request_redraw();
        self.window = Some(window);
        self.presenter = Some(presenter);
        self.scene = Some(scene);
        self.time = Time::new();
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: Error) {
        log::error!("{err}");
        if self.error.is_none() {
            self.error = Some(err);
        }
        self.exit(event_loop);
    }

    fn exit(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(scene) = &mut self.scene {
            scene.shutdown();
        }
        event_loop.exit();
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        match event.physical_key {
            PhysicalKey::Code(KeyCode::Escape) => self.exit(event_loop),
            PhysicalKey::Code(KeyCode::Space) => {
                self.time.toggle_pause();
                log::info!("{}", if self.time.is_paused() { "Paused" } else { "Resumed" });
            }
            _ => {}
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(scene), Some(presenter)) = (&mut self.scene, &mut self.presenter) else {
            return;
        };

        let dt = self.time.update();
        if !self.time.is_paused() {
            scene.advance(dt);
        }

        match presenter.present(scene.compose()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => presenter.reconfigure(),
            Err(e @ wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, GpuError::Present(e).into());
                return;
            }
            Err(e) => log::warn!("Dropped frame: {e}"),
        }

        self.refresh_title();
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn refresh_title(&mut self) {
        let title = window_title(
            &self.config.window.title,
            self.time.fps(),
            self.time.is_paused(),
        );
        if title != self.title {
            if let Some(window) = &self.window {
                window.set_title(&title);
            }
            self.title = title;
        }
    }
}

/// Window title with the live frame rate, or a paused marker.
fn window_title(base: &str, fps: f32, paused: bool) -> String {
    if paused {
        format!("{base} (paused)")
    } else if fps > 0.0 {
        format!("{base} ({fps:.0} fps)")
    } else {
        base.to_string()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(err) = self.init(event_loop) {
                self.fail(event_loop, err);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.exit(event_loop),
            WindowEvent::KeyboardInput { ref event, .. } => self.handle_key(event_loop, event),
            WindowEvent::Resized(size) => {
                if let Some(presenter) = &mut self.presenter {
                    presenter.resize(size.width, size.height);
                }
                if let Some(scene) = &mut self.scene {
                    scene.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            other => {
                if let Some(scene) = &mut self.scene {
                    scene.handle_event(&other);
                }
            }
        }
    }
}
