//! Pointer and touch routing.
//!
//! The `InputRouter` turns raw window events into burst [`Trigger`]s and
//! hands accepted ones to the simulator it is given:
//!
//! ```ignore
//! if let Some(trigger) = router.handle_event(&event) {
//!     router.dispatch(trigger, &mut sim, &petals, &mut pulses);
//! }
//! ```
//!
//! Triggers outside the window, in an exclusion zone, or on a petal never
//! reach the simulator.

use crate::config::InputConfig;
use crate::feedback::Pulses;
use crate::petals::PetalField;
use crate::simulation::Simulation;
use crate::spawn::BurstParams;
use crate::surface::Surface;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use winit::event::{ElementState, MouseButton, TouchPhase, WindowEvent};

/// Axis-aligned rectangle in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Rectangle with its top-left corner at `(x, y)`.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Edges are inclusive.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// A request for a burst at a surface position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    /// Left mouse press at the cursor.
    Pointer(Vec2),
    /// Touch start.
    Touch(Vec2),
}

impl Trigger {
    /// Surface position the trigger asks to launch from.
    pub fn position(&self) -> Vec2 {
        match *self {
            Trigger::Pointer(p) | Trigger::Touch(p) => p,
        }
    }
}

/// Tracks the cursor and turns presses into triggers.
#[derive(Debug, Clone)]
pub struct InputRouter {
    config: InputConfig,
    cursor: Option<Vec2>,
    window_size: (u32, u32),
}

impl InputRouter {
    /// Router for a window of `width` x `height` physical pixels.
    pub fn new(config: InputConfig, width: u32, height: u32) -> Self {
        Self {
            config,
            cursor: None,
            window_size: (width, height),
        }
    }

    /// Last known cursor position, `None` once it leaves the window.
    pub fn cursor(&self) -> Option<Vec2> {
        self.cursor
    }

    /// Follow a window resize. Triggers outside the window are dropped.
    pub fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_size = (width, height);
    }

    // ========== Event translation ==========

    /// Process a winit window event, returning a trigger if it asks for a burst.
    pub fn handle_event(&mut self, event: &WindowEvent) -> Option<Trigger> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(Vec2::new(position.x as f32, position.y as f32));
                None
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                None
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => self.pointer_pressed(),
            WindowEvent::Touch(touch) if touch.phase == TouchPhase::Started => {
                Some(self.touch_started(Vec2::new(
                    touch.location.x as f32,
                    touch.location.y as f32,
                )))
            }
            WindowEvent::Resized(size) => {
                self.set_window_size(size.width, size.height);
                None
            }
            _ => None,
        }
    }

    /// Record the latest cursor position.
    pub fn cursor_moved(&mut self, position: Vec2) {
        self.cursor = Some(position);
    }

    /// A left press where the cursor is. Presses before the first cursor
    /// event carry no position and are dropped.
    pub fn pointer_pressed(&self) -> Option<Trigger> {
        self.cursor.map(Trigger::Pointer)
    }

    /// A touch beginning at `position`.
    pub fn touch_started(&self, position: Vec2) -> Trigger {
        Trigger::Touch(position)
    }

    // ========== Dispatch ==========

    /// Whether a trigger at `position` may launch a burst.
    pub fn accepts(&self, position: Vec2, petals: &PetalField) -> bool {
        let (width, height) = self.window_size;
        if !Rect::new(0.0, 0.0, width as f32, height as f32).contains(position) {
            log::trace!("Trigger at {position} is outside the {width}x{height} window");
            return false;
        }
        if self.config.exclusion_zones.iter().any(|zone| zone.contains(position)) {
            log::trace!("Trigger at {position} is inside an exclusion zone");
            return false;
        }
        if self.config.petals_block_clicks && petals.hit_test(position).is_some() {
            log::trace!("Trigger at {position} landed on a petal");
            return false;
        }
        true
    }

    /// Spawn a burst for `trigger` unless it is filtered out.
    ///
    /// Returns whether a burst was spawned.
    pub fn dispatch<S: Surface>(
        &self,
        trigger: Trigger,
        sim: &mut Simulation<S>,
        petals: &PetalField,
        pulses: &mut Pulses,
    ) -> bool {
        let position = trigger.position();
        if !self.accepts(position, petals) {
            return false;
        }

        let color = sim.random_color();
        sim.spawn(position, BurstParams::default().with_color(color));
        if self.config.feedback_pulse {
            pulses.push(position);
        }
        log::debug!("{trigger:?} launched a {color} burst");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FieldConfig, PetalConfig};
    use crate::petals::PetalPose;
    use crate::spawn::SpawnContext;
    use crate::surface::RecordingSurface;

    fn no_petals() -> PetalField {
        let config = PetalConfig {
            count: 0,
            ..PetalConfig::default()
        };
        PetalField::new(&config, 800, 600, &mut SpawnContext::new(Some(0)))
    }

    /// One petal, halfway down an 800x600 surface.
    fn one_petal() -> (PetalField, PetalPose) {
        let config = PetalConfig {
            count: 1,
            fall_min: 10.0,
            fall_max: 10.0,
            delay_max: 0.0,
            ..PetalConfig::default()
        };
        let mut petals = PetalField::new(&config, 800, 600, &mut SpawnContext::new(Some(4)));
        petals.update(5.0);
        let pose = petals.pose(0).unwrap();
        (petals, pose)
    }

    fn sim() -> Simulation<RecordingSurface> {
        let config = FieldConfig {
            seed: Some(5),
            ..FieldConfig::default()
        };
        Simulation::init(RecordingSurface::new(800, 600), config).unwrap()
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert!(rect.contains(Vec2::new(10.0, 20.0)));
        assert!(rect.contains(Vec2::new(110.0, 70.0)));
        assert!(!rect.contains(Vec2::new(9.9, 30.0)));
        assert!(!rect.contains(Vec2::new(50.0, 70.1)));
    }

    #[test]
    fn test_press_before_cursor_is_dropped() {
        let mut router = InputRouter::new(InputConfig::default(), 800, 600);
        assert_eq!(router.pointer_pressed(), None);

        router.cursor_moved(Vec2::new(30.0, 40.0));
        assert_eq!(router.pointer_pressed(), Some(Trigger::Pointer(Vec2::new(30.0, 40.0))));
    }

    #[test]
    fn test_pointer_trigger_spawns_burst_and_pulse() {
        let router = InputRouter::new(InputConfig::default(), 800, 600);
        let mut sim = sim();
        let mut pulses = Pulses::default();

        let trigger = Trigger::Pointer(Vec2::new(300.0, 200.0));
        assert!(router.dispatch(trigger, &mut sim, &no_petals(), &mut pulses));

        assert_eq!(sim.len(), 70);
        assert_eq!(pulses.len(), 1);
        let shell_color = sim.particles()[0].color;
        assert!(sim.particles()[..60].iter().all(|p| p.color == shell_color));
    }

    #[test]
    fn test_touch_start_triggers() {
        let router = InputRouter::new(InputConfig::default(), 800, 600);
        let mut sim = sim();
        let trigger = router.touch_started(Vec2::new(5.0, 5.0));
        assert!(router.dispatch(trigger, &mut sim, &no_petals(), &mut Pulses::default()));
        assert!(!sim.is_empty());
    }

    #[test]
    fn test_exclusion_zone_drops_trigger() {
        let config = InputConfig {
            exclusion_zones: vec![Rect::new(0.0, 0.0, 200.0, 100.0)],
            ..InputConfig::default()
        };
        let router = InputRouter::new(config, 800, 600);
        let mut sim = sim();
        let petals = no_petals();
        let mut pulses = Pulses::default();

        let inside = [
            Trigger::Pointer(Vec2::new(50.0, 50.0)),
            Trigger::Touch(Vec2::new(199.0, 1.0)),
        ];
        for trigger in inside {
            assert!(!router.dispatch(trigger, &mut sim, &petals, &mut pulses));
        }
        assert!(sim.is_empty());
        assert!(pulses.is_empty());

        let clear = Trigger::Pointer(Vec2::new(500.0, 50.0));
        assert!(router.dispatch(clear, &mut sim, &petals, &mut pulses));
    }

    #[test]
    fn test_trigger_on_petal_is_swallowed() {
        let (petals, pose) = one_petal();
        assert!(Rect::new(0.0, 0.0, 800.0, 600.0).contains(pose.center));

        let router = InputRouter::new(InputConfig::default(), 800, 600);
        let mut sim = sim();
        let mut pulses = Pulses::default();
        assert!(!router.dispatch(Trigger::Pointer(pose.center), &mut sim, &petals, &mut pulses));
        assert!(!router.dispatch(Trigger::Touch(pose.center), &mut sim, &petals, &mut pulses));
        assert!(sim.is_empty());
        assert!(pulses.is_empty());
    }

    #[test]
    fn test_petals_can_let_clicks_through() {
        let (petals, pose) = one_petal();
        let config = InputConfig {
            petals_block_clicks: false,
            ..InputConfig::default()
        };
        let router = InputRouter::new(config, 800, 600);
        let mut sim = sim();
        let mut pulses = Pulses::default();

        assert!(router.dispatch(Trigger::Pointer(pose.center), &mut sim, &petals, &mut pulses));
        assert_eq!(sim.len(), 70);
        assert_eq!(pulses.len(), 1);
    }

    #[test]
    fn test_trigger_outside_window_is_dropped() {
        let mut router = InputRouter::new(InputConfig::default(), 800, 600);
        let mut sim = sim();
        let petals = no_petals();
        let mut pulses = Pulses::default();

        let right = Trigger::Touch(Vec2::new(900.0, 300.0));
        let above = Trigger::Pointer(Vec2::new(10.0, -1.0));
        assert!(!router.dispatch(right, &mut sim, &petals, &mut pulses));
        assert!(!router.dispatch(above, &mut sim, &petals, &mut pulses));
        assert!(sim.is_empty());

        router.set_window_size(1024, 768);
        assert!(router.dispatch(right, &mut sim, &petals, &mut pulses));
    }

    #[test]
    fn test_pulse_can_be_disabled() {
        let config = InputConfig {
            feedback_pulse: false,
            ..InputConfig::default()
        };
        let router = InputRouter::new(config, 800, 600);
        let mut pulses = Pulses::default();
        let trigger = Trigger::Pointer(Vec2::new(1.0, 1.0));
        assert!(router.dispatch(trigger, &mut sim(), &no_petals(), &mut pulses));
        assert!(pulses.is_empty());
    }
}
