//! Falling petal layer.
//!
//! Petals drift down the surface on independent clocks, swaying side to side
//! and turning once per fall. Each one loops forever: when it drops out at
//! the bottom it reappears above the top edge.
//!
//! ```text
//! progress = ((t - delay) mod fall) / fall
//! y        = -margin + progress * (height + 2 * margin)
//! x        = anchor + sway * sin(progress * 4π)
//! ```

use crate::color::Color;
use crate::config::PetalConfig;
use crate::spawn::SpawnContext;
use crate::surface::Surface;
use glam::Vec2;
use std::f32::consts::{PI, TAU};

/// Width of a petal relative to its length.
const PETAL_ASPECT: f32 = 0.6;
/// Scale applied to a hovered petal.
const HOVER_SCALE: f32 = 1.3;
/// Full side-to-side sways per fall.
const SWAYS_PER_FALL: f32 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Petal {
    /// Horizontal center of the sway.
    pub anchor_x: f32,
    /// Seconds to cross the surface.
    pub fall_secs: f32,
    /// Seconds before the petal first appears.
    pub delay: f32,
    /// Starting rotation in radians.
    pub rotation: f32,
    pub scale: f32,
    /// Horizontal sway amplitude in pixels.
    pub sway: f32,
    pub color: Color,
    pub hovered: bool,
}

/// Where a petal is and how it looks at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PetalPose {
    pub center: Vec2,
    pub radii: Vec2,
    pub rotation: f32,
    pub color: Color,
}

impl PetalPose {
    /// Whether `point` lies inside the rotated ellipse.
    pub fn contains(&self, point: Vec2) -> bool {
        let local = Vec2::from_angle(-self.rotation).rotate(point - self.center) / self.radii;
        local.length_squared() <= 1.0
    }
}

/// The petal layer, sized to the surface it is drawn over.
#[derive(Debug, Clone)]
pub struct PetalField {
    config: PetalConfig,
    petals: Vec<Petal>,
    width: u32,
    height: u32,
    clock: f32,
}

impl PetalField {
    /// Scatter `config.count` petals across a `width`-wide surface.
    ///
    /// Fall time, delay, rotation, scale, sway and color are drawn from the
    /// configured ranges. A disabled layer holds no petals.
    pub fn new(config: &PetalConfig, width: u32, height: u32, ctx: &mut SpawnContext) -> Self {
        let count = if config.enabled { config.count } else { 0 };
        let petals = (0..count)
            .map(|_| Petal {
                anchor_x: ctx.random() * width as f32,
                fall_secs: ctx.random_range(config.fall_min, config.fall_max),
                delay: ctx.random_range(0.0, config.delay_max),
                rotation: ctx.random_range(0.0, TAU),
                scale: ctx.random_range(config.scale_min, config.scale_max),
                sway: ctx.random_range(config.sway_min, config.sway_max),
                color: ctx.pick(&config.palette),
                hovered: false,
            })
            .collect();

        Self {
            config: config.clone(),
            petals,
            width,
            height,
            clock: 0.0,
        }
    }

    /// Number of petals, visible or still waiting.
    pub fn len(&self) -> usize {
        self.petals.len()
    }

    /// True when the layer has no petals.
    pub fn is_empty(&self) -> bool {
        self.petals.is_empty()
    }

    /// Distance above and below the surface where petals wrap around.
    pub fn margin(&self) -> f32 {
        self.config.size * self.config.scale_max * HOVER_SCALE
    }

    /// Advance the petal clock by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.clock += dt;
    }

    /// Keep anchors at the same relative position on a new surface size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if self.width > 0 {
            let ratio = width as f32 / self.width as f32;
            for petal in &mut self.petals {
                petal.anchor_x *= ratio;
            }
        }
        self.width = width;
        self.height = height;
    }

    /// Pose of petal `index` at the current clock, `None` while it waits out
    /// its delay.
    pub fn pose(&self, index: usize) -> Option<PetalPose> {
        let petal = self.petals.get(index)?;
        let local = self.clock - petal.delay;
        if local < 0.0 {
            return None;
        }

        let progress = local.rem_euclid(petal.fall_secs) / petal.fall_secs;
        let margin = self.margin();
        let y = -margin + progress * (self.height as f32 + 2.0 * margin);
        let x = petal.anchor_x + petal.sway * (progress * TAU * SWAYS_PER_FALL).sin();

        let mut rotation = petal.rotation + progress * TAU;
        let mut scale = petal.scale;
        let mut color = petal.color;
        if petal.hovered {
            rotation += PI;
            scale *= HOVER_SCALE;
            color = color.adjust(self.config.hover_boost);
        }

        Some(PetalPose {
            center: Vec2::new(x, y),
            radii: Vec2::new(PETAL_ASPECT, 1.0) * self.config.size * scale,
            rotation,
            color,
        })
    }

    /// Poses of every visible petal, bottom to top.
    pub fn poses(&self) -> impl Iterator<Item = PetalPose> + '_ {
        (0..self.petals.len()).filter_map(|i| self.pose(i))
    }

    /// Topmost visible petal under `point`.
    pub fn hit_test(&self, point: Vec2) -> Option<usize> {
        (0..self.petals.len())
            .rev()
            .find(|&i| self.pose(i).is_some_and(|pose| pose.contains(point)))
    }

    /// Flag the petal under `cursor` as hovered and clear every other flag.
    pub fn hover(&mut self, cursor: Option<Vec2>) {
        let hit = cursor.and_then(|c| self.hit_test(c));
        for (i, petal) in self.petals.iter_mut().enumerate() {
            petal.hovered = Some(i) == hit;
        }
    }

    /// Draw every visible petal as a rotated ellipse.
    pub fn render<S: Surface>(&self, surface: &mut S) {
        for pose in self.poses() {
            surface.fill_ellipse(pose.center, pose.radii, pose.rotation, pose.color, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};

    fn field_with(petal: Petal) -> PetalField {
        let mut field = PetalField::new(
            &PetalConfig { count: 0, ..PetalConfig::default() },
            800,
            600,
            &mut SpawnContext::new(Some(0)),
        );
        field.petals.push(petal);
        field
    }

    fn petal() -> Petal {
        Petal {
            anchor_x: 400.0,
            fall_secs: 20.0,
            delay: 2.0,
            rotation: 0.0,
            scale: 1.0,
            sway: 30.0,
            color: Color::rgb(255, 183, 197),
            hovered: false,
        }
    }

    #[test]
    fn test_new_scatters_within_ranges() {
        let config = PetalConfig::default();
        let field = PetalField::new(&config, 1000, 700, &mut SpawnContext::new(Some(8)));
        assert_eq!(field.len(), config.count);
        for p in &field.petals {
            assert!((0.0..1000.0).contains(&p.anchor_x));
            assert!((12.0..30.0).contains(&p.fall_secs));
            assert!((0.0..5.0).contains(&p.delay));
            assert!((0.0..TAU).contains(&p.rotation));
            assert!((0.7..1.3).contains(&p.scale));
            assert!((15.0..40.0).contains(&p.sway));
            assert!(config.palette.contains(p.color));
        }
    }

    #[test]
    fn test_disabled_layer_is_empty() {
        let config = PetalConfig { enabled: false, ..PetalConfig::default() };
        let field = PetalField::new(&config, 800, 600, &mut SpawnContext::new(Some(1)));
        assert!(field.is_empty());
    }

    #[test]
    fn test_hidden_before_delay() {
        let mut field = field_with(petal());
        field.update(1.5);
        assert_eq!(field.pose(0), None);
        field.update(0.5);
        let pose = field.pose(0).unwrap();
        assert!((pose.center.y + field.margin()).abs() < 1e-3);
        assert!((pose.center.x - 400.0).abs() < 1e-3);
    }

    #[test]
    fn test_fall_path() {
        let mut field = field_with(petal());
        let margin = field.margin();

        // Halfway down: sin(2π) puts the petal back on its anchor.
        field.update(12.0);
        let pose = field.pose(0).unwrap();
        assert!((pose.center.y - (-margin + 0.5 * (600.0 + 2.0 * margin))).abs() < 1e-3);
        assert!((pose.center.x - 400.0).abs() < 1e-2);
        assert!((pose.rotation - PI).abs() < 1e-4);

        // An eighth of the way down is the first full sway to the right.
        let mut field = field_with(petal());
        field.update(2.0 + 2.5);
        assert!((field.pose(0).unwrap().center.x - 430.0).abs() < 1e-3);
    }

    #[test]
    fn test_fall_loops() {
        let mut field = field_with(petal());
        field.update(7.0);
        let first = field.pose(0).unwrap();
        field.update(20.0);
        let again = field.pose(0).unwrap();
        assert!((first.center - again.center).length() < 1e-2);
    }

    #[test]
    fn test_hover_highlights_petal() {
        let mut field = field_with(petal());
        field.update(12.0);
        let before = field.pose(0).unwrap();

        field.hover(Some(before.center));
        assert!(field.petals[0].hovered);
        let after = field.pose(0).unwrap();
        assert!((after.rotation - before.rotation - PI).abs() < 1e-4);
        assert!((after.radii - before.radii * HOVER_SCALE).length() < 1e-4);
        assert_eq!(after.color, Color::rgb(255, 223, 237));

        field.hover(Some(Vec2::new(5.0, 5.0)));
        assert!(!field.petals[0].hovered);
        field.hover(None);
        assert!(!field.petals[0].hovered);
    }

    #[test]
    fn test_hit_test_respects_shape() {
        let mut field = field_with(petal());
        field.update(12.0);
        let pose = field.pose(0).unwrap();
        assert_eq!(field.hit_test(pose.center), Some(0));
        assert_eq!(field.hit_test(pose.center + Vec2::new(100.0, 0.0)), None);
    }

    #[test]
    fn test_resize_keeps_relative_anchor() {
        let mut field = field_with(petal());
        field.resize(1600, 900);
        assert_eq!(field.petals[0].anchor_x, 800.0);
        field.resize(0, 900);
        assert_eq!(field.petals[0].anchor_x, 800.0);
    }

    #[test]
    fn test_render_draws_visible_petals_as_ellipses() {
        let mut field = field_with(petal());
        field.petals.push(Petal { delay: 100.0, ..petal() });
        field.update(5.0);

        let mut surface = RecordingSurface::new(800, 600);
        field.render(&mut surface);
        assert_eq!(surface.commands().len(), 1);
        assert!(matches!(
            surface.commands()[0],
            DrawCommand::Ellipse { alpha, .. } if alpha == 1.0
        ));
    }
}
