//! Drawing surfaces.
//!
//! The simulator only needs a handful of 2D primitives, so anything that can
//! clear itself, lay a translucent fill over everything, and fill circles
//! can host it. [`crate::raster::Pixmap`] is the real canvas;
//! [`RecordingSurface`] keeps a list of commands for tests.

use crate::color::Color;
use glam::Vec2;

/// A 2D raster target sized in pixels.
///
/// Alpha values are in `0.0..=1.0` and blend source-over.
pub trait Surface {
    /// Current size as `(width, height)`.
    fn size(&self) -> (u32, u32);

    /// Follow a viewport resize. Contents may be discarded.
    fn resize(&mut self, width: u32, height: u32);

    /// Wipe to fully transparent.
    fn clear(&mut self);

    /// Blend `color` at `alpha` over the whole surface.
    fn fade(&mut self, color: Color, alpha: f32);

    /// Fill a circle.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32);

    /// Fill an ellipse with semi-axes `radii`, rotated by `rotation` radians.
    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, rotation: f32, color: Color, alpha: f32) {
        let _ = rotation;
        self.fill_circle(center, radii.max_element(), color, alpha);
    }

    fn width(&self) -> u32 {
        self.size().0
    }

    fn height(&self) -> u32 {
        self.size().1
    }
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Fade {
        color: Color,
        alpha: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        alpha: f32,
    },
    Ellipse {
        center: Vec2,
        radii: Vec2,
        rotation: f32,
        color: Color,
        alpha: f32,
    },
}

/// A surface that remembers what was drawn instead of rasterizing it.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// An empty recording of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Commands recorded since the last [`take`](Self::take).
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Hand back everything recorded so far and start over.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Recorded circles as `(center, radius, alpha)`.
    pub fn circles(&self) -> impl Iterator<Item = (Vec2, f32, f32)> + '_ {
        self.commands.iter().filter_map(|c| match *c {
            DrawCommand::Circle { center, radius, alpha, .. } => Some((center, radius, alpha)),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fade(&mut self, color: Color, alpha: f32) {
        self.commands.push(DrawCommand::Fade { color, alpha });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            alpha,
        });
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, rotation: f32, color: Color, alpha: f32) {
        self.commands.push(DrawCommand::Ellipse {
            center,
            radii,
            rotation,
            color,
            alpha,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CircleOnly(Vec<f32>);

    impl Surface for CircleOnly {
        fn size(&self) -> (u32, u32) {
            (10, 10)
        }
        fn resize(&mut self, _: u32, _: u32) {}
        fn clear(&mut self) {}
        fn fade(&mut self, _: Color, _: f32) {}
        fn fill_circle(&mut self, _: Vec2, radius: f32, _: Color, _: f32) {
            self.0.push(radius);
        }
    }

    #[test]
    fn test_default_ellipse_falls_back_to_circle() {
        let mut surface = CircleOnly(Vec::new());
        surface.fill_ellipse(Vec2::ZERO, Vec2::new(3.0, 7.0), 1.0, Color::WHITE, 1.0);
        assert_eq!(surface.0, vec![7.0]);
        assert_eq!(surface.width(), 10);
    }

    #[test]
    fn test_recording() {
        let mut surface = RecordingSurface::new(800, 600);
        surface.clear();
        surface.fill_circle(Vec2::new(1.0, 2.0), 3.0, Color::GOLD, 0.5);
        assert_eq!(surface.commands().len(), 2);
        assert_eq!(surface.circles().collect::<Vec<_>>(), vec![(Vec2::new(1.0, 2.0), 3.0, 0.5)]);

        let taken = surface.take();
        assert_eq!(taken[0], DrawCommand::Clear);
        assert!(surface.commands().is_empty());
    }
}
