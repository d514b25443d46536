//! CPU raster canvas.
//!
//! `Pixmap` wraps a [`tiny_skia::Pixmap`]: premultiplied RGBA8, source-over
//! blending and anti-aliased path fills. The bytes upload straight into the
//! presenter's frame texture.

use crate::color::Color;
use crate::error::Result;
use crate::surface::Surface;
use glam::Vec2;
use std::path::Path;
use tiny_skia::{FillRule, Paint, PathBuilder, PremultipliedColorU8, Rect, Transform};

/// An owned RGBA8 canvas.
///
/// A zero-sized canvas has no backing storage, so drawing on it is a no-op
/// and [`Simulation::init`](crate::Simulation::init) can report it.
#[derive(Debug, Clone, PartialEq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    canvas: Option<tiny_skia::Pixmap>,
}

impl Pixmap {
    /// A transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            canvas: tiny_skia::Pixmap::new(width, height),
        }
    }

    /// Premultiplied pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<PremultipliedColorU8> {
        self.canvas.as_ref()?.pixel(x, y)
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[PremultipliedColorU8] {
        match &self.canvas {
            Some(canvas) => canvas.pixels(),
            None => &[],
        }
    }

    /// Raw premultiplied bytes, row-major RGBA.
    pub fn as_bytes(&self) -> &[u8] {
        match &self.canvas {
            Some(canvas) => canvas.data(),
            None => &[],
        }
    }

    /// Paint every pixel with an opaque color.
    pub fn fill(&mut self, color: Color) {
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.fill(skia_color(color, 1.0));
        }
    }

    /// Become a copy of `other`, resizing if needed.
    pub fn copy_from(&mut self, other: &Pixmap) {
        self.width = other.width;
        self.height = other.height;
        self.canvas.clone_from(&other.canvas);
    }

    /// Write the canvas as a PNG with straight alpha.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut image = image::RgbaImage::new(self.width, self.height);
        for (out, pixel) in image.pixels_mut().zip(self.pixels()) {
            let c = pixel.demultiply();
            *out = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        image.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }

    fn fill_path(
        &mut self,
        path: Option<tiny_skia::Path>,
        transform: Transform,
        color: Color,
        alpha: f32,
    ) {
        let (Some(canvas), Some(path)) = (self.canvas.as_mut(), path) else {
            return;
        };
        canvas.fill_path(&path, &paint(color, alpha), FillRule::Winding, transform, None);
    }
}

fn skia_color(color: Color, alpha: f32) -> tiny_skia::Color {
    let mut c = tiny_skia::Color::from_rgba8(color.r, color.g, color.b, 255);
    c.set_alpha(alpha);
    c
}

fn paint(color: Color, alpha: f32) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(skia_color(color, alpha));
    paint.anti_alias = true;
    paint
}

/// Shapes with no visible extent, or placed at non-finite coordinates.
fn degenerate(center: Vec2, extent: f32, alpha: f32) -> bool {
    alpha <= 0.0 || !center.is_finite() || !extent.is_finite() || extent <= 0.0
}

impl Surface for Pixmap {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        if (width, height) != (self.width, self.height) {
            *self = Pixmap::new(width, height);
        }
    }

    fn clear(&mut self) {
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.fill(tiny_skia::Color::TRANSPARENT);
        }
    }

    fn fade(&mut self, color: Color, alpha: f32) {
        if alpha <= 0.0 {
            return;
        }
        let Some(canvas) = self.canvas.as_mut() else {
            return;
        };
        if let Some(rect) = Rect::from_xywh(0.0, 0.0, self.width as f32, self.height as f32) {
            canvas.fill_rect(rect, &paint(color, alpha), Transform::identity(), None);
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32) {
        if degenerate(center, radius, alpha) {
            return;
        }
        let path = PathBuilder::from_circle(center.x, center.y, radius);
        self.fill_path(path, Transform::identity(), color, alpha);
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, rotation: f32, color: Color, alpha: f32) {
        if degenerate(center, radii.min_element(), alpha) || !rotation.is_finite() {
            return;
        }
        let oval = Rect::from_xywh(-radii.x, -radii.y, radii.x * 2.0, radii.y * 2.0)
            .and_then(PathBuilder::from_oval);
        let transform =
            Transform::from_rotate(rotation.to_degrees()).post_translate(center.x, center.y);
        self.fill_path(oval, transform, color, alpha);
    }
}
