//! Configuration for the fireworks field.
//!
//! Every tunable lives here so the simulator, launcher and petal layer hold
//! no hidden constants. Configurations load from JSON; every section and
//! field is optional and falls back to the defaults below.
//!
//! ```json
//! {
//!   "seed": 42,
//!   "physics": { "gravity": 0.08, "drag": 0.98 },
//!   "burst": { "count": 80, "palette": ["#FFD700", "#DC143C"] },
//!   "render": { "backdrop": "Clear" },
//!   "launcher": { "interval_secs": 1.8 }
//! }
//! ```

use crate::color::{Color, Palette};
use crate::error::{Error, Result};
use crate::input::Rect;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Per-frame physics constants.
///
/// Applied as fixed increments per tick; there is no delta-time scaling.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Added to `vy` every frame (screen y grows downward).
    pub gravity: f32,
    /// Velocity multiplier applied every frame.
    pub drag: f32,
    /// Remaining life that maps to full opacity.
    pub life_scale: f32,
    /// Particles falling this far below the surface are discarded.
    pub expiry_margin: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.08,
            drag: 0.98,
            life_scale: 150.0,
            expiry_margin: 50.0,
        }
    }
}

/// Shape of a single burst.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BurstConfig {
    /// Shell particles per burst when the caller does not specify.
    pub count: usize,
    /// Default power is drawn from `power_min..power_max`.
    pub power_min: f32,
    pub power_max: f32,
    /// Maximum random angular offset added to each evenly spaced angle (radians).
    pub angle_jitter: f32,
    pub life_min: f32,
    pub life_max: f32,
    pub size_min: f32,
    pub size_max: f32,
    /// Probability that a shell particle sparkles.
    pub sparkle_chance: f32,
    /// Extra glint sparks added to every burst.
    pub glint_count: usize,
    pub glint_speed_min: f32,
    pub glint_speed_max: f32,
    pub glint_life_min: f32,
    pub glint_life_max: f32,
    pub glint_size_min: f32,
    pub glint_size_max: f32,
    pub palette: Palette,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            count: 60,
            power_min: 4.0,
            power_max: 8.0,
            angle_jitter: 0.5,
            life_min: 100.0,
            life_max: 150.0,
            size_min: 2.0,
            size_max: 4.0,
            sparkle_chance: 0.4,
            glint_count: 10,
            glint_speed_min: 4.0,
            glint_speed_max: 12.0,
            glint_life_min: 80.0,
            glint_life_max: 120.0,
            glint_size_min: 0.5,
            glint_size_max: 2.5,
            palette: Palette::festive(),
        }
    }
}

/// How the surface is prepared at the start of each frame.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum Backdrop {
    /// Wipe the surface completely.
    Clear,
    /// Paint a translucent fill so previous frames linger as trails.
    Fade { color: Color, alpha: f32 },
}

impl Default for Backdrop {
    fn default() -> Self {
        Backdrop::Fade {
            color: Color::NIGHT,
            alpha: 0.08,
        }
    }
}

/// Drawing options for particles.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    pub backdrop: Backdrop,
    /// Draw a soft halo behind each particle.
    pub glow: bool,
    /// Number of past positions drawn behind each particle.
    pub trail_length: usize,
    /// Per-frame chance that a sparkling particle draws its glint.
    pub glint_chance: f32,
    /// Glints are offset up to this many pixels from the particle.
    pub glint_offset: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            backdrop: Backdrop::default(),
            glow: true,
            trail_length: 5,
            glint_chance: 0.3,
            glint_offset: 4.0,
        }
    }
}

/// Timer that launches bursts on its own.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LauncherConfig {
    pub enabled: bool,
    pub interval_secs: f32,
    /// Keep launch points this far from the left, right and top edges.
    pub margin: f32,
    /// Launch points fall within this fraction of the height below the margin.
    pub height_fraction: f32,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 3.0,
            margin: 100.0,
            height_fraction: 0.4,
        }
    }
}

/// Falling petal layer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PetalConfig {
    pub enabled: bool,
    pub count: usize,
    /// Seconds a petal takes to cross the surface.
    pub fall_min: f32,
    pub fall_max: f32,
    pub delay_max: f32,
    pub scale_min: f32,
    pub scale_max: f32,
    pub sway_min: f32,
    pub sway_max: f32,
    /// Half-length of an unscaled petal in pixels.
    pub size: f32,
    /// Brightness added to a hovered petal.
    pub hover_boost: u8,
    pub palette: Palette,
}

impl Default for PetalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            count: 24,
            fall_min: 12.0,
            fall_max: 30.0,
            delay_max: 5.0,
            scale_min: 0.7,
            scale_max: 1.3,
            sway_min: 15.0,
            sway_max: 40.0,
            size: 9.0,
            hover_boost: 40,
            palette: Palette::blossom(),
        }
    }
}

/// Pointer and touch routing.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Regions where clicks and touches do not launch bursts.
    pub exclusion_zones: Vec<Rect>,
    /// Show an expanding pulse where a burst was triggered by hand.
    pub feedback_pulse: bool,
    /// Petals under the pointer swallow clicks.
    pub petals_block_clicks: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            exclusion_zones: Vec::new(),
            feedback_pulse: true,
            petals_block_clicks: true,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Fireworks Field".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Complete configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    /// Fixed RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
    pub physics: PhysicsConfig,
    pub burst: BurstConfig,
    pub render: RenderConfig,
    pub launcher: LauncherConfig,
    pub petals: PetalConfig,
    pub input: InputConfig,
    pub window: WindowConfig,
}

impl FieldConfig {
    /// Load and validate a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        let config: FieldConfig = serde_json::from_str(&json)?;
        config.validate()?;
        log::debug!("Loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Check that every value is in a usable range.
    ///
    /// In particular no particle may be born with more life than
    /// `physics.life_scale`, which keeps opacity within `0..=1`.
    pub fn validate(&self) -> Result<()> {
        let p = &self.physics;
        let b = &self.burst;

        check(p.gravity.is_finite(), "physics.gravity must be finite")?;
        check(p.drag > 0.0 && p.drag <= 1.0, "physics.drag must be in (0, 1]")?;
        check(positive(p.life_scale), "physics.life_scale must be positive and finite")?;
        check(
            non_negative(p.expiry_margin),
            "physics.expiry_margin must be finite and not negative",
        )?;

        check(b.count > 0, "burst.count must be positive")?;
        check_range("burst.power", b.power_min, b.power_max)?;
        check(b.power_min > 0.0, "burst.power_min must be positive")?;
        check(
            non_negative(b.angle_jitter),
            "burst.angle_jitter must be finite and not negative",
        )?;
        check_range("burst.life", b.life_min, b.life_max)?;
        check_range("burst.glint_life", b.glint_life_min, b.glint_life_max)?;
        check(b.life_min > 0.0 && b.glint_life_min > 0.0, "particle life must be positive")?;
        check(
            b.life_max <= p.life_scale && b.glint_life_max <= p.life_scale,
            "burst life must not exceed physics.life_scale",
        )?;
        check_range("burst.size", b.size_min, b.size_max)?;
        check_range("burst.glint_size", b.glint_size_min, b.glint_size_max)?;
        check_range("burst.glint_speed", b.glint_speed_min, b.glint_speed_max)?;
        check(unit(b.sparkle_chance), "burst.sparkle_chance must be in [0, 1]")?;

        let r = &self.render;
        if let Backdrop::Fade { alpha, .. } = r.backdrop {
            check(alpha > 0.0 && alpha <= 1.0, "render.backdrop fade alpha must be in (0, 1]")?;
        }
        check(r.trail_length <= 64, "render.trail_length must be at most 64")?;
        check(unit(r.glint_chance), "render.glint_chance must be in [0, 1]")?;
        check(
            non_negative(r.glint_offset),
            "render.glint_offset must be finite and not negative",
        )?;

        let l = &self.launcher;
        check(positive(l.interval_secs), "launcher.interval_secs must be positive and finite")?;
        check(non_negative(l.margin), "launcher.margin must be finite and not negative")?;
        check(unit(l.height_fraction), "launcher.height_fraction must be in [0, 1]")?;

        let pe = &self.petals;
        check_range("petals.fall", pe.fall_min, pe.fall_max)?;
        check(pe.fall_min > 0.0, "petals.fall_min must be positive")?;
        check(non_negative(pe.delay_max), "petals.delay_max must be finite and not negative")?;
        check_range("petals.scale", pe.scale_min, pe.scale_max)?;
        check(pe.scale_min > 0.0, "petals.scale_min must be positive")?;
        check_range("petals.sway", pe.sway_min, pe.sway_max)?;
        check(positive(pe.size), "petals.size must be positive and finite")?;

        check(
            self.window.width > 0 && self.window.height > 0,
            "window dimensions must be non-zero",
        )?;
        Ok(())
    }
}

fn unit(value: f32) -> bool {
    (0.0..=1.0).contains(&value)
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn non_negative(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

fn check(condition: bool, message: &str) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(Error::InvalidConfig(message.to_string()))
    }
}

fn check_range(name: &str, min: f32, max: f32) -> Result<()> {
    if min.is_finite() && max.is_finite() && min <= max {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "{name}_min ({min}) must not exceed {name}_max ({max})"
        )))
    }
}
