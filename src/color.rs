//! Colors and palettes.
//!
//! Colors are 8-bit sRGB triples, the same space the raster canvas blends
//! in. They serialize as `"#RRGGBB"` strings so configuration files stay
//! readable.
//!
//! ```ignore
//! let gold = Color::from_hex("#FFD700")?;
//! let palette = Palette::festive();
//! let color = palette.pick(&mut rng);
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An opaque 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Near-white used for glint highlights.
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    /// Gold used for shell highlights.
    pub const GOLD: Color = Color::rgb(0xFF, 0xD7, 0x00);
    /// Night-sky backdrop used for the fade fill.
    pub const NIGHT: Color = Color::rgb(10, 14, 39);
    /// Orange used by the click feedback pulse.
    pub const EMBER: Color = Color::rgb(0xFF, 0x5E, 0x00);

    /// Build a color from 8-bit channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, ParseColorError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseColorError(hex.to_string()));
        }
        let value = u32::from_str_radix(digits, 16).map_err(|_| ParseColorError(hex.to_string()))?;
        Ok(Self::rgb((value >> 16) as u8, (value >> 8) as u8, value as u8))
    }

    /// Brighten every channel by `amount`, saturating at 255.
    pub fn adjust(self, amount: u8) -> Self {
        Self::rgb(
            self.r.saturating_add(amount),
            self.g.saturating_add(amount),
            self.b.saturating_add(amount),
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// A string that is not a `#RRGGBB` color.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a #RRGGBB color")]
pub struct ParseColorError(pub String);

/// A finite set of colors that bursts draw from uniformly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Color>", into = "Vec<Color>")]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Build a palette. An empty list falls back to the festive palette.
    pub fn new(colors: Vec<Color>) -> Self {
        if colors.is_empty() {
            return Self::festive();
        }
        Self { colors }
    }

    /// Lunar New Year colors: golds, reds, pinks, with a few cool accents.
    pub fn festive() -> Self {
        Self {
            colors: vec![
                Color::rgb(0xFF, 0xD7, 0x00), // gold
                Color::rgb(0xDA, 0xA5, 0x20), // goldenrod
                Color::rgb(0xDC, 0x14, 0x3C), // crimson
                Color::rgb(0x8B, 0x00, 0x00), // dark red
                Color::rgb(0xFF, 0x63, 0x47), // tomato
                Color::rgb(0xFF, 0xA5, 0x00), // orange
                Color::rgb(0xFF, 0x14, 0x93), // deep pink
                Color::rgb(0x00, 0xCE, 0xD1), // dark turquoise
                Color::rgb(0x93, 0x70, 0xDB), // medium purple
                Color::rgb(0x32, 0xCD, 0x32), // lime green
                Color::rgb(0xFF, 0x69, 0xB4), // hot pink
                Color::rgb(0x1E, 0x90, 0xFF), // dodger blue
                Color::rgb(0xFF, 0xB6, 0xC1), // light pink
                Color::rgb(0xF0, 0xE6, 0x8C), // khaki
                Color::rgb(0xDD, 0xA0, 0xDD), // plum
            ],
        }
    }

    /// Soft blossom tones for petals.
    pub fn blossom() -> Self {
        Self {
            colors: vec![
                Color::rgb(0xFF, 0xB6, 0xC1),
                Color::rgb(0xFF, 0x69, 0xB4),
                Color::rgb(0xFF, 0xC0, 0xCB),
                Color::rgb(0xDD, 0xA0, 0xDD),
                Color::rgb(0xFF, 0xD7, 0x00),
            ],
        }
    }

    /// Pick one color uniformly at random.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Color {
        self.colors[rng.gen_range(0..self.colors.len())]
    }

    /// Whether `color` is one of the palette entries.
    pub fn contains(&self, color: Color) -> bool {
        self.colors.contains(&color)
    }
}

impl From<Vec<Color>> for Palette {
    fn from(colors: Vec<Color>) -> Self {
        Palette::new(colors)
    }
}

impl From<Palette> for Vec<Color> {
    fn from(palette: Palette) -> Self {
        palette.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::festive()
    }
}
