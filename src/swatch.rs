use ::palette::{encoding, Hsl, IntoColor, Srgb};
use rgb::{RGB8, RGBA8};

/// A representative color and the number of pixels it stands for.
///
/// Swatches are always opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Swatch {
    red: u8,
    green: u8,
    blue: u8,
    population: u64,
}

impl Swatch {
    pub fn new((red, green, blue): (u8, u8, u8), population: u64) -> Self {
        Self {
            red,
            green,
            blue,
            population,
        }
    }

    pub fn rgb(&self) -> RGB8 {
        RGB8::new(self.red, self.green, self.blue)
    }

    pub fn rgba(&self) -> RGBA8 {
        RGBA8::new(self.red, self.green, self.blue, 0xFF)
    }

    /// Color packed as `0xAARRGGBB`.
    pub fn packed_rgba(&self) -> u32 {
        0xFF00_0000 | (self.red as u32) << 16 | (self.green as u32) << 8 | self.blue as u32
    }

    pub fn population(&self) -> u64 {
        self.population
    }

    /// Hue in degrees, saturation and lightness in `[0, 1]`.
    pub fn hsl(&self) -> (f64, f64, f64) {
        let rgb: Srgb<f64> = Srgb::new(self.red, self.green, self.blue).into_format();
        let hsl: Hsl<encoding::Srgb, f64> = rgb.into_color();
        let (hue, saturation, lightness) = hsl.into_components();
        (hue.into_positive_degrees(), saturation, lightness)
    }

    pub fn saturation(&self) -> f64 {
        self.hsl().1
    }

    pub fn lightness(&self) -> f64 {
        self.hsl().2
    }
}
