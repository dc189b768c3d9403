#![forbid(unsafe_code)]

//! Swatch extraction for RGBA images.
//!
//! [`generate`] reduces an image to at most `max_colors` representative
//! swatches with median cut over a 15-bit color histogram, then picks the
//! best swatch for each named [`Target`] (vibrant, muted, and their light
//! and dark variants).

extern crate alloc;

pub mod error;
pub mod histogram;
pub mod median_cut;
pub mod palette;
pub mod quantized;
pub mod scale;
pub mod swatch;
pub mod target;

pub use error::{BoxError, PaletteError};
pub use histogram::{DEFAULT_ALPHA_THRESHOLD, Histogram};
pub use palette::Palette;
pub use quantized::{Channel, QuantizedColor};
#[cfg(feature = "image")]
pub use scale::ImageScaler;
pub use scale::Scaler;
pub use swatch::Swatch;
pub use target::{Bounds, Target, Weights};

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use imgref::{ImgRef, ImgVec};
use rgb::RGBA8;

/// Default upper bound on the number of swatches.
pub const DEFAULT_MAX_COLORS: u32 = 16;

/// Pixel area used by `PaletteConfig::downscaled`.
pub const DEFAULT_RESIZE_AREA: u64 = 112 * 112;

/// A rectangle of the source image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    pub left: usize,
    pub top: usize,
    pub width: usize,
    pub height: usize,
}

impl Region {
    pub fn new(left: usize, top: usize, width: usize, height: usize) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Region spanning `[left, right) x [top, bottom)`.
    pub fn from_bounds(left: usize, top: usize, right: usize, bottom: usize) -> Self {
        Self::new(
            left,
            top,
            right.saturating_sub(left),
            bottom.saturating_sub(top),
        )
    }

    fn full(width: usize, height: usize) -> Self {
        Self::new(0, 0, width, height)
    }

    fn fits(&self, width: usize, height: usize) -> bool {
        let right = self.left.checked_add(self.width);
        let bottom = self.top.checked_add(self.height);
        self.width > 0
            && self.height > 0
            && right.is_some_and(|r| r <= width)
            && bottom.is_some_and(|b| b <= height)
    }

    /// Map this region from a `from` sized image onto a `to` sized one.
    /// Edges move outward so the result never collapses to zero area.
    fn rescaled(&self, from: (usize, usize), to: (usize, usize)) -> Self {
        let floor = |v: usize, a: usize, b: usize| v * b / a;
        let ceil = |v: usize, a: usize, b: usize| (v * b).div_ceil(a);

        let left = floor(self.left, from.0, to.0).min(to.0 - 1);
        let top = floor(self.top, from.1, to.1).min(to.1 - 1);
        let right = ceil(self.left + self.width, from.0, to.0).clamp(left + 1, to.0);
        let bottom = ceil(self.top + self.height, from.1, to.1).clamp(top + 1, to.1);
        Self::from_bounds(left, top, right, bottom)
    }
}

/// Configuration for swatch extraction.
#[derive(Clone)]
pub struct PaletteConfig {
    /// Maximum number of swatches (at least 1).
    pub max_colors: u32,
    /// Part of the image to sample. `None` samples the whole image.
    pub region: Option<Region>,
    /// Images with more pixels than this are downscaled first. 0 disables.
    pub resize_area: u64,
    /// Resampler used when `resize_area` applies.
    pub scaler: Option<Arc<dyn Scaler>>,
    /// Pixels with alpha below this are ignored.
    pub alpha_threshold: u8,
    /// Targets to select swatches for, in priority order.
    pub targets: Vec<Target>,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            max_colors: DEFAULT_MAX_COLORS,
            region: None,
            resize_area: 0,
            scaler: None,
            alpha_threshold: DEFAULT_ALPHA_THRESHOLD,
            targets: Target::defaults(),
        }
    }
}

impl fmt::Debug for PaletteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaletteConfig")
            .field("max_colors", &self.max_colors)
            .field("region", &self.region)
            .field("resize_area", &self.resize_area)
            .field("scaler", &self.scaler.as_ref().map(|_| ".."))
            .field("alpha_threshold", &self.alpha_threshold)
            .field("targets", &self.targets)
            .finish()
    }
}

impl PaletteConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_colors(mut self, n: u32) -> Self {
        self.max_colors = n;
        self
    }

    pub fn region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    pub fn resize_area(mut self, area: u64) -> Self {
        self.resize_area = area;
        self
    }

    pub fn scaler(mut self, scaler: impl Scaler + 'static) -> Self {
        self.scaler = Some(Arc::new(scaler));
        self
    }

    pub fn alpha_threshold(mut self, threshold: u8) -> Self {
        self.alpha_threshold = threshold;
        self
    }

    pub fn targets(mut self, targets: Vec<Target>) -> Self {
        self.targets = targets;
        self
    }

    pub fn add_target(mut self, target: Target) -> Self {
        self.targets.push(target);
        self
    }

    pub fn clear_targets(mut self) -> Self {
        self.targets.clear();
        self
    }

    /// Shrink large images to [`DEFAULT_RESIZE_AREA`] with the default
    /// [`ImageScaler`] before counting.
    ///
    /// Resizing stays off in [`PaletteConfig::default`] so that enabling the
    /// `image` feature never changes the result of an existing config.
    #[cfg(feature = "image")]
    pub fn downscaled(self) -> Self {
        self.resize_area(DEFAULT_RESIZE_AREA)
            .scaler(ImageScaler::default())
    }
}

/// Extract swatches from `img` and select one for each configured target.
///
/// The image is validated first, then optionally downscaled, cropped to
/// the region, and counted. A region without visible pixels is not an
/// error: it yields an empty palette.
pub fn generate(img: ImgRef<'_, RGBA8>, config: &PaletteConfig) -> Result<Palette, PaletteError> {
    let (width, height) = (img.width(), img.height());
    let region = validate_inputs(width, height, config)?;

    let _span = tracing::debug_span!("generate", width, height, max_colors = config.max_colors)
        .entered();

    let scaled: ImgVec<RGBA8>;
    let (source, region) = match scale::resize_dimensions(width, height, config.resize_area) {
        Some((w, h)) => {
            let scaler = config.scaler.as_ref().ok_or(PaletteError::MissingScaler {
                resize_area: config.resize_area,
            })?;
            scaled = scaler.scale(img, w, h).map_err(PaletteError::Scale)?;
            let to = (scaled.width(), scaled.height());
            if to.0 == 0 || to.1 == 0 {
                return Err(PaletteError::ZeroDimension);
            }
            tracing::debug!(
                resize_area = config.resize_area,
                scaled_width = to.0,
                scaled_height = to.1,
                "downscaled"
            );
            (scaled.as_ref(), region.rescaled((width, height), to))
        }
        None => (img, region),
    };

    let cropped = source.sub_image(region.left, region.top, region.width, region.height);
    let hist = Histogram::from_pixels(cropped, config.alpha_threshold);
    tracing::debug!(
        colors = hist.len(),
        population = hist.total_population(),
        "histogram built"
    );

    let partition = median_cut::median_cut(hist.into_entries(), config.max_colors as usize);
    let swatches = partition.swatches();
    tracing::debug!(swatches = swatches.len(), "median cut done");

    let picks = target::select_swatches(&swatches, &config.targets);
    let selections = config.targets.iter().cloned().zip(picks).collect();

    Ok(Palette::new(swatches, selections))
}

/// Convenience wrapper over [`generate`] for `image` buffers.
#[cfg(feature = "image")]
pub fn generate_from_image(
    img: &image::RgbaImage,
    config: &PaletteConfig,
) -> Result<Palette, PaletteError> {
    let pixels: Vec<RGBA8> = img
        .pixels()
        .map(|image::Rgba([r, g, b, a])| RGBA8::new(*r, *g, *b, *a))
        .collect();
    let buf = ImgVec::new(pixels, img.width() as usize, img.height() as usize);
    generate(buf.as_ref(), config)
}

/// Check the configuration against the source size and resolve the region.
fn validate_inputs(
    width: usize,
    height: usize,
    config: &PaletteConfig,
) -> Result<Region, PaletteError> {
    if width == 0 || height == 0 {
        return Err(PaletteError::ZeroDimension);
    }
    if config.max_colors == 0 {
        return Err(PaletteError::InvalidMaxColors(config.max_colors));
    }
    if config.resize_area > 0 && config.scaler.is_none() {
        return Err(PaletteError::MissingScaler {
            resize_area: config.resize_area,
        });
    }
    let region = config.region.unwrap_or(Region::full(width, height));
    if !region.fits(width, height) {
        return Err(PaletteError::InvalidRegion {
            left: region.left,
            top: region.top,
            width: region.width,
            height: region.height,
            image_width: width,
            image_height: height,
        });
    }
    Ok(region)
}
