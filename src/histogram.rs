use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use imgref::ImgRef;
use rgb::RGBA8;

use crate::quantized::QuantizedColor;

/// Pixels with alpha below this are treated as invisible.
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 128;

/// A histogram bucket: one quantized color, its pixel count, and the sums
/// of the original 8-bit channels of every pixel that landed in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistogramEntry {
    pub color: QuantizedColor,
    pub population: u64,
    pub red_sum: u64,
    pub green_sum: u64,
    pub blue_sum: u64,
}

impl HistogramEntry {
    fn new(color: QuantizedColor) -> Self {
        Self {
            color,
            population: 0,
            red_sum: 0,
            green_sum: 0,
            blue_sum: 0,
        }
    }

    fn add_pixel(&mut self, px: RGBA8) {
        self.population += 1;
        self.red_sum += px.r as u64;
        self.green_sum += px.g as u64;
        self.blue_sum += px.b as u64;
    }

    fn absorb(&mut self, other: &HistogramEntry) {
        self.population += other.population;
        self.red_sum += other.red_sum;
        self.green_sum += other.green_sum;
        self.blue_sum += other.blue_sum;
    }
}

/// Population of every quantized color in a pixel source, sorted by
/// packed value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Histogram {
    buckets: BTreeMap<QuantizedColor, HistogramEntry>,
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every pixel of `img` whose alpha is at least `alpha_threshold`.
    ///
    /// With the `rayon` feature, rows are counted in parallel and the
    /// partial histograms merged; the result is the same either way.
    pub fn from_pixels(img: ImgRef<'_, RGBA8>, alpha_threshold: u8) -> Self {
        count_rows(img, alpha_threshold)
    }

    /// Accumulate a run of pixels. Pixels below `alpha_threshold` are skipped.
    pub fn add_pixels(&mut self, pixels: &[RGBA8], alpha_threshold: u8) {
        for &px in pixels {
            if px.a < alpha_threshold {
                continue;
            }
            let color = QuantizedColor::from(px);
            self.buckets
                .entry(color)
                .or_insert_with(|| HistogramEntry::new(color))
                .add_pixel(px);
        }
    }

    /// Fold another histogram into this one.
    pub fn merge(&mut self, other: Histogram) {
        for (color, entry) in other.buckets {
            self.buckets
                .entry(color)
                .and_modify(|e| e.absorb(&entry))
                .or_insert(entry);
        }
    }

    /// Number of distinct quantized colors.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of counted pixels.
    pub fn total_population(&self) -> u64 {
        self.buckets.values().map(|e| e.population).sum()
    }

    pub fn get(&self, color: QuantizedColor) -> Option<&HistogramEntry> {
        self.buckets.get(&color)
    }

    /// Entries in ascending packed-color order.
    pub fn entries(&self) -> impl Iterator<Item = &HistogramEntry> {
        self.buckets.values()
    }

    pub fn into_entries(self) -> Vec<HistogramEntry> {
        self.buckets.into_values().collect()
    }
}

#[cfg(not(feature = "rayon"))]
fn count_rows(img: ImgRef<'_, RGBA8>, alpha_threshold: u8) -> Histogram {
    let mut hist = Histogram::new();
    for row in img.rows() {
        hist.add_pixels(row, alpha_threshold);
    }
    hist
}

#[cfg(feature = "rayon")]
fn count_rows(img: ImgRef<'_, RGBA8>, alpha_threshold: u8) -> Histogram {
    use rayon::prelude::*;

    let rows: Vec<&[RGBA8]> = img.rows().collect();
    rows.par_iter()
        .fold(Histogram::new, |mut hist, row| {
            hist.add_pixels(row, alpha_threshold);
            hist
        })
        .reduce(Histogram::new, |mut a, b| {
            a.merge(b);
            a
        })
}
