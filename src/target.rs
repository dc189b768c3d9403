//! Named scoring profiles and the selection of one swatch per profile.
//!
//! A [`Target`] describes an acceptable window of HSL saturation and
//! lightness, the ideal point inside that window, and how much the
//! distance to that point matters relative to swatch population.

use alloc::borrow::Cow;
use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::cmp::{Ordering, Reverse};

use crate::error::PaletteError;
use crate::swatch::Swatch;

const BOUND_TOLERANCE: f64 = 1e-9;

/// A `(min, target, max)` window over a value in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub target: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, target: f64, max: f64) -> Self {
        Self { min, target, max }
    }

    /// Inclusive on both ends. 8-bit HSL components are ratios with
    /// denominators of at most 510, so anything closer to a bound than
    /// `BOUND_TOLERANCE` is that bound reached through float rounding.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min - BOUND_TOLERANCE && value <= self.max + BOUND_TOLERANCE
    }

    fn is_valid(&self) -> bool {
        0.0 <= self.min && self.min <= self.target && self.target <= self.max && self.max <= 1.0
    }
}

/// Relative importance of each scoring term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub saturation: f64,
    pub lightness: f64,
    pub population: f64,
}

impl Weights {
    pub const fn new(saturation: f64, lightness: f64, population: f64) -> Self {
        Self {
            saturation,
            lightness,
            population,
        }
    }

    fn sum(&self) -> f64 {
        self.saturation + self.lightness + self.population
    }

    fn normalized(self) -> Self {
        let sum = self.sum();
        Self {
            saturation: self.saturation / sum,
            lightness: self.lightness / sum,
            population: self.population / sum,
        }
    }
}

impl Default for Weights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

const DEFAULT_WEIGHTS: Weights = Weights::new(0.24, 0.52, 0.24);

const SATURATION_VIBRANT: Bounds = Bounds::new(0.35, 1.0, 1.0);
const SATURATION_MUTED: Bounds = Bounds::new(0.0, 0.3, 0.4);
const LIGHTNESS_LIGHT: Bounds = Bounds::new(0.55, 0.74, 1.0);
const LIGHTNESS_NORMAL: Bounds = Bounds::new(0.3, 0.5, 0.7);
const LIGHTNESS_DARK: Bounds = Bounds::new(0.0, 0.26, 0.45);

/// A named saturation/lightness profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    name: Cow<'static, str>,
    saturation: Bounds,
    lightness: Bounds,
    weights: Weights,
}

impl Target {
    pub const VIBRANT: Target = Target::builtin("Vibrant", SATURATION_VIBRANT, LIGHTNESS_NORMAL);
    pub const LIGHT_VIBRANT: Target =
        Target::builtin("LightVibrant", SATURATION_VIBRANT, LIGHTNESS_LIGHT);
    pub const DARK_VIBRANT: Target =
        Target::builtin("DarkVibrant", SATURATION_VIBRANT, LIGHTNESS_DARK);
    pub const MUTED: Target = Target::builtin("Muted", SATURATION_MUTED, LIGHTNESS_NORMAL);
    pub const LIGHT_MUTED: Target = Target::builtin("LightMuted", SATURATION_MUTED, LIGHTNESS_LIGHT);
    pub const DARK_MUTED: Target = Target::builtin("DarkMuted", SATURATION_MUTED, LIGHTNESS_DARK);

    const fn builtin(name: &'static str, saturation: Bounds, lightness: Bounds) -> Self {
        Self {
            name: Cow::Borrowed(name),
            saturation,
            lightness,
            weights: DEFAULT_WEIGHTS,
        }
    }

    /// The six built-in targets in selection priority order.
    pub fn defaults() -> Vec<Target> {
        alloc::vec![
            Self::VIBRANT,
            Self::LIGHT_VIBRANT,
            Self::DARK_VIBRANT,
            Self::MUTED,
            Self::LIGHT_MUTED,
            Self::DARK_MUTED,
        ]
    }

    /// Build a custom target. Weights are rescaled to sum to 1.
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        saturation: Bounds,
        lightness: Bounds,
        weights: Weights,
    ) -> Result<Self, PaletteError> {
        let name = name.into();
        let invalid = |reason: &str| PaletteError::InvalidTarget {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        if !saturation.is_valid() {
            return Err(invalid("saturation bounds must satisfy 0 <= min <= target <= max <= 1"));
        }
        if !lightness.is_valid() {
            return Err(invalid("lightness bounds must satisfy 0 <= min <= target <= max <= 1"));
        }
        let w = [weights.saturation, weights.lightness, weights.population];
        if w.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(invalid("weights must be finite and non-negative"));
        }
        if weights.sum() <= 0.0 {
            return Err(invalid("at least one weight must be positive"));
        }

        Ok(Self {
            name,
            saturation,
            lightness,
            weights: weights.normalized(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn saturation(&self) -> Bounds {
        self.saturation
    }

    pub fn lightness(&self) -> Bounds {
        self.lightness
    }

    pub fn weights(&self) -> Weights {
        self.weights
    }

    fn accepts(&self, saturation: f64, lightness: f64) -> bool {
        self.saturation.contains(saturation) && self.lightness.contains(lightness)
    }

    fn score(&self, saturation: f64, lightness: f64, population: u64, max_population: u64) -> f64 {
        let w = &self.weights;
        let mut score = 0.0;
        if w.saturation > 0.0 {
            score += w.saturation * (1.0 - (saturation - self.saturation.target).abs());
        }
        if w.lightness > 0.0 {
            score += w.lightness * (1.0 - (lightness - self.lightness.target).abs());
        }
        if w.population > 0.0 && max_population > 0 {
            score += w.population * (population as f64 / max_population as f64);
        }
        score
    }
}

/// A swatch with its HSL components computed once.
struct Scored {
    swatch: Swatch,
    saturation: f64,
    lightness: f64,
}

/// Pick a swatch for every target, in order.
///
/// A swatch whose color was taken by an earlier target is not offered to
/// later ones. Returns one entry per target; `None` when no unused swatch
/// falls inside the target's bounds.
pub fn select_swatches(swatches: &[Swatch], targets: &[Target]) -> Vec<Option<Swatch>> {
    let scored: Vec<Scored> = swatches
        .iter()
        .map(|s| {
            let (_, saturation, lightness) = s.hsl();
            Scored {
                swatch: *s,
                saturation,
                lightness,
            }
        })
        .collect();

    let mut used: BTreeSet<u32> = BTreeSet::new();
    let mut selected = Vec::with_capacity(targets.len());

    for target in targets {
        let candidates: Vec<&Scored> = scored
            .iter()
            .filter(|c| !used.contains(&c.swatch.packed_rgba()))
            .filter(|c| target.accepts(c.saturation, c.lightness))
            .collect();

        let max_population = candidates
            .iter()
            .map(|c| c.swatch.population())
            .max()
            .unwrap_or(0);

        let best = candidates
            .iter()
            .map(|c| {
                let score = target.score(
                    c.saturation,
                    c.lightness,
                    c.swatch.population(),
                    max_population,
                );
                (score, c.swatch)
            })
            .max_by(|(sa, a), (sb, b)| compare_candidates(*sa, a, *sb, b))
            .map(|(_, swatch)| swatch);

        if let Some(swatch) = best {
            used.insert(swatch.packed_rgba());
            tracing::trace!(
                target_name = target.name(),
                color = swatch.packed_rgba(),
                population = swatch.population(),
                "target assigned"
            );
        } else {
            tracing::trace!(target_name = target.name(), "target unassigned");
        }
        selected.push(best);
    }

    selected
}

/// Higher score wins, then larger population, then lower packed color.
fn compare_candidates(score_a: f64, a: &Swatch, score_b: f64, b: &Swatch) -> Ordering {
    score_a
        .total_cmp(&score_b)
        .then(a.population().cmp(&b.population()))
        .then(Reverse(a.packed_rgba()).cmp(&Reverse(b.packed_rgba())))
}
