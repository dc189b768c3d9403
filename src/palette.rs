use alloc::vec::Vec;

use crate::swatch::Swatch;
use crate::target::Target;

/// Extracted swatches and the swatch chosen for each target.
///
/// Built by [`generate`](crate::generate); immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    swatches: Vec<Swatch>,
    /// Evaluated targets in priority order, with their selection.
    selections: Vec<(Target, Option<Swatch>)>,
}

impl Palette {
    pub(crate) fn new(swatches: Vec<Swatch>, selections: Vec<(Target, Option<Swatch>)>) -> Self {
        Self {
            swatches,
            selections,
        }
    }

    /// All generated swatches.
    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    /// Number of swatches.
    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }

    /// Targets that were evaluated, in priority order.
    pub fn targets(&self) -> impl Iterator<Item = &Target> {
        self.selections.iter().map(|(t, _)| t)
    }

    /// The swatch selected for `target`, if it was evaluated and matched.
    pub fn swatch_for(&self, target: &Target) -> Option<&Swatch> {
        self.selections
            .iter()
            .find(|(t, _)| t == target)
            .and_then(|(_, s)| s.as_ref())
    }

    /// Like [`swatch_for`](Self::swatch_for), looking the target up by name.
    pub fn swatch_for_name(&self, name: &str) -> Option<&Swatch> {
        self.selections
            .iter()
            .find(|(t, _)| t.name() == name)
            .and_then(|(_, s)| s.as_ref())
    }

    /// The swatch with the largest population.
    pub fn dominant(&self) -> Option<&Swatch> {
        self.swatches.iter().max_by(|a, b| {
            a.population()
                .cmp(&b.population())
                .then(b.packed_rgba().cmp(&a.packed_rgba()))
        })
    }

    pub fn vibrant(&self) -> Option<&Swatch> {
        self.swatch_for(&Target::VIBRANT)
    }

    pub fn light_vibrant(&self) -> Option<&Swatch> {
        self.swatch_for(&Target::LIGHT_VIBRANT)
    }

    pub fn dark_vibrant(&self) -> Option<&Swatch> {
        self.swatch_for(&Target::DARK_VIBRANT)
    }

    pub fn muted(&self) -> Option<&Swatch> {
        self.swatch_for(&Target::MUTED)
    }

    pub fn light_muted(&self) -> Option<&Swatch> {
        self.swatch_for(&Target::LIGHT_MUTED)
    }

    pub fn dark_muted(&self) -> Option<&Swatch> {
        self.swatch_for(&Target::DARK_MUTED)
    }
}
