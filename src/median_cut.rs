use alloc::collections::BinaryHeap;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::ops::Range;

use crate::histogram::HistogramEntry;
use crate::quantized::Channel;
use crate::swatch::Swatch;

/// A run of histogram entries for median cut subdivision, with the
/// per-channel bounds fitted to the colors it holds.
#[derive(Debug, Clone)]
struct ColorBox {
    range: Range<usize>,
    population: u64,
    min: [u8; 3],
    max: [u8; 3],
    volume: u32,
    /// Creation order, the last split-priority tie-break.
    seq: u64,
}

impl ColorBox {
    fn fit(entries: &[HistogramEntry], range: Range<usize>, seq: u64) -> Self {
        let mut min = [u8::MAX; 3];
        let mut max = [0u8; 3];
        let mut population = 0u64;

        for entry in &entries[range.clone()] {
            population += entry.population;
            for (i, channel) in Channel::ALL.into_iter().enumerate() {
                let v = entry.color.channel(channel);
                min[i] = min[i].min(v);
                max[i] = max[i].max(v);
            }
        }

        let volume = (0..3)
            .map(|i| (max[i] as u32).saturating_sub(min[i] as u32) + 1)
            .product();

        Self {
            range,
            population,
            min,
            max,
            volume,
            seq,
        }
    }

    fn color_count(&self) -> usize {
        self.range.len()
    }

    fn can_split(&self) -> bool {
        self.color_count() > 1
    }

    /// Channel with the widest range. Ties go to red, then green.
    fn longest_channel(&self) -> Channel {
        let span = |i: usize| self.max[i] - self.min[i];
        let (r, g, b) = (span(0), span(1), span(2));
        if r >= g && r >= b {
            Channel::Red
        } else if g >= b {
            Channel::Green
        } else {
            Channel::Blue
        }
    }

    /// Split at the population-weighted median along the longest channel.
    ///
    /// Reorders this box's slice of `entries` in place. Both halves are
    /// non-empty.
    fn split(self, entries: &mut [HistogramEntry], next_seq: &mut u64) -> (ColorBox, ColorBox) {
        let axis = self.longest_channel();
        let slice = &mut entries[self.range.clone()];
        slice.sort_unstable_by_key(|e| e.color.with_primary(axis));

        let mut accumulated = 0u64;
        let mut split_idx = slice.len() - 1;
        for (i, entry) in slice.iter().enumerate() {
            accumulated += entry.population;
            if accumulated * 2 >= self.population {
                split_idx = i;
                break;
            }
        }
        // The right side must keep at least one color.
        let split_idx = split_idx.min(slice.len() - 2);
        let mid = self.range.start + split_idx + 1;

        let left = ColorBox::fit(entries, self.range.start..mid, *next_seq);
        let right = ColorBox::fit(entries, mid..self.range.end, *next_seq + 1);
        *next_seq += 2;
        (left, right)
    }

    /// Population-weighted mean of the original 8-bit colors.
    fn swatch(&self, entries: &[HistogramEntry]) -> Swatch {
        let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);
        for entry in &entries[self.range.clone()] {
            r += entry.red_sum;
            g += entry.green_sum;
            b += entry.blue_sum;
        }
        let pop = self.population.max(1);
        // Half away from zero, without floats.
        let avg = |sum: u64| ((2 * sum + pop) / (2 * pop)).min(255) as u8;
        Swatch::new((avg(r), avg(g), avg(b)), self.population)
    }
}

impl PartialEq for ColorBox {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ColorBox {}

impl PartialOrd for ColorBox {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Max-heap order: most populous first, then largest volume, then oldest.
impl Ord for ColorBox {
    fn cmp(&self, other: &Self) -> Ordering {
        self.population
            .cmp(&other.population)
            .then(self.volume.cmp(&other.volume))
            .then(other.seq.cmp(&self.seq))
    }
}

/// The result of median cut: histogram entries grouped into disjoint,
/// contiguous runs, one per output color.
#[derive(Debug, Clone)]
pub struct Partition {
    entries: Vec<HistogramEntry>,
    boxes: Vec<ColorBox>,
}

impl Partition {
    /// Number of groups.
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Histogram entries owned by each group, in output order.
    pub fn groups(&self) -> impl Iterator<Item = &[HistogramEntry]> {
        self.boxes.iter().map(|b| &self.entries[b.range.clone()])
    }

    /// One swatch per group, in output order.
    pub fn swatches(&self) -> Vec<Swatch> {
        self.boxes.iter().map(|b| b.swatch(&self.entries)).collect()
    }
}

/// Perform median cut over a histogram.
///
/// Takes entries sorted by packed color (as produced by
/// [`Histogram::into_entries`](crate::histogram::Histogram::into_entries))
/// and partitions them into at most `max_colors` groups. Splitting stops
/// early once every group holds a single quantized color.
///
/// Output groups are ordered by the smallest quantized color they hold.
pub fn median_cut(mut entries: Vec<HistogramEntry>, max_colors: usize) -> Partition {
    if entries.is_empty() || max_colors == 0 {
        return Partition {
            entries,
            boxes: Vec::new(),
        };
    }

    let mut next_seq = 1u64;
    let root = ColorBox::fit(&entries, 0..entries.len(), 0);

    let mut done: Vec<ColorBox> = Vec::with_capacity(max_colors);
    let mut queue: BinaryHeap<ColorBox> = BinaryHeap::with_capacity(max_colors);
    if root.can_split() {
        queue.push(root);
    } else {
        done.push(root);
    }

    while queue.len() + done.len() < max_colors {
        let Some(to_split) = queue.pop() else {
            break; // No more splittable boxes
        };

        let (left, right) = to_split.split(&mut entries, &mut next_seq);
        for child in [left, right] {
            if child.can_split() {
                queue.push(child);
            } else {
                done.push(child);
            }
        }
    }

    let mut boxes = done;
    boxes.extend(queue);

    let first_color = |b: &ColorBox| {
        entries[b.range.clone()]
            .iter()
            .map(|e| e.color)
            .min()
            .unwrap_or_default()
    };
    boxes.sort_by_cached_key(|b| first_color(b));

    Partition { entries, boxes }
}
