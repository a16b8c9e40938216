//! Equal-width histogram binning.

use serde::Serialize;

/// Bin edges and counts over one population.
///
/// Bins span `[min, max]` of that population alone, so two histograms drawn
/// together generally do not share edges. Every bin is half-open except the
/// last, which includes `max`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub start: f64,
    pub end: f64,
    pub bin_width: f64,
    /// `counts.len() + 1` edges from `start` to `end`
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width bins.
    ///
    /// Returns `None` for an empty population. A population with a single
    /// distinct value is binned over `[v - 0.5, v + 0.5]`. A bin count of
    /// zero is treated as one.
    pub fn new(values: &[f64], bins: usize) -> Option<Self> {
        let bins = bins.max(1);
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();

        let min = finite.iter().copied().reduce(f64::min)?;
        let max = finite.iter().copied().reduce(f64::max)?;
        let (start, end) = if min == max {
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        };

        let bin_width = (end - start) / bins as f64;
        let edges: Vec<f64> = (0..=bins)
            .map(|i| {
                if i == bins {
                    end
                } else {
                    start + bin_width * i as f64
                }
            })
            .collect();

        let mut counts = vec![0usize; bins];
        for v in finite {
            counts[bin_index(v, start, bin_width, &edges)] += 1;
        }

        Some(Self {
            start,
            end,
            bin_width,
            edges,
            counts,
        })
    }

    /// Count in the fullest bin.
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Number of values binned.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Bin for a value already known to lie in `[start, end]`.
fn bin_index(value: f64, start: f64, bin_width: f64, edges: &[f64]) -> usize {
    let last = edges.len() - 2;
    let mut idx = (((value - start) / bin_width).floor().max(0.0) as usize).min(last);

    // Division can land one bin off near an edge; the edges decide.
    if value < edges[idx] && idx > 0 {
        idx -= 1;
    } else if idx < last && value >= edges[idx + 1] {
        idx += 1;
    }
    idx
}
