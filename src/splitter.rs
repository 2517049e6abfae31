//! Attribute selection.
//!
//! Candidate attributes are scored by information gain. One pass over a
//! node's rows accumulates per-attribute, per-value class counts, and every
//! candidate's gain is then derived from those counts against the node
//! entropy without touching the rows again.

use crate::data::{CodeMatrix, Schema};

/// Class counts for one subset of rows: per-class totals plus an
/// `[attribute][value][class]` breakdown.
pub(crate) struct ClassCounts {
    totals: [usize; 2],
    by_value: Vec<Vec<[usize; 2]>>,
}

impl ClassCounts {
    /// Accumulate counts for `rows` in a single scan.
    pub(crate) fn tally(codes: &CodeMatrix, schema: &Schema, rows: &[usize]) -> Self {
        let mut totals = [0_usize; 2];
        let mut by_value: Vec<Vec<[usize; 2]>> = (0..schema.n_attributes())
            .map(|a| vec![[0, 0]; schema.domain(a).len()])
            .collect();
        for &row in rows {
            let class = codes.label(row) as usize;
            totals[class] += 1;
            for (a, counts) in by_value.iter_mut().enumerate() {
                counts[codes.value(row, a) as usize][class] += 1;
            }
        }
        ClassCounts { totals, by_value }
    }

    fn total(&self) -> usize {
        self.totals[0] + self.totals[1]
    }

    /// Entropy of the whole subset.
    pub(crate) fn entropy(&self) -> f64 {
        entropy(self.totals[0], self.totals[1])
    }

    /// Entropy remaining after splitting on `attribute`: the weighted sum of
    /// the entropies of each value's sub-subset. Values no row takes carry
    /// zero weight.
    pub(crate) fn conditional_entropy(&self, attribute: usize) -> f64 {
        let n = self.total() as f64;
        if n == 0.0 {
            return 0.0;
        }
        self.by_value[attribute]
            .iter()
            .map(|&[c0, c1]| ((c0 + c1) as f64 / n) * entropy(c0, c1))
            .sum()
    }
}

/// Base-2 logarithm with the `log2(0) = 0` convention, so that empty and
/// pure splits contribute zero entropy instead of NaN.
fn log2(x: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        x.log2()
    }
}

/// Entropy of a two-class count pair, in bits. Ranges from 0.0 for a pure
/// pair to 1.0 for an even one; an empty pair counts as pure.
pub(crate) fn entropy(c0: usize, c1: usize) -> f64 {
    let n = (c0 + c1) as f64;
    if n == 0.0 {
        return 0.0;
    }
    let p0 = c0 as f64 / n;
    let p1 = c1 as f64 / n;
    -p0 * log2(p0) - p1 * log2(p1)
}

/// Information gain of every candidate attribute, in candidate order.
pub(crate) fn information_gains(counts: &ClassCounts, candidates: &[usize]) -> Vec<f64> {
    let h = counts.entropy();
    candidates
        .iter()
        .map(|&a| h - counts.conditional_entropy(a))
        .collect()
}

/// The candidate with the greatest information gain.
///
/// The running best starts below every achievable gain, so the first
/// candidate always takes it; later candidates must strictly improve, which
/// settles ties on the earliest candidate in iteration order.
pub(crate) fn best_attribute(counts: &ClassCounts, candidates: &[usize]) -> usize {
    debug_assert!(!candidates.is_empty());
    let mut best = candidates[0];
    let mut best_gain = f64::NEG_INFINITY;
    for (&attribute, gain) in candidates.iter().zip(information_gains(counts, candidates)) {
        if gain > best_gain {
            best_gain = gain;
            best = attribute;
        }
    }
    best
}
