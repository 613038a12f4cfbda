//! Equal-width feature binning for the decision tree.
use std::collections::HashMap;

use crate::Feature;
use crate::constants::PERTURBATION;

/// A half-open interval `[start, end)` of feature values.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Bin {
    start: f64,
    end: f64,
}

impl Bin {
    pub(crate) fn new(start: f64, end: f64) -> Self {
        Self { start, end, }
    }

    /// Check whether the given `value` is contained by `self.`
    pub(crate) fn contains(&self, value: f64) -> bool {
        self.start <= value && value < self.end
    }

    pub(crate) fn end(&self) -> f64 {
        self.end
    }
}

/// The bins of one feature column, ordered left to right.
#[derive(Debug)]
pub(crate) struct Bins(Vec<Bin>);

impl Bins {
    /// Returns the number of bins.
    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    /// Cut the value range of `feature` into `n_bin` bins of equal
    /// width. The left-most bin is extended to `f64::MIN` and the
    /// right-most one to `f64::MAX`,
    /// so every finite value falls into some bin.
    pub(crate) fn cut(feature: &Feature, n_bin: usize) -> Self {
        let mut lo = f64::MAX;
        let mut hi = f64::MIN;
        for &val in feature.vals() {
            lo = lo.min(val);
            hi = hi.max(val);
        }

        // A constant column still needs a nonzero bin width.
        if lo == hi {
            lo -= PERTURBATION;
            hi += PERTURBATION;
        }
        let width = (hi - lo) / n_bin as f64;

        let mut edges = (0..=n_bin)
            .map(|k| lo + k as f64 * width)
            .collect::<Vec<_>>();
        edges[0] = f64::MIN;
        edges[n_bin] = f64::MAX;

        let bins = edges.windows(2)
            .map(|pair| Bin::new(pair[0], pair[1]))
            .collect::<Vec<_>>();
        Self(bins)
    }

    /// Accumulate, per bin, the distribution mass of each label
    /// over the rows in `indices`.
    /// Bins that received no mass are dropped.
    pub(crate) fn pack(
        &self,
        indices: &[usize],
        feature: &Feature,
        labels:  &[f64],
        dist:    &[f64],
    ) -> Vec<(Bin, HashMap<i32, f64>)>
    {
        let mut masses = vec![HashMap::<i32, f64>::new(); self.0.len()];
        for &i in indices {
            let pos = self.position_of(feature[i]);
            let mass = masses[pos].entry(labels[i] as i32)
                .or_insert(0f64);
            *mass += dist[i];
        }

        let packed = self.0.iter()
            .cloned()
            .zip(masses)
            .filter(|(_, mass)| !mass.is_empty())
            .collect::<Vec<_>>();
        redraw_edges(packed)
    }

    /// The index of the bin containing `value`.
    fn position_of(&self, value: f64) -> usize {
        self.0.partition_point(|bin| bin.end <= value)
    }
}

/// Re-draws the bounds of the surviving bins. Neighbors share the
/// midpoint of the gap the dropped bins left behind, and the outer
/// bounds stretch over the full `f64` range.
fn redraw_edges(
    mut packed: Vec<(Bin, HashMap<i32, f64>)>,
) -> Vec<(Bin, HashMap<i32, f64>)>
{
    let n = packed.len();
    if n == 0 {
        return packed;
    }

    for k in 1..n {
        let midpoint = (packed[k - 1].0.end + packed[k].0.start) / 2f64;
        packed[k - 1].0.end = midpoint;
        packed[k].0.start = midpoint;
    }
    packed[0].0.start = f64::MIN;
    packed[n - 1].0.end = f64::MAX;
    packed
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_TOLERANCE: f64 = 1e-9;

    #[test]
    fn test_contains_01() {
        let bin = Bin::new(0.0, 1.0);
        assert!(bin.contains(0.0));
        assert!(bin.contains(0.5));
        assert!(!bin.contains(1.0));
        assert!(!bin.contains(-0.1));
    }

    #[test]
    fn test_cut_01() {
        let feature = Feature::from_vals(
            "feat", vec![0.0, 4.0, 1.0, 3.0],
        );
        let bins = Bins::cut(&feature, 4);

        assert_eq!(bins.len(), 4);
        assert_eq!(bins.0[1], Bin::new(1.0, 2.0));
        assert_eq!(bins.0[2], Bin::new(2.0, 3.0));

        // The outer bins capture values beyond the observed range.
        assert!(bins.0[0].contains(-1e300));
        assert!(bins.0[3].contains(1e300));
    }

    #[test]
    fn test_cut_constant_column_01() {
        let feature = Feature::from_vals("feat", vec![7.5, 7.5, 7.5]);
        let bins = Bins::cut(&feature, 3);
        assert_eq!(bins.len(), 3);

        // All the mass ends up in a single bin.
        let ix = [0, 1, 2];
        let labels = [1.0, 1.0, -1.0];
        let dist = [0.25, 0.25, 0.5];
        let packed = bins.pack(&ix[..], &feature, &labels[..], &dist[..]);

        assert_eq!(packed.len(), 1);
        let mass = &packed[0].1;
        assert!((mass[&1] - 0.5).abs() < TEST_TOLERANCE);
        assert!((mass[&-1] - 0.5).abs() < TEST_TOLERANCE);
    }

    #[test]
    fn test_pack_01() {
        let feature = Feature::from_vals(
            "feat", vec![0.0, 1.0, 3.0, 4.0],
        );
        let bins = Bins::cut(&feature, 4);

        let ix = [0, 1, 2, 3];
        let labels = [1.0, -1.0, 1.0, -1.0];
        let dist = [0.1, 0.2, 0.3, 0.4];
        let packed = bins.pack(&ix[..], &feature, &labels[..], &dist[..]);

        // The empty bin `[2, 3)` is dropped and its neighbors meet
        // at the midpoint `2.5`.
        assert_eq!(packed.len(), 3);
        assert!((packed[0].0.end() - 1.0).abs() < TEST_TOLERANCE);
        assert!((packed[1].0.end() - 2.5).abs() < TEST_TOLERANCE);
        assert_eq!(packed[2].0.end(), f64::MAX);

        assert!((packed[0].1[&1] - 0.1).abs() < TEST_TOLERANCE);
        assert!((packed[1].1[&-1] - 0.2).abs() < TEST_TOLERANCE);
        assert!((packed[2].1[&1] - 0.3).abs() < TEST_TOLERANCE);
        assert!((packed[2].1[&-1] - 0.4).abs() < TEST_TOLERANCE);
    }

    #[test]
    fn test_pack_subset_01() {
        let feature = Feature::from_vals(
            "feat", vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        );
        let bins = Bins::cut(&feature, 6);

        // Only the two outermost pairs carry mass, as if the middle
        // instances fell out of a bootstrap draw.
        let ix = [0, 1, 4, 5];
        let labels = [1.0, 1.0, 0.0, 0.0, -1.0, -1.0];
        let dist = [0.25, 0.25, 0.0, 0.0, 0.25, 0.25];
        let packed = bins.pack(&ix[..], &feature, &labels[..], &dist[..]);

        assert_eq!(packed.len(), 4);

        // The two dropped bins leave a gap with midpoint `3.5`.
        let boundary = packed[1].0.end();
        assert!(
            (boundary - 3.5).abs() < TEST_TOLERANCE,
            "expected 3.5, got {boundary}",
        );
        assert!(packed[1].0.contains(2.0));
        assert!(packed[2].0.contains(5.0));
    }
}
