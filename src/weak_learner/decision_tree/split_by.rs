//! Node splitting criteria for the decision tree.
use rayon::prelude::*;

use std::fmt;
use std::collections::HashMap;

use crate::Sample;
use super::bin::{Bin, Bins};

/// Criteria for choosing the node split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitBy {
    /// Binary entropy.
    Entropy,
    /// Weighted accuracy, measured as the absolute edge of the stump.
    /// Designed for binary classification problems.
    Edge,
    /// The Gini index.
    Gini,
}

impl fmt::Display for SplitBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entropy => write!(f, "Entropy"),
            Self::Edge => write!(f, "Edge (Weighted accuracy)"),
            Self::Gini => write!(f, "Gini index"),
        }
    }
}

impl SplitBy {
    /// Pick the feature and threshold attaining the best score
    /// under the criterion.
    pub(super) fn best_split<'a>(
        &self,
        bins:   &HashMap<&'a str, Bins>,
        sample: &'a Sample,
        dist:   &[f64],
        ix:     &[usize],
    ) -> (&'a str, f64)
    {
        let target = sample.target();
        let scored = sample.features()
            .par_iter()
            .map(|feature| {
                let name = feature.name();
                let pack = bins.get(name)
                    .unwrap()
                    .pack(ix, feature, target, dist);
                let (threshold, score) = match self {
                    Self::Entropy => {
                        split_by_impurity(pack, entropic_impurity)
                    },
                    Self::Gini => split_by_impurity(pack, gini_impurity),
                    Self::Edge => split_by_edge(pack),
                };

                (score, name, threshold)
            });

        // An edge is the better the larger it is,
        // an impurity the smaller.
        let best = match self {
            Self::Edge => scored
                .max_by(|x, y| x.0.partial_cmp(&y.0).unwrap()),
            _ => scored
                .min_by(|x, y| x.0.partial_cmp(&y.0).unwrap()),
        };

        best.map(|(_, name, threshold)| (name, threshold))
            .expect("a sample has at least one feature column")
    }
}

/// Sweep the candidate cuts from left to right and keep the one
/// minimizing the weighted impurity of the two children.
/// Returns the best threshold and its score.
/// The baseline is the no-split case:
/// `f64::MIN` sends every instance to the right child.
fn split_by_impurity(
    pack: Vec<(Bin, HashMap<i32, f64>)>,
    impurity: fn(&HashMap<i32, f64>) -> f64,
) -> (f64, f64)
{
    let total = pack.iter()
        .map(|(_, masses)| masses.values().sum::<f64>())
        .sum::<f64>();

    let mut left = HashMap::<i32, f64>::new();
    let mut left_total = 0f64;
    let mut right = merged_masses(&pack);

    let mut best_threshold = f64::MIN;
    let mut best_score = impurity(&right);

    for (bin, masses) in pack {
        for (y, w) in masses {
            *left.entry(y).or_insert(0f64) += w;
            left_total += w;
            if let Some(m) = right.get_mut(&y) {
                *m -= w;
                if *m <= 0f64 { right.remove(&y); }
            }
        }

        let lp = left_total / total;
        let rp = (1f64 - lp).max(0f64);
        let score = lp * impurity(&left) + rp * impurity(&right);

        if score < best_score {
            best_score = score;
            best_threshold = bin.end();
        }
    }
    (best_threshold, best_score)
}

/// Sweep the candidate cuts and keep the one whose decision stump
/// attains the largest absolute edge.
/// Returns the best threshold and the attained edge.
fn split_by_edge(pack: Vec<(Bin, HashMap<i32, f64>)>) -> (f64, f64) {
    // The running value is the edge of the stump predicting `+1`
    // everywhere. Moving a bin to the left child flips the sign
    // of its contribution.
    let mut edge = pack.iter()
        .map(|(_, masses)| signed_mass(masses))
        .sum::<f64>();

    let mut best_threshold = f64::MIN;
    let mut best_edge = edge.abs();

    for (bin, masses) in pack {
        edge -= 2f64 * signed_mass(&masses);

        if edge.abs() > best_edge {
            best_edge = edge.abs();
            best_threshold = bin.end();
        }
    }
    (best_threshold, best_edge)
}

/// The label masses of all bins combined.
fn merged_masses(pack: &[(Bin, HashMap<i32, f64>)]) -> HashMap<i32, f64> {
    let mut merged = HashMap::new();
    for (_, masses) in pack {
        for (&y, &w) in masses {
            *merged.entry(y).or_insert(0f64) += w;
        }
    }
    merged
}

/// The inner product of labels and their masses.
fn signed_mass(masses: &HashMap<i32, f64>) -> f64 {
    masses.iter()
        .map(|(&y, &w)| y as f64 * w)
        .sum::<f64>()
}

/// Entropy of the label masses in `masses`.
#[inline(always)]
fn entropic_impurity(masses: &HashMap<i32, f64>) -> f64 {
    let total: f64 = masses.values().sum();
    if total <= 0f64 { return 0f64; }

    masses.values()
        .map(|&mass| mass / total)
        .filter(|&ratio| ratio > 0f64)
        .map(|ratio| -ratio * ratio.ln())
        .sum()
}

/// Gini impurity of the label masses in `masses`.
#[inline(always)]
fn gini_impurity(masses: &HashMap<i32, f64>) -> f64 {
    let total: f64 = masses.values().sum();
    if total <= 0f64 { return 0f64; }

    let sq_sum: f64 = masses.values()
        .map(|&mass| (mass / total).powi(2))
        .sum();
    (1f64 - sq_sum).max(0f64)
}

#[cfg(test)]
mod tests {
    use std::io::BufReader;
    use super::*;
    use crate::Feature;

    const TEST_TOLERANCE: f64 = 1e-9;

    fn packed(
        labels: &[f64],
        dist: &[f64],
    ) -> Vec<(Bin, HashMap<i32, f64>)>
    {
        let feature = Feature::from_vals(
            "feat",
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        );
        let ix = (0..6).collect::<Vec<_>>();
        let bins = Bins::cut(&feature, 6);
        bins.pack(&ix[..], &feature, labels, dist)
    }

    // Three positives then three negatives.
    // The clean cut sits at the end of the third bin.
    fn clean_pack() -> Vec<(Bin, HashMap<i32, f64>)> {
        let labels = [1.0, 1.0, 1.0, -1.0, -1.0, -1.0];
        let dist = [1f64 / 6f64; 6];
        packed(&labels[..], &dist[..])
    }

    // One flipped label on each side. The mass concentrates on the
    // last two instances, so the best cut moves one bin right.
    fn noisy_pack() -> Vec<(Bin, HashMap<i32, f64>)> {
        let labels = [1.0, 1.0, -1.0, 1.0, -1.0, -1.0];
        let dist = [0.1, 0.1, 0.05, 0.05, 0.3, 0.4];
        packed(&labels[..], &dist[..])
    }

    #[test]
    fn test_gini_clean_cut_01() {
        let (threshold, score) = split_by_impurity(
            clean_pack(), gini_impurity,
        );

        assert!(
            (threshold - 3.5).abs() < TEST_TOLERANCE,
            "expected 3.5, got {threshold}",
        );
        assert!(
            score.abs() < TEST_TOLERANCE,
            "expected 0.0, got {score}",
        );
    }

    #[test]
    fn test_gini_weighted_cut_01() {
        let (threshold, score) = split_by_impurity(
            noisy_pack(), gini_impurity,
        );

        // Cutting after the fourth bin leaves `{0.25, 0.05}` on the
        // left and a pure right child.
        let expected_threshold = 13f64 / 3f64;
        assert!(
            (expected_threshold - threshold).abs() < TEST_TOLERANCE,
            "expected {expected_threshold}, got {threshold}",
        );

        let expected_score = {
            let i = 1f64
                - (5f64 / 6f64).powi(2)
                - (1f64 / 6f64).powi(2);
            0.3 * i
        };
        assert!(
            (expected_score - score).abs() < TEST_TOLERANCE,
            "expected {expected_score}, got {score}",
        );
    }

    #[test]
    fn test_entropy_clean_cut_01() {
        let (threshold, score) = split_by_impurity(
            clean_pack(), entropic_impurity,
        );

        assert!(
            (threshold - 3.5).abs() < TEST_TOLERANCE,
            "expected 3.5, got {threshold}",
        );
        assert!(
            score.abs() < TEST_TOLERANCE,
            "expected 0.0, got {score}",
        );
    }

    #[test]
    fn test_entropy_weighted_cut_01() {
        let (threshold, score) = split_by_impurity(
            noisy_pack(), entropic_impurity,
        );

        let expected_threshold = 13f64 / 3f64;
        assert!(
            (expected_threshold - threshold).abs() < TEST_TOLERANCE,
            "expected {expected_threshold}, got {threshold}",
        );

        let expected_score = {
            let h = - (5f64 / 6f64) * (5f64 / 6f64).ln()
                - (1f64 / 6f64) * (1f64 / 6f64).ln();
            0.3 * h
        };
        assert!(
            (expected_score - score).abs() < TEST_TOLERANCE,
            "expected {expected_score}, got {score}",
        );
    }

    #[test]
    fn test_edge_clean_cut_01() {
        let (threshold, score) = split_by_edge(clean_pack());

        assert!(
            (threshold - 3.5).abs() < TEST_TOLERANCE,
            "expected 3.5, got {threshold}",
        );
        assert!(
            (score - 1.0).abs() < TEST_TOLERANCE,
            "expected 1.0, got {score}",
        );
    }

    #[test]
    fn test_edge_weighted_cut_01() {
        let (threshold, score) = split_by_edge(noisy_pack());

        // The edge already peaks after the second bin. Cutting after
        // the fourth one attains the same 0.9 but comes later, so the
        // earlier cut stays.
        let expected_threshold = 8f64 / 3f64;
        assert!(
            (expected_threshold - threshold).abs() < TEST_TOLERANCE,
            "expected {expected_threshold}, got {threshold}",
        );
        assert!(
            (score - 0.9).abs() < TEST_TOLERANCE,
            "expected 0.9, got {score}",
        );
    }

    fn two_feature_sample() -> Sample {
        let csv = b"\
            informative,flat,class\n\
            1.0,0.5,1.0\n\
            2.0,0.5,1.0\n\
            3.0,0.5,1.0\n\
            4.0,0.5,-1.0\n\
            5.0,0.5,-1.0\n\
            6.0,0.5,-1.0";
        let reader = BufReader::new(&csv[..]);
        Sample::from_reader(reader, true)
            .unwrap()
            .set_target("class")
    }

    fn bins_of(sample: &Sample) -> HashMap<&str, Bins> {
        sample.features()
            .iter()
            .map(|feature| (feature.name(), Bins::cut(feature, 6)))
            .collect::<HashMap<_, _>>()
    }

    #[test]
    fn test_best_split_ignores_flat_feature_01() {
        let sample = two_feature_sample();
        let bins = bins_of(&sample);
        let ix = (0..6).collect::<Vec<_>>();
        let dist = vec![1f64 / 6f64; 6];

        for split_by in [SplitBy::Entropy, SplitBy::Edge, SplitBy::Gini] {
            let (name, threshold) = split_by
                .best_split(&bins, &sample, &dist[..], &ix[..]);

            assert_eq!("informative", name, "criterion {split_by}");
            assert!(
                (threshold - 3.5).abs() < TEST_TOLERANCE,
                "criterion {split_by}: expected 3.5, got {threshold}",
            );
        }
    }
}
