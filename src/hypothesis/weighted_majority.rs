use serde::{Serialize, Deserialize};

use crate::{Classifier, Sample};

/// A convex combination of hypotheses.
/// All ensemble models in this crate predict through this struct.
/// You can read/write it by the `Serde` traits.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WeightedMajority<H> {
    /// One vote weight per member of `self.hypotheses`.
    pub weights: Vec<f64>,
    /// The combined hypotheses.
    pub hypotheses: Vec<H>,
}

impl<H: Clone> WeightedMajority<H> {
    /// Combine paired weight and hypothesis slices.
    /// Pairs with non-positive weights are dropped and the remaining
    /// weights are normalized to unit L1 norm.
    #[inline]
    pub fn from_slices(weights: &[f64], hypotheses: &[H]) -> Self {
        let (mut weights, hypotheses): (Vec<f64>, Vec<H>) = weights.iter()
            .zip(hypotheses)
            .filter(|(&w, _)| w > 0.0)
            .map(|(&w, h)| (w, h.clone()))
            .unzip();

        let z = weights.iter().sum::<f64>();
        assert_ne!(z, 0.0);
        weights.iter_mut().for_each(|w| { *w /= z; });

        Self { weights, hypotheses, }
    }
}

impl<H> WeightedMajority<H> {
    /// The number of hypotheses with a non-zero vote.
    pub fn len(&self) -> usize {
        self.hypotheses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hypotheses.is_empty()
    }
}

impl<F> Classifier for WeightedMajority<F>
    where F: Classifier,
{
    fn confidence(&self, sample: &Sample, row: usize) -> f64 {
        self.weights.iter()
            .zip(&self.hypotheses)
            .map(|(w, h)| w * h.confidence(sample, row))
            .sum()
    }
}
