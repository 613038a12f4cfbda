use crate::Sample;

/// An interface that produces a hypothesis for a given distribution
/// over training examples.
pub trait WeakLearner {
    /// The type of the hypothesis this learner produces.
    type Hypothesis;

    /// A human readable name of the weak learner.
    fn name(&self) -> &str;

    /// A table of parameters of the weak learner.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        None
    }

    /// Produces a hypothesis for the given `sample` and
    /// the distribution `dist` over its instances.
    fn produce(&self, sample: &Sample, dist: &[f64]) -> Self::Hypothesis;
}
