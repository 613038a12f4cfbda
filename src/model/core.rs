use crate::error::Result;
use crate::sample::Sample;

/// A trainable ensemble with a uniform fit/predict surface.
///
/// Extra collaborators such as pool sizes, sampler handles, and
/// regularization strength are fixed at construction,
/// so the trait stays object safe and the evaluation driver can
/// treat every model alike.
pub trait Model {
    /// A short human-readable name for reports and warnings.
    fn name(&self) -> &str;

    /// Parameter echo in `(key, value)` pairs.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        None
    }

    /// Train on `train`, replacing any previously fitted state.
    /// `train` must be a binary sample with labels in `{+1, -1}`.
    fn fit(&mut self, train: &Sample) -> Result<()>;

    /// Predict a `{+1, -1}` label for every instance of `sample`.
    ///
    /// # Panics
    ///
    /// Panics when called before a successful [`Model::fit`].
    fn predict_all(&self, sample: &Sample) -> Vec<i64>;

    /// Diagnostic weight vector of the fitted ensemble, if any.
    /// Returns `None` before `fit`.
    fn weights(&self) -> Option<&[f64]> {
        None
    }
}

/// Unwraps fitted state, panicking on predict-before-fit misuse.
pub(crate) fn fitted<'a, T>(state: &'a Option<T>, name: &str) -> &'a T {
    state.as_ref()
        .unwrap_or_else(|| panic!("{name}: call `fit` first"))
}
