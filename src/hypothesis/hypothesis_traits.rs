use crate::Sample;

/// A trait that defines the behavior of a classifier.
/// You only need to implement the `confidence` method.
pub trait Classifier {
    /// Computes the confidence of the i'th row of `sample`.
    /// Implementations keep the returned value in `[-1.0, 1.0]`.
    fn confidence(&self, sample: &Sample, row: usize) -> f64;

    /// Predicts the label of the i'th row of `sample`.
    /// Ties in confidence break toward `+1`.
    fn predict(&self, sample: &Sample, row: usize) -> i64 {
        if self.confidence(sample, row) >= 0.0 { 1 } else { -1 }
    }

    /// Computes the confidences over all rows of `sample`.
    fn confidence_all(&self, sample: &Sample) -> Vec<f64> {
        (0..sample.shape().0)
            .map(|row| self.confidence(sample, row))
            .collect()
    }

    /// Predicts the labels of all rows of `sample`.
    fn predict_all(&self, sample: &Sample) -> Vec<i64> {
        (0..sample.shape().0)
            .map(|row| self.predict(sample, row))
            .collect()
    }
}
