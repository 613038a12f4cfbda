//! Feature preprocessing: per-feature standardization
//! followed by per-sample L2 normalization.

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::sample::{Feature, Sample};

/// Fitted standardization parameters.
///
/// [`Scaler::transform`] applies two stages in a fixed order:
/// 1. subtract the fitted mean and divide by the fitted standard
///    deviation, per feature column;
/// 2. scale each instance (row) to unit L2 norm.
///
/// Zero-variance columns keep their centered value (the divisor
/// becomes `1`), and all-zero rows are left unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Scaler {
    means: Vec<f64>,
    stds: Vec<f64>,
}

impl Scaler {
    /// Fit the per-feature means and standard deviations on `sample`.
    /// Fails with [`Error::InvalidShape`] on an empty matrix.
    pub fn fit(sample: &Sample) -> Result<Self> {
        let (n_sample, n_feature) = sample.shape();
        if n_sample == 0 || n_feature == 0 {
            return Err(Error::InvalidShape(format!(
                "cannot fit a scaler on a {n_sample}x{n_feature} matrix"
            )));
        }

        let (means, stds) = sample.features()
            .par_iter()
            .map(|feat| {
                let (mean, variance) = feat.mean_and_variance();
                let std = variance.sqrt();
                let std = if std <= f64::EPSILON { 1f64 } else { std };
                (mean, std)
            })
            .unzip();

        Ok(Self { means, stds, })
    }

    /// Fit on `sample` and immediately transform it.
    pub fn fit_transform(sample: &Sample) -> Result<(Self, Sample)> {
        let scaler = Self::fit(sample)?;
        let transformed = scaler.transform(sample)?;
        Ok((scaler, transformed))
    }

    /// Apply both stages to `sample`.
    /// The output sample has the same shape and target as the input.
    pub fn transform(&self, sample: &Sample) -> Result<Sample> {
        let standardized = self.standardize(sample)?;
        Ok(l2_normalize(&standardized))
    }

    /// Apply the standardization stage only.
    pub fn standardize(&self, sample: &Sample) -> Result<Sample> {
        let (n_sample, n_feature) = sample.shape();
        if n_sample == 0 {
            let msg = "cannot transform an empty sample".to_string();
            return Err(Error::InvalidShape(msg));
        }
        if n_feature != self.means.len() {
            return Err(Error::InvalidShape(format!(
                "the scaler was fitted on {expect} features, got {n_feature}",
                expect = self.means.len(),
            )));
        }

        let features = sample.features()
            .par_iter()
            .zip(&self.means)
            .zip(&self.stds)
            .map(|((feat, &mean), &std)| {
                let vals = feat.vals()
                    .iter()
                    .map(|x| (x - mean) / std)
                    .collect::<Vec<_>>();
                Feature::from_vals(feat.name(), vals)
            })
            .collect::<Vec<_>>();

        Sample::from_columns(features, sample.target().to_vec())
    }
}

/// Scale each instance (row) of `sample` to unit L2 norm.
/// All-zero rows pass through unchanged.
pub fn l2_normalize(sample: &Sample) -> Sample {
    let (n_sample, _) = sample.shape();

    let mut norms = vec![0f64; n_sample];
    for feat in sample.features() {
        for (norm, x) in norms.iter_mut().zip(feat.vals()) {
            *norm += x * x;
        }
    }
    norms.iter_mut()
        .for_each(|norm| {
            *norm = norm.sqrt();
            if *norm <= f64::EPSILON { *norm = 1f64; }
        });

    let features = sample.features()
        .iter()
        .map(|feat| {
            let vals = feat.vals()
                .iter()
                .zip(&norms)
                .map(|(x, norm)| x / norm)
                .collect::<Vec<_>>();
            Feature::from_vals(feat.name(), vals)
        })
        .collect::<Vec<_>>();

    // The columns keep their length so this cannot fail.
    Sample::from_columns(features, sample.target().to_vec())
        .unwrap_or_else(|e| panic!("row normalization broke the shape: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::NUMERIC_TOLERANCE;

    fn toy_sample() -> Sample {
        let features = vec![
            Feature::from_vals("a", vec![1.0, 2.0, 3.0, 4.0]),
            Feature::from_vals("b", vec![-10.0, 0.0, 10.0, 20.0]),
            Feature::from_vals("c", vec![7.0, 7.0, 7.0, 7.0]),
        ];
        let target = vec![1.0, -1.0, 1.0, -1.0];
        Sample::from_columns(features, target).unwrap()
    }

    #[test]
    fn test_standardize_01() {
        let sample = toy_sample();
        let scaler = Scaler::fit(&sample).unwrap();
        let standardized = scaler.standardize(&sample).unwrap();

        for feat in standardized.features().iter().take(2) {
            let (mean, variance) = feat.mean_and_variance();
            assert!(
                mean.abs() < NUMERIC_TOLERANCE,
                "expected mean 0, got {mean}",
            );
            assert!(
                (variance.sqrt() - 1.0).abs() < NUMERIC_TOLERANCE,
                "expected std 1, got {std}",
                std = variance.sqrt(),
            );
        }
    }

    #[test]
    fn test_standardize_zero_variance_01() {
        let sample = toy_sample();
        let scaler = Scaler::fit(&sample).unwrap();
        let standardized = scaler.standardize(&sample).unwrap();

        // The constant column stays at its centered value.
        assert_eq!(standardized["c"].vals(), &[0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_l2_normalize_01() {
        let sample = toy_sample();
        let normalized = l2_normalize(&sample);

        let (n_sample, _) = normalized.shape();
        for i in 0..n_sample {
            let (x, _) = normalized.at(i);
            let norm = x.iter().map(|v| v * v).sum::<f64>().sqrt();
            assert!(
                (norm - 1.0).abs() < NUMERIC_TOLERANCE,
                "expected unit norm, got {norm}",
            );
        }
    }

    #[test]
    fn test_l2_normalize_zero_row_01() {
        let features = vec![
            Feature::from_vals("a", vec![0.0, 3.0]),
            Feature::from_vals("b", vec![0.0, 4.0]),
        ];
        let sample = Sample::from_columns(features, vec![1.0, -1.0]).unwrap();
        let normalized = l2_normalize(&sample);

        let (x, _) = normalized.at(0);
        assert_eq!(x, vec![0.0, 0.0]);

        let (x, _) = normalized.at(1);
        assert_eq!(x, vec![0.6, 0.8]);
    }

    #[test]
    fn test_transform_shape_01() {
        let sample = toy_sample();
        let (_, transformed) = Scaler::fit_transform(&sample).unwrap();
        assert_eq!(transformed.shape(), sample.shape());
        assert_eq!(transformed.target(), sample.target());
    }

    #[test]
    fn test_fit_empty_01() {
        let result = Sample::from_columns(
            vec![Feature::from_vals("a", Vec::new())],
            Vec::new(),
        ).and_then(|sample| Scaler::fit(&sample));
        assert!(
            matches!(result, Err(Error::InvalidShape(_))),
            "expected `Error::InvalidShape`, got {result:?}",
        );
    }

    #[test]
    fn test_transform_width_mismatch_01() {
        let sample = toy_sample();
        let scaler = Scaler::fit(&sample).unwrap();

        let narrow = Sample::from_columns(
            vec![Feature::from_vals("a", vec![1.0])],
            vec![1.0],
        ).unwrap();
        let result = scaler.transform(&narrow);
        assert!(
            matches!(result, Err(Error::InvalidShape(_))),
            "expected `Error::InvalidShape`, got {result:?}",
        );
    }
}
