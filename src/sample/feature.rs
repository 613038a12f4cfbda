use std::ops::Index;

use crate::constants::BUFFER_SIZE;

/// A single feature column, stored densely.
/// Every instance of the dataset contributes one value to `vals`,
/// in row order.
#[derive(Debug, Clone)]
pub struct Feature {
    name: String,
    vals: Vec<f64>,
}

impl Feature {
    /// Construct an empty column of the given name.
    pub fn new<T: ToString>(name: T) -> Self {
        Self {
            name: name.to_string(),
            vals: Vec::with_capacity(BUFFER_SIZE),
        }
    }

    /// Construct a column from its name and values.
    pub fn from_vals<T: ToString>(name: T, vals: Vec<f64>) -> Self {
        Self { name: name.to_string(), vals, }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append one value to the column.
    pub fn push(&mut self, val: f64) {
        self.vals.push(val);
    }

    pub fn len(&self) -> usize {
        self.vals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vals.is_empty()
    }

    /// Consumes `self`, returning the raw values.
    pub fn into_vals(self) -> Vec<f64> {
        self.vals
    }

    /// Returns the raw values of the column.
    pub fn vals(&self) -> &[f64] {
        &self.vals[..]
    }

    /// Counts the distinct values this column takes.
    pub fn distinct_value_count(&self) -> usize {
        let mut values = self.vals.clone();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());
        values.dedup();
        values.len()
    }

    /// Computes the mean and the (population) variance of the column.
    /// Both are zero for an empty column.
    pub fn mean_and_variance(&self) -> (f64, f64) {
        let n = self.vals.len();
        if n == 0 { return (0f64, 0f64); }

        let n = n as f64;
        let mean = self.vals.iter().sum::<f64>() / n;
        let variance = self.vals.iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / n;
        (mean, variance)
    }
}

impl Index<usize> for Feature {
    type Output = f64;
    fn index(&self, idx: usize) -> &Self::Output {
        &self.vals[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_01() {
        let f = Feature::new("test-001");

        assert_eq!(f.name(), "test-001");
        assert!(
            f.is_empty(),
            "expected 0-length column, got {vals:?}.",
            vals = f.vals(),
        );
    }

    #[test]
    fn test_push_01() {
        let mut f = Feature::new("test-002");
        f.push( 1.5);
        f.push(-0.75);
        f.push(12.0);
        f.push(-6.25);

        assert_eq!(f.into_vals(), vec![1.5, -0.75, 12.0, -6.25]);
    }

    #[test]
    fn test_mean_and_variance_01() {
        let f = Feature::from_vals("test-003", vec![1.0, 2.0, 3.0, 4.0]);
        let (mean, variance) = f.mean_and_variance();

        assert!((mean - 2.5).abs() < 1e-9, "expected 2.5, got {mean}");
        assert!(
            (variance - 1.25).abs() < 1e-9,
            "expected 1.25, got {variance}",
        );
    }

    #[test]
    fn test_mean_and_variance_02() {
        let f = Feature::from_vals("test-004", Vec::new());
        let (mean, variance) = f.mean_and_variance();

        assert_eq!(mean, 0.0, "expected 0.0, got {mean}");
        assert_eq!(variance, 0.0, "expected 0.0, got {variance}");
    }

    #[test]
    fn test_index_01() {
        let f = Feature::from_vals("test-005", vec![5.0, -1.0, 0.25]);
        assert_eq!(f[0],  5.0);
        assert_eq!(f[1], -1.0);
        assert_eq!(f[2],  0.25);
    }

    #[test]
    fn test_distinct_value_count_01() {
        let f = Feature::from_vals(
            "test-006", vec![1.0, 2.0, 1.0, 3.0, 2.0, 1.0],
        );
        let result = f.distinct_value_count();
        let expect = 3;
        assert_eq!(expect, result, "expected {expect}, got {result}");
    }

    #[test]
    fn test_distinct_value_count_02() {
        let f = Feature::from_vals("test-007", Vec::new());
        let result = f.distinct_value_count();
        let expect = 0;
        assert_eq!(expect, result, "expected {expect}, got {result}");
    }
}
