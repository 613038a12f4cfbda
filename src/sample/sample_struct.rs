use std::path::Path;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::collections::{HashMap, HashSet};
use std::ops::Index;

use polars::prelude::*;
use rayon::prelude::*;

use crate::error::{Error, Result};
use super::feature::Feature;

/// A batch sample for binary classification.
/// Features are stored column-wise; the target column holds
/// one value per instance, in `{+1, -1}` after binarization.
#[derive(Debug, Clone)]
pub struct Sample {
    pub(super) column_index: HashMap<String, usize>,
    pub(super) features: Vec<Feature>,
    pub(super) target: Vec<f64>,
    pub(super) n_sample: usize,
    pub(super) n_feature: usize,
}

impl Sample {
    /// Construct a sample from feature columns and target values.
    /// Fails with [`Error::InvalidShape`] when some column length
    /// differs from the target length, or no column is given.
    pub fn from_columns(features: Vec<Feature>, target: Vec<f64>)
        -> Result<Self>
    {
        if features.is_empty() {
            return Err(Error::InvalidShape(
                "a sample needs at least one feature column".into()
            ));
        }

        let n_sample = target.len();
        for feat in &features {
            if feat.len() != n_sample {
                return Err(Error::InvalidShape(format!(
                    "column `{name}` has {found} values, expected {n_sample}",
                    name = feat.name(),
                    found = feat.len(),
                )));
            }
        }

        let n_feature = features.len();
        let column_index = index_by_name(&features);

        Ok(Self { column_index, features, target, n_sample, n_feature, })
    }

    /// Read CSV lines to a [`Sample`].
    ///
    /// When the input has no header row, columns get default names
    /// `Feat. [1]`, `Feat. [2]`, ..., `Feat. [n]`.
    ///
    /// Call [`Sample::set_target`] afterwards to pick
    /// the class label column.
    pub fn from_reader<R>(reader: BufReader<R>, has_header: bool)
        -> Result<Self>
        where R: Read,
    {
        let mut lines = reader.lines();

        let mut features = Vec::new();
        if has_header {
            let header = lines.next()
                .transpose()?
                .ok_or_else(|| Error::InvalidShape(
                    "the input has no header line".into()
                ))?;
            features = header.split(',')
                .map(|name| Feature::new(name.trim()))
                .collect::<Vec<_>>();
        }

        let mut n_sample = 0_usize;
        for (i, line) in lines.enumerate() {
            let row = parse_row(&line?, i)?;

            // Without a header, the first row fixes the width.
            if features.is_empty() {
                features = (1..=row.len())
                    .map(|k| Feature::new(format!("Feat. [{k}]")))
                    .collect::<Vec<_>>();
            }

            if row.len() != features.len() {
                return Err(Error::InvalidShape(format!(
                    "line {i} has {found} values, expected {expect}",
                    found = row.len(),
                    expect = features.len(),
                )));
            }

            for (feature, x) in features.iter_mut().zip(row) {
                feature.push(x);
            }
            n_sample += 1;
        }

        let n_feature = features.len();
        let column_index = index_by_name(&features);
        let target = Vec::new();

        Ok(Self { column_index, features, target, n_sample, n_feature, })
    }

    /// Read a CSV format file to a [`Sample`].
    pub(crate) fn from_csv<P>(file: P, has_header: bool) -> Result<Self>
        where P: AsRef<Path>,
    {
        let file = File::open(file)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader, has_header)
    }

    /// Convert `polars::DataFrame` and `polars::Series` into a
    /// [`Sample`]. Integer columns are cast to `f64`; columns with
    /// missing values are rejected.
    pub fn from_dataframe(data: DataFrame, target: Series) -> Result<Self> {
        let (n_sample, n_feature) = data.shape();
        let target = series_to_vals(&target)?;

        let features = data.get_columns()
            .par_iter()
            .map(|series| {
                let vals = series_to_vals(series)?;
                Ok(Feature::from_vals(series.name(), vals))
            })
            .collect::<Result<Vec<_>>>()?;

        let column_index = index_by_name(&features);

        Ok(Self { column_index, features, target, n_sample, n_feature, })
    }

    /// The target values, one per instance.
    pub fn target(&self) -> &[f64] {
        &self.target[..]
    }

    /// The feature columns.
    pub fn features(&self) -> &[Feature] {
        &self.features[..]
    }

    /// Returns `(n_sample, n_feature)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_sample, self.n_feature)
    }

    /// Returns the feature vector and label of the `idx`-th instance.
    pub fn at(&self, idx: usize) -> (Vec<f64>, f64) {
        let x = self.features.iter()
            .map(|feature| feature[idx])
            .collect::<Vec<f64>>();

        (x, self.target[idx])
    }

    /// Move the column named `target` out of the feature set
    /// and use it as the class label.
    /// The previous label column, if any, is dropped.
    pub fn set_target<S: AsRef<str>>(mut self, target: S) -> Self {
        let target = target.as_ref();
        let pos = self.features.iter()
            .position(|feature| feature.name() == target)
            .unwrap_or_else(|| {
                panic!("No column named \"{target}\" to use as the target")
            });

        self.target = self.features.remove(pos).into_vals();
        self.n_feature -= 1;
        self.column_index = index_by_name(&self.features);

        self
    }

    /// Map the target values onto `{+1, -1}` spin labels:
    /// values satisfying `positive` become `+1`, all others `-1`.
    pub fn binarize_target<P>(mut self, positive: P) -> Self
        where P: Fn(f64) -> bool,
    {
        self.target.iter_mut()
            .for_each(|y| { *y = if positive(*y) { 1f64 } else { -1f64 }; });
        self
    }

    /// Gather the instances at `ix` into a new sample,
    /// in the given order.
    pub fn subset<T>(&self, ix: T) -> Self
        where T: AsRef<[usize]>,
    {
        let ix = ix.as_ref();
        let features = self.features.iter()
            .map(|feature| {
                let vals = ix.iter()
                    .map(|&i| feature[i])
                    .collect::<Vec<_>>();
                Feature::from_vals(feature.name(), vals)
            })
            .collect::<Vec<_>>();
        let target = ix.iter()
            .map(|&i| self.target[i])
            .collect::<Vec<_>>();

        Self {
            column_index: self.column_index.clone(),
            features,
            target,
            n_sample: ix.len(),
            n_feature: self.n_feature,
        }
    }

    fn target_is_specified(&self) {
        if self.target.len() != self.n_sample {
            panic!(
                "The sample has no target column.\n\
                 Assign one with `Sample::set_target(\"Column Name\")`."
            );
        }
    }

    /// Panics unless `self` holds a two-class training set.
    pub fn is_valid_binary_instance(&self) {
        self.target_is_specified();

        // The target values must be integers.
        let non_integers = self.target.iter()
            .filter(|&y| y.trunc() != *y)
            .take(5)
            .map(|y| y.to_string())
            .collect::<Vec<_>>();
        if !non_integers.is_empty() {
            panic!(
                "The target column holds non-integer values, \
                 e.g. [{line}, ...].",
                line = non_integers.join(", "),
            );
        }

        // The target values must take exactly 2 kinds.
        let kinds = self.target.iter()
            .map(|&y| y as i32)
            .collect::<HashSet<_>>();
        let n_label = kinds.len();
        if n_label != 2 {
            panic!(
                "A binary sample needs exactly 2 distinct labels, \
                 found {n_label}."
            );
        }

        let is_pm = kinds.iter().all(|&y| y == 1 || y == -1);
        if !is_pm {
            let line = kinds.iter()
                .map(|y| y.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            log::warn!(
                "the labels are [{line}] rather than the spin pair \
                 {{+1, -1}}"
            );
        }
    }
}

fn parse_row(line: &str, i: usize) -> Result<Vec<f64>> {
    line.split(',')
        .map(|cell| {
            cell.trim().parse::<f64>().map_err(|_| invalid_data(
                format!("non-numerical value `{cell}` in line {i}")
            ))
        })
        .collect()
}

fn index_by_name(features: &[Feature]) -> HashMap<String, usize> {
    features.iter()
        .enumerate()
        .map(|(i, feature)| (feature.name().to_string(), i))
        .collect::<HashMap<_, _>>()
}

fn invalid_data(msg: String) -> Error {
    Error::Io(io::Error::new(io::ErrorKind::InvalidData, msg))
}

fn series_to_vals(series: &Series) -> Result<Vec<f64>> {
    let casted = series.cast(&DataType::Float64)?;
    let vals = casted.f64()?
        .into_iter()
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| invalid_data(format!(
            "column `{name}` contains missing values",
            name = series.name(),
        )))?;
    Ok(vals)
}

impl<S> Index<S> for Sample
    where S: AsRef<str>
{
    type Output = Feature;

    fn index(&self, name: S) -> &Self::Output {
        let k = self.column_index[name.as_ref()];
        &self.features[k]
    }
}
