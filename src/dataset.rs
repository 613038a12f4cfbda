//! Named dataset loading and train/test partitioning.

use std::fmt;
use std::io;
use std::path::Path;
use std::str::FromStr;

use polars::prelude::*;
use rand::prelude::*;
use rand_distr::Normal;

use crate::constants::MNIST_SAMPLE_CAP;
use crate::error::{Error, Result};
use crate::sample::{Feature, Sample};

const SYNTHETIC_SAMPLES:  usize = 600;
const SYNTHETIC_FEATURES: usize = 6;
const SYNTHETIC_SHIFT:    f64 = 2.0;

/// Identifiers of the supported datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetId {
    /// Wisconsin breast-cancer diagnostics, read from `data/wdbc.csv`.
    /// The `class` column holds `1` for benign and `0` for malignant.
    Wisc,
    /// MNIST digits, read from `data/mnist_784.csv`.
    /// Digits `0..=4` become the positive class, `5..=9` the negative
    /// one. At most [`MNIST_SAMPLE_CAP`] instances are kept,
    /// chosen by a seeded shuffle.
    Mnist,
    /// Two spherical Gaussian clusters generated in process.
    /// Needs no files on disk.
    Synthetic,
}

impl DatasetId {
    /// All supported identifiers, in CLI order.
    pub const ALL: [Self; 3] = [Self::Wisc, Self::Mnist, Self::Synthetic];

    /// The identifier as written on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Wisc => "wisc",
            Self::Mnist => "mnist",
            Self::Synthetic => "synthetic",
        }
    }

    /// Load the dataset. The returned sample already has its target
    /// in `{+1, -1}` spin encoding.
    pub fn load<R: Rng>(&self, rng: &mut R) -> Result<Sample> {
        let sample = match self {
            Self::Wisc => {
                load_csv("data/wdbc.csv", "class")?
                    .binarize_target(|y| y == 1.0)
            },
            Self::Mnist => {
                let sample = load_csv("data/mnist_784.csv", "class")?
                    .binarize_target(|y| y <= 4.0);
                subsample(sample, MNIST_SAMPLE_CAP, rng)
            },
            Self::Synthetic => {
                synthetic(SYNTHETIC_SAMPLES, SYNTHETIC_FEATURES, rng)
            },
        };

        let (n_sample, n_feature) = sample.shape();
        log::info!(
            "loaded dataset `{self}`: {n_sample} samples, \
             {n_feature} features"
        );
        Ok(sample)
    }
}

impl FromStr for DatasetId {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        Self::ALL.iter()
            .copied()
            .find(|id| id.name() == name)
            .ok_or_else(|| Error::UnknownDataset(name.to_string()))
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Split `sample` into a training part holding the first
/// `train_fraction` of the shuffled instances and a test part holding
/// the rest. Fails with [`Error::EmptySplit`] when a side is empty.
pub fn partition<R: Rng>(
    sample: &Sample,
    train_fraction: f64,
    rng: &mut R,
) -> Result<(Sample, Sample)>
{
    assert!(
        0f64 < train_fraction && train_fraction < 1f64,
        "Training fraction should be in `(0, 1)`."
    );

    let (n_sample, _) = sample.shape();
    // Truncation after a small nudge, so 2/3 of 30 is 20, not 19.
    let train_size = (train_fraction * n_sample as f64 + 1e-9) as usize;

    if train_size == 0 {
        return Err(Error::EmptySplit("training"));
    }
    if train_size >= n_sample {
        return Err(Error::EmptySplit("test"));
    }

    let mut ix = (0..n_sample).collect::<Vec<_>>();
    ix.shuffle(rng);

    let train = sample.subset(&ix[..train_size]);
    let test = sample.subset(&ix[train_size..]);
    Ok((train, test))
}

/// Keep at most `cap` instances of `sample`, chosen by shuffling.
fn subsample<R: Rng>(sample: Sample, cap: usize, rng: &mut R) -> Sample {
    let (n_sample, _) = sample.shape();
    if n_sample <= cap { return sample; }

    let mut ix = (0..n_sample).collect::<Vec<_>>();
    ix.shuffle(rng);
    ix.truncate(cap);
    sample.subset(ix)
}

/// Generate two spherical Gaussian clusters centered at
/// `(+SYNTHETIC_SHIFT, ...)` and `(-SYNTHETIC_SHIFT, ...)`,
/// labeled `+1` and `-1`. The first `n_sample / 2` instances are
/// positive, so even `n_sample` gives balanced classes.
pub fn synthetic<R: Rng>(
    n_sample: usize,
    n_feature: usize,
    rng: &mut R,
) -> Sample
{
    let dist = Normal::<f64>::new(0f64, 1f64).unwrap();

    let n_positive = n_sample / 2;
    let target = (0..n_sample)
        .map(|i| if i < n_positive { 1f64 } else { -1f64 })
        .collect::<Vec<_>>();

    let features = (1..=n_feature)
        .map(|j| {
            let vals = target.iter()
                .map(|y| y * SYNTHETIC_SHIFT + dist.sample(rng))
                .collect::<Vec<_>>();
            Feature::from_vals(format!("x{j}"), vals)
        })
        .collect::<Vec<_>>();

    // Shapes match by construction.
    Sample::from_columns(features, target)
        .unwrap_or_else(|e| panic!("synthetic sample is malformed: {e}"))
}

fn load_csv(path: &str, target: &str) -> Result<Sample> {
    let path = Path::new(path);
    if !path.exists() {
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!(
                "dataset file `{path}` not found. \
                 See the README for how to fetch it.",
                path = path.display(),
            ),
        )));
    }

    let mut data = CsvReader::from_path(path)?
        .has_header(true)
        .finish()?;
    let target = data.drop_in_place(target)?;
    Sample::from_dataframe(data, target)
}
