pub const DEFAULT_ENSEMBLE_SIZE: usize = 35;
pub const DEFAULT_TREE_DEPTH:    usize =  3;
pub const DEFAULT_NUM_READS:     usize = 3_000;
pub const DEFAULT_SPIN_REVERSALS: usize = 10;
pub const DEFAULT_LAMBDA:          f64 = 1f64;

pub const TRAIN_FRACTION:          f64 = 2f64 / 3f64;
pub const MNIST_SAMPLE_CAP:      usize = 5_000;

pub const NUMERIC_TOLERANCE:       f64 = 1e-5;
pub const PERTURBATION:            f64 = 1e-10;

pub const BUFFER_SIZE:           usize = 256;
pub const EXHAUSTIVE_VARIABLE_LIMIT: usize = 24;

pub const TABLE_RULE_WIDTH:      usize = 28;
pub const TABLE_NAME_WIDTH:      usize = 14;
pub const TABLE_ACCURACY_WIDTH:  usize =  7;
