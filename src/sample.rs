//! Column-wise training data and the CSV reader producing it.

pub(crate) mod feature;
pub(crate) mod sample_struct;
pub(crate) mod reader;

pub use self::feature::Feature;
pub use self::sample_struct::Sample;
pub use self::reader::SampleReader;
