use std::path::Path;

use crate::error::Result;
use super::sample_struct::Sample;

/// Builder-style CSV reader producing a [`Sample`].
/// Only comma-separated files are supported.
///
/// # Example
/// ```no_run
/// use spinboost::SampleReader;
///
/// # fn main() -> spinboost::Result<()> {
/// let sample = SampleReader::new()
///     .file("/path/to/csv/file.csv")
///     .has_header(true)
///     .target_feature("class")
///     .read()?;
/// # Ok(())
/// # }
/// ```
pub struct SampleReader<P, S> {
    path: Option<P>,
    has_header: bool,
    target_name: Option<S>,
}

impl<P, S> SampleReader<P, S> {
    /// Construct an empty reader.
    /// No file or target column is assigned yet.
    pub fn new() -> Self {
        Self {
            path: None,
            has_header: false,
            target_name: None,
        }
    }

    /// Name the CSV file to read.
    pub fn file(mut self, path: P) -> Self {
        self.path = Some(path);
        self
    }

    /// Tell the reader whether the first row is a header.
    /// Default value is `false.`
    pub fn has_header(mut self, flag: bool) -> Self {
        self.has_header = flag;
        self
    }

    /// Name the column holding the class labels.
    pub fn target_feature(mut self, column: S) -> Self {
        self.target_name = Some(column);
        self
    }

    /// Consume the reader and load the configured file
    /// into a [`Sample`] with the target column assigned.
    pub fn read(self) -> Result<Sample>
        where P: AsRef<Path>,
              S: AsRef<str>,
    {
        let path = self.path.unwrap_or_else(|| {
            panic!("No file to read. Name one with `SampleReader::file`.")
        });
        let target = self.target_name.unwrap_or_else(|| panic!(
            "No target column chosen. \
             Name one with `SampleReader::target_feature`."
        ));

        let sample = Sample::from_csv(path, self.has_header)?
            .set_target(target.as_ref());
        Ok(sample)
    }
}

impl<P, S> Default for SampleReader<P, S> {
    fn default() -> Self {
        Self::new()
    }
}
