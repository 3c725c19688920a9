use polars::prelude::*;
use std::path::Path;
use anyhow::{Result, Context};
use ndarray::{Array1, Array2};
use tracing::debug;

/// Seed used for the train/test partition.
pub const SPLIT_SEED: u64 = 42;

/// Feature matrices and label vectors for the train/test partition.
/// Labels align positionally with the rows of their feature matrix.
pub struct Split {
    pub train_x: Array2<f64>,
    pub train_y: Array1<bool>,
    pub test_x: Array2<f64>,
    pub test_y: Array1<bool>,
}

/// DataLoader handles loading and row-level preprocessing of the clinical
/// dataset. The expected schema is 12 feature columns followed by a binary
/// death-event label column.
pub struct DataLoader {
    frame: DataFrame,
}

impl DataLoader {
    /// Creates a new DataLoader by eagerly reading a headered CSV file.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        debug!("Loading dataset from {}", path.as_ref().display());

        let frame = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))
            .context("Failed to open dataset file")?
            .finish()
            .context("Failed to parse dataset file")?;

        debug!(shape = ?frame.shape(), "Dataset loaded");

        Ok(Self { frame })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Randomly reorders all rows in place. No seed is used, so the order
    /// differs across runs.
    pub fn shuffle(&mut self) -> Result<()> {
        let frac = Series::new("frac".into(), &[1.0f64]);
        self.frame = self
            .frame
            .sample_frac(&frac, false, true, None)
            .context("Failed to shuffle dataset")?;
        Ok(())
    }

    /// Partitions the dataset into train and test sets. The partition is
    /// deterministic for a given dataset: rows are permuted with a fixed
    /// seed, then the first `round(N * test_rate)` rows become the test set.
    pub fn split(&self, test_rate: f64) -> Result<Split> {
        let height = self.frame.height();
        let test_size = (height as f64 * test_rate).round() as usize;
        let train_size = height - test_size;

        let frac = Series::new("frac".into(), &[1.0f64]);
        let shuffled = self
            .frame
            .sample_frac(&frac, false, true, Some(SPLIT_SEED))
            .context("Failed to permute dataset for splitting")?;

        let test_frame = shuffled.slice(0, test_size);
        let train_frame = shuffled.slice(test_size as i64, train_size);

        debug!(train_size, test_size, "Dataset split");

        let (train_x, train_y) = to_features_and_labels(&train_frame)?;
        let (test_x, test_y) = to_features_and_labels(&test_frame)?;

        Ok(Split {
            train_x,
            train_y,
            test_x,
            test_y,
        })
    }
}

/// Splits a frame into a feature matrix (all columns but the last) and a
/// label vector (the last column, where 1 is the positive class). Every
/// column is cast to f64 first for consistency.
pub fn to_features_and_labels(frame: &DataFrame) -> Result<(Array2<f64>, Array1<bool>)> {
    let frame = frame
        .clone()
        .lazy()
        .select([col("*").cast(DataType::Float64)])
        .collect()
        .context("Failed to cast dataset columns to f64")?;

    let columns: Vec<Vec<f64>> = frame
        .iter()
        .map(|series| {
            Ok(series
                .f64()?
                .into_iter()
                .map(|value| value.unwrap_or(0.0))
                .collect())
        })
        .collect::<std::result::Result<_, PolarsError>>()?;

    if columns.len() < 2 {
        anyhow::bail!(
            "Dataset must have at least one feature column and a label column, got {} columns",
            columns.len()
        );
    }

    let n_rows = frame.height();
    let n_features = columns.len() - 1;

    // Transpose from column-major to the row-major layout the model expects.
    let mut features = Array2::zeros((n_rows, n_features));
    for row_idx in 0..n_rows {
        for col_idx in 0..n_features {
            features[[row_idx, col_idx]] = columns[col_idx][row_idx];
        }
    }

    let labels = Array1::from_iter(columns[n_features].iter().map(|&value| value != 0.0));

    Ok((features, labels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn temp_csv(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{}_{}.csv", name, std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    fn toy_csv(name: &str) -> PathBuf {
        temp_csv(
            name,
            "f0,f1,death_event\n\
             1.0,2.0,0\n\
             8.0,9.0,1\n\
             1.5,2.5,0\n\
             7.5,8.5,1\n",
        )
    }

    #[test]
    fn load_fails_on_missing_file() {
        let loader = DataLoader::new("no_such_dataset.csv");
        assert!(loader.is_err());
    }

    #[test]
    fn split_sizes_sum_to_dataset_size() {
        let path = toy_csv("split_sizes");
        let loader = DataLoader::new(&path).unwrap();
        let split = loader.split(0.25).unwrap();

        assert_eq!(split.test_x.nrows(), 1);
        assert_eq!(split.train_x.nrows(), 3);
        assert_eq!(split.train_x.nrows() + split.test_x.nrows(), loader.height());
        assert_eq!(split.train_y.len(), split.train_x.nrows());
        assert_eq!(split.test_y.len(), split.test_x.nrows());
    }

    #[test]
    fn split_is_deterministic_across_calls() {
        let path = toy_csv("split_deterministic");
        let loader = DataLoader::new(&path).unwrap();

        let first = loader.split(0.5).unwrap();
        let second = loader.split(0.5).unwrap();

        assert_eq!(first.test_x, second.test_x);
        assert_eq!(first.test_y, second.test_y);
        assert_eq!(first.train_x, second.train_x);
        assert_eq!(first.train_y, second.train_y);
        assert_eq!(first.test_x.nrows(), 2);
        assert_eq!(first.train_x.nrows(), 2);
    }

    #[test]
    fn shuffle_preserves_row_count() {
        let path = toy_csv("shuffle_rows");
        let mut loader = DataLoader::new(&path).unwrap();
        let height = loader.height();

        loader.shuffle().unwrap();

        assert_eq!(loader.height(), height);
        assert_eq!(loader.frame().width(), 3);
    }

    #[test]
    fn labels_follow_last_column() {
        let path = toy_csv("label_column");
        let loader = DataLoader::new(&path).unwrap();
        let (features, labels) = to_features_and_labels(loader.frame()).unwrap();

        assert_eq!(features.dim(), (4, 2));
        assert_eq!(labels.to_vec(), vec![false, true, false, true]);
    }

    #[test]
    fn single_column_frame_is_rejected() {
        let path = temp_csv("single_column", "death_event\n0\n1\n");
        let loader = DataLoader::new(&path).unwrap();
        assert!(to_features_and_labels(loader.frame()).is_err());
    }
}
