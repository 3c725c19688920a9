use crate::config::SvmParams;
use crate::data_loader::{DataLoader, Split};
use crate::error::PredictorError;
use crate::metrics::Evaluation;
use crate::models::{Kernel, Model, ModelFactory, SvmModel};
use crate::BoxError;
use ndarray::{Array1, Array2};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Sequences the death-event prediction workflow: load, shuffle, split,
/// train, predict, evaluate, retune. Each training call persists the fitted
/// model to `model_path`, and every prediction reloads it from there, so
/// predictions always reflect the last successfully persisted model.
pub struct DeathEventPredictor {
    model_path: PathBuf,
    loader: Option<DataLoader>,
    split: Option<Split>,
    model: Option<SvmModel>,
}

impl DeathEventPredictor {
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: model_path.into(),
            loader: None,
            split: None,
            model: None,
        }
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    /// Reads the dataset from a headered CSV file.
    pub fn load_dataset<P: AsRef<Path>>(&mut self, path: P) -> Result<(), BoxError> {
        let loader = DataLoader::new(path)?;
        info!(rows = loader.height(), "Dataset loaded");
        self.loader = Some(loader);
        Ok(())
    }

    /// Randomly reorders the dataset rows. Unseeded, so the order differs
    /// across runs.
    pub fn shuffle(&mut self) -> Result<(), BoxError> {
        let loader = self
            .loader
            .as_mut()
            .ok_or_else(|| PredictorError::InvalidState("dataset has not been loaded".to_string()))?;
        loader.shuffle()?;
        Ok(())
    }

    /// Partitions the dataset into train and test sets with a fixed seed.
    pub fn split(&mut self, test_rate: f64) -> Result<(), BoxError> {
        let loader = self
            .loader
            .as_ref()
            .ok_or_else(|| PredictorError::InvalidState("dataset has not been loaded".to_string()))?;
        let split = loader.split(test_rate)?;
        info!(
            train_size = split.train_x.nrows(),
            test_size = split.test_x.nrows(),
            "Dataset split"
        );
        self.split = Some(split);
        Ok(())
    }

    /// Fits a linear-kernel classifier with C = 3 on the training split and
    /// persists it.
    pub fn train(&mut self) -> Result<(), BoxError> {
        let params = SvmParams {
            kernel: Kernel::Linear,
            c: 3.0,
            ..SvmParams::default()
        };
        self.fit_and_persist(params)
    }

    /// Rebuilds the classifier with the given hyperparameters, refits it on
    /// the training split, and persists it over the previous model. Omitted
    /// hyperparameters fall back to rbf kernel, degree 3, C = 1.0, coef0 = 0.0.
    pub fn retune(
        &mut self,
        kernel: Option<Kernel>,
        degree: Option<u32>,
        c: Option<f64>,
        coef0: Option<f64>,
    ) -> Result<(), BoxError> {
        let defaults = SvmParams::default();
        let params = SvmParams {
            kernel: kernel.unwrap_or(defaults.kernel),
            degree: degree.unwrap_or(defaults.degree),
            c: c.unwrap_or(defaults.c),
            coef0: coef0.unwrap_or(defaults.coef0),
        };
        self.fit_and_persist(params)
    }

    /// Reloads the persisted model from disk and predicts labels for the
    /// given feature rows. Fails if no model file exists.
    pub fn predict(&self, features: &Array2<f64>) -> Result<Array1<bool>, BoxError> {
        let mut model = SvmModel::new(SvmParams::default());
        model.load(&self.model_path)?;
        model.predict(features)
    }

    /// Computes accuracy, precision, and recall, treating label 1 (`true`)
    /// as the positive class.
    pub fn evaluate(
        &self,
        y_true: &Array1<bool>,
        y_pred: &Array1<bool>,
    ) -> Result<Evaluation, BoxError> {
        Ok(Evaluation::compute(y_true, y_pred)?)
    }

    pub fn train_features(&self) -> Result<&Array2<f64>, PredictorError> {
        self.split
            .as_ref()
            .map(|split| &split.train_x)
            .ok_or_else(|| PredictorError::InvalidState("dataset has not been split".to_string()))
    }

    pub fn train_labels(&self) -> Result<&Array1<bool>, PredictorError> {
        self.split
            .as_ref()
            .map(|split| &split.train_y)
            .ok_or_else(|| PredictorError::InvalidState("dataset has not been split".to_string()))
    }

    pub fn test_features(&self) -> Result<&Array2<f64>, PredictorError> {
        self.split
            .as_ref()
            .map(|split| &split.test_x)
            .ok_or_else(|| PredictorError::InvalidState("dataset has not been split".to_string()))
    }

    pub fn test_labels(&self) -> Result<&Array1<bool>, PredictorError> {
        self.split
            .as_ref()
            .map(|split| &split.test_y)
            .ok_or_else(|| PredictorError::InvalidState("dataset has not been split".to_string()))
    }

    fn fit_and_persist(&mut self, params: SvmParams) -> Result<(), BoxError> {
        let split = self
            .split
            .as_ref()
            .ok_or_else(|| PredictorError::InvalidState("dataset has not been split".to_string()))?;

        let mut model = SvmModel::create(&params)?;
        model.train(&split.train_x, &split.train_y)?;
        model.save(&self.model_path)?;
        debug!(params = ?params, path = %self.model_path.display(), "Model trained and persisted");

        self.model = Some(model);
        Ok(())
    }
}
