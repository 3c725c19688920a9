use super::traits::{Model, ModelFactory};
use crate::config::SvmParams;
use linfa::dataset::Dataset;
use linfa::prelude::*;
use linfa_svm::Svm;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Width of the gaussian kernel used for the rbf setting.
const RBF_EPS: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kernel {
    Linear,
    Poly,
    #[default]
    Rbf,
}

/// Support-vector classifier for the binary death-event label, backed by
/// linfa-svm. The fitted model is replaced, never mutated, on each training
/// call; `save` overwrites the target file in place.
pub struct SvmModel {
    model: Option<Svm<f64, bool>>,
    params: SvmParams,
}

impl SvmModel {
    pub fn new(params: SvmParams) -> Self {
        Self {
            model: None,
            params,
        }
    }

    pub fn params(&self) -> &SvmParams {
        &self.params
    }
}

impl Model for SvmModel {
    fn train(&mut self, features: &Array2<f64>, targets: &Array1<bool>) -> Result<(), Box<dyn Error>> {
        debug!(params = ?self.params, rows = features.nrows(), "Fitting SVM");

        let dataset = Dataset::new(features.clone(), targets.clone());
        let hyperparams =
            Svm::<f64, bool>::params().pos_neg_weights(self.params.c, self.params.c);
        let hyperparams = match self.params.kernel {
            Kernel::Linear => hyperparams.linear_kernel(),
            Kernel::Poly => {
                hyperparams.polynomial_kernel(self.params.coef0, f64::from(self.params.degree))
            }
            Kernel::Rbf => hyperparams.gaussian_kernel(RBF_EPS),
        };

        self.model = Some(hyperparams.fit(&dataset)?);
        Ok(())
    }

    fn predict(&self, features: &Array2<f64>) -> Result<Array1<bool>, Box<dyn Error>> {
        let model = self.model.as_ref().ok_or("Model not trained")?;
        Ok(model.predict(features))
    }

    fn save(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        let model = self.model.as_ref().ok_or("Model not trained")?;
        let bin = bincode::serialize(model)?;
        fs::write(path, bin)?;
        debug!(path = %path.display(), "Model persisted");
        Ok(())
    }

    fn load(&mut self, path: &Path) -> Result<(), Box<dyn Error>> {
        let bin = fs::read(path)?;
        self.model = Some(bincode::deserialize(&bin)?);
        Ok(())
    }
}

impl ModelFactory for SvmModel {
    type ModelType = Self;

    fn create(params: &SvmParams) -> Result<Self::ModelType, Box<dyn Error>> {
        Ok(Self::new(params.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn separable_data() -> (Array2<f64>, Array1<bool>) {
        let features = array![
            [1.0, 1.0],
            [1.2, 0.8],
            [0.8, 1.1],
            [1.1, 1.3],
            [8.0, 8.0],
            [8.2, 7.9],
            [7.8, 8.1],
            [8.1, 8.3],
        ];
        let labels = array![false, false, false, false, true, true, true, true];
        (features, labels)
    }

    fn linear_params(c: f64) -> SvmParams {
        SvmParams {
            kernel: Kernel::Linear,
            degree: 3,
            c,
            coef0: 0.0,
        }
    }

    #[test]
    fn predict_before_train_fails() {
        let model = SvmModel::new(linear_params(1.0));
        let (features, _) = separable_data();
        assert!(model.predict(&features).is_err());
    }

    #[test]
    fn trains_and_separates_toy_data() {
        let (features, labels) = separable_data();
        let mut model = SvmModel::new(linear_params(1.0));
        model.train(&features, &labels).unwrap();

        let predicted = model.predict(&features).unwrap();
        assert_eq!(predicted, labels);
    }

    #[test]
    fn save_then_load_predicts_identically() {
        let (features, labels) = separable_data();
        let mut model = SvmModel::new(linear_params(1.0));
        model.train(&features, &labels).unwrap();

        let path = std::env::temp_dir().join(format!("svm_roundtrip_{}.bin", std::process::id()));
        model.save(&path).unwrap();

        let mut restored = SvmModel::new(SvmParams::default());
        restored.load(&path).unwrap();

        assert_eq!(
            restored.predict(&features).unwrap(),
            model.predict(&features).unwrap()
        );
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn load_fails_without_model_file() {
        let mut model = SvmModel::new(SvmParams::default());
        let missing = std::env::temp_dir().join("no_such_model_file.bin");
        assert!(model.load(&missing).is_err());
    }
}
