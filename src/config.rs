use serde::Deserialize;
use std::fs;
use std::path::Path;
use crate::models::Kernel;
use crate::BoxError;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub data_path: String,
    pub model_path: String,
    pub split_params: SplitParams,
    pub svm_params: SvmParams,
}

impl AsRef<Path> for Config {
    fn as_ref(&self) -> &Path {
        self.data_path.as_ref()
    }
}

#[derive(Debug, Deserialize)]
pub struct SplitParams {
    #[serde(default = "default_test_rate")]
    pub test_rate: f64,
}

/// Hyperparameters for the support-vector classifier. The serde defaults
/// match the retune fallbacks: rbf kernel, degree 3, C = 1.0, coef0 = 0.0.
#[derive(Debug, Clone, Deserialize)]
pub struct SvmParams {
    #[serde(default)]
    pub kernel: Kernel,
    #[serde(default = "default_degree")]
    pub degree: u32,
    #[serde(default = "default_c")]
    pub c: f64,
    #[serde(default)]
    pub coef0: f64,
}

impl Default for SvmParams {
    fn default() -> Self {
        Self {
            kernel: Kernel::default(),
            degree: default_degree(),
            c: default_c(),
            coef0: 0.0,
        }
    }
}

fn default_test_rate() -> f64 {
    0.2
}

fn default_degree() -> u32 {
    3
}

fn default_c() -> f64 {
    1.0
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, BoxError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }
}
