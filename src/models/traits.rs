use ndarray::{Array1, Array2};
use std::error::Error;
use std::path::Path;

pub trait Model {
    fn train(&mut self, features: &Array2<f64>, targets: &Array1<bool>) -> Result<(), Box<dyn Error>>;
    fn predict(&self, features: &Array2<f64>) -> Result<Array1<bool>, Box<dyn Error>>;
    fn save(&self, path: &Path) -> Result<(), Box<dyn Error>>;
    fn load(&mut self, path: &Path) -> Result<(), Box<dyn Error>>;
}

pub trait ModelFactory {
    type ModelType: Model;

    fn create(params: &crate::config::SvmParams) -> Result<Self::ModelType, Box<dyn Error>>;
}
