pub mod config;
pub mod data_loader;
pub mod error;
pub mod metrics;
pub mod models;
pub mod predictor;

pub use config::Config;
pub use data_loader::DataLoader;
pub use error::PredictorError;
pub use metrics::Evaluation;
pub use models::{Model, SvmModel};
pub use predictor::DeathEventPredictor;

pub type BoxError = Box<dyn std::error::Error>;
