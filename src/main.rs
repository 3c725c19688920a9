use heart_failure_svm::{config::Config, DeathEventPredictor};
use tracing::{debug, info, instrument};

#[instrument]
fn main() -> Result<(), heart_failure_svm::BoxError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("Starting heart failure death event prediction");

    let config_path = "config.toml";
    debug!("Loading config from path: {}", config_path);
    let config = Config::load(config_path)?;
    debug!(?config, "Config loaded successfully");

    let mut predictor = DeathEventPredictor::new(&config.model_path);

    debug!("Loading dataset from {}", config.data_path);
    predictor.load_dataset(&config.data_path)?;
    predictor.shuffle()?;
    predictor.split(config.split_params.test_rate)?;

    debug!("Training baseline linear model");
    predictor.train()?;

    let y_pred = predictor.predict(predictor.test_features()?)?;
    let result = predictor.evaluate(predictor.test_labels()?, &y_pred)?;
    println!("Accuracy : {}", result.accuracy);
    println!("Precision : {}", result.precision);
    println!("Recall : {}", result.recall);

    debug!("Retuning model with configured hyperparameters");
    predictor.retune(
        Some(config.svm_params.kernel),
        Some(config.svm_params.degree),
        Some(config.svm_params.c),
        Some(config.svm_params.coef0),
    )?;

    let y_pred = predictor.predict(predictor.test_features()?)?;
    let result = predictor.evaluate(predictor.test_labels()?, &y_pred)?;
    println!("Accuracy : {}", result.accuracy);
    println!("Precision : {}", result.precision);
    println!("Recall : {}", result.recall);

    info!(model = %predictor.model_path().display(), "Run complete");

    Ok(())
}
