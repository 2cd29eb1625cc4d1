use std::env;

use anyhow::{Context, Result};
use log::info;

use gd_regression::{GradientDescentRegressor, RunConfig};

const RUN_FILE_VAR: &str = "GD_REGRESSION_RUN";

fn main() -> Result<()> {
    env_logger::init();

    let path = env::args()
        .nth(1)
        .or_else(|| env::var(RUN_FILE_VAR).ok())
        .with_context(|| format!("usage: gd-regression <run.json> (or set {RUN_FILE_VAR})"))?;

    let run = RunConfig::from_path(&path).with_context(|| format!("loading run file {path}"))?;
    info!("loaded {} samples from {path}", run.x.len());

    let mut model = GradientDescentRegressor::new(run.x, run.y);
    model
        .fit_with(run.training)
        .context("fitting the regressor")?;

    let diagnostics = model.diagnostics()?;
    info!(
        "mse={} rmse={} r2={:?}",
        diagnostics.mse, diagnostics.rmse, diagnostics.r2
    );

    println!("{}", diagnostics.to_json_pretty()?);

    if !run.predict.is_empty() {
        let predictions = model.predict(run.predict.as_slice())?;
        println!("{}", serde_json::to_string(&predictions.to_vec())?);
    }

    Ok(())
}
