use std::sync::Arc;

use sibyl::{DateRange, ForecastRequest, Forecaster, LinearModel, Symbol};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Logging: RUST_LOG=sibyl=debug shows fetch and alignment details.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // 2. Load the predictor once. Pass a path to use a saved artifact;
    //    otherwise fall back to a last-value model over 60-day windows.
    let predictor = match std::env::args().nth(1) {
        Some(path) => sibyl::load_model(path)?,
        None => Arc::new(LinearModel::last_value(60)?),
    };

    // 3. Build the forecaster around the mock source.
    let forecaster = Forecaster::builder()
        .with_source(Arc::new(sibyl_mock::MockSource::new()))
        .with_predictor(predictor)
        .time_step(60)
        .build()?;

    // 4. Forecast and print the aligned series.
    let range = DateRange::new(
        chrono::NaiveDate::from_ymd_opt(2020, 1, 1).ok_or("bad date")?,
        chrono::NaiveDate::from_ymd_opt(2021, 1, 1).ok_or("bad date")?,
    )?;
    let req = ForecastRequest::new(Symbol::new("AAPL")?, range);
    let report = forecaster.forecast(&req).await?;

    println!(
        "{}: {} observations, {} predictions (first {} used as warm-up)",
        report.symbol,
        report.history.len(),
        report.predictions.len(),
        report.warmup_len()
    );
    for p in report.reported().iter().rev().take(10).rev() {
        println!(
            "{}  actual={:>8.2}  predicted={:>8.2}",
            p.ts.date_naive(),
            p.actual,
            p.predicted
        );
    }
    if let (Some(mae), Some(rmse)) = (
        report.mean_absolute_error(),
        report.root_mean_squared_error(),
    ) {
        println!("MAE={mae:.4} RMSE={rmse:.4}");
    }

    Ok(())
}
