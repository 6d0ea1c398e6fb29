use std::sync::Arc;

use anyhow::Result;
use shoreline_core::Config;
use shoreline_panel::{ForecastPanel, MemoryTarget, WeatherPanel};
use shoreline_weather::ConfiguredLocation;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize core
    shoreline_core::init()?;

    let (config, _validation) = Config::load_validated()?;
    tracing::info!("Config directory: {}", config.config_dir.display());

    let location = ConfiguredLocation::from_config(&config.location)?;
    let weather_target = Arc::new(MemoryTarget::new());
    let panel = WeatherPanel::from_config(&config, location, weather_target.clone())?;

    panel.load().await;
    panel.settle().await;

    println!("<section class=\"weather-widget\">");
    print!("{}", weather_target.markup());
    println!("</section>");

    if config.forecast.enabled {
        let forecast_target = Arc::new(MemoryTarget::new());
        let forecast = ForecastPanel::from_config(&config, forecast_target.clone())?;
        forecast.load().await;

        println!("<section class=\"forecast-widget\">");
        print!("{}", forecast_target.markup());
        println!("</section>");
    }

    Ok(())
}
