use clap::Parser;
use inquire::{InquireError, Text};
use std::sync::Arc;

use skycast_core::{Config, DEFAULT_CITY, OpenWeather, WeatherSource};

use crate::app::App;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Terminal weather app")]
pub struct Cli {
    /// City for the initial lookup; falls back to the last searched
    /// city, then to the default.
    pub city: Option<String>,

    /// OpenWeather API key; overrides the configured one.
    #[arg(long)]
    pub api_key: Option<String>,

    /// Run the initial lookup and exit instead of prompting.
    #[arg(long)]
    pub once: bool,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        if let Some(key) = self.api_key {
            config.api_key = Some(key);
        }

        let source = OpenWeather::new(config.api_key()?.to_string());
        let config_path = Config::config_file_path().ok();
        let mut app = App::new(config, config_path, Arc::new(source) as Arc<dyn WeatherSource>);

        // Startup behaves like the original page load: explicit city,
        // else the stored one, else the default.
        let first = self
            .city
            .or_else(|| app.last_city().map(str::to_string))
            .unwrap_or_else(|| DEFAULT_CITY.to_string());
        app.lookup(&first).await;

        if self.once {
            return Ok(());
        }

        loop {
            let line = match Text::new("City:").prompt() {
                Ok(line) => line,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
                Err(err) => return Err(err.into()),
            };
            app.lookup(&line).await;
        }

        Ok(())
    }
}
