use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, Text};
use weather_widget_core::{
    Config, SearchController, WidgetView,
    view::{DESCRIPTION, PLACEHOLDER, TITLE},
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-widget", version, about = "Current weather for a city")]
pub struct Cli {
    /// WeatherAPI.com key; overrides the configured one.
    #[arg(long, env = "WEATHER_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com key in the config file.
    Configure,

    /// Look up the weather once and print it.
    Search {
        /// City or location name.
        location: String,
    },

    /// Keep prompting for locations until cancelled.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Search { location } => {
                let mut controller = build_controller(self.api_key)?;
                controller.set_query(location);
                search(&mut controller).await;
                Ok(())
            }
            Command::Interactive => {
                let mut controller = build_controller(self.api_key)?;
                interactive(&mut controller).await
            }
        }
    }
}

fn build_controller(api_key: Option<String>) -> anyhow::Result<SearchController> {
    let config = Config::load()?.with_api_key_override(api_key);
    SearchController::from_config(&config)
}

fn configure() -> anyhow::Result<()> {
    let api_key = Password::new("WeatherAPI.com key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let mut config = Config::load()?;
    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn search(controller: &mut SearchController) {
    let query = controller.query().to_string();
    if let Some(pending) = controller.begin_search(&query) {
        eprintln!("{}", controller.view().button_label());
        let outcome = pending.run().await;
        controller.apply(outcome);
    }
    render(&controller.view());
}

async fn interactive(controller: &mut SearchController) -> anyhow::Result<()> {
    println!("{TITLE}");
    println!("{DESCRIPTION}");

    loop {
        let input = match Text::new("Location:").with_placeholder(PLACEHOLDER).prompt() {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read location"),
        };

        controller.set_query(input);
        search(controller).await;
        println!();
    }

    Ok(())
}

fn render(view: &WidgetView) {
    if let Some(error) = view.error_message {
        println!("{error}");
    }
    if let Some(messages) = &view.messages {
        println!("{}", messages.temperature);
        println!("{}", messages.condition);
        println!("{}", messages.location);
    }
}
