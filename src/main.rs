use anyhow::{Context, Result};
use catview::app::{App, AppEvent};
use catview::catalog::CatalogClient;
use catview::config::Config;
use catview::theme::ThemeVariant;
use catview::ui;
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Get the config directory path (~/.config/catview/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("catview"))
}

#[derive(Parser, Debug)]
#[command(
    name = "catview",
    about = "Terminal product catalog browser (edits stay local)"
)]
struct Args {
    /// Config file (default: ~/.config/catview/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Catalog service root, overrides `base_url` from the config file
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Category fetched for the dropdown, overrides `category` from the config file
    #[arg(long, value_name = "NAME")]
    category: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout belongs to the TUI
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => get_config_dir()?.join("config.toml"),
    };
    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(category) = args.category {
        config.category = category;
    }

    let client = CatalogClient::new(&config.base_url)
        .with_context(|| format!("Invalid catalog base URL '{}'", config.base_url))?;

    let mut app = App::new(client, config.category.clone());

    for warning in app.keybindings.apply_overrides(&config.keybindings) {
        tracing::warn!("{}", warning);
    }

    match ThemeVariant::from_str_name(&config.theme) {
        Some(variant) => app.set_theme(variant),
        None => tracing::warn!(theme = %config.theme, "Unknown theme, using dark"),
    }

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    ui::run(&mut app, event_tx, event_rx).await?;

    Ok(())
}
