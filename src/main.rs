mod render;

use city_match::config::Settings;
use city_match::models::{DataView, Dimension};
use city_match::services::{load_or_default, CatalogError, CityCatalog, JsonFileStore, StateStore, StoreError};
use city_match::{Action, AppState, CityMatch};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to render configuration: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error("No city named '{0}' in the catalog")]
    UnknownCity(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "city-match",
    about = "Rank candidate cities against what matters to you",
    version
)]
struct Cli {
    /// Configuration file (defaults to config/default.toml + config/local.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Override the configured city catalog
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank the catalog against your priorities (default command)
    Rank(RankArgs),
    /// Show the catalog's min/mid/max for every dimension
    Ranges,
    /// Show one city and where it sits in the catalog
    Show {
        /// City name, e.g. "Plano, TX"
        city: String,
    },
    /// Print the effective configuration
    Config,
    /// Forget saved priorities and settings
    Reset,
}

#[derive(Args, Debug, Default)]
struct RankArgs {
    /// Target median home price
    #[arg(long)]
    affordability: Option<f64>,
    /// Target happiness score
    #[arg(long)]
    happiness: Option<f64>,
    /// Target Republican vote share (percent)
    #[arg(long)]
    politics: Option<f64>,
    /// Leave a dimension out of the ranking
    #[arg(long, value_name = "DIMENSION")]
    disable: Vec<Dimension>,
    /// Put a dimension back into the ranking
    #[arg(long, value_name = "DIMENSION")]
    enable: Vec<Dimension>,
    /// Record interest in job search (on/off)
    #[arg(long, value_parser = clap::builder::BoolishValueParser::new())]
    job_search: Option<bool>,
    /// Number of cities to list
    #[arg(long)]
    max_results: Option<usize>,
    /// table-view, photo-view, chart-view or map-view
    #[arg(long)]
    view: Option<DataView>,
    /// Assume no network; photo and map views are unavailable
    #[arg(long)]
    offline: bool,
    /// Print the results as JSON
    #[arg(long)]
    json: bool,
    /// Do not save the resulting state
    #[arg(long)]
    no_save: bool,
}

impl RankArgs {
    fn actions(&self, num_cities: usize) -> Vec<Action> {
        let mut actions = Vec::new();

        for dimension in &self.enable {
            actions.push(Action::SetPriorityEnabled(*dimension, true));
        }
        for dimension in &self.disable {
            actions.push(Action::SetPriorityEnabled(*dimension, false));
        }

        let targets = [
            (Dimension::Affordability, self.affordability),
            (Dimension::Happiness, self.happiness),
            (Dimension::Politics, self.politics),
        ];
        for (dimension, value) in targets {
            if let Some(value) = value {
                actions.push(Action::SetPriorityValue(dimension, value));
            }
        }

        if let Some(enabled) = self.job_search {
            actions.push(Action::SetJobSearch(enabled));
        }
        if let Some(max_results) = self.max_results {
            actions.push(Action::SetMaxResults(max_results.min(num_cities)));
        }
        if let Some(view) = self.view {
            actions.push(Action::SetDataView(view));
        }

        actions
    }
}

fn init_logging(settings: &Settings) {
    // LOG_LEVEL / LOG_FORMAT win over the config file
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let filter = EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    match log_format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "compact" => subscriber.compact().init(),
        _ => subscriber.json().init(),
    }
}

/// Config file defaults as actions
fn configured_actions(settings: &Settings, num_cities: usize, online: bool) -> Vec<Action> {
    let mut actions = vec![
        Action::SetMaxResults(settings.results.max_results.min(num_cities)),
        Action::SetLocale(settings.settings.locale.clone()),
        Action::SetCountryCode(settings.settings.country_code.clone()),
    ];
    match settings.results.data_view.parse::<DataView>() {
        Ok(view) if view.is_available(online) => actions.push(Action::SetDataView(view)),
        Ok(view) => debug!("Configured {} unavailable offline, using the fallback", view),
        Err(err) => warn!("Ignoring configured data view: {}", err),
    }
    actions
}

/// Config file defaults, applied before persisted state is restored
fn configured_state(engine: &CityMatch, settings: &Settings, online: bool) -> AppState {
    let actions = configured_actions(settings, engine.catalog().len(), online);
    let (state, rejected) = engine.initial_state(online).apply_all(actions);
    if rejected > 0 {
        warn!("{} configured default(s) were rejected", rejected);
    }
    state
}

fn rank(engine: &CityMatch, settings: &Settings, args: &RankArgs) -> Result<(), CliError> {
    let online = !args.offline;
    let store = JsonFileStore::new(&settings.storage.state_path);

    let state = configured_state(engine, settings, online).restored(&load_or_default(&store));
    let (state, rejected) = state.apply_all(args.actions(engine.catalog().len()));
    if rejected > 0 {
        warn!("{} option(s) were out of range and left unchanged", rejected);
    }

    let response = engine.response(&state);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print!("{}", render::results(&response, state.settings().currency()));
    }

    if !args.no_save {
        match store.save(&state.persisted()) {
            Ok(()) => info!("State saved to {}", store.path().display()),
            Err(err) => warn!("State not saved: {}", err),
        }
    }

    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    if let Some(path) = cli.catalog {
        settings.catalog.path = path;
    }

    init_logging(&settings);

    let command = cli.command.unwrap_or(Command::Rank(RankArgs::default()));

    match command {
        Command::Config => {
            print!("{}", settings.to_toml()?);
            Ok(())
        }
        Command::Reset => {
            let store = JsonFileStore::new(&settings.storage.state_path);
            store.clear()?;
            info!("Cleared saved state at {}", store.path().display());
            Ok(())
        }
        Command::Ranges => {
            let engine = CityMatch::new(CityCatalog::load(&settings.catalog.path)?)?;
            print!("{}", render::ranges(engine.ranges()));
            Ok(())
        }
        Command::Show { city } => {
            let engine = CityMatch::new(CityCatalog::load(&settings.catalog.path)?)?;
            let found = engine
                .catalog()
                .get(&city)
                .ok_or_else(|| CliError::UnknownCity(city.clone()))?;
            let state = configured_state(&engine, &settings, true)
                .restored(&load_or_default(&JsonFileStore::new(&settings.storage.state_path)));
            print!("{}", render::profile(&engine.profile(found), state.settings().currency()));
            Ok(())
        }
        Command::Rank(args) => {
            let engine = CityMatch::new(CityCatalog::load(&settings.catalog.path)?)?;
            rank(&engine, &settings, &args)
        }
    }
}

fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_rank_flags() {
        let cli = Cli::parse_from([
            "city-match",
            "rank",
            "--affordability",
            "300000",
            "--disable",
            "politics",
            "--job-search",
            "on",
            "--view",
            "table-view",
        ]);

        let Some(Command::Rank(args)) = cli.command else {
            panic!("expected rank command");
        };
        assert_eq!(args.affordability, Some(300000.0));
        assert_eq!(args.disable, vec![Dimension::Politics]);
        assert_eq!(args.job_search, Some(true));
        assert_eq!(args.view, Some(DataView::TableView));
    }

    #[test]
    fn test_rank_actions_clamp_max_results() {
        let args = RankArgs {
            max_results: Some(50),
            ..Default::default()
        };
        assert_eq!(args.actions(12), vec![Action::SetMaxResults(12)]);
    }

    #[test]
    fn test_rejects_unknown_dimension() {
        let parsed = Cli::try_parse_from(["city-match", "rank", "--disable", "weather"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_offline_skips_network_view_default() {
        let settings = Settings::default();

        let online = configured_actions(&settings, 14, true);
        assert!(online.contains(&Action::SetDataView(DataView::PhotoView)));

        let offline = configured_actions(&settings, 14, false);
        assert!(!offline
            .iter()
            .any(|action| matches!(action, Action::SetDataView(_))));
        assert_eq!(offline.len(), 3);
    }
}
