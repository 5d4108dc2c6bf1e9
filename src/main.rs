use anyhow::{Context, Result};
use clap::Parser;
use idioms::animals::{AnimalFactory, AnimalKind, AnimalListener};
use idioms::config::Config;
use idioms::error::ConfigError;
use idioms::observer::{JsonLinesObserver, ObserverHandle, SharedRegistry};
use idioms::singleton;
use log::{error, info, warn};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

/// Command-line arguments for the observer demo
#[derive(Parser)]
#[command(
    name = "idioms",
    about = "Observer, factory and singleton patterns in one small demo",
    long_about = "Builds animals from category labels, attaches them as observers to the \
                  process-wide registry and broadcasts messages to them in order."
)]
struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Configuration file path (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(
        short,
        long,
        help = "Enable verbose logging output (sets RUST_LOG=debug)"
    )]
    verbose: bool,

    /// Stream every notification to stdout as JSON
    #[arg(long)]
    json: bool,

    /// Animal category to attach, repeatable; replaces demo.animals
    #[arg(short, long = "animal", value_name = "LABEL")]
    animals: Vec<String>,

    /// Message to broadcast, repeatable; replaces demo.messages
    #[arg(short, long = "message", value_name = "TEXT")]
    messages: Vec<String>,
}

impl Cli {
    /// Validate the CLI arguments
    fn validate(&self) -> Result<(), String> {
        if let Some(ref config_path) = self.config {
            // Missing files fall back to defaults in load_config
            if config_path.exists() && !config_path.is_file() {
                return Err(format!(
                    "Configuration path is not a file: {}",
                    config_path.display()
                ));
            }
        }

        for label in &self.animals {
            label
                .parse::<AnimalKind>()
                .map_err(|e| format!("Invalid --animal value: {}", e))?;
        }

        if self.messages.iter().any(|m| m.is_empty()) {
            return Err("--message values must not be empty".to_string());
        }

        Ok(())
    }

    /// Apply command-line overrides on top of the loaded configuration
    fn apply_overrides(&self, config: &mut Config) {
        if !self.animals.is_empty() {
            config.demo.animals = self.animals.clone();
        }
        if !self.messages.is_empty() {
            config.demo.messages = self.messages.clone();
            config.demo.detach_first_after = config
                .demo
                .detach_first_after
                .min(config.demo.messages.len());
        }
    }
}

/// Load configuration from file or use defaults
fn load_config(config_path: Option<&PathBuf>) -> Config {
    match config_path {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            match Config::from_file(path) {
                Ok(config) => config,
                Err(ConfigError::ReadError(e)) => {
                    warn!("Configuration file not found or unreadable ({}), using defaults", e);
                    Config::default()
                }
                Err(e) => {
                    error!("Configuration error in '{}': {}", path.display(), e);
                    warn!("Using default configuration due to invalid config file");
                    Config::default()
                }
            }
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    }
}

/// Run the demo on the process-wide registry and print every transcript
fn run(config: &Config, json: bool) -> Result<()> {
    let registry = singleton::init(config.registry.delivery)
        .context("failed to initialize the global registry")?;
    let json_sink: Option<Box<dyn Write + Send>> = if json {
        Some(Box::new(std::io::stdout()))
    } else {
        None
    };

    for listener in run_with(registry, config, json_sink)? {
        for line in listener.transcript() {
            println!("{}", line);
        }
    }

    Ok(())
}

/// Run the attach / notify / detach scenario described by `config` on `registry`
///
/// Listeners are returned in attach order. When `json_sink` is set, every
/// notification is also written to it as a JSON line.
fn run_with(
    registry: &SharedRegistry<String>,
    config: &Config,
    json_sink: Option<Box<dyn Write + Send>>,
) -> Result<Vec<Arc<AnimalListener>>> {
    config.validate().context("invalid demo configuration")?;
    let factory = AnimalFactory::default();

    let mut listeners = Vec::new();
    for label in &config.demo.animals {
        let kind = label
            .parse::<AnimalKind>()
            .with_context(|| format!("cannot build animal '{}'", label))?;
        let listener = Arc::new(AnimalListener::new(
            factory.create_kind(kind, kind.default_name()),
        ));
        let erased: ObserverHandle<String> = listener.clone();
        registry.attach(erased.clone());
        listeners.push((listener, erased));
    }

    if let Some(sink) = json_sink {
        registry.attach(Arc::new(JsonLinesObserver::new(sink)));
    }

    for (index, message) in config.demo.messages.iter().enumerate() {
        if config.demo.detach_first_after > 0 && index == config.demo.detach_first_after {
            if let Some((listener, erased)) = listeners.first() {
                registry.detach(erased);
                info!("Detached {}", listener.name());
            }
        }

        let report = registry
            .notify(message.clone())
            .with_context(|| format!("broadcast of '{}' failed", message))?;
        info!(
            "Notification {} delivered to {} observers",
            report.sequence, report.delivered
        );
        for failure in &report.failures {
            warn!("Observer {} failed: {}", failure.index, failure.error);
        }
    }

    Ok(listeners.into_iter().map(|(listener, _)| listener).collect())
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        std::env::set_var("RUST_LOG", "debug");
    }
    env_logger::init();

    if let Err(e) = cli.validate() {
        error!("Invalid arguments: {}", e);
        std::process::exit(1);
    }

    let mut config = load_config(cli.config.as_ref());
    cli.apply_overrides(&mut config);

    if let Err(e) = run(&config, cli.json) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
