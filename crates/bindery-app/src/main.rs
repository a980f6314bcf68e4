mod cli;
mod commands;

use bindery_common::{BinderyError, ConfigError};
use bindery_config::schema::BinderyConfig;
use tracing_subscriber::EnvFilter;

use cli::Command;

fn load_config(args: &cli::Args) -> Result<BinderyConfig, ConfigError> {
    match &args.config {
        Some(path) => bindery_config::toml_loader::load_from_path(path),
        None => bindery_config::load_config(),
    }
}

/// `--log-level` wins, then the config file; a config that failed to load
/// leaves the default `info`.
fn log_directive(cli_level: Option<&str>, loaded: &Result<BinderyConfig, ConfigError>) -> String {
    match (cli_level, loaded) {
        (Some(level), _) => level.to_string(),
        (None, Ok(config)) => config.logging.level.as_directive().to_string(),
        (None, Err(_)) => "info".to_string(),
    }
}

fn main() -> Result<(), BinderyError> {
    let args = cli::parse();
    let loaded = load_config(&args);

    let log_directive = log_directive(args.log_level.as_deref(), &loaded);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| tracing_subscriber::filter::LevelFilter::INFO.into()),
            ),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {e}");
        BinderyConfig::default()
    });

    tracing::debug!("bindery v{} starting", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &args.config {
        tracing::info!("Using config override: {}", path.display());
    }

    if let Err(e) = bindery_input::paths::ensure_dirs() {
        tracing::warn!("Failed to create directories: {e}");
    }

    let ctx = commands::Context::new(config, args.store.clone())?;
    match &args.command {
        Command::Show {
            catalog,
            short,
            defaults,
            json,
        } => commands::show(&ctx, catalog, *short, *defaults, *json),
        Command::Rebind {
            catalog,
            action,
            binding,
            captures,
        } => commands::rebind(&ctx, catalog, action, *binding, captures),
        Command::Reset {
            catalog,
            action,
            binding,
        } => commands::reset(&ctx, catalog, action.as_deref(), *binding),
        Command::Clear => commands::clear(&ctx),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use bindery_config::schema::LogLevel;

    use super::*;

    #[test]
    fn cli_level_overrides_config() {
        let loaded = Ok(BinderyConfig::default());
        assert_eq!(log_directive(Some("bindery_input=trace"), &loaded), "bindery_input=trace");
    }

    #[test]
    fn config_level_used_without_flag() {
        let mut config = BinderyConfig::default();
        config.logging.level = LogLevel::Debug;
        assert_eq!(log_directive(None, &Ok(config)), "debug");
    }

    #[test]
    fn failed_config_still_gets_a_subscriber_level() {
        let loaded = Err(ConfigError::FileNotFound(PathBuf::from("/missing/config.toml")));
        assert_eq!(log_directive(None, &loaded), "info");
    }
}
