//! booklet-organizer - headless driver for the job booklet placement engine
//!
//! Runs a scripted station scenario tick by tick and writes every placed
//! booklet as a JSON line.

mod config;
mod scenario;

use anyhow::Result;
use booklet_testkit::JsonlSink;
use config::{Settings, DEFAULT_SETTINGS_PATH};
use scenario::{run_scenario, Scenario};
use std::{env, path::PathBuf};
use tracing::info;

const DEFAULT_EVENTS_PATH: &str = "target/booklet_events.jsonl";
const DEFAULT_TICKS: u64 = 120;

fn main() -> Result<()> {
    let cli = CliOptions::parse(env::args().skip(1));
    let settings_path = cli
        .settings
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));
    let loaded = Settings::try_load_from_path(&settings_path);

    // RUST_LOG wins; otherwise the logging toggle picks the default filter.
    let directive = loaded
        .as_ref()
        .map_or("warn", |settings| settings.log_directive());
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(directive)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting booklet-organizer v{}", env!("CARGO_PKG_VERSION"));
    for err in &cli.errors {
        tracing::error!("{err}");
    }

    let settings = Settings::resolve(&settings_path, loaded);
    if cli.save_settings {
        settings.save_to_path(&settings_path)?;
        info!(path = %settings_path.display(), "saved settings");
    }
    let scenario = match &cli.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::demo(),
    };

    let mut sink = JsonlSink::create(&cli.events)?;
    let summary = run_scenario(&scenario, &settings, cli.ticks, cli.seed, &mut sink)?;
    info!(path = %cli.events.display(), events = sink.written(), "wrote placement events");
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

struct CliOptions {
    settings: Option<PathBuf>,
    scenario: Option<PathBuf>,
    ticks: u64,
    seed: u64,
    events: PathBuf,
    /// Write the effective settings back to the settings path.
    save_settings: bool,
    /// Problems found while parsing; logged once tracing is up.
    errors: Vec<String>,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut opts = CliOptions {
            settings: None,
            scenario: None,
            ticks: DEFAULT_TICKS,
            seed: 0,
            events: PathBuf::from(DEFAULT_EVENTS_PATH),
            save_settings: false,
            errors: Vec::new(),
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--settings" => match args.next() {
                    Some(path) => opts.settings = Some(PathBuf::from(path)),
                    None => opts.errors.push("--settings requires a file path".into()),
                },
                "--scenario" => match args.next() {
                    Some(path) => opts.scenario = Some(PathBuf::from(path)),
                    None => opts.errors.push("--scenario requires a file path".into()),
                },
                "--events" => match args.next() {
                    Some(path) => opts.events = PathBuf::from(path),
                    None => opts.errors.push("--events requires a file path".into()),
                },
                "--save-settings" => opts.save_settings = true,
                "--ticks" => match args.next().map(|raw| (raw.parse::<u64>(), raw)) {
                    Some((Ok(value), _)) => opts.ticks = value,
                    Some((Err(err), raw)) => opts
                        .errors
                        .push(format!("--ticks must be an integer (got {raw}: {err})")),
                    None => opts.errors.push("--ticks requires an integer".into()),
                },
                "--seed" => match args.next().map(|raw| (raw.parse::<u64>(), raw)) {
                    Some((Ok(value), _)) => opts.seed = value,
                    Some((Err(err), raw)) => opts
                        .errors
                        .push(format!("--seed must be an integer (got {raw}: {err})")),
                    None => opts.errors.push("--seed requires an integer".into()),
                },
                other => opts.errors.push(format!("unknown argument {other}")),
            }
        }

        opts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliOptions {
        CliOptions::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn defaults_without_arguments() {
        let opts = parse(&[]);
        assert!(opts.settings.is_none());
        assert!(opts.scenario.is_none());
        assert_eq!(opts.ticks, DEFAULT_TICKS);
        assert_eq!(opts.seed, 0);
        assert_eq!(opts.events, PathBuf::from(DEFAULT_EVENTS_PATH));
        assert!(!opts.save_settings);
        assert!(opts.errors.is_empty());
    }

    #[test]
    fn overrides_are_applied() {
        let opts = parse(&[
            "--settings",
            "cfg.toml",
            "--scenario",
            "yard.json",
            "--ticks",
            "40",
            "--seed",
            "9",
            "--events",
            "out.jsonl",
            "--save-settings",
        ]);
        assert_eq!(opts.settings, Some(PathBuf::from("cfg.toml")));
        assert_eq!(opts.scenario, Some(PathBuf::from("yard.json")));
        assert_eq!(opts.ticks, 40);
        assert_eq!(opts.seed, 9);
        assert_eq!(opts.events, PathBuf::from("out.jsonl"));
        assert!(opts.save_settings);
        assert!(opts.errors.is_empty());
    }

    #[test]
    fn bad_values_are_reported_and_defaults_kept() {
        let opts = parse(&["--ticks", "many", "--seed", "--bogus"]);
        assert_eq!(opts.ticks, DEFAULT_TICKS);
        assert_eq!(opts.seed, 0);
        assert_eq!(opts.errors.len(), 2);
        assert!(opts.errors[0].contains("--ticks"));
        assert!(opts.errors[1].contains("--seed"));
    }
}
