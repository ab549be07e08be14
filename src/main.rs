mod collectors;
mod config;
mod logging;
mod metrics;
mod models;

use anyhow::Result;
use clap::Parser;
use collectors::{filesystem, mounts};
use config::Config;
use metrics::{Filters, MemoryRegistry};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "fsmetrics", about = "Filesystem capacity and inode metrics collector", version)]
struct Cli {
    /// Collection interval in milliseconds (overrides the config file)
    #[arg(short, long)]
    interval: Option<u64>,

    /// Collect once, print the samples as text and exit
    #[arg(long)]
    once: bool,

    /// Collect once, print a JSON snapshot and exit
    #[arg(long)]
    json: bool,

    /// Print config file path and current values, then exit
    #[arg(long)]
    print_config: bool,

    /// Path to the config file
    #[arg(short = 'c', long)]
    config_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (cfg, load_err) = match Config::load(cli.config_file.as_deref()) {
        Ok(c) => (c, None),
        Err(e) if cli.config_file.is_none() => (Config::default(), Some(e)),
        Err(e) => return Err(e),
    };

    logging::init(if cli.verbose { "debug" } else { cfg.logging.level.as_str() });
    if let Some(e) = load_err {
        warn!("ignoring unreadable config: {:#}", e);
    }

    let registry = build_registry(&cfg);

    if cli.print_config {
        let path = cli.config_file.clone().or_else(Config::config_path);
        return run_print_config(&cfg, path, &registry);
    }

    if cli.json {
        return run_json_snapshot(&registry);
    }
    if cli.once {
        print!("{}", metrics::render_text(&registry.gather()));
        return Ok(());
    }

    let interval_ms = cli.interval.unwrap_or(cfg.general.interval_ms);
    run_daemon(&registry, interval_ms)
}

fn build_registry(cfg: &Config) -> MemoryRegistry {
    let filters = Filters::new(cfg.filters.include.clone(), cfg.filters.exclude.clone());
    let mut registry = MemoryRegistry::new();
    filesystem::register_fs_metrics(&mut registry, mounts::read_mounts, Arc::new(filters));
    registry
}

fn run_json_snapshot(registry: &MemoryRegistry) -> Result<()> {
    use serde_json::json;

    let snapshot = json!({
        "timestamp": chrono::Local::now().to_rfc3339(),
        "samples":   registry.gather(),
    });
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn run_print_config(cfg: &Config, path: Option<PathBuf>, registry: &MemoryRegistry) -> Result<()> {
    let path = path
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    println!("Config: {}", path);
    println!();
    println!("[general]");
    println!("  interval_ms = {}", cfg.general.interval_ms);
    println!();
    println!("[logging]");
    println!("  level = {}", cfg.logging.level);
    println!();
    println!("[filters]");
    println!("  include = {:?}", cfg.filters.include);
    println!("  exclude = {:?}", cfg.filters.exclude);
    println!();
    println!("Registered metrics:");
    for m in registry.metrics() {
        println!("  {} {{{}}}", m.name, m.label_names.join(","));
    }
    Ok(())
}

fn run_daemon(registry: &MemoryRegistry, interval_ms: u64) -> Result<()> {
    let tick = std::time::Duration::from_millis(interval_ms.max(500));
    info!("fsmetrics starting (interval {}ms)", tick.as_millis());

    loop {
        let samples = registry.gather();
        print!("{}", metrics::render_text(&samples));
        std::thread::sleep(tick);
    }
}
