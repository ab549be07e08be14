use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub filters: FiltersConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Collection interval in milliseconds
    pub interval_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// trace, debug, info, warn or error. RUST_LOG takes precedence.
    pub level: String,
}

/// Metric-name patterns. A trailing `*` matches by prefix.
///
/// Example in fsmetrics.toml:
/// ```toml
/// [filters]
/// include = []                      # empty = everything
/// exclude = ["filesystem_files*"]   # drop inode metrics
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FiltersConfig {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { interval_ms: 15_000 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".into() }
    }
}

// ── Load / Save ───────────────────────────────────────────────────────

impl Config {
    /// Load from `explicit` if given, otherwise from the default path. A
    /// missing default file yields defaults and is written out on first run.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return load_from(path);
        }
        let Some(path) = Config::config_path() else {
            return Ok(Config::default());
        };
        if !path.exists() {
            // best-effort
            let _ = write_defaults(&path);
            return Ok(Config::default());
        }
        load_from(&path)
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("fsmetrics").join("fsmetrics.toml"))
    }
}

fn load_from(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let cfg: Config = toml::from_str(&text)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(cfg)
}

fn write_defaults(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = toml::to_string_pretty(&Config::default())?;
    fs::write(path, format!("# fsmetrics configuration\n# Generated on first run, edit freely\n\n{}", text))?;
    Ok(())
}
