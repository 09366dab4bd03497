use contracts::dashboards::d402_sales_drilldown::SelectionState;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub report: ReportConfig,
    /// Directory the config file was found in; relative paths resolve against it
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatasetConfig {
    pub path: String,
}

/// Selection snapshot rendered by the binary
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ReportConfig {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sub_categories: Vec<String>,
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl ReportConfig {
    pub fn selection(&self) -> SelectionState {
        SelectionState {
            category: self.category.clone(),
            sub_categories: self.sub_categories.iter().cloned().collect(),
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[dataset]
path = "data/superstore_sample.csv"

[report]
category = "Furniture"
sub_categories = ["Chairs", "Tables"]
format = "text"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Current working directory
/// 2. Next to the executable (for production)
/// 3. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    let mut candidates = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join("config.toml"));
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.push(exe_dir.join("config.toml"));
        }
    }

    for config_path in &candidates {
        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            let contents = std::fs::read_to_string(config_path)?;
            return parse_config(&contents, config_path.parent());
        }
        tracing::warn!("config.toml not found at: {}", config_path.display());
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG, None)
}

pub fn parse_config(contents: &str, base_dir: Option<&Path>) -> anyhow::Result<Config> {
    let mut config: Config = toml::from_str(contents)?;
    config.base_dir = base_dir.map(Path::to_path_buf);
    Ok(config)
}

/// Get the dataset file path from configuration
/// Resolves relative paths relative to the config file directory
pub fn get_dataset_path(config: &Config) -> PathBuf {
    let dataset_path = Path::new(&config.dataset.path);

    if dataset_path.is_absolute() {
        return dataset_path.to_path_buf();
    }

    match &config.base_dir {
        Some(dir) => dir.join(dataset_path),
        // Fallback: use relative to current directory
        None => dataset_path.to_path_buf(),
    }
}
