use crate::core::projection::{CostBreakdown, ProjectionInputs};
use crate::core::score::RiceInput;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "fusionplan.toml";

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub projection: ProjectionConfig,
    pub features: Vec<FeatureEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub json: bool,
    /// Fail `backlog` when the best-ranked score is below this. 0 disables the gate.
    pub min_top_score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub monthly_revenue: f64,
    pub annual_growth_percent: f64,
    pub costs: CostsConfig,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        let inputs = ProjectionInputs::default();
        Self {
            monthly_revenue: inputs.monthly_revenue,
            annual_growth_percent: inputs.annual_growth_percent,
            costs: CostsConfig::default(),
        }
    }
}

impl ProjectionConfig {
    pub fn inputs(&self) -> ProjectionInputs {
        ProjectionInputs {
            monthly_revenue: self.monthly_revenue,
            annual_growth_percent: self.annual_growth_percent,
            costs: CostBreakdown {
                cogs: self.costs.cogs,
                marketing: self.costs.marketing,
                operations: self.costs.operations,
                development: self.costs.development,
            },
        }
    }
}

/// Command-line values that take precedence over `[projection]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProjectionOverrides {
    pub monthly_revenue: Option<f64>,
    pub annual_growth_percent: Option<f64>,
    pub cogs: Option<f64>,
    pub marketing: Option<f64>,
    pub operations: Option<f64>,
    pub development: Option<f64>,
}

impl ProjectionOverrides {
    pub fn apply(&self, mut inputs: ProjectionInputs) -> ProjectionInputs {
        if let Some(revenue) = self.monthly_revenue {
            inputs.monthly_revenue = revenue;
        }
        if let Some(growth) = self.annual_growth_percent {
            inputs.annual_growth_percent = growth;
        }

        let costs = &mut inputs.costs;
        for (target, value) in [
            (&mut costs.cogs, self.cogs),
            (&mut costs.marketing, self.marketing),
            (&mut costs.operations, self.operations),
            (&mut costs.development, self.development),
        ] {
            if let Some(value) = value {
                *target = value;
            }
        }
        inputs
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CostsConfig {
    pub cogs: f64,
    pub marketing: f64,
    pub operations: f64,
    pub development: f64,
}

impl Default for CostsConfig {
    fn default() -> Self {
        let costs = CostBreakdown::default();
        Self {
            cogs: costs.cogs,
            marketing: costs.marketing,
            operations: costs.operations,
            development: costs.development,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeatureEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub reach: i32,
    pub impact: i32,
    pub confidence: i32,
    pub effort: i32,
}

impl FeatureEntry {
    pub fn rice_input(&self) -> RiceInput {
        RiceInput::new(self.reach, self.impact, self.confidence, self.effort)
    }
}

impl Config {
    /// Defaults plus a few sample features, written by `fusionplan init`.
    pub fn example() -> Self {
        let sample = |name: &str, description: &str, rice: [i32; 4]| FeatureEntry {
            name: name.to_string(),
            description: Some(description.to_string()),
            reach: rice[0],
            impact: rice[1],
            confidence: rice[2],
            effort: rice[3],
        };

        Self {
            features: vec![
                sample(
                    "AI business idea generator",
                    "generate and validate startup ideas from a short prompt",
                    [9, 8, 7, 6],
                ),
                sample(
                    "Team workspaces",
                    "shared projects with role-based access",
                    [6, 7, 8, 5],
                ),
                sample(
                    "Webhook monitor",
                    "delivery history and retries for outbound webhooks",
                    [4, 5, 9, 4],
                ),
            ],
            ..Self::default()
        }
    }
}

pub fn load_config(cli_config_path: Option<&Path>, cwd: &Path) -> Result<LoadedConfig> {
    if let Some(path) = cli_config_path {
        if !path.exists() {
            bail!(
                "config file not found at {} (passed with --config)",
                path.display()
            );
        }

        tracing::debug!(path = %path.display(), "loading config from --config");
        return Ok(LoadedConfig {
            config: read_config(path)?,
            source: Some(path.to_path_buf()),
        });
    }

    let local_path = cwd.join(CONFIG_FILE_NAME);
    if local_path.exists() {
        tracing::debug!(path = %local_path.display(), "loading config from working directory");
        return Ok(LoadedConfig {
            config: read_config(&local_path)?,
            source: Some(local_path),
        });
    }

    tracing::debug!("no config file found, using defaults");
    Ok(LoadedConfig {
        config: Config::default(),
        source: None,
    })
}

pub fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!(
            "refusing to overwrite existing config file: {}",
            path.display()
        );
    }

    let content = default_config_toml()?;
    fs::write(path, content).with_context(|| format!("failed writing {}", path.display()))?;
    Ok(())
}

pub fn default_config_toml() -> Result<String> {
    toml::to_string_pretty(&Config::example()).context("failed to serialize default config")
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed reading config file {}", path.display()))?;
    let config = toml::from_str::<Config>(&content)
        .with_context(|| format!("failed parsing config file {}", path.display()))?;
    Ok(config)
}
