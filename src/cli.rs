use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "fusionplan",
    version,
    about = "RICE feature scoring and 36-month financial projections"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Score a single feature
    Score(ScoreArgs),
    /// Score and rank the [[features]] listed in the config file
    Backlog(RunArgs),
    /// Project revenue, costs and profit over 36 months
    Project(ProjectArgs),
    /// Write a starter fusionplan.toml into the current directory
    Init,
}

#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ScoreArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub reach: i32,
    #[arg(long, allow_negative_numbers = true)]
    pub impact: i32,
    #[arg(long, allow_negative_numbers = true)]
    pub confidence: i32,
    #[arg(long, allow_negative_numbers = true)]
    pub effort: i32,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ProjectArgs {
    #[command(flatten)]
    pub run: RunArgs,
    #[arg(long, allow_negative_numbers = true)]
    pub monthly_revenue: Option<f64>,
    /// Annual growth rate in percent
    #[arg(long, allow_negative_numbers = true)]
    pub growth: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub cogs: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub marketing: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub operations: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub development: Option<f64>,
    /// Rows shown in the monthly table (JSON output always carries all months)
    #[arg(long, default_value_t = 12)]
    pub months: usize,
}
