mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, ProjectArgs, RunArgs, ScoreArgs};
use fusionplan::config::{self, CONFIG_FILE_NAME, ProjectionOverrides};
use fusionplan::core::{self, report};
use fusionplan::RiceInput;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    init_tracing();

    let exit_code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

/// Logs go to stderr so `--json` output on stdout stays machine-readable.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fusionplan=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Score(args) => run_score(args),
        Commands::Backlog(args) => run_backlog(args),
        Commands::Project(args) => run_project(args),
        Commands::Init => {
            let path = std::env::current_dir()?.join(CONFIG_FILE_NAME);
            config::write_default_config(&path)?;
            println!("created {}", path.display());
            Ok(0)
        }
    }
}

fn run_score(args: ScoreArgs) -> Result<i32> {
    let input = RiceInput::new(args.reach, args.impact, args.confidence, args.effort);
    let report = core::run_score(input)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report::print_score(&report);
    }
    Ok(0)
}

fn run_backlog(args: RunArgs) -> Result<i32> {
    let cwd = std::env::current_dir()?;
    let loaded = config::load_config(args.config.as_deref(), &cwd)?;
    let report = core::run_backlog(&loaded.config)?;

    if args.json || loaded.config.general.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report::print_backlog(&report);
    }

    if report.exit.ok { Ok(0) } else { Ok(1) }
}

fn run_project(args: ProjectArgs) -> Result<i32> {
    let cwd = std::env::current_dir()?;
    let loaded = config::load_config(args.run.config.as_deref(), &cwd)?;
    let overrides = ProjectionOverrides {
        monthly_revenue: args.monthly_revenue,
        annual_growth_percent: args.growth,
        cogs: args.cogs,
        marketing: args.marketing,
        operations: args.operations,
        development: args.development,
    };
    let inputs = overrides.apply(loaded.config.projection.inputs());
    let report = core::run_projection(&inputs)?;

    if args.run.json || loaded.config.general.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report::print_projection(&report, args.months);
    }
    Ok(0)
}
