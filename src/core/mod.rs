pub mod projection;
pub mod report;
pub mod score;

use crate::config::{Config, FeatureEntry};
use crate::core::projection::{ProjectionInputs, ProjectionSummary};
use crate::core::report::{BacklogReport, ExitStatus, ProjectionReport, ScoreReport};
use crate::core::score::{Backlog, RiceInput};
use anyhow::{Context, Result};

/// Half-way values round toward positive infinity, so `-2.5` becomes `-2`.
pub(crate) fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i64
}

pub fn run_score(input: RiceInput) -> Result<ScoreReport> {
    let scored = score::compute_rice(&input)?;
    tracing::debug!(score = scored.score, priority = %scored.priority, "scored feature");
    Ok(ScoreReport {
        input,
        score: scored.score,
        priority: scored.priority,
    })
}

pub fn run_backlog(cfg: &Config) -> Result<BacklogReport> {
    let backlog = build_backlog(&cfg.features)?;
    tracing::debug!(features = backlog.len(), "built backlog");

    let ranked: Vec<_> = backlog.ranked().into_iter().cloned().collect();
    let top_score = ranked.first().map(|feature| feature.score);
    let exit = evaluate_gate(top_score, cfg.general.min_top_score);

    Ok(BacklogReport {
        counts: backlog.counts(),
        features: ranked,
        min_top_score: cfg.general.min_top_score,
        exit,
    })
}

pub fn build_backlog(entries: &[FeatureEntry]) -> Result<Backlog> {
    let mut backlog = Backlog::new();
    for (idx, entry) in entries.iter().enumerate() {
        backlog
            .add(
                entry.name.clone(),
                entry.description.clone(),
                entry.rice_input(),
            )
            .with_context(|| format!("feature #{} ({:?}) is invalid", idx + 1, entry.name))?;
    }
    Ok(backlog)
}

pub fn run_projection(inputs: &ProjectionInputs) -> Result<ProjectionReport> {
    let total_cost = inputs.costs.total_percent();
    if total_cost > 100.0 {
        tracing::warn!(
            total_cost_percent = total_cost,
            "costs exceed revenue; every month will run at a loss"
        );
    }

    let points = projection::project_financials(inputs)?;
    tracing::debug!(months = points.len(), "projected financials");

    Ok(ProjectionReport {
        inputs: *inputs,
        summary: ProjectionSummary::build(inputs, &points),
        points,
    })
}

fn evaluate_gate(top_score: Option<u32>, min_top_score: u32) -> ExitStatus {
    let mut reasons = Vec::new();

    if min_top_score > 0 {
        match top_score {
            None => reasons.push("backlog is empty".to_string()),
            Some(score) if score < min_top_score => reasons.push(format!(
                "top score {} is below min_top_score {}",
                score, min_top_score
            )),
            Some(_) => {}
        }
    }

    ExitStatus {
        ok: reasons.is_empty(),
        reasons,
    }
}
