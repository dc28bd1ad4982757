use crate::core::projection::{ProjectionInputs, ProjectionPoint, ProjectionSummary};
use crate::core::score::{Priority, PriorityCounts, RiceFeature, RiceInput};
use colored::Colorize;
use serde::Serialize;

impl Priority {
    fn colored(self) -> String {
        let label = self.as_str().to_ascii_uppercase();
        match self {
            Self::High => label.green().bold().to_string(),
            Self::Medium => label.yellow().bold().to_string(),
            Self::Low => label.red().bold().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExitStatus {
    pub ok: bool,
    pub reasons: Vec<String>,
}

impl ExitStatus {
    pub fn reason_line(&self) -> String {
        self.reasons.join("; ")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub input: RiceInput,
    pub score: u32,
    pub priority: Priority,
}

#[derive(Debug, Clone, Serialize)]
pub struct BacklogReport {
    pub counts: PriorityCounts,
    pub features: Vec<RiceFeature>,
    pub min_top_score: u32,
    #[serde(skip)]
    pub exit: ExitStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectionReport {
    pub inputs: ProjectionInputs,
    pub summary: ProjectionSummary,
    pub points: Vec<ProjectionPoint>,
}

pub fn print_score(report: &ScoreReport) {
    let input = &report.input;
    println!(
        "RICE Score: {} ({})",
        report.score.to_string().bold(),
        report.priority.colored()
    );
    println!(
        "reach {} x impact {} x confidence {} / effort {}",
        input.reach, input.impact, input.confidence, input.effort
    );
}

pub fn print_backlog(report: &BacklogReport) {
    let counts = &report.counts;
    println!(
        "Feature Backlog: {} features ({} high, {} medium, {} low)",
        counts.total, counts.high, counts.medium, counts.low
    );

    if !report.features.is_empty() {
        println!();
        println!(
            "{:>4}  {:>6}  {:<8}  {:>2} {:>2} {:>2} {:>2}  {}",
            "rank", "score", "priority", "R", "I", "C", "E", "feature"
        );
    }

    for (idx, feature) in report.features.iter().enumerate() {
        let input = &feature.input;
        // pad before colouring so escape codes do not skew the column
        let tier = format!("{:<8}", feature.priority.as_str());
        let tier = match feature.priority {
            Priority::High => tier.green(),
            Priority::Medium => tier.yellow(),
            Priority::Low => tier.red(),
        };
        println!(
            "{:>4}  {:>6}  {}  {:>2} {:>2} {:>2} {:>2}  {}",
            idx + 1,
            feature.score,
            tier,
            input.reach,
            input.impact,
            input.confidence,
            input.effort,
            feature.name
        );
        if let Some(description) = &feature.description {
            println!("{:>36}{}", "", description.dimmed());
        }
    }

    println!();
    if report.exit.ok {
        println!("exit: OK");
    } else {
        println!("exit: FAILED ({})", report.exit.reason_line());
    }
}

pub fn print_projection(report: &ProjectionReport, months: usize) {
    let inputs = &report.inputs;
    let summary = &report.summary;

    println!(
        "Financial Projection: {} / month, {}% annual growth, {}% costs",
        format_money(inputs.monthly_revenue.round() as i64),
        inputs.annual_growth_percent,
        summary.total_cost_percent
    );
    println!(
        "cogs {}% | marketing {}% | operations {}% | development {}%",
        inputs.costs.cogs, inputs.costs.marketing, inputs.costs.operations, inputs.costs.development
    );

    println!();
    for year in &summary.years {
        println!(
            "Year {}: revenue {}  costs {}  profit {}",
            year.year,
            format_money(year.revenue),
            format_money(year.costs),
            signed_money(year.profit)
        );
    }
    println!(
        "Month {} run-rate: {} (margin {}%)",
        report.points.len(),
        format_money(summary.final_monthly_revenue),
        summary.margin
    );

    let shown = months.min(report.points.len());
    if shown == 0 {
        return;
    }

    println!();
    println!(
        "{:>5}  {:>14}  {:>14}  {:>14}  {:>7}",
        "month", "revenue", "costs", "profit", "margin"
    );
    for point in &report.points[..shown] {
        let profit = format!("{:>14}", format_money(point.profit));
        let profit = if point.profit < 0 {
            profit.red().to_string()
        } else {
            profit
        };
        println!(
            "{:>5}  {:>14}  {:>14}  {}  {:>6}%",
            point.month,
            format_money(point.revenue),
            format_money(point.costs),
            profit,
            point.margin
        );
    }
}

fn signed_money(amount: i64) -> String {
    let text = format_money(amount);
    if amount < 0 {
        text.red().to_string()
    } else {
        text.green().to_string()
    }
}

/// Whole currency units with thousands separators, e.g. `-$1,234,567`.
pub fn format_money(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if amount < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}
