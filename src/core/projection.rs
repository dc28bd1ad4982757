//! Monthly-compounded revenue projection with a flat cost-percentage model.
//!
//! Revenue compounds from the previous month's unrounded value; rounding to
//! whole currency units only happens when a [`ProjectionPoint`] is emitted.

use crate::core::round_half_up;
use crate::error::{ProjectionError, Result};
use serde::{Deserialize, Serialize};

pub const PROJECTION_MONTHS: usize = 36;
pub const MONTHS_PER_YEAR: usize = 12;
/// Largest monthly revenue or cost a projection may reach. Twelve of these
/// summed into a year total still fit comfortably in an `i64`.
pub const MAX_MONTHLY_AMOUNT: f64 = 1e15;

/// Cost lines as percentages of monthly revenue.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CostBreakdown {
    pub cogs: f64,
    pub marketing: f64,
    pub operations: f64,
    pub development: f64,
}

impl Default for CostBreakdown {
    fn default() -> Self {
        Self {
            cogs: 30.0,
            marketing: 25.0,
            operations: 20.0,
            development: 15.0,
        }
    }
}

impl CostBreakdown {
    /// May exceed 100 for a loss-making model.
    pub fn total_percent(&self) -> f64 {
        self.cogs + self.marketing + self.operations + self.development
    }

    fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("cogs", self.cogs),
            ("marketing", self.marketing),
            ("operations", self.operations),
            ("development", self.development),
        ] {
            if !value.is_finite() {
                return Err(ProjectionError::invalid(field, "must be a finite number"));
            }
            if value < 0.0 {
                return Err(ProjectionError::invalid(
                    field,
                    format!("cost percentage {value} is negative"),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ProjectionInputs {
    pub monthly_revenue: f64,
    pub annual_growth_percent: f64,
    pub costs: CostBreakdown,
}

impl Default for ProjectionInputs {
    fn default() -> Self {
        Self {
            monthly_revenue: 10_000.0,
            annual_growth_percent: 15.0,
            costs: CostBreakdown::default(),
        }
    }
}

impl ProjectionInputs {
    pub fn validate(&self) -> Result<()> {
        if !self.monthly_revenue.is_finite() || self.monthly_revenue <= 0.0 {
            return Err(ProjectionError::invalid(
                "monthly_revenue",
                format!("{} must be greater than zero", self.monthly_revenue),
            ));
        }
        if !self.annual_growth_percent.is_finite() {
            return Err(ProjectionError::invalid(
                "annual_growth_percent",
                "must be a finite number",
            ));
        }
        if self.monthly_growth_factor() <= -1.0 {
            return Err(ProjectionError::invalid(
                "annual_growth_percent",
                format!(
                    "{}% would shrink revenue to zero within a month",
                    self.annual_growth_percent
                ),
            ));
        }
        self.costs.validate()
    }

    pub fn monthly_growth_factor(&self) -> f64 {
        self.annual_growth_percent / 100.0 / MONTHS_PER_YEAR as f64
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ProjectionPoint {
    pub month: u32,
    pub revenue: i64,
    pub costs: i64,
    pub profit: i64,
    pub margin: i64,
}

/// Produces exactly [`PROJECTION_MONTHS`] points, month 1 first.
///
/// Month 1 already carries one month of growth over `monthly_revenue`.
pub fn project_financials(inputs: &ProjectionInputs) -> Result<Vec<ProjectionPoint>> {
    inputs.validate()?;

    let growth = inputs.monthly_growth_factor();
    let cost_ratio = inputs.costs.total_percent() / 100.0;
    let mut revenue = inputs.monthly_revenue;

    let mut points = Vec::with_capacity(PROJECTION_MONTHS);

    for month in 1..=PROJECTION_MONTHS as u32 {
        revenue *= 1.0 + growth;
        if revenue > MAX_MONTHLY_AMOUNT {
            return Err(ProjectionError::invalid(
                "monthly_revenue",
                format!("month {month} revenue would exceed {MAX_MONTHLY_AMOUNT:e}"),
            ));
        }
        if !revenue.is_normal() {
            return Err(ProjectionError::invalid(
                "annual_growth_percent",
                format!(
                    "{}% shrinks revenue to zero by month {month}",
                    inputs.annual_growth_percent
                ),
            ));
        }

        let costs = revenue * cost_ratio;
        if costs > MAX_MONTHLY_AMOUNT {
            return Err(ProjectionError::invalid(
                "costs",
                format!("month {month} costs would exceed {MAX_MONTHLY_AMOUNT:e}"),
            ));
        }
        let profit = revenue - costs;

        points.push(ProjectionPoint {
            month,
            revenue: round_half_up(revenue),
            costs: round_half_up(costs),
            profit: round_half_up(profit),
            margin: round_half_up(profit / revenue * 100.0),
        });
    }

    Ok(points)
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct YearTotals {
    pub year: u32,
    pub revenue: i64,
    pub costs: i64,
    pub profit: i64,
}

/// Sums each complete 12-month window of `points`. A trailing partial year is dropped.
///
/// Points from [`project_financials`] never overflow; hand-built ones saturate.
pub fn yearly_totals(points: &[ProjectionPoint]) -> Vec<YearTotals> {
    points
        .chunks_exact(MONTHS_PER_YEAR)
        .enumerate()
        .map(|(idx, window)| {
            window.iter().fold(
                YearTotals {
                    year: idx as u32 + 1,
                    ..YearTotals::default()
                },
                |mut totals, point| {
                    totals.revenue = totals.revenue.saturating_add(point.revenue);
                    totals.costs = totals.costs.saturating_add(point.costs);
                    totals.profit = totals.profit.saturating_add(point.profit);
                    totals
                },
            )
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProjectionSummary {
    pub years: Vec<YearTotals>,
    pub final_monthly_revenue: i64,
    pub total_cost_percent: f64,
    pub margin: i64,
}

impl ProjectionSummary {
    pub fn build(inputs: &ProjectionInputs, points: &[ProjectionPoint]) -> Self {
        Self {
            years: yearly_totals(points),
            final_monthly_revenue: points.last().map(|point| point.revenue).unwrap_or_default(),
            total_cost_percent: inputs.costs.total_percent(),
            margin: points.first().map(|point| point.margin).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(revenue: f64, growth: f64, costs: CostBreakdown) -> ProjectionInputs {
        ProjectionInputs {
            monthly_revenue: revenue,
            annual_growth_percent: growth,
            costs,
        }
    }

    #[test]
    fn default_model_produces_thirty_six_months() {
        let points = project_financials(&ProjectionInputs::default()).unwrap();
        assert_eq!(points.len(), PROJECTION_MONTHS);
        assert_eq!(points.first().unwrap().month, 1);
        assert_eq!(points.last().unwrap().month, 36);

        let first = points[0];
        // 10000 * (1 + 0.15 / 12)
        assert_eq!(first.revenue, 10_125);
        assert!((9_112..=9_113).contains(&first.costs));
        assert!((1_012..=1_013).contains(&first.profit));
        assert_eq!(first.margin, 10);
        assert!((first.costs as f64 - first.revenue as f64 * 0.9).abs() <= 1.0);
    }

    #[test]
    fn compounding_uses_unrounded_revenue() {
        let points = project_financials(&inputs(1.0, 60.0, CostBreakdown::default())).unwrap();
        let expected = 1.05_f64.powi(36);
        assert_eq!(points[35].revenue, (expected + 0.5).floor() as i64);

        // each rounded month taken alone would stay at 1 forever
        assert!(points[35].revenue > 1);
    }

    #[test]
    fn revenue_is_monotonic_with_positive_growth() {
        let points = project_financials(&inputs(50_000.0, 24.0, CostBreakdown::default())).unwrap();
        for pair in points.windows(2) {
            assert!(pair[1].revenue > pair[0].revenue, "{pair:?}");
        }
    }

    #[test]
    fn zero_growth_is_flat() {
        let points = project_financials(&inputs(8_000.0, 0.0, CostBreakdown::default())).unwrap();
        assert!(points.iter().all(|point| point.revenue == 8_000));
        assert!(points.iter().all(|point| point.margin == 10));
    }

    #[test]
    fn costs_over_one_hundred_percent_give_negative_margin() {
        let costs = CostBreakdown {
            cogs: 60.0,
            marketing: 40.0,
            operations: 20.0,
            development: 5.0,
        };
        let points = project_financials(&inputs(10_000.0, 0.0, costs)).unwrap();
        assert_eq!(points[0].costs, 12_500);
        assert_eq!(points[0].profit, -2_500);
        assert_eq!(points[0].margin, -25);
    }

    #[test]
    fn rejects_non_positive_revenue() {
        for revenue in [0.0, -100.0, f64::NAN] {
            let err = project_financials(&inputs(revenue, 10.0, CostBreakdown::default()))
                .unwrap_err();
            assert_eq!(err.field(), "monthly_revenue");
        }
    }

    #[test]
    fn rejects_negative_cost_percentages() {
        let costs = CostBreakdown {
            marketing: -1.0,
            ..CostBreakdown::default()
        };
        let err = project_financials(&inputs(1_000.0, 10.0, costs)).unwrap_err();
        assert_eq!(err.field(), "marketing");
    }

    #[test]
    fn growth_must_keep_revenue_positive() {
        let err = project_financials(&inputs(1_000.0, -1200.0, CostBreakdown::default()))
            .unwrap_err();
        assert_eq!(err.field(), "annual_growth_percent");

        let shrinking =
            project_financials(&inputs(1_000.0, -50.0, CostBreakdown::default())).unwrap();
        assert!(shrinking[35].revenue < shrinking[0].revenue);
    }

    #[test]
    fn yearly_totals_sum_rounded_points() {
        let points = project_financials(&ProjectionInputs::default()).unwrap();
        let years = yearly_totals(&points);
        assert_eq!(years.len(), 3);

        for (idx, year) in years.iter().enumerate() {
            let window = &points[idx * 12..(idx + 1) * 12];
            assert_eq!(year.year, idx as u32 + 1);
            assert_eq!(year.revenue, window.iter().map(|p| p.revenue).sum::<i64>());
            assert_eq!(year.profit, window.iter().map(|p| p.profit).sum::<i64>());
        }
        assert!(years[2].revenue > years[1].revenue);
        assert!(years[1].revenue > years[0].revenue);
    }

    #[test]
    fn rejects_revenue_that_outgrows_year_totals() {
        for (revenue, growth) in [(1e18, 15.0), (1e25, 0.0)] {
            let err = project_financials(&inputs(revenue, growth, CostBreakdown::default()))
                .unwrap_err();
            assert_eq!(err.field(), "monthly_revenue", "revenue {revenue:e}");
        }

        // within bounds in month 1, compounds past the ceiling later
        let err = project_financials(&inputs(9e14, 60.0, CostBreakdown::default())).unwrap_err();
        assert!(err.to_string().contains("month "), "{err}");
    }

    #[test]
    fn large_revenue_keeps_profit_consistent() {
        let points =
            project_financials(&inputs(MAX_MONTHLY_AMOUNT, 0.0, CostBreakdown::default())).unwrap();
        let years = yearly_totals(&points);
        for point in &points {
            assert!((point.revenue - point.costs - point.profit).abs() <= 1, "{point:?}");
        }
        assert_eq!(years[0].revenue, 12 * points[0].revenue);
    }

    #[test]
    fn rejects_huge_cost_percentages() {
        let costs = CostBreakdown {
            cogs: 1e300,
            ..CostBreakdown::default()
        };
        let err = project_financials(&inputs(10_000.0, 0.0, costs)).unwrap_err();
        assert_eq!(err.field(), "costs");
    }

    #[test]
    fn rejects_growth_that_collapses_revenue() {
        let err = project_financials(&inputs(1.0, -1199.9999999999, CostBreakdown::default()))
            .unwrap_err();
        assert_eq!(err.field(), "annual_growth_percent");
        assert!(err.to_string().contains("shrinks revenue to zero"), "{err}");
    }

    #[test]
    fn hand_built_points_saturate_instead_of_overflowing() {
        let point = ProjectionPoint {
            month: 1,
            revenue: i64::MAX,
            costs: 0,
            profit: i64::MAX,
            margin: 100,
        };
        let years = yearly_totals(&[point; MONTHS_PER_YEAR]);
        assert_eq!(years[0].revenue, i64::MAX);
    }

    #[test]
    fn sub_half_revenue_rounds_down() {
        let zero = CostBreakdown {
            cogs: 0.0,
            marketing: 0.0,
            operations: 0.0,
            development: 0.0,
        };
        let points = project_financials(&inputs(0.49999999999999994, 0.0, zero)).unwrap();
        assert_eq!(points[0].revenue, 0);
        assert_eq!(points[0].margin, 100);
    }

    #[test]
    fn yearly_totals_drop_partial_years() {
        let points = project_financials(&ProjectionInputs::default()).unwrap();
        assert_eq!(yearly_totals(&points[..20]).len(), 1);
        assert!(yearly_totals(&[]).is_empty());
    }

    #[test]
    fn summary_reports_run_rate() {
        let model = ProjectionInputs::default();
        let points = project_financials(&model).unwrap();
        let summary = ProjectionSummary::build(&model, &points);
        assert_eq!(summary.final_monthly_revenue, points[35].revenue);
        assert_eq!(summary.total_cost_percent, 90.0);
        assert_eq!(summary.margin, 10);
        assert_eq!(summary.years.len(), 3);
    }
}
