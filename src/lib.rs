pub mod config;
pub mod core;
pub mod error;

pub use crate::core::projection::{
    CostBreakdown, PROJECTION_MONTHS, ProjectionInputs, ProjectionPoint, ProjectionSummary,
    YearTotals, project_financials, yearly_totals,
};
pub use crate::core::score::{
    Backlog, FeatureId, Priority, PriorityCounts, RiceFeature, RiceInput, RiceScore,
    compute_rice, rank_by_score,
};
pub use crate::error::ProjectionError;
