use crate::core::round_half_up;
use crate::error::{ProjectionError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 10;
pub const HIGH_PRIORITY_MIN: u32 = 75;
pub const MEDIUM_PRIORITY_MIN: u32 = 50;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= HIGH_PRIORITY_MIN => Self::High,
            s if s >= MEDIUM_PRIORITY_MIN => Self::Medium,
            _ => Self::Low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw slider values for one feature. Each rating is expected in 1..=10.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RiceInput {
    pub reach: i32,
    pub impact: i32,
    pub confidence: i32,
    pub effort: i32,
}

impl RiceInput {
    pub fn new(reach: i32, impact: i32, confidence: i32, effort: i32) -> Self {
        Self {
            reach,
            impact,
            confidence,
            effort,
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_rating("reach", self.reach)?;
        check_rating("impact", self.impact)?;
        check_rating("confidence", self.confidence)?;
        if self.effort == 0 {
            return Err(ProjectionError::invalid(
                "effort",
                "effort must be greater than zero",
            ));
        }
        check_rating("effort", self.effort)
    }
}

fn check_rating(field: &'static str, value: i32) -> Result<()> {
    if (MIN_RATING..=MAX_RATING).contains(&value) {
        Ok(())
    } else {
        Err(ProjectionError::invalid(
            field,
            format!("{value} is outside {MIN_RATING}..={MAX_RATING}"),
        ))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RiceScore {
    pub score: u32,
    pub priority: Priority,
}

/// `round(reach * impact * confidence / effort)` bucketed into a priority tier.
pub fn compute_rice(input: &RiceInput) -> Result<RiceScore> {
    input.validate()?;

    let product = f64::from(input.reach * input.impact * input.confidence);
    let score = round_half_up(product / f64::from(input.effort)) as u32;

    Ok(RiceScore {
        score,
        priority: Priority::from_score(score),
    })
}

pub type FeatureId = u64;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RiceFeature {
    pub id: FeatureId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub input: RiceInput,
    pub score: u32,
    pub priority: Priority,
}

/// Higher scores first. Equal scores compare equal so a stable sort keeps their order.
fn by_score_desc(a: &RiceFeature, b: &RiceFeature) -> Ordering {
    b.score.cmp(&a.score)
}

/// Stable descending sort by score. Ties keep their current relative order.
pub fn rank_by_score(features: &mut [RiceFeature]) {
    features.sort_by(by_score_desc);
}

/// Scored features in insertion order. Every edit rescores the feature.
#[derive(Debug, Clone, Default)]
pub struct Backlog {
    features: Vec<RiceFeature>,
    next_id: FeatureId,
}

impl Backlog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        name: impl Into<String>,
        description: Option<String>,
        input: RiceInput,
    ) -> Result<FeatureId> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ProjectionError::invalid("name", "feature name is empty"));
        }

        let scored = compute_rice(&input)?;
        self.next_id += 1;
        let id = self.next_id;
        self.features.push(RiceFeature {
            id,
            name,
            description: description.filter(|text| !text.trim().is_empty()),
            input,
            score: scored.score,
            priority: scored.priority,
        });
        Ok(id)
    }

    pub fn update(&mut self, id: FeatureId, input: RiceInput) -> Result<()> {
        let scored = compute_rice(&input)?;
        let feature = self
            .features
            .iter_mut()
            .find(|feature| feature.id == id)
            .ok_or_else(|| ProjectionError::invalid("id", format!("no feature with id {id}")))?;

        feature.input = input;
        feature.score = scored.score;
        feature.priority = scored.priority;
        Ok(())
    }

    pub fn remove(&mut self, id: FeatureId) -> Option<RiceFeature> {
        let idx = self.features.iter().position(|feature| feature.id == id)?;
        Some(self.features.remove(idx))
    }

    pub fn get(&self, id: FeatureId) -> Option<&RiceFeature> {
        self.features.iter().find(|feature| feature.id == id)
    }

    pub fn features(&self) -> &[RiceFeature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn ranked(&self) -> Vec<&RiceFeature> {
        let mut ranked: Vec<&RiceFeature> = self.features.iter().collect();
        ranked.sort_by(|a, b| by_score_desc(a, b));
        ranked
    }

    pub fn counts(&self) -> PriorityCounts {
        PriorityCounts::from_features(&self.features)
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub total: usize,
}

impl PriorityCounts {
    pub fn from_features(features: &[RiceFeature]) -> Self {
        let mut counts = Self::default();
        for feature in features {
            match feature.priority {
                Priority::High => counts.high += 1,
                Priority::Medium => counts.medium += 1,
                Priority::Low => counts.low += 1,
            }
        }
        counts.total = features.len();
        counts
    }
}
