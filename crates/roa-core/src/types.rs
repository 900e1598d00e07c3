//! Core types for ROA
//!
//! Defines the fundamental records the planner works with:
//! - Requirements (raw records and validated, optionally valued ones)
//! - Plans produced by selection strategies
//! - Sub-plan records handed over by the store
//! - Fixed test-set partitions of the stored backlog

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A unit of candidate work
///
/// `value_to_cost`, `volatility` and `score` are absent until the
/// requirement has been through valuation (and, for `score`, scoring).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    /// Unique identifier
    pub code: String,
    /// Business value
    pub value: f64,
    /// Implementation cost
    pub cost: f64,
    /// Discount rate per time unit
    #[serde(default)]
    pub return_rate: f64,
    /// Base risk magnitude
    #[serde(default)]
    pub risk: f64,
    /// Periods until the requirement expires
    #[serde(default)]
    pub time_remaining: i64,
    /// Codes that must leave the pool before this one can be selected
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Normalized value-to-cost
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_to_cost: Option<f64>,
    /// Normalized volatility
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volatility: Option<f64>,
    /// Volatility-weighted value-to-cost
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Requirement {
    /// Create new requirement with no risk, rate, horizon or dependencies
    #[inline]
    #[must_use]
    pub fn new(code: impl Into<String>, value: f64, cost: f64) -> Self {
        Self {
            code: code.into(),
            value,
            cost,
            return_rate: 0.0,
            risk: 0.0,
            time_remaining: 0,
            dependencies: Vec::new(),
            value_to_cost: None,
            volatility: None,
            score: None,
        }
    }

    /// With return rate
    #[inline]
    #[must_use]
    pub fn with_return_rate(mut self, return_rate: f64) -> Self {
        self.return_rate = return_rate;
        self
    }

    /// With risk
    #[inline]
    #[must_use]
    pub fn with_risk(mut self, risk: f64) -> Self {
        self.risk = risk;
        self
    }

    /// With time remaining
    #[inline]
    #[must_use]
    pub fn with_time_remaining(mut self, time_remaining: i64) -> Self {
        self.time_remaining = time_remaining;
        self
    }

    /// With dependencies
    #[must_use]
    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    /// With precomputed valuation
    #[inline]
    #[must_use]
    pub fn with_valuation(mut self, value_to_cost: f64, volatility: f64) -> Self {
        self.value_to_cost = Some(value_to_cost);
        self.volatility = Some(volatility);
        self
    }

    /// With precomputed score
    #[inline]
    #[must_use]
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Check if both valuation metrics are present
    #[inline]
    #[must_use]
    pub fn is_valued(&self) -> bool {
        self.value_to_cost.is_some() && self.volatility.is_some()
    }

    /// Check if requirement declares any dependency
    #[inline]
    #[must_use]
    pub fn has_dependencies(&self) -> bool {
        !self.dependencies.is_empty()
    }

    /// Drop derived metrics
    pub fn clear_valuation(&mut self) {
        self.value_to_cost = None;
        self.volatility = None;
        self.score = None;
    }
}

/// Raw requirement record as handed over by the store
///
/// Every field is optional so that a malformed record can be reported
/// precisely instead of failing deserialization of the whole batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementRecord {
    /// Unique identifier
    pub code: Option<String>,
    /// Business value
    pub value: Option<f64>,
    /// Implementation cost
    pub cost: Option<f64>,
    /// Discount rate per time unit
    pub return_rate: Option<f64>,
    /// Base risk magnitude
    pub risk: Option<f64>,
    /// Periods until expiry
    pub time_remaining: Option<i64>,
    /// Prerequisite codes
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl RequirementRecord {
    /// Convert into a requirement, reporting missing fields against `index`
    ///
    /// `returnRate` and `risk` default to zero when absent. `timeRemaining`
    /// has no default: zero would make the record urgent.
    ///
    /// # Errors
    /// [`ValidationError::MissingField`] when `code`, `value`, `cost` or
    /// `timeRemaining` is absent.
    pub fn into_requirement(self, index: usize) -> Result<Requirement, ValidationError> {
        let code = self.code.ok_or(ValidationError::MissingField {
            index,
            field: "code",
        })?;
        let value = self.value.ok_or(ValidationError::MissingField {
            index,
            field: "value",
        })?;
        let cost = self.cost.ok_or(ValidationError::MissingField {
            index,
            field: "cost",
        })?;
        let time_remaining = self.time_remaining.ok_or(ValidationError::MissingField {
            index,
            field: "timeRemaining",
        })?;

        Ok(Requirement {
            code,
            value,
            cost,
            return_rate: self.return_rate.unwrap_or(0.0),
            risk: self.risk.unwrap_or(0.0),
            time_remaining,
            dependencies: self.dependencies,
            value_to_cost: None,
            volatility: None,
            score: None,
        })
    }
}

impl From<&Requirement> for RequirementRecord {
    fn from(req: &Requirement) -> Self {
        Self {
            code: Some(req.code.clone()),
            value: Some(req.value),
            cost: Some(req.cost),
            return_rate: Some(req.return_rate),
            risk: Some(req.risk),
            time_remaining: Some(req.time_remaining),
            dependencies: req.dependencies.clone(),
        }
    }
}

/// Ordered selection of requirement codes
///
/// Insertion order is selection order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Selected codes in selection order
    pub requirements: Vec<String>,
    /// Sum of the selected costs
    pub total_cost: f64,
}

impl Plan {
    /// Create empty plan
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a plan from selected records, keeping their order
    #[must_use]
    pub fn from_requirements(selected: &[Requirement]) -> Self {
        let mut plan = Self::new();
        for req in selected {
            plan.push(&req.code, req.cost);
        }
        plan
    }

    /// Append a selection
    #[inline]
    pub fn push(&mut self, code: impl Into<String>, cost: f64) {
        self.requirements.push(code.into());
        self.total_cost += cost;
    }

    /// Selected codes
    #[inline]
    #[must_use]
    pub fn codes(&self) -> &[String] {
        &self.requirements
    }

    /// Check if a code was selected
    #[inline]
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.requirements.iter().any(|c| c == code)
    }

    /// Number of selected requirements
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    /// Check if nothing was selected
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    /// Consume into the selected codes
    #[inline]
    #[must_use]
    pub fn into_codes(self) -> Vec<String> {
        self.requirements
    }
}

/// Sub-plan record as stored by the persistence collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubPlanRecord {
    /// Algorithm name followed by the release number, e.g. `greedy2`
    pub plan_index: String,
    /// Codes selected for the release
    pub requirements: Vec<String>,
    /// Whether the release has been delivered
    pub completed: bool,
    /// Owning master plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_plan_id: Option<String>,
}

impl SubPlanRecord {
    /// Create an incomplete sub-plan
    #[must_use]
    pub fn new(plan_index: impl Into<String>, requirements: Vec<String>) -> Self {
        Self {
            plan_index: plan_index.into(),
            requirements,
            completed: false,
            master_plan_id: None,
        }
    }

    /// Mark as completed
    #[inline]
    #[must_use]
    pub fn completed(mut self) -> Self {
        self.completed = true;
        self
    }

    /// With master plan id
    #[inline]
    #[must_use]
    pub fn with_master_plan(mut self, id: impl Into<String>) -> Self {
        self.master_plan_id = Some(id.into());
        self
    }
}

/// Fixed partitions of the stored backlog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TestSet {
    /// Records 0..20
    #[default]
    First,
    /// Records 20..120
    Second,
    /// Records 120..220
    Third,
    /// Records 220..470
    Fourth,
    /// Records 470..720
    Fifth,
}

impl TestSet {
    /// All test sets in order
    pub const ALL: [TestSet; 5] = [
        TestSet::First,
        TestSet::Second,
        TestSet::Third,
        TestSet::Fourth,
        TestSet::Fifth,
    ];

    /// Look up by 1-based number
    #[must_use]
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::First),
            2 => Some(Self::Second),
            3 => Some(Self::Third),
            4 => Some(Self::Fourth),
            5 => Some(Self::Fifth),
            _ => None,
        }
    }

    /// 1-based number
    #[inline]
    #[must_use]
    pub fn number(&self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
            Self::Fourth => 4,
            Self::Fifth => 5,
        }
    }

    /// Index range within the stored backlog
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        match self {
            Self::First => 0..20,
            Self::Second => 20..120,
            Self::Third => 120..220,
            Self::Fourth => 220..470,
            Self::Fifth => 470..720,
        }
    }

    /// Slice the backlog, clamping to the records available
    #[must_use]
    pub fn slice<'a>(&self, backlog: &'a [Requirement]) -> &'a [Requirement] {
        let range = self.range();
        let end = range.end.min(backlog.len());
        let start = range.start.min(end);
        &backlog[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn requirement_builder() {
        let req = Requirement::new("R1", 5.0, 3.0)
            .with_return_rate(0.1)
            .with_risk(2.0)
            .with_time_remaining(4)
            .with_dependencies(["R0"]);

        assert_eq!(req.code, "R1");
        assert_eq!(req.dependencies, vec!["R0".to_string()]);
        assert!(req.has_dependencies());
        assert!(!req.is_valued());
    }

    #[test]
    fn clear_valuation_resets_derived_fields() {
        let mut req = Requirement::new("R1", 5.0, 3.0)
            .with_valuation(1.2, 0.4)
            .with_score(1.68);
        assert!(req.is_valued());

        req.clear_valuation();
        assert_eq!(req.value_to_cost, None);
        assert_eq!(req.score, None);
    }

    #[test]
    fn record_missing_cost_is_rejected() {
        let record = RequirementRecord {
            code: Some("R7".into()),
            value: Some(3.0),
            ..RequirementRecord::default()
        };

        let err = record.into_requirement(7).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingField {
                index: 7,
                field: "cost"
            }
        );
    }

    #[test]
    fn record_defaults_optional_fields() {
        let record: RequirementRecord =
            serde_json::from_str(r#"{"code":"R1","value":4,"cost":2,"timeRemaining":3}"#).unwrap();
        let req = record.into_requirement(0).unwrap();

        assert_eq!(req.return_rate, 0.0);
        assert_eq!(req.risk, 0.0);
        assert_eq!(req.time_remaining, 3);
        assert!(req.dependencies.is_empty());
    }

    #[test]
    fn record_without_time_remaining_is_rejected() {
        let record: RequirementRecord =
            serde_json::from_str(r#"{"code":"R1","value":4,"cost":2}"#).unwrap();
        assert_eq!(
            record.into_requirement(2).unwrap_err(),
            ValidationError::MissingField {
                index: 2,
                field: "timeRemaining"
            }
        );
    }

    #[test]
    fn requirement_serializes_camel_case() {
        let req = Requirement::new("R1", 1.0, 1.0)
            .with_time_remaining(2)
            .with_valuation(0.5, 0.25);
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["timeRemaining"], 2);
        assert_eq!(json["valueToCost"], 0.5);
        assert!(json.get("score").is_none());
    }

    #[test]
    fn plan_tracks_cost_and_order() {
        let mut plan = Plan::new();
        plan.push("B", 4.0);
        plan.push("A", 3.0);

        assert_eq!(plan.codes(), ["B".to_string(), "A".to_string()]);
        assert_eq!(plan.total_cost, 7.0);
        assert!(plan.contains("A"));
        assert!(!plan.contains("C"));
    }

    #[test]
    fn sub_plan_round_trips_store_shape() {
        let json = r#"{"planIndex":"greedy1","requirements":["R1"],"completed":true,"masterPlanId":"m1"}"#;
        let sub: SubPlanRecord = serde_json::from_str(json).unwrap();

        assert!(sub.completed);
        assert_eq!(sub.master_plan_id.as_deref(), Some("m1"));
    }

    #[test]
    fn test_set_slice_clamps() {
        let backlog: Vec<Requirement> = (0..30)
            .map(|i| Requirement::new(format!("R{i}"), 1.0, 1.0))
            .collect();

        assert_eq!(TestSet::First.slice(&backlog).len(), 20);
        assert_eq!(TestSet::Second.slice(&backlog).len(), 10);
        assert!(TestSet::Fifth.slice(&backlog).is_empty());
        assert_eq!(TestSet::Second.slice(&backlog)[0].code, "R20");
    }

    #[test]
    fn test_set_numbers() {
        for set in TestSet::ALL {
            assert_eq!(TestSet::from_number(set.number()), Some(set));
        }
        assert_eq!(TestSet::from_number(6), None);
    }
}
