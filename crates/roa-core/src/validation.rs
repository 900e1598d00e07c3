//! Input validation at the invocation boundary
//!
//! A batch is accepted whole or rejected whole: no strategy ever sees a
//! partially valid pool.

use crate::error::ValidationError;
use crate::types::{Requirement, RequirementRecord};
use std::collections::HashSet;

/// Check a batch of requirements before selection
///
/// # Errors
/// The first malformed requirement found, in input order.
pub fn validate_requirements(requirements: &[Requirement]) -> Result<(), ValidationError> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(requirements.len());

    for (index, req) in requirements.iter().enumerate() {
        if req.code.trim().is_empty() {
            return Err(ValidationError::EmptyCode { index });
        }
        if !req.cost.is_finite() || req.cost < 0.0 {
            return Err(ValidationError::InvalidCost {
                code: req.code.clone(),
                cost: req.cost,
            });
        }
        if !req.value.is_finite() || req.value < 0.0 {
            return Err(ValidationError::InvalidValue {
                code: req.code.clone(),
                value: req.value,
            });
        }
        if !req.risk.is_finite() || req.risk < 0.0 {
            return Err(ValidationError::InvalidRisk {
                code: req.code.clone(),
                risk: req.risk,
            });
        }
        if req.time_remaining < 0 {
            return Err(ValidationError::NegativeTimeRemaining {
                code: req.code.clone(),
                time_remaining: req.time_remaining,
            });
        }
        if !req.return_rate.is_finite() || req.return_rate <= -1.0 {
            return Err(ValidationError::InvalidReturnRate {
                code: req.code.clone(),
                rate: req.return_rate,
            });
        }
        if !seen.insert(req.code.as_str()) {
            return Err(ValidationError::DuplicateCode {
                code: req.code.clone(),
            });
        }
    }

    Ok(())
}

/// Convert raw store records into validated requirements
///
/// # Errors
/// [`ValidationError::MissingField`] for incomplete records, or any error
/// from [`validate_requirements`].
pub fn requirements_from_records(
    records: Vec<RequirementRecord>,
) -> Result<Vec<Requirement>, ValidationError> {
    let requirements = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.into_requirement(index))
        .collect::<Result<Vec<_>, _>>()?;

    validate_requirements(&requirements)?;
    Ok(requirements)
}
