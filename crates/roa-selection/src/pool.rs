//! Candidate pool and dependency blocking
//!
//! A requirement is blocked while any of its dependencies is still in the
//! pool. Codes that name nothing in the pool count as satisfied.

use roa_core::Requirement;
use std::collections::HashSet;

/// Check if `req` has a dependency still present in `pool`
#[must_use]
pub fn is_blocked(req: &Requirement, pool: &[Requirement]) -> bool {
    req.dependencies
        .iter()
        .any(|dep| pool.iter().any(|other| &other.code == dep))
}

/// Working set of one strategy invocation
///
/// Owns copies of the caller's requirements and only ever shrinks.
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    items: Vec<Requirement>,
    codes: HashSet<String>,
}

impl CandidatePool {
    /// Create pool from copies of `requirements`
    #[must_use]
    pub fn new(requirements: &[Requirement]) -> Self {
        Self::from_vec(requirements.to_vec())
    }

    /// Create pool that takes ownership of `requirements`
    #[must_use]
    pub fn from_vec(items: Vec<Requirement>) -> Self {
        let codes = items.iter().map(|r| r.code.clone()).collect();
        Self { items, codes }
    }

    /// Number of remaining candidates
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if pool is exhausted
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Candidate at `index`
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> &Requirement {
        &self.items[index]
    }

    /// Remaining candidates in pool order
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Requirement] {
        &self.items
    }

    /// Check if a requirement with `code` is still in the pool
    #[inline]
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    /// Check if `req` is blocked by this pool
    #[must_use]
    pub fn blocks(&self, req: &Requirement) -> bool {
        req.dependencies.iter().any(|dep| self.codes.contains(dep))
    }

    /// Check if the candidate at `index` is blocked
    #[inline]
    #[must_use]
    pub fn is_blocked_at(&self, index: usize) -> bool {
        self.blocks(&self.items[index])
    }

    /// Check if no remaining candidate can be selected
    #[must_use]
    pub fn all_blocked(&self) -> bool {
        self.items.iter().all(|req| self.blocks(req))
    }

    /// Take the candidate at `index` out of the pool
    pub fn remove(&mut self, index: usize) -> Requirement {
        let req = self.items.remove(index);
        self.codes.remove(&req.code);
        req
    }

    /// Stable sort by descending score; unscored candidates go last
    pub fn sort_by_score_desc(&mut self) {
        self.items.sort_by(|a, b| {
            let a = a.score.unwrap_or(f64::NEG_INFINITY);
            let b = b.score.unwrap_or(f64::NEG_INFINITY);
            b.total_cmp(&a)
        });
    }
}
