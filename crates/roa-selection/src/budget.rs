//! Release capacity tracking

/// Running cost against a fixed capacity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Budget {
    limit: f64,
    spent: f64,
}

impl Budget {
    /// Create budget with nothing spent
    #[inline]
    #[must_use]
    pub fn new(limit: f64) -> Self {
        Self { limit, spent: 0.0 }
    }

    /// Check if `cost` can be added without exceeding the limit
    #[inline]
    #[must_use]
    pub fn fits(&self, cost: f64) -> bool {
        self.spent + cost <= self.limit
    }

    /// Record `cost` as spent
    #[inline]
    pub fn spend(&mut self, cost: f64) {
        self.spent += cost;
    }

    /// Capacity left
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> f64 {
        self.limit - self.spent
    }

    /// Cost spent so far
    #[inline]
    #[must_use]
    pub fn spent(&self) -> f64 {
        self.spent
    }

    /// Total capacity
    #[inline]
    #[must_use]
    pub fn limit(&self) -> f64 {
        self.limit
    }
}
