use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while turning a payload into an allocation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    #[error("Invalid power plant '{name}': {reason}")]
    InvalidPlant { name: String, reason: String },

    #[error("Infeasible dispatch: {0}")]
    Infeasible(String),
}

impl DispatchError {
    pub fn invalid_plant(name: impl Into<String>, reason: impl Into<String>) -> Self {
        DispatchError::InvalidPlant {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Usable output range of a plant for one request (MW)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatingWindow {
    pub min: f64,
    pub max: f64,
}

impl OperatingWindow {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// A plant with an empty window cannot be committed
    pub fn is_empty(&self) -> bool {
        self.max < self.min
    }

    pub fn headroom(&self) -> f64 {
        (self.max - self.min).max(0.0)
    }

    pub fn contains(&self, p: f64, epsilon: f64) -> bool {
        p >= self.min - epsilon && p <= self.max + epsilon
    }
}

/// A plant resolved against the market: what the engine actually works with
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchUnit {
    /// Position of the plant in the request payload
    pub index: usize,
    pub name: String,
    /// €/MWh of electrical output
    pub marginal_cost: f64,
    pub window: OperatingWindow,
}

/// Engine output, one entry per input plant in payload order
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub outputs: Vec<f64>,
    pub total_cost: f64,
    /// Plants producing a non-zero output
    pub committed: usize,
}

impl Allocation {
    pub fn total_output(&self) -> f64 {
        self.outputs.iter().sum()
    }
}

/// Tunables of the dispatch engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DispatchSettings {
    /// Tolerance for feasibility comparisons (MW)
    pub epsilon: f64,
    /// Upper bound on commitment subsets visited per request
    pub max_search_nodes: usize,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            epsilon: 1e-6,
            max_search_nodes: 100_000,
        }
    }
}
