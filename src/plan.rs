//! Reported production plan: one-decimal outputs in payload order.

use serde::{Deserialize, Serialize};

use crate::optimizer::{Allocation, DispatchUnit};

/// Outputs are reported in tenths of a MW
const TENTHS_PER_MW: f64 = 10.0;

/// A rounded output may sit this far outside its exact window
const ROUNDING_SLACK_MW: f64 = 0.05 + 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "swagger", derive(utoipa::ToSchema))]
pub struct PlanEntry {
    pub name: String,
    /// Assigned output (MW), one decimal
    pub p: f64,
}

/// Serialized as a bare JSON array of entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductionPlan {
    pub entries: Vec<PlanEntry>,
}

impl ProductionPlan {
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.p).sum()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.p)
    }
}

fn to_tenths(mw: f64) -> i64 {
    (mw * TENTHS_PER_MW).round() as i64
}

fn from_tenths(tenths: i64) -> f64 {
    tenths as f64 / TENTHS_PER_MW
}

fn fits(unit: &DispatchUnit, tenths: i64) -> bool {
    tenths >= 0 && unit.window.contains(from_tenths(tenths), ROUNDING_SLACK_MW)
}

/// Round an allocation for reporting.
///
/// The rounded outputs must still add up to the rounded load. The residual
/// is handed out one tenth at a time, largest output first (earlier payload
/// position wins a tie), to outputs that stay within their window. Whatever
/// no output can absorb goes to the largest output anyway.
pub fn format_plan(load: f64, units: &[DispatchUnit], allocation: &Allocation) -> ProductionPlan {
    let mut tenths: Vec<i64> = allocation.outputs.iter().map(|&p| to_tenths(p)).collect();
    let residual = to_tenths(load) - tenths.iter().sum::<i64>();

    if residual != 0 {
        let mut candidates: Vec<usize> = (0..tenths.len()).filter(|&i| tenths[i] > 0).collect();
        candidates.sort_by(|&a, &b| tenths[b].cmp(&tenths[a]).then(a.cmp(&b)));

        let step = residual.signum();
        let mut left = residual.abs();

        for &i in &candidates {
            while left > 0 && fits(&units[i], tenths[i] + step) {
                tenths[i] += step;
                left -= 1;
            }
        }

        if left > 0 {
            if let Some(&largest) = candidates.first() {
                tenths[largest] += step * left;
            }
        }
    }

    ProductionPlan {
        entries: units
            .iter()
            .zip(tenths)
            .map(|(unit, t)| PlanEntry {
                name: unit.name.clone(),
                p: from_tenths(t),
            })
            .collect(),
    }
}
