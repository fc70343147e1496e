use itertools::Itertools;
use ordered_float::OrderedFloat;

use super::DispatchUnit;

/// Rank the dispatchable units cheapest first.
///
/// Units that cannot produce anything this request (empty window, or a
/// ceiling of zero) are left out. Ties on cost are broken by name, then by
/// payload position, so the order is reproducible.
pub fn merit_order(units: &[DispatchUnit]) -> Vec<&DispatchUnit> {
    units
        .iter()
        .filter(|unit| !unit.window.is_empty() && unit.window.max > 0.0)
        .sorted_by(|a, b| {
            OrderedFloat(a.marginal_cost)
                .cmp(&OrderedFloat(b.marginal_cost))
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.index.cmp(&b.index))
        })
        .collect()
}
