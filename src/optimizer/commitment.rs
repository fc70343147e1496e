//! Commitment search
//!
//! Decides which units run. The search is a depth-first enumeration of
//! commitment subsets in merit order, trying "commit" before "skip" for each
//! unit. The first complete set it reaches is exactly the greedy merit-order
//! commitment; everything after that is backtracking:
//!
//! - a unit whose minimum stable generation would push the committed minimum
//!   above the load is never committed on that path,
//! - a path stops growing once its committed capacity reaches the load,
//! - a path is abandoned when even all remaining units cannot reach the load,
//!   or when its relaxed cost cannot beat the best set found so far.
//!
//! For a fixed set the cheapest feasible distribution is known in closed form
//! (see [`distribute`]), so only the set itself is searched.

use tracing::debug;

use super::{DispatchSettings, DispatchUnit};

/// A feasible set of committed units with its distribution
#[derive(Debug, Clone, PartialEq)]
pub struct Commitment {
    /// Positions in the merit order, ascending
    pub members: Vec<usize>,
    /// Output of each member (MW), same order as `members`
    pub outputs: Vec<f64>,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub best: Option<Commitment>,
    /// Cost of the greedy commitment, when the greedy walk was feasible
    pub greedy_cost: Option<f64>,
    pub visited: usize,
    /// The node budget ran out before the search completed
    pub exhausted: bool,
}

pub struct CommitmentSearch<'a> {
    ranked: &'a [&'a DispatchUnit],
    load: f64,
    settings: DispatchSettings,
    /// `suffix_max[i]` is the combined ceiling of `ranked[i..]`
    suffix_max: Vec<f64>,
    members: Vec<usize>,
    best: Option<Commitment>,
    greedy_cost: Option<f64>,
    /// Paths abandoned because they could not reach the load
    dead_ends: usize,
    visited: usize,
    exhausted: bool,
}

impl<'a> CommitmentSearch<'a> {
    /// `ranked` must already be in merit order
    pub fn new(ranked: &'a [&'a DispatchUnit], load: f64, settings: DispatchSettings) -> Self {
        let mut suffix_max = vec![0.0; ranked.len() + 1];
        for i in (0..ranked.len()).rev() {
            suffix_max[i] = suffix_max[i + 1] + ranked[i].window.max;
        }

        Self {
            ranked,
            load,
            settings,
            suffix_max,
            members: Vec::with_capacity(ranked.len()),
            best: None,
            greedy_cost: None,
            dead_ends: 0,
            visited: 0,
            exhausted: false,
        }
    }

    pub fn run(mut self) -> SearchOutcome {
        self.explore(0, 0.0, 0.0);

        debug!(
            visited = self.visited,
            exhausted = self.exhausted,
            greedy_cost = ?self.greedy_cost,
            best_cost = ?self.best.as_ref().map(|c| c.cost),
            "commitment search finished"
        );

        SearchOutcome {
            best: self.best,
            greedy_cost: self.greedy_cost,
            visited: self.visited,
            exhausted: self.exhausted,
        }
    }

    fn explore(&mut self, next: usize, min_sum: f64, max_sum: f64) {
        if self.visited >= self.settings.max_search_nodes {
            self.exhausted = true;
            return;
        }
        self.visited += 1;

        let eps = self.settings.epsilon;

        if max_sum + eps >= self.load {
            self.evaluate();
            return;
        }

        if next == self.ranked.len() || max_sum + self.suffix_max[next] + eps < self.load {
            self.dead_ends += 1;
            return;
        }

        if let Some(best) = &self.best {
            if self.lower_bound(next) >= best.cost - eps {
                return;
            }
        }

        let unit = self.ranked[next];
        if min_sum + unit.window.min <= self.load + eps {
            self.members.push(next);
            self.explore(next + 1, min_sum + unit.window.min, max_sum + unit.window.max);
            self.members.pop();
        }

        self.explore(next + 1, min_sum, max_sum);
    }

    fn evaluate(&mut self) {
        let (outputs, cost) = distribute(self.ranked, &self.members, self.load);

        if self.best.is_none() && self.dead_ends == 0 {
            self.greedy_cost = Some(cost);
        }

        let improves = match &self.best {
            None => true,
            Some(best) => cost < best.cost - self.settings.epsilon,
        };
        if improves {
            self.best = Some(Commitment {
                members: self.members.clone(),
                outputs,
                cost,
            });
        }
    }

    /// Cost of serving the load with the current members plus every unit from
    /// `next` on, ignoring the minimums of the latter. No completion of the
    /// current path can be cheaper.
    fn lower_bound(&self, next: usize) -> f64 {
        let mut cost = 0.0;
        let mut remaining = self.load;

        for &m in &self.members {
            let unit = self.ranked[m];
            cost += unit.window.min * unit.marginal_cost;
            remaining -= unit.window.min;
        }
        remaining = remaining.max(0.0);

        let headroom = self
            .members
            .iter()
            .map(|&m| (self.ranked[m], self.ranked[m].window.headroom()))
            .chain(self.ranked[next..].iter().map(|u| (*u, u.window.max)));

        for (unit, room) in headroom {
            if remaining <= 0.0 {
                break;
            }
            let take = remaining.min(room);
            cost += take * unit.marginal_cost;
            remaining -= take;
        }

        cost
    }
}

/// Cheapest distribution of `load` over a fixed committed set.
///
/// Every member starts at its minimum; the rest of the load is filled in
/// merit order up to each member's ceiling, so the most expensive member
/// needed takes the remainder. The caller guarantees the set can carry the
/// load (`sum(min) <= load <= sum(max)`).
pub fn distribute(ranked: &[&DispatchUnit], members: &[usize], load: f64) -> (Vec<f64>, f64) {
    let mut outputs: Vec<f64> = members.iter().map(|&m| ranked[m].window.min).collect();
    let mut remaining = (load - outputs.iter().sum::<f64>()).max(0.0);

    for (output, &m) in outputs.iter_mut().zip(members) {
        if remaining <= 0.0 {
            break;
        }
        let extra = remaining.min(ranked[m].window.headroom());
        *output += extra;
        remaining -= extra;
    }

    let cost = outputs
        .iter()
        .zip(members)
        .map(|(p, &m)| p * ranked[m].marginal_cost)
        .sum();

    (outputs, cost)
}
