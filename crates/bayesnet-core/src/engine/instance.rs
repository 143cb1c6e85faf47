//! Per-trial network state.
//!
//! A [`NetworkInstance`] is the private copy a single sampling trial works on.
//! It borrows the immutable [`Network`] and owns one realized-value slot per
//! node, so realizing values during a trial never touches the shared network
//! or any other instance.

use crate::engine::network::{Network, NodeId};

/// A node's realized value in one trial, with the importance weight that was
/// accumulated on the way to it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Outcome {
    pub value: bool,
    /// Non-negative weight magnitude. Rejection sampling leaves this at the
    /// probability the node was drawn with; it is not used there.
    pub weight: f64,
}

impl Outcome {
    /// The weight carrying the value as its sign (`+` true, `-` false).
    pub fn signed_weight(self) -> f64 {
        if self.value {
            self.weight
        } else {
            -self.weight
        }
    }
}

/// Independent per-trial copy of a network.
#[derive(Debug, Clone)]
pub struct NetworkInstance<'a> {
    network: &'a Network,
    realized: Vec<Option<Outcome>>,
}

impl<'a> NetworkInstance<'a> {
    pub fn new(network: &'a Network) -> Self {
        Self {
            network,
            realized: vec![None; network.len()],
        }
    }

    /// The shared network this instance was made from.
    pub fn network(&self) -> &'a Network {
        self.network
    }

    /// The outcome realized for `id` in this trial, if it has been visited.
    pub fn realized(&self, id: NodeId) -> Option<Outcome> {
        self.realized[id.index()]
    }

    pub fn realize(&mut self, id: NodeId, outcome: Outcome) {
        self.realized[id.index()] = Some(outcome);
    }

    /// The node's value as seen at the end of a trial: its realized value if
    /// it was visited, otherwise its observed value if it is evidence.
    pub fn value(&self, id: NodeId) -> Option<bool> {
        self.realized(id)
            .map(|o| o.value)
            .or_else(|| self.network.node(id).classification().fixed_value())
    }

    /// Whether every evidence node's value agrees with its observation.
    ///
    /// Evidence outside the query's ancestor closure is never realized and
    /// always reads as its observation, so only the closure is checked.
    pub fn is_consistent_with_evidence(&self) -> bool {
        self.network.query_evidence().iter().all(|&id| {
            self.value(id) == self.network.node(id).classification().fixed_value()
        })
    }

    /// Number of nodes realized so far.
    pub fn realized_count(&self) -> usize {
        self.realized.iter().filter(|r| r.is_some()).count()
    }
}
