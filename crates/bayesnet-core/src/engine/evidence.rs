//! Evidence classification of network nodes.
//!
//! Every node carries one [`Classification`], fixed when the network is built
//! and never changed by sampling. The boolean a node takes during a trial is a
//! separate realized value held by the trial's
//! [`NetworkInstance`](crate::engine::instance::NetworkInstance).

use bayesnet_frontend::ast::{EvidenceAst, EvidenceKind};

/// How a node participates in a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Classification {
    /// Observed true.
    FixedTrue,
    /// Observed false.
    FixedFalse,
    /// The node whose posterior is estimated.
    QueryTarget,
    /// Unobserved; sampled fresh every trial.
    #[default]
    Free,
}

impl Classification {
    /// The observed value of an evidence node, `None` for sampled nodes.
    pub fn fixed_value(self) -> Option<bool> {
        match self {
            Self::FixedTrue => Some(true),
            Self::FixedFalse => Some(false),
            Self::QueryTarget | Self::Free => None,
        }
    }

    pub fn is_evidence(self) -> bool {
        self.fixed_value().is_some()
    }

    pub fn symbol(self) -> char {
        EvidenceKind::from(self).symbol()
    }
}

impl From<EvidenceKind> for Classification {
    fn from(kind: EvidenceKind) -> Self {
        match kind {
            EvidenceKind::True => Self::FixedTrue,
            EvidenceKind::False => Self::FixedFalse,
            EvidenceKind::Query => Self::QueryTarget,
            EvidenceKind::Unknown => Self::Free,
        }
    }
}

impl From<Classification> for EvidenceKind {
    fn from(c: Classification) -> Self {
        match c {
            Classification::FixedTrue => Self::True,
            Classification::FixedFalse => Self::False,
            Classification::QueryTarget => Self::Query,
            Classification::Free => Self::Unknown,
        }
    }
}

/// Classifications in node declaration order.
pub fn classifications(evidence: &EvidenceAst) -> Vec<Classification> {
    evidence.kinds().map(Classification::from).collect()
}
