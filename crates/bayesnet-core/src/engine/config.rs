//! Sampler configuration.

use crate::engine::errors::ExecError;

/// How rejection sampling treats evidence nodes it reaches while resolving
/// the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum EvidencePolicy {
    /// Sample evidence nodes like any other node, then discard the trial if a
    /// sampled value disagrees with its observation.
    #[default]
    ResampleAndReject,
    /// Hold evidence nodes at their observed value and never reject.
    Clamp,
}

/// How likelihood weighting combines the weights returned by a node's parents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum WeightPropagation {
    /// Each parent's weight replaces the previous one; only the last parent's
    /// magnitude is carried into the node.
    #[default]
    LastParent,
    /// The node starts from the product of all its parents' magnitudes.
    ParentProduct,
}

/// Configuration shared by both samplers.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SamplerConfig {
    /// Number of trials to run. Every trial runs exactly once; rejected trials
    /// are not retried.
    pub num_samples: usize,
    /// Seed for reproducible runs. `None` draws a seed from OS entropy.
    pub seed: Option<u64>,
    /// Rejection sampling's treatment of evidence.
    pub evidence_policy: EvidencePolicy,
    /// Likelihood weighting's parent-weight combination.
    pub weight_propagation: WeightPropagation,
    /// Spread trials over the rayon pool. Requires the `parallel` feature.
    pub parallel: bool,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            num_samples: 10_000,
            seed: None,
            evidence_policy: EvidencePolicy::default(),
            weight_propagation: WeightPropagation::default(),
            parallel: false,
        }
    }
}

impl SamplerConfig {
    pub fn with_samples(num_samples: usize) -> Self {
        Self {
            num_samples,
            ..Self::default()
        }
    }

    pub fn seeded(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks settings every sampler needs.
    ///
    /// Zero samples is accepted here: rejection sampling reports it as
    /// [`ExecError::NoAcceptedSamples`]. Likelihood weighting checks it itself.
    pub fn validate(self) -> Result<Self, ExecError> {
        if self.parallel && !cfg!(feature = "parallel") {
            return Err(ExecError::ValidationError(
                "parallel sampling requires the `parallel` feature".into(),
            ));
        }
        Ok(self)
    }

    /// The configured seed, or a fresh one from OS entropy.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
