//! # Bayesnet Core
//!
//! Approximate inference over boolean Bayesian networks: rejection sampling
//! and likelihood weighting on a shared, immutable [`Network`].

pub mod engine;

use std::fs;
use std::path::Path;

// Re-export commonly used types
pub use engine::config::{EvidencePolicy, SamplerConfig, WeightPropagation};
pub use engine::errors::ExecError;
pub use engine::estimate::{RejectionEstimate, TrialAggregate, WeightedEstimate};
pub use engine::evidence::Classification;
pub use engine::likelihood::{run_likelihood_weighting, LikelihoodWeightingSampler};
pub use engine::network::{Network, NetworkBuilder, NodeId};
pub use engine::rejection::{run_rejection_sampling, RejectionSampler};

/// Parse and validate a network definition and its evidence assignment.
pub fn load_network(network_source: &str, evidence_source: &str) -> Result<Network, ExecError> {
    let (network, evidence) =
        bayesnet_frontend::parse_and_validate(network_source, evidence_source)?;
    Network::from_ast(&network, &evidence)
}

/// Read both files and [`load_network`] them.
pub fn load_network_files(
    network_path: impl AsRef<Path>,
    evidence_path: impl AsRef<Path>,
) -> Result<Network, ExecError> {
    let network_source = read_source(network_path.as_ref())?;
    let evidence_source = read_source(evidence_path.as_ref())?;
    load_network(&network_source, &evidence_source)
}

fn read_source(path: &Path) -> Result<String, ExecError> {
    fs::read_to_string(path).map_err(|source| ExecError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Results of running both samplers on one network.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InferenceReport {
    /// Seed both runs were derived from.
    pub seed: u64,
    pub rejection: RejectionEstimate,
    pub weighting: WeightedEstimate,
}

impl InferenceReport {
    /// Rejection-sampling posterior, or `None` if no trial was accepted.
    pub fn rejection_probability(&self) -> Option<f64> {
        self.rejection.probability().ok()
    }
}

/// Runs rejection sampling and then likelihood weighting with the same
/// configuration.
///
/// Both samplers use the configured seed (or one entropy seed shared by both
/// runs). The likelihood-weighting run is offset so its trial streams differ
/// from the rejection run's.
pub fn run_inference(network: &Network, config: SamplerConfig) -> Result<InferenceReport, ExecError> {
    let seed = config.resolve_seed();
    let rejection = RejectionSampler::new(config.seeded(seed))?.run(network)?;
    let weighting =
        LikelihoodWeightingSampler::new(config.seeded(seed.wrapping_add(1)))?.run(network)?;
    Ok(InferenceReport {
        seed,
        rejection,
        weighting,
    })
}
