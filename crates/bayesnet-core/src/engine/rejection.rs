//! Rejection sampling.
//!
//! Each trial resolves the query on a fresh [`NetworkInstance`] and is
//! accepted only if every evidence node's value matches its observation. The
//! estimate is the fraction of accepted trials in which the query was true.
//!
//! With [`EvidencePolicy::ResampleAndReject`] (the default), evidence nodes
//! reached while resolving the query are sampled like any other node. Trials
//! where they come out wrong are rejected afterwards, so the acceptance rate
//! falls with the prior probability of the evidence. [`EvidencePolicy::Clamp`]
//! holds evidence at its observed value instead, and every trial is accepted.
//!
//! [`NetworkInstance`]: crate::engine::instance::NetworkInstance

use rand::Rng;

use crate::engine::config::{EvidencePolicy, SamplerConfig};
use crate::engine::errors::ExecError;
use crate::engine::estimate::RejectionEstimate;
use crate::engine::evaluator::resolve_rejection;
use crate::engine::network::Network;
use crate::engine::trials;

/// Rejection sampler over a fixed network.
#[derive(Debug, Clone, Copy)]
pub struct RejectionSampler {
    config: SamplerConfig,
}

impl RejectionSampler {
    pub fn new(config: SamplerConfig) -> Result<Self, ExecError> {
        Ok(Self {
            config: config.validate()?,
        })
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Runs one trial on a private copy of `network`.
    pub fn trial<R: Rng + ?Sized>(
        &self,
        network: &Network,
        rng: &mut R,
    ) -> Result<RejectionEstimate, ExecError> {
        let policy = self.config.evidence_policy;
        let mut instance = network.instantiate();
        let query = resolve_rejection(&mut instance, network.query(), policy, rng)?;
        let consistent =
            policy == EvidencePolicy::Clamp || instance.is_consistent_with_evidence();
        Ok(RejectionEstimate::trial(consistent, query))
    }

    /// Runs `num_samples` trials drawing from `rng`.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        network: &Network,
        rng: &mut R,
    ) -> Result<RejectionEstimate, ExecError> {
        let estimate = trials::run_with_rng(self.config.num_samples, rng, |rng| {
            self.trial(network, rng)
        })?;
        self.log(&estimate);
        Ok(estimate)
    }

    /// Runs `num_samples` trials with per-trial generators derived from `seed`.
    pub fn sample_seeded(
        &self,
        network: &Network,
        seed: u64,
    ) -> Result<RejectionEstimate, ExecError> {
        let estimate = trials::run_seeded(self.config.num_samples, seed, |rng| {
            self.trial(network, rng)
        })?;
        self.log(&estimate);
        Ok(estimate)
    }

    /// Parallel counterpart of [`sample_seeded`](Self::sample_seeded); same
    /// seed, same result.
    #[cfg(feature = "parallel")]
    pub fn sample_parallel(
        &self,
        network: &Network,
        seed: u64,
    ) -> Result<RejectionEstimate, ExecError> {
        let estimate = trials::run_parallel(self.config.num_samples, seed, |rng| {
            self.trial(network, rng)
        })?;
        self.log(&estimate);
        Ok(estimate)
    }

    /// Runs the configured number of trials using the configured seed
    /// (or an entropy seed) and execution mode.
    pub fn run(&self, network: &Network) -> Result<RejectionEstimate, ExecError> {
        let seed = self.config.resolve_seed();
        #[cfg(feature = "parallel")]
        if self.config.parallel {
            return self.sample_parallel(network, seed);
        }
        self.sample_seeded(network, seed)
    }

    fn log(&self, estimate: &RejectionEstimate) {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(
                attempted = estimate.attempted,
                accepted = estimate.accepted,
                true_count = estimate.true_count,
                policy = ?self.config.evidence_policy,
                "rejection sampling finished"
            );
            if estimate.accepted == 0 {
                tracing::warn!(
                    attempted = estimate.attempted,
                    "rejection sampling accepted no trials"
                );
            }
        }
        #[cfg(not(feature = "tracing"))]
        let _ = estimate;
    }
}

/// Estimates P(query = true | evidence) by rejection sampling with the
/// default policy.
///
/// Fails with [`ExecError::NoAcceptedSamples`] if no trial is accepted,
/// including when `num_samples` is zero.
pub fn run_rejection_sampling<R: Rng + ?Sized>(
    network: &Network,
    num_samples: usize,
    rng: &mut R,
) -> Result<f64, ExecError> {
    RejectionSampler::new(SamplerConfig::with_samples(num_samples))?
        .sample(network, rng)?
        .probability()
}
