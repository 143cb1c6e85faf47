//! Likelihood weighting.
//!
//! Evidence nodes are never sampled: they keep their observed value and pass
//! on the weight inherited from their parents. Every other node reached from
//! the query is sampled from its CPT row and scales the weight by the entry it
//! was drawn with. See [`resolve_weighted`] for the recursion.
//!
//! The run reports two numbers:
//!
//! - the fraction of trials in which the query was true, which is the
//!   probability estimate
//! - the mean magnitude of the signed query weights, a diagnostic of how much
//!   probability mass the sampled paths carried

use rand::Rng;

use crate::engine::config::SamplerConfig;
use crate::engine::errors::ExecError;
use crate::engine::estimate::WeightedEstimate;
use crate::engine::evaluator::resolve_weighted;
use crate::engine::network::Network;
use crate::engine::trials;

/// Likelihood-weighting sampler over a fixed network.
#[derive(Debug, Clone, Copy)]
pub struct LikelihoodWeightingSampler {
    config: SamplerConfig,
}

impl LikelihoodWeightingSampler {
    /// Fails when `num_samples` is zero: there is no meaningful average over
    /// an empty run.
    pub fn new(config: SamplerConfig) -> Result<Self, ExecError> {
        let config = config.validate()?;
        if config.num_samples == 0 {
            return Err(ExecError::ValidationError(
                "likelihood weighting needs at least one sample".into(),
            ));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Runs one trial on a private copy of `network`.
    pub fn trial<R: Rng + ?Sized>(
        &self,
        network: &Network,
        rng: &mut R,
    ) -> Result<WeightedEstimate, ExecError> {
        let mut instance = network.instantiate();
        let query = resolve_weighted(
            &mut instance,
            network.query(),
            self.config.weight_propagation,
            rng,
        )?;
        Ok(WeightedEstimate::trial(query))
    }

    /// Runs `num_samples` trials drawing from `rng`.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        network: &Network,
        rng: &mut R,
    ) -> Result<WeightedEstimate, ExecError> {
        let estimate = trials::run_with_rng(self.config.num_samples, rng, |rng| {
            self.trial(network, rng)
        })?;
        self.log(&estimate);
        Ok(estimate)
    }

    pub fn sample_seeded(
        &self,
        network: &Network,
        seed: u64,
    ) -> Result<WeightedEstimate, ExecError> {
        let estimate = trials::run_seeded(self.config.num_samples, seed, |rng| {
            self.trial(network, rng)
        })?;
        self.log(&estimate);
        Ok(estimate)
    }

    #[cfg(feature = "parallel")]
    pub fn sample_parallel(
        &self,
        network: &Network,
        seed: u64,
    ) -> Result<WeightedEstimate, ExecError> {
        let estimate = trials::run_parallel(self.config.num_samples, seed, |rng| {
            self.trial(network, rng)
        })?;
        self.log(&estimate);
        Ok(estimate)
    }

    pub fn run(&self, network: &Network) -> Result<WeightedEstimate, ExecError> {
        let seed = self.config.resolve_seed();
        #[cfg(feature = "parallel")]
        if self.config.parallel {
            return self.sample_parallel(network, seed);
        }
        self.sample_seeded(network, seed)
    }

    fn log(&self, estimate: &WeightedEstimate) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            trials = estimate.trials,
            true_count = estimate.true_count,
            weight_total = estimate.weight_total,
            propagation = ?self.config.weight_propagation,
            "likelihood weighting finished"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = estimate;
    }
}

/// Estimates P(query = true | evidence) by likelihood weighting with the
/// default weight propagation. Returns `(probability, mean_abs_weight)`.
pub fn run_likelihood_weighting<R: Rng + ?Sized>(
    network: &Network,
    num_samples: usize,
    rng: &mut R,
) -> Result<(f64, f64), ExecError> {
    LikelihoodWeightingSampler::new(SamplerConfig::with_samples(num_samples))?
        .sample(network, rng)?
        .summary()
}
