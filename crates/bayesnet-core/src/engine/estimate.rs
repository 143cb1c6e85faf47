//! Trial aggregates.
//!
//! Each sampler folds its trials into a small counter struct. Merging two
//! aggregates is associative and commutative, so trials can be split across
//! threads in any grouping and combined afterwards.

use crate::engine::errors::ExecError;
use crate::engine::instance::Outcome;

/// A per-trial result that can be combined with others.
pub trait TrialAggregate: Default + Send {
    fn merge(self, other: Self) -> Self;
}

/// Counts from a rejection-sampling run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RejectionEstimate {
    /// Trials run.
    pub attempted: usize,
    /// Trials whose evidence nodes all matched their observations.
    pub accepted: usize,
    /// Accepted trials in which the query came out true.
    pub true_count: usize,
}

impl RejectionEstimate {
    /// The aggregate of a single trial.
    pub fn trial(consistent: bool, query_value: bool) -> Self {
        Self {
            attempted: 1,
            accepted: consistent as usize,
            true_count: (consistent && query_value) as usize,
        }
    }

    /// Estimated P(query = true | evidence): `true_count / accepted`.
    ///
    /// Fails with [`ExecError::NoAcceptedSamples`] when no trial was accepted
    /// (including when none was attempted).
    pub fn probability(&self) -> Result<f64, ExecError> {
        if self.accepted == 0 {
            return Err(ExecError::NoAcceptedSamples {
                attempted: self.attempted,
            });
        }
        Ok(self.true_count as f64 / self.accepted as f64)
    }

    /// Fraction of attempted trials that were accepted.
    pub fn acceptance_rate(&self) -> Option<f64> {
        (self.attempted > 0).then(|| self.accepted as f64 / self.attempted as f64)
    }

    pub fn rejected(&self) -> usize {
        self.attempted - self.accepted
    }
}

impl TrialAggregate for RejectionEstimate {
    fn merge(self, other: Self) -> Self {
        Self {
            attempted: self.attempted + other.attempted,
            accepted: self.accepted + other.accepted,
            true_count: self.true_count + other.true_count,
        }
    }
}

/// Counts and weight sum from a likelihood-weighting run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightedEstimate {
    /// Trials run.
    pub trials: usize,
    /// Trials in which the query came out true.
    pub true_count: usize,
    /// Sum of signed query weights (`+w` when true, `-w` when false).
    pub weight_total: f64,
}

impl WeightedEstimate {
    /// The aggregate of a single trial's query outcome.
    pub fn trial(query: Outcome) -> Self {
        Self {
            trials: 1,
            true_count: query.value as usize,
            weight_total: query.signed_weight(),
        }
    }

    /// `true_count / trials`: the estimated P(query = true | evidence).
    pub fn true_fraction(&self) -> Result<f64, ExecError> {
        self.per_trial(self.true_count as f64)
    }

    /// `|weight_total| / trials`: the average importance weight, a diagnostic.
    pub fn mean_abs_weight(&self) -> Result<f64, ExecError> {
        self.per_trial(self.weight_total.abs())
    }

    /// `(true_fraction, mean_abs_weight)`.
    pub fn summary(&self) -> Result<(f64, f64), ExecError> {
        Ok((self.true_fraction()?, self.mean_abs_weight()?))
    }

    fn per_trial(&self, total: f64) -> Result<f64, ExecError> {
        if self.trials == 0 {
            return Err(ExecError::Execution(
                "likelihood weighting ran no trials".into(),
            ));
        }
        Ok(total / self.trials as f64)
    }
}

impl TrialAggregate for WeightedEstimate {
    fn merge(self, other: Self) -> Self {
        Self {
            trials: self.trials + other.trials,
            true_count: self.true_count + other.true_count,
            weight_total: self.weight_total + other.weight_total,
        }
    }
}
