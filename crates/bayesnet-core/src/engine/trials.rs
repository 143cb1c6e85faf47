//! Trial drivers shared by both samplers.
//!
//! A trial is any closure that takes an RNG and returns a [`TrialAggregate`].
//! The drivers differ only in where each trial's randomness comes from:
//!
//! - [`run_with_rng`]: one caller-supplied generator drives every trial in turn
//! - [`run_seeded`]: trial `i` gets its own generator derived from `(seed, i)`
//! - [`run_parallel`] (feature `parallel`): as `run_seeded`, spread over the
//!   rayon pool
//!
//! `run_seeded` and `run_parallel` draw identical per-trial streams, so with
//! the same seed they produce identical aggregates.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::engine::errors::ExecError;
use crate::engine::estimate::TrialAggregate;

/// Independent generator for one trial.
///
/// Multiplying the seed by an odd constant before adding the trial index
/// keeps nearby `(seed, trial)` pairs from producing overlapping seeds.
pub fn trial_rng(seed: u64, trial: u64) -> StdRng {
    StdRng::seed_from_u64(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15).wrapping_add(trial))
}

/// Runs `num_trials` trials drawing from a single generator.
pub fn run_with_rng<A, R, F>(num_trials: usize, rng: &mut R, mut trial: F) -> Result<A, ExecError>
where
    A: TrialAggregate,
    R: Rng + ?Sized,
    F: FnMut(&mut R) -> Result<A, ExecError>,
{
    let mut total = A::default();
    for _ in 0..num_trials {
        total = total.merge(trial(&mut *rng)?);
    }
    Ok(total)
}

/// Runs `num_trials` trials, each with its own generator from [`trial_rng`].
pub fn run_seeded<A, F>(num_trials: usize, seed: u64, trial: F) -> Result<A, ExecError>
where
    A: TrialAggregate,
    F: Fn(&mut StdRng) -> Result<A, ExecError>,
{
    let mut total = A::default();
    for i in 0..num_trials {
        total = total.merge(trial(&mut trial_rng(seed, i as u64))?);
    }
    Ok(total)
}

/// Runs `num_trials` trials on the rayon pool, each with its own generator
/// from [`trial_rng`].
#[cfg(feature = "parallel")]
pub fn run_parallel<A, F>(num_trials: usize, seed: u64, trial: F) -> Result<A, ExecError>
where
    A: TrialAggregate,
    F: Fn(&mut StdRng) -> Result<A, ExecError> + Sync,
{
    (0..num_trials)
        .into_par_iter()
        .map(|i| trial(&mut trial_rng(seed, i as u64)))
        .try_reduce(A::default, |a, b| Ok(a.merge(b)))
}
