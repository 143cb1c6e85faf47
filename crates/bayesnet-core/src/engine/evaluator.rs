//! # Recursive Ancestor Evaluation
//!
//! Both samplers resolve the query node the same way: recurse into each
//! parent in declared order, collect the parents' values, look up the node's
//! CPT row for that assignment and draw `r ∈ [0, 1)`; the node is true when
//! `r < p`. They differ only in how evidence nodes are treated and in what
//! travels back up the recursion.
//!
//! - [`resolve_rejection`] returns a boolean. Under
//!   [`EvidencePolicy::ResampleAndReject`] evidence nodes are sampled like
//!   any other node and the caller checks consistency afterwards; under
//!   [`EvidencePolicy::Clamp`] they return their observation directly.
//! - [`resolve_weighted`] returns an [`Outcome`]: the value and a weight
//!   magnitude. Evidence nodes return their observation with the weight
//!   inherited from their parents and are never sampled. Sampled nodes
//!   multiply that weight by the CPT entry `p` they were drawn with.
//!
//! Each node is realized at most once per trial. A node reached twice (a
//! shared ancestor) returns the outcome stored in the instance, so every
//! child sees the same value.
//!
//! Recursion depth is bounded by the longest parent chain; the network
//! guarantees the parent graph is acyclic.

use rand::Rng;
use smallvec::SmallVec;

use crate::engine::config::{EvidencePolicy, WeightPropagation};
use crate::engine::errors::ExecError;
use crate::engine::instance::{NetworkInstance, Outcome};
use crate::engine::network::NodeId;

type ParentValues = SmallVec<[bool; 8]>;

/// Resolves `id` for a rejection-sampling trial and returns its value.
pub fn resolve_rejection<R: Rng + ?Sized>(
    instance: &mut NetworkInstance<'_>,
    id: NodeId,
    policy: EvidencePolicy,
    rng: &mut R,
) -> Result<bool, ExecError> {
    if let Some(outcome) = instance.realized(id) {
        return Ok(outcome.value);
    }

    let node = instance.network().node(id);
    if policy == EvidencePolicy::Clamp {
        if let Some(value) = node.classification().fixed_value() {
            instance.realize(id, Outcome { value, weight: 1.0 });
            return Ok(value);
        }
    }

    let mut parent_values = ParentValues::with_capacity(node.parents().len());
    for &parent in node.parents() {
        parent_values.push(resolve_rejection(instance, parent, policy, rng)?);
    }

    let p = node.cpt().probability(&parent_values)?;
    let value = rng.gen::<f64>() < p;
    instance.realize(id, Outcome { value, weight: p });
    Ok(value)
}

/// Resolves `id` for a likelihood-weighting trial.
pub fn resolve_weighted<R: Rng + ?Sized>(
    instance: &mut NetworkInstance<'_>,
    id: NodeId,
    propagation: WeightPropagation,
    rng: &mut R,
) -> Result<Outcome, ExecError> {
    if let Some(outcome) = instance.realized(id) {
        return Ok(outcome);
    }

    let node = instance.network().node(id);
    let mut parent_values = ParentValues::with_capacity(node.parents().len());
    let mut weight = 1.0;
    for &parent in node.parents() {
        let outcome = resolve_weighted(instance, parent, propagation, rng)?;
        parent_values.push(outcome.value);
        weight = match propagation {
            WeightPropagation::LastParent => outcome.weight,
            WeightPropagation::ParentProduct => weight * outcome.weight,
        };
    }

    let outcome = match node.classification().fixed_value() {
        Some(value) => Outcome { value, weight },
        None => {
            let p = node.cpt().probability(&parent_values)?;
            let value = rng.gen::<f64>() < p;
            Outcome {
                value,
                weight: p * weight,
            }
        }
    };

    if !outcome.weight.is_finite() {
        return Err(ExecError::Numerical(format!(
            "non-finite weight {} at node '{}'",
            outcome.weight,
            node.name()
        )));
    }

    instance.realize(id, outcome);
    Ok(outcome)
}
