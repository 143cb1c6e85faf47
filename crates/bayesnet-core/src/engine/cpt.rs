//! Conditional probability tables.
//!
//! A table for a node with `k` parents holds `2^k` entries. Entry `i` is
//! P(node = true | parents assigned by the binary expansion of `i`), where bit
//! `n` set means parent `n` (in declared order) is true.

use smallvec::SmallVec;

use crate::engine::errors::ExecError;

/// CPT for one boolean node.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalProbabilityTable {
    parent_count: usize,
    probabilities: SmallVec<[f64; 4]>,
}

impl ConditionalProbabilityTable {
    /// Builds a table, checking its length against the parent count and that
    /// every entry is a probability.
    pub fn new(parent_count: usize, probabilities: &[f64]) -> Result<Self, ExecError> {
        let expected = 1usize.checked_shl(parent_count as u32).ok_or_else(|| {
            ExecError::ValidationError(format!("{} parents is too many for a CPT", parent_count))
        })?;
        if probabilities.len() != expected {
            return Err(ExecError::ValidationError(format!(
                "CPT for {} parent(s) needs {} entries, got {}",
                parent_count,
                expected,
                probabilities.len()
            )));
        }
        if let Some(p) = probabilities
            .iter()
            .find(|p| !p.is_finite() || !(0.0..=1.0).contains(*p))
        {
            return Err(ExecError::Numerical(format!(
                "CPT entry {} is not a probability",
                p
            )));
        }
        Ok(Self {
            parent_count,
            probabilities: SmallVec::from_slice(probabilities),
        })
    }

    /// Index of an assignment: the sum of `2^n` over every true parent `n`.
    pub fn index_of(parent_values: &[bool]) -> usize {
        parent_values
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v)
            .fold(0, |acc, (n, _)| acc | (1 << n))
    }

    /// P(node = true | parent_values).
    ///
    /// `parent_values` must hold exactly one resolved value per parent.
    /// A length mismatch is a caller bug and is reported as
    /// [`ExecError::Internal`] rather than clamped.
    pub fn probability(&self, parent_values: &[bool]) -> Result<f64, ExecError> {
        if parent_values.len() != self.parent_count {
            return Err(ExecError::Internal(format!(
                "CPT lookup with {} parent value(s) for a table over {} parent(s)",
                parent_values.len(),
                self.parent_count
            )));
        }
        Ok(self.probabilities[Self::index_of(parent_values)])
    }
}
