//! # Bayesnet Frontend
//!
//! Parser, AST, and structural validation for Bayesian network definitions
//! and evidence assignments.

pub mod ast;
pub mod errors;
pub mod parser;
pub mod validate;

// Re-export commonly used types
pub use ast::*;
pub use errors::FrontendError;
pub use parser::{parse_evidence, parse_network};
pub use validate::{validate_evidence, validate_network};

/// Parses and validates a network definition together with its evidence
/// assignment.
pub fn parse_and_validate(
    network_source: &str,
    evidence_source: &str,
) -> Result<(NetworkAst, EvidenceAst), FrontendError> {
    let network = parse_network(network_source)?;
    validate_network(&network)?;
    let evidence = parse_evidence(evidence_source)?;
    validate_evidence(&network, &evidence)?;
    Ok((network, evidence))
}
