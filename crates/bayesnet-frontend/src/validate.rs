//! # Structural Validation
//!
//! Checks a parsed network and evidence assignment before anything is sampled:
//!
//! - **Network**: at least one node, unique names, every parent declared,
//!   no parent listed twice, `cpt.len() == 2^parents.len()`, every entry a
//!   finite probability in `[0, 1]`, and an acyclic parent graph
//! - **Evidence**: one token per declared node and exactly one `?` token
//!
//! CPT rows are not required to sum to anything in particular; each entry is
//! an independent P(node = true | assignment).
//!
//! Validation runs once at load time so the recursive evaluator never has to
//! guard against cycles or short tables.

use std::collections::{HashMap, HashSet};

use crate::ast::*;
use crate::errors::{FrontendError, ValidationContext};

/// Largest parent count whose CPT length still fits the index type.
pub const MAX_PARENTS: usize = 30;

/// Validates a parsed network definition.
pub fn validate_network(ast: &NetworkAst) -> Result<(), FrontendError> {
    if ast.is_empty() {
        return Err(FrontendError::validation(
            "network declares no nodes",
            Some(ValidationContext::Network),
            None,
        ));
    }

    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(ast.len());
    for (idx, node) in ast.nodes.iter().enumerate() {
        if seen.insert(node.name.as_str(), idx).is_some() {
            return Err(node_error(node, "duplicate node name"));
        }
    }

    for node in &ast.nodes {
        validate_node(node, &seen)?;
    }

    topological_order(ast).map(|_| ())
}

fn validate_node(node: &NodeDecl, names: &HashMap<&str, usize>) -> Result<(), FrontendError> {
    let mut parents = HashSet::with_capacity(node.parents.len());
    for parent in &node.parents {
        if !names.contains_key(parent.as_str()) {
            return Err(node_error(node, format!("unknown parent '{}'", parent)));
        }
        if !parents.insert(parent.as_str()) {
            return Err(node_error(node, format!("parent '{}' listed twice", parent)));
        }
    }

    if node.parents.len() > MAX_PARENTS {
        return Err(node_error(
            node,
            format!(
                "{} parents exceeds the supported maximum of {}",
                node.parents.len(),
                MAX_PARENTS
            ),
        ));
    }

    let expected = 1usize << node.parents.len();
    if node.cpt.len() != expected {
        return Err(node_error(
            node,
            format!(
                "expected {} probabilities for {} parent(s), found {}",
                expected,
                node.parents.len(),
                node.cpt.len()
            ),
        ));
    }

    if let Some((i, p)) = node
        .cpt
        .iter()
        .enumerate()
        .find(|(_, p)| !p.is_finite() || !(0.0..=1.0).contains(*p))
    {
        return Err(node_error(
            node,
            format!("probability #{} ({}) is not in [0, 1]", i + 1, p),
        ));
    }

    Ok(())
}

/// Returns node indices ordered so that every parent precedes its children.
///
/// Fails with a diagnostic naming a node on a cycle when the parent graph is
/// not a DAG. Parents that are not declared are ignored here; they are
/// reported by [`validate_network`].
pub fn topological_order(ast: &NetworkAst) -> Result<Vec<usize>, FrontendError> {
    let index: HashMap<&str, usize> = ast
        .nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.name.as_str(), i))
        .collect();

    let mut in_degree = vec![0usize; ast.len()];
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); ast.len()];
    for (child, node) in ast.nodes.iter().enumerate() {
        for parent in &node.parents {
            if let Some(&p) = index.get(parent.as_str()) {
                children[p].push(child);
                in_degree[child] += 1;
            }
        }
    }

    // Kahn's algorithm; seeding in declaration order keeps the result stable.
    let mut ready: Vec<usize> = (0..ast.len()).rev().filter(|&i| in_degree[i] == 0).collect();
    let mut order = Vec::with_capacity(ast.len());
    while let Some(i) = ready.pop() {
        order.push(i);
        for &c in children[i].iter().rev() {
            in_degree[c] -= 1;
            if in_degree[c] == 0 {
                ready.push(c);
            }
        }
    }

    if order.len() != ast.len() {
        let stuck = in_degree
            .iter()
            .position(|&d| d > 0)
            .map(|i| &ast.nodes[i])
            .ok_or_else(|| FrontendError::ValidationError("cycle detection failed".into()))?;
        return Err(node_error(stuck, "node lies on a parent cycle"));
    }

    Ok(order)
}

/// Validates an evidence assignment against the network it classifies.
///
/// Tokens correspond to nodes by position in declaration order.
pub fn validate_evidence(network: &NetworkAst, evidence: &EvidenceAst) -> Result<(), FrontendError> {
    if evidence.tokens.len() != network.len() {
        return Err(FrontendError::validation(
            format!(
                "expected {} evidence token(s), one per node, found {}",
                network.len(),
                evidence.tokens.len()
            ),
            Some(ValidationContext::Network),
            evidence.tokens.last().and_then(|t| t.position),
        ));
    }

    let queries = evidence.query_indices();
    match queries.as_slice() {
        [_] => Ok(()),
        [] => Err(FrontendError::validation(
            "no query node: exactly one token must be '?'",
            Some(ValidationContext::Network),
            None,
        )),
        [_, second, ..] => {
            let token = &evidence.tokens[*second];
            Err(FrontendError::validation(
                format!(
                    "{} query tokens: exactly one token must be '?'",
                    queries.len()
                ),
                Some(ValidationContext::Evidence {
                    index: *second,
                    token: token.text.clone(),
                }),
                token.position,
            ))
        }
    }
}

fn node_error(node: &NodeDecl, message: impl Into<String>) -> FrontendError {
    FrontendError::validation(
        message,
        Some(ValidationContext::Node {
            name: node.name.clone(),
        }),
        node.position,
    )
}
