//! # Network and Evidence Parser
//!
//! This module implements the parser for the network-definition and
//! evidence-assignment formats using the Pest parser generator.
//!
//! ## Overview
//!
//! The parser transforms source text into a typed AST without performing
//! structural validation. It handles:
//!
//! - Node declarations: `NAME:[PARENT PARENT ...] PROB PROB ...`, with the
//!   probability list optionally wrapped in brackets
//! - Blank lines and `#` comments
//! - Evidence tokens separated by commas and/or whitespace
//!
//! Use [`crate::validate`] to check the resulting AST.
//!
//! ## Grammar
//!
//! The grammar is defined in `grammar.pest` using Pest's PEG syntax.

use crate::ast::*;
use crate::errors::{FrontendError, SourcePosition, ValidationContext};
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "../grammar.pest"]
pub struct BayesNetParser;

/// Parses a network definition into an AST.
///
/// # Example
///
/// ```rust,ignore
/// use bayesnet_frontend::parse_network;
///
/// let ast = parse_network("A:[] 0.5\nB:[A] 0.1 0.9\n")?;
/// assert_eq!(ast.nodes.len(), 2);
/// ```
pub fn parse_network(source: &str) -> Result<NetworkAst, FrontendError> {
    let mut nodes = Vec::new();

    let mut pairs = BayesNetParser::parse(Rule::network, source)
        .map_err(|e| FrontendError::ParseError(e.to_string()))?;

    if let Some(network) = pairs.next() {
        for inner in network.into_inner() {
            if inner.as_rule() == Rule::node_decl {
                nodes.push(build_node(inner)?);
            }
        }
    }

    Ok(NetworkAst { nodes })
}

fn build_node(pair: pest::iterators::Pair<Rule>) -> Result<NodeDecl, FrontendError> {
    let position = Some(SourcePosition::from_span(pair.as_span()));
    let mut name = String::new();
    let mut parents = Vec::new();
    let mut cpt = Vec::new();

    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::ident => name = p.as_str().to_string(),
            Rule::parent_list => {
                parents = p.into_inner().map(|i| i.as_str().to_string()).collect();
            }
            Rule::cpt => {
                for n in p.into_inner() {
                    cpt.push(parse_number(n.as_str(), &name)?);
                }
            }
            _ => {}
        }
    }

    Ok(NodeDecl {
        name,
        parents,
        cpt,
        position,
    })
}

fn parse_number(text: &str, node: &str) -> Result<f64, FrontendError> {
    text.parse::<f64>().map_err(|e| {
        FrontendError::ParseError(format!(
            "node '{}': invalid probability '{}': {}",
            node, text, e
        ))
    })
}

/// Parses an evidence assignment into an AST.
///
/// Each token is classified by its first character (`t`, `f`, `?`, `-`).
/// Any other leading character is reported as a diagnostic naming the token.
pub fn parse_evidence(source: &str) -> Result<EvidenceAst, FrontendError> {
    let mut tokens = Vec::new();

    let mut pairs = BayesNetParser::parse(Rule::evidence, source)
        .map_err(|e| FrontendError::ParseError(e.to_string()))?;

    if let Some(evidence) = pairs.next() {
        for (index, token) in evidence
            .into_inner()
            .filter(|p| p.as_rule() == Rule::evidence_token)
            .enumerate()
        {
            let position = Some(SourcePosition::from_span(token.as_span()));
            let text = token.as_str().to_string();
            let kind = EvidenceKind::from_token(&text).ok_or_else(|| {
                FrontendError::validation(
                    "expected a token starting with 't', 'f', '?' or '-'",
                    Some(ValidationContext::Evidence {
                        index,
                        token: text.clone(),
                    }),
                    position,
                )
            })?;
            tokens.push(EvidenceToken {
                text,
                kind,
                position,
            });
        }
    }

    Ok(EvidenceAst { tokens })
}
