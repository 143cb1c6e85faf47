//! # Abstract Syntax Tree
//!
//! Decoded forms of the two input artifacts:
//!
//! - **NetworkAst**: node declarations in file order, each with its ordered
//!   parent names and conditional probability table
//! - **EvidenceAst**: one classification token per node, aligned with the
//!   declaration order of the network (positional, not by name)
//!
//! Probabilities are stored as parsed `f64` values.

use crate::errors::SourcePosition;

/// A parsed network definition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NetworkAst {
    /// Node declarations in file order
    pub nodes: Vec<NodeDecl>,
}

impl NetworkAst {
    /// Number of declared nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A single `NAME:[PARENTS] PROBS` line.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDecl {
    /// The node name
    pub name: String,
    /// Parent names; order fixes the CPT bit index (bit `n` is parent `n`)
    pub parents: Vec<String>,
    /// P(node = true | parent assignment), indexed by the assignment's bit pattern
    pub cpt: Vec<f64>,
    /// Where the declaration starts, when it came from source text
    pub position: Option<SourcePosition>,
}

/// Classification carried by one evidence token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvidenceKind {
    /// `t`: observed true
    True,
    /// `f`: observed false
    False,
    /// `?`: the query target
    Query,
    /// `-`: unobserved, sampled every trial
    Unknown,
}

impl EvidenceKind {
    /// Classifies a token by its first character.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.chars().next()? {
            't' => Some(Self::True),
            'f' => Some(Self::False),
            '?' => Some(Self::Query),
            '-' => Some(Self::Unknown),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::True => 't',
            Self::False => 'f',
            Self::Query => '?',
            Self::Unknown => '-',
        }
    }
}

/// One token of an evidence assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceToken {
    /// Raw token text as written
    pub text: String,
    pub kind: EvidenceKind,
    pub position: Option<SourcePosition>,
}

/// A parsed evidence assignment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EvidenceAst {
    pub tokens: Vec<EvidenceToken>,
}

impl EvidenceAst {
    /// Builds an assignment from classifications alone (no source text).
    pub fn from_kinds(kinds: impl IntoIterator<Item = EvidenceKind>) -> Self {
        Self {
            tokens: kinds
                .into_iter()
                .map(|kind| EvidenceToken {
                    text: kind.symbol().to_string(),
                    kind,
                    position: None,
                })
                .collect(),
        }
    }

    pub fn kinds(&self) -> impl Iterator<Item = EvidenceKind> + '_ {
        self.tokens.iter().map(|t| t.kind)
    }

    /// Index of every `?` token.
    pub fn query_indices(&self) -> Vec<usize> {
        self.tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.kind == EvidenceKind::Query)
            .map(|(i, _)| i)
            .collect()
    }
}
