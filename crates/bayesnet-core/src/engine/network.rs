//! # Bayesian Network
//!
//! Immutable network structure shared by every sampling trial.
//!
//! ## Design
//!
//! - Nodes live in an arena (`Vec<Node>`) addressed by [`NodeId`]; parent
//!   edges are stored as ids, never as references, so a trial's state can be
//!   copied without rewiring anything
//! - Names are interned as `Arc<str>` with an `FxHashMap` index for O(1)
//!   lookup by name
//! - The query node id is cached at build time
//! - `Network` wraps its data in an `Arc`, so clones are cheap and share the
//!   structure; per-trial mutation happens in a separate
//!   [`NetworkInstance`], never in the network itself
//!
//! ## Example
//!
//! ```rust,ignore
//! use bayesnet_core::engine::network::NetworkBuilder;
//! use bayesnet_core::engine::evidence::Classification;
//!
//! let network = NetworkBuilder::new()
//!     .node("A", &[], &[0.5], Classification::Free)
//!     .node("B", &["A"], &[0.1, 0.9], Classification::QueryTarget)
//!     .build()?;
//! assert_eq!(network.query_node().name(), "B");
//! ```

use std::sync::Arc;

use bayesnet_frontend::ast::{EvidenceAst, NetworkAst, NodeDecl};
use bayesnet_frontend::validate::{validate_evidence, validate_network};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::engine::cpt::ConditionalProbabilityTable;
use crate::engine::errors::ExecError;
use crate::engine::evidence::{classifications, Classification};
use crate::engine::instance::NetworkInstance;

/// A unique identifier for a node: its position in declaration order.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A named boolean random variable.
#[derive(Debug, Clone)]
pub struct Node {
    name: Arc<str>,
    parents: SmallVec<[NodeId; 4]>,
    cpt: ConditionalProbabilityTable,
    classification: Classification,
}

impl Node {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent ids in declared order (the CPT bit order).
    pub fn parents(&self) -> &[NodeId] {
        &self.parents
    }

    pub fn cpt(&self) -> &ConditionalProbabilityTable {
        &self.cpt
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }
}

#[derive(Debug)]
struct NetworkInner {
    nodes: Vec<Node>,
    index: FxHashMap<Arc<str>, NodeId>,
    query: NodeId,
    evidence: Vec<NodeId>,
    /// The query and its ancestors, parents before children.
    closure: Vec<NodeId>,
    /// Evidence nodes inside `closure`.
    query_evidence: Vec<NodeId>,
}

/// A validated Bayesian network with its evidence classification applied.
///
/// Invariants (checked at construction):
/// - every parent id refers to a node of this network
/// - every CPT has `2^parents` entries, each in `[0, 1]`
/// - the parent graph is acyclic
/// - exactly one node is the [`Classification::QueryTarget`]
#[derive(Debug, Clone)]
pub struct Network {
    inner: Arc<NetworkInner>,
}

impl Network {
    /// Builds a network from parsed input, validating both artifacts.
    pub fn from_ast(network: &NetworkAst, evidence: &EvidenceAst) -> Result<Self, ExecError> {
        validate_network(network)?;
        validate_evidence(network, evidence)?;
        Self::assemble(network, &classifications(evidence))
    }

    /// Builds a network from a validated AST and one classification per node.
    fn assemble(ast: &NetworkAst, classes: &[Classification]) -> Result<Self, ExecError> {
        if classes.len() != ast.len() {
            return Err(ExecError::ValidationError(format!(
                "{} classification(s) for {} node(s)",
                classes.len(),
                ast.len()
            )));
        }
        if u32::try_from(ast.len()).is_err() {
            return Err(ExecError::ValidationError(format!(
                "{} nodes exceeds the supported network size",
                ast.len()
            )));
        }

        let mut index = FxHashMap::default();
        index.reserve(ast.len());
        for (i, decl) in ast.nodes.iter().enumerate() {
            index.insert(Arc::<str>::from(decl.name.as_str()), NodeId(i as u32));
        }

        let nodes = ast
            .nodes
            .iter()
            .zip(classes)
            .map(|(decl, &classification)| build_node(decl, classification, &index))
            .collect::<Result<Vec<_>, _>>()?;

        let mut queries = nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.classification == Classification::QueryTarget)
            .map(|(i, _)| NodeId(i as u32));
        let query = match (queries.next(), queries.next()) {
            (Some(q), None) => q,
            (None, _) => {
                return Err(ExecError::ValidationError(
                    "no query node: exactly one node must be classified '?'".into(),
                ))
            }
            (Some(_), Some(_)) => {
                return Err(ExecError::ValidationError(
                    "more than one query node: exactly one node must be classified '?'".into(),
                ))
            }
        };

        let evidence = nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.classification.is_evidence())
            .map(|(i, _)| NodeId(i as u32))
            .collect::<Vec<_>>();

        let closure = ancestor_closure(&nodes, query);
        let query_evidence = closure
            .iter()
            .copied()
            .filter(|id| nodes[id.index()].classification.is_evidence())
            .collect::<Vec<_>>();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            nodes = nodes.len(),
            evidence = evidence.len(),
            closure = closure.len(),
            query_evidence = query_evidence.len(),
            query = %nodes[query.index()].name,
            "built network"
        );

        Ok(Self {
            inner: Arc::new(NetworkInner {
                nodes,
                index,
                query,
                evidence,
                closure,
                query_evidence,
            }),
        })
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.inner.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.nodes.is_empty()
    }

    /// The node with the given id.
    ///
    /// Ids handed out by this network are always in range.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.inner.nodes[id.index()]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.inner.nodes
    }

    /// Iterates `(id, node)` in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.inner
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }

    pub fn id_of(&self, name: &str) -> Option<NodeId> {
        self.inner.index.get(name).copied()
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.id_of(name).map(|id| self.node(id))
    }

    /// Id of the query target.
    pub fn query(&self) -> NodeId {
        self.inner.query
    }

    pub fn query_node(&self) -> &Node {
        self.node(self.inner.query)
    }

    /// Ids of every `FixedTrue`/`FixedFalse` node, in declaration order.
    pub fn evidence(&self) -> &[NodeId] {
        &self.inner.evidence
    }

    /// A fresh, independent per-trial copy with no realized values.
    pub fn instantiate(&self) -> NetworkInstance<'_> {
        NetworkInstance::new(self)
    }

    /// The query node together with every ancestor, each listed once, parents
    /// before children. These are the only nodes a trial can realize.
    pub fn query_closure(&self) -> &[NodeId] {
        &self.inner.closure
    }

    /// Evidence nodes the query depends on. Evidence outside the closure is
    /// never sampled, so only these can disagree with their observation.
    pub fn query_evidence(&self) -> &[NodeId] {
        &self.inner.query_evidence
    }
}

fn ancestor_closure(nodes: &[Node], query: NodeId) -> Vec<NodeId> {
    fn visit(nodes: &[Node], id: NodeId, visited: &mut [bool], order: &mut Vec<NodeId>) {
        if visited[id.index()] {
            return;
        }
        visited[id.index()] = true;
        for &parent in nodes[id.index()].parents.iter() {
            visit(nodes, parent, visited, order);
        }
        order.push(id);
    }

    let mut visited = vec![false; nodes.len()];
    let mut order = Vec::new();
    visit(nodes, query, &mut visited, &mut order);
    order
}

fn build_node(
    decl: &NodeDecl,
    classification: Classification,
    index: &FxHashMap<Arc<str>, NodeId>,
) -> Result<Node, ExecError> {
    let parents = decl
        .parents
        .iter()
        .map(|p| {
            index.get(p.as_str()).copied().ok_or_else(|| {
                ExecError::ValidationError(format!(
                    "node '{}': unknown parent '{}'",
                    decl.name, p
                ))
            })
        })
        .collect::<Result<SmallVec<[NodeId; 4]>, _>>()?;
    let cpt = ConditionalProbabilityTable::new(parents.len(), &decl.cpt)
        .map_err(|e| ExecError::ValidationError(format!("node '{}': {}", decl.name, e)))?;

    Ok(Node {
        name: Arc::from(decl.name.as_str()),
        parents,
        cpt,
        classification,
    })
}

/// Programmatic construction of a [`Network`].
///
/// Nodes may be added in any order; parents are resolved by name at
/// [`build`](Self::build) time, which runs the same validation as file input.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    ast: NetworkAst,
    classifications: Vec<Classification>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(
        mut self,
        name: &str,
        parents: &[&str],
        cpt: &[f64],
        classification: Classification,
    ) -> Self {
        self.ast.nodes.push(NodeDecl {
            name: name.to_string(),
            parents: parents.iter().map(|p| p.to_string()).collect(),
            cpt: cpt.to_vec(),
            position: None,
        });
        self.classifications.push(classification);
        self
    }

    pub fn build(self) -> Result<Network, ExecError> {
        validate_network(&self.ast)?;
        Network::assemble(&self.ast, &self.classifications)
    }
}
