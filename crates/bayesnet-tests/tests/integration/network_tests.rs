//! Network sharing and per-trial isolation.

use bayesnet_core::engine::evaluator::{resolve_rejection, resolve_weighted};
use bayesnet_core::{EvidencePolicy, NodeId, WeightPropagation};
use bayesnet_tests::{network, SPRINKLER};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn resolving_one_copy_does_not_touch_another() {
    let net = network(SPRINKLER, "- - - ?");
    let mut rng = StdRng::seed_from_u64(0);

    let mut first = net.instantiate();
    let untouched = net.instantiate();
    resolve_rejection(&mut first, net.query(), EvidencePolicy::default(), &mut rng).unwrap();

    assert_eq!(first.realized_count(), 4);
    assert_eq!(untouched.realized_count(), 0);
    for (id, _) in net.iter() {
        assert!(untouched.realized(id).is_none());
    }
}

#[test]
fn trials_on_copies_do_not_leak_into_the_template() {
    let net = network(SPRINKLER, "t - - ?");
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..100 {
        let mut inst = net.instantiate();
        resolve_weighted(&mut inst, net.query(), WeightPropagation::LastParent, &mut rng).unwrap();
    }
    let fresh = net.instantiate();
    assert_eq!(fresh.realized_count(), 0);
    assert_eq!(fresh.value(NodeId(0)), Some(true));
}

#[test]
fn clones_share_structure() {
    let net = network(SPRINKLER, "- - - ?");
    let clone = net.clone();
    assert_eq!(clone.query(), net.query());
    assert!(std::ptr::eq(clone.query_node(), net.query_node()));
}

#[test]
fn query_closure_lists_ancestors_before_descendants() {
    let net = network(SPRINKLER, "- ? - -");
    // Sprinkler depends only on Cloudy.
    assert_eq!(net.query_closure(), [NodeId(0), NodeId(1)]);

    let net = network(SPRINKLER, "- - - ?");
    let closure = net.query_closure();
    assert_eq!(closure.len(), 4);
    assert_eq!(closure.first(), Some(&NodeId(0)));
    assert_eq!(closure.last(), Some(&NodeId(3)));
}

#[test]
fn evidence_below_the_query_is_never_visited() {
    // WetGrass is observed but Rain (the query) does not depend on it.
    let net = network(SPRINKLER, "- - ? t");
    assert_eq!(net.evidence(), [NodeId(3)]);
    assert!(net.query_evidence().is_empty());
    let mut rng = StdRng::seed_from_u64(2);
    let mut inst = net.instantiate();
    resolve_rejection(&mut inst, net.query(), EvidencePolicy::default(), &mut rng).unwrap();
    assert!(inst.realized(NodeId(3)).is_none());
    assert!(inst.is_consistent_with_evidence());
}
