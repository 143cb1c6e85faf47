//! Loading networks and evidence from text and files.

use bayesnet_core::{load_network, load_network_files, Classification, ExecError, NodeId};
use bayesnet_tests::{network, COIN_AND_CHILD, SPRINKLER};
use std::fs;

#[test]
fn bare_and_bracketed_probabilities_load_identically() {
    let bare = network("A:[] 0.5\nB:[A] 0.1 0.9\n", "- ?");
    let bracketed = network("A: [] [0.5]\nB: [A] [0.1 0.9]\n", "- ?");
    for (id, node) in bare.iter() {
        assert_eq!(node.cpt(), bracketed.node(id).cpt());
        assert_eq!(node.parents(), bracketed.node(id).parents());
    }
}

#[test]
fn sprinkler_fixture_resolves_parents_by_name() {
    let net = network(SPRINKLER, "- - - ?");
    let wet = net.query_node();
    assert_eq!(wet.name(), "WetGrass");
    let parents: Vec<&str> = wet.parents().iter().map(|&p| net.node(p).name()).collect();
    assert_eq!(parents, ["Sprinkler", "Rain"]);
    assert_eq!(net.id_of("Cloudy"), Some(NodeId(0)));
    assert!(net.get("Cloudy").is_some_and(|n| n.is_root()));
}

#[test]
fn evidence_classifies_by_first_character() {
    let net = network(SPRINKLER, "true, f, -, ?");
    assert_eq!(net.node(NodeId(0)).classification(), Classification::FixedTrue);
    assert_eq!(net.node(NodeId(1)).classification(), Classification::FixedFalse);
    assert_eq!(net.node(NodeId(2)).classification(), Classification::Free);
    assert_eq!(net.evidence(), [NodeId(0), NodeId(1)]);
}

#[test]
fn malformed_network_is_a_parse_error() {
    for source in ["A [] 0.5\n", "A:[] 0.5\nB:[A] 0.10.9\n", "A:[] 0.5\nB:[A] 1-0\n"] {
        assert!(
            matches!(load_network(source, "- ?"), Err(ExecError::ParseError(_))),
            "{source:?} should not parse"
        );
    }
}

#[test]
fn evidence_lines_after_the_first_are_ignored() {
    let net = network(COIN_AND_CHILD, "t ?\nthis line is not evidence\n");
    assert_eq!(net.evidence(), [NodeId(0)]);
    assert_eq!(net.query(), NodeId(1));
}

#[test]
fn structural_problems_are_validation_errors() {
    let cases = [
        ("A:[] 0.5\nB:[C] 0.1 0.9\n", "- ?", "unknown parent"),
        ("A:[] 0.5\nB:[A] 0.1\n", "- ?", "short table"),
        ("A:[] 1.5\n", "?", "out of range"),
        ("A:[B] 0.1 0.9\nB:[A] 0.1 0.9\n", "- ?", "cycle"),
        (COIN_AND_CHILD, "?", "too few tokens"),
        (COIN_AND_CHILD, "? ?", "two queries"),
        (COIN_AND_CHILD, "t f", "no query"),
    ];
    for (source, evidence, label) in cases {
        assert!(
            matches!(load_network(source, evidence), Err(ExecError::ValidationError(_))),
            "{label}: expected a validation error"
        );
    }
}

#[test]
fn unknown_evidence_token_is_rejected() {
    assert!(load_network(COIN_AND_CHILD, "x ?").is_err());
}

#[test]
fn files_load_like_text() {
    let dir = tempfile::tempdir().unwrap();
    let net_path = dir.path().join("sprinkler.net");
    let ev_path = dir.path().join("sprinkler.ev");
    fs::write(&net_path, SPRINKLER).unwrap();
    fs::write(&ev_path, "-,-,t,?\n").unwrap();

    let from_files = load_network_files(&net_path, &ev_path).unwrap();
    let from_text = network(SPRINKLER, "-,-,t,?");
    assert_eq!(from_files.len(), from_text.len());
    assert_eq!(from_files.query(), from_text.query());
    assert_eq!(from_files.evidence(), from_text.evidence());
}

#[test]
fn unreadable_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let ev_path = dir.path().join("present.ev");
    fs::write(&ev_path, "?").unwrap();
    let err = load_network_files(dir.path().join("missing.net"), &ev_path).unwrap_err();
    assert!(matches!(err, ExecError::Io { .. }));
    assert!(err.to_string().contains("missing.net"));
}

#[test]
fn demo_inputs_load() {
    let demos = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos");
    for (net, ev, query) in [
        ("sprinkler.net", "sprinkler.ev", "WetGrass"),
        ("coin.net", "coin.ev", "B"),
    ] {
        let loaded = load_network_files(demos.join(net), demos.join(ev))
            .unwrap_or_else(|e| panic!("{net}: {e}"));
        assert_eq!(loaded.query_node().name(), query);
    }
}
