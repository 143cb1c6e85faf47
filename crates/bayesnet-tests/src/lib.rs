//! Shared fixtures for the workspace integration tests.

use bayesnet_core::{load_network, Network};

/// One root node, `P(A) = 0.5`.
pub const COIN: &str = "A:[] 0.5\n";

/// `A -> B` with `P(B | ¬A) = 0.1` and `P(B | A) = 0.9`.
pub const COIN_AND_CHILD: &str = "A:[] 0.5\nB:[A] 0.1 0.9\n";

/// The cloudy/sprinkler/rain/wet-grass network, in bracketed form.
pub const SPRINKLER: &str = "\
# Classic four-node network.
Cloudy: [] [0.5]
Sprinkler: [Cloudy] [0.5 0.1]
Rain: [Cloudy] [0.2 0.8]

# bit 0 = Sprinkler, bit 1 = Rain
WetGrass: [Sprinkler Rain] [0.0 0.9 0.9 0.99]
";

/// Exact P(WetGrass) with no evidence.
pub const SPRINKLER_WET_GRASS_MARGINAL: f64 = 0.6471;

/// Loads a fixture network, panicking on invalid input.
pub fn network(source: &str, evidence: &str) -> Network {
    load_network(source, evidence)
        .unwrap_or_else(|e| panic!("fixture failed to load with evidence {evidence:?}: {e}"))
}

pub fn assert_close(actual: f64, expected: f64, tol: f64, label: &str) {
    assert!(
        (actual - expected).abs() <= tol,
        "{} mismatch: expected {:.6}, got {:.6}, diff={:.3e}",
        label,
        expected,
        actual,
        (actual - expected).abs()
    );
}
