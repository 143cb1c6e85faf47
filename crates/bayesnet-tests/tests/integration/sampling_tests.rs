//! End-to-end sampling scenarios.
//!
//! Tolerances are about four standard errors of the estimate, so these are
//! stable for any seed. Rejection sampling under the default policy keeps
//! only the trials whose resampled evidence matched, so its tolerance is
//! widened by the inverse square root of the acceptance rate.

use bayesnet_core::{
    run_inference, run_likelihood_weighting, run_rejection_sampling, EvidencePolicy, ExecError,
    LikelihoodWeightingSampler, RejectionSampler, SamplerConfig, WeightPropagation,
};
use bayesnet_tests::{
    assert_close, network, COIN, COIN_AND_CHILD, SPRINKLER, SPRINKLER_WET_GRASS_MARGINAL,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const N: usize = 10_000;

#[test]
fn single_coin_converges_to_one_half() {
    let net = network(COIN, "?");
    let mut rng = StdRng::seed_from_u64(10);
    let rejection = run_rejection_sampling(&net, N, &mut rng).unwrap();
    let (weighting, _) = run_likelihood_weighting(&net, N, &mut rng).unwrap();
    assert_close(rejection, 0.5, 0.03, "rejection");
    assert_close(weighting, 0.5, 0.03, "likelihood weighting");
}

#[test]
fn free_parent_gives_the_marginal() {
    // P(B) = 0.5 * 0.1 + 0.5 * 0.9 = 0.5
    let net = network(COIN_AND_CHILD, "- ?");
    let mut rng = StdRng::seed_from_u64(11);
    let rejection = run_rejection_sampling(&net, N, &mut rng).unwrap();
    let (weighting, _) = run_likelihood_weighting(&net, N, &mut rng).unwrap();
    assert_close(rejection, 0.5, 0.03, "rejection");
    assert_close(weighting, 0.5, 0.03, "likelihood weighting");
}

#[test]
fn observed_parent_conditions_both_samplers() {
    let net = network(COIN_AND_CHILD, "t ?");
    let mut rng = StdRng::seed_from_u64(12);

    let (weighting, _) = run_likelihood_weighting(&net, N, &mut rng).unwrap();
    assert_close(weighting, 0.9, 0.02, "likelihood weighting");

    // About half the trials are rejected, so the rejection estimate rests on
    // ~5000 samples instead of 10000.
    let sampler = RejectionSampler::new(SamplerConfig::with_samples(N)).unwrap();
    let estimate = sampler.sample(&net, &mut rng).unwrap();
    assert_close(estimate.acceptance_rate().unwrap(), 0.5, 0.03, "acceptance rate");
    assert_close(estimate.probability().unwrap(), 0.9, 0.03, "rejection");
}

#[test]
fn clamping_keeps_every_trial() {
    let net = network(COIN_AND_CHILD, "t ?");
    let config = SamplerConfig {
        evidence_policy: EvidencePolicy::Clamp,
        ..SamplerConfig::with_samples(N).seeded(13)
    };
    let estimate = RejectionSampler::new(config).unwrap().run(&net).unwrap();
    assert_eq!(estimate.accepted, N);
    assert_close(estimate.probability().unwrap(), 0.9, 0.02, "clamped rejection");
}

#[test]
fn false_evidence_conditions_the_other_way() {
    let net = network(COIN_AND_CHILD, "f ?");
    let mut rng = StdRng::seed_from_u64(14);
    let (weighting, _) = run_likelihood_weighting(&net, N, &mut rng).unwrap();
    let rejection = run_rejection_sampling(&net, N, &mut rng).unwrap();
    assert_close(weighting, 0.1, 0.02, "likelihood weighting");
    assert_close(rejection, 0.1, 0.02, "rejection");
}

#[test]
fn zero_samples_has_no_rejection_estimate() {
    let net = network(COIN, "?");
    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(
        run_rejection_sampling(&net, 0, &mut rng),
        Err(ExecError::NoAcceptedSamples { attempted: 0 })
    ));
    assert!(run_likelihood_weighting(&net, 0, &mut rng).is_err());
}

#[test]
fn sprinkler_without_evidence_matches_exact_marginal() {
    let net = network(SPRINKLER, "- - - ?");
    for propagation in [WeightPropagation::LastParent, WeightPropagation::ParentProduct] {
        let config = SamplerConfig {
            weight_propagation: propagation,
            ..SamplerConfig::with_samples(20_000)
        };
        let estimate = LikelihoodWeightingSampler::new(config)
            .unwrap()
            .sample_seeded(&net, 15)
            .unwrap();
        assert_close(
            estimate.true_fraction().unwrap(),
            SPRINKLER_WET_GRASS_MARGINAL,
            0.015,
            "wet grass marginal",
        );
    }
}

#[test]
fn sprinkler_with_observed_root() {
    // P(WetGrass | Cloudy) = 0.7452
    let net = network(SPRINKLER, "t - - ?");
    let report = run_inference(&net, SamplerConfig::with_samples(20_000).seeded(16)).unwrap();
    assert_close(report.weighting.true_fraction().unwrap(), 0.7452, 0.015, "likelihood weighting");
    assert_close(report.rejection_probability().unwrap(), 0.7452, 0.02, "rejection");
}

#[test]
fn weight_average_stays_within_unit_interval() {
    let net = network(SPRINKLER, "t f - ?");
    let mut rng = StdRng::seed_from_u64(17);
    let (p, w) = run_likelihood_weighting(&net, 2_000, &mut rng).unwrap();
    assert!((0.0..=1.0).contains(&p));
    assert!((0.0..=1.0).contains(&w));
}
