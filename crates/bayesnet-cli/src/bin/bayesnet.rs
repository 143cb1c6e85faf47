//! Bayesnet CLI - approximate inference over boolean Bayesian networks
//!
//! Usage:
//!   bayesnet <network> <evidence> <samples>              # Both estimates as percentages
//!   bayesnet <network> <evidence> <samples> --seed 7     # Reproducible run
//!   bayesnet <network> <evidence> <samples> -o json      # Output results as JSON
//!
//! Set `RUST_LOG=bayesnet_core=debug` to see per-run sampler statistics.

use bayesnet_core::{
    load_network_files, run_inference, EvidencePolicy, InferenceReport, Network, SamplerConfig,
    WeightPropagation,
};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bayesnet")]
#[command(version)]
#[command(about = "Estimate P(query | evidence) by rejection sampling and likelihood weighting")]
struct Cli {
    /// Network definition file
    #[arg(value_name = "NETWORK")]
    network: PathBuf,

    /// Evidence file: one of t, f, ?, - per node, in declaration order
    #[arg(value_name = "EVIDENCE")]
    evidence: PathBuf,

    /// Number of trials per sampler
    #[arg(value_name = "SAMPLES")]
    samples: usize,

    /// Seed for reproducible runs (default: random)
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// How rejection sampling treats evidence nodes
    #[arg(long, value_enum, default_value_t = PolicyArg::Resample)]
    evidence_policy: PolicyArg,

    /// How likelihood weighting combines parent weights
    #[arg(long, value_enum, default_value_t = WeightingArg::LastParent)]
    weighting: WeightingArg,

    /// Spread trials over all cores (requires the `parallel` feature)
    #[arg(long)]
    parallel: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
    output: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Sample evidence nodes and reject disagreeing trials
    Resample,
    /// Hold evidence nodes at their observed value
    Clamp,
}

impl From<PolicyArg> for EvidencePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Resample => EvidencePolicy::ResampleAndReject,
            PolicyArg::Clamp => EvidencePolicy::Clamp,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum WeightingArg {
    /// Carry only the last parent's weight
    LastParent,
    /// Multiply all parents' weights
    Product,
}

impl From<WeightingArg> for WeightPropagation {
    fn from(arg: WeightingArg) -> Self {
        match arg {
            WeightingArg::LastParent => WeightPropagation::LastParent,
            WeightingArg::Product => WeightPropagation::ParentProduct,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Summary,
    Json,
    Debug,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    query: &'a str,
    samples: usize,
    config: SamplerConfig,
    rejection_probability: Option<f64>,
    likelihood_probability: f64,
    likelihood_weight_avg: f64,
    report: InferenceReport,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let network = match load_network_files(&cli.network, &cli.evidence) {
        Ok(n) => n,
        Err(e) => {
            eprintln!("Error loading network: {}", e);
            process::exit(1);
        }
    };

    tracing::info!(
        nodes = network.len(),
        evidence = network.evidence().len(),
        query = network.query_node().name(),
        "loaded network"
    );

    let config = SamplerConfig {
        num_samples: cli.samples,
        seed: cli.seed,
        evidence_policy: cli.evidence_policy.into(),
        weight_propagation: cli.weighting.into(),
        parallel: cli.parallel,
    };

    let report = match run_inference(&network, config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error running samplers: {}", e);
            process::exit(1);
        }
    };

    match cli.output {
        OutputFormat::Json => match to_json(&network, config, &report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing to JSON: {}", e);
                process::exit(1);
            }
        },
        OutputFormat::Debug => println!("{:#?}", report),
        OutputFormat::Summary => {
            if let Err(e) = print_summary(cli.samples, &report) {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
    }
}

/// Truncates toward zero, so 0.999 prints as 99%.
fn percent(p: f64) -> i64 {
    (p * 100.0) as i64
}

fn print_summary(samples: usize, report: &InferenceReport) -> Result<(), bayesnet_core::ExecError> {
    let (lw_probability, lw_weight) = report.weighting.summary()?;

    println!("Sampled {} times.", samples);
    match report.rejection_probability() {
        Some(p) => println!("Rejection Sampling yielded true: {}%", percent(p)),
        None => println!(
            "Rejection Sampling yielded no accepted samples ({} rejected)",
            report.rejection.rejected()
        ),
    }
    println!(
        "Likelihood Weighting Sampling yielded true: {}%",
        percent(lw_probability)
    );
    println!("Likelihood Weighting Sampling weight avg: {}", lw_weight);
    Ok(())
}

fn to_json(
    network: &Network,
    config: SamplerConfig,
    report: &InferenceReport,
) -> Result<String, Box<dyn std::error::Error>> {
    let (likelihood_probability, likelihood_weight_avg) = report.weighting.summary()?;
    let output = JsonOutput {
        query: network.query_node().name(),
        samples: config.num_samples,
        config: config.seeded(report.seed),
        rejection_probability: report.rejection_probability(),
        likelihood_probability,
        likelihood_weight_avg,
        report: *report,
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentages_truncate() {
        assert_eq!(percent(0.999), 99);
        assert_eq!(percent(0.5), 50);
        assert_eq!(percent(0.0), 0);
        assert_eq!(percent(1.0), 100);
    }

    #[test]
    fn cli_parses_positional_arguments() {
        let cli = Cli::try_parse_from(["bayesnet", "net.txt", "ev.txt", "10000"]).unwrap();
        assert_eq!(cli.samples, 10_000);
        assert!(cli.seed.is_none());
        assert_eq!(
            EvidencePolicy::from(cli.evidence_policy),
            EvidencePolicy::ResampleAndReject
        );
        assert_eq!(
            WeightPropagation::from(cli.weighting),
            WeightPropagation::LastParent
        );
    }

    #[test]
    fn cli_rejects_non_numeric_sample_count() {
        assert!(Cli::try_parse_from(["bayesnet", "net.txt", "ev.txt", "many"]).is_err());
    }

    #[test]
    fn cli_maps_options() {
        let cli = Cli::try_parse_from([
            "bayesnet",
            "net.txt",
            "ev.txt",
            "5",
            "--seed",
            "3",
            "--evidence-policy",
            "clamp",
            "--weighting",
            "product",
            "-o",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.seed, Some(3));
        assert_eq!(EvidencePolicy::from(cli.evidence_policy), EvidencePolicy::Clamp);
        assert_eq!(
            WeightPropagation::from(cli.weighting),
            WeightPropagation::ParentProduct
        );
        assert!(matches!(cli.output, OutputFormat::Json));
    }
}
