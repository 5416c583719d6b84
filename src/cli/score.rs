//! Score command - compare two texts directly with the similarity scorer.
//!
//! Useful for tuning thresholds: the printed status is what the aligner
//! would assign if these two sections were paired.

use clap::Args;

use crate::cli::OutputFormat;
use crate::core::types::DiffStatus;
use crate::matching::engine::{DEFAULT_CANDIDATE_THRESHOLD, DEFAULT_MATCH_THRESHOLD};
use crate::matching::scoring::{label_similarity, similarity};

/// Arguments for the score command
#[derive(Args)]
pub struct ScoreArgs {
    /// First text
    #[arg(required = true)]
    pub a: String,

    /// Second text
    #[arg(required = true)]
    pub b: String,

    /// Compare as chapter headings (case-insensitive)
    #[arg(long)]
    pub labels: bool,

    /// Minimum similarity for two sections to be paired
    #[arg(long, default_value_t = DEFAULT_CANDIDATE_THRESHOLD)]
    pub candidate_threshold: f64,

    /// Similarity above which a pair counts as unchanged
    #[arg(long, default_value_t = DEFAULT_MATCH_THRESHOLD)]
    pub match_threshold: f64,
}

/// Execute the score command
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run(args: &ScoreArgs, format: OutputFormat) -> anyhow::Result<()> {
    let score = if args.labels {
        label_similarity(&args.a, &args.b)
    } else {
        similarity(&args.a, &args.b)
    };

    // Pairs at or below the candidate cutoff would stay orphans
    let status = (score > args.candidate_threshold)
        .then(|| DiffStatus::from_score(score, args.match_threshold));

    match format {
        OutputFormat::Text => {
            println!("Similarity: {:.4} ({:.1}%)", score, score * 100.0);
            match status {
                Some(status) => println!("Status:     {status}"),
                None => println!(
                    "Status:     unpaired (at or below candidate threshold {:.2})",
                    args.candidate_threshold
                ),
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "score": score,
                "paired": status.is_some(),
                "status": status,
                "candidate_threshold": args.candidate_threshold,
                "match_threshold": args.match_threshold,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("score\tstatus");
            println!(
                "{:.4}\t{}",
                score,
                status.map_or_else(|| "UNPAIRED".to_string(), |s| s.to_string())
            );
        }
    }

    Ok(())
}
