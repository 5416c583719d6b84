use std::path::PathBuf;

use clap::Args;

use crate::cli::{load_table, truncate, OutputFormat};
use crate::core::row::DiffRow;
use crate::core::types::DiffStatus;
use crate::matching::assembly::group_by_category;
use crate::matching::engine::{Alignment, AlignmentConfig, AlignmentEngine};
use crate::matching::summary::AlignmentSummary;
use crate::parsing;

#[derive(Args)]
pub struct AlignArgs {
    /// Older edition (JSON, TSV, or CSV)
    #[arg(required = true)]
    pub left: PathBuf,

    /// Newer edition (JSON, TSV, or CSV)
    #[arg(required = true)]
    pub right: PathBuf,

    /// Path to custom taxonomy file
    #[arg(long)]
    pub taxonomy: Option<PathBuf>,

    /// Path to a JSON config file with alignment thresholds
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Minimum similarity for two sections to be paired (default 0.55)
    #[arg(long)]
    pub candidate_threshold: Option<f64>,

    /// Similarity above which a pair counts as unchanged (default 0.85)
    #[arg(long)]
    pub match_threshold: Option<f64>,

    /// Minimum heading similarity for mapping onto the taxonomy (default 0.4)
    #[arg(long)]
    pub category_threshold: Option<f64>,

    /// Orphan pair count above which cross-category matching is exact only (default 2000)
    #[arg(long)]
    pub complexity_ceiling: Option<usize>,

    /// Omit unchanged (MATCH) rows from the output
    #[arg(long)]
    pub changes_only: bool,
}

/// Execute align subcommand
///
/// # Errors
///
/// Returns an error if an edition, the taxonomy, or the config cannot be
/// loaded, or the resulting thresholds are invalid.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: AlignArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let table = load_table(args.taxonomy.as_deref())?;
    let config = build_config(&args)?;

    if verbose {
        eprintln!("Loaded taxonomy with {} categories", table.len());
        eprintln!(
            "Thresholds: candidate {:.2}, match {:.2}, category {:.2}, ceiling {}",
            config.candidate_threshold,
            config.match_threshold,
            config.category_threshold,
            config.complexity_ceiling,
        );
    }

    let left = parsing::load_edition(&args.left)?;
    let right = parsing::load_edition(&args.right)?;

    if verbose {
        eprintln!(
            "Parsed {} sections from {} and {} from {}",
            left.len(),
            args.left.display(),
            right.len(),
            args.right.display(),
        );
    }

    let engine = AlignmentEngine::with_config(&table, config);
    let alignment = engine.align_detailed(&left, &right);

    // Summary always covers every row, even when MATCH rows are hidden
    let summary = AlignmentSummary::from_rows(&alignment.rows);
    let rows: Vec<DiffRow> = if args.changes_only {
        alignment
            .rows
            .iter()
            .filter(|r| r.status != DiffStatus::Match)
            .cloned()
            .collect()
    } else {
        alignment.rows.clone()
    };

    match format {
        OutputFormat::Text => print_text_results(&args, &rows, &summary, &alignment, verbose),
        OutputFormat::Json => print_json_results(&args, &rows, &summary, &alignment, engine.config())?,
        OutputFormat::Tsv => print_tsv_results(&rows),
    }

    Ok(())
}

/// Defaults, then the config file, then individual flags
fn build_config(args: &AlignArgs) -> anyhow::Result<AlignmentConfig> {
    let mut config = match &args.config {
        Some(path) => AlignmentConfig::load_from_file(path)?,
        None => AlignmentConfig::default(),
    };

    if let Some(v) = args.candidate_threshold {
        config.candidate_threshold = v;
    }
    if let Some(v) = args.match_threshold {
        config.match_threshold = v;
    }
    if let Some(v) = args.category_threshold {
        config.category_threshold = v;
    }
    if let Some(v) = args.complexity_ceiling {
        config.complexity_ceiling = v;
    }

    config.validate()?;
    Ok(config)
}

fn print_text_results(
    args: &AlignArgs,
    rows: &[DiffRow],
    summary: &AlignmentSummary,
    alignment: &Alignment,
    verbose: bool,
) {
    println!(
        "Comparing {} -> {}\n",
        args.left.display(),
        args.right.display()
    );

    for group in group_by_category(rows) {
        println!("== {} ({}) ==", group.title, group.id);
        for row in group.rows {
            let ids = format!(
                "{:>6} -> {:<6}",
                row.left.as_ref().map_or("-", |s| s.id.as_str()),
                row.right.as_ref().map_or("-", |s| s.id.as_str()),
            );
            let score = row
                .score
                .map_or_else(|| "      ".to_string(), |s| format!("{:5.1}%", s * 100.0));
            let moved = row
                .origin_category_id
                .as_ref()
                .map_or_else(String::new, |origin| format!("  (moved from {origin})"));

            println!("  {:<8} {ids} {score}{moved}", row.status.to_string());

            if verbose {
                if let Some(left) = &row.left {
                    println!("           - {}", truncate(&left.content, 70));
                }
                if let Some(right) = &row.right {
                    println!("           + {}", truncate(&right.content, 70));
                }
            }
        }
        println!();
    }

    println!("{}", "─".repeat(60));
    println!(
        "Rows: {}  (match {}, modified {}, added {}, removed {})",
        summary.total_rows, summary.matched, summary.modified, summary.added, summary.removed
    );
    println!(
        "Moved across categories: {}   Retention: {:.1}%",
        summary.cross_category,
        summary.retention() * 100.0
    );
    if verbose {
        println!(
            "Cross-category strategy: {}",
            format!("{:?}", alignment.orphan_strategy).to_lowercase()
        );
    }
    if summary.is_identical() {
        println!("\nEditions are identical.");
    }
}

fn print_json_results(
    args: &AlignArgs,
    rows: &[DiffRow],
    summary: &AlignmentSummary,
    alignment: &Alignment,
    config: &AlignmentConfig,
) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "left": args.left.display().to_string(),
        "right": args.right.display().to_string(),
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "config": config,
        "orphan_strategy": alignment.orphan_strategy,
        "summary": summary,
        "rows": rows,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_results(rows: &[DiffRow]) {
    println!("category_id\tcategory_title\tleft_id\tright_id\tstatus\tscore\torigin_category_id");
    for row in rows {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            row.category_id,
            row.category_title,
            row.left.as_ref().map_or("", |s| s.id.as_str()),
            row.right.as_ref().map_or("", |s| s.id.as_str()),
            row.status,
            row.score.map_or_else(String::new, |s| format!("{s:.4}")),
            row.origin_category_id
                .as_ref()
                .map_or("", |id| id.as_str()),
        );
    }
}
