use std::path::PathBuf;

use clap::Args;

use crate::cli::{load_table, OutputFormat};
use crate::matching::resolver::{CategoryResolver, ResolvedCategory, DEFAULT_CATEGORY_THRESHOLD};

#[derive(Args)]
pub struct ResolveArgs {
    /// Chapter headings to resolve
    #[arg(required = true, num_args = 1..)]
    pub labels: Vec<String>,

    /// Path to custom taxonomy file
    #[arg(long)]
    pub taxonomy: Option<PathBuf>,

    /// Minimum fuzzy similarity for a heading to map onto a category
    #[arg(long, default_value_t = DEFAULT_CATEGORY_THRESHOLD)]
    pub threshold: f64,
}

/// Execute resolve subcommand
///
/// # Errors
///
/// Returns an error if the taxonomy cannot be loaded or the threshold is
/// outside [0, 1].
pub fn run(args: &ResolveArgs, format: OutputFormat) -> anyhow::Result<()> {
    crate::utils::validation::validate_threshold("category threshold", args.threshold)?;

    let table = load_table(args.taxonomy.as_deref())?;
    let resolver = CategoryResolver::with_threshold(&table, args.threshold);

    let resolved: Vec<(&str, ResolvedCategory)> = args
        .labels
        .iter()
        .map(|label| (label.as_str(), resolver.resolve(label)))
        .collect();

    match format {
        OutputFormat::Text => {
            let label_width = resolved
                .iter()
                .map(|(label, _)| label.chars().count())
                .max()
                .unwrap_or(5)
                .max(5);

            for (label, category) in &resolved {
                let how = if category.canonical {
                    format!("score {:.3}", category.score)
                } else {
                    "no match".to_string()
                };
                println!(
                    "{label:<label_width$}  ->  {} [{}] ({how})",
                    category.title, category.id
                );
            }
        }
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = resolved
                .iter()
                .map(|(label, category)| {
                    serde_json::json!({
                        "label": label,
                        "category": category,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("label\tcategory_id\tcategory_title\tscore\tcanonical");
            for (label, category) in &resolved {
                println!(
                    "{}\t{}\t{}\t{:.4}\t{}",
                    label, category.id, category.title, category.score, category.canonical
                );
            }
        }
    }

    Ok(())
}
