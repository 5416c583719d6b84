use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::{load_table, truncate, OutputFormat};

#[derive(Args)]
pub struct TaxonomyArgs {
    #[command(subcommand)]
    pub command: TaxonomyCommands,
}

#[derive(Subcommand)]
pub enum TaxonomyCommands {
    /// List all categories in the taxonomy
    List {
        /// Path to custom taxonomy file
        #[arg(long)]
        taxonomy: Option<PathBuf>,
    },

    /// Export the taxonomy to a file
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,

        /// Path to custom taxonomy file to export (defaults to embedded)
        #[arg(long)]
        taxonomy: Option<PathBuf>,
    },
}

/// Execute taxonomy subcommand
///
/// # Errors
///
/// Returns an error if the taxonomy cannot be loaded or written.
pub fn run(args: TaxonomyArgs, format: OutputFormat) -> anyhow::Result<()> {
    match args.command {
        TaxonomyCommands::List { taxonomy } => run_list(taxonomy, format),
        TaxonomyCommands::Export { output, taxonomy } => run_export(output, taxonomy),
    }
}

#[allow(clippy::needless_pass_by_value)]
fn run_list(taxonomy_path: Option<PathBuf>, format: OutputFormat) -> anyhow::Result<()> {
    let table = load_table(taxonomy_path.as_deref())?;

    match format {
        OutputFormat::Text => {
            let id_width = table
                .iter()
                .map(|c| c.id.as_str().len())
                .max()
                .unwrap_or(2)
                .max(2);
            let name_width = table
                .iter()
                .map(|c| c.name.chars().count().min(40))
                .max()
                .unwrap_or(4)
                .max(4);

            println!("Canonical Categories ({} categories)\n", table.len());
            println!(
                "{:>3} {:<id_w$} {:<name_w$} Aliases",
                "#",
                "ID",
                "Name",
                id_w = id_width,
                name_w = name_width
            );
            println!("{}", "-".repeat(id_width + name_width + 20));

            for (i, category) in table.iter().enumerate() {
                println!(
                    "{:>3} {:<id_w$} {:<name_w$} {}",
                    i + 1,
                    category.id.as_str(),
                    truncate(&category.name, name_width),
                    category.aliases.join(", "),
                    id_w = id_width,
                    name_w = name_width
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&table.categories)?);
        }
        OutputFormat::Tsv => {
            println!("position\tid\tname\taliases");
            for (i, category) in table.iter().enumerate() {
                println!(
                    "{}\t{}\t{}\t{}",
                    i + 1,
                    category.id,
                    category.name,
                    category.aliases.join("|")
                );
            }
        }
    }

    Ok(())
}

fn run_export(output: PathBuf, taxonomy_path: Option<PathBuf>) -> anyhow::Result<()> {
    let table = load_table(taxonomy_path.as_deref())?;

    let json = table.to_json()?;
    std::fs::write(&output, json)?;

    println!(
        "Exported {} categories to {}",
        table.len(),
        output.display()
    );

    Ok(())
}
