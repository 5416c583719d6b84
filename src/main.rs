use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod matching;
mod parsing;
mod taxonomy;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("charter_diff=debug,info")
    } else {
        EnvFilter::new("charter_diff=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Align(args) => {
            cli::align::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Resolve(args) => {
            cli::resolve::run(&args, cli.format)?;
        }
        cli::Commands::Score(args) => {
            cli::score::run(&args, cli.format)?;
        }
        cli::Commands::Taxonomy(args) => {
            cli::taxonomy::run(args, cli.format)?;
        }
    }

    Ok(())
}
