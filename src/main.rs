use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("tautocrab=debug,info")
    } else {
        EnvFilter::new("tautocrab=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Enumerate(args) => cli::enumerate::run(args, cli.format)?,
        cli::Commands::Suite(args) => cli::suite::run(args, cli.format)?,
        cli::Commands::Batch(args) => cli::batch::run(args, cli.format)?,
    }

    Ok(())
}
