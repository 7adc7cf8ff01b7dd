use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use tautocrab::harness::{parse_batch, run_suite, SuiteOptions};
use tautocrab::tautomer::EnumeratorConfig;

use crate::cli::{print_reports, OutputFormat, RunArgs};

#[derive(Args)]
pub struct BatchArgs {
    /// File with one `SMILES [name]` per line
    #[arg(required = true)]
    pub input: PathBuf,

    #[command(flatten)]
    pub run: RunArgs,
}

#[allow(clippy::needless_pass_by_value)]
pub fn run(args: BatchArgs, format: OutputFormat) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let cases = parse_batch(&text);
    if cases.is_empty() {
        anyhow::bail!("{} lists no molecules", args.input.display());
    }
    let (config, options) = args
        .run
        .resolve(EnumeratorConfig::default(), SuiteOptions::default())?;
    info!(molecules = cases.len(), input = %args.input.display(), "processing batch");
    let reports = run_suite(&cases, &config, &options);
    print_reports(&reports, format)
}
