use clap::Args;
use tracing::info;

use tautocrab::harness::{run_suite, SuiteOptions, TestCase};
use tautocrab::tautomer::EnumeratorConfig;

use crate::cli::{print_reports, OutputFormat, RunArgs};

#[derive(Args)]
pub struct EnumerateArgs {
    /// Input molecules as SMILES
    #[arg(required = true)]
    pub smiles: Vec<String>,

    #[command(flatten)]
    pub run: RunArgs,
}

#[allow(clippy::needless_pass_by_value)]
pub fn run(args: EnumerateArgs, format: OutputFormat) -> anyhow::Result<()> {
    let (config, options) = args
        .run
        .resolve(EnumeratorConfig::default(), SuiteOptions::default())?;
    info!(molecules = args.smiles.len(), max_tautomers = config.max_tautomers.get(), "enumerating");
    let cases: Vec<TestCase> = args
        .smiles
        .iter()
        .map(|smiles| TestCase::new(smiles.as_str(), smiles.as_str()))
        .collect();
    let reports = run_suite(&cases, &config, &options);
    print_reports(&reports, format)?;
    if reports.iter().all(|r| r.is_error()) {
        anyhow::bail!("no input could be processed");
    }
    Ok(())
}
