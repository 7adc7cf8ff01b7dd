use clap::Args;
use tracing::info;

use tautocrab::harness::{run_suite, Suite};

use crate::cli::{print_reports, OutputFormat, RunArgs};

#[derive(Args)]
pub struct SuiteArgs {
    /// Battery to run: basic, extended or high-complexity
    #[arg(default_value = "basic")]
    pub suite: Suite,

    #[command(flatten)]
    pub run: RunArgs,
}

#[allow(clippy::needless_pass_by_value)]
pub fn run(args: SuiteArgs, format: OutputFormat) -> anyhow::Result<()> {
    let (config, options) = args.suite.defaults();
    let (config, options) = args.run.resolve(config, options)?;
    let cases = args.suite.cases();
    info!(suite = %args.suite, cases = cases.len(), "processing test cases");
    let reports = run_suite(&cases, &config, &options);
    let failed = reports.iter().filter(|r| r.is_error()).count();
    info!(molecules = reports.len(), failed, "suite complete");
    print_reports(&reports, format)
}
