//! Command-line interface for tautocrab.
//!
//! - **enumerate**: tautomers of SMILES given on the command line
//! - **suite**: one of the built-in batteries
//! - **batch**: a file of `SMILES [name]` lines
//!
//! ```text
//! tautocrab enumerate "CC(=O)N" "Oc1ccccn1"
//! tautocrab suite high-complexity --format json
//! tautocrab batch molecules.txt --max-tautomers 64 --list-limit 10
//! ```

use clap::{Args, Parser, Subcommand};

use tautocrab::harness::{CaseReport, Outcome, SuiteOptions};
use tautocrab::tautomer::EnumeratorConfig;

pub mod batch;
pub mod enumerate;
pub mod suite;

#[derive(Parser)]
#[command(name = "tautocrab")]
#[command(version)]
#[command(about = "Enumerate and canonicalize tautomers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Enumerate tautomers of the given SMILES
    Enumerate(enumerate::EnumerateArgs),

    /// Run a built-in test battery
    Suite(suite::SuiteArgs),

    /// Run every molecule listed in a file
    Batch(batch::BatchArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Maximum number of tautomers to enumerate per molecule
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_tautomers: Option<u64>,

    /// List at most this many tautomers per molecule
    #[arg(long)]
    pub list_limit: Option<usize>,

    /// Order results by descending tautomer count
    #[arg(long)]
    pub sort_by_count: bool,
}

impl RunArgs {
    /// Flags on top of the given defaults.
    pub fn resolve(
        &self,
        config: EnumeratorConfig,
        options: SuiteOptions,
    ) -> anyhow::Result<(EnumeratorConfig, SuiteOptions)> {
        let config = match self.max_tautomers {
            Some(max) => EnumeratorConfig::with_max(usize::try_from(max)?)?,
            None => config,
        };
        let options = SuiteOptions {
            list_limit: self.list_limit.or(options.list_limit),
            sort_by_count: self.sort_by_count || options.sort_by_count,
        };
        Ok((config, options))
    }
}

pub fn print_reports(reports: &[CaseReport], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for report in reports {
                print_text_report(report);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(reports)?);
        }
    }
    Ok(())
}

fn print_text_report(report: &CaseReport) {
    println!("{} ({})", report.name, report.input);
    match &report.outcome {
        Outcome::Tautomers {
            count,
            tautomers,
            canonical,
            truncated,
            list_truncated,
        } => {
            let bound = if *truncated { " (stopped at bound)" } else { "" };
            println!("  {count} tautomer(s){bound}");
            println!("  canonical: {canonical}");
            for smiles in tautomers {
                let mark = if smiles == canonical { "*" } else { " " };
                println!("  {mark} {smiles}");
            }
            if list_truncated == &Some(true) {
                println!("    ... {} more", count - tautomers.len());
            }
        }
        Outcome::Failed { error } => println!("  error: {error}"),
    }
    println!();
}
