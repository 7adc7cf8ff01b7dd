//! Batch runner that reports tautomers for a battery of molecules.
//!
//! Each case is parsed from SMILES, enumerated and canonicalized, and
//! summarized as a [`CaseReport`] whose JSON form is
//! `{input, name, count, tautomers, canonical, truncated}`, or
//! `{input, name, error}` when the case could not be processed. Cases run in
//! parallel; reports come back in input order.

mod suites;

use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::smiles::{from_smiles, to_canonical_smiles};
use crate::tautomer::{EnumeratorConfig, TautomerEnumerator};

pub use suites::{BASIC, EXTENDED, HIGH_COMPLEXITY};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HarnessError {
    #[error("unknown suite '{0}' (expected basic, extended or high-complexity)")]
    UnknownSuite(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub smiles: String,
    pub name: String,
}

impl TestCase {
    pub fn new(smiles: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            smiles: smiles.into(),
            name: name.into(),
        }
    }
}

/// The built-in batteries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Suite {
    Basic,
    Extended,
    HighComplexity,
}

impl Suite {
    pub const ALL: [Suite; 3] = [Suite::Basic, Suite::Extended, Suite::HighComplexity];

    pub fn cases(self) -> Vec<TestCase> {
        suites::cases(match self {
            Suite::Basic => BASIC,
            Suite::Extended => EXTENDED,
            Suite::HighComplexity => HIGH_COMPLEXITY,
        })
    }

    /// Bound and listing options the battery is meant to run with.
    pub fn defaults(self) -> (EnumeratorConfig, SuiteOptions) {
        match self {
            Suite::Basic | Suite::Extended => (EnumeratorConfig::default(), SuiteOptions::default()),
            Suite::HighComplexity => (
                EnumeratorConfig::stress(),
                SuiteOptions {
                    list_limit: Some(20),
                    sort_by_count: true,
                },
            ),
        }
    }
}

impl fmt::Display for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Suite::Basic => "basic",
            Suite::Extended => "extended",
            Suite::HighComplexity => "high-complexity",
        })
    }
}

impl FromStr for Suite {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Suite::ALL
            .into_iter()
            .find(|suite| suite.to_string() == s)
            .ok_or_else(|| HarnessError::UnknownSuite(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuiteOptions {
    /// List at most this many tautomers per case; `count` stays exact.
    pub list_limit: Option<usize>,
    /// Order reports by descending tautomer count.
    pub sort_by_count: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseReport {
    pub input: String,
    pub name: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Outcome {
    Tautomers {
        count: usize,
        tautomers: Vec<String>,
        canonical: String,
        /// The search stopped at the bound.
        truncated: bool,
        /// `tautomers` lists fewer than `count` entries.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        list_truncated: Option<bool>,
    },
    Failed {
        error: String,
    },
}

impl CaseReport {
    pub fn count(&self) -> usize {
        match &self.outcome {
            Outcome::Tautomers { count, .. } => *count,
            Outcome::Failed { .. } => 0,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Failed { .. })
    }
}

/// Enumerates and canonicalizes one case. Failures become an error report.
pub fn run_case(case: &TestCase, config: &EnumeratorConfig) -> CaseReport {
    let outcome = match from_smiles(&case.smiles) {
        Err(err) => Outcome::Failed {
            error: format!("Failed to parse SMILES: {}: {err}", case.smiles),
        },
        Ok(mol) => match TautomerEnumerator::new(*config).canonicalize(&mol) {
            Ok(result) => {
                debug!(name = %case.name, count = result.all.len(), "case done");
                Outcome::Tautomers {
                    count: result.all.len(),
                    tautomers: result.all.iter().map(to_canonical_smiles).collect(),
                    canonical: to_canonical_smiles(&result.winner),
                    truncated: result.truncated,
                    list_truncated: None,
                }
            }
            Err(err) => Outcome::Failed {
                error: err.to_string(),
            },
        },
    };
    CaseReport {
        input: case.smiles.clone(),
        name: case.name.clone(),
        outcome,
    }
}

/// Runs every case in parallel and returns reports in input order, or by
/// descending count when asked to.
pub fn run_suite(
    cases: &[TestCase],
    config: &EnumeratorConfig,
    options: &SuiteOptions,
) -> Vec<CaseReport> {
    info!(cases = cases.len(), max_tautomers = config.max_tautomers.get(), "running suite");
    let mut reports: Vec<CaseReport> = cases.par_iter().map(|case| run_case(case, config)).collect();

    if let Some(limit) = options.list_limit {
        for report in &mut reports {
            if let Outcome::Tautomers {
                tautomers,
                list_truncated,
                ..
            } = &mut report.outcome
            {
                *list_truncated = Some(tautomers.len() > limit);
                tautomers.truncate(limit);
            }
        }
    }
    if options.sort_by_count {
        reports.sort_by(|a, b| b.count().cmp(&a.count()));
    }
    reports
}

/// Reads `SMILES [name]` lines. Blank lines and lines starting with `#` are
/// skipped; a missing name falls back to the SMILES itself.
pub fn parse_batch(text: &str) -> Vec<TestCase> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| match line.split_once(char::is_whitespace) {
            Some((smiles, name)) if !name.trim().is_empty() => TestCase::new(smiles, name.trim()),
            Some((smiles, _)) => TestCase::new(smiles, smiles),
            None => TestCase::new(line, line),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suite_names_round_trip() {
        for suite in Suite::ALL {
            assert_eq!(suite.to_string().parse::<Suite>().unwrap(), suite);
        }
        assert_eq!(
            "nope".parse::<Suite>(),
            Err(HarnessError::UnknownSuite("nope".into()))
        );
    }

    #[test]
    fn batteries_are_populated() {
        assert_eq!(Suite::Basic.cases().len(), 15);
        assert!(Suite::Extended.cases().len() > 60);
        assert_eq!(Suite::HighComplexity.cases().len(), 21);
        assert_eq!(Suite::Basic.cases()[0], TestCase::new("CC(=O)C", "acetone"));
    }

    #[test]
    fn high_complexity_defaults() {
        let (config, options) = Suite::HighComplexity.defaults();
        assert_eq!(config.max_tautomers.get(), 100);
        assert_eq!(options.list_limit, Some(20));
        assert!(options.sort_by_count);
    }

    #[test]
    fn batch_lines() {
        let cases = parse_batch("# header\nCC(=O)C acetone\n\nOc1ccccc1   phenol ring\nCCO\n");
        assert_eq!(
            cases,
            vec![
                TestCase::new("CC(=O)C", "acetone"),
                TestCase::new("Oc1ccccc1", "phenol ring"),
                TestCase::new("CCO", "CCO"),
            ]
        );
    }

    #[test]
    fn case_report_counts() {
        let report = run_case(&TestCase::new("CC(=O)N", "acetamide"), &EnumeratorConfig::default());
        assert!(!report.is_error());
        assert!(report.count() >= 2);
        let failed = run_case(&TestCase::new("C1CC", "broken"), &EnumeratorConfig::default());
        assert!(failed.is_error());
        assert_eq!(failed.count(), 0);
    }
}
