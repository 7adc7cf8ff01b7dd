//! Tautomer enumeration and canonicalization.
//!
//! [`enumerate`] walks the closure of a molecule under the
//! [`TransformRule`] catalogue; [`canonicalize`] scores every tautomer it
//! finds and returns the best one.
//!
//! ```
//! use std::num::NonZeroUsize;
//! use tautocrab::{from_smiles, tautomer::canonicalize, to_canonical_smiles};
//!
//! let mol = from_smiles("CC(O)=N").unwrap();
//! let result = canonicalize(&mol, NonZeroUsize::new(32).unwrap()).unwrap();
//! assert_eq!(to_canonical_smiles(&result.winner), to_canonical_smiles(&from_smiles("CC(N)=O").unwrap()));
//! ```

pub mod config;
mod enumerate;
pub mod error;
mod rewrite;
pub mod rules;
mod score;

use std::num::NonZeroUsize;

use tracing::debug;

use crate::mol::Molecule;

pub use config::{EnumeratorConfig, DEFAULT_MAX_TAUTOMERS, STRESS_MAX_TAUTOMERS};
pub use enumerate::{enumerate, enumerate_with, Enumeration};
pub use error::{ConfigError, RewriteError, TautomerError};
pub use rewrite::Rewrite;
pub use rules::{MatchSite, RuleSet, Transform, TransformRule};
pub use score::{score, Score};

/// Best tautomer of a seed together with everything the search found.
#[derive(Debug, Clone)]
pub struct CanonicalTautomer {
    pub winner: Molecule,
    /// Every tautomer found, in discovery order; `winner` is one of them.
    pub all: Vec<Molecule>,
    pub keys: Vec<String>,
    /// Position of `winner` in `all`.
    pub winner_index: usize,
    pub truncated: bool,
}

impl CanonicalTautomer {
    pub fn winner_key(&self) -> &str {
        &self.keys[self.winner_index]
    }
}

pub fn canonicalize(
    seed: &Molecule,
    max_count: NonZeroUsize,
) -> Result<CanonicalTautomer, TautomerError> {
    canonicalize_with(seed, &RuleSet::default(), max_count)
}

pub fn canonicalize_with(
    seed: &Molecule,
    rules: &RuleSet,
    max_count: NonZeroUsize,
) -> Result<CanonicalTautomer, TautomerError> {
    let Enumeration {
        tautomers,
        keys,
        truncated,
    } = enumerate_with(seed, rules, max_count)?;

    let best = tautomers
        .iter()
        .zip(&keys)
        .enumerate()
        .map(|(i, (mol, key))| (score::score_with_key(mol, key.clone()), i))
        .max_by(|a, b| a.0.cmp(&b.0))
        .map_or(0, |(_, i)| i);
    debug!(candidates = tautomers.len(), "canonical tautomer {}", keys[best]);

    Ok(CanonicalTautomer {
        winner: tautomers[best].clone(),
        all: tautomers,
        keys,
        winner_index: best,
        truncated,
    })
}

/// Reusable engine carrying its bound and rule set.
#[derive(Debug, Clone, Default)]
pub struct TautomerEnumerator {
    config: EnumeratorConfig,
    rules: RuleSet,
}

impl TautomerEnumerator {
    pub fn new(config: EnumeratorConfig) -> Self {
        Self {
            config,
            rules: RuleSet::default(),
        }
    }

    pub fn with_rules(config: EnumeratorConfig, rules: RuleSet) -> Self {
        Self { config, rules }
    }

    pub fn config(&self) -> &EnumeratorConfig {
        &self.config
    }

    pub fn max_tautomers(&self) -> NonZeroUsize {
        self.config.max_tautomers
    }

    pub fn set_max_tautomers(&mut self, max_tautomers: usize) -> Result<(), ConfigError> {
        self.config = EnumeratorConfig::with_max(max_tautomers)?;
        Ok(())
    }

    pub fn enumerate(&self, seed: &Molecule) -> Result<Enumeration, TautomerError> {
        enumerate_with(seed, &self.rules, self.config.max_tautomers)
    }

    pub fn canonicalize(&self, seed: &Molecule) -> Result<CanonicalTautomer, TautomerError> {
        canonicalize_with(seed, &self.rules, self.config.max_tautomers)
    }
}
