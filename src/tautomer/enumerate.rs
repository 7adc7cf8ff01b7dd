use std::collections::{HashSet, VecDeque};
use std::num::NonZeroUsize;

use tracing::{debug, trace, warn};

use crate::aromaticity::perceive;
use crate::canonical::canonical_key;
use crate::mol::Molecule;

use super::error::TautomerError;
use super::rules::{RuleSet, Transform};

/// Tautomers reachable from a seed, in first-discovery order.
///
/// `keys[i]` is the canonical key of `tautomers[i]`. The first entry is the
/// perceived seed.
#[derive(Debug, Clone)]
pub struct Enumeration {
    pub tautomers: Vec<Molecule>,
    pub keys: Vec<String>,
    /// A tautomer beyond the bound was found and left out.
    pub truncated: bool,
}

impl Enumeration {
    pub fn len(&self) -> usize {
        self.tautomers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tautomers.is_empty()
    }
}

/// Breadth-first closure of `seed` under the default rule set.
pub fn enumerate(seed: &Molecule, max_count: NonZeroUsize) -> Result<Enumeration, TautomerError> {
    enumerate_with(seed, &RuleSet::default(), max_count)
}

/// Breadth-first closure of `seed` under `rules`, holding at most
/// `max_count` tautomers.
pub fn enumerate_with(
    seed: &Molecule,
    rules: &RuleSet,
    max_count: NonZeroUsize,
) -> Result<Enumeration, TautomerError> {
    seed.check_structure()?;
    let mut start = seed.clone();
    perceive(&mut start);

    let max_count = max_count.get();
    let start_key = canonical_key(&start);
    let mut seen: HashSet<String> = HashSet::from([start_key.clone()]);
    let mut tautomers = vec![start];
    let mut keys = vec![start_key];
    let mut truncated = false;
    let mut queue: VecDeque<usize> = VecDeque::from([0]);
    let mut rejected = 0usize;

    'search: while let Some(current) = queue.pop_front() {
        let sites: Vec<_> = rules.matches(&tautomers[current]).collect();
        for site in sites {
            let product = match site.rule.rewrite(&tautomers[current], &site) {
                Ok(product) => product,
                Err(err) => {
                    rejected += 1;
                    trace!(rule = %site.rule, donor = site.donor.index(), acceptor = site.acceptor.index(), "rewrite discarded: {err}");
                    continue;
                }
            };
            let key = canonical_key(&product);
            if seen.contains(&key) {
                continue;
            }
            if tautomers.len() >= max_count {
                truncated = true;
                break 'search;
            }
            seen.insert(key.clone());
            queue.push_back(tautomers.len());
            tautomers.push(product);
            keys.push(key);
        }
    }

    debug!(
        found = tautomers.len(),
        rejected,
        truncated,
        "enumerated tautomers of {}",
        keys[0]
    );
    if truncated {
        warn!(max_count, "tautomer search stopped at the bound");
    }
    Ok(Enumeration {
        tautomers,
        keys,
        truncated,
    })
}
