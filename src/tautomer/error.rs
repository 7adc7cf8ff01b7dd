use crate::kekulize::KekulizeError;
use crate::mol::MolError;
use crate::valence::ValenceError;

/// Why a single rewrite was rejected. These never reach the caller of
/// [`enumerate`](super::enumerate); the candidate is dropped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RewriteError {
    #[error("{rule} does not match at this site")]
    NoMatch { rule: &'static str },
    /// The match site no longer describes a bonded path in the molecule.
    #[error("atoms {a} and {b} of the match site are not bonded")]
    BrokenPath { a: usize, b: usize },
    #[error("atom {atom} has no hydrogen to give")]
    NoHydrogen { atom: usize },
    #[error("atom {atom} cannot take another hydrogen")]
    HydrogenOverflow { atom: usize },
    #[error("formal charge of atom {atom} is out of range")]
    ChargeOverflow { atom: usize },
    /// Raising past a triple bond or lowering below a single bond.
    #[error("bond {bond} cannot change order {from:?} in the required direction")]
    BondOrder {
        bond: usize,
        from: crate::bond::BondOrder,
    },
    /// A neutral nitrogen or phosphorus was pushed to its expanded valence.
    #[error("atom {atom} would become pentavalent")]
    Hypervalent { atom: usize },
    #[error("product has no Kekulé form: {0}")]
    Kekulize(#[from] KekulizeError),
    #[error("product violates valence: {0}")]
    Valence(#[from] ValenceError),
    /// The rule does not recognize the reversed site on the product.
    #[error("{rule} rewrite is not reversible at this site")]
    Irreversible { rule: &'static str },
}

/// Errors surfaced by the tautomer engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TautomerError {
    #[error("malformed input structure: {0}")]
    MalformedInput(#[from] MolError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("max_tautomers must be at least 1")]
    ZeroMaxTautomers,
}
