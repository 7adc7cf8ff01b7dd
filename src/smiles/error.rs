use crate::kekulize::KekulizeError;

/// Errors produced when reading a SMILES string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SmilesError {
    #[error("unexpected end of SMILES")]
    UnexpectedEnd,
    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { pos: usize, ch: char },
    #[error("invalid element '{text}' at position {pos}")]
    InvalidElement { pos: usize, text: String },
    #[error("unclosed bracket atom starting at position {pos}")]
    UnclosedBracket { pos: usize },
    #[error("unclosed ring {digit}")]
    UnclosedRing { digit: u16 },
    #[error("unmatched parenthesis at position {pos}")]
    UnmatchedParen { pos: usize },
    #[error("invalid charge in bracket atom at position {pos}")]
    InvalidCharge { pos: usize },
    #[error("isotope overflow in bracket atom at position {pos}")]
    InvalidIsotope { pos: usize },
    #[error("atom class overflow in bracket atom at position {pos}")]
    InvalidAtomClass { pos: usize },
    /// A ring number used with no atom to attach to, or closing onto an
    /// atom it is already bonded to.
    #[error("invalid ring bond {digit} at position {pos}")]
    InvalidRingBond { digit: u16, pos: usize },
    /// A bond symbol with no atom on one side.
    #[error("bond at position {pos} does not join two atoms")]
    MisplacedBond { pos: usize },
    #[error("empty SMILES string")]
    EmptyInput,
    #[error("conflicting bond types on ring closure {digit}")]
    RingBondConflict { digit: u16 },
    #[error(transparent)]
    Kekulize(#[from] KekulizeError),
}
