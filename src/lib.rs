//! Tautomer enumeration and canonicalization on petgraph molecular graphs.
//!
//! ```
//! use tautocrab::{from_smiles, to_canonical_smiles, TautomerEnumerator};
//!
//! let mol = from_smiles("Oc1ccccn1").unwrap();
//! let result = TautomerEnumerator::default().canonicalize(&mol).unwrap();
//! assert_eq!(result.all.len(), 2);
//! assert_eq!(to_canonical_smiles(&result.winner), to_canonical_smiles(&from_smiles("O=c1cccc[nH]1").unwrap()));
//! ```

pub mod aromaticity;
pub mod atom;
pub mod bond;
pub mod canonical;
pub mod conjugation;
pub mod element;
pub mod harness;
pub mod kekulize;
pub mod mol;
pub mod rings;
pub mod smiles;
pub mod tautomer;
pub mod traits;
pub mod valence;

pub use aromaticity::{aromatic_ring_count, perceive};
pub use atom::Atom;
pub use bond::{Bond, BondOrder, SmilesBond, SmilesBondOrder};
pub use canonical::{canonical_key, canonical_ordering};
pub use element::Element;
pub use kekulize::{kekulize, KekulizeError};
pub use mol::{Mol, MolError, Molecule};
pub use smiles::{from_smiles, parse_smiles, to_canonical_smiles, to_smiles, SmilesError};
pub use tautomer::{
    canonicalize, enumerate, CanonicalTautomer, EnumeratorConfig, Enumeration, TautomerEnumerator,
    TautomerError,
};
pub use traits::{
    HasAromaticity, HasAtomicNum, HasBondAromaticity, HasBondOrder, HasFormalCharge,
    HasHydrogenCount, HasIsotope,
};
pub use valence::{check_valence, ValenceError};
