//! SMILES reading and writing.
//!
//! [`parse_smiles`] gives the graph as written (aromatic bonds unresolved);
//! [`from_smiles`] also kekulizes it and runs ring and aromaticity
//! perception, which is what the rest of the crate expects.

mod builder;
pub mod error;
mod parse_tree;
mod tokenizer;
mod writer;

use crate::aromaticity::perceive;
use crate::atom::Atom;
use crate::bond::SmilesBond;
use crate::kekulize;
use crate::mol::{Mol, Molecule};
pub use error::SmilesError;
pub use writer::{to_canonical_smiles, to_smiles};

pub fn parse_smiles(s: &str) -> Result<Mol<Atom, SmilesBond>, SmilesError> {
    let tokens = tokenizer::tokenize(s)?;
    if tokens.is_empty() {
        return Err(SmilesError::EmptyInput);
    }
    let tree = parse_tree::build_parse_tree(&tokens)?;
    Ok(builder::build_mol(&tree))
}

pub fn from_smiles(s: &str) -> Result<Molecule, SmilesError> {
    let mut mol = kekulize::kekulize(parse_smiles(s)?)?;
    perceive(&mut mol);
    Ok(mol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bond::{BondOrder, SmilesBondOrder};
    use petgraph::graph::NodeIndex;

    fn n(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    fn hydrogens(mol: &Molecule) -> Vec<u8> {
        mol.atoms().map(|a| mol.atom(a).hydrogen_count).collect()
    }

    fn double_bonds(mol: &Molecule) -> usize {
        mol.bonds()
            .filter(|&e| mol.bond(e).order == BondOrder::Double)
            .count()
    }

    #[test]
    fn small_molecules() {
        let mol = from_smiles("CC(C)C").unwrap();
        assert_eq!(mol.atom_count(), 4);
        assert_eq!(hydrogens(&mol), vec![3, 1, 3, 3]);

        let mol = from_smiles("C=CC#N").unwrap();
        assert_eq!(hydrogens(&mol), vec![2, 1, 0, 0]);
        let e = mol.bond_between(n(2), n(3)).unwrap();
        assert_eq!(mol.bond(e).order, BondOrder::Triple);
    }

    #[test]
    fn parse_keeps_aromatic_bonds_unresolved() {
        let mol = parse_smiles("c1ccccc1").unwrap();
        assert!(mol
            .bonds()
            .all(|e| mol.bond(e).order == SmilesBondOrder::Aromatic));
        assert!(mol.atoms().all(|a| mol.atom(a).is_aromatic));
    }

    #[test]
    fn aromatic_input_is_kekulized_and_perceived() {
        let mol = from_smiles("c1ccccc1").unwrap();
        assert_eq!(double_bonds(&mol), 3);
        assert!(mol.bonds().all(|e| mol.bond(e).is_aromatic));
        assert!(mol.atoms().all(|a| mol.atom(a).in_ring));

        let mol = from_smiles("c1ccc2ccccc2c1").unwrap();
        assert_eq!(double_bonds(&mol), 5);

        let mol = from_smiles("Cn1cnc2c1c(=O)n(C)c(=O)n2C").unwrap();
        assert_eq!(mol.atom_count(), 14);
        assert!(mol.atom(n(1)).is_aromatic);
    }

    #[test]
    fn heteroaromatic_hydrogens() {
        assert_eq!(hydrogens(&from_smiles("c1cc[nH]c1").unwrap()), vec![1, 1, 1, 1, 1]);
        assert_eq!(hydrogens(&from_smiles("c1ccoc1").unwrap()), vec![1, 1, 1, 0, 1]);
        assert_eq!(
            hydrogens(&from_smiles("c1ncc[nH]1").unwrap()),
            vec![1, 0, 1, 1, 1]
        );
    }

    #[test]
    fn charged_and_isotopic_atoms() {
        let mol = from_smiles("C[N+](=O)[O-]").unwrap();
        assert_eq!(mol.atom(n(1)).formal_charge, 1);
        assert_eq!(mol.atom(n(3)).formal_charge, -1);
        let mol = from_smiles("[2H]C([2H])([2H])O").unwrap();
        assert_eq!(mol.atom(n(0)).isotope, 2);
        assert_eq!(mol.atom(n(0)).atomic_num, 1);
    }

    #[test]
    fn stereo_is_accepted_and_dropped() {
        let plain = from_smiles("FC=CF").unwrap();
        assert_eq!(from_smiles("F/C=C\\F").unwrap(), plain);
        let plain = from_smiles("NC(C)C(=O)O").unwrap();
        assert_eq!(from_smiles("N[C@@H](C)C(=O)O").unwrap().atom_count(), plain.atom_count());
        assert_eq!(to_smiles(&from_smiles("N[C@@H](C)C(=O)O").unwrap()), to_smiles(&plain));
    }

    #[test]
    fn input_errors() {
        assert_eq!(parse_smiles("").unwrap_err(), SmilesError::EmptyInput);
        assert_eq!(parse_smiles("   ").unwrap_err(), SmilesError::EmptyInput);
        assert!(matches!(parse_smiles("C(C"), Err(SmilesError::UnmatchedParen { .. })));
        assert!(matches!(parse_smiles("C1CC"), Err(SmilesError::UnclosedRing { digit: 1 })));
        assert!(matches!(parse_smiles("[Zz]"), Err(SmilesError::InvalidElement { .. })));
        assert!(matches!(from_smiles("c1cccc1"), Err(SmilesError::Kekulize(_))));
    }

    #[test]
    fn fragments() {
        let mol = from_smiles("[Na+].[Cl-]").unwrap();
        assert_eq!(mol.atom_count(), 2);
        assert_eq!(mol.bond_count(), 0);
        assert_eq!(hydrogens(&mol), vec![0, 0]);
    }
}
