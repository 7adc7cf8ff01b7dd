//! Bond conjugation flags.
//!
//! A bond is conjugated when it is aromatic, or when it is a multiple bond
//! between two π-capable atoms that is adjacent (through a shared atom with
//! at most three connections) to another π-capable atom.

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::bond::BondOrder;
use crate::element::{outer_shell_electrons, Element};
use crate::mol::Mol;
use crate::traits::{
    HasAtomicNum, HasBondAromaticity, HasBondOrder, HasFormalCharge, HasHydrogenCount,
};
use crate::valence::total_valence;

fn connections<A: HasHydrogenCount, B>(mol: &Mol<A, B>, idx: NodeIndex) -> usize {
    mol.degree(idx) + mol.atom(idx).hydrogen_count() as usize
}

/// Electrons available for π bonding: unused valence plus lone pairs.
fn pi_capacity<A, B>(mol: &Mol<A, B>, idx: NodeIndex) -> Option<i16>
where
    A: HasAtomicNum + HasHydrogenCount + HasFormalCharge,
{
    let atom = mol.atom(idx);
    let elem = Element::from_atomic_num(atom.atomic_num())?;
    let default_val = *elem.default_valences().first()?;
    if default_val <= 1 {
        return None;
    }
    let degree = connections(mol, idx);
    if degree > 3 {
        return None;
    }
    let outer = outer_shell_electrons(atom.atomic_num()) as i16;
    let lone = (outer - default_val as i16 - atom.formal_charge() as i16).max(0);
    Some(default_val as i16 - degree as i16 + lone)
}

fn is_conj_candidate<A, B>(mol: &Mol<A, B>, idx: NodeIndex) -> bool
where
    A: HasAtomicNum + HasHydrogenCount + HasFormalCharge,
    B: HasBondOrder,
{
    let atom = mol.atom(idx);
    let anum = atom.atomic_num();
    let Some(default_val) = Element::from_atomic_num(anum)
        .and_then(|e| e.default_valences().first().copied())
    else {
        return false;
    };
    if atom.formal_charge() == 0 && total_valence(mol, idx) > default_val {
        return false;
    }
    let outer = outer_shell_electrons(anum);
    let second_row_like =
        anum <= 10 || (outer != 5 && outer != 6) || (outer == 6 && connections(mol, idx) < 2);
    second_row_like && pi_capacity(mol, idx).is_some_and(|c| c > 0)
}

/// Conjugation flag for every bond, indexed by bond index.
pub fn assign_conjugation<A, B>(mol: &Mol<A, B>) -> Vec<bool>
where
    A: HasAtomicNum + HasHydrogenCount + HasFormalCharge,
    B: HasBondOrder + HasBondAromaticity,
{
    let mut conjugated: Vec<bool> = mol
        .bonds()
        .map(|e| mol.bond(e).is_aromatic_bond())
        .collect();

    for center in mol.atoms() {
        if !is_conj_candidate(mol, center) || !(2..=3).contains(&connections(mol, center)) {
            continue;
        }
        let bonds: Vec<EdgeIndex> = mol.bonds_of(center).collect();
        for &multiple in &bonds {
            if mol.bond(multiple).bond_order() == BondOrder::Single {
                continue;
            }
            if !is_conj_candidate(mol, mol.other_end(multiple, center)) {
                continue;
            }
            for &other in &bonds {
                if other == multiple {
                    continue;
                }
                let partner = mol.other_end(other, center);
                if connections(mol, partner) <= 3 && is_conj_candidate(mol, partner) {
                    conjugated[multiple.index()] = true;
                    conjugated[other.index()] = true;
                }
            }
        }
    }
    conjugated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smiles::from_smiles;

    fn conj(smiles: &str) -> Vec<bool> {
        let mol = from_smiles(smiles).unwrap();
        assign_conjugation(&mol)
    }

    #[test]
    fn isolated_bonds_not_conjugated() {
        assert_eq!(conj("CC"), vec![false]);
        assert_eq!(conj("C=C"), vec![false]);
        assert_eq!(conj("CC=C"), vec![false, false]);
        assert!(conj("C1CCCCC1").iter().all(|&c| !c));
    }

    #[test]
    fn dienes_and_enones() {
        assert_eq!(conj("C=CC=C"), vec![true, true, true]);
        assert_eq!(conj("C=CC=O"), vec![true, true, true]);
    }

    #[test]
    fn amide_and_acid_resonance() {
        let c = conj("CC(N)=O");
        assert!(!c[0]);
        assert!(c[1]);
        assert!(c[2]);
        let c = conj("CC(=O)O");
        assert!(!c[0]);
        assert!(c[1] && c[2]);
    }

    #[test]
    fn imidic_acid_is_conjugated() {
        let c = conj("CC(O)=N");
        assert!(c[1] && c[2]);
    }

    #[test]
    fn aromatic_substituents() {
        assert!(conj("Nc1ccccc1")[0]);
        assert!(conj("Oc1ccccc1")[0]);
        assert!(conj("c1ccccc1").iter().all(|&c| c));
    }
}
