use petgraph::graph::NodeIndex;

use crate::element::{outer_shell_electrons, Element};
use crate::mol::Mol;
use crate::traits::{HasAtomicNum, HasBondOrder, HasFormalCharge, HasHydrogenCount};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("atom {} ({}{:+}): valence {actual_valence} not in {allowed_valences:?}",
    .atom_idx.index(), symbol(.atomic_num), .formal_charge)]
pub struct ValenceError {
    pub atom_idx: NodeIndex,
    pub atomic_num: u8,
    pub formal_charge: i8,
    pub actual_valence: u8,
    pub allowed_valences: Vec<u8>,
}

fn symbol(atomic_num: &u8) -> &'static str {
    Element::from_atomic_num(*atomic_num)
        .map(|e| e.symbol())
        .unwrap_or("?")
}

/// Bond order sum plus implicit hydrogens.
pub fn total_valence<A, B>(mol: &Mol<A, B>, atom: NodeIndex) -> u8
where
    A: HasHydrogenCount,
    B: HasBondOrder,
{
    let bond_sum: u8 = mol
        .bonds_of(atom)
        .map(|ei| mol.bond(ei).bond_order().valence())
        .sum();
    bond_sum + mol.atom(atom).hydrogen_count()
}

/// Checks one atom against the charge-aware valence table. Elements with no
/// valence list (metals) always pass.
pub fn check_atom<A, B>(mol: &Mol<A, B>, idx: NodeIndex) -> Result<(), ValenceError>
where
    A: HasAtomicNum + HasFormalCharge + HasHydrogenCount,
    B: HasBondOrder,
{
    let atom = mol.atom(idx);
    let Some(elem) = Element::from_atomic_num(atom.atomic_num()) else {
        return Ok(());
    };
    if elem.default_valences().is_empty() {
        return Ok(());
    }
    let allowed = elem.allowed_valences(atom.formal_charge());
    let v = total_valence(mol, idx);
    if allowed.contains(&v) {
        return Ok(());
    }
    Err(ValenceError {
        atom_idx: idx,
        atomic_num: atom.atomic_num(),
        formal_charge: atom.formal_charge(),
        actual_valence: v,
        allowed_valences: allowed.into_owned(),
    })
}

pub fn check_valence<A, B>(mol: &Mol<A, B>) -> Result<(), Vec<ValenceError>>
where
    A: HasAtomicNum + HasFormalCharge + HasHydrogenCount,
    B: HasBondOrder,
{
    let errors: Vec<ValenceError> = mol
        .atoms()
        .filter_map(|idx| check_atom(mol, idx).err())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Valence electrons of the whole molecule, hydrogens included.
///
/// Moving a hydrogen between two heavy atoms leaves this unchanged, so every
/// tautomer of a molecule has the same count.
pub fn valence_electron_count<A, B>(mol: &Mol<A, B>) -> i32
where
    A: HasAtomicNum + HasFormalCharge + HasHydrogenCount,
{
    mol.atoms()
        .map(|idx| {
            let atom = mol.atom(idx);
            outer_shell_electrons(atom.atomic_num()) as i32 - atom.formal_charge() as i32
                + atom.hydrogen_count() as i32
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::Atom;
    use crate::bond::Bond;
    use crate::smiles::from_smiles;

    #[test]
    fn common_molecules_valid() {
        for smi in [
            "C",
            "CC",
            "c1ccccc1",
            "O",
            "N",
            "[NH4+]",
            "CC(=O)[O-]",
            "C[N+](=O)[O-]",
            "S(F)(F)(F)(F)(F)F",
            "[Fe]",
            "CS(=O)C",
        ] {
            let mol = from_smiles(smi).unwrap();
            assert!(check_valence(&mol).is_ok(), "{smi}");
        }
    }

    #[test]
    fn pentavalent_carbon_invalid() {
        let mut mol = Mol::<Atom, Bond>::new();
        let c = mol.add_atom(Atom {
            atomic_num: 6,
            hydrogen_count: 5,
            ..Default::default()
        });
        let errs = check_valence(&mol).unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].atom_idx, c);
        assert_eq!(errs[0].actual_valence, 5);
        assert_eq!(errs[0].allowed_valences, vec![4]);
        assert_eq!(errs[0].to_string(), "atom 0 (C+0): valence 5 not in [4]");
    }

    #[test]
    fn charged_atoms_use_shifted_table() {
        let mut mol = Mol::<Atom, Bond>::new();
        let n = mol.add_atom(Atom {
            atomic_num: 7,
            formal_charge: 1,
            hydrogen_count: 3,
            ..Default::default()
        });
        let err = check_atom(&mol, n).unwrap_err();
        assert_eq!(err.allowed_valences, vec![4]);
    }

    #[test]
    fn ethene_total_valence() {
        let mol = from_smiles("C=C").unwrap();
        for idx in mol.atoms() {
            assert_eq!(total_valence(&mol, idx), 4);
        }
    }

    #[test]
    fn electron_count_ignores_hydrogen_position() {
        let keto = from_smiles("CC(=O)C").unwrap();
        let enol = from_smiles("C=C(O)C").unwrap();
        assert_eq!(valence_electron_count(&keto), valence_electron_count(&enol));
        assert_eq!(valence_electron_count(&keto), 24);
    }
}
