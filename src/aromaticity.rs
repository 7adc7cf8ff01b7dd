//! Hückel aromaticity over the symmetrized ring set.
//!
//! Each ring (and each pair of rings fused through a single bond) is
//! aromatic when every member contributes a defined number of π electrons
//! and the total is 4n + 2. Contributions are read from the Kekulé bond
//! orders, so any Kekulé form of the same system perceives the same way.

use std::collections::HashSet;

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::bond::BondOrder;
use crate::mol::{Mol, Molecule};
use crate::rings::{perceive_rings, ring_bonds, RingInfo};
use crate::traits::{HasAtomicNum, HasBondOrder, HasFormalCharge, HasHydrogenCount};

/// Atoms and bonds of one aromatic cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AromaticCycle {
    pub atoms: Vec<NodeIndex>,
    pub bonds: Vec<EdgeIndex>,
}

/// Recomputes ring membership and aromatic flags on atoms and bonds.
pub fn perceive(mol: &mut Molecule) {
    perceive_rings(mol);
    set_aromaticity(mol);
}

/// Clears and recomputes `is_aromatic` on every atom and bond.
pub fn set_aromaticity(mol: &mut Molecule) {
    let cycles = find_aromatic_cycles(mol);
    let atoms: Vec<NodeIndex> = mol.atoms().collect();
    for idx in atoms {
        mol.atom_mut(idx).is_aromatic = false;
    }
    let bonds: Vec<EdgeIndex> = mol.bonds().collect();
    for idx in bonds {
        mol.bond_mut(idx).is_aromatic = false;
    }
    for cycle in cycles {
        for atom in cycle.atoms {
            mol.atom_mut(atom).is_aromatic = true;
        }
        for bond in cycle.bonds {
            mol.bond_mut(bond).is_aromatic = true;
        }
    }
}

/// Per-atom aromaticity without mutating the molecule.
pub fn find_aromatic_atoms<A, B>(mol: &Mol<A, B>) -> Vec<bool>
where
    A: HasAtomicNum + HasFormalCharge + HasHydrogenCount,
    B: HasBondOrder,
{
    let mut aromatic = vec![false; mol.atom_count()];
    for cycle in find_aromatic_cycles(mol) {
        for atom in cycle.atoms {
            aromatic[atom.index()] = true;
        }
    }
    aromatic
}

/// Number of SSSR rings whose bonds are all flagged aromatic.
pub fn aromatic_ring_count(mol: &Molecule) -> usize {
    RingInfo::sssr(mol)
        .rings()
        .iter()
        .filter(|ring| {
            ring_bonds(mol, ring)
                .iter()
                .all(|&e| mol.bond(e).is_aromatic)
        })
        .count()
}

pub fn find_aromatic_cycles<A, B>(mol: &Mol<A, B>) -> Vec<AromaticCycle>
where
    A: HasAtomicNum + HasFormalCharge + HasHydrogenCount,
    B: HasBondOrder,
{
    let info = RingInfo::symmetrized_sssr(mol);
    let ring_atoms: HashSet<NodeIndex> = info.rings().iter().flatten().copied().collect();
    let rings: Vec<AromaticCycle> = info
        .rings()
        .iter()
        .map(|ring| AromaticCycle {
            atoms: ring.clone(),
            bonds: ring_bonds(mol, ring),
        })
        .collect();

    let mut found: Vec<AromaticCycle> = Vec::new();
    let mut aromatic_ring = vec![false; rings.len()];
    for (i, ring) in rings.iter().enumerate() {
        if is_aromatic_cycle(mol, ring, &ring_atoms) {
            aromatic_ring[i] = true;
            found.push(ring.clone());
        }
    }

    // Two rings sharing one bond may be aromatic only as a whole (azulene).
    for i in 0..rings.len() {
        for j in (i + 1)..rings.len() {
            if aromatic_ring[i] && aromatic_ring[j] {
                continue;
            }
            let Some(envelope) = fuse(&rings[i], &rings[j]) else {
                continue;
            };
            if is_aromatic_cycle(mol, &envelope, &ring_atoms) {
                found.push(AromaticCycle {
                    atoms: envelope.atoms,
                    bonds: rings[i]
                        .bonds
                        .iter()
                        .chain(&rings[j].bonds)
                        .copied()
                        .collect(),
                });
            }
        }
    }
    found
}

/// Outer cycle of two rings that share exactly one bond.
fn fuse(a: &AromaticCycle, b: &AromaticCycle) -> Option<AromaticCycle> {
    let shared: Vec<EdgeIndex> = a
        .bonds
        .iter()
        .filter(|e| b.bonds.contains(e))
        .copied()
        .collect();
    let shared_atoms = a.atoms.iter().filter(|x| b.atoms.contains(x)).count();
    if shared.len() != 1 || shared_atoms != 2 {
        return None;
    }
    let mut atoms = a.atoms.clone();
    atoms.extend(b.atoms.iter().filter(|x| !a.atoms.contains(x)));
    let bonds = a
        .bonds
        .iter()
        .chain(&b.bonds)
        .filter(|e| **e != shared[0])
        .copied()
        .collect();
    Some(AromaticCycle { atoms, bonds })
}

fn is_aromatic_cycle<A, B>(
    mol: &Mol<A, B>,
    cycle: &AromaticCycle,
    ring_atoms: &HashSet<NodeIndex>,
) -> bool
where
    A: HasAtomicNum + HasFormalCharge + HasHydrogenCount,
    B: HasBondOrder,
{
    if cycle.atoms.len() < 3 {
        return false;
    }
    if cycle
        .bonds
        .iter()
        .any(|&e| mol.bond(e).bond_order() == BondOrder::Triple)
    {
        return false;
    }
    let mut total: u32 = 0;
    for &atom in &cycle.atoms {
        match pi_electrons(mol, atom, &cycle.bonds, ring_atoms) {
            Some(e) => total += e as u32,
            None => return false,
        }
    }
    is_huckel(total)
}

/// π electrons `atom` donates to a cycle made of `cycle_bonds`, or `None`
/// when the atom cannot take part in an aromatic system.
fn pi_electrons<A, B>(
    mol: &Mol<A, B>,
    atom: NodeIndex,
    cycle_bonds: &[EdgeIndex],
    ring_atoms: &HashSet<NodeIndex>,
) -> Option<u8>
where
    A: HasAtomicNum + HasFormalCharge + HasHydrogenCount,
    B: HasBondOrder,
{
    let a = mol.atom(atom);
    let mut endo_double = false;
    let mut exo_double: Option<NodeIndex> = None;
    for e in mol.bonds_of(atom) {
        match mol.bond(e).bond_order() {
            BondOrder::Single => {}
            BondOrder::Double if cycle_bonds.contains(&e) => endo_double = true,
            BondOrder::Double => exo_double = Some(mol.other_end(e, atom)),
            BondOrder::Triple => return None,
        }
    }
    let connections = mol.degree(atom) + a.hydrogen_count() as usize;

    match (a.atomic_num(), a.formal_charge()) {
        (6, 0) => {
            if endo_double {
                return Some(1);
            }
            let partner = exo_double?;
            let partner_num = mol.atom(partner).atomic_num();
            if partner_num != 6 {
                Some(0)
            } else if ring_atoms.contains(&partner) {
                Some(1)
            } else {
                None
            }
        }
        (6, -1) if exo_double.is_none() => Some(if endo_double { 1 } else { 2 }),
        (6, 1) if exo_double.is_none() => Some(if endo_double { 1 } else { 0 }),
        (7 | 15 | 33, 0) => {
            if exo_double.is_some() {
                None
            } else if endo_double {
                Some(1)
            } else if connections == 3 {
                Some(2)
            } else {
                None
            }
        }
        (7 | 15 | 33, 1) if endo_double && exo_double.is_none() => Some(1),
        (7 | 15 | 33, -1) if !endo_double && exo_double.is_none() => Some(2),
        (8 | 16 | 34 | 52, 0) if exo_double.is_none() && !endo_double && connections == 2 => {
            Some(2)
        }
        (8 | 16 | 34 | 52, 1) if endo_double && exo_double.is_none() => Some(1),
        (5, 0) if exo_double.is_none() => Some(if endo_double { 1 } else { 0 }),
        _ => None,
    }
}

fn is_huckel(pi_electrons: u32) -> bool {
    pi_electrons >= 2 && (pi_electrons - 2) % 4 == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smiles::from_smiles;

    fn aromatic(smiles: &str) -> Vec<bool> {
        let mol = from_smiles(smiles).unwrap();
        find_aromatic_atoms(&mol)
    }

    #[test]
    fn benzene_and_heteroaromatics() {
        for smi in [
            "c1ccccc1",
            "c1ccncc1",
            "[nH]1cccc1",
            "o1cccc1",
            "s1cccc1",
            "c1c[nH]cn1",
            "c1[nH]nnn1",
        ] {
            assert!(aromatic(smi).iter().all(|&a| a), "{smi} should be aromatic");
        }
    }

    #[test]
    fn saturated_and_antiaromatic_rings() {
        for smi in ["C1CCCCC1", "C1=CCC=C1", "C1=CC=CC=CC=C1", "O=C1C=CC(=O)C=C1"] {
            assert!(aromatic(smi).iter().all(|&a| !a), "{smi} should not be aromatic");
        }
    }

    #[test]
    fn phenol_substituent_is_not_aromatic() {
        let arom = aromatic("Oc1ccccc1");
        assert!(!arom[0]);
        assert!(arom[1..].iter().all(|&a| a));
    }

    #[test]
    fn pyridone_is_aromatic_in_both_spellings() {
        assert!(aromatic("O=C1C=CC=CN1")[1..].iter().all(|&a| a));
        let arom = aromatic("O=c1cccc[nH]1");
        assert!(!arom[0]);
        assert!(arom[1..].iter().all(|&a| a));
    }

    #[test]
    fn fused_systems() {
        assert!(aromatic("c1ccc2ccccc2c1").iter().all(|&a| a));
        assert!(aromatic("c1ccc2[nH]ccc2c1").iter().all(|&a| a));
        assert!(aromatic("C1=CC2=CC=CC=CC2=C1").iter().all(|&a| a));
    }

    #[test]
    fn cyclopentadienyl_anion() {
        assert!(aromatic("[cH-]1cccc1").iter().all(|&a| a));
    }

    #[test]
    fn perception_flags_bonds() {
        let mol = from_smiles("Cc1ccccc1").unwrap();
        let aromatic_bonds = mol.bonds().filter(|&e| mol.bond(e).is_aromatic).count();
        assert_eq!(aromatic_bonds, 6);
        assert_eq!(aromatic_ring_count(&mol), 1);
    }

    #[test]
    fn kekule_input_perceives_like_lowercase() {
        let kekule = from_smiles("C1=CC=CC=C1").unwrap();
        assert!(kekule.atoms().all(|a| kekule.atom(a).is_aromatic));
        assert_eq!(aromatic_ring_count(&kekule), 1);
    }

    #[test]
    fn huckel_rule() {
        assert!(!is_huckel(0));
        assert!(is_huckel(2));
        assert!(!is_huckel(4));
        assert!(is_huckel(6));
        assert!(is_huckel(10));
        assert!(!is_huckel(12));
    }
}
