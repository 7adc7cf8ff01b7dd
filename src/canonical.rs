//! Canonical atom ranking and structural keys.
//!
//! Ranks come from iterated neighbourhood hashing (Morgan refinement) over
//! atom invariants, with ties broken by trial promotion: every atom of the
//! lowest tied class is promoted in turn and the choice whose refined
//! invariant trace is smallest wins. The result does not depend on the
//! order atoms were added to the graph.

use std::fmt::Write as _;
use std::hash::{Hash, Hasher};

use petgraph::graph::NodeIndex;

use crate::bond::BondOrder;
use crate::mol::Mol;
use crate::traits::{
    HasAromaticity, HasAtomicNum, HasBondAromaticity, HasBondOrder, HasFormalCharge,
    HasHydrogenCount, HasIsotope,
};

struct Fnv1aHasher(u64);

impl Fnv1aHasher {
    fn new() -> Self {
        Self(0xcbf29ce484222325)
    }
}

impl Hasher for Fnv1aHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 ^= b as u64;
            self.0 = self.0.wrapping_mul(0x100000001b3);
        }
    }
}

fn fnv<T: Hash>(value: &T) -> u64 {
    let mut h = Fnv1aHasher::new();
    value.hash(&mut h);
    h.finish()
}

/// Bond label used in keys and refinement: aromatic bonds collapse to one
/// code whatever their Kekulé order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BondCode {
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondCode {
    pub fn of<B: HasBondOrder + HasBondAromaticity>(bond: &B) -> Self {
        if bond.is_aromatic_bond() {
            return BondCode::Aromatic;
        }
        match bond.bond_order() {
            BondOrder::Single => BondCode::Single,
            BondOrder::Double => BondCode::Double,
            BondOrder::Triple => BondCode::Triple,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            BondCode::Single => '-',
            BondCode::Double => '=',
            BondCode::Triple => '#',
            BondCode::Aromatic => ':',
        }
    }
}

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct AtomInvariant {
    atomic_num: u8,
    degree: usize,
    hydrogen_count: u8,
    formal_charge: i8,
    is_aromatic: bool,
    isotope: u16,
    bond_codes: [u8; 4],
}

fn atom_invariant<A, B>(mol: &Mol<A, B>, idx: NodeIndex) -> AtomInvariant
where
    A: HasAtomicNum + HasHydrogenCount + HasFormalCharge + HasAromaticity + HasIsotope,
    B: HasBondOrder + HasBondAromaticity,
{
    let atom = mol.atom(idx);
    let mut bond_codes = [0u8; 4];
    for edge in mol.bonds_of(idx) {
        bond_codes[BondCode::of(mol.bond(edge)) as usize] += 1;
    }
    AtomInvariant {
        atomic_num: atom.atomic_num(),
        degree: mol.degree(idx),
        hydrogen_count: atom.hydrogen_count(),
        formal_charge: atom.formal_charge(),
        is_aromatic: atom.is_aromatic(),
        isotope: atom.isotope(),
        bond_codes,
    }
}

fn ranks_from_values(values: &[u64]) -> Vec<usize> {
    let n = values.len();
    let mut indices: Vec<usize> = (0..n).collect();
    indices.sort_by_key(|&i| values[i]);
    let mut ranks = vec![0usize; n];
    for i in 1..n {
        ranks[indices[i]] = if values[indices[i]] == values[indices[i - 1]] {
            ranks[indices[i - 1]]
        } else {
            i
        };
    }
    ranks
}

fn count_distinct(ranks: &[usize]) -> usize {
    let mut sorted: Vec<usize> = ranks.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    sorted.len()
}

/// Sorted `(neighbour rank, bond code)` pairs of an atom.
fn neighbourhood<A, B>(mol: &Mol<A, B>, node: NodeIndex, ranks: &[usize]) -> Vec<(usize, BondCode)>
where
    B: HasBondOrder + HasBondAromaticity,
{
    let mut nb: Vec<(usize, BondCode)> = mol
        .bonds_of(node)
        .map(|e| {
            let other = mol.other_end(e, node);
            (ranks[other.index()], BondCode::of(mol.bond(e)))
        })
        .collect();
    nb.sort_unstable();
    nb
}

fn morgan_refine<A, B>(mol: &Mol<A, B>, ranks: &mut Vec<usize>)
where
    B: HasBondOrder + HasBondAromaticity,
{
    let mut prev_distinct = count_distinct(ranks);
    loop {
        let values: Vec<u64> = mol
            .atoms()
            .map(|node| fnv(&(ranks[node.index()], neighbourhood(mol, node, ranks))))
            .collect();
        let new_ranks = ranks_from_values(&values);
        let distinct = count_distinct(&new_ranks);
        if distinct <= prev_distinct {
            return;
        }
        *ranks = new_ranks;
        prev_distinct = distinct;
    }
}

/// Canonical rank (0-based, all distinct) for every atom.
pub fn canonical_ordering<A, B>(mol: &Mol<A, B>) -> Vec<usize>
where
    A: HasAtomicNum + HasHydrogenCount + HasFormalCharge + HasAromaticity + HasIsotope,
    B: HasBondOrder + HasBondAromaticity,
{
    let n = mol.atom_count();
    if n == 0 {
        return Vec::new();
    }
    let invariants: Vec<AtomInvariant> = mol.atoms().map(|i| atom_invariant(mol, i)).collect();
    let initial: Vec<u64> = invariants.iter().map(fnv).collect();
    let mut ranks = ranks_from_values(&initial);
    morgan_refine(mol, &mut ranks);
    if count_distinct(&ranks) < n {
        break_ties(mol, &mut ranks, &invariants);
    }

    let mut indices: Vec<usize> = (0..n).collect();
    indices.sort_by_key(|&i| ranks[i]);
    let mut final_ranks = vec![0usize; n];
    for (rank, &atom_idx) in indices.iter().enumerate() {
        final_ranks[atom_idx] = rank;
    }
    final_ranks
}

fn break_ties<A, B>(mol: &Mol<A, B>, ranks: &mut Vec<usize>, invariants: &[AtomInvariant])
where
    B: HasBondOrder + HasBondAromaticity,
{
    let n = ranks.len();
    while count_distinct(ranks) < n {
        let Some(tied_rank) = lowest_tied_rank(ranks) else {
            return;
        };
        let max_rank = ranks.iter().copied().max().unwrap_or(0);
        let mut best: Option<(Vec<u64>, Vec<usize>)> = None;

        for candidate in (0..n).filter(|&i| ranks[i] == tied_rank) {
            let mut trial = ranks.clone();
            trial[candidate] = max_rank + 1;
            morgan_refine(mol, &mut trial);

            let mut order: Vec<usize> = (0..n).collect();
            order.sort_by_key(|&i| trial[i]);
            let trace: Vec<u64> = order
                .iter()
                .map(|&i| {
                    let node = NodeIndex::new(i);
                    fnv(&(&invariants[i], neighbourhood(mol, node, &trial)))
                })
                .collect();
            if best.as_ref().map_or(true, |(t, _)| trace < *t) {
                best = Some((trace, trial));
            }
        }
        match best {
            Some((_, trial)) => *ranks = trial,
            None => return,
        }
    }
}

fn lowest_tied_rank(ranks: &[usize]) -> Option<usize> {
    let mut sorted = ranks.to_vec();
    sorted.sort_unstable();
    sorted.windows(2).find(|w| w[0] == w[1]).map(|w| w[0])
}

/// Deterministic structural key.
///
/// Two molecules get the same key exactly when they are the same graph up
/// to atom numbering, with equal elements, charges, isotopes, hydrogen
/// counts and bond labels (aromatic bonds compare as `:`).
pub fn canonical_key<A, B>(mol: &Mol<A, B>) -> String
where
    A: HasAtomicNum + HasHydrogenCount + HasFormalCharge + HasAromaticity + HasIsotope,
    B: HasBondOrder + HasBondAromaticity,
{
    let ranks = canonical_ordering(mol);
    let mut by_rank: Vec<NodeIndex> = mol.atoms().collect();
    by_rank.sort_by_key(|a| ranks[a.index()]);

    let mut key = String::new();
    for node in &by_rank {
        let atom = mol.atom(*node);
        let _ = write!(
            key,
            "{}{}h{}{:+}",
            atom.atomic_num(),
            if atom.is_aromatic() { "a" } else { "" },
            atom.hydrogen_count(),
            atom.formal_charge(),
        );
        if atom.isotope() != 0 {
            let _ = write!(key, "i{}", atom.isotope());
        }
        key.push(';');
    }

    let mut bonds: Vec<(usize, usize, BondCode)> = mol
        .bonds()
        .map(|e| {
            let (a, b) = mol.endpoints(e);
            let (ra, rb) = (ranks[a.index()], ranks[b.index()]);
            (ra.min(rb), ra.max(rb), BondCode::of(mol.bond(e)))
        })
        .collect();
    bonds.sort_unstable();
    key.push('|');
    for (a, b, code) in bonds {
        let _ = write!(key, "{a}{}{b};", code.symbol());
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smiles::from_smiles;

    fn key(smiles: &str) -> String {
        canonical_key(&from_smiles(smiles).unwrap())
    }

    #[test]
    fn empty_mol() {
        let mol = Mol::<crate::atom::Atom, crate::bond::Bond>::new();
        assert!(canonical_ordering(&mol).is_empty());
        assert_eq!(canonical_key(&mol), "|");
    }

    #[test]
    fn ranks_are_a_permutation() {
        for smi in ["CCO", "c1ccccc1", "C1CC2CC1CC2", "OC(=O)CC(=O)O"] {
            let mol = from_smiles(smi).unwrap();
            let mut ranks = canonical_ordering(&mol);
            ranks.sort();
            assert_eq!(ranks, (0..mol.atom_count()).collect::<Vec<_>>(), "{smi}");
        }
    }

    #[test]
    fn key_ignores_atom_order() {
        assert_eq!(key("CCO"), key("OCC"));
        assert_eq!(key("CC(=O)N"), key("NC(C)=O"));
        assert_eq!(key("Oc1ccccc1"), key("c1ccc(O)cc1"));
        assert_eq!(key("c1ccc2[nH]ccc2c1"), key("c12ccccc1cc[nH]2"));
    }

    #[test]
    fn key_ignores_kekule_form() {
        assert_eq!(key("C1=CC=CC=C1"), key("c1ccccc1"));
        assert_eq!(key("O=C1C=CC=CN1"), key("O=c1cccc[nH]1"));
    }

    #[test]
    fn key_separates_tautomers() {
        assert_ne!(key("CC(=O)C"), key("C=C(O)C"));
        assert_ne!(key("c1c[nH]nc1C"), key("c1cn[nH]c1C"));
        assert_ne!(key("O=C1C=CC=CN1"), key("Oc1ccccn1"));
    }

    #[test]
    fn key_separates_charge_and_isotope() {
        assert_ne!(key("CC(=O)O"), key("CC(=O)[O-]"));
        assert_ne!(key("CC"), key("[13CH3]C"));
    }

    #[test]
    fn bond_codes() {
        assert_eq!(BondCode::Aromatic.symbol(), ':');
        assert!(key("C=C").contains('='));
        assert!(key("c1ccccc1").contains(':'));
    }
}
