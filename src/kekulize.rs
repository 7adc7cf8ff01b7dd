//! Kekulization assigns alternating single and double bonds to aromatic
//! systems.
//!
//! Two entry points share one matcher: [`kekulize`] turns the aromatic bonds
//! of a freshly parsed SMILES graph into concrete orders, and
//! [`rekekulize`] re-derives the orders of an arbitrary bond set in place,
//! which tautomer rewrites use after moving a hydrogen across a ring.
//! Both work by augmenting-path matching: every atom that is one bond order
//! short of its target valence must receive exactly one double bond.

use std::collections::{HashSet, VecDeque};

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::atom::Atom;
use crate::bond::{Bond, BondOrder, SmilesBond, SmilesBondOrder};
use crate::element::Element;
use crate::mol::{Mol, Molecule};

/// Error returned when no valid Kekulé structure exists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KekulizeError {
    /// The given atoms could not be assigned a double bond.
    #[error("cannot kekulize aromatic system: unmatched atoms {}", format_atoms(.0))]
    Unkekulizable(Vec<NodeIndex>),
}

fn format_atoms(atoms: &[NodeIndex]) -> String {
    let ids: Vec<String> = atoms.iter().map(|a| a.index().to_string()).collect();
    format!("[{}]", ids.join(", "))
}

/// Convert a parsed SMILES graph into a molecule with explicit Kekulé bonds.
///
/// Aromatic bonds become single or double so that every atom that needs a
/// double bond receives exactly one. Other bonds keep their order. The
/// result carries no ring or aromaticity flags; run
/// [`perceive`](crate::aromaticity::perceive) afterwards.
pub fn kekulize(mol: Mol<Atom, SmilesBond>) -> Result<Molecule, KekulizeError> {
    let flexible: Vec<EdgeIndex> = mol
        .bonds()
        .filter(|&e| mol.bond(e).order == SmilesBondOrder::Aromatic)
        .collect();

    let needs_double: Vec<bool> = mol
        .atoms()
        .map(|node| {
            let used: u8 = mol
                .bonds_of(node)
                .map(|e| match mol.bond(e).order {
                    SmilesBondOrder::Double => 2,
                    SmilesBondOrder::Triple => 3,
                    _ => 1,
                })
                .sum();
            needs_double_bond(mol.atom(node), used)
        })
        .collect();

    let doubles = match_double_bonds(&mol, &flexible, &needs_double)?;

    let mut result = Mol::new();
    for node in mol.atoms() {
        result.add_atom(Atom {
            is_aromatic: false,
            ..mol.atom(node).clone()
        });
    }
    for edge in mol.bonds() {
        let (a, b) = mol.endpoints(edge);
        let order = match mol.bond(edge).order {
            SmilesBondOrder::Aromatic if doubles.contains(&edge) => BondOrder::Double,
            SmilesBondOrder::Double => BondOrder::Double,
            SmilesBondOrder::Triple => BondOrder::Triple,
            _ => BondOrder::Single,
        };
        result.add_bond(a, b, Bond::new(order));
    }
    Ok(result)
}

/// Re-assigns the orders of `bonds` in place.
///
/// Every listed bond is reset to single and the matcher places double bonds
/// on atoms whose valence then falls one short of their target. Bonds not
/// listed are left alone and count towards each atom's valence.
pub fn rekekulize(mol: &mut Molecule, bonds: &[EdgeIndex]) -> Result<(), KekulizeError> {
    for &e in bonds {
        mol.bond_mut(e).order = BondOrder::Single;
    }
    let flexible: HashSet<EdgeIndex> = bonds.iter().copied().collect();
    let needs_double: Vec<bool> = mol
        .atoms()
        .map(|node| {
            if !mol.bonds_of(node).any(|e| flexible.contains(&e)) {
                return false;
            }
            let used: u8 = mol
                .bonds_of(node)
                .map(|e| mol.bond(e).order.valence())
                .sum();
            needs_double_bond(mol.atom(node), used)
        })
        .collect();

    let doubles = match_double_bonds(mol, bonds, &needs_double)?;
    for e in doubles {
        mol.bond_mut(e).order = BondOrder::Double;
    }
    Ok(())
}

fn needs_double_bond(atom: &Atom, bond_valence: u8) -> bool {
    let Some(elem) = Element::from_atomic_num(atom.atomic_num) else {
        return false;
    };
    let used = bond_valence + atom.hydrogen_count;
    let allowed = elem.allowed_valences(atom.formal_charge);
    // Neutral atoms only fill up to their lowest valence; an aromatic NH
    // never gains a double bond as pentavalent nitrogen.
    let target = if atom.formal_charge == 0 {
        allowed.first().copied().filter(|&v| v >= used)
    } else {
        allowed.iter().copied().find(|&v| v >= used)
    };
    let Some(target) = target else {
        return false;
    };
    let gap = target - used;
    gap == 1 || (gap == 2 && atom.hydrogen_count == 0 && atom.formal_charge != 0)
}

/// Maximum matching over `edges` covering every atom flagged in
/// `needs_double`. Returns the matched bonds.
fn match_double_bonds<A, B>(
    mol: &Mol<A, B>,
    edges: &[EdgeIndex],
    needs_double: &[bool],
) -> Result<HashSet<EdgeIndex>, KekulizeError> {
    let n = mol.atom_count();
    let mut adj: Vec<Vec<(NodeIndex, EdgeIndex)>> = vec![Vec::new(); n];
    for &e in edges {
        let (a, b) = mol.endpoints(e);
        if needs_double[a.index()] && needs_double[b.index()] {
            adj[a.index()].push((b, e));
            adj[b.index()].push((a, e));
        }
    }

    let mut matching = Matching {
        adj: &adj,
        mate: vec![None; n],
    };
    let touched = |v: &usize| edges.iter().any(|&e| {
        let (a, b) = mol.endpoints(e);
        a.index() == *v || b.index() == *v
    });
    let candidates: Vec<usize> = (0..n)
        .filter(|v| needs_double[*v] && touched(v))
        .collect();

    for &start in &candidates {
        if matching.mate[start].is_none() {
            matching.augment(NodeIndex::new(start));
        }
    }

    let unmatched: Vec<NodeIndex> = candidates
        .iter()
        .filter(|&&v| matching.mate[v].is_none())
        .map(|&v| NodeIndex::new(v))
        .collect();
    if !unmatched.is_empty() {
        return Err(KekulizeError::Unkekulizable(unmatched));
    }
    Ok(matching
        .mate
        .iter()
        .filter_map(|m| m.map(|(_, e)| e))
        .collect())
}

struct Matching<'a> {
    adj: &'a [Vec<(NodeIndex, EdgeIndex)>],
    mate: Vec<Option<(NodeIndex, EdgeIndex)>>,
}

impl Matching<'_> {
    /// Breadth-first search for an alternating path from `start` to a free
    /// atom; flips the path when one is found.
    fn augment(&mut self, start: NodeIndex) -> bool {
        let n = self.mate.len();
        let mut prev: Vec<Option<(NodeIndex, EdgeIndex)>> = vec![None; n];
        let mut visited = vec![false; n];
        let mut queue = VecDeque::from([start]);
        visited[start.index()] = true;

        while let Some(u) = queue.pop_front() {
            for &(v, e) in &self.adj[u.index()] {
                if visited[v.index()] {
                    continue;
                }
                visited[v.index()] = true;
                prev[v.index()] = Some((u, e));
                match self.mate[v.index()] {
                    None => {
                        self.flip(&prev, start, v);
                        return true;
                    }
                    Some((w, mate_edge)) => {
                        if !visited[w.index()] {
                            visited[w.index()] = true;
                            prev[w.index()] = Some((v, mate_edge));
                            queue.push_back(w);
                        }
                    }
                }
            }
        }
        false
    }

    fn flip(&mut self, prev: &[Option<(NodeIndex, EdgeIndex)>], start: NodeIndex, end: NodeIndex) {
        let mut cur = end;
        let mut take = true;
        while cur != start {
            let Some((p, e)) = prev[cur.index()] else {
                return;
            };
            if take {
                self.mate[cur.index()] = Some((p, e));
                self.mate[p.index()] = Some((cur, e));
            }
            take = !take;
            cur = p;
        }
    }
}
