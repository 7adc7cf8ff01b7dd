use std::fmt::Write as _;

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::atom::Atom;
use crate::bond::BondOrder;
use crate::canonical::canonical_ordering;
use crate::element::Element;
use crate::mol::Molecule;
use crate::smiles::builder::implicit_hydrogens;

/// Writes a SMILES string, walking atoms in graph order.
pub fn to_smiles(mol: &Molecule) -> String {
    write_smiles(mol, None)
}

/// Writes a SMILES string that is the same for every atom numbering and
/// every Kekulé form of the molecule.
pub fn to_canonical_smiles(mol: &Molecule) -> String {
    let ranks = canonical_ordering(mol);
    write_smiles(mol, Some(&ranks))
}

fn write_smiles(mol: &Molecule, ranks: Option<&[usize]>) -> String {
    let mut order: Vec<NodeIndex> = mol.atoms().collect();
    if let Some(r) = ranks {
        order.sort_by_key(|a| r[a.index()]);
    }
    let mut tree = SpanningTree::new(mol, ranks);
    let mut fragments = Vec::new();
    for start in order {
        if tree.visited[start.index()] {
            continue;
        }
        tree.grow(start);
        let mut out = String::new();
        let mut rings = RingNumbers::default();
        write_node(mol, start, &tree, &mut rings, &mut out);
        fragments.push(out);
    }
    fragments.join(".")
}

/// DFS spanning forest with the back edges that become ring closures.
struct SpanningTree {
    neighbours: Vec<Vec<(NodeIndex, EdgeIndex)>>,
    visited: Vec<bool>,
    edge_used: Vec<bool>,
    children: Vec<Vec<(NodeIndex, EdgeIndex)>>,
    /// Closures opened at an atom, in discovery order.
    opens: Vec<Vec<EdgeIndex>>,
    /// Closures closed at an atom.
    closes: Vec<Vec<EdgeIndex>>,
}

impl SpanningTree {
    fn new(mol: &Molecule, ranks: Option<&[usize]>) -> Self {
        let n = mol.atom_count();
        let neighbours = mol
            .atoms()
            .map(|a| {
                let mut nb: Vec<(NodeIndex, EdgeIndex)> =
                    mol.bonds_of(a).map(|e| (mol.other_end(e, a), e)).collect();
                match ranks {
                    Some(r) => nb.sort_by_key(|(x, _)| r[x.index()]),
                    None => nb.sort_by_key(|(x, _)| x.index()),
                }
                nb
            })
            .collect();
        Self {
            neighbours,
            visited: vec![false; n],
            edge_used: vec![false; mol.bond_count()],
            children: vec![Vec::new(); n],
            opens: vec![Vec::new(); n],
            closes: vec![Vec::new(); n],
        }
    }

    fn grow(&mut self, start: NodeIndex) {
        self.visited[start.index()] = true;
        let mut stack: Vec<(NodeIndex, usize)> = vec![(start, 0)];
        while let Some((node, next)) = stack.last_mut() {
            let node = *node;
            let Some(&(nb, edge)) = self.neighbours[node.index()].get(*next) else {
                stack.pop();
                continue;
            };
            *next += 1;
            if self.edge_used[edge.index()] {
                continue;
            }
            self.edge_used[edge.index()] = true;
            if self.visited[nb.index()] {
                self.opens[nb.index()].push(edge);
                self.closes[node.index()].push(edge);
            } else {
                self.visited[nb.index()] = true;
                self.children[node.index()].push((nb, edge));
                stack.push((nb, 0));
            }
        }
    }
}

/// Ring-closure numbers in use; the lowest free number is handed out first.
#[derive(Default)]
struct RingNumbers {
    by_edge: Vec<(EdgeIndex, usize)>,
}

impl RingNumbers {
    fn open(&mut self, edge: EdgeIndex) -> usize {
        let mut n = 1;
        while self.by_edge.iter().any(|&(_, used)| used == n) {
            n += 1;
        }
        self.by_edge.push((edge, n));
        n
    }

    fn close(&mut self, edge: EdgeIndex) -> Option<usize> {
        let pos = self.by_edge.iter().position(|&(e, _)| e == edge)?;
        Some(self.by_edge.swap_remove(pos).1)
    }
}

fn write_node(
    mol: &Molecule,
    node: NodeIndex,
    tree: &SpanningTree,
    rings: &mut RingNumbers,
    out: &mut String,
) {
    write_atom(mol, node, out);

    for &edge in &tree.closes[node.index()] {
        if let Some(n) = rings.close(edge) {
            write_bond(mol, edge, out);
            write_ring_number(n, out);
        }
    }
    for &edge in &tree.opens[node.index()] {
        let n = rings.open(edge);
        write_bond(mol, edge, out);
        write_ring_number(n, out);
    }

    let kids = &tree.children[node.index()];
    for (i, &(child, edge)) in kids.iter().enumerate() {
        let branch = i + 1 < kids.len();
        if branch {
            out.push('(');
        }
        write_bond(mol, edge, out);
        write_node(mol, child, tree, rings, out);
        if branch {
            out.push(')');
        }
    }
}

/// Aromatic bonds are left implicit. A plain single bond between two
/// aromatic atoms is spelled out so a reader does not take it as aromatic.
fn write_bond(mol: &Molecule, edge: EdgeIndex, out: &mut String) {
    let bond = mol.bond(edge);
    if bond.is_aromatic {
        return;
    }
    let (a, b) = mol.endpoints(edge);
    match bond.order {
        BondOrder::Single if mol.atom(a).is_aromatic && mol.atom(b).is_aromatic => out.push('-'),
        BondOrder::Single => {}
        BondOrder::Double => out.push('='),
        BondOrder::Triple => out.push('#'),
    }
}

fn write_ring_number(n: usize, out: &mut String) {
    if n < 10 {
        let _ = write!(out, "{n}");
    } else {
        let _ = write!(out, "%{n}");
    }
}

fn write_atom(mol: &Molecule, node: NodeIndex, out: &mut String) {
    let atom = mol.atom(node);
    let Some(elem) = Element::from_atomic_num(atom.atomic_num) else {
        let _ = write!(out, "[#{}]", atom.atomic_num);
        return;
    };
    if can_write_bare(mol, node, elem) {
        push_symbol(elem, atom.is_aromatic, out);
    } else {
        write_bracket_atom(atom, elem, out);
    }
}

fn push_symbol(elem: Element, aromatic: bool, out: &mut String) {
    if aromatic {
        out.push_str(&elem.symbol().to_ascii_lowercase());
    } else {
        out.push_str(elem.symbol());
    }
}

/// True when a reader would give the bare symbol exactly this atom's
/// hydrogen count.
fn can_write_bare(mol: &Molecule, node: NodeIndex, elem: Element) -> bool {
    let atom = mol.atom(node);
    if !elem.is_organic_subset() || atom.isotope != 0 || atom.formal_charge != 0 {
        return false;
    }
    if atom.is_aromatic
        && !matches!(
            elem,
            Element::B | Element::C | Element::N | Element::O | Element::P | Element::S
        )
    {
        return false;
    }
    let read_sum: u8 = mol
        .bonds_of(node)
        .map(|e| {
            let bond = mol.bond(e);
            if bond.is_aromatic {
                1
            } else {
                bond.order.valence()
            }
        })
        .sum();
    atom.hydrogen_count == implicit_hydrogens(elem, atom.is_aromatic, read_sum)
}

fn write_bracket_atom(atom: &Atom, elem: Element, out: &mut String) {
    out.push('[');
    if atom.isotope != 0 {
        let _ = write!(out, "{}", atom.isotope);
    }
    push_symbol(elem, atom.is_aromatic, out);
    match atom.hydrogen_count {
        0 => {}
        1 => out.push('H'),
        h => {
            let _ = write!(out, "H{h}");
        }
    }
    match atom.formal_charge {
        0 => {}
        1 => out.push('+'),
        -1 => out.push('-'),
        q if q > 0 => {
            let _ = write!(out, "+{q}");
        }
        q => {
            let _ = write!(out, "-{}", -(q as i16));
        }
    }
    out.push(']');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::canonical_key;
    use crate::smiles::from_smiles;

    fn round_trip(smiles: &str) -> String {
        let mol = from_smiles(smiles).unwrap();
        let written = to_smiles(&mol);
        let back = from_smiles(&written)
            .unwrap_or_else(|e| panic!("cannot re-read '{written}' (from '{smiles}'): {e}"));
        assert_eq!(canonical_key(&mol), canonical_key(&back), "{smiles} -> {written}");
        written
    }

    fn canon(smiles: &str) -> String {
        to_canonical_smiles(&from_smiles(smiles).unwrap())
    }

    #[test]
    fn simple_chains() {
        assert_eq!(round_trip("CCO"), "CCO");
        assert_eq!(round_trip("CC(=O)O"), "CC(=O)O");
        assert_eq!(round_trip("C#N"), "C#N");
    }

    #[test]
    fn rings_and_aromatics() {
        assert_eq!(round_trip("c1ccccc1"), "c1ccccc1");
        assert_eq!(round_trip("C1=CC=CC=C1"), "c1ccccc1");
        assert_eq!(round_trip("C1CCCCC1"), "C1CCCCC1");
        round_trip("c1ccc2ccccc2c1");
        round_trip("c1ccc2[nH]ccc2c1");
        round_trip("O=c1cccc[nH]1");
        round_trip("c1ccc(-c2ccccc2)cc1");
    }

    #[test]
    fn bracket_atoms() {
        assert_eq!(round_trip("[NH4+]"), "[NH4+]");
        assert_eq!(round_trip("CC(=O)[O-]"), "CC(=O)[O-]");
        assert_eq!(round_trip("[13CH4]"), "[13CH4]");
        assert_eq!(round_trip("[Na+].[Cl-]"), "[Na+].[Cl-]");
        round_trip("C[N+](=O)[O-]");
        round_trip("c1cc[se]c1");
    }

    #[test]
    fn biphenyl_link_is_explicit() {
        let written = round_trip("c1ccccc1-c1ccccc1");
        assert!(written.contains('-'), "{written}");
    }

    #[test]
    fn many_ring_closures() {
        let cubane = from_smiles("C12C3C4C1C5C2C3C45").unwrap();
        let back = from_smiles(&to_smiles(&cubane)).unwrap();
        assert_eq!(back.atom_count(), 8);
        assert_eq!(back.bond_count(), 12);
        assert!(back.atoms().all(|a| back.atom(a).hydrogen_count == 1));
    }

    #[test]
    fn canonical_ignores_input_order() {
        assert_eq!(canon("OCC"), canon("CCO"));
        assert_eq!(canon("NC(C)=O"), canon("CC(N)=O"));
        assert_eq!(canon("C1=CC=CC=C1O"), canon("Oc1ccccc1"));
        assert_eq!(canon("c1c[nH]cn1"), canon("[nH]1ccnc1"));
    }

    #[test]
    fn canonical_separates_tautomers() {
        assert_ne!(canon("CC(=O)C"), canon("CC(O)=C"));
        assert_ne!(canon("O=c1cccc[nH]1"), canon("Oc1ccccn1"));
    }

    #[test]
    fn ring_numbers_are_reused() {
        let mut rings = RingNumbers::default();
        let a = rings.open(EdgeIndex::new(0));
        let b = rings.open(EdgeIndex::new(1));
        assert_eq!((a, b), (1, 2));
        assert_eq!(rings.close(EdgeIndex::new(0)), Some(1));
        assert_eq!(rings.open(EdgeIndex::new(2)), 1);
        assert_eq!(rings.close(EdgeIndex::new(9)), None);
    }

    #[test]
    fn ring_number_spelling() {
        let mut out = String::new();
        write_ring_number(3, &mut out);
        write_ring_number(12, &mut out);
        assert_eq!(out, "3%12");
    }
}
