use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::atom::Atom;
use crate::bond::Bond;

/// Structural defects that make a graph unusable as a molecule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MolError {
    #[error("bond {bond} references atom {atom}, but the molecule has {atom_count} atoms")]
    DanglingBond {
        bond: usize,
        atom: usize,
        atom_count: usize,
    },
    #[error("bond {bond} connects atom {atom} to itself")]
    SelfLoop { bond: usize, atom: usize },
    #[error("atoms {a} and {b} are joined by more than one bond")]
    DuplicateBond { a: usize, b: usize },
}

/// Molecular graph: an arena of atoms and bonds indexed by stable small
/// integers.
///
/// Cloning produces a fully independent copy; tautomer candidates are
/// always separate `Mol` values.
pub struct Mol<A, B> {
    graph: UnGraph<A, B>,
}

/// The perceived molecule type the tautomer engine works on.
pub type Molecule = Mol<Atom, Bond>;

impl<A, B> Mol<A, B> {
    pub fn new() -> Self {
        Self {
            graph: UnGraph::default(),
        }
    }

    /// Builds a molecule from raw atoms and `(a, b, bond)` triples, rejecting
    /// references to missing atoms, self-loops and repeated atom pairs.
    pub fn from_parts(
        atoms: Vec<A>,
        bonds: Vec<(usize, usize, B)>,
    ) -> Result<Self, MolError> {
        let mut mol = Self::new();
        let atom_count = atoms.len();
        for atom in atoms {
            mol.add_atom(atom);
        }
        for (i, (a, b, bond)) in bonds.into_iter().enumerate() {
            for atom in [a, b] {
                if atom >= atom_count {
                    return Err(MolError::DanglingBond {
                        bond: i,
                        atom,
                        atom_count,
                    });
                }
            }
            if a == b {
                return Err(MolError::SelfLoop { bond: i, atom: a });
            }
            if mol.bond_between(NodeIndex::new(a), NodeIndex::new(b)).is_some() {
                return Err(MolError::DuplicateBond {
                    a: a.min(b),
                    b: a.max(b),
                });
            }
            mol.add_bond(NodeIndex::new(a), NodeIndex::new(b), bond);
        }
        Ok(mol)
    }

    /// Re-validates the graph invariants `from_parts` enforces. Graphs grown
    /// through [`add_bond`](Self::add_bond) are not checked as they are built.
    pub fn check_structure(&self) -> Result<(), MolError> {
        let mut seen = std::collections::HashSet::new();
        for edge in self.bonds() {
            let (a, b) = self.endpoints(edge);
            if a == b {
                return Err(MolError::SelfLoop {
                    bond: edge.index(),
                    atom: a.index(),
                });
            }
            let key = (a.index().min(b.index()), a.index().max(b.index()));
            if !seen.insert(key) {
                return Err(MolError::DuplicateBond { a: key.0, b: key.1 });
            }
        }
        Ok(())
    }

    pub fn graph(&self) -> &UnGraph<A, B> {
        &self.graph
    }

    pub fn atom(&self, idx: NodeIndex) -> &A {
        &self.graph[idx]
    }

    pub fn atom_mut(&mut self, idx: NodeIndex) -> &mut A {
        &mut self.graph[idx]
    }

    pub fn bond(&self, idx: EdgeIndex) -> &B {
        &self.graph[idx]
    }

    pub fn bond_mut(&mut self, idx: EdgeIndex) -> &mut B {
        &mut self.graph[idx]
    }

    pub fn add_atom(&mut self, atom: A) -> NodeIndex {
        self.graph.add_node(atom)
    }

    pub fn add_bond(&mut self, a: NodeIndex, b: NodeIndex, bond: B) -> EdgeIndex {
        self.graph.add_edge(a, b, bond)
    }

    pub fn atom_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn bond_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn neighbors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(idx)
    }

    pub fn degree(&self, idx: NodeIndex) -> usize {
        self.graph.neighbors(idx).count()
    }

    pub fn bonds_of(&self, idx: NodeIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edges(idx).map(|e| e.id())
    }

    pub fn atoms(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn bonds(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edge_indices()
    }

    pub fn bond_between(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex> {
        self.graph.find_edge(a, b)
    }

    pub fn bond_endpoints(&self, idx: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(idx)
    }

    /// Endpoints of a bond known to exist in this graph.
    pub(crate) fn endpoints(&self, idx: EdgeIndex) -> (NodeIndex, NodeIndex) {
        let edge = &self.graph.raw_edges()[idx.index()];
        (edge.source(), edge.target())
    }

    /// The atom on the other side of `bond` from `atom`.
    pub fn other_end(&self, bond: EdgeIndex, atom: NodeIndex) -> NodeIndex {
        let (a, b) = self.endpoints(bond);
        if a == atom {
            b
        } else {
            a
        }
    }
}

impl<A: Clone, B: Clone> Clone for Mol<A, B> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph.clone(),
        }
    }
}

impl<A, B> Default for Mol<A, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: PartialEq, B: PartialEq> PartialEq for Mol<A, B> {
    fn eq(&self, other: &Self) -> bool {
        if self.atom_count() != other.atom_count() || self.bond_count() != other.bond_count() {
            return false;
        }
        if self.atoms().any(|idx| self.atom(idx) != other.atom(idx)) {
            return false;
        }
        self.bonds().all(|idx| {
            self.bond(idx) == other.bond(idx) && self.endpoints(idx) == other.endpoints(idx)
        })
    }
}

impl<A: std::fmt::Debug, B: std::fmt::Debug> std::fmt::Debug for Mol<A, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mol")
            .field("atom_count", &self.atom_count())
            .field("bond_count", &self.bond_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bond::BondOrder;

    fn carbon() -> Atom {
        Atom {
            atomic_num: 6,
            ..Atom::default()
        }
    }

    #[test]
    fn from_parts_builds_graph() {
        let mol = Mol::from_parts(
            vec![carbon(), carbon(), carbon()],
            vec![
                (0, 1, Bond::new(BondOrder::Single)),
                (1, 2, Bond::new(BondOrder::Double)),
            ],
        )
        .unwrap();
        assert_eq!(mol.atom_count(), 3);
        assert_eq!(mol.bond_count(), 2);
        let e = mol.bond_between(NodeIndex::new(2), NodeIndex::new(1)).unwrap();
        assert_eq!(mol.bond(e).order, BondOrder::Double);
        assert_eq!(mol.other_end(e, NodeIndex::new(1)), NodeIndex::new(2));
    }

    #[test]
    fn from_parts_rejects_dangling_bond() {
        let err = Mol::from_parts(vec![carbon()], vec![(0, 3, Bond::default())]).unwrap_err();
        assert_eq!(
            err,
            MolError::DanglingBond {
                bond: 0,
                atom: 3,
                atom_count: 1
            }
        );
    }

    #[test]
    fn from_parts_rejects_self_loop() {
        let err = Mol::from_parts(vec![carbon()], vec![(0, 0, Bond::default())]).unwrap_err();
        assert!(matches!(err, MolError::SelfLoop { atom: 0, .. }));
    }

    #[test]
    fn from_parts_rejects_duplicate_bond() {
        let err = Mol::from_parts(
            vec![carbon(), carbon()],
            vec![(0, 1, Bond::default()), (1, 0, Bond::default())],
        )
        .unwrap_err();
        assert_eq!(err, MolError::DuplicateBond { a: 0, b: 1 });
    }

    #[test]
    fn check_structure_flags_parallel_edges() {
        let mut mol: Molecule = Mol::new();
        let a = mol.add_atom(carbon());
        let b = mol.add_atom(carbon());
        mol.add_bond(a, b, Bond::default());
        assert!(mol.check_structure().is_ok());
        mol.add_bond(b, a, Bond::default());
        assert!(matches!(
            mol.check_structure(),
            Err(MolError::DuplicateBond { .. })
        ));
    }

    #[test]
    fn clone_is_independent() {
        let original = Mol::from_parts(vec![carbon()], Vec::<(usize, usize, Bond)>::new()).unwrap();
        let mut copy = original.clone();
        copy.atom_mut(NodeIndex::new(0)).hydrogen_count = 4;
        assert_eq!(original.atom(NodeIndex::new(0)).hydrogen_count, 0);
        assert_ne!(original, copy);
    }

    #[test]
    fn error_messages() {
        let msg = MolError::SelfLoop { bond: 2, atom: 5 }.to_string();
        assert!(msg.contains("bond 2"));
        assert!(msg.contains("atom 5"));
    }
}
