//! Ring perception: smallest set of smallest rings and its symmetrized
//! extension, computed from Horton candidate cycles reduced over GF(2).

use std::collections::VecDeque;

use petgraph::algo::connected_components;
use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::mol::{Mol, Molecule};

#[derive(Debug, Clone, Default)]
pub struct RingInfo {
    rings: Vec<Vec<NodeIndex>>,
}

impl RingInfo {
    /// Smallest set of smallest rings. Contains exactly
    /// [`expected_ring_count`](Self::expected_ring_count) rings.
    pub fn sssr<A, B>(mol: &Mol<A, B>) -> Self {
        let needed = Self::expected_ring_count(mol);
        if needed == 0 {
            return Self::default();
        }
        let mut basis = CycleBasis::default();
        let mut rings = Vec::with_capacity(needed);
        for ring in horton_candidates(mol) {
            if rings.len() >= needed {
                break;
            }
            if basis.insert(EdgeSet::of_ring(&ring, mol)) {
                rings.push(normalize_ring(&ring));
            }
        }
        sort_rings(&mut rings);
        Self { rings }
    }

    /// SSSR plus every equally small candidate that the SSSR could have
    /// picked instead, so that symmetric ring systems (cubane, decalin) are
    /// described without an arbitrary choice.
    pub fn symmetrized_sssr<A, B>(mol: &Mol<A, B>) -> Self {
        let needed = Self::expected_ring_count(mol);
        if needed == 0 {
            return Self::default();
        }
        let candidates = horton_candidates(mol);
        let mut basis = CycleBasis::default();
        let mut chosen: Vec<EdgeSet> = Vec::new();
        let mut largest = 0;
        for ring in &candidates {
            if chosen.len() >= needed {
                break;
            }
            let set = EdgeSet::of_ring(ring, mol);
            if basis.insert(set.clone()) {
                largest = largest.max(ring.len());
                chosen.push(set);
            }
        }
        for ring in &candidates {
            if ring.len() > largest {
                break;
            }
            let set = EdgeSet::of_ring(ring, mol);
            if !set.is_empty() && !chosen.contains(&set) {
                chosen.push(set);
            }
        }
        let mut rings: Vec<Vec<NodeIndex>> = chosen
            .iter()
            .filter_map(|set| set.to_ring(mol))
            .map(|r| normalize_ring(&r))
            .collect();
        sort_rings(&mut rings);
        rings.dedup();
        Self { rings }
    }

    pub fn num_rings(&self) -> usize {
        self.rings.len()
    }

    pub fn rings(&self) -> &[Vec<NodeIndex>] {
        &self.rings
    }

    pub fn is_ring_atom(&self, atom: NodeIndex) -> bool {
        self.rings.iter().any(|ring| ring.contains(&atom))
    }

    pub fn is_ring_bond(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.rings
            .iter()
            .any(|ring| ring_edges(ring).any(|(x, y)| (x, y) == (a, b) || (x, y) == (b, a)))
    }

    /// Cyclomatic number `E - V + C`.
    pub fn expected_ring_count<A, B>(mol: &Mol<A, B>) -> usize {
        let v = mol.atom_count();
        let e = mol.bond_count();
        let c = connected_components(mol.graph());
        (e + c).saturating_sub(v)
    }
}

/// Consecutive atom pairs around a ring, closing back to the first atom.
pub fn ring_edges(ring: &[NodeIndex]) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
    let len = ring.len();
    (0..len).map(move |i| (ring[i], ring[(i + 1) % len]))
}

/// Bond indices around a ring, in ring order.
pub fn ring_bonds<A, B>(mol: &Mol<A, B>, ring: &[NodeIndex]) -> Vec<EdgeIndex> {
    ring_edges(ring)
        .filter_map(|(a, b)| mol.bond_between(a, b))
        .collect()
}

/// Recomputes `Atom::in_ring` for every atom.
pub fn perceive_rings(mol: &mut Molecule) -> RingInfo {
    let info = RingInfo::sssr(mol);
    let atoms: Vec<NodeIndex> = mol.atoms().collect();
    for idx in atoms {
        let in_ring = info.is_ring_atom(idx);
        mol.atom_mut(idx).in_ring = in_ring;
    }
    info
}

/// Edge incidence vector of a cycle over GF(2).
#[derive(Debug, Clone, PartialEq, Eq)]
struct EdgeSet(Vec<u64>);

impl EdgeSet {
    fn of_ring<A, B>(ring: &[NodeIndex], mol: &Mol<A, B>) -> Self {
        let mut words = vec![0u64; mol.bond_count().div_ceil(64)];
        for edge in ring_bonds(mol, ring) {
            let i = edge.index();
            words[i / 64] |= 1u64 << (i % 64);
        }
        Self(words)
    }

    fn contains(&self, i: usize) -> bool {
        self.0[i / 64] & (1u64 << (i % 64)) != 0
    }

    fn is_empty(&self) -> bool {
        self.0.iter().all(|&w| w == 0)
    }

    fn leading_bit(&self) -> Option<usize> {
        self.0
            .iter()
            .enumerate()
            .find(|(_, &w)| w != 0)
            .map(|(i, &w)| i * 64 + w.trailing_zeros() as usize)
    }

    fn xor_with(&mut self, other: &EdgeSet) {
        for (a, b) in self.0.iter_mut().zip(&other.0) {
            *a ^= *b;
        }
    }

    /// Walks the edges of a simple cycle back into an atom sequence.
    fn to_ring<A, B>(&self, mol: &Mol<A, B>) -> Option<Vec<NodeIndex>> {
        let mut adj: Vec<Vec<NodeIndex>> = vec![Vec::new(); mol.atom_count()];
        for edge in mol.bonds() {
            if self.contains(edge.index()) {
                let (u, v) = mol.bond_endpoints(edge)?;
                adj[u.index()].push(v);
                adj[v.index()].push(u);
            }
        }
        let start = adj.iter().position(|n| !n.is_empty())?;
        let mut ring = vec![NodeIndex::new(start)];
        let mut prev = start;
        let mut cur = adj[start].first()?.index();
        while cur != start {
            ring.push(NodeIndex::new(cur));
            let next = adj[cur].iter().find(|nb| nb.index() != prev)?.index();
            prev = cur;
            cur = next;
        }
        Some(ring)
    }
}

/// Row-reduced basis of the cycle space seen so far.
#[derive(Default)]
struct CycleBasis {
    rows: Vec<EdgeSet>,
}

impl CycleBasis {
    /// Adds the cycle if it is independent of the current basis.
    fn insert(&mut self, mut set: EdgeSet) -> bool {
        if set.is_empty() {
            return false;
        }
        for row in &self.rows {
            if let Some(p) = row.leading_bit() {
                if set.contains(p) {
                    set.xor_with(row);
                }
            }
        }
        if set.is_empty() {
            return false;
        }
        self.rows.push(set);
        true
    }
}

/// Candidate cycles: for each edge (u, v) and atom w, the shortest paths
/// w→u and w→v joined by the edge, kept when the paths share only w.
fn horton_candidates<A, B>(mol: &Mol<A, B>) -> Vec<Vec<NodeIndex>> {
    let n = mol.atom_count();
    let trees: Vec<ShortestPaths> = (0..n)
        .map(|w| ShortestPaths::from(mol, NodeIndex::new(w)))
        .collect();

    let mut candidates = Vec::new();
    for edge in mol.bonds() {
        let Some((u, v)) = mol.bond_endpoints(edge) else {
            continue;
        };
        for tree in &trees {
            let (Some(du), Some(dv)) = (tree.dist[u.index()], tree.dist[v.index()]) else {
                continue;
            };
            if du + dv + 1 < 3 {
                continue;
            }
            let path_u = tree.path_to(u);
            let path_v = tree.path_to(v);
            if path_u.is_empty() || path_v.is_empty() {
                continue;
            }
            if path_u[1..].iter().any(|a| path_v[1..].contains(a)) {
                continue;
            }
            let mut ring = path_u;
            ring.extend(path_v[1..].iter().rev());
            candidates.push(ring);
        }
    }
    sort_rings(&mut candidates);
    candidates.dedup();
    candidates
}

struct ShortestPaths {
    source: NodeIndex,
    dist: Vec<Option<usize>>,
    pred: Vec<Option<NodeIndex>>,
}

impl ShortestPaths {
    fn from<A, B>(mol: &Mol<A, B>, source: NodeIndex) -> Self {
        let n = mol.atom_count();
        let mut dist = vec![None; n];
        let mut pred = vec![None; n];
        dist[source.index()] = Some(0);
        let mut queue = VecDeque::from([source]);
        while let Some(cur) = queue.pop_front() {
            let d = dist[cur.index()].unwrap_or(0);
            for nb in mol.neighbors(cur) {
                if dist[nb.index()].is_none() {
                    dist[nb.index()] = Some(d + 1);
                    pred[nb.index()] = Some(cur);
                    queue.push_back(nb);
                }
            }
        }
        Self { source, dist, pred }
    }

    fn path_to(&self, dst: NodeIndex) -> Vec<NodeIndex> {
        let mut path = vec![dst];
        let mut cur = dst;
        while cur != self.source {
            match self.pred[cur.index()] {
                Some(p) => {
                    path.push(p);
                    cur = p;
                }
                None => return Vec::new(),
            }
        }
        path.reverse();
        path
    }
}

fn sort_rings(rings: &mut [Vec<NodeIndex>]) {
    rings.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
}

/// Rotates a ring to start at its smallest atom and walk towards the
/// smaller neighbour, so equal rings compare equal.
fn normalize_ring(ring: &[NodeIndex]) -> Vec<NodeIndex> {
    let Some(min_pos) = ring
        .iter()
        .enumerate()
        .min_by_key(|&(_, idx)| idx)
        .map(|(i, _)| i)
    else {
        return Vec::new();
    };
    let len = ring.len();
    let mut normalized: Vec<NodeIndex> = (0..len).map(|i| ring[(min_pos + i) % len]).collect();
    if len > 2 && normalized[1] > normalized[len - 1] {
        normalized[1..].reverse();
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smiles::from_smiles;

    fn n(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    fn sizes(info: &RingInfo) -> Vec<usize> {
        let mut s: Vec<usize> = info.rings().iter().map(|r| r.len()).collect();
        s.sort();
        s
    }

    #[test]
    fn cyclohexane() {
        let mol = from_smiles("C1CCCCC1").unwrap();
        let ri = RingInfo::sssr(&mol);
        assert_eq!(sizes(&ri), vec![6]);
    }

    #[test]
    fn acyclic() {
        let mol = from_smiles("CCCC").unwrap();
        assert_eq!(RingInfo::sssr(&mol).num_rings(), 0);
        assert_eq!(RingInfo::symmetrized_sssr(&mol).num_rings(), 0);
    }

    #[test]
    fn naphthalene_sssr() {
        let mol = from_smiles("c1ccc2ccccc2c1").unwrap();
        assert_eq!(sizes(&RingInfo::sssr(&mol)), vec![6, 6]);
    }

    #[test]
    fn spiro_and_bridged() {
        let spiro = from_smiles("C1CCC2(CC1)CCC2").unwrap();
        assert_eq!(RingInfo::sssr(&spiro).num_rings(), 2);
        let norbornane = from_smiles("C1CC2CC1CC2").unwrap();
        assert_eq!(RingInfo::sssr(&norbornane).num_rings(), 2);
    }

    #[test]
    fn cubane() {
        let mol = from_smiles("C12C3C4C1C5C3C4C25").unwrap();
        assert_eq!(RingInfo::expected_ring_count(&mol), 5);
        assert_eq!(RingInfo::sssr(&mol).num_rings(), 5);
        let sym = RingInfo::symmetrized_sssr(&mol);
        assert_eq!(sym.rings().iter().filter(|r| r.len() == 4).count(), 6);
    }

    #[test]
    fn symmetrized_keeps_only_smallest_alternatives() {
        let mol = from_smiles("C1CCC2CCCCC2C1").unwrap();
        assert_eq!(sizes(&RingInfo::symmetrized_sssr(&mol)), vec![6, 6]);
        let norbornane = from_smiles("C1CC2CC1CC2").unwrap();
        assert_eq!(RingInfo::symmetrized_sssr(&norbornane).num_rings(), 2);
    }

    #[test]
    fn phenol_membership() {
        let mol = from_smiles("Oc1ccccc1").unwrap();
        let ri = RingInfo::sssr(&mol);
        assert!(!ri.is_ring_atom(n(0)));
        for i in 1..7 {
            assert!(ri.is_ring_atom(n(i)), "atom {i} should be in ring");
        }
        assert!(ri.is_ring_bond(n(1), n(2)));
        assert!(!ri.is_ring_bond(n(0), n(1)));
    }

    #[test]
    fn perceive_sets_flags() {
        let mol = from_smiles("CC1CC1").unwrap();
        assert!(!mol.atom(n(0)).in_ring);
        assert!(mol.atom(n(1)).in_ring);
        assert!(mol.atom(n(3)).in_ring);
    }

    #[test]
    fn ring_bonds_follow_ring_order() {
        let mol = from_smiles("C1CCC1").unwrap();
        let ri = RingInfo::sssr(&mol);
        assert_eq!(ring_bonds(&mol, &ri.rings()[0]).len(), 4);
    }
}
