use std::collections::BTreeSet;

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::aromaticity::perceive;
use crate::bond::BondOrder;
use crate::kekulize::rekekulize;
use crate::mol::Molecule;
use crate::valence::{check_atom, total_valence};

use super::error::RewriteError;

/// Edit list produced by a transform rule.
///
/// Applied in order: hydrogen and charge deltas, explicit bond orders, a
/// fresh Kekulé assignment over `resonance`, then ring and aromaticity
/// perception.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rewrite {
    pub hydrogens: Vec<(NodeIndex, i8)>,
    pub charges: Vec<(NodeIndex, i8)>,
    pub bonds: Vec<(EdgeIndex, BondOrder)>,
    /// Aromatic bonds whose orders are re-derived after the edit.
    pub resonance: Vec<EdgeIndex>,
}

impl Rewrite {
    /// Atoms whose valence may change: every atom named by a delta or
    /// sitting on an edited bond.
    pub fn touched_atoms(&self, mol: &Molecule) -> Vec<NodeIndex> {
        let mut atoms: BTreeSet<NodeIndex> = self
            .hydrogens
            .iter()
            .chain(&self.charges)
            .map(|&(a, _)| a)
            .collect();
        for e in self.bonds.iter().map(|&(e, _)| e).chain(self.resonance.iter().copied()) {
            if let Some((a, b)) = mol.bond_endpoints(e) {
                atoms.insert(a);
                atoms.insert(b);
            }
        }
        atoms.into_iter().collect()
    }
}

impl Molecule {
    /// Applies `rewrite` in place. On error the molecule is left partially
    /// edited; callers work on a copy.
    pub fn apply_rewrite(&mut self, rewrite: &Rewrite) -> Result<(), RewriteError> {
        let touched = rewrite.touched_atoms(self);
        let before: Vec<u8> = touched.iter().map(|&a| total_valence(self, a)).collect();
        for &(atom, delta) in &rewrite.hydrogens {
            let h = self.atom(atom).hydrogen_count;
            self.atom_mut(atom).hydrogen_count = h.checked_add_signed(delta).ok_or(
                if delta < 0 {
                    RewriteError::NoHydrogen { atom: atom.index() }
                } else {
                    RewriteError::HydrogenOverflow { atom: atom.index() }
                },
            )?;
        }
        for &(atom, delta) in &rewrite.charges {
            let q = self.atom(atom).formal_charge;
            self.atom_mut(atom).formal_charge = q
                .checked_add(delta)
                .ok_or(RewriteError::ChargeOverflow { atom: atom.index() })?;
        }
        for &(bond, order) in &rewrite.bonds {
            self.bond_mut(bond).order = order;
        }
        if !rewrite.resonance.is_empty() {
            rekekulize(self, &rewrite.resonance)?;
        }
        perceive(self);
        for (&atom, &was) in touched.iter().zip(&before) {
            check_atom(self, atom)?;
            let a = self.atom(atom);
            let now = total_valence(self, atom);
            if a.formal_charge == 0 && matches!(a.atomic_num, 7 | 15) && now > 3 && now != was {
                return Err(RewriteError::Hypervalent { atom: atom.index() });
            }
        }
        Ok(())
    }
}
