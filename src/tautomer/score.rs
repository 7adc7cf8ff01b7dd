//! Stability heuristic used to pick the canonical tautomer.
//!
//! A [`Score`] compares tier by tier: aromatic ring count, π stability
//! (localized and conjugated bonds to heteroatoms), total charge magnitude,
//! charge placement, and finally the canonical key so that no two distinct
//! tautomers compare equal.

use std::cmp::Ordering;

use petgraph::graph::{EdgeIndex, NodeIndex};
use serde::Serialize;

use crate::aromaticity::aromatic_ring_count;
use crate::bond::BondOrder;
use crate::canonical::canonical_key;
use crate::conjugation::assign_conjugation;
use crate::element::{electronegativity, Element};
use crate::mol::Molecule;

/// Weight of one conjugated bond with a heteroatom end.
pub const CONJUGATED_HETERO_BOND: i64 = 10;
/// Base weight of a localized double bond to a heteroatom, on top of the
/// heteroatom's electronegativity in hundredths.
pub const LOCALIZED_HETERO_DOUBLE: i64 = 100;
/// Adjustment for a single functional group: the oxime bonus, the aci-nitro
/// and exocyclic-imine penalties, and the cost of each hydrogen on S, Se, Te
/// or P.
pub const GROUP_ADJUSTMENT: i64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Score {
    pub aromatic_rings: usize,
    pub conjugation: i64,
    /// Sum of `|formal charge|`; lower is better.
    pub charge_magnitude: u32,
    /// Higher when negative charges sit on electronegative atoms and
    /// positive charges on electropositive ones.
    pub charge_placement: i64,
    /// Lexically smaller keys rank higher.
    pub key: String,
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.aromatic_rings
            .cmp(&other.aromatic_rings)
            .then(self.conjugation.cmp(&other.conjugation))
            .then(other.charge_magnitude.cmp(&self.charge_magnitude))
            .then(self.charge_placement.cmp(&other.charge_placement))
            .then_with(|| other.key.cmp(&self.key))
    }
}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Scores a perceived molecule.
pub fn score(mol: &Molecule) -> Score {
    score_with_key(mol, canonical_key(mol))
}

/// Scores a perceived molecule whose canonical key is already known.
pub fn score_with_key(mol: &Molecule, key: String) -> Score {
    Score {
        aromatic_rings: aromatic_ring_count(mol),
        conjugation: conjugation(mol),
        charge_magnitude: mol
            .atoms()
            .map(|a| mol.atom(a).formal_charge.unsigned_abs() as u32)
            .sum(),
        charge_placement: mol
            .atoms()
            .map(|a| {
                let atom = mol.atom(a);
                -(atom.formal_charge as i64) * en_hundredths(atom.atomic_num)
            })
            .sum(),
        key,
    }
}

fn en_hundredths(atomic_num: u8) -> i64 {
    (electronegativity(atomic_num) * 100.0).round() as i64
}

fn is_hetero(atomic_num: u8) -> bool {
    Element::from_atomic_num(atomic_num).is_some_and(Element::is_heteroatom)
}

/// Electronegativity of the most electronegative heteroatom end of `e`.
fn hetero_end(mol: &Molecule, e: EdgeIndex) -> Option<i64> {
    let (a, b) = mol.endpoints(e);
    [a, b]
        .into_iter()
        .map(|x| mol.atom(x).atomic_num)
        .filter(|&z| is_hetero(z))
        .map(en_hundredths)
        .max()
}

/// Double bond from an aromatic ring atom to a nitrogen outside the ring.
fn is_exocyclic_imine(mol: &Molecule, e: EdgeIndex) -> bool {
    let (a, b) = mol.endpoints(e);
    let (ra, rb) = (mol.atom(a), mol.atom(b));
    (ra.is_aromatic && !rb.is_aromatic && rb.atomic_num == 7)
        || (rb.is_aromatic && !ra.is_aromatic && ra.atomic_num == 7)
}

/// π stability of a tautomer.
///
/// Every localized double bond to a heteroatom earns a base weight plus the
/// heteroatom's electronegativity, so C=O beats C=N beats C=S beats C=C
/// whether or not the bond is conjugated. Conjugated bonds touching a
/// heteroatom add a smaller weight, which only decides between forms with
/// the same localized bonds.
fn conjugation(mol: &Molecule) -> i64 {
    let conjugated = assign_conjugation(mol);
    let bonds: i64 = mol
        .bonds()
        .map(|e| {
            let Some(en) = hetero_end(mol, e) else {
                return 0;
            };
            let bond = mol.bond(e);
            let shared = if conjugated[e.index()] {
                CONJUGATED_HETERO_BOND
            } else {
                0
            };
            let localized = if bond.is_aromatic || bond.order != BondOrder::Double {
                0
            } else if is_exocyclic_imine(mol, e) {
                -GROUP_ADJUSTMENT
            } else {
                LOCALIZED_HETERO_DOUBLE + en
            };
            shared + localized
        })
        .sum();
    let groups: i64 = mol.atoms().map(|a| group_adjustment(mol, a)).sum();
    bonds + groups
}

/// Oximes are favoured over nitroso compounds, aci-nitro forms penalized,
/// and thiols and phosphines pay for each hydrogen.
fn group_adjustment(mol: &Molecule, atom: NodeIndex) -> i64 {
    let a = mol.atom(atom);
    match a.atomic_num {
        15 | 16 | 34 | 52 => -GROUP_ADJUSTMENT * a.hydrogen_count as i64,
        7 if !a.is_aromatic => {
            let double_to_carbon = mol.bonds_of(atom).find(|&e| {
                mol.bond(e).order == BondOrder::Double
                    && !mol.bond(e).is_aromatic
                    && mol.atom(mol.other_end(e, atom)).atomic_num == 6
            });
            let Some(double) = double_to_carbon else {
                return 0;
            };
            let hydroxyl = mol.neighbors(atom).any(|x| {
                let o = mol.atom(x);
                o.atomic_num == 8 && o.hydrogen_count > 0 && o.formal_charge == 0
            });
            if !hydroxyl {
                return 0;
            }
            if a.formal_charge > 0 {
                return -GROUP_ADJUSTMENT;
            }
            // C(OH)=N-OH and C(N)=N-OH are hydroxamic and amidoxime forms.
            let carbon = mol.other_end(double, atom);
            let hetero_substituted = mol
                .neighbors(carbon)
                .any(|x| x != atom && is_hetero(mol.atom(x).atomic_num));
            if a.formal_charge == 0 && !hetero_substituted {
                GROUP_ADJUSTMENT
            } else {
                0
            }
        }
        _ => 0,
    }
}
