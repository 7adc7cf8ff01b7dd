use std::collections::HashMap;

use crate::smiles::error::SmilesError;
use crate::smiles::tokenizer::{AtomToken, BondToken, Token};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBond {
    pub a: usize,
    pub b: usize,
    pub bond: Option<BondToken>,
}

/// Atoms in input order plus every bond they take part in, ring closures
/// included.
#[derive(Debug, Clone, Default)]
pub struct ParseTree {
    pub atoms: Vec<AtomToken>,
    pub bonds: Vec<ParseBond>,
}

struct OpenRing {
    atom: usize,
    bond: Option<BondToken>,
}

pub fn build_parse_tree(tokens: &[Token]) -> Result<ParseTree, SmilesError> {
    let mut tree = ParseTree::default();
    let mut branches: Vec<(usize, usize)> = Vec::new();
    let mut current: Option<usize> = None;
    let mut pending: Option<(BondToken, usize)> = None;
    let mut open_rings: HashMap<u16, OpenRing> = HashMap::new();

    for token in tokens {
        match token {
            Token::Atom(atom) => {
                let idx = tree.atoms.len();
                tree.atoms.push(atom.clone());
                match (current, pending.take()) {
                    (Some(prev), bond) => tree.bonds.push(ParseBond {
                        a: prev,
                        b: idx,
                        bond: bond.map(|(b, _)| b),
                    }),
                    (None, Some((_, pos))) => return Err(SmilesError::MisplacedBond { pos }),
                    (None, None) => {}
                }
                current = Some(idx);
            }
            Token::Bond(bond, pos) => {
                if current.is_none() {
                    return Err(SmilesError::MisplacedBond { pos: *pos });
                }
                pending = Some((*bond, *pos));
            }
            Token::Ring { bond, number, pos } => {
                let cur = current.ok_or(SmilesError::InvalidRingBond {
                    digit: *number,
                    pos: *pos,
                })?;
                match open_rings.remove(number) {
                    Some(open) => {
                        if open.atom == cur
                            || tree
                                .bonds
                                .iter()
                                .any(|b| (b.a, b.b) == (open.atom, cur) || (b.a, b.b) == (cur, open.atom))
                        {
                            return Err(SmilesError::InvalidRingBond {
                                digit: *number,
                                pos: *pos,
                            });
                        }
                        let bond = match (open.bond, *bond) {
                            (Some(x), Some(y)) if x != y => {
                                return Err(SmilesError::RingBondConflict { digit: *number })
                            }
                            (x, y) => x.or(y),
                        };
                        tree.bonds.push(ParseBond {
                            a: open.atom,
                            b: cur,
                            bond,
                        });
                    }
                    None => {
                        open_rings.insert(*number, OpenRing { atom: cur, bond: *bond });
                    }
                }
            }
            Token::Open(pos) => {
                let cur = current.ok_or(SmilesError::UnmatchedParen { pos: *pos })?;
                branches.push((cur, *pos));
            }
            Token::Close(pos) => {
                if let Some((_, bond_pos)) = pending {
                    return Err(SmilesError::MisplacedBond { pos: bond_pos });
                }
                let (branch_root, _) = branches
                    .pop()
                    .ok_or(SmilesError::UnmatchedParen { pos: *pos })?;
                current = Some(branch_root);
            }
            Token::Dot(pos) => {
                if pending.is_some() || !branches.is_empty() {
                    return Err(SmilesError::UnexpectedChar { pos: *pos, ch: '.' });
                }
                current = None;
            }
        }
    }

    if let Some((_, pos)) = pending {
        return Err(SmilesError::MisplacedBond { pos });
    }
    if let Some(&(_, pos)) = branches.last() {
        return Err(SmilesError::UnmatchedParen { pos });
    }
    if let Some(&digit) = open_rings.keys().min() {
        return Err(SmilesError::UnclosedRing { digit });
    }
    Ok(tree)
}
