use petgraph::graph::NodeIndex;

use crate::atom::Atom;
use crate::bond::{SmilesBond, SmilesBondOrder};
use crate::element::Element;
use crate::mol::Mol;
use crate::smiles::parse_tree::ParseTree;
use crate::smiles::tokenizer::BondToken;

pub fn build_mol(tree: &ParseTree) -> Mol<Atom, SmilesBond> {
    let mut mol = Mol::new();
    let nodes: Vec<NodeIndex> = tree
        .atoms
        .iter()
        .map(|tok| {
            mol.add_atom(Atom {
                atomic_num: tok.element.atomic_num(),
                formal_charge: tok.charge,
                isotope: tok.isotope,
                hydrogen_count: tok.hcount.unwrap_or(0),
                is_aromatic: tok.is_aromatic,
                in_ring: false,
            })
        })
        .collect();

    for pb in &tree.bonds {
        let both_aromatic = tree.atoms[pb.a].is_aromatic && tree.atoms[pb.b].is_aromatic;
        let order = match pb.bond {
            Some(BondToken::Single) => SmilesBondOrder::Single,
            Some(BondToken::Double) => SmilesBondOrder::Double,
            Some(BondToken::Triple) => SmilesBondOrder::Triple,
            Some(BondToken::Aromatic) => SmilesBondOrder::Aromatic,
            None if both_aromatic => SmilesBondOrder::Aromatic,
            None => SmilesBondOrder::Implicit,
        };
        mol.add_bond(nodes[pb.a], nodes[pb.b], SmilesBond { order });
    }

    for (tok, &node) in tree.atoms.iter().zip(&nodes) {
        if tok.is_bracket() {
            continue;
        }
        let bond_sum = mol
            .bonds_of(node)
            .map(|e| match mol.bond(e).order {
                SmilesBondOrder::Double => 2,
                SmilesBondOrder::Triple => 3,
                _ => 1,
            })
            .sum();
        mol.atom_mut(node).hydrogen_count =
            implicit_hydrogens(tok.element, tok.is_aromatic, bond_sum);
    }
    mol
}

/// Hydrogens a reader gives a bare organic-subset atom: the gap to the
/// smallest default valence that covers `bond_sum`, one fewer when the atom
/// is aromatic. Aromatic bonds count as 1 in `bond_sum`.
pub(crate) fn implicit_hydrogens(element: Element, is_aromatic: bool, bond_sum: u8) -> u8 {
    let Some(target) = element
        .default_valences()
        .iter()
        .copied()
        .find(|&v| v >= bond_sum)
    else {
        return 0;
    };
    let h = target - bond_sum;
    if is_aromatic {
        h.saturating_sub(1)
    } else {
        h
    }
}
