/// Concrete Kekulé bond order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
}

impl BondOrder {
    pub fn valence(self) -> u8 {
        match self {
            BondOrder::Single => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
        }
    }

    pub fn from_valence(v: u8) -> Option<BondOrder> {
        match v {
            1 => Some(BondOrder::Single),
            2 => Some(BondOrder::Double),
            3 => Some(BondOrder::Triple),
            _ => None,
        }
    }

    /// Order one step up, `None` past a triple bond.
    pub fn raised(self) -> Option<BondOrder> {
        BondOrder::from_valence(self.valence() + 1)
    }

    /// Order one step down, `None` below a single bond.
    pub fn lowered(self) -> Option<BondOrder> {
        BondOrder::from_valence(self.valence() - 1)
    }
}

/// Bond of a perceived molecule.
///
/// Every bond keeps a Kekulé order. `is_aromatic` is set by aromaticity
/// perception; keys and SMILES output treat an aromatic bond as `:`
/// whatever its Kekulé order is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Bond {
    pub order: BondOrder,
    pub is_aromatic: bool,
}

impl Bond {
    pub fn new(order: BondOrder) -> Self {
        Self {
            order,
            is_aromatic: false,
        }
    }
}

impl crate::traits::HasBondOrder for Bond {
    fn bond_order(&self) -> BondOrder {
        self.order
    }
}

impl crate::traits::HasBondAromaticity for Bond {
    fn is_aromatic_bond(&self) -> bool {
        self.is_aromatic
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SmilesBondOrder {
    Single,
    Double,
    Triple,
    Aromatic,
    #[default]
    Implicit,
}

/// Bond as written in SMILES, before kekulization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmilesBond {
    pub order: SmilesBondOrder,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raise_and_lower() {
        assert_eq!(BondOrder::Single.raised(), Some(BondOrder::Double));
        assert_eq!(BondOrder::Double.raised(), Some(BondOrder::Triple));
        assert_eq!(BondOrder::Triple.raised(), None);
        assert_eq!(BondOrder::Triple.lowered(), Some(BondOrder::Double));
        assert_eq!(BondOrder::Single.lowered(), None);
    }
}
