/// Default atom type for a molecular graph node.
///
/// `Atom` stores the properties a tautomer rewrite touches (hydrogen count,
/// charge) next to the ones perception fills in (aromaticity, ring
/// membership). Bond orders live on [`Bond`](crate::Bond).
///
/// # Examples
///
/// ```
/// use tautocrab::Atom;
///
/// let carbon = Atom {
///     atomic_num: 6,
///     hydrogen_count: 3,
///     ..Atom::default()
/// };
/// assert_eq!(carbon.atomic_num, 6);
/// assert!(!carbon.is_aromatic);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Atom {
    /// Atomic number (1 = H, 6 = C, 7 = N, …).
    pub atomic_num: u8,
    /// Formal charge in elementary charge units.
    pub formal_charge: i8,
    /// Mass number. `0` means natural isotopic abundance.
    pub isotope: u16,
    /// Number of implicit hydrogens on this atom.
    ///
    /// Hydrogens are never graph nodes; tautomer rewrites move hydrogens by
    /// adjusting this count.
    pub hydrogen_count: u8,
    /// Set by aromaticity perception.
    pub is_aromatic: bool,
    /// Set by ring perception.
    pub in_ring: bool,
}

impl crate::traits::HasAtomicNum for Atom {
    fn atomic_num(&self) -> u8 {
        self.atomic_num
    }
}

impl crate::traits::HasFormalCharge for Atom {
    fn formal_charge(&self) -> i8 {
        self.formal_charge
    }
}

impl crate::traits::HasIsotope for Atom {
    fn isotope(&self) -> u16 {
        self.isotope
    }
}

impl crate::traits::HasHydrogenCount for Atom {
    fn hydrogen_count(&self) -> u8 {
        self.hydrogen_count
    }
}

impl crate::traits::HasAromaticity for Atom {
    fn is_aromatic(&self) -> bool {
        self.is_aromatic
    }
}
