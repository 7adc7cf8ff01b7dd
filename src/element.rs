//! Periodic table data for the elements that appear in organic structures.
//!
//! Only the properties the perception and tautomer code needs are kept:
//! symbol, default valence list, outer-shell electron count and Pauling
//! electronegativity.

use std::borrow::Cow;

/// Elements understood by the SMILES reader and the valence model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Element {
    H = 1,
    Li = 3,
    B = 5,
    C = 6,
    N = 7,
    O = 8,
    F = 9,
    Na = 11,
    Mg = 12,
    Al = 13,
    Si = 14,
    P = 15,
    S = 16,
    Cl = 17,
    K = 19,
    Ca = 20,
    Fe = 26,
    Cu = 29,
    Zn = 30,
    As = 33,
    Se = 34,
    Br = 35,
    Te = 52,
    I = 53,
}

struct ElementData {
    symbol: &'static str,
    valences: &'static [u8],
    outer_electrons: u8,
    electronegativity: f64,
    period: u8,
}

const fn data(
    symbol: &'static str,
    valences: &'static [u8],
    outer_electrons: u8,
    electronegativity: f64,
    period: u8,
) -> ElementData {
    ElementData {
        symbol,
        valences,
        outer_electrons,
        electronegativity,
        period,
    }
}

const ALL: [Element; 24] = [
    Element::H,
    Element::Li,
    Element::B,
    Element::C,
    Element::N,
    Element::O,
    Element::F,
    Element::Na,
    Element::Mg,
    Element::Al,
    Element::Si,
    Element::P,
    Element::S,
    Element::Cl,
    Element::K,
    Element::Ca,
    Element::Fe,
    Element::Cu,
    Element::Zn,
    Element::As,
    Element::Se,
    Element::Br,
    Element::Te,
    Element::I,
];

impl Element {
    fn data(self) -> ElementData {
        match self {
            Element::H => data("H", &[1], 1, 2.20, 1),
            Element::Li => data("Li", &[], 1, 0.98, 2),
            Element::B => data("B", &[3], 3, 2.04, 2),
            Element::C => data("C", &[4], 4, 2.55, 2),
            Element::N => data("N", &[3, 5], 5, 3.04, 2),
            Element::O => data("O", &[2], 6, 3.44, 2),
            Element::F => data("F", &[1], 7, 3.98, 2),
            Element::Na => data("Na", &[], 1, 0.93, 3),
            Element::Mg => data("Mg", &[], 2, 1.31, 3),
            Element::Al => data("Al", &[], 3, 1.61, 3),
            Element::Si => data("Si", &[4], 4, 1.90, 3),
            Element::P => data("P", &[3, 5], 5, 2.19, 3),
            Element::S => data("S", &[2, 4, 6], 6, 2.58, 3),
            Element::Cl => data("Cl", &[1], 7, 3.16, 3),
            Element::K => data("K", &[], 1, 0.82, 4),
            Element::Ca => data("Ca", &[], 2, 1.00, 4),
            Element::Fe => data("Fe", &[], 8, 1.83, 4),
            Element::Cu => data("Cu", &[], 11, 1.90, 4),
            Element::Zn => data("Zn", &[], 12, 1.65, 4),
            Element::As => data("As", &[3, 5], 5, 2.18, 4),
            Element::Se => data("Se", &[2, 4, 6], 6, 2.55, 4),
            Element::Br => data("Br", &[1], 7, 2.96, 4),
            Element::Te => data("Te", &[2, 4, 6], 6, 2.10, 5),
            Element::I => data("I", &[1, 3, 5, 7], 7, 2.66, 5),
        }
    }

    pub fn from_atomic_num(n: u8) -> Option<Element> {
        ALL.iter().copied().find(|e| e.atomic_num() == n)
    }

    pub fn from_symbol(s: &str) -> Option<Element> {
        ALL.iter().copied().find(|e| e.symbol() == s)
    }

    pub fn atomic_num(self) -> u8 {
        self as u8
    }

    pub fn symbol(self) -> &'static str {
        self.data().symbol
    }

    pub fn electronegativity(self) -> f64 {
        self.data().electronegativity
    }

    /// Valence electrons of the neutral atom.
    pub fn outer_electrons(self) -> u8 {
        self.data().outer_electrons
    }

    /// Valences a neutral atom may take, smallest first. Empty for metals,
    /// which are never valence-checked.
    pub fn default_valences(self) -> &'static [u8] {
        self.data().valences
    }

    /// Valences allowed for the element at the given formal charge.
    ///
    /// A charged main-group atom takes the valence of its isoelectronic
    /// neighbour: `N+` behaves like carbon, `O-` like fluorine, `C-` like
    /// nitrogen and `B-` like carbon. Third-row and heavier atoms keep the
    /// expanded-octet valences in steps of two.
    pub fn allowed_valences(self, formal_charge: i8) -> Cow<'static, [u8]> {
        let neutral = self.default_valences();
        if formal_charge == 0 || neutral.is_empty() {
            return Cow::Borrowed(neutral);
        }
        let electrons = self.outer_electrons() as i16 - formal_charge as i16;
        if !(1..=7).contains(&electrons) {
            return Cow::Owned(Vec::new());
        }
        let base = if electrons >= 4 {
            8 - electrons
        } else {
            electrons
        } as u8;
        let mut valences = vec![base];
        if self.data().period >= 3 && electrons >= 4 {
            let mut v = base + 2;
            while v as i16 <= electrons {
                valences.push(v);
                v += 2;
            }
        }
        Cow::Owned(valences)
    }

    /// True for the SMILES organic subset, which may be written without brackets.
    pub fn is_organic_subset(self) -> bool {
        matches!(
            self,
            Element::B
                | Element::C
                | Element::N
                | Element::O
                | Element::P
                | Element::S
                | Element::F
                | Element::Cl
                | Element::Br
                | Element::I
        )
    }

    /// Hetero atoms that can carry a mobile hydrogen or a lone pair into a
    /// conjugated system.
    pub fn is_heteroatom(self) -> bool {
        !matches!(self, Element::C | Element::H)
    }
}

/// Electronegativity lookup by atomic number, `0.0` when unknown.
pub fn electronegativity(atomic_num: u8) -> f64 {
    Element::from_atomic_num(atomic_num)
        .map(Element::electronegativity)
        .unwrap_or(0.0)
}

/// Outer-shell electron count by atomic number, `0` when unknown.
pub fn outer_shell_electrons(atomic_num: u8) -> u8 {
    Element::from_atomic_num(atomic_num)
        .map(Element::outer_electrons)
        .unwrap_or(0)
}
