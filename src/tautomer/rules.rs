//! The tautomeric transform catalogue.
//!
//! Every rule moves one hydrogen from a donor atom to an acceptor atom
//! along a short bonded path and shifts the bond orders on that path: the
//! first bond is raised, the next lowered, and so on. Aromatic bonds on the
//! path are not shifted one by one; instead the whole aromatic system the
//! path touches gets a fresh Kekulé assignment.
//!
//! Most rules are linear shapes (`a`, middle atoms, `b`, and the bond
//! orders read from `a` while `a` holds the hydrogen). A shape matches in
//! both directions; the orders read from `b` are the rewritten orders in
//! reverse. Annular NH shifts and exocyclic pyridone-type shifts follow an
//! aromatic path of any length and get their own matchers.

use std::collections::{HashSet, VecDeque};
use std::fmt;

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::bond::{Bond, BondOrder};
use crate::mol::Molecule;

use super::error::RewriteError;
use super::rewrite::Rewrite;

const C: u8 = 6;
const N: u8 = 7;
const O: u8 = 8;
const S: u8 = 16;
const SE: u8 = 34;
const TE: u8 = 52;

/// One place a rule applies: the hydrogen moves from `donor` to
/// `acceptor` along `path` (both ends included).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchSite {
    pub rule: TransformRule,
    pub donor: NodeIndex,
    pub acceptor: NodeIndex,
    pub path: Vec<NodeIndex>,
}

impl MatchSite {
    fn new(rule: TransformRule, path: Vec<NodeIndex>) -> Option<Self> {
        Some(Self {
            rule,
            donor: *path.first()?,
            acceptor: *path.last()?,
            path,
        })
    }

    /// The site that undoes this one on the rewritten molecule.
    pub fn reversed(&self) -> MatchSite {
        let mut path = self.path.clone();
        path.reverse();
        MatchSite {
            rule: self.rule,
            donor: self.acceptor,
            acceptor: self.donor,
            path,
        }
    }
}

/// Recognition and rewrite of one tautomeric transformation.
pub trait Transform {
    /// True when `site` is a valid application of this rule to `mol`.
    fn recognize(&self, mol: &Molecule, site: &MatchSite) -> bool;

    /// Applies `site` to a copy of `mol`. The product is perceived again and
    /// is only returned when every touched atom keeps a valid valence and
    /// the rule recognizes the reversed site on it.
    fn rewrite(&self, mol: &Molecule, site: &MatchSite) -> Result<Molecule, RewriteError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransformRule {
    /// C(H)–C=O ⇄ C=C–OH, carbon conjugated to a second π system.
    KetoEnol,
    /// C(H)–C=C–C=O ⇄ C=C–C=C–OH.
    ConjugatedKetoEnol,
    /// C(H)–C=N ⇄ C=C–NH.
    ImineEnamine,
    /// NH–C=O ⇄ N=C–OH.
    Amide,
    /// Aromatic NH to another aromatic N of the same system.
    AnnularNh,
    /// Ring NH with exocyclic C=X ⇄ ring N with exocyclic X–H.
    HeteroaromaticExocyclic,
    /// HO–N=C ⇄ O=N–C(H).
    OximeNitroso,
    /// NH–C=N ⇄ N=C–NH.
    Amidine,
    /// (C,N)(H)–C=S ⇄ (C,N)=C–SH.
    ThioneThiol,
    /// C(H)–[N+](=O)[O-] ⇄ C=[N+]([O-])OH.
    NitroAciNitro,
    /// C(=O)–NH–OH ⇄ C(OH)=N–OH.
    HydroxamicAcid,
    /// C(H)=C=O ⇄ C#C–OH.
    KeteneYnol,
    /// HO–C#N ⇄ O=C=NH.
    CyanicIsocyanic,
}

impl TransformRule {
    pub const ALL: [TransformRule; 13] = [
        TransformRule::KetoEnol,
        TransformRule::ConjugatedKetoEnol,
        TransformRule::ImineEnamine,
        TransformRule::Amide,
        TransformRule::AnnularNh,
        TransformRule::HeteroaromaticExocyclic,
        TransformRule::OximeNitroso,
        TransformRule::Amidine,
        TransformRule::ThioneThiol,
        TransformRule::NitroAciNitro,
        TransformRule::HydroxamicAcid,
        TransformRule::KeteneYnol,
        TransformRule::CyanicIsocyanic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TransformRule::KetoEnol => "keto-enol",
            TransformRule::ConjugatedKetoEnol => "conjugated keto-enol",
            TransformRule::ImineEnamine => "imine-enamine",
            TransformRule::Amide => "amide",
            TransformRule::AnnularNh => "annular NH",
            TransformRule::HeteroaromaticExocyclic => "heteroaromatic exocyclic",
            TransformRule::OximeNitroso => "oxime-nitroso",
            TransformRule::Amidine => "amidine",
            TransformRule::ThioneThiol => "thione-thiol",
            TransformRule::NitroAciNitro => "nitro-aci-nitro",
            TransformRule::HydroxamicAcid => "hydroxamic acid",
            TransformRule::KeteneYnol => "ketene-ynol",
            TransformRule::CyanicIsocyanic => "cyanic-isocyanic",
        }
    }

    fn shape(self) -> Option<&'static Shape> {
        Some(match self {
            TransformRule::KetoEnol => &KETO_ENOL,
            TransformRule::ConjugatedKetoEnol => &CONJUGATED_KETO_ENOL,
            TransformRule::ImineEnamine => &IMINE_ENAMINE,
            TransformRule::Amide => &AMIDE,
            TransformRule::OximeNitroso => &OXIME_NITROSO,
            TransformRule::Amidine => &AMIDINE,
            TransformRule::ThioneThiol => &THIONE_THIOL,
            TransformRule::NitroAciNitro => &NITRO_ACI_NITRO,
            TransformRule::HydroxamicAcid => &HYDROXAMIC_ACID,
            TransformRule::KeteneYnol => &KETENE_YNOL,
            TransformRule::CyanicIsocyanic => &CYANIC_ISOCYANIC,
            TransformRule::AnnularNh | TransformRule::HeteroaromaticExocyclic => return None,
        })
    }

    /// Every site of this rule in `mol`, in atom order.
    pub fn sites(self, mol: &Molecule) -> Vec<MatchSite> {
        let paths = match self {
            TransformRule::AnnularNh => annular_paths(mol),
            TransformRule::HeteroaromaticExocyclic => exocyclic_paths(mol),
            _ => match self.shape() {
                Some(shape) => shape.paths(mol),
                None => Vec::new(),
            },
        };
        paths
            .into_iter()
            .filter_map(|path| MatchSite::new(self, path))
            .collect()
    }

    /// Direction of the order change on the `index`-th path bond.
    fn step(self, site: &MatchSite, index: usize) -> Step {
        match self {
            // Only the exocyclic bond is shifted: raised when the hydrogen
            // leaves the exocyclic atom, lowered when it arrives there.
            TransformRule::HeteroaromaticExocyclic if index == 0 => Step::Raise,
            TransformRule::HeteroaromaticExocyclic if index + 2 == site.path.len() => Step::Lower,
            _ if index % 2 == 0 => Step::Raise,
            _ => Step::Lower,
        }
    }

    /// Edits for `site`: one hydrogen from donor to acceptor, each
    /// non-aromatic path bond raised or lowered in turn, and every aromatic
    /// system the path touches handed back for re-kekulization.
    fn plan(self, mol: &Molecule, site: &MatchSite) -> Result<Rewrite, RewriteError> {
        let mut bonds = Vec::new();
        for (i, pair) in site.path.windows(2).enumerate() {
            let edge = mol
                .bond_between(pair[0], pair[1])
                .ok_or(RewriteError::BrokenPath {
                    a: pair[0].index(),
                    b: pair[1].index(),
                })?;
            let bond = mol.bond(edge);
            if bond.is_aromatic {
                continue;
            }
            let to = match self.step(site, i) {
                Step::Raise => bond.order.raised(),
                Step::Lower => bond.order.lowered(),
            };
            let to = to.ok_or(RewriteError::BondOrder {
                bond: edge.index(),
                from: bond.order,
            })?;
            bonds.push((edge, to));
        }
        Ok(Rewrite {
            hydrogens: vec![(site.donor, -1), (site.acceptor, 1)],
            charges: Vec::new(),
            bonds,
            resonance: aromatic_system(mol, &site.path),
        })
    }
}

impl fmt::Display for TransformRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Transform for TransformRule {
    fn recognize(&self, mol: &Molecule, site: &MatchSite) -> bool {
        if site.rule != *self
            || site.path.first() != Some(&site.donor)
            || site.path.last() != Some(&site.acceptor)
            || site.path.iter().any(|a| a.index() >= mol.atom_count())
            || !all_distinct(&site.path)
        {
            return false;
        }
        match self {
            TransformRule::AnnularNh => annular_fits(mol, &site.path),
            TransformRule::HeteroaromaticExocyclic => {
                lactam_fits(mol, &site.path) || lactim_fits(mol, &site.path)
            }
            _ => self.shape().is_some_and(|shape| shape.fits(mol, &site.path)),
        }
    }

    fn rewrite(&self, mol: &Molecule, site: &MatchSite) -> Result<Molecule, RewriteError> {
        if !self.recognize(mol, site) {
            return Err(RewriteError::NoMatch { rule: self.name() });
        }
        let plan = self.plan(mol, site)?;
        let mut product = mol.clone();
        product.apply_rewrite(&plan)?;
        if !self.recognize(&product, &site.reversed()) {
            return Err(RewriteError::Irreversible { rule: self.name() });
        }
        Ok(product)
    }
}

/// The catalogue in use; iterating its matches visits rules in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<TransformRule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            rules: TransformRule::ALL.to_vec(),
        }
    }
}

impl RuleSet {
    pub fn new(rules: Vec<TransformRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[TransformRule] {
        &self.rules
    }

    /// All match sites of every rule, overlapping ones included. Sites of a
    /// rule are only computed once iteration reaches that rule.
    pub fn matches<'a>(&'a self, mol: &'a Molecule) -> impl Iterator<Item = MatchSite> + 'a {
        self.rules.iter().flat_map(move |rule| rule.sites(mol))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Raise,
    Lower,
}

/// Endpoint constraint of a linear shape. Endpoints are always neutral, and
/// carbon endpoints are never aromatic.
#[derive(Debug, Clone, Copy)]
struct End {
    elements: &'static [u8],
    /// Exactly one heavy neighbour (carbonyl-type oxygen or sulfur).
    terminal: bool,
    /// Requires (`Some(true)`) or forbids (`Some(false)`) an oxygen neighbour
    /// off the path.
    oxygen_neighbour: Option<bool>,
}

impl End {
    const fn any(elements: &'static [u8]) -> Self {
        Self {
            elements,
            terminal: false,
            oxygen_neighbour: None,
        }
    }

    const fn terminal(elements: &'static [u8]) -> Self {
        Self {
            elements,
            terminal: true,
            oxygen_neighbour: None,
        }
    }

    fn fits(&self, mol: &Molecule, atom: NodeIndex, path: &[NodeIndex]) -> bool {
        let a = mol.atom(atom);
        if !self.elements.contains(&a.atomic_num) || a.formal_charge != 0 {
            return false;
        }
        if a.atomic_num == C && a.is_aromatic {
            return false;
        }
        if self.terminal && mol.degree(atom) != 1 {
            return false;
        }
        match self.oxygen_neighbour {
            Some(required) => off_path_neighbours(mol, atom, path)
                .any(|x| mol.atom(x).atomic_num == O)
                == required,
            None => true,
        }
    }
}

/// Constraint on an inner path atom.
#[derive(Debug, Clone, Copy)]
struct Mid {
    elements: &'static [u8],
    formal_charge: i8,
    /// Needs an `[O-]` neighbour off the path (nitro nitrogen).
    oxide: bool,
}

impl Mid {
    const fn neutral(elements: &'static [u8]) -> Self {
        Self {
            elements,
            formal_charge: 0,
            oxide: false,
        }
    }

    fn fits(&self, mol: &Molecule, atom: NodeIndex, path: &[NodeIndex]) -> bool {
        let a = mol.atom(atom);
        self.elements.contains(&a.atomic_num)
            && a.formal_charge == self.formal_charge
            && (!self.oxide
                || off_path_neighbours(mol, atom, path).any(|x| {
                    let x = mol.atom(x);
                    x.atomic_num == O && x.formal_charge == -1
                }))
    }
}

/// Linear rule: `a`, `middle`, `b`, and the path orders while `a` holds
/// the hydrogen.
#[derive(Debug)]
struct Shape {
    a: End,
    middle: &'static [Mid],
    b: End,
    pattern: &'static [BondOrder],
    /// No path atom may be aromatic.
    aliphatic: bool,
    /// Carbon endpoints must be conjugated to another π system.
    activated: bool,
}

/// One reading direction of a shape.
struct Walk<'s> {
    donor: &'s End,
    middle: Vec<&'s Mid>,
    acceptor: &'s End,
    pattern: Vec<BondOrder>,
}

impl Shape {
    fn walks(&self) -> Vec<Walk<'_>> {
        let mut walks = vec![Walk {
            donor: &self.a,
            middle: self.middle.iter().collect(),
            acceptor: &self.b,
            pattern: self.pattern.to_vec(),
        }];
        // Orders seen from `b` are the rewritten orders in reverse.
        let reverse: Option<Vec<BondOrder>> = self
            .pattern
            .iter()
            .enumerate()
            .map(|(i, o)| if i % 2 == 0 { o.raised() } else { o.lowered() })
            .rev()
            .collect();
        if let Some(pattern) = reverse {
            walks.push(Walk {
                donor: &self.b,
                middle: self.middle.iter().rev().collect(),
                acceptor: &self.a,
                pattern,
            });
        }
        walks
    }

    fn paths(&self, mol: &Molecule) -> Vec<Vec<NodeIndex>> {
        let mut found = Vec::new();
        for walk in self.walks() {
            for donor in mol.atoms() {
                if mol.atom(donor).hydrogen_count == 0
                    || !walk.donor.elements.contains(&mol.atom(donor).atomic_num)
                {
                    continue;
                }
                let mut path = vec![donor];
                self.extend(mol, &walk, &mut path, &mut found);
            }
        }
        // Symmetric shapes find the same path from both ends.
        found.sort();
        found.dedup();
        found
    }

    fn extend(
        &self,
        mol: &Molecule,
        walk: &Walk<'_>,
        path: &mut Vec<NodeIndex>,
        found: &mut Vec<Vec<NodeIndex>>,
    ) {
        let depth = path.len() - 1;
        if depth == walk.pattern.len() {
            if self.walk_fits(mol, walk, path) {
                found.push(path.clone());
            }
            return;
        }
        let Some(&last) = path.last() else {
            return;
        };
        let next_elements = match walk.middle.get(depth) {
            Some(mid) => mid.elements,
            None => walk.acceptor.elements,
        };
        let edges: Vec<EdgeIndex> = mol.bonds_of(last).collect();
        for e in edges {
            let next = mol.other_end(e, last);
            if path.contains(&next)
                || !next_elements.contains(&mol.atom(next).atomic_num)
                || !order_fits(mol.bond(e), walk.pattern[depth])
            {
                continue;
            }
            path.push(next);
            self.extend(mol, walk, path, found);
            path.pop();
        }
    }

    fn fits(&self, mol: &Molecule, path: &[NodeIndex]) -> bool {
        self.walks().iter().any(|walk| self.walk_fits(mol, walk, path))
    }

    fn walk_fits(&self, mol: &Molecule, walk: &Walk<'_>, path: &[NodeIndex]) -> bool {
        let len = walk.pattern.len();
        if path.len() != len + 1 {
            return false;
        }
        let (donor, acceptor) = (path[0], path[len]);
        if mol.atom(donor).hydrogen_count == 0
            || !walk.donor.fits(mol, donor, path)
            || !walk.acceptor.fits(mol, acceptor, path)
        {
            return false;
        }
        let middles_fit = walk
            .middle
            .iter()
            .zip(&path[1..len])
            .all(|(mid, &atom)| mid.fits(mol, atom, path));
        if !middles_fit {
            return false;
        }
        let bonds_fit = path.windows(2).zip(&walk.pattern).all(|(pair, &want)| {
            mol.bond_between(pair[0], pair[1])
                .is_some_and(|e| order_fits(mol.bond(e), want))
        });
        if !bonds_fit {
            return false;
        }
        if self.aliphatic && path.iter().any(|&a| mol.atom(a).is_aromatic) {
            return false;
        }
        if self.activated {
            return [donor, acceptor]
                .into_iter()
                .filter(|&a| mol.atom(a).atomic_num == C)
                .all(|a| activated_carbon(mol, a, path));
        }
        true
    }
}

const PATH_C: Mid = Mid::neutral(&[C]);
const PATH_N: Mid = Mid::neutral(&[N]);
const CARBON: End = End::any(&[C]);
const OXO: End = End::terminal(&[O, SE, TE]);

static KETO_ENOL: Shape = Shape {
    a: CARBON,
    middle: &[PATH_C],
    b: OXO,
    pattern: &[BondOrder::Single, BondOrder::Double],
    aliphatic: true,
    activated: true,
};

static CONJUGATED_KETO_ENOL: Shape = Shape {
    a: CARBON,
    middle: &[PATH_C, PATH_C, PATH_C],
    b: OXO,
    pattern: &[
        BondOrder::Single,
        BondOrder::Double,
        BondOrder::Single,
        BondOrder::Double,
    ],
    aliphatic: true,
    activated: false,
};

static IMINE_ENAMINE: Shape = Shape {
    a: CARBON,
    middle: &[PATH_C],
    b: End::any(&[N]),
    pattern: &[BondOrder::Single, BondOrder::Double],
    aliphatic: false,
    activated: false,
};

static AMIDE: Shape = Shape {
    a: End {
        elements: &[N],
        terminal: false,
        oxygen_neighbour: Some(false),
    },
    middle: &[PATH_C],
    b: End::terminal(&[O]),
    pattern: &[BondOrder::Single, BondOrder::Double],
    aliphatic: false,
    activated: false,
};

static OXIME_NITROSO: Shape = Shape {
    a: End::terminal(&[O]),
    middle: &[PATH_N],
    b: CARBON,
    pattern: &[BondOrder::Single, BondOrder::Double],
    aliphatic: false,
    activated: false,
};

static AMIDINE: Shape = Shape {
    a: End::any(&[N]),
    middle: &[PATH_C],
    b: End::any(&[N]),
    pattern: &[BondOrder::Single, BondOrder::Double],
    aliphatic: false,
    activated: false,
};

static THIONE_THIOL: Shape = Shape {
    a: End::any(&[C, N]),
    middle: &[PATH_C],
    b: End::terminal(&[S]),
    pattern: &[BondOrder::Single, BondOrder::Double],
    aliphatic: false,
    activated: false,
};

static NITRO_ACI_NITRO: Shape = Shape {
    a: CARBON,
    middle: &[Mid {
        elements: &[N],
        formal_charge: 1,
        oxide: true,
    }],
    b: End::terminal(&[O]),
    pattern: &[BondOrder::Single, BondOrder::Double],
    aliphatic: false,
    activated: false,
};

static HYDROXAMIC_ACID: Shape = Shape {
    a: End {
        elements: &[N],
        terminal: false,
        oxygen_neighbour: Some(true),
    },
    middle: &[PATH_C],
    b: End::terminal(&[O]),
    pattern: &[BondOrder::Single, BondOrder::Double],
    aliphatic: false,
    activated: false,
};

static KETENE_YNOL: Shape = Shape {
    a: CARBON,
    middle: &[PATH_C],
    b: End::terminal(&[O]),
    pattern: &[BondOrder::Double, BondOrder::Double],
    aliphatic: true,
    activated: false,
};

static CYANIC_ISOCYANIC: Shape = Shape {
    a: End::terminal(&[O]),
    middle: &[PATH_C],
    b: End::terminal(&[N]),
    pattern: &[BondOrder::Single, BondOrder::Triple],
    aliphatic: true,
    activated: false,
};

/// Kekulé order matches directly; an aromatic bond stands in for either a
/// single or a double bond.
fn order_fits(bond: &Bond, want: BondOrder) -> bool {
    if bond.is_aromatic {
        want != BondOrder::Triple
    } else {
        bond.order == want
    }
}

fn off_path_neighbours<'a>(
    mol: &'a Molecule,
    atom: NodeIndex,
    path: &'a [NodeIndex],
) -> impl Iterator<Item = NodeIndex> + 'a {
    mol.neighbors(atom).filter(move |x| !path.contains(x))
}

/// A keto-enol carbon is activated when all its bonds off the path are
/// single and one of those neighbours is aromatic or carries a multiple
/// bond of its own.
fn activated_carbon(mol: &Molecule, carbon: NodeIndex, path: &[NodeIndex]) -> bool {
    let off_path: Vec<EdgeIndex> = mol
        .bonds_of(carbon)
        .filter(|&e| !path.contains(&mol.other_end(e, carbon)))
        .collect();
    let saturated = off_path.iter().all(|&e| {
        let bond = mol.bond(e);
        !bond.is_aromatic && bond.order == BondOrder::Single
    });
    saturated
        && off_path.iter().any(|&e| {
            let x = mol.other_end(e, carbon);
            mol.atom(x).is_aromatic
                || mol
                    .bonds_of(x)
                    .any(|f| mol.other_end(f, x) != carbon && mol.bond(f).order != BondOrder::Single)
        })
}

fn all_distinct(path: &[NodeIndex]) -> bool {
    let set: HashSet<&NodeIndex> = path.iter().collect();
    set.len() == path.len()
}

/// Aromatic bonds reachable through aromatic bonds from any of `atoms`.
fn aromatic_system(mol: &Molecule, atoms: &[NodeIndex]) -> Vec<EdgeIndex> {
    let mut seen_atoms: HashSet<NodeIndex> = HashSet::new();
    let mut bonds: HashSet<EdgeIndex> = HashSet::new();
    let mut queue: VecDeque<NodeIndex> = atoms.iter().copied().collect();
    while let Some(atom) = queue.pop_front() {
        if !seen_atoms.insert(atom) {
            continue;
        }
        for e in mol.bonds_of(atom) {
            if mol.bond(e).is_aromatic && bonds.insert(e) {
                queue.push_back(mol.other_end(e, atom));
            }
        }
    }
    let mut bonds: Vec<EdgeIndex> = bonds.into_iter().collect();
    bonds.sort();
    bonds
}

/// Shortest paths through aromatic bonds from `start` to every atom it
/// reaches, `start` excluded.
fn aromatic_paths_from(mol: &Molecule, start: NodeIndex) -> Vec<Vec<NodeIndex>> {
    let n = mol.atom_count();
    let mut prev: Vec<Option<NodeIndex>> = vec![None; n];
    let mut seen = vec![false; n];
    let mut order = Vec::new();
    let mut queue = VecDeque::from([start]);
    seen[start.index()] = true;
    while let Some(atom) = queue.pop_front() {
        for e in mol.bonds_of(atom) {
            let next = mol.other_end(e, atom);
            if !mol.bond(e).is_aromatic || seen[next.index()] {
                continue;
            }
            seen[next.index()] = true;
            prev[next.index()] = Some(atom);
            order.push(next);
            queue.push_back(next);
        }
    }
    order
        .into_iter()
        .map(|end| {
            let mut path = vec![end];
            let mut cur = end;
            while let Some(p) = prev[cur.index()] {
                path.push(p);
                cur = p;
            }
            path.reverse();
            path
        })
        .collect()
}

fn all_bonds(mol: &Molecule, path: &[NodeIndex], pred: impl Fn(&Bond) -> bool) -> bool {
    path.windows(2).all(|pair| {
        mol.bond_between(pair[0], pair[1])
            .is_some_and(|e| pred(mol.bond(e)))
    })
}

fn is_ring_nh(mol: &Molecule, atom: NodeIndex) -> bool {
    let a = mol.atom(atom);
    a.atomic_num == N && a.is_aromatic && a.formal_charge == 0 && a.hydrogen_count > 0
}

fn is_ring_n_acceptor(mol: &Molecule, atom: NodeIndex) -> bool {
    let a = mol.atom(atom);
    a.atomic_num == N
        && a.is_aromatic
        && a.formal_charge == 0
        && a.hydrogen_count == 0
        && mol.degree(atom) == 2
}

fn annular_fits(mol: &Molecule, path: &[NodeIndex]) -> bool {
    let (Some(&donor), Some(&acceptor)) = (path.first(), path.last()) else {
        return false;
    };
    path.len() >= 2
        && is_ring_nh(mol, donor)
        && is_ring_n_acceptor(mol, acceptor)
        && all_bonds(mol, path, |b| b.is_aromatic)
}

fn annular_paths(mol: &Molecule) -> Vec<Vec<NodeIndex>> {
    mol.atoms()
        .filter(|&a| is_ring_nh(mol, a))
        .flat_map(|donor| aromatic_paths_from(mol, donor))
        .filter(|path| annular_fits(mol, path))
        .collect()
}

fn is_exocyclic_heteroatom(mol: &Molecule, atom: NodeIndex) -> bool {
    let a = mol.atom(atom);
    matches!(a.atomic_num, O | S | N) && a.formal_charge == 0 && !a.is_aromatic
}

/// Ring NH ... aromatic C = X.
fn lactam_fits(mol: &Molecule, path: &[NodeIndex]) -> bool {
    let [donor, .., carbon, x] = path else {
        return false;
    };
    is_ring_nh(mol, *donor)
        && mol.atom(*carbon).atomic_num == C
        && mol.atom(*carbon).is_aromatic
        && is_exocyclic_heteroatom(mol, *x)
        && all_bonds(mol, &path[..path.len() - 1], |b| b.is_aromatic)
        && mol
            .bond_between(*carbon, *x)
            .is_some_and(|e| !mol.bond(e).is_aromatic && mol.bond(e).order == BondOrder::Double)
}

/// X(H) – aromatic C ... ring N.
fn lactim_fits(mol: &Molecule, path: &[NodeIndex]) -> bool {
    let [x, carbon, .., acceptor] = path else {
        return false;
    };
    is_exocyclic_heteroatom(mol, *x)
        && mol.atom(*x).hydrogen_count > 0
        && mol.atom(*carbon).atomic_num == C
        && mol.atom(*carbon).is_aromatic
        && is_ring_n_acceptor(mol, *acceptor)
        && all_bonds(mol, &path[1..], |b| b.is_aromatic)
        && mol
            .bond_between(*x, *carbon)
            .is_some_and(|e| !mol.bond(e).is_aromatic && mol.bond(e).order == BondOrder::Single)
}

fn exocyclic_paths(mol: &Molecule) -> Vec<Vec<NodeIndex>> {
    let mut found = Vec::new();
    for atom in mol.atoms() {
        if is_ring_nh(mol, atom) {
            for ring_path in aromatic_paths_from(mol, atom) {
                let Some(&carbon) = ring_path.last() else {
                    continue;
                };
                for x in mol.neighbors(carbon) {
                    let mut path = ring_path.clone();
                    path.push(x);
                    if lactam_fits(mol, &path) {
                        found.push(path);
                    }
                }
            }
        } else if is_exocyclic_heteroatom(mol, atom) && mol.atom(atom).hydrogen_count > 0 {
            for carbon in mol.neighbors(atom) {
                if !mol.atom(carbon).is_aromatic {
                    continue;
                }
                let mut paths = vec![vec![atom, carbon]];
                paths.extend(aromatic_paths_from(mol, carbon).into_iter().map(|p| {
                    let mut path = vec![atom];
                    path.extend(p);
                    path
                }));
                found.extend(paths.into_iter().filter(|p| lactim_fits(mol, p)));
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::canonical_key;
    use crate::smiles::from_smiles;

    fn mol(smiles: &str) -> Molecule {
        from_smiles(smiles).unwrap_or_else(|e| panic!("bad SMILES {smiles:?}: {e}"))
    }

    fn products(smiles: &str, rule: TransformRule) -> Vec<String> {
        let m = mol(smiles);
        let mut keys: Vec<String> = rule
            .sites(&m)
            .iter()
            .filter_map(|site| rule.rewrite(&m, site).ok())
            .map(|p| canonical_key(&p))
            .collect();
        keys.sort();
        keys.dedup();
        keys
    }

    fn key(smiles: &str) -> String {
        canonical_key(&mol(smiles))
    }

    #[test]
    fn isolated_ketone_is_not_activated() {
        assert!(TransformRule::KetoEnol.sites(&mol("CC(=O)C")).is_empty());
        assert!(TransformRule::KetoEnol.sites(&mol("C1CCCCC1=O")).is_empty());
    }

    #[test]
    fn diketone_enolizes() {
        let p = products("CC(=O)CC(=O)C", TransformRule::KetoEnol);
        assert_eq!(p, vec![key("CC(O)=CC(=O)C")]);
    }

    #[test]
    fn enol_reverts_to_keto() {
        let p = products("CC(O)=CC(=O)C", TransformRule::KetoEnol);
        assert!(p.contains(&key("CC(=O)CC(=O)C")));
    }

    #[test]
    fn conjugated_enol_swaps_oxygens() {
        let p = products("CC(O)=CC(=O)C", TransformRule::ConjugatedKetoEnol);
        assert!(p.contains(&key("CC(=O)C=C(O)C")));
    }

    #[test]
    fn phenol_has_no_keto_site() {
        let m = mol("Oc1ccccc1");
        assert!(TransformRule::KetoEnol.sites(&m).is_empty());
        assert!(RuleSet::default()
            .matches(&m)
            .all(|site| site.rule.rewrite(&m, &site).is_err()));
    }

    #[test]
    fn amide_to_imidic_acid() {
        let p = products("CC(=O)N", TransformRule::Amide);
        assert_eq!(p, vec![key("CC(O)=N")]);
        let p = products("CC(O)=N", TransformRule::Amide);
        assert_eq!(p, vec![key("CC(=O)N")]);
    }

    #[test]
    fn imine_enamine() {
        let p = products("CC(C)=N", TransformRule::ImineEnamine);
        assert_eq!(p, vec![key("C=C(C)N")]);
    }

    #[test]
    fn annular_shift_in_pyrazole() {
        let p = products("Cc1cc[nH]n1", TransformRule::AnnularNh);
        assert_eq!(p, vec![key("Cc1[nH]ncc1")]);
    }

    #[test]
    fn annular_shift_in_imidazole_is_symmetric() {
        let m = mol("c1c[nH]cn1");
        let sites = TransformRule::AnnularNh.sites(&m);
        assert_eq!(sites.len(), 1);
        let product = TransformRule::AnnularNh.rewrite(&m, &sites[0]).unwrap();
        assert_eq!(canonical_key(&product), canonical_key(&m));
    }

    #[test]
    fn pyridone_and_hydroxypyridine() {
        let p = products("O=c1cccc[nH]1", TransformRule::HeteroaromaticExocyclic);
        assert_eq!(p, vec![key("Oc1ccccn1")]);
        let p = products("Oc1ccccn1", TransformRule::HeteroaromaticExocyclic);
        assert_eq!(p, vec![key("O=c1cccc[nH]1")]);
        let p = products("Oc1ccncc1", TransformRule::HeteroaromaticExocyclic);
        assert_eq!(p, vec![key("O=c1cc[nH]cc1")]);
    }

    #[test]
    fn three_hydroxypyridine_has_no_neutral_keto_form() {
        assert!(products("Oc1cccnc1", TransformRule::HeteroaromaticExocyclic).is_empty());
    }

    #[test]
    fn amidine_in_aminopyridine() {
        let p = products("Nc1ccccn1", TransformRule::Amidine);
        assert_eq!(p, vec![key("N=c1cccc[nH]1")]);
    }

    #[test]
    fn thione_thiol() {
        let p = products("CC(=S)C", TransformRule::ThioneThiol);
        assert_eq!(p, vec![key("C=C(S)C")]);
    }

    #[test]
    fn oxime_nitroso() {
        let p = products("CC(C)=NO", TransformRule::OximeNitroso);
        assert_eq!(p, vec![key("CC(C)N=O")]);
    }

    #[test]
    fn nitro_aci_nitro() {
        let p = products("C[N+](=O)[O-]", TransformRule::NitroAciNitro);
        assert_eq!(p, vec![key("C=[N+]([O-])O")]);
    }

    #[test]
    fn hydroxamic_acid() {
        let p = products("CC(=O)NO", TransformRule::HydroxamicAcid);
        assert_eq!(p, vec![key("CC(O)=NO")]);
        assert!(products("CC(=O)NO", TransformRule::Amide).is_empty());
    }

    #[test]
    fn ketene_and_cyanic_acid() {
        assert_eq!(products("C=C=O", TransformRule::KeteneYnol), vec![key("C#CO")]);
        assert_eq!(products("C#CO", TransformRule::KeteneYnol), vec![key("C=C=O")]);
        assert_eq!(products("OC#N", TransformRule::CyanicIsocyanic), vec![key("O=C=N")]);
        assert_eq!(products("O=C=N", TransformRule::CyanicIsocyanic), vec![key("OC#N")]);
    }

    #[test]
    fn sites_reverse_on_their_product() {
        for smiles in ["CC(=O)N", "Cc1cc[nH]n1", "O=c1cccc[nH]1", "CC(=O)CC(=O)C"] {
            let m = mol(smiles);
            for site in RuleSet::default().matches(&m) {
                if let Ok(product) = site.rule.rewrite(&m, &site) {
                    let back = site.rule.rewrite(&product, &site.reversed()).unwrap();
                    assert_eq!(canonical_key(&back), canonical_key(&m), "{smiles} {}", site.rule);
                }
            }
        }
    }

    #[test]
    fn foreign_site_is_rejected() {
        let m = mol("CC(=O)N");
        let site = MatchSite {
            rule: TransformRule::Amide,
            donor: NodeIndex::new(0),
            acceptor: NodeIndex::new(2),
            path: vec![NodeIndex::new(0), NodeIndex::new(1), NodeIndex::new(2)],
        };
        assert!(!TransformRule::Amide.recognize(&m, &site));
        assert!(matches!(
            TransformRule::Amide.rewrite(&m, &site),
            Err(RewriteError::NoMatch { rule: "amide" })
        ));
        assert!(!TransformRule::KetoEnol.recognize(&m, &site));
    }

    #[test]
    fn rule_set_order_and_names() {
        let set = RuleSet::default();
        assert_eq!(set.rules().len(), 13);
        assert_eq!(set.rules()[0].to_string(), "keto-enol");
        let m = mol("CC(=O)N");
        let rules: Vec<TransformRule> = set.matches(&m).map(|s| s.rule).collect();
        let mut sorted = rules.clone();
        sorted.sort();
        assert_eq!(rules, sorted);
    }
}
