//! Built-in molecule batteries.

use super::TestCase;

/// Everyday tautomer classes.
pub const BASIC: &[(&str, &str)] = &[
    ("CC(=O)C", "acetone"),
    ("CC(=O)CC(=O)C", "acetylacetone (pentane-2,4-dione)"),
    ("Oc1ccccc1", "phenol"),
    ("C=NC", "simple imine"),
    ("CC(=N)C", "ketoimine"),
    ("CC(=O)N", "acetamide"),
    ("c1c[nH]cn1", "imidazole"),
    ("c1[nH]nnn1", "tetrazole"),
    ("O=C1C=CC=CN1", "2-pyridone"),
    ("NC(N)=N", "guanidine"),
    ("c1ccc2[nH]ccc2c1", "indole"),
    ("O=C1NCCCC1", "caprolactam"),
    ("CC(=S)C", "thioacetone"),
    ("CC(=O)CC(=O)NC", "keto-amide"),
    ("Oc1ccc(O)cc1", "hydroquinone"),
];

/// Edge cases, rarer tautomerism and drug-like molecules.
pub const EXTENDED: &[(&str, &str)] = &[
    ("CC(=O)CC", "2-butanone"),
    ("CCC(=O)C", "2-butanone (isomer)"),
    ("O=C1CCCC1", "cyclopentanone"),
    ("O=C1CCCCC1", "cyclohexanone"),
    ("CC(=O)C(C)=O", "diacetyl (2,3-butanedione)"),
    ("CC(=O)C=CC(=O)C", "1,5-hexanedione"),
    ("O=C1C=CC(=O)CC1", "cyclohex-2-en-1,4-dione"),
    ("CC(=N)CC", "butan-2-imine"),
    ("C=NCC", "propimine"),
    ("Nc1ccccc1", "aniline"),
    ("c1ccc(N)cc1", "aniline (alt)"),
    ("NC(=O)C", "acetamide"),
    ("CC(=O)NC", "N-methylacetamide"),
    ("O=C1CCCCN1", "caprolactam"),
    ("O=C1CNC1", "beta-lactam (2-azetidinone)"),
    ("c1ccc2[nH]ccc2c1", "indole"),
    ("c1ccc2nc[nH]c2c1", "benzimidazole"),
    ("c1c[nH]cn1", "imidazole"),
    ("c1cnc[nH]1", "imidazole (alt)"),
    ("c1cc[nH]n1", "pyrazole"),
    ("c1cn[nH]c1", "pyrazole (alt)"),
    ("c1[nH]nnn1", "1H-tetrazole"),
    ("c1n[nH]nn1", "2H-tetrazole"),
    ("c1[nH]nnc1", "1H-1,2,3-triazole"),
    ("c1n[nH]nc1", "2H-1,2,3-triazole"),
    ("O=C1C=CC=CN1", "2-pyridone"),
    ("O=C1NC=CC=C1", "2-pyridone (alt)"),
    ("O=c1ccccn1", "2-pyridone (aromatic)"),
    ("c1ccc(O)nc1", "2-hydroxypyridine"),
    ("CC(=O)NO", "acetone oxime"),
    ("CC(C)=NO", "propanone oxime"),
    ("C=NO", "formaldoxime"),
    ("NC(N)=N", "guanidine"),
    ("NC(=N)N", "guanidine (alt)"),
    ("CC(N)=N", "acetamidine"),
    ("CC(=N)N", "acetamidine (alt)"),
    ("CC(=S)C", "thioacetone"),
    ("CSC", "dimethyl sulfide (control - no tautomerism)"),
    ("NC(=S)N", "thiourea"),
    ("CC(=O)C[N+](=O)[O-]", "nitroacetone"),
    ("[N+](=O)([O-])C", "nitromethane"),
    ("Oc1ccccc1", "phenol"),
    ("Oc1ccc(O)cc1", "hydroquinone (1,4)"),
    ("Oc1cccc(O)c1", "resorcinol (1,3)"),
    ("Oc1ccccc1O", "catechol (1,2)"),
    ("Oc1ccc(C=O)cc1", "4-hydroxybenzaldehyde"),
    ("O=C1CC(=O)c2ccccc2C1", "1,3-indandione"),
    ("CC(=O)c1ccc(O)cc1", "4-hydroxyacetophenone"),
    ("Nc1ncnc2[nH]cnc12", "adenine"),
    ("O=c1[nH]cnc2[nH]cnc12", "hypoxanthine"),
    ("C=CC=O", "acrolein"),
    ("CC(=O)C=O", "methylglyoxal"),
    ("O=CC=CC=O", "fumaraldehyde"),
    ("CC(=O)NO", "acetohydroxamic acid"),
    ("NC(=O)NO", "carbamhydroxamic acid"),
    ("CP(=O)(O)O", "methylphosphonic acid"),
    ("CS(=O)C", "dimethyl sulfoxide"),
    ("C=C=O", "ketene"),
    ("OC#N", "cyanic acid"),
    ("C#N", "hydrogen cyanide"),
    ("CC(=O)Oc1ccccc1C(=O)O", "aspirin"),
    ("CC(C)Cc1ccc(C(C)C(=O)O)cc1", "ibuprofen"),
    ("CN1C=NC2=C1C(=O)N(C(=O)N2C)C", "caffeine"),
    ("NC(=O)c1cccnc1", "nicotinamide"),
];

/// Molecules with many mobile hydrogens.
pub const HIGH_COMPLEXITY: &[(&str, &str)] = &[
    ("O=C(C)C(=O)C(=O)C(=O)C", "tetraketone - 4 keto sites"),
    ("CC(=O)CC(=O)CC(=O)CC(=O)C", "pentanedione chain - 4 keto sites"),
    ("O=C1CC(=O)CC(=O)CC(=O)C1", "cyclic polyketone"),
    ("NC(=O)C(=O)C(=O)C(=O)N", "polyamide"),
    ("NC(=O)CC(=O)CC(=O)N", "triamide"),
    ("CC(=O)CC(=O)CC(=O)NC(=O)C", "keto-amide hybrid"),
    ("NC(=O)CC(=O)CC(=O)CC(=O)N", "long keto-amide"),
    ("Oc1cc(O)cc(O)c1", "trihydroxybenzene"),
    ("Oc1c(O)c(O)c(O)c(O)c1O", "hexahydroxybenzene"),
    ("O=C1C(=O)C(=O)C(=O)C(=O)C1=O", "hexaketocyclohexane"),
    ("CC(=O)c1cc(O)c(O)c(O)c1C(=O)C", "polyhydroxy diketone aromatic"),
    ("c1cc2[nH]c(cc3[nH]c(cc4[nH]c(c1)cc4)cc3)cc2", "porphyrin core"),
    ("c1c[nH]c(c2c[nH]cn2)n1", "bis-imidazole"),
    ("C=C(O)C=C(O)C=C(O)C=C(O)C", "tetraenol"),
    ("O=c1cc(O)c2c(O)cc(O)cc2o1", "flavone scaffold"),
    ("Oc1ccc(C=CC(=O)CC(=O)C=Cc2ccc(O)cc2)cc1", "curcumin"),
    ("O=C1NC(=O)NC(=O)N1", "barbituric acid"),
    ("O=C1NC(=O)NC(=O)C(=O)N1", "alloxan"),
    ("NC1=C(N)C(=O)C(=O)C(N)=C1N", "tetraaminoquinone"),
    ("O=C1NC(=O)C2=C(N1)NC(=O)N2", "uric acid"),
    ("NC(=N)NC(=N)NC(=N)N", "tri-guanidine"),
];

pub(super) fn cases(table: &[(&str, &str)]) -> Vec<TestCase> {
    table
        .iter()
        .map(|&(smiles, name)| TestCase::new(smiles, name))
        .collect()
}
