use std::num::NonZeroUsize;

use tautocrab::tautomer::{EnumeratorConfig, TautomerEnumerator};
use tautocrab::valence::total_valence;
use tautocrab::{
    canonical_key, enumerate, from_smiles, to_smiles, CanonicalTautomer, Enumeration,
};

fn key(smiles: &str) -> String {
    canonical_key(&from_smiles(smiles).unwrap())
}

fn tautomers(smiles: &str) -> Enumeration {
    enumerate(&from_smiles(smiles).unwrap(), NonZeroUsize::new(32).unwrap()).unwrap()
}

fn canonical(smiles: &str) -> CanonicalTautomer {
    TautomerEnumerator::new(EnumeratorConfig::default())
        .canonicalize(&from_smiles(smiles).unwrap())
        .unwrap()
}

#[test]
fn isolated_ketones_do_not_enolize() {
    for smiles in ["CC(=O)C", "O=C1CCCCC1", "O=C1CCCC1", "CC(=O)CC"] {
        let found = tautomers(smiles);
        assert_eq!(found.len(), 1, "{smiles}: {:?}", found.keys);
        assert!(!found.truncated);
    }
}

#[test]
fn phenols_stay_aromatic() {
    for smiles in ["Oc1ccccc1", "Oc1cccc(O)c1", "Oc1ccccc1O"] {
        let result = canonical(smiles);
        assert_eq!(result.winner_key(), key(smiles), "{smiles}");
    }
    assert_eq!(tautomers("Oc1ccccc1").len(), 1);
}

#[test]
fn anilines_have_no_imine_form() {
    assert_eq!(tautomers("Nc1ccccc1").len(), 1);
}

#[test]
fn acetamide_prefers_the_amide() {
    let result = canonical("CC(=O)N");
    assert!(result.all.len() >= 2);
    assert!(result.keys.contains(&key("CC(O)=N")));
    assert_eq!(result.winner_key(), key("CC(=O)N"));
}

#[test]
fn diketone_enolizes_both_ways() {
    let found = tautomers("CC(=O)CC(=O)C");
    assert!(found.keys.contains(&key("CC(O)=CC(=O)C")));
    assert!(found.keys.contains(&key("C=C(O)C=C(O)C")));
    assert_eq!(found.keys[0], key("CC(=O)CC(=O)C"));
}

#[test]
fn symmetric_azoles_have_one_tautomer() {
    assert_eq!(tautomers("c1c[nH]cn1").len(), 1);
    assert_eq!(tautomers("c1cc[nH]n1").len(), 1);
    assert_eq!(tautomers("NC(N)=N").len(), 1);
}

#[test]
fn substituted_pyrazole_shifts_its_hydrogen() {
    let found = tautomers("Cc1cc[nH]n1");
    assert!(found.keys.contains(&key("Cc1[nH]ncc1")));
}

#[test]
fn tetrazole_annular_forms() {
    let found = tautomers("c1[nH]nnn1");
    assert!(found.keys.contains(&key("c1n[nH]nn1")));
}

#[test]
fn pyridones_win_over_hydroxypyridines() {
    let lactam = key("O=c1cccc[nH]1");
    for smiles in ["Oc1ccccn1", "O=C1C=CC=CN1", "O=c1cccc[nH]1", "c1ccc(O)nc1"] {
        assert_eq!(canonical(smiles).winner_key(), lactam, "{smiles}");
    }
    assert_eq!(canonical("Oc1ccncc1").winner_key(), key("O=c1cc[nH]cc1"));
}

#[test]
fn methylpyridine_keeps_its_ring() {
    let result = canonical("Cc1ccccn1");
    assert!(result.all.len() >= 2);
    assert_eq!(result.winner_key(), key("Cc1ccccn1"));
}

#[test]
fn nitro_and_oxime_families() {
    let nitro = tautomers("C[N+](=O)[O-]");
    assert_eq!(nitro.len(), 2);
    assert!(nitro.keys.contains(&key("C=[N+]([O-])O")));
    assert_eq!(canonical("C=[N+]([O-])O").winner_key(), key("C[N+](=O)[O-]"));

    let oxime = tautomers("CC(C)=NO");
    assert!(oxime.keys.contains(&key("CC(C)N=O")));
}

#[test]
fn rare_acids() {
    assert!(tautomers("C=C=O").keys.contains(&key("C#CO")));
    assert!(tautomers("OC#N").keys.contains(&key("O=C=N")));
    assert_eq!(tautomers("C#N").len(), 1);
}

#[test]
fn no_rule_returns_the_seed() {
    for smiles in ["CCCC", "CSC", "[Na+].[Cl-]", "C"] {
        let result = canonical(smiles);
        assert_eq!(result.all.len(), 1, "{smiles}");
        assert!(!result.truncated);
        assert_eq!(result.winner_key(), key(smiles));
    }
}

#[test]
fn bound_is_respected_on_many_tautomer_molecules() {
    let mol = from_smiles("CC(=O)CC(=O)CC(=O)CC(=O)C").unwrap();
    let small = enumerate(&mol, NonZeroUsize::new(3).unwrap()).unwrap();
    assert_eq!(small.len(), 3);
    assert!(small.truncated);

    let result = TautomerEnumerator::new(EnumeratorConfig::with_max(3).unwrap())
        .canonicalize(&mol)
        .unwrap();
    assert_eq!(result.all.len(), 3);
    assert!(result.truncated);
    assert!(result.keys.iter().any(|k| k == result.winner_key()));
}

#[test]
fn canonical_forms_of_reference_molecules() {
    for (input, expected) in [
        ("[N+](=O)([O-])C", "C[N+](=O)[O-]"),
        ("CC(=O)C[N+](=O)[O-]", "CC(=O)C[N+](=O)[O-]"),
        ("CC(=O)CC(=O)C", "CC(=O)CC(C)=O"),
        ("CC(O)=CC(=O)C", "CC(=O)CC(C)=O"),
        ("CC(=N)C", "CC(C)=N"),
        ("CC(=N)CC", "CCC(C)=N"),
        ("CC(=S)C", "CC(C)=S"),
        ("CC(=O)N", "CC(N)=O"),
        ("CC(=O)NC", "CNC(C)=O"),
        ("CC(=O)NO", "CC(=O)NO"),
        ("CC(C)=NO", "CC(C)=NO"),
        ("O=C1NCCCC1", "O=C1CCCCN1"),
        ("c1ccc(O)nc1", "O=c1cccc[nH]1"),
        ("Nc1ccccn1", "Nc1ccccn1"),
        ("N=c1cccc[nH]1", "Nc1ccccn1"),
        ("NC(=S)N", "NC(N)=S"),
        ("C=C=O", "C=C=O"),
        ("OC#N", "N=C=O"),
    ] {
        assert_eq!(canonical(input).winner_key(), key(expected), "{input}");
    }
}

#[test]
fn cytosine_keeps_amino_and_oxo_groups() {
    let winner = canonical("Nc1cc[nH]c(=O)n1").winner_key().to_string();
    let amino_oxo = [key("O=c1nc(N)cc[nH]1"), key("O=c1[nH]c(N)ccn1")];
    assert!(amino_oxo.contains(&winner), "{winner}");
    assert_ne!(winner, key("N=c1cc[nH]c(=O)[nH]1"));
}

#[test]
fn ring_shifts_never_make_pentavalent_nitrogen() {
    for smiles in ["Cc1cc[nH]n1", "Nc1ncnc2[nH]cnc12", "O=c1[nH]cnc2[nH]cnc12"] {
        let found = tautomers(smiles);
        for t in &found.tautomers {
            for a in t.atoms() {
                let atom = t.atom(a);
                if atom.atomic_num == 7 && atom.formal_charge == 0 {
                    assert_eq!(total_valence(t, a), 3, "{smiles}: {}", to_smiles(t));
                }
            }
            let back = enumerate(t, NonZeroUsize::new(64).unwrap()).unwrap();
            assert!(back.keys.contains(&found.keys[0]), "{smiles}: {}", to_smiles(t));
        }
    }
}

#[test]
fn simple_enols_are_returned_unchanged() {
    for smiles in ["C=C(O)C", "OC=C", "OC1=CCCCC1"] {
        let result = canonical(smiles);
        assert_eq!(result.all.len(), 1, "{smiles}: {:?}", result.keys);
        assert_eq!(result.winner_key(), key(smiles));
    }
}
