//! Tests de propriétés (campagne) : lois algébriques + scénarios de bout en bout.
//!
//! But : vérifier les lois qui doivent tenir pour TOUT polynôme
//! normalisé, sur un échantillon fixe mais varié, puis rejouer les
//! scénarios concrets des deux évaluateurs.
//!
//! Les égalités se lisent sur les suites de termes normalisées
//! (PartialEq de Polynome), jamais sur un rendu texte.

use super::eval::Evaluateur;
use super::polynome::{Polynome, Terme};
use super::registre::Registre;

fn poly(paires: &[(i64, u32)]) -> Polynome {
    Polynome::depuis_termes(paires.iter().map(|&(c, e)| Terme::new(c, e)).collect())
}

/// Échantillon : zéro, constantes, monômes, petits polynômes denses
/// et creux, coefficients négatifs.
fn echantillon() -> Vec<Polynome> {
    vec![
        Polynome::nul(),
        poly(&[(1, 0)]),
        poly(&[(-7, 0)]),
        poly(&[(1, 1)]),
        poly(&[(-3, 2)]),
        poly(&[(2, 1), (3, 0)]),
        poly(&[(1, 2), (-2, 1), (1, 0)]),
        poly(&[(5, 4), (-2, 2), (7, 0)]),
        poly(&[(9, 6), (1, 3)]),
        poly(&[(-1, 5), (4, 3), (-4, 1)]),
    ]
}

const POINTS: [i64; 7] = [-3, -1, 0, 1, 2, 5, 10];

/* ------------------------ Lois algébriques ------------------------ */

#[test]
fn prop_aller_retour_forme_standard() {
    for p in echantillon() {
        let texte = p.vers_chaine_standard();
        assert_eq!(Polynome::analyser(&texte), p, "aller-retour de {texte:?}");
    }
}

#[test]
fn prop_normalisation_idempotente() {
    for p in echantillon() {
        // terme de coefficient nul : sans effet
        let mut q = p.clone();
        q.ajouter_terme(Terme::new(0, 3));
        assert_eq!(q, p);

        // re-normalisation d'un polynôme déjà normalisé : sans effet
        let r = Polynome::depuis_termes(p.termes().to_vec());
        assert_eq!(r, p);
    }
}

#[test]
fn prop_addition_commutative_et_associative() {
    let polys = echantillon();
    for p in &polys {
        for q in &polys {
            assert_eq!(p + q, q + p, "commutativité: {p} / {q}");
            for r in &polys {
                assert_eq!(&(p + q) + r, p + &(q + r), "associativité: {p} / {q} / {r}");
            }
        }
    }
}

#[test]
fn prop_derivee_lineaire() {
    let polys = echantillon();
    for p in &polys {
        for q in &polys {
            assert_eq!((p + q).derivee(), &p.derivee() + &q.derivee());
        }
    }
}

#[test]
fn prop_evaluation_compatible_addition() {
    let polys = echantillon();
    for p in &polys {
        for q in &polys {
            for &x in &POINTS {
                assert_eq!(
                    (p + q).evaluer(x),
                    p.evaluer(x).wrapping_add(q.evaluer(x)),
                    "évaluation en {x}: {p} / {q}"
                );
            }
        }
    }
}

#[test]
fn prop_evaluation_compatible_multiplication() {
    let polys = echantillon();
    for p in &polys {
        for q in &polys {
            for &x in &POINTS {
                assert_eq!(
                    (p * q).evaluer(x),
                    p.evaluer(x).wrapping_mul(q.evaluer(x)),
                    "évaluation en {x}: {p} / {q}"
                );
            }
        }
    }
}

/* ------------------------ Scénarios concrets ------------------------ */

#[test]
fn scenarios_evaluateur_entier() {
    use super::erreurs::ErreurEval;

    let evaluateur = Evaluateur::default();
    assert_eq!(evaluateur.evaluer("3+4*2"), Ok(11));
    assert_eq!(evaluateur.evaluer("(1+2)*3"), Ok(9));
    assert_eq!(evaluateur.evaluer("10/0"), Err(ErreurEval::DivisionParZero));
    assert_eq!(evaluateur.evaluer("|-5|"), Ok(5));
}

#[test]
fn scenarios_registre() {
    use super::erreurs::ErreurRegistre;

    let registre = Registre::new();

    registre.definir('a', "2,1,3,0").unwrap();
    assert_eq!(registre.obtenir('a').unwrap().vers_chaine_standard(), "2,2,1,3,0");

    registre.definir('a', "1,1,0,0").unwrap();
    registre.definir('b', "1,1,0,0").unwrap();
    assert_eq!(
        registre.evaluer_expression("a+b").unwrap().vers_chaine_standard(),
        "1,2,1"
    );

    registre.definir('c', "1,1").unwrap();
    registre.definir('d', "1,1").unwrap();
    registre.definir('e', "1,1").unwrap();
    assert_eq!(registre.definir('f', "1,1"), Err(ErreurRegistre::TropDePolynomes));
}

#[test]
fn scenario_croise_derivee_puis_evaluation() {
    // d/dx (x^3 - 2x) = 3x^2 - 2, en x = 3 : 25.
    let registre = Registre::new();
    registre.definir('a', "1,3,-2,1").unwrap();
    let derivee = registre.derivee_de('a').unwrap();
    assert_eq!(derivee.vers_chaine_standard(), "2,3,2,-2,0");
    assert_eq!(derivee.evaluer(3), 25);
    // cohérent avec l'évaluation du polynôme d'origine
    assert_eq!(registre.evaluer_en('a', 3), Ok(21));
}
