// src/noyau/format.rs
//
// Rendu des polynômes :
// - chaine_standard : forme "n,c1,e1,…" (sérialisation canonique,
//   relue par Polynome::analyser)
// - chaine_latex    : rendu lisible avec pli des signes

use std::fmt::Write;

use super::polynome::Polynome;

/// Forme standard : `"0"` pour le polynôme nul, sinon
/// `"n,c1,e1,c2,e2,…"` dans l'ordre normalisé (exposants décroissants).
pub fn chaine_standard(polynome: &Polynome) -> String {
    if polynome.est_nul() {
        return "0".to_string();
    }

    let mut sortie = polynome.nb_termes().to_string();
    for terme in polynome.termes() {
        // write! sur String est infaillible
        let _ = write!(sortie, ",{},{}", terme.coefficient, terme.exposant);
    }
    sortie
}

/// Rendu LaTeX :
/// - signe du premier terme absorbé (`-` collé), puis ` + ` / ` - `
/// - coefficient 1 élidé sauf pour le terme constant
/// - `x` pour l'exposant 1, `x^{e}` au-delà, coefficient seul en degré 0
pub fn chaine_latex(polynome: &Polynome) -> String {
    if polynome.est_nul() {
        return "0".to_string();
    }

    let mut sortie = String::new();
    for (rang, terme) in polynome.termes().iter().enumerate() {
        let mut coefficient = terme.coefficient;
        if rang == 0 {
            if coefficient < 0 {
                sortie.push('-');
                coefficient = -coefficient;
            }
        } else if coefficient >= 0 {
            sortie.push_str(" + ");
        } else {
            sortie.push_str(" - ");
            coefficient = -coefficient;
        }

        if coefficient != 1 || terme.exposant == 0 {
            let _ = write!(sortie, "{coefficient}");
        }
        if terme.exposant > 0 {
            sortie.push('x');
            if terme.exposant > 1 {
                let _ = write!(sortie, "^{{{}}}", terme.exposant);
            }
        }
    }
    sortie
}
