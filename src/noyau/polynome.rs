//! Noyau — polynômes creux à une variable
//!
//! Un `Polynome` est une suite de `Terme` (coefficient, exposant)
//! maintenue NORMALISÉE : exposants strictement décroissants, pas de
//! doublon, aucun coefficient nul. La suite vide représente le
//! polynôme nul. Toute opération qui produit des termes repasse par
//! `normaliser` (tri décroissant, fusion des exposants égaux, purge
//! des coefficients nuls).
//!
//! Coefficients i64 enroulants, exposants u32 — même sémantique
//! machine que l'évaluateur entier.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_traits::{One, Zero};

use super::format::{chaine_latex, chaine_standard};

/// Un terme `coefficient · x^exposant`. Valeur pure, sans identité.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terme {
    pub coefficient: i64,
    pub exposant: u32,
}

impl Terme {
    pub fn new(coefficient: i64, exposant: u32) -> Self {
        Self {
            coefficient,
            exposant,
        }
    }
}

/// Polynôme creux normalisé. Les copies sont profondes et
/// indépendantes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Polynome {
    termes: Vec<Terme>,
}

impl Polynome {
    /// Le polynôme nul.
    pub fn nul() -> Self {
        Self::default()
    }

    /// Construit depuis des termes quelconques (ordre libre,
    /// doublons et zéros admis) puis normalise.
    pub fn depuis_termes(termes: Vec<Terme>) -> Self {
        let mut polynome = Self { termes };
        polynome.normaliser();
        polynome
    }

    /// Analyse indulgente : ne signale jamais d'échec.
    ///
    /// Entrée = entiers séparés par des virgules. Un compte PAIR est lu
    /// comme des paires `coefficient,exposant` ; un compte IMPAIR est
    /// la forme canonique `n,c1,e1,…` (le compte de tête doit
    /// correspondre) — c'est elle que produit `vers_chaine_standard`,
    /// d'où l'aller-retour. Toute entrée mal formée (jeton non entier,
    /// compte de tête faux, exposant négatif) rend le polynôme nul,
    /// jamais un résultat partiel.
    pub fn analyser(texte: &str) -> Self {
        let nettoye: String = texte.chars().filter(|c| !c.is_whitespace()).collect();
        if nettoye.is_empty() {
            return Self::nul();
        }

        let valeurs: Option<Vec<i64>> = nettoye.split(',').map(|j| j.parse().ok()).collect();
        let Some(valeurs) = valeurs else {
            return Self::nul();
        };

        let paires: &[i64] = if valeurs.len() % 2 == 1 {
            let annonce = valeurs[0];
            if annonce < 0 || annonce as usize != (valeurs.len() - 1) / 2 {
                return Self::nul();
            }
            &valeurs[1..]
        } else {
            &valeurs[..]
        };

        let mut termes = Vec::with_capacity(paires.len() / 2);
        for paire in paires.chunks_exact(2) {
            let Ok(exposant) = u32::try_from(paire[1]) else {
                return Self::nul();
            };
            termes.push(Terme::new(paire[0], exposant));
        }
        Self::depuis_termes(termes)
    }

    /// Ajoute un terme puis rétablit l'invariant.
    pub fn ajouter_terme(&mut self, terme: Terme) {
        self.termes.push(terme);
        self.normaliser();
    }

    pub fn termes(&self) -> &[Terme] {
        &self.termes
    }

    pub fn nb_termes(&self) -> usize {
        self.termes.len()
    }

    pub fn est_nul(&self) -> bool {
        self.termes.is_empty()
    }

    /// Tri par exposant décroissant, fusion des exposants égaux,
    /// purge des coefficients nuls.
    fn normaliser(&mut self) {
        self.termes.sort_by(|gauche, droit| droit.exposant.cmp(&gauche.exposant));

        let mut fusionnes: Vec<Terme> = Vec::with_capacity(self.termes.len());
        for terme in self.termes.drain(..) {
            match fusionnes.last_mut() {
                Some(dernier) if dernier.exposant == terme.exposant => {
                    dernier.coefficient = dernier.coefficient.wrapping_add(terme.coefficient);
                }
                _ => fusionnes.push(terme),
            }
        }
        fusionnes.retain(|t| t.coefficient != 0);
        self.termes = fusionnes;
    }

    /// Valeur en `x` : Σ coefficient·x^exposant, exposant déroulé en
    /// multiplications successives.
    pub fn evaluer(&self, x: i64) -> i64 {
        self.termes.iter().fold(0i64, |somme, terme| {
            let mut valeur = terme.coefficient;
            for _ in 0..terme.exposant {
                valeur = valeur.wrapping_mul(x);
            }
            somme.wrapping_add(valeur)
        })
    }

    /// Dérivée : (c·e, e−1) pour chaque exposant > 0 ; les constantes
    /// disparaissent.
    pub fn derivee(&self) -> Self {
        let termes = self
            .termes
            .iter()
            .filter(|t| t.exposant > 0)
            .map(|t| Terme::new(t.coefficient.wrapping_mul(i64::from(t.exposant)), t.exposant - 1))
            .collect();
        Self::depuis_termes(termes)
    }

    /// Forme standard `"n,c1,e1,…"` (ou `"0"`), relue par `analyser`.
    pub fn vers_chaine_standard(&self) -> String {
        chaine_standard(self)
    }

    /// Rendu LaTeX lisible.
    pub fn vers_latex(&self) -> String {
        chaine_latex(self)
    }
}

impl fmt::Display for Polynome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&chaine_standard(self))
    }
}

/* ------------------------ Algèbre ------------------------ */

impl Add for &Polynome {
    type Output = Polynome;

    fn add(self, autre: &Polynome) -> Polynome {
        let mut termes = Vec::with_capacity(self.termes.len() + autre.termes.len());
        termes.extend_from_slice(&self.termes);
        termes.extend_from_slice(&autre.termes);
        Polynome::depuis_termes(termes)
    }
}

impl Neg for &Polynome {
    type Output = Polynome;

    fn neg(self) -> Polynome {
        // La négation ne crée ni doublon ni zéro : l'invariant tient.
        Polynome {
            termes: self
                .termes
                .iter()
                .map(|t| Terme::new(t.coefficient.wrapping_neg(), t.exposant))
                .collect(),
        }
    }
}

impl Sub for &Polynome {
    type Output = Polynome;

    fn sub(self, autre: &Polynome) -> Polynome {
        self + &(-autre)
    }
}

impl Mul for &Polynome {
    type Output = Polynome;

    fn mul(self, autre: &Polynome) -> Polynome {
        // Distribution terme à terme, puis normalisation fusionne les
        // candidats (|p|·|q| avant fusion).
        let mut termes = Vec::with_capacity(self.termes.len() * autre.termes.len());
        for gauche in &self.termes {
            for droit in &autre.termes {
                termes.push(Terme::new(
                    gauche.coefficient.wrapping_mul(droit.coefficient),
                    gauche.exposant + droit.exposant,
                ));
            }
        }
        Polynome::depuis_termes(termes)
    }
}

impl Add for Polynome {
    type Output = Polynome;

    fn add(self, autre: Polynome) -> Polynome {
        &self + &autre
    }
}

impl Sub for Polynome {
    type Output = Polynome;

    fn sub(self, autre: Polynome) -> Polynome {
        &self - &autre
    }
}

impl Mul for Polynome {
    type Output = Polynome;

    fn mul(self, autre: Polynome) -> Polynome {
        &self * &autre
    }
}

impl Neg for Polynome {
    type Output = Polynome;

    fn neg(self) -> Polynome {
        -&self
    }
}

impl Zero for Polynome {
    fn zero() -> Self {
        Self::nul()
    }

    fn is_zero(&self) -> bool {
        self.est_nul()
    }
}

impl One for Polynome {
    fn one() -> Self {
        Self::depuis_termes(vec![Terme::new(1, 0)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(paires: &[(i64, u32)]) -> Polynome {
        Polynome::depuis_termes(paires.iter().map(|&(c, e)| Terme::new(c, e)).collect())
    }

    #[test]
    fn normalisation_trie_fusionne_purge() {
        // 3 + 2x + 5x (désordre, doublon) -> 7x + 3
        let p = poly(&[(3, 0), (2, 1), (5, 1)]);
        assert_eq!(p.termes(), &[Terme::new(7, 1), Terme::new(3, 0)]);

        // fusion qui s'annule : x - x -> polynôme nul
        let q = poly(&[(1, 1), (-1, 1)]);
        assert!(q.est_nul());
    }

    #[test]
    fn ajouter_terme_nul_sans_effet() {
        let mut p = poly(&[(2, 3), (1, 0)]);
        let avant = p.clone();
        p.ajouter_terme(Terme::new(0, 7));
        assert_eq!(p, avant);
    }

    #[test]
    fn addition_et_soustraction() {
        let p = poly(&[(2, 1), (3, 0)]); // 2x + 3
        let q = poly(&[(1, 1), (-3, 0)]); // x - 3
        assert_eq!(&p + &q, poly(&[(3, 1)]));
        assert_eq!(&p - &q, poly(&[(1, 1), (6, 0)]));
        assert_eq!(&p - &p, Polynome::nul());
    }

    #[test]
    fn multiplication_distribue() {
        // (x + 1)^2 = x^2 + 2x + 1
        let p = poly(&[(1, 1), (1, 0)]);
        assert_eq!(&p * &p, poly(&[(1, 2), (2, 1), (1, 0)]));

        // par le polynôme nul
        assert_eq!(&p * &Polynome::nul(), Polynome::nul());
    }

    #[test]
    fn evaluation_en_un_point() {
        // 2x^2 - 3x + 1 en x = 4 : 32 - 12 + 1 = 21
        let p = poly(&[(2, 2), (-3, 1), (1, 0)]);
        assert_eq!(p.evaluer(4), 21);
        assert_eq!(p.evaluer(0), 1);
        assert_eq!(Polynome::nul().evaluer(17), 0);
    }

    #[test]
    fn derivee_et_constantes() {
        // d/dx (3x^3 + 2x + 7) = 9x^2 + 2
        let p = poly(&[(3, 3), (2, 1), (7, 0)]);
        assert_eq!(p.derivee(), poly(&[(9, 2), (2, 0)]));
        assert!(poly(&[(5, 0)]).derivee().est_nul());
    }

    #[test]
    fn analyser_paires() {
        // "2,1,3,0" = 2x + 3
        assert_eq!(Polynome::analyser("2,1,3,0"), poly(&[(2, 1), (3, 0)]));
        // espaces tolérés
        assert_eq!(Polynome::analyser(" 2 , 1 , 3 , 0 "), poly(&[(2, 1), (3, 0)]));
        // les termes nuls de l'entrée disparaissent
        assert_eq!(Polynome::analyser("1,1,0,0"), poly(&[(1, 1)]));
    }

    #[test]
    fn analyser_forme_canonique() {
        // sortie standard relue telle quelle
        assert_eq!(Polynome::analyser("2,2,1,3,0"), poly(&[(2, 1), (3, 0)]));
        assert!(Polynome::analyser("0").est_nul());
    }

    #[test]
    fn analyser_indulgent_rend_nul() {
        assert!(Polynome::analyser("").est_nul());
        assert!(Polynome::analyser("abc").est_nul());
        // compte de tête faux
        assert!(Polynome::analyser("3,2,1,3,0").est_nul());
        // exposant négatif
        assert!(Polynome::analyser("2,-1").est_nul());
        // virgule traînante
        assert!(Polynome::analyser("1,2,").est_nul());
    }

    #[test]
    fn zero_et_un() {
        use num_traits::{One, Zero};
        assert!(Polynome::zero().is_zero());
        let p = poly(&[(4, 2), (-1, 0)]);
        assert_eq!(&p * &Polynome::one(), p);
        assert_eq!(&p + &Polynome::zero(), p);
    }
}
