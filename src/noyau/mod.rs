//! Noyau entier Z-poly
//!
//! Organisation interne :
//! - pile.rs     : pile LIFO générique (capacité doublée)
//! - erreurs.rs  : erreurs classées des deux évaluateurs
//! - journal.rs  : journal des opérations de piles (dernière évaluation)
//! - eval.rs     : évaluateur d'expressions entières (deux piles)
//! - polynome.rs : polynômes creux normalisés + algèbre
//! - format.rs   : rendu standard + LaTeX
//! - registre.rs : registre nommé (a..e) + expressions polynomiales

pub mod erreurs;
pub mod eval;
pub mod format;
pub mod journal;
pub mod pile;
pub mod polynome;
pub mod registre;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreurs::{ErreurEval, ErreurRegistre};
pub use eval::Evaluateur;
pub use polynome::{Polynome, Terme};
pub use registre::Registre;
