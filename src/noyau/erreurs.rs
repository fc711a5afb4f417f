// src/noyau/erreurs.rs
//
// Erreurs classées des deux évaluateurs.
// Chaque échec est local à l'appel qui l'a produit : les piles sont
// remises à zéro en début d'évaluation, le registre reste cohérent.

use thiserror::Error;

/// Échecs de l'évaluateur d'expressions entières.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErreurEval {
    #[error("entrée vide")]
    EntreeVide,

    #[error("caractère invalide : '{0}'")]
    CaractereInvalide(char),

    #[error("opérateur inconnu : '{0}'")]
    OperateurInconnu(char),

    #[error("expression invalide")]
    ExpressionInvalide,

    #[error("aucun résultat")]
    AucunResultat,

    #[error("parenthèses ou barres non appariées")]
    ParentheseNonAppariee,

    #[error("division par zéro")]
    DivisionParZero,
}

/// Échecs du registre de polynômes et de son évaluateur d'expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErreurRegistre {
    #[error("entrée vide")]
    EntreeVide,

    #[error("nom de polynôme invalide : '{0}' (attendu : a..e)")]
    NomInvalide(char),

    #[error("polynôme '{0}' non défini")]
    PolynomeIntrouvable(char),

    #[error("trop de polynômes (maximum 5)")]
    TropDePolynomes,

    #[error("caractère invalide : '{0}'")]
    CaractereInvalide(char),

    #[error("expression invalide")]
    ExpressionInvalide,

    #[error("parenthèses non appariées")]
    ParentheseNonAppariee,
}
