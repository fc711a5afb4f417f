//! Noyau — évaluateur d'expressions entières
//!
//! Balayage gauche-droite en une passe sur deux piles (nombres +
//! symboles), piloté par une relation « doit réduire » sur les PAIRES
//! (sommet, entrant) — pas une précédence entière : les barres de
//! valeur absolue et les parenthèses ne s'expriment pas ainsi.
//!
//! Opérateurs : + - * / ^, parenthèses ( ), barres | |.
//! Division entière tronquée, ^ par multiplications successives.
//! Arithmétique i64 enroulante (sémantique machine de l'hôte).

use std::sync::Mutex;

use log::debug;

use super::erreurs::ErreurEval;
use super::journal::{Evenement, Journal, Operation, Trace};
use super::pile::Pile;

/// Capacité initiale des piles si l'appelant n'en impose pas.
pub const CAPACITE_DEFAUT: usize = 64;

/// Évaluateur d'expressions entières.
///
/// Les piles et le journal sont partagés entre les appels et protégés
/// par un unique verrou : chaque évaluation est vue comme un tout par
/// les appelants concurrents, erreurs comprises.
pub struct Evaluateur {
    etat: Mutex<Etat>,
}

struct Etat {
    nombres: Pile<i64>,
    symboles: Pile<char>,
    journal: Journal,
}

impl Evaluateur {
    /// Piles pré-allouées à `capacite` (doublement ensuite).
    pub fn avec_capacite(capacite: usize) -> Self {
        Self {
            etat: Mutex::new(Etat {
                nombres: Pile::avec_capacite(capacite),
                symboles: Pile::avec_capacite(capacite),
                journal: Journal::new(),
            }),
        }
    }

    /// Évalue une expression entière.
    ///
    /// Les piles sont remises à zéro en entrée : un appel échoué ne
    /// peut pas corrompre le suivant.
    pub fn evaluer(&self, texte: &str) -> Result<i64, ErreurEval> {
        let mut etat = self.verrou();
        let resultat = etat.evaluer(texte);
        debug!("evaluer({texte:?}) -> {resultat:?}");
        resultat
    }

    /* ---------------- Journal de la dernière évaluation ---------------- */

    pub fn nb_operations_nombres(&self) -> usize {
        self.verrou().journal.nb_nombres()
    }

    pub fn nb_operations_symboles(&self) -> usize {
        self.verrou().journal.nb_symboles()
    }

    pub fn operation_nombre(&self, index: usize) -> Option<Evenement<i64>> {
        self.verrou().journal.nombre(index).copied()
    }

    pub fn operation_symbole(&self, index: usize) -> Option<Evenement<char>> {
        self.verrou().journal.symbole(index).copied()
    }

    /// Rejeu chronologique complet (les deux piles fusionnées).
    pub fn chronologie(&self) -> Vec<Trace> {
        self.verrou().journal.chronologie()
    }

    fn verrou(&self) -> std::sync::MutexGuard<'_, Etat> {
        // Le noyau ne panique pas sous le verrou ; un test qui panique
        // ne doit pas condamner le sous-système pour autant.
        self.etat.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for Evaluateur {
    fn default() -> Self {
        Self::avec_capacite(CAPACITE_DEFAUT)
    }
}

impl Etat {
    fn evaluer(&mut self, texte: &str) -> Result<i64, ErreurEval> {
        self.nombres.vider();
        self.symboles.vider();
        self.journal.vider();

        let expression: Vec<char> = texte.chars().filter(|c| !c.is_whitespace()).collect();
        if expression.is_empty() {
            return Err(ErreurEval::EntreeVide);
        }
        if let Some(&mauvais) = expression
            .iter()
            .find(|c| !c.is_ascii_digit() && !est_symbole(**c))
        {
            return Err(ErreurEval::CaractereInvalide(mauvais));
        }

        // Une seule barre ouverte à la fois (pas d'imbrication).
        let mut barre_ouverte = false;
        // Vrai après un nombre, un ')' apparié ou une barre fermée :
        // sert à reconnaître le moins en tête de groupe.
        let mut valeur_precede = false;
        let mut precedent: Option<char> = None;

        let mut i = 0;
        while i < expression.len() {
            let courant = expression[i];

            // Nombres : consommation gloutonne de la suite de chiffres.
            if courant.is_ascii_digit() {
                let debut = i;
                while i < expression.len() && expression[i].is_ascii_digit() {
                    i += 1;
                }
                let chiffres: String = expression[debut..i].iter().collect();
                let nombre: i64 = chiffres
                    .parse()
                    .map_err(|_| ErreurEval::ExpressionInvalide)?;
                self.empiler_nombre(nombre);
                valeur_precede = true;
                precedent = Some(expression[i - 1]);
                continue;
            }

            // Moins en tête de groupe : -x ≡ 0 - x (zéro synthétique).
            // Ailleurs, un '-' sans opérande garde son erreur.
            if courant == '-'
                && !valeur_precede
                && matches!(precedent, None | Some('(') | Some('|'))
            {
                self.empiler_nombre(0);
            }

            let mut consomme = false;
            loop {
                let sommet = match self.symboles.sommet() {
                    Ok(s) => *s,
                    Err(_) => break,
                };

                // Première barre : ouverture d'un groupe |…|, aucune
                // réduction ne se déclenche contre elle.
                if courant == '|' && !barre_ouverte {
                    break;
                }

                // Incompatibilités parenthèse/barre.
                if (sommet == '(' && courant == '|')
                    || (sommet == ')' && courant == '|')
                    || (sommet == '|' && courant == ')')
                {
                    return Err(ErreurEval::ParentheseNonAppariee);
                }

                if !doit_reduire(sommet, courant) {
                    break;
                }

                // '(' est consommée par ')', jamais calculée.
                if sommet == '(' && courant == ')' {
                    self.depiler_symbole()?;
                    consomme = true;
                    break;
                }

                // Fermeture |…| : transformation unaire du sommet,
                // pas une réduction binaire.
                if sommet == '|' && courant == '|' {
                    let valeur = self.depiler_nombre()?;
                    self.empiler_nombre(valeur.wrapping_abs());
                    self.depiler_symbole()?;
                    barre_ouverte = false;
                    consomme = true;
                    break;
                }

                self.reduction_binaire()?;
            }

            if !consomme {
                if courant == '|' {
                    barre_ouverte = true;
                }
                self.empiler_symbole(courant);
            }

            valeur_precede = consomme;
            precedent = Some(courant);
            i += 1;
        }

        // Vidange finale de la pile des symboles.
        while let Ok(&sommet) = self.symboles.sommet() {
            if matches!(sommet, '(' | '|') {
                return Err(ErreurEval::ParentheseNonAppariee);
            }
            self.reduction_binaire()?;
        }

        if self.nombres.est_vide() {
            return Err(ErreurEval::AucunResultat);
        }
        let resultat = self.depiler_nombre()?;
        if !self.nombres.est_vide() {
            return Err(ErreurEval::ExpressionInvalide);
        }
        Ok(resultat)
    }

    /// Dépile l'opérateur du sommet et ses deux opérandes, calcule,
    /// rempile le résultat.
    fn reduction_binaire(&mut self) -> Result<(), ErreurEval> {
        if self.nombres.taille() < 2 {
            return Err(ErreurEval::ExpressionInvalide);
        }
        let operateur = *self
            .symboles
            .sommet()
            .map_err(|_| ErreurEval::ExpressionInvalide)?;

        // a = dépilé en premier = opérande droit ; b = gauche.
        let a = self.depiler_nombre()?;
        let b = self.depiler_nombre()?;
        let resultat = calculer(operateur, a, b)?;
        self.empiler_nombre(resultat);
        self.depiler_symbole()?;
        Ok(())
    }

    /* ------------- Accès piles, journalisés systématiquement ------------- */

    fn empiler_nombre(&mut self, valeur: i64) {
        self.nombres.empiler(valeur);
        self.journal.note_nombre(Operation::Empile, valeur);
    }

    fn depiler_nombre(&mut self) -> Result<i64, ErreurEval> {
        let valeur = self
            .nombres
            .depiler()
            .map_err(|_| ErreurEval::ExpressionInvalide)?;
        self.journal.note_nombre(Operation::Depile, valeur);
        Ok(valeur)
    }

    fn empiler_symbole(&mut self, symbole: char) {
        self.symboles.empiler(symbole);
        self.journal.note_symbole(Operation::Empile, symbole);
    }

    fn depiler_symbole(&mut self) -> Result<char, ErreurEval> {
        let symbole = self
            .symboles
            .depiler()
            .map_err(|_| ErreurEval::ExpressionInvalide)?;
        self.journal.note_symbole(Operation::Depile, symbole);
        Ok(symbole)
    }
}

/* ------------------------ Relation de réduction ------------------------ */

fn est_symbole(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '^' | '(' | ')' | '|')
}

/// Relation « doit réduire » sur les paires (sommet, entrant).
fn doit_reduire(sommet: char, courant: char) -> bool {
    match sommet {
        '+' | '-' => matches!(courant, '+' | '-' | ')' | '|'),
        '*' | '/' => matches!(courant, '*' | '/' | '+' | '-' | ')' | '|'),
        '^' => matches!(courant, '+' | '-' | '*' | '/' | '^' | ')' | '|'),
        '(' => courant == ')',
        '|' => courant == '|',
        _ => false,
    }
}

/// Calcule `b <op> a` (a dépilé en premier = opérande droit).
fn calculer(operateur: char, a: i64, b: i64) -> Result<i64, ErreurEval> {
    match operateur {
        '+' => Ok(b.wrapping_add(a)),
        '-' => Ok(b.wrapping_sub(a)),
        '*' => Ok(b.wrapping_mul(a)),
        '/' => {
            if a == 0 {
                return Err(ErreurEval::DivisionParZero);
            }
            Ok(b.wrapping_div(a))
        }
        '^' => Ok(puissance(b, a)),
        autre => Err(ErreurEval::OperateurInconnu(autre)),
    }
}

/// `base^exposant` par multiplications successives depuis 1.
/// Un exposant négatif n'exécute aucune itération et rend 1
/// (comportement hérité, voir DESIGN.md).
fn puissance(base: i64, exposant: i64) -> i64 {
    let mut resultat: i64 = 1;
    let mut i: i64 = 0;
    while i < exposant {
        resultat = resultat.wrapping_mul(base);
        i += 1;
    }
    resultat
}
