//! src/app/etat.rs
//!
//! État UI + noyau possédé.
//!
//! Rôle : contenir l'état de la calculatrice (entrées, sorties,
//! erreurs) et le noyau (évaluateur + registre, possédés ici — pas de
//! globals) ; offrir des opérations simples (C/CLR/AC) sans logique
//! d'affichage.
//!
//! Contrats (version UI) :
//! - Aucune évaluation ici (les appels au noyau vivent dans vue.rs).
//! - Actions déterministes, sans effet de bord caché.

use crate::noyau::{Evaluateur, Registre};

/// Point d'évaluation par défaut pour P(x).
const X_DEFAUT: i64 = 1;

pub struct AppCalc {
    // --- noyau (possédé par l'application) ---
    pub evaluateur: Evaluateur,
    pub registre: Registre,

    // --- zone expression entière ---
    pub entree: String,
    pub resultat: String,
    pub erreur: String,
    pub journal_texte: String, // rejeu de la dernière évaluation

    // --- zone polynômes ---
    pub nom_poly: String,        // un caractère a..e
    pub definition_poly: String, // "c1,e1,c2,e2,…"
    pub expr_poly: String,       // ex. "a+b*c"
    pub sortie_poly: String,     // forme standard
    pub latex_poly: String,      // rendu LaTeX
    pub erreur_poly: String,
    pub x_eval: i64,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l'entrée après un clic.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            evaluateur: Evaluateur::default(),
            registre: Registre::new(),
            entree: String::new(),
            resultat: String::new(),
            erreur: String::new(),
            journal_texte: String::new(),
            nom_poly: String::new(),
            definition_poly: String::new(),
            expr_poly: String::new(),
            sortie_poly: String::new(),
            latex_poly: String::new(),
            erreur_poly: String::new(),
            x_eval: X_DEFAUT,
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions « boutons » (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrées + sorties + registre).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.clear_zone_poly();
        self.registre.tout_effacer();
        self.x_eval = X_DEFAUT;
        self.focus_entree = true;
    }

    /// C : effacer seulement l'entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer résultats + erreur + journal (sans toucher à l'entrée).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.erreur.clear();
        self.journal_texte.clear();
        self.focus_entree = true;
    }

    /// Efface les champs et sorties de la zone polynômes
    /// (le registre lui-même n'est pas touché).
    pub fn clear_zone_poly(&mut self) {
        self.nom_poly.clear();
        self.definition_poly.clear();
        self.expr_poly.clear();
        self.sortie_poly.clear();
        self.latex_poly.clear();
        self.erreur_poly.clear();
    }

    /* ------------------------ Dépôt des sorties ------------------------ */

    /// Erreur de la zone expression.
    ///
    /// Choix UX : on CONSERVE `resultat` (dernier résultat) pour ne pas
    /// « effacer l'écran » sur une faute ; le journal, lui, décrit une
    /// évaluation échouée et reste affichable tel quel.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.focus_entree = true;
    }

    pub fn set_resultat(&mut self, valeur: i64) {
        self.erreur.clear();
        self.resultat = valeur.to_string();
        self.focus_entree = true;
    }

    /// Erreur de la zone polynômes.
    pub fn set_erreur_poly(&mut self, msg: impl Into<String>) {
        self.erreur_poly = msg.into();
        self.sortie_poly.clear();
        self.latex_poly.clear();
    }

    /// Sortie de la zone polynômes (forme standard + LaTeX).
    pub fn set_sortie_poly(&mut self, standard: impl Into<String>, latex: impl Into<String>) {
        self.erreur_poly.clear();
        self.sortie_poly = standard.into();
        self.latex_poly = latex.into();
    }
}
