//! Noyau — registre de polynômes nommés + évaluateur d'expressions
//!
//! Cinq emplacements fixes ('a'..='e'). Le registre est un état
//! partagé : chaque opération publique prend l'unique verrou pour
//! toute sa durée (et le relâche sur chaque sortie, erreurs comprises),
//! donc les appelants concurrents observent des opérations entières,
//! jamais un état intermédiaire.
//!
//! Les expressions (`a+b*c`, parenthèses) passent par le même schéma
//! deux-piles que l'évaluateur entier, en plus simple : '*' lie plus
//! fort que '+'/'-', '(' n'est retirée que par sa ')'.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use log::debug;

use super::erreurs::ErreurRegistre;
use super::pile::Pile;
use super::polynome::Polynome;

/// Noms admis, dans l'ordre ; la taille fixe le plafond du registre.
pub const NOMS: [char; 5] = ['a', 'b', 'c', 'd', 'e'];

pub fn nom_valide(nom: char) -> bool {
    ('a'..='e').contains(&nom)
}

/// Registre partagé de polynômes nommés.
#[derive(Default)]
pub struct Registre {
    polynomes: Mutex<HashMap<char, Polynome>>,
}

impl Registre {
    pub fn new() -> Self {
        Self::default()
    }

    /// Définit (ou redéfinit) un polynôme depuis sa forme texte.
    ///
    /// L'analyse est indulgente : une entrée mal formée définit le
    /// polynôme nul. Un 6e nom DISTINCT alors que les cinq
    /// emplacements sont pris est refusé ; une redéfinition passe
    /// toujours. Le plafond est contrôlé avant l'alphabet : registre
    /// plein, tout nom nouveau est de trop.
    pub fn definir(&self, nom: char, texte: &str) -> Result<(), ErreurRegistre> {
        let mut polynomes = self.verrou();
        if polynomes.len() >= NOMS.len() && !polynomes.contains_key(&nom) {
            return Err(ErreurRegistre::TropDePolynomes);
        }
        if !nom_valide(nom) {
            return Err(ErreurRegistre::NomInvalide(nom));
        }
        let polynome = Polynome::analyser(texte);
        debug!("definir('{nom}') <- {polynome}");
        polynomes.insert(nom, polynome);
        Ok(())
    }

    /// Copie profonde du polynôme nommé.
    pub fn obtenir(&self, nom: char) -> Result<Polynome, ErreurRegistre> {
        if !nom_valide(nom) {
            return Err(ErreurRegistre::NomInvalide(nom));
        }
        self.verrou()
            .get(&nom)
            .cloned()
            .ok_or(ErreurRegistre::PolynomeIntrouvable(nom))
    }

    pub fn existe(&self, nom: char) -> bool {
        nom_valide(nom) && self.verrou().contains_key(&nom)
    }

    pub fn nb_termes(&self, nom: char) -> Result<usize, ErreurRegistre> {
        Ok(self.obtenir(nom)?.nb_termes())
    }

    /// Valeur du polynôme nommé en `x`.
    pub fn evaluer_en(&self, nom: char, x: i64) -> Result<i64, ErreurRegistre> {
        Ok(self.obtenir(nom)?.evaluer(x))
    }

    /// Dérivée du polynôme nommé (le registre n'est pas modifié).
    pub fn derivee_de(&self, nom: char) -> Result<Polynome, ErreurRegistre> {
        Ok(self.obtenir(nom)?.derivee())
    }

    /// Vide d'un coup les cinq emplacements.
    pub fn tout_effacer(&self) {
        self.verrou().clear();
    }

    /// Noms actuellement définis, ordre non spécifié.
    pub fn noms(&self) -> Vec<char> {
        self.verrou().keys().copied().collect()
    }

    /// Évalue une expression sur les polynômes nommés
    /// (`+ - *`, parenthèses). Un seul passage sous le verrou couvre
    /// toute l'évaluation : les lectures sont cohérentes entre elles.
    pub fn evaluer_expression(&self, texte: &str) -> Result<Polynome, ErreurRegistre> {
        let polynomes = self.verrou();

        let expression: Vec<char> = texte.chars().filter(|c| !c.is_whitespace()).collect();
        if expression.is_empty() {
            return Err(ErreurRegistre::EntreeVide);
        }
        if let Some(&mauvais) = expression
            .iter()
            .find(|c| !nom_valide(**c) && !matches!(**c, '+' | '-' | '*' | '(' | ')'))
        {
            return Err(ErreurRegistre::CaractereInvalide(mauvais));
        }

        let mut operandes: Pile<Polynome> = Pile::avec_capacite(expression.len());
        let mut operateurs: Pile<char> = Pile::avec_capacite(expression.len());

        for &courant in &expression {
            if nom_valide(courant) {
                let polynome = polynomes
                    .get(&courant)
                    .cloned()
                    .ok_or(ErreurRegistre::PolynomeIntrouvable(courant))?;
                operandes.empiler(polynome);
            } else if matches!(courant, '+' | '-' | '*') {
                while let Ok(&sommet) = operateurs.sommet() {
                    if sommet == '(' {
                        break;
                    }
                    // '*' au sommet réduit toujours ; sinon seulement
                    // entre opérateurs additifs.
                    if sommet != '*' && courant == '*' {
                        break;
                    }
                    reduire(&mut operandes, &mut operateurs)?;
                }
                operateurs.empiler(courant);
            } else if courant == '(' {
                operateurs.empiler(courant);
            } else {
                // ')' : réduction jusqu'à la '(' correspondante.
                loop {
                    let sommet = match operateurs.sommet() {
                        Ok(&s) => s,
                        Err(_) => return Err(ErreurRegistre::ParentheseNonAppariee),
                    };
                    if sommet == '(' {
                        let _ = operateurs.depiler();
                        break;
                    }
                    reduire(&mut operandes, &mut operateurs)?;
                }
            }
        }

        while !operateurs.est_vide() {
            if matches!(operateurs.sommet(), Ok(&'(')) {
                return Err(ErreurRegistre::ParentheseNonAppariee);
            }
            reduire(&mut operandes, &mut operateurs)?;
        }

        if operandes.taille() != 1 {
            return Err(ErreurRegistre::ExpressionInvalide);
        }
        operandes
            .depiler()
            .map_err(|_| ErreurRegistre::ExpressionInvalide)
    }

    fn verrou(&self) -> MutexGuard<'_, HashMap<char, Polynome>> {
        // Même contrat que l'évaluateur entier : tolérant au poison.
        self.polynomes.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Une réduction binaire : opérateur du sommet + deux opérandes.
fn reduire(
    operandes: &mut Pile<Polynome>,
    operateurs: &mut Pile<char>,
) -> Result<(), ErreurRegistre> {
    if operandes.taille() < 2 {
        return Err(ErreurRegistre::ExpressionInvalide);
    }
    let operateur = operateurs
        .depiler()
        .map_err(|_| ErreurRegistre::ExpressionInvalide)?;
    let droit = operandes
        .depiler()
        .map_err(|_| ErreurRegistre::ExpressionInvalide)?;
    let gauche = operandes
        .depiler()
        .map_err(|_| ErreurRegistre::ExpressionInvalide)?;

    let resultat = match operateur {
        '+' => gauche + droit,
        '-' => gauche - droit,
        '*' => gauche * droit,
        _ => return Err(ErreurRegistre::ExpressionInvalide),
    };
    operandes.empiler(resultat);
    Ok(())
}
