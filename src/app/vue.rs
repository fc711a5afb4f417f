// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter évalue l'expression entière (quand le champ est focus)
// - Deux zones : expression entière (avec rejeu du journal des piles)
//   et atelier polynômes (définition, expression, dérivée, P(x))
//
// Tous les appels au noyau passent par les méthodes *_via_noyau :
// la vue ne manipule jamais les piles ni le registre directement.

use eframe::egui;

use crate::noyau::journal::{Operation, Trace};
use crate::noyau::registre::NOMS;

use super::etat::AppCalc;

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice Z-poly");
                ui.add_space(6.0);

                self.ui_expression(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_polynomes(ui);
            });
    }

    /* ------------------------ Zone expression entière ------------------------ */

    fn ui_expression(&mut self, ui: &mut egui::Ui) {
        ui.label("Expression entière :");

        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: 3+4*2, (1+2)*3, |-5|, 2^10")
                .id_source("entree_expr")
                .code_editor(),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // Enter évalue (seulement si le champ est focus).
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.has_focus() && enter {
            self.eval_via_noyau();
            self.focus_entree = true;
        }

        ui.add_space(6.0);

        ui.horizontal(|ui| {
            // Contrat: C = entrée seulement ; CLR = sorties seulement ; AC = tout
            self.bouton_action(ui, "C", "Efface seulement l'entrée", Action::ClearEntree);
            self.bouton_action(
                ui,
                "CLR",
                "Efface résultat + erreur + journal",
                Action::ClearResultats,
            );
            self.bouton_action(ui, "AC", "Remise à zéro totale (registre compris)", Action::ResetTotal);

            ui.add_space(10.0);

            let eq = ui.add_sized([64.0, 30.0], egui::Button::new("="));
            if eq.clicked() {
                self.eval_via_noyau();
                self.focus_entree = true;
            }
        });

        ui.add_space(6.0);

        ui.label("Résultat :");
        Self::champ_monospace(ui, "resultat_expr", &self.resultat, 1);

        if !self.erreur.is_empty() {
            ui.add_space(4.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }

        ui.add_space(6.0);

        egui::CollapsingHeader::new("Journal des piles")
            .default_open(false)
            .show(ui, |ui| {
                ui.monospace(format!(
                    "{} opérations nombres, {} opérations symboles",
                    self.evaluateur.nb_operations_nombres(),
                    self.evaluateur.nb_operations_symboles()
                ));
                Self::champ_monospace(ui, "journal_piles", &self.journal_texte, 8);
            });
    }

    /* ------------------------ Zone polynômes ------------------------ */

    fn ui_polynomes(&mut self, ui: &mut egui::Ui) {
        ui.label("Polynômes (a..e) :");

        ui.horizontal(|ui| {
            ui.label("Nom :");
            ui.add(
                egui::TextEdit::singleline(&mut self.nom_poly)
                    .desired_width(24.0)
                    .hint_text("a")
                    .id_source("nom_poly"),
            );

            ui.label("Définition :");
            ui.add(
                egui::TextEdit::singleline(&mut self.definition_poly)
                    .desired_width(ui.available_width())
                    .hint_text("c1,e1,c2,e2,…  (ex: 2,1,3,0 pour 2x + 3)")
                    .id_source("definition_poly")
                    .code_editor(),
            );
        });

        ui.horizontal(|ui| {
            if ui.add_sized([72.0, 28.0], egui::Button::new("Définir")).clicked() {
                self.definir_via_noyau();
            }
            if ui.add_sized([72.0, 28.0], egui::Button::new("Dériver")).clicked() {
                self.deriver_via_noyau();
            }

            ui.separator();

            ui.label("x =");
            ui.add(egui::DragValue::new(&mut self.x_eval).speed(1));
            if ui.add_sized([56.0, 28.0], egui::Button::new("P(x)")).clicked() {
                self.evaluer_en_x_via_noyau();
            }

            ui.separator();

            if ui
                .add_sized([96.0, 28.0], egui::Button::new("Tout effacer"))
                .on_hover_text("Vide les cinq emplacements du registre")
                .clicked()
            {
                self.registre.tout_effacer();
                self.clear_zone_poly();
            }
        });

        ui.horizontal(|ui| {
            ui.label("Expression :");
            ui.add(
                egui::TextEdit::singleline(&mut self.expr_poly)
                    .desired_width(ui.available_width() - 72.0)
                    .hint_text("a+b*c, (a-b)*c")
                    .id_source("expr_poly")
                    .code_editor(),
            );
            if ui.add_sized([56.0, 28.0], egui::Button::new("=")).clicked() {
                self.evaluer_expr_via_noyau();
            }
        });

        ui.add_space(6.0);

        ui.label("Sortie :");
        Self::champ_monospace(ui, "sortie_poly", &self.sortie_poly, 1);
        ui.label("LaTeX :");
        Self::champ_monospace(ui, "latex_poly", &self.latex_poly, 1);

        if !self.erreur_poly.is_empty() {
            ui.add_space(4.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur_poly);
        }

        ui.add_space(6.0);

        // Registre courant (ordre fixe a..e pour un affichage stable).
        egui::CollapsingHeader::new("Registre")
            .default_open(true)
            .show(ui, |ui| {
                if self.registre.noms().is_empty() {
                    ui.monospace("(aucun polynôme défini)");
                    return;
                }
                for nom in NOMS {
                    if !self.registre.existe(nom) {
                        continue;
                    }
                    if let Ok(polynome) = self.registre.obtenir(nom) {
                        ui.monospace(format!(
                            "{nom} : {}   [{}]   ({} termes)",
                            polynome.vers_latex(),
                            polynome.vers_chaine_standard(),
                            polynome.nb_termes()
                        ));
                    }
                }
            });
    }

    /* ------------------------ Appels noyau ------------------------ */

    /// Évalue l'expression entière puis dépose résultat + journal.
    fn eval_via_noyau(&mut self) {
        let s = self.entree.trim();
        if s.is_empty() {
            self.set_erreur("Entrée vide");
            self.journal_texte.clear();
            return;
        }

        match self.evaluateur.evaluer(s) {
            Ok(valeur) => self.set_resultat(valeur),
            Err(e) => self.set_erreur(e.to_string()),
        }
        self.journal_texte = Self::rejouer_journal(&self.evaluateur);
    }

    /// Rejeu textuel du journal de la dernière évaluation.
    fn rejouer_journal(evaluateur: &crate::noyau::Evaluateur) -> String {
        let mut sortie = String::new();
        for trace in evaluateur.chronologie() {
            let (instant, pile, sens, valeur) = match trace {
                Trace::Nombre(e) => (
                    e.instant,
                    "nombres",
                    sens_texte(e.operation),
                    e.valeur.to_string(),
                ),
                Trace::Symbole(e) => (
                    e.instant,
                    "symboles",
                    sens_texte(e.operation),
                    e.valeur.to_string(),
                ),
            };
            sortie.push_str(&format!("{instant:>4}  {pile:<8}  {sens:<7}  {valeur}\n"));
        }
        sortie
    }

    /// Le champ « Nom » doit contenir exactement un caractère.
    fn nom_choisi(&self) -> Result<char, String> {
        let nettoye = self.nom_poly.trim();
        let mut chars = nettoye.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err("Nom attendu : un caractère parmi a..e".to_string()),
        }
    }

    fn definir_via_noyau(&mut self) {
        let nom = match self.nom_choisi() {
            Ok(c) => c,
            Err(msg) => return self.set_erreur_poly(msg),
        };
        match self.registre.definir(nom, &self.definition_poly) {
            Ok(()) => match self.registre.obtenir(nom) {
                Ok(polynome) => {
                    self.set_sortie_poly(polynome.vers_chaine_standard(), polynome.vers_latex());
                }
                Err(e) => self.set_erreur_poly(e.to_string()),
            },
            Err(e) => self.set_erreur_poly(e.to_string()),
        }
    }

    fn deriver_via_noyau(&mut self) {
        let nom = match self.nom_choisi() {
            Ok(c) => c,
            Err(msg) => return self.set_erreur_poly(msg),
        };
        match self.registre.derivee_de(nom) {
            Ok(derivee) => {
                self.set_sortie_poly(derivee.vers_chaine_standard(), derivee.vers_latex());
            }
            Err(e) => self.set_erreur_poly(e.to_string()),
        }
    }

    fn evaluer_en_x_via_noyau(&mut self) {
        let nom = match self.nom_choisi() {
            Ok(c) => c,
            Err(msg) => return self.set_erreur_poly(msg),
        };
        match self.registre.evaluer_en(nom, self.x_eval) {
            Ok(valeur) => {
                let x = self.x_eval;
                self.set_sortie_poly(valeur.to_string(), format!("{nom}({x}) = {valeur}"));
            }
            Err(e) => self.set_erreur_poly(e.to_string()),
        }
    }

    fn evaluer_expr_via_noyau(&mut self) {
        match self.registre.evaluer_expression(&self.expr_poly) {
            Ok(polynome) => {
                self.set_sortie_poly(polynome.vers_chaine_standard(), polynome.vers_latex());
            }
            Err(e) => self.set_erreur_poly(e.to_string()),
        }
    }

    /* ------------------------ Helpers d'affichage ------------------------ */

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule « stable », sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ClearResultats => self.clear_resultats(),
                Action::ResetTotal => self.reset_total(),
            }
            self.focus_entree = true;
        }
    }
}

fn sens_texte(operation: Operation) -> &'static str {
    match operation {
        Operation::Empile => "empile",
        Operation::Depile => "dépile",
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ClearResultats,
    ResetTotal,
}
