//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler l'évaluateur entier sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - expressions bien formées par construction : la seule erreur
//!   admise est la division par zéro (elle fait partie du domaine)
//! - l'arithmétique est enroulante, donc aucune entrée générée ne
//!   doit faire paniquer le noyau

use std::time::{Duration, Instant};

use super::erreurs::ErreurEval;
use super::eval::Evaluateur;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d'expressions (bornée) ------------------------ */

fn gen_atome(rng: &mut Rng) -> String {
    // petits entiers, zéro inclus (utile pour la division par zéro)
    format!("{}", rng.pick(13))
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atome(rng);
    }

    match rng.pick(8) {
        0 => gen_atome(rng),
        1 => format!("({}+{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        2 => format!("({}-{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("({}*{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!("({}/{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        5 => format!("(-{})", gen_expr(rng, depth - 1)),
        6 => format!("|{}|", gen_atome(rng)), // barres non imbriquées
        _ => format!("({}^{})", gen_expr(rng, depth - 1), rng.pick(4)),
    }
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_erreurs_du_domaine() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);
    let evaluateur = Evaluateur::default();

    let mut seen_ok = 0usize;
    let mut seen_div = 0usize;

    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 5);

        match evaluateur.evaluer(&expr) {
            Ok(premier) => {
                // rejouer la même entrée doit redonner le même résultat
                assert_eq!(evaluateur.evaluer(&expr), Ok(premier), "expr={expr:?}");
                seen_ok += 1;
            }
            Err(ErreurEval::DivisionParZero) => {
                seen_div += 1;
            }
            Err(autre) => {
                panic!("erreur hors domaine: expr={expr:?} err={autre}");
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne « balaye » rien.
    assert!(seen_ok > 50, "trop peu de succès: {seen_ok}");
    assert!(seen_div > 0, "aucune division par zéro vue: fuzz trop « sage »");
}

#[test]
fn fuzz_safe_journal_coherent() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0xBADC0DE_u64);
    let evaluateur = Evaluateur::default();

    for _ in 0..60 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        if evaluateur.evaluer(&expr).is_err() {
            continue;
        }

        // Autant d'empilements que de dépilements sur la pile des
        // nombres : le résultat final est lui aussi extrait.
        use super::journal::{Operation, Trace};
        let chrono = evaluateur.chronologie();
        let (mut empiles, mut depiles) = (0usize, 0usize);
        for trace in &chrono {
            if let Trace::Nombre(e) = trace {
                match e.operation {
                    Operation::Empile => empiles += 1,
                    Operation::Depile => depiles += 1,
                }
            }
        }
        assert_eq!(empiles, depiles, "expr={expr:?}");
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let expr = somme_balancee("1", 800);
    budget(t0, max);

    let evaluateur = Evaluateur::default();
    assert_eq!(evaluateur.evaluer(&expr), Ok(800));
}

#[test]
fn fuzz_safe_chaine_plate_et_parentheses_profondes() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let evaluateur = Evaluateur::avec_capacite(4); // force les doublements

    // chaîne plate : la pile des symboles reste peu profonde
    let plate = vec!["1"; 2000].join("+");
    assert_eq!(evaluateur.evaluer(&plate), Ok(2000));
    budget(t0, max);

    // parenthèses profondes : la pile des symboles grandit vraiment
    let profonde = format!("{}7{}", "(".repeat(500), ")".repeat(500));
    assert_eq!(evaluateur.evaluer(&profonde), Ok(7));
    budget(t0, max);
}
