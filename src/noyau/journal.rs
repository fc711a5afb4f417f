// src/noyau/journal.rs
//
// Journal des opérations de piles — canal d'observation de la DERNIÈRE
// évaluation entière. Chaque empilement/dépilement des deux piles est
// noté avec un horodatage logique partagé, dans l'ordre chronologique.
//
// Le journal est croissant (Vec) : aucune entrée n'est perdue, quelle
// que soit la longueur de l'évaluation. Il n'influence jamais le
// résultat numérique.

/// Sens d'une opération de pile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Empile,
    Depile,
}

/// Une opération de pile horodatée.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evenement<T> {
    pub operation: Operation,
    pub valeur: T,
    /// Horodatage logique, commun aux deux piles.
    pub instant: u32,
}

/// Vue fusionnée (pile des nombres + pile des symboles), pour le rejeu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trace {
    Nombre(Evenement<i64>),
    Symbole(Evenement<char>),
}

#[derive(Debug, Clone, Default)]
pub struct Journal {
    nombres: Vec<Evenement<i64>>,
    symboles: Vec<Evenement<char>>,
    horloge: u32,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remise à zéro (début d'une nouvelle évaluation).
    pub fn vider(&mut self) {
        self.nombres.clear();
        self.symboles.clear();
        self.horloge = 0;
    }

    pub fn note_nombre(&mut self, operation: Operation, valeur: i64) {
        let instant = self.tic();
        self.nombres.push(Evenement {
            operation,
            valeur,
            instant,
        });
    }

    pub fn note_symbole(&mut self, operation: Operation, valeur: char) {
        let instant = self.tic();
        self.symboles.push(Evenement {
            operation,
            valeur,
            instant,
        });
    }

    fn tic(&mut self) -> u32 {
        let t = self.horloge;
        self.horloge = self.horloge.wrapping_add(1);
        t
    }

    pub fn nb_nombres(&self) -> usize {
        self.nombres.len()
    }

    pub fn nb_symboles(&self) -> usize {
        self.symboles.len()
    }

    pub fn nombre(&self, index: usize) -> Option<&Evenement<i64>> {
        self.nombres.get(index)
    }

    pub fn symbole(&self, index: usize) -> Option<&Evenement<char>> {
        self.symboles.get(index)
    }

    /// Les deux journaux fusionnés, triés par horodatage.
    pub fn chronologie(&self) -> Vec<Trace> {
        let mut tout: Vec<Trace> = self
            .nombres
            .iter()
            .copied()
            .map(Trace::Nombre)
            .chain(self.symboles.iter().copied().map(Trace::Symbole))
            .collect();
        tout.sort_by_key(|t| match t {
            Trace::Nombre(e) => e.instant,
            Trace::Symbole(e) => e.instant,
        });
        tout
    }
}
