use crate::history::PersonnelHistory;
use crate::model::Person;
use chrono::NaiveDate;
use std::cmp::Ordering;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Clé de tri d'un nom : lettres de base d'abord, puis accents, puis casse
/// (minuscules en premier).
///
/// Les lettres de l'alphabet vietnamien ont leur propre rang primaire :
/// a < ă < â, d < đ, e < ê, o < ô < ơ, u < ư. Les tons ne comptent qu'en
/// secondaire.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    primary: Vec<(char, u8)>,
    secondary: String,
    uppercase: Vec<bool>,
    raw: String,
}

impl CollationKey {
    pub fn new(name: &str) -> Self {
        let mut primary = Vec::with_capacity(name.len());
        let mut chars = name.nfd().peekable();
        while let Some(c) = chars.next() {
            if is_combining_mark(c) {
                continue;
            }
            // NFD range le point souscrit avant le circonflexe : on lit toutes les marques.
            let mut variant = 0;
            while let Some(mark) = chars.next_if(|m| is_combining_mark(*m)) {
                variant = variant.max(letter_variant(c, mark));
            }
            match c {
                'đ' | 'Đ' => primary.push(('d', 1)),
                _ => primary.extend(c.to_lowercase().map(|l| (l, variant))),
            }
        }
        Self {
            primary,
            secondary: name.nfd().flat_map(char::to_lowercase).collect(),
            uppercase: name.chars().map(char::is_uppercase).collect(),
            raw: name.to_owned(),
        }
    }
}

/// Rang d'une lettre modifiée (brève, circonflexe, corne) ; 0 pour les tons.
fn letter_variant(base: char, mark: char) -> u8 {
    match (base.to_ascii_lowercase(), mark) {
        ('a', '\u{306}') => 1,
        ('a' | 'e' | 'o', '\u{302}') => 2,
        ('o' | 'u', '\u{31B}') => 3,
        _ => 0,
    }
}

/// Personnes jamais de garde (`None`) d'abord, puis dernière garde la plus ancienne, puis nom.
fn priority_key(person: &Person, history: &PersonnelHistory) -> (Option<NaiveDate>, CollationKey) {
    (history.last_guarded(&person.id), CollationKey::new(&person.name))
}

/// Comparateur de rotation : ordre total et transitif.
pub fn compare(a: &Person, b: &Person, history: &PersonnelHistory) -> Ordering {
    priority_key(a, history).cmp(&priority_key(b, history))
}

/// Trie les personnes disponibles par priorité de rotation (tri stable).
pub fn rank<'a, I>(people: I, history: &PersonnelHistory) -> Vec<&'a Person>
where
    I: IntoIterator<Item = &'a Person>,
{
    let mut ranked: Vec<&Person> = people.into_iter().collect();
    ranked.sort_by_cached_key(|p| priority_key(p, history));
    ranked
}
