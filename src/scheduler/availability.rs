use crate::model::Person;
use chrono::NaiveDate;

/// Une personne peut-elle garder ce jour-là ?
///
/// Exemptée : jamais. Exemptée jusqu'à une date : disponible strictement après.
pub fn is_available(person: &Person, date: NaiveDate) -> bool {
    if person.is_exempt {
        return false;
    }
    match person.exempt_until {
        Some(until) => until < date,
        None => true,
    }
}
