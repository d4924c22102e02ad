use super::SchedError;
use crate::layout::Layout;
use crate::model::{Assignment, Location, PersonId};

/// Dépose une personne sur une case, sans contrôle d'historique.
///
/// La personne quitte sa case éventuelle du jour et l'occupant de la case
/// cible est retiré. Seule une case inexistante est refusée.
pub(super) fn place(
    day: &[Assignment],
    layout: &Layout,
    person: &PersonId,
    location: Location,
    slot_id: u8,
) -> Result<Vec<Assignment>, SchedError> {
    if !layout.offers(location, slot_id) {
        return Err(SchedError::CellUnavailable { location, slot_id });
    }

    let mut out: Vec<Assignment> = day
        .iter()
        .filter(|a| a.person_id.as_ref() != Some(person) && !a.is_cell(location, slot_id))
        .cloned()
        .collect();
    out.push(Assignment::new(location, slot_id, person.clone()));
    Ok(out)
}

/// Vide une case ; sans effet si elle l'est déjà.
pub(super) fn remove(day: &[Assignment], location: Location, slot_id: u8) -> Vec<Assignment> {
    day.iter()
        .filter(|a| !a.is_cell(location, slot_id))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(s: &str) -> PersonId {
        PersonId::new(s)
    }

    #[test]
    fn place_moves_person_and_evicts_occupant() {
        let layout = Layout::default();
        let day = vec![
            Assignment::new(Location::V61, 1, pid("a")),
            Assignment::new(Location::V62, 4, pid("b")),
            Assignment::new(Location::Dn1, 5, pid("c")),
        ];
        let out = place(&day, &layout, &pid("a"), Location::V62, 4).unwrap();
        assert_eq!(
            out,
            vec![
                Assignment::new(Location::Dn1, 5, pid("c")),
                Assignment::new(Location::V62, 4, pid("a")),
            ]
        );
    }

    #[test]
    fn place_refuses_closed_cells() {
        let layout = Layout::default();
        let err = place(&[], &layout, &pid("a"), Location::Dn3, 1).unwrap_err();
        assert!(matches!(
            err,
            SchedError::CellUnavailable {
                location: Location::Dn3,
                slot_id: 1
            }
        ));
        assert!(place(&[], &layout, &pid("a"), Location::V61, 0).is_err());
    }

    #[test]
    fn remove_clears_only_the_cell() {
        let day = vec![
            Assignment::new(Location::V61, 1, pid("a")),
            Assignment::new(Location::V61, 2, pid("b")),
        ];
        let out = remove(&day, Location::V61, 1);
        assert_eq!(out, vec![Assignment::new(Location::V61, 2, pid("b"))]);
        assert_eq!(remove(&out, Location::V61, 1), out);
    }
}
