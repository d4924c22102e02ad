use super::{availability, Conflict, ConflictKind};
use crate::layout::Layout;
use crate::model::{Assignment, Person};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Contrôle les invariants d'une journée stockée.
///
/// Une exemption posée après coup fait apparaître `Unavailable`.
pub(super) fn audit_day(
    date: NaiveDate,
    day: &[Assignment],
    people: &[Person],
    layout: &Layout,
) -> Vec<Conflict> {
    let mut out = Vec::new();
    let mut cells = HashSet::new();
    let mut seen = HashSet::new();

    for a in day {
        let mut report = |kind| {
            out.push(Conflict {
                location: a.location,
                slot_id: a.slot_id,
                person: a.person_id.clone(),
                kind,
            })
        };

        if layout.slot(a.slot_id).is_none() {
            report(ConflictKind::UnknownSlot);
        } else if !layout.offers(a.location, a.slot_id) {
            report(ConflictKind::ClosedCell);
        }
        if !cells.insert((a.location, a.slot_id)) {
            report(ConflictKind::DuplicateCell);
        }
        if let Some(person) = a.person_id.as_ref() {
            if !seen.insert(person) {
                report(ConflictKind::DoubleBooking);
            }
            let exempt = people
                .iter()
                .find(|p| &p.id == person)
                .is_some_and(|p| !availability::is_available(p, date));
            if exempt {
                report(ConflictKind::Unavailable);
            }
        }
    }

    out
}
