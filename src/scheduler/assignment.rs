use super::types::AutoFill;
use super::{availability, priority, validity};
use crate::history::PersonnelHistory;
use crate::layout::Layout;
use crate::model::{Assignment, Person};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Remplit gloutonnement les cases libres d'une journée.
///
/// Créneaux par id croissant, puis postes dans l'ordre déclaré. Pour chaque
/// case ouverte et libre, la première personne du vivier (trié une seule fois
/// par priorité) dont l'historique est compatible est retenue puis retirée du
/// vivier. Pas de retour arrière.
pub fn auto_fill(
    date: NaiveDate,
    day: &[Assignment],
    people: &[Person],
    history: &PersonnelHistory,
    layout: &Layout,
) -> AutoFill {
    let already: HashSet<_> = day.iter().filter_map(|a| a.person_id.as_ref()).collect();
    let mut pool = priority::rank(
        people
            .iter()
            .filter(|p| availability::is_available(p, date) && !already.contains(&p.id)),
        history,
    );

    let mut slots: Vec<u8> = layout.slots.iter().map(|s| s.id).collect();
    slots.sort_unstable();

    let mut filled: Vec<Assignment> = day.to_vec();
    let mut added = 0usize;

    for slot_id in slots {
        for post in &layout.posts {
            if pool.is_empty() {
                break;
            }
            if !post.offers(slot_id) {
                continue;
            }
            if filled.iter().any(|a| a.is_cell(post.location, slot_id)) {
                continue;
            }

            let chosen = pool.iter().position(|p| {
                validity::check_validity(history.records(&p.id), post.location, slot_id).is_valid()
            });

            match chosen {
                Some(idx) => {
                    let person = pool.remove(idx);
                    tracing::debug!(
                        %date,
                        location = post.location.code(),
                        slot_id,
                        person = person.id.as_str(),
                        "cell filled"
                    );
                    filled.push(Assignment::new(post.location, slot_id, person.id.clone()));
                    added += 1;
                }
                None => {
                    tracing::debug!(
                        %date,
                        location = post.location.code(),
                        slot_id,
                        "no valid candidate"
                    );
                }
            }
        }
    }

    if added == 0 {
        return AutoFill::NoProgress;
    }
    AutoFill::Filled {
        assignments: filled,
        added,
    }
}
