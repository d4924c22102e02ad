//! Historique des gardes par personne, reconstruit depuis le planning.
//!
//! L'historique n'est jamais édité : il est recalculé en entier à chaque
//! changement du planning, ce qui garantit l'absence d'entrées périmées.

use crate::model::{HistoryRecord, PersonId, Schedule};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

/// Enregistrements par personne, du plus récent au plus ancien.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersonnelHistory(BTreeMap<PersonId, Vec<HistoryRecord>>);

impl PersonnelHistory {
    /// Recalcule l'historique complet. Les dates sont parcourues en ordre
    /// croissant et chaque garde est insérée en tête.
    pub fn rebuild(schedule: &Schedule) -> Self {
        let mut index: BTreeMap<PersonId, VecDeque<HistoryRecord>> = BTreeMap::new();
        for (date, assignments) in schedule {
            for assignment in assignments {
                let Some(person) = assignment.person_id.as_ref() else {
                    continue;
                };
                index.entry(person.clone()).or_default().push_front(HistoryRecord {
                    date: *date,
                    location: assignment.location,
                    slot_id: assignment.slot_id,
                });
            }
        }
        Self(index.into_iter().map(|(k, v)| (k, Vec::from(v))).collect())
    }

    /// Gardes d'une personne ; vide si elle n'a jamais gardé.
    pub fn records(&self, person: &PersonId) -> &[HistoryRecord] {
        self.0.get(person).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn last_guarded(&self, person: &PersonId) -> Option<NaiveDate> {
        self.records(person).first().map(|r| r.date)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PersonId, &[HistoryRecord])> {
        self.0.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(PersonId, Vec<HistoryRecord>)> for PersonnelHistory {
    fn from_iter<T: IntoIterator<Item = (PersonId, Vec<HistoryRecord>)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
