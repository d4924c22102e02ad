mod assignment;
mod conflicts;
mod mutate;
mod types;

pub mod availability;
pub mod priority;
pub mod validity;

pub use assignment::auto_fill;
pub use availability::is_available;
pub use types::{AutoFill, Conflict, ConflictKind, Rejection, SchedError, Validity};
pub use validity::check_validity;

use crate::history::PersonnelHistory;
use crate::layout::Layout;
use crate::model::{Assignment, HistoryRecord, Location, Person, PersonId, Roster};
use chrono::NaiveDate;

/// Scheduler : détient le Roster et l'historique qui en dérive.
///
/// Toute mutation du planning passe par ici et reconstruit l'historique.
#[derive(Debug, Default)]
pub struct Scheduler {
    roster: Roster,
    layout: Layout,
    history: PersonnelHistory,
}

impl Scheduler {
    pub fn with_roster(roster: Roster, layout: Layout) -> Self {
        let history = PersonnelHistory::rebuild(&roster.schedule);
        Self {
            roster,
            layout,
            history,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }
    pub fn layout(&self) -> &Layout {
        &self.layout
    }
    pub fn history(&self) -> &PersonnelHistory {
        &self.history
    }

    pub fn day(&self, date: NaiveDate) -> &[Assignment] {
        self.roster.day(date)
    }

    pub fn last_guarded(&self, person: &PersonId) -> Option<NaiveDate> {
        self.history.last_guarded(person)
    }

    fn refresh_history(&mut self) {
        self.history = PersonnelHistory::rebuild(&self.roster.schedule);
    }

    /// Ajoute des personnes ; refuse tout id déjà présent, sans rien ajouter.
    pub fn add_people(&mut self, people: Vec<Person>) -> Result<(), SchedError> {
        for (i, p) in people.iter().enumerate() {
            let taken = self.roster.find_person_by_id(&p.id).is_some()
                || people[..i].iter().any(|q| q.id == p.id);
            if taken {
                return Err(SchedError::DuplicatePerson(p.id.to_string()));
            }
        }
        self.roster.people.extend(people);
        Ok(())
    }

    /// Modifie une fiche (exemptions, nom) sans toucher au planning.
    pub fn update_person(&mut self, person: Person) -> Result<(), SchedError> {
        let slot = self
            .roster
            .find_person_mut_by_id(&person.id)
            .ok_or_else(|| SchedError::UnknownPerson(person.id.to_string()))?;
        *slot = person;
        Ok(())
    }

    /// Remplace toute la liste : les identifiants changent, le planning est effacé.
    pub fn replace_people(&mut self, people: Vec<Person>) {
        tracing::info!(count = people.len(), "personnel replaced, schedule cleared");
        self.roster.people = people;
        self.roster.schedule.clear();
        self.refresh_history();
    }

    /// Retire une personne et toutes ses gardes.
    pub fn remove_person(&mut self, person: &PersonId) -> Result<Person, SchedError> {
        let pos = self
            .roster
            .people
            .iter()
            .position(|p| &p.id == person)
            .ok_or_else(|| SchedError::UnknownPerson(person.to_string()))?;
        let removed = self.roster.people.remove(pos);
        for day in self.roster.schedule.values_mut() {
            day.retain(|a| a.person_id.as_ref() != Some(person));
        }
        self.roster.schedule.retain(|_, day| !day.is_empty());
        self.refresh_history();
        Ok(removed)
    }

    /// Remplace atomiquement la liste d'une journée.
    pub fn replace_day(&mut self, date: NaiveDate, assignments: Vec<Assignment>) {
        if assignments.is_empty() {
            self.roster.schedule.remove(&date);
        } else {
            self.roster.schedule.insert(date, assignments);
        }
        self.refresh_history();
    }

    pub fn clear_day(&mut self, date: NaiveDate) {
        self.replace_day(date, Vec::new());
    }

    /// Affectation manuelle d'une personne disponible ce jour-là.
    ///
    /// L'historique n'est pas bloquant : le motif de refus éventuel est
    /// renvoyé pour information. Il est calculé sans les gardes du jour même,
    /// que le dépôt remplace.
    pub fn place(
        &mut self,
        date: NaiveDate,
        person: &PersonId,
        location: Location,
        slot_id: u8,
    ) -> Result<Option<Rejection>, SchedError> {
        let p = self
            .roster
            .find_person_by_id(person)
            .ok_or_else(|| SchedError::UnknownPerson(person.to_string()))?;
        if !is_available(p, date) {
            return Err(SchedError::Unavailable {
                person: person.to_string(),
                date,
            });
        }
        let earlier: Vec<HistoryRecord> = self
            .history
            .records(person)
            .iter()
            .filter(|r| r.date != date)
            .cloned()
            .collect();
        let warning = check_validity(&earlier, location, slot_id).reason();
        if let Some(reason) = warning {
            tracing::warn!(%date, person = person.as_str(), %reason, "manual override");
        }
        let day = mutate::place(self.day(date), &self.layout, person, location, slot_id)?;
        self.replace_day(date, day);
        Ok(warning)
    }

    pub fn remove(&mut self, date: NaiveDate, location: Location, slot_id: u8) {
        let day = mutate::remove(self.day(date), location, slot_id);
        self.replace_day(date, day);
    }

    /// Remplissage automatique de la journée ; le résultat est installé s'il y a progrès.
    pub fn auto_schedule(&mut self, date: NaiveDate) -> AutoFill {
        let outcome = auto_fill(
            date,
            self.day(date),
            &self.roster.people,
            &self.history,
            &self.layout,
        );
        match &outcome {
            AutoFill::Filled { assignments, added } => {
                tracing::info!(%date, added, "auto schedule");
                self.replace_day(date, assignments.clone());
            }
            AutoFill::NoProgress => {
                tracing::info!(%date, "auto schedule: no eligible person for any open slot");
            }
        }
        outcome
    }

    /// Personnes disponibles et pas encore affectées ce jour, par priorité.
    pub fn waiting_list(&self, date: NaiveDate) -> Vec<&Person> {
        let day = self.day(date);
        priority::rank(
            self.roster.people.iter().filter(|p| {
                is_available(p, date) && !day.iter().any(|a| a.person_id.as_ref() == Some(&p.id))
            }),
            &self.history,
        )
    }

    pub fn audit_day(&self, date: NaiveDate) -> Vec<Conflict> {
        conflicts::audit_day(date, self.day(date), &self.roster.people, &self.layout)
    }

    /// Contrôle toutes les journées du planning.
    pub fn audit(&self) -> Vec<(NaiveDate, Conflict)> {
        self.roster
            .schedule
            .iter()
            .flat_map(|(date, day)| {
                conflicts::audit_day(*date, day, &self.roster.people, &self.layout)
                    .into_iter()
                    .map(move |c| (*date, c))
            })
            .collect()
    }
}
