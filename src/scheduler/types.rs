use crate::model::{Assignment, Location, PersonId};
use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

/// Motif de refus d'une garde : répétition récente.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    RecentLocation(Location),
    RecentSlot(u8),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::RecentLocation(loc) => write!(f, "recently guarded {}", loc.label()),
            Rejection::RecentSlot(slot) => write!(f, "recently guarded slot Ca {slot}"),
        }
    }
}

/// Résultat du contrôle d'historique.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    Valid,
    Invalid(Rejection),
}

impl Validity {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validity::Valid)
    }

    pub fn reason(&self) -> Option<Rejection> {
        match self {
            Validity::Valid => None,
            Validity::Invalid(r) => Some(*r),
        }
    }
}

/// Issue d'un remplissage automatique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoFill {
    /// Liste complète de la journée (existant + nouvelles affectations).
    Filled {
        assignments: Vec<Assignment>,
        added: usize,
    },
    /// Aucune case n'a pu être remplie : plus personne, ou personne de valide.
    NoProgress,
}

impl AutoFill {
    pub fn added(&self) -> usize {
        match self {
            AutoFill::Filled { added, .. } => *added,
            AutoFill::NoProgress => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictKind {
    DoubleBooking,     // même personne deux fois dans la journée
    DuplicateCell,     // deux affectations sur la même case
    ClosedCell,        // case non ouverte (démarrage tardif ou poste absent)
    UnknownSlot,       // créneau absent de la grille
    Unavailable,       // personne exemptée ce jour-là
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub location: Location,
    pub slot_id: u8,
    pub person: Option<PersonId>,
    pub kind: ConflictKind,
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("unknown person: {0}")]
    UnknownPerson(String),
    #[error("cell unavailable: {location} has no slot {slot_id}")]
    CellUnavailable { location: Location, slot_id: u8 },
    #[error("person {person} is not available on {date}")]
    Unavailable { person: String, date: NaiveDate },
    #[error("duplicate person id: {0}")]
    DuplicatePerson(String),
}
