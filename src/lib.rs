#![forbid(unsafe_code)]
//! Gardes — répartition des tours de garde par poste et par créneau (sans BD).
//!
//! - Contrôle d'historique : ni poste ni créneau répété sur les 3 dernières gardes.
//! - Priorité de rotation : jamais gardé, puis dernière garde la plus ancienne, puis nom.
//! - Remplissage automatique glouton d'une journée, déterministe.
//! - Historique recalculé en entier depuis le planning à chaque modification.
//! - Stockage fichier JSON, import/export CSV en dehors du cœur.

pub mod demo;
pub mod display;
pub mod history;
pub mod io;
pub mod layout;
pub mod model;
pub mod scheduler;
pub mod storage;

pub use history::PersonnelHistory;
pub use layout::{Layout, Post, TimeSlot};
pub use model::{Assignment, HistoryRecord, Location, Person, PersonId, Roster, Schedule};
pub use scheduler::{
    auto_fill, check_validity, is_available, AutoFill, Conflict, ConflictKind, Rejection,
    SchedError, Scheduler, Validity,
};
pub use storage::{JsonStorage, Storage};
