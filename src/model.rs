use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Identifiant fort pour Person
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PersonId(String);

impl PersonId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Personne de garde
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    /// Exempté de façon permanente.
    #[serde(default)]
    pub is_exempt: bool,
    /// Exempté jusqu'à cette date incluse.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exempt_until: Option<NaiveDate>,
}

impl Person {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self::with_id(PersonId::random(), name)
    }

    pub fn with_id<N: Into<String>>(id: PersonId, name: N) -> Self {
        Self {
            id,
            name: name.into(),
            is_exempt: false,
            exempt_until: None,
        }
    }
}

/// Poste de garde
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Location {
    V61,
    V62,
    Dn1,
    Dn3,
}

impl Location {
    /// Ordre déclaré des postes.
    pub const ALL: [Location; 4] = [Location::V61, Location::V62, Location::Dn1, Location::Dn3];

    pub fn label(self) -> &'static str {
        match self {
            Location::V61 => "Vọng gác 61",
            Location::V62 => "Vọng gác 62",
            Location::Dn1 => "Đơn nguyên 1",
            Location::Dn3 => "Đơn nguyên 3",
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Location::V61 => "V61",
            Location::V62 => "V62",
            Location::Dn1 => "DN1",
            Location::Dn3 => "DN3",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Location {
    type Err = String;

    /// Accepte le code court (`V61`, `dn1`…) ou le libellé complet.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Location::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(s) || l.label() == s)
            .ok_or_else(|| format!("unknown location: {s}"))
    }
}

/// Affectation d'une case (poste, créneau) pour une journée.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub location: Location,
    pub slot_id: u8,
    pub person_id: Option<PersonId>,
}

impl Assignment {
    pub fn new(location: Location, slot_id: u8, person_id: PersonId) -> Self {
        Self {
            location,
            slot_id,
            person_id: Some(person_id),
        }
    }

    pub fn is_cell(&self, location: Location, slot_id: u8) -> bool {
        self.location == location && self.slot_id == slot_id
    }
}

/// Une garde passée ou planifiée d'une personne.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub date: NaiveDate,
    pub location: Location,
    pub slot_id: u8,
}

/// Planning complet : une liste d'affectations par date.
pub type Schedule = BTreeMap<NaiveDate, Vec<Assignment>>;

/// Roster complet (état persisté)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Roster {
    pub people: Vec<Person>,
    #[serde(default)]
    pub schedule: Schedule,
}

impl Roster {
    pub fn find_person_by_id<'a>(&'a self, id: &PersonId) -> Option<&'a Person> {
        self.people.iter().find(|p| &p.id == id)
    }
    pub fn find_person_mut_by_id(&mut self, id: &PersonId) -> Option<&mut Person> {
        self.people.iter_mut().find(|p| &p.id == id)
    }
    pub fn find_person_by_name<'a>(&'a self, name: &str) -> Option<&'a Person> {
        self.people.iter().find(|p| p.name == name)
    }

    /// Résout un identifiant ou, à défaut, un nom exact.
    pub fn resolve_person<'a>(&'a self, key: &str) -> Option<&'a Person> {
        self.find_person_by_id(&PersonId::new(key))
            .or_else(|| self.find_person_by_name(key))
    }

    pub fn day(&self, date: NaiveDate) -> &[Assignment] {
        self.schedule.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }
}
