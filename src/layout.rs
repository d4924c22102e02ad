use crate::model::Location;
use anyhow::{bail, Context, Result};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Créneau horaire fixe d'une nuit de garde.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: u8,
    pub label: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeSlot {
    pub fn new<L: Into<String>>(id: u8, label: L, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            id,
            label: label.into(),
            start,
            end,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.id == 0 {
            bail!("slot ids start at 1");
        }
        if self.label.trim().is_empty() {
            bail!("slot {} label cannot be empty", self.id);
        }
        if self.start == self.end {
            bail!("slot {} start and end cannot be equal", self.id);
        }
        Ok(())
    }
}

/// Poste de garde et son éventuel démarrage tardif.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub location: Location,
    /// Premier créneau ouvert pour ce poste ; les créneaux d'id inférieur n'existent pas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_slot: Option<u8>,
}

impl Post {
    pub fn offers(&self, slot_id: u8) -> bool {
        self.first_slot.map_or(true, |first| slot_id >= first)
    }
}

/// Grille de garde : créneaux dans l'ordre, postes dans l'ordre déclaré.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub slots: Vec<TimeSlot>,
    pub posts: Vec<Post>,
}

impl Default for Layout {
    fn default() -> Self {
        // (début, fin) en heures et minutes ; à partir de Ca 5 on est le lendemain.
        const TIMES: [((u32, u32), (u32, u32)); 9] = [
            ((18, 30), (20, 0)),
            ((20, 0), (21, 30)),
            ((21, 30), (23, 0)),
            ((23, 0), (0, 0)),
            ((0, 0), (1, 0)),
            ((1, 0), (2, 0)),
            ((2, 0), (3, 0)),
            ((3, 0), (4, 0)),
            ((4, 0), (5, 30)),
        ];
        let slots = TIMES
            .iter()
            .zip(1u8..)
            .filter_map(|(&((sh, sm), (eh, em)), id)| {
                Some(TimeSlot {
                    id,
                    label: format!("Ca {id}"),
                    start: NaiveTime::from_hms_opt(sh, sm, 0)?,
                    end: NaiveTime::from_hms_opt(eh, em, 0)?,
                })
            })
            .collect();
        let posts = Location::ALL
            .into_iter()
            .map(|location| Post {
                location,
                first_slot: matches!(location, Location::Dn1 | Location::Dn3).then_some(3),
            })
            .collect();
        Self { slots, posts }
    }
}

impl Layout {
    pub fn validate(&self) -> Result<()> {
        if self.slots.is_empty() {
            bail!("layout must contain at least one slot");
        }
        if self.posts.is_empty() {
            bail!("layout must contain at least one post");
        }
        for slot in &self.slots {
            slot.validate()?;
        }
        if self.slots.windows(2).any(|w| w[0].id >= w[1].id) {
            bail!("slot ids must be unique and ascending");
        }
        for (i, post) in self.posts.iter().enumerate() {
            if self.posts[..i].iter().any(|p| p.location == post.location) {
                bail!("post {} declared twice", post.location.code());
            }
            if let Some(first) = post.first_slot {
                if self.slot(first).is_none() {
                    bail!(
                        "post {} starts at unknown slot {first}",
                        post.location.code()
                    );
                }
            }
        }
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).with_context(|| format!("reading layout {}", path.display()))?;
        let layout: Layout = serde_json::from_slice(&data)
            .with_context(|| format!("parsing layout {}", path.display()))?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.validate()?;
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json)
            .with_context(|| format!("writing layout {}", path.as_ref().display()))
    }

    pub fn slot(&self, id: u8) -> Option<&TimeSlot> {
        self.slots.iter().find(|s| s.id == id)
    }

    pub fn post(&self, location: Location) -> Option<&Post> {
        self.posts.iter().find(|p| p.location == location)
    }

    /// La case existe-t-elle : créneau connu, poste déclaré et ouvert à ce créneau.
    pub fn offers(&self, location: Location, slot_id: u8) -> bool {
        self.slot(slot_id).is_some() && self.post(location).is_some_and(|p| p.offers(slot_id))
    }

    /// Nombre de cases ouvertes sur une journée.
    pub fn open_cells(&self) -> usize {
        self.slots
            .iter()
            .map(|s| self.posts.iter().filter(|p| p.offers(s.id)).count())
            .sum()
    }
}
