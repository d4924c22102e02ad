use crate::history::PersonnelHistory;
use crate::layout::Layout;
use crate::model::{Person, Roster};
use chrono::NaiveDate;
use std::fmt::Write;

/// Nom affiché d'une case : personne, `[EMPTY]`, ou `-` si la case n'existe pas.
fn cell_text(roster: &Roster, layout: &Layout, date: NaiveDate, post: usize, slot: u8) -> String {
    let post = &layout.posts[post];
    if !post.offers(slot) {
        return "-".to_string();
    }
    roster
        .day(date)
        .iter()
        .find(|a| a.is_cell(post.location, slot))
        .and_then(|a| a.person_id.as_ref())
        .map(|pid| {
            roster
                .find_person_by_id(pid)
                .map_or_else(|| pid.to_string(), |p| p.name.clone())
        })
        .unwrap_or_else(|| "[EMPTY]".to_string())
}

/// Grille texte d'une journée : une ligne par créneau, une colonne par poste.
pub fn render_day(roster: &Roster, layout: &Layout, date: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "** {date} **");
    for slot in &layout.slots {
        let _ = write!(
            out,
            "{} {}-{}",
            slot.label,
            slot.start.format("%H:%M"),
            slot.end.format("%H:%M")
        );
        for (i, post) in layout.posts.iter().enumerate() {
            let cell = cell_text(roster, layout, date, i, slot.id);
            let _ = write!(out, " | {}: {cell}", post.location.code());
        }
        out.push('\n');
    }
    out
}

/// Liste d'attente : rang, nom, dernière garde.
pub fn render_waiting_list(people: &[&Person], history: &PersonnelHistory) -> String {
    let mut out = String::new();
    for (rank, p) in people.iter().enumerate() {
        let last = history
            .last_guarded(&p.id)
            .map_or_else(|| "never guarded".to_string(), |d| format!("last guarded {d}"));
        let _ = writeln!(out, "{}. {} [{}] ({last})", rank + 1, p.name, p.id);
    }
    out
}
