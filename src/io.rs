use crate::layout::Layout;
use crate::model::{Person, PersonId, Roster};
use anyhow::{bail, Context};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import du personnel depuis CSV: header `id,name[,is_exempt][,exempt_until]`.
///
/// Un id vide reçoit un UUID ; `exempt_until` au format `YYYY-MM-DD`.
pub fn import_people_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Person>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut out: Vec<Person> = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let id = rec.get(0).context("missing id")?.trim();
        let name = rec.get(1).context("missing name")?.trim();
        if name.is_empty() {
            bail!("invalid people row (empty name)");
        }
        let id = if id.is_empty() {
            PersonId::random()
        } else {
            PersonId::new(id)
        };
        if out.iter().any(|p| p.id == id) {
            bail!("duplicate person id {id}");
        }
        let mut person = Person::with_id(id, name);
        if let Some(flag) = rec.get(2).map(str::trim).filter(|f| !f.is_empty()) {
            person.is_exempt = parse_bool(flag)
                .with_context(|| format!("invalid is_exempt value for {name}"))?;
        }
        if let Some(until) = rec.get(3).map(str::trim).filter(|u| !u.is_empty()) {
            person.exempt_until = Some(
                parse_date(until).with_context(|| format!("invalid exempt_until for {name}"))?,
            );
        }
        out.push(person);
    }
    Ok(out)
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "có" | "co" => Ok(true),
        "false" | "0" | "no" | "n" | "không" | "khong" => Ok(false),
        _ => bail!("expected boolean"),
    }
}

pub fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date: {raw}"))
}

/// Export JSON du roster (jolie mise en forme)
pub fn export_roster_json<P: AsRef<Path>>(path: P, roster: &Roster) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(roster)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV d'une journée, trié par créneau puis poste:
/// header `date,slot,label,start,end,location,person_id,person_name`
pub fn export_day_csv<P: AsRef<Path>>(
    path: P,
    roster: &Roster,
    layout: &Layout,
    date: NaiveDate,
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record([
        "date",
        "slot",
        "label",
        "start",
        "end",
        "location",
        "person_id",
        "person_name",
    ])?;
    let day = roster.day(date);
    let date = date.to_string();
    for slot in &layout.slots {
        for post in &layout.posts {
            let Some(a) = day.iter().find(|a| a.is_cell(post.location, slot.id)) else {
                continue;
            };
            let person_id = a.person_id.as_ref().map(PersonId::as_str).unwrap_or("");
            let person_name = a
                .person_id
                .as_ref()
                .and_then(|pid| roster.find_person_by_id(pid))
                .map(|p| p.name.as_str())
                .unwrap_or("");
            let id = slot.id.to_string();
            let start = slot.start.format("%H:%M").to_string();
            let end = slot.end.format("%H:%M").to_string();
            w.write_record([
                date.as_str(),
                id.as_str(),
                slot.label.as_str(),
                start.as_str(),
                end.as_str(),
                post.location.code(),
                person_id,
                person_name,
            ])?;
        }
    }
    w.flush()?;
    Ok(())
}
