#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use gardes::{
    demo, display, io,
    layout::Layout,
    model::{Location, Person},
    scheduler::{AutoFill, ConflictKind, Scheduler},
    storage::{JsonStorage, Storage},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de répartition des tours de garde
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du roster (personnel + planning)
    #[arg(long, global = true, default_value = "roster.json")]
    roster: String,

    /// Grille postes/créneaux (JSON) ; grille intégrée par défaut
    #[arg(long, global = true)]
    layout: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Remplacer le personnel par des personnes fictives
    SeedDemo {
        #[arg(long, default_value_t = demo::DEFAULT_COUNT)]
        count: usize,
        /// Graine pour un tirage reproductible
        #[arg(long)]
        seed: Option<u64>,
        /// Écraser un personnel existant
        #[arg(long)]
        force: bool,
    },

    /// Importer le personnel depuis un CSV (remplace la liste et efface le planning)
    ImportPeople {
        #[arg(long)]
        csv: String,
        /// Ajouter à la liste au lieu de la remplacer
        #[arg(long)]
        append: bool,
    },

    /// Régler l'exemption d'une personne
    Exempt {
        /// id ou nom exact
        #[arg(long)]
        person: String,
        /// Exemptée jusqu'à cette date incluse (YYYY-MM-DD)
        #[arg(long)]
        until: Option<String>,
        /// Exemption permanente
        #[arg(long)]
        permanent: bool,
        /// Lever toute exemption
        #[arg(long, conflicts_with_all = ["until", "permanent"])]
        clear: bool,
    },

    /// Retirer une personne et ses gardes
    RemovePerson {
        #[arg(long)]
        person: String,
    },

    /// Lister le personnel et sa disponibilité
    People {
        #[arg(long)]
        date: Option<String>,
    },

    /// Liste d'attente du jour, par priorité de rotation
    Queue {
        #[arg(long)]
        date: Option<String>,
    },

    /// Affecter manuellement une personne à une case
    Place {
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        person: String,
        /// V61, V62, DN1, DN3
        #[arg(long)]
        location: String,
        #[arg(long)]
        slot: u8,
    },

    /// Vider une case
    Remove {
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        location: String,
        #[arg(long)]
        slot: u8,
    },

    /// Vider toute la journée
    ClearDay {
        #[arg(long)]
        date: Option<String>,
    },

    /// Remplir automatiquement les cases libres du jour
    Auto {
        #[arg(long)]
        date: Option<String>,
    },

    /// Afficher la grille du jour
    Show {
        #[arg(long)]
        date: Option<String>,
    },

    /// Historique des gardes d'une personne (plus récent d'abord)
    History {
        #[arg(long)]
        person: String,
    },

    /// Vérifier les invariants du planning
    Check {
        /// Export CSV des anomalies (optionnel)
        #[arg(long)]
        report: Option<String>,
    },

    /// Exporter une journée (CSV) ou tout le roster (JSON)
    Export {
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
    },

    /// Afficher ou exporter la grille postes/créneaux
    Layout {
        #[arg(long)]
        out: Option<String>,
    },
}

fn date_or_today(raw: Option<&str>) -> Result<NaiveDate> {
    match raw {
        Some(raw) => io::parse_date(raw),
        None => Ok(Local::now().date_naive()),
    }
}

fn parse_location(raw: &str) -> Result<Location> {
    raw.parse::<Location>().map_err(anyhow::Error::msg)
}

fn resolve(scheduler: &Scheduler, key: &str) -> Result<Person> {
    scheduler
        .roster()
        .resolve_person(key)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("unknown person: {}", key))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let layout = match &cli.layout {
        Some(path) => Layout::load(path)?,
        None => Layout::default(),
    };
    let storage = JsonStorage::open(&cli.roster);
    let roster = storage
        .load_or_default()
        .with_context(|| format!("loading roster {}", storage.path().display()))?;
    let mut scheduler = Scheduler::with_roster(roster, layout);

    let code = match cli.cmd {
        Commands::SeedDemo { count, seed, force } => {
            if !scheduler.roster().people.is_empty() && !force {
                bail!("personnel already present (use --force to overwrite)");
            }
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            scheduler.replace_people(demo::generate_personnel(count, &mut rng));
            storage.save(scheduler.roster())?;
            println!("{count} demo people generated");
            0
        }
        Commands::ImportPeople { csv, append } => {
            let people = io::import_people_csv(csv)?;
            let count = people.len();
            if append {
                scheduler
                    .add_people(people)
                    .context("imported ids collide with existing personnel")?;
            } else {
                scheduler.replace_people(people);
                println!("personnel replaced: schedule and history cleared");
            }
            storage.save(scheduler.roster())?;
            println!("{count} people imported");
            0
        }
        Commands::Exempt {
            person,
            until,
            permanent,
            clear,
        } => {
            let mut p = resolve(&scheduler, &person)?;
            if clear {
                p.is_exempt = false;
                p.exempt_until = None;
            } else {
                if !permanent && until.is_none() {
                    bail!("nothing to do: pass --until, --permanent or --clear");
                }
                p.is_exempt = permanent;
                p.exempt_until = until.as_deref().map(io::parse_date).transpose()?;
            }
            scheduler.update_person(p)?;
            storage.save(scheduler.roster())?;
            0
        }
        Commands::RemovePerson { person } => {
            let p = resolve(&scheduler, &person)?;
            let removed = scheduler.remove_person(&p.id)?;
            storage.save(scheduler.roster())?;
            println!("removed {} [{}]", removed.name, removed.id);
            0
        }
        Commands::People { date } => {
            let date = date_or_today(date.as_deref())?;
            for p in &scheduler.roster().people {
                let status = if gardes::is_available(p, date) {
                    "available".to_string()
                } else if p.is_exempt {
                    "exempt".to_string()
                } else {
                    match p.exempt_until {
                        Some(until) => format!("exempt until {until}"),
                        None => "unavailable".to_string(),
                    }
                };
                println!("{} | {} | {}", p.id, p.name, status);
            }
            0
        }
        Commands::Queue { date } => {
            let date = date_or_today(date.as_deref())?;
            let waiting = scheduler.waiting_list(date);
            if waiting.is_empty() {
                println!("every available person is already assigned");
            } else {
                print!("{}", display::render_waiting_list(&waiting, scheduler.history()));
            }
            0
        }
        Commands::Place {
            date,
            person,
            location,
            slot,
        } => {
            let date = date_or_today(date.as_deref())?;
            let location = parse_location(&location)?;
            let p = resolve(&scheduler, &person)?;
            if let Some(reason) = scheduler.place(date, &p.id, location, slot)? {
                eprintln!("warning: {} {reason} (manual override)", p.name);
            }
            storage.save(scheduler.roster())?;
            0
        }
        Commands::Remove {
            date,
            location,
            slot,
        } => {
            let date = date_or_today(date.as_deref())?;
            let location = parse_location(&location)?;
            scheduler.remove(date, location, slot);
            storage.save(scheduler.roster())?;
            0
        }
        Commands::ClearDay { date } => {
            let date = date_or_today(date.as_deref())?;
            scheduler.clear_day(date);
            storage.save(scheduler.roster())?;
            0
        }
        Commands::Auto { date } => {
            let date = date_or_today(date.as_deref())?;
            match scheduler.auto_schedule(date) {
                AutoFill::Filled { added, .. } => {
                    storage.save(scheduler.roster())?;
                    println!("{added} cell(s) filled for {date}");
                }
                AutoFill::NoProgress => {
                    println!(
                        "nothing more to schedule: no one left, or no remaining candidate passes the history rule"
                    );
                }
            }
            0
        }
        Commands::Show { date } => {
            let date = date_or_today(date.as_deref())?;
            print!(
                "{}",
                display::render_day(scheduler.roster(), scheduler.layout(), date)
            );
            0
        }
        Commands::History { person } => {
            let p = resolve(&scheduler, &person)?;
            let records = scheduler.history().records(&p.id);
            if records.is_empty() {
                println!("{} has never guarded", p.name);
            }
            for r in records {
                println!("{} | {} | Ca {}", r.date, r.location.code(), r.slot_id);
            }
            0
        }
        Commands::Check { report } => {
            let conflicts = scheduler.audit();
            if conflicts.is_empty() {
                println!("OK: no conflicts");
                0
            } else {
                eprintln!("Found {} conflict(s)", conflicts.len());
                if let Some(path) = report {
                    let mut w = csv::Writer::from_path(path)?;
                    w.write_record(["date", "location", "slot", "person_id", "kind"])?;
                    for (date, c) in &conflicts {
                        let date = date.to_string();
                        let slot = c.slot_id.to_string();
                        w.write_record([
                            date.as_str(),
                            c.location.code(),
                            slot.as_str(),
                            c.person.as_ref().map(|p| p.as_str()).unwrap_or(""),
                            match c.kind {
                                ConflictKind::DoubleBooking => "double",
                                ConflictKind::DuplicateCell => "duplicate",
                                ConflictKind::ClosedCell => "closed",
                                ConflictKind::UnknownSlot => "unknown-slot",
                                ConflictKind::Unavailable => "unavailable",
                            },
                        ])?;
                    }
                    w.flush()?;
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::Export {
            date,
            out_csv,
            out_json,
        } => {
            if out_csv.is_none() && out_json.is_none() {
                bail!("nothing to export: pass --out-csv and/or --out-json");
            }
            if let Some(path) = out_csv {
                let date = date_or_today(date.as_deref())?;
                io::export_day_csv(path, scheduler.roster(), scheduler.layout(), date)?;
            }
            if let Some(path) = out_json {
                io::export_roster_json(path, scheduler.roster())?;
            }
            0
        }
        Commands::Layout { out } => {
            match out {
                Some(path) => scheduler.layout().save(path)?,
                None => println!("{}", serde_json::to_string_pretty(scheduler.layout())?),
            }
            0
        }
    };

    std::process::exit(code);
}
