#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use staffgrid::{
    io,
    model::{Day, RosterResult},
    random::{SeededRandom, ThreadRandom},
    scheduler::{validate_daily_distribution, BalanceOptions, RosterGenerator},
    storage::{JsonStorage, Storage},
};
use clap::{Parser, Subcommand};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de génération de plannings personnel/sites (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON des entrées
    #[arg(long, global = true, default_value = "roster-inputs.json")]
    inputs: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Modifier les paramètres du planning
    Configure {
        /// liste "site1,site2,..."
        #[arg(long)]
        locations: Option<String>,
        /// liste "nom1,nom2,..." (remplace le personnel et ses absences)
        #[arg(long)]
        staff: Option<String>,
        #[arg(long)]
        weekly_locations: Option<usize>,
        /// Jour fixe (Monday..Friday), "none" pour l'enlever
        #[arg(long)]
        fixed_day: Option<String>,
        #[arg(long)]
        fixed_location: Option<String>,
    },

    /// Importer le personnel (et ses absences) depuis un CSV
    ImportStaff {
        #[arg(long)]
        csv: String,
    },

    /// Vérifier la faisabilité jour par jour
    Check,

    /// Générer le planning
    Generate {
        /// Graine pour un résultat reproductible
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 3)]
        max_stuck_attempts: usize,
        #[arg(long, default_value_t = 1000)]
        max_passes: usize,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.inputs)?;
    let mut inputs = storage.load_or_default()?;

    let code = match cli.cmd {
        Commands::Configure {
            locations,
            staff,
            weekly_locations,
            fixed_day,
            fixed_location,
        } => {
            if let Some(list) = locations {
                inputs.locations = split_list(&list);
            }
            if let Some(list) = staff {
                inputs.staff = split_list(&list);
                inputs.oof_preferences.clear();
            }
            if let Some(n) = weekly_locations {
                inputs.weekly_locations_required = n;
            }
            if let Some(day) = fixed_day {
                inputs.fixed_day = match day.trim() {
                    "" | "none" => None,
                    raw => Some(raw.parse::<Day>()?),
                };
            }
            if let Some(loc) = fixed_location {
                inputs.fixed_day_location = Some(loc).filter(|l| !l.trim().is_empty());
            }
            storage.save(&inputs)?;
            0
        }
        Commands::ImportStaff { csv } => {
            let records = io::import_staff_csv(csv)?;
            inputs.staff = records.iter().map(|r| r.name.clone()).collect();
            inputs.oof_preferences = records
                .into_iter()
                .filter(|r| !r.oof_days.is_empty())
                .map(|r| (r.name, r.oof_days))
                .collect();
            storage.save(&inputs)?;
            0
        }
        Commands::Check => {
            inputs.validate()?;
            let mut code = 0;
            for day in Day::WEEK.into_iter().filter(|d| Some(*d) != inputs.fixed_day) {
                let f = validate_daily_distribution(
                    &inputs.staff,
                    &inputs.locations,
                    &inputs.oof_preferences,
                    day,
                );
                if f.possible {
                    println!("{day}: OK ({} available)", f.available_staff);
                } else {
                    println!(
                        "{day}: short by {} ({} available, {} required)",
                        f.shortfall, f.available_staff, f.required_staff
                    );
                    // Code 2 = WARNING/INCOMPLETE
                    code = 2;
                }
            }
            code
        }
        Commands::Generate {
            seed,
            max_stuck_attempts,
            max_passes,
            out_json,
            out_csv,
        } => {
            if let Err(err) = inputs.validate() {
                bail!("invalid inputs in {}: {err}", storage.path().display());
            }
            let generator = RosterGenerator::with_options(BalanceOptions {
                max_stuck_attempts,
                max_passes,
                ..BalanceOptions::default()
            });
            let result = match seed {
                Some(seed) => generator.generate_checked(&inputs, &mut SeededRandom::new(seed))?,
                None => generator.generate_checked(&inputs, &mut ThreadRandom::new())?,
            };
            if let Some(path) = out_json {
                io::export_roster_json(path, &result)?;
            }
            if let Some(path) = out_csv {
                io::export_roster_csv(path, &result)?;
            }
            print_result(&result);
            if result.is_valid {
                0
            } else {
                2
            }
        }
    };

    std::process::exit(code);
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn print_result(result: &RosterResult) {
    let header: Vec<&str> = result.days.iter().map(|d| d.as_str()).collect();
    println!("staff | {}", header.join(" | "));
    for row in &result.roster {
        let cells: Vec<&str> = row.assignment.iter().map(|s| s.as_str()).collect();
        println!("{} | {}", row.staff, cells.join(" | "));
    }
    for day in &result.impossible_days {
        eprintln!(
            "{}: only {} staff available for {} locations",
            day.day, day.available_staff, day.required_staff
        );
    }
    println!("{}", result.message);
}
