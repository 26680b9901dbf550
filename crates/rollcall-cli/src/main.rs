use anyhow::Result;
use clap::{Parser, Subcommand};
use image::GrayImage;
use rollcall_core::{catalog, FaceBox, FaceDetector, Identity};
use rollcall_ledger::Ledger;
use std::path::PathBuf;

mod config;
use config::Config;

#[derive(Parser)]
#[command(name = "rollcall", about = "Face-recognition attendance ledger")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List identities enrolled in the sample directory
    Roster {
        /// Sample directory (default: ROLLCALL_FACES_DIR or known_faces)
        #[arg(long)]
        faces_dir: Option<PathBuf>,
    },
    /// Mark attendance for an identity ("007:Ada" or "Ada") now
    Mark { identity: String },
    /// Show recorded attendance rows
    List {
        /// Only rows for this date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
}

/// Roster listing only needs the label map, never trains, so detection
/// is a no-op here.
struct NoDetection;

impl FaceDetector for NoDetection {
    fn detect(&self, _: &GrayImage) -> Vec<FaceBox> {
        Vec::new()
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();
    let ledger = Ledger::new(&config.row_store, &config.table_store);

    match cli.command {
        Commands::Roster { faces_dir } => {
            let dir = faces_dir.unwrap_or(config.faces_dir);
            let catalog = catalog::build(&dir, &NoDetection)?;
            if catalog.labels.is_empty() {
                println!("No identities enrolled in {}", dir.display());
            } else {
                for (label, identity) in catalog.labels.iter() {
                    println!("{label:>4}  {identity}");
                }
            }
        }
        Commands::Mark { identity } => {
            let identity = Identity::parse(&identity);
            if ledger.record_now(&identity)? {
                println!("Attendance marked for {identity}");
            } else {
                println!("{identity} already recorded today");
            }
        }
        Commands::List { date } => {
            let rows = ledger.load_rows()?;
            let rows: Vec<_> = match &date {
                Some(d) => rows.into_iter().filter(|r| r.date == *d).collect(),
                None => rows,
            };
            if rows.is_empty() {
                println!("No attendance recorded");
            } else {
                println!(
                    "{:<12} {:<20} {:<12} {}",
                    "Student ID", "Name", "Date", "Time"
                );
                for row in rows {
                    println!(
                        "{:<12} {:<20} {:<12} {}",
                        row.external_id, row.display_name, row.date, row.time
                    );
                }
            }
        }
    }

    Ok(())
}
