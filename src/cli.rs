use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const DEFAULT_DB: &str = "paceline.db";

#[derive(Parser, Debug)]
#[command(
    name = "paceline",
    about = "Log runs and rides against map locations; without a subcommand, prints the ledger"
)]
pub struct Cli {
    /// SQLite file holding the workout ledger.
    #[arg(long, value_name = "FILE", default_value = DEFAULT_DB, global = true)]
    pub db: PathBuf,

    /// Your current position as LAT,LNG. Without it the map never comes up
    /// and stored workouts render in the list only.
    #[arg(long, value_name = "LAT,LNG", global = true)]
    pub at: Option<String>,

    /// Increase log verbosity (-v, -vv). Defaults to INFO.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease log verbosity (-q, -qq). Defaults to INFO.
    #[arg(short = 'q', long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Record a workout at a map location.
    Add {
        #[arg(value_enum)]
        kind: KindArg,

        /// Latitude of the map click.
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude of the map click.
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,

        /// Distance in kilometers.
        #[arg(long)]
        distance: String,

        /// Duration in minutes.
        #[arg(long)]
        duration: String,

        /// Cadence in steps per minute (running).
        #[arg(long, default_value = "")]
        cadence: String,

        /// Elevation gain in meters (cycling); zero or negative is fine.
        #[arg(long, default_value = "", allow_negative_numbers = true)]
        elevation: String,
    },

    /// Center the map on one workout by id.
    Show {
        /// Workout id as printed in the list.
        id: String,
    },

    /// Drop all stored workouts and start fresh.
    Reset,
}

#[derive(ValueEnum, Copy, Clone, Debug)]
pub enum KindArg {
    Running,
    Cycling,
}

impl KindArg {
    /// The form's type-selector value.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Cycling => "cycling",
        }
    }
}
