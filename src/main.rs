#![deny(
    warnings,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::Result;
use clap::Parser;
use paceline::app::{App, FormInput};
use paceline::store::Store;
use paceline::term::TermFrontend;
use paceline::types::{Coords, WorkoutId};
use paceline::{cli, dlog, utils};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    utils::init_logging(cli.verbose, cli.quiet);

    let store = Store::open(&cli.db)?;
    dlog!("db={} cmd={:?}", cli.db.display(), cli.cmd);

    let mut app = App::start(store, TermFrontend::default());

    // The position either arrives "immediately" via --at or never does;
    // without it the map stays off and the ledger is list-only.
    match cli.at.as_deref().map(utils::parse_latlng).transpose()? {
        Some(here) => app.position_acquired(here),
        None => app.position_failed(),
    }

    match cli.cmd {
        Some(cli::Cmd::Add {
            kind,
            lat,
            lng,
            distance,
            duration,
            cadence,
            elevation,
        }) => {
            app.map_clicked(Coords { lat, lng });
            app.submit(&FormInput {
                kind: kind.tag().to_string(),
                distance,
                duration,
                cadence,
                elevation,
            })?;
        }
        Some(cli::Cmd::Show { id }) => match id.parse::<WorkoutId>() {
            Ok(id) => app.select(id)?,
            Err(_) => tracing::warn!(%id, "not a workout id"),
        },
        Some(cli::Cmd::Reset) => {
            app.reset()?;
            tracing::info!("stored workouts cleared");
        }
        None => {
            if app.ledger().is_empty() {
                tracing::info!("no workouts recorded yet");
            }
        }
    }

    Ok(())
}
