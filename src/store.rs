use crate::dlog;
use crate::ledger::Ledger;
use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;

/// The single slot the whole ledger is serialized under.
const SLOT_KEY: &str = "workouts";

/// Key-value persistence over an embedded SQLite file: one `slots` table,
/// one row, the whole ledger as a JSON blob. Overwritten wholesale on every
/// save; no partial updates, no versioning.
#[derive(Debug)]
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("opening store: {}", path.display()))?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("opening in-memory store")?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS slots (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )
        .context("ensuring store schema")?;

        Ok(Self { conn })
    }

    pub fn save(&self, ledger: &Ledger) -> Result<()> {
        let blob = ledger.to_json().context("serializing ledger")?;
        self.conn
            .execute(
                "INSERT OR REPLACE INTO slots (key, value) VALUES (?1, ?2)",
                params![SLOT_KEY, blob],
            )
            .context("writing ledger slot")?;
        Ok(())
    }

    /// Absence, read failure, and parse failure all mean "no prior data";
    /// none of them is surfaced to the user.
    pub fn load(&self) -> Ledger {
        let blob: Option<String> = match self
            .conn
            .query_row(
                "SELECT value FROM slots WHERE key = ?1",
                params![SLOT_KEY],
                |row| row.get(0),
            )
            .optional()
        {
            Ok(blob) => blob,
            Err(e) => {
                dlog!("slot read failed, starting empty: {e}");
                return Ledger::default();
            }
        };

        let Some(blob) = blob else {
            dlog!("no stored ledger");
            return Ledger::default();
        };

        match Ledger::from_json(&blob) {
            Ok(ledger) => ledger,
            Err(e) => {
                dlog!("stored ledger unreadable, starting empty: {e}");
                Ledger::default()
            }
        }
    }

    /// Deletes the slot; the next load starts empty.
    pub fn wipe(&self) -> Result<()> {
        self.conn
            .execute("DELETE FROM slots WHERE key = ?1", params![SLOT_KEY])
            .context("clearing ledger slot")?;
        Ok(())
    }
}
