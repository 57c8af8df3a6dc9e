//! Flat store for daily productivity records.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use cadence_core::errors::CadenceResult;
use cadence_core::models::{upsert_today, DailyRecord};
use cadence_core::traits::SeriesStore;

use crate::table;

const FILE_NAME: &str = "productivity_daily.csv";
const HEADER: &[&str] = &["user_id", "date", "score", "completed", "total"];

/// Durable flat-file store for the productivity table, one row per
/// (user, day).
///
/// An unreadable or malformed backing file resets to an empty table and
/// persists the reset; callers always get a usable table back.
pub struct ProductivityStore {
    path: PathBuf,
}

impl ProductivityStore {
    /// Open (and create if needed) the store under `dir`.
    pub fn open(dir: &Path) -> CadenceResult<Self> {
        fs::create_dir_all(dir)?;
        let store = Self {
            path: dir.join(FILE_NAME),
        };
        if !store.path.exists() {
            store.save(&[])?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Upsert today's record for `user_id` and persist the result.
    ///
    /// Field semantics live in [`upsert_today`]: supplied fields
    /// overwrite, an omitted score is derived from the task ratio.
    /// Returns the full table after the write so callers can refresh
    /// their caches without a reload.
    pub fn upsert_today(
        &self,
        user_id: i64,
        score: Option<f64>,
        completed: Option<u32>,
        total: Option<u32>,
    ) -> CadenceResult<Vec<DailyRecord>> {
        let mut rows = self.load()?;
        upsert_today(&mut rows, user_id, score, completed, total);
        self.save(&rows)?;
        Ok(rows)
    }
}

impl SeriesStore for ProductivityStore {
    type Row = DailyRecord;

    fn load(&self) -> CadenceResult<Vec<DailyRecord>> {
        match table::read_table::<DailyRecord>(&self.path) {
            Ok(mut rows) => {
                rows.sort_by_key(|r| (r.user_id, r.date));
                Ok(rows)
            }
            Err(err) => {
                warn!(
                    error = %err,
                    path = %self.path.display(),
                    "productivity table unreadable, resetting to empty"
                );
                self.save(&[])?;
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, rows: &[DailyRecord]) -> CadenceResult<()> {
        table::write_table(&self.path, HEADER, rows)
    }
}
