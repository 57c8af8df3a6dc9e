//! Flat store for daily attendance records.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use cadence_core::errors::CadenceResult;
use cadence_core::models::{mark_attendance_today, AttendanceRecord, AttendanceStatus};
use cadence_core::traits::SeriesStore;

use crate::table;

const FILE_NAME: &str = "attendance_daily.csv";
const HEADER: &[&str] = &["user_id", "date", "attendance"];

/// Durable flat-file store for the attendance table, one row per
/// (user, day). Same recovery policy as the productivity store:
/// unreadable data resets to an empty table.
pub struct AttendanceStore {
    path: PathBuf,
}

impl AttendanceStore {
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

    /// Upsert today's attendance status for `user_id` and persist.
    /// Returns the full table after the write.
    pub fn mark_today(
        &self,
        user_id: i64,
        status: AttendanceStatus,
    ) -> CadenceResult<Vec<AttendanceRecord>> {
        let mut rows = self.load()?;
        mark_attendance_today(&mut rows, user_id, status);
        self.save(&rows)?;
        Ok(rows)
    }
}

impl SeriesStore for AttendanceStore {
    type Row = AttendanceRecord;

    fn load(&self) -> CadenceResult<Vec<AttendanceRecord>> {
        match table::read_table::<AttendanceRecord>(&self.path) {
            Ok(mut rows) => {
                rows.sort_by_key(|r| (r.user_id, r.date));
                Ok(rows)
            }
            Err(err) => {
                warn!(
                    error = %err,
                    path = %self.path.display(),
                    "attendance table unreadable, resetting to empty"
                );
                self.save(&[])?;
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, rows: &[AttendanceRecord]) -> CadenceResult<()> {
        table::write_table(&self.path, HEADER, rows)
    }
}
