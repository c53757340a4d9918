// File: ./src/storage.rs
// Saved schedules on disk.
//
// VERSION BUMP REQUIRED:
// Changes to TaskRecord (or Subtask) serialization require incrementing
// SCHEDULE_STORAGE_VERSION below.
use crate::context::AppContext;
use crate::model::TaskRecord;
use anyhow::{Context, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// Version history:
// - v1: TaskRecord with categoryGuess
const SCHEDULE_STORAGE_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct ScheduleData {
    #[serde(default)]
    version: u32,
    records: Vec<TaskRecord>,
}

pub struct ScheduleStore;

impl ScheduleStore {
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = lock_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

    /// Run `f` while holding an exclusive lock on a sidecar `.lock` file.
    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file {:?}", lock_path))?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    /// Write to a .tmp file then rename over the target.
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    fn read_unlocked(path: &Path) -> Result<Vec<TaskRecord>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read schedules '{}'", path.display()))?;
        if json.trim().is_empty() {
            return Ok(Vec::new());
        }
        let data: ScheduleData = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse schedules '{}'", path.display()))?;
        if data.version > SCHEDULE_STORAGE_VERSION {
            return Err(anyhow::anyhow!(
                "Schedule storage version {} is newer than supported version {}. Please upgrade schedai.",
                data.version,
                SCHEDULE_STORAGE_VERSION
            ));
        }
        Ok(data.records)
    }

    fn write_unlocked(path: &Path, records: &[TaskRecord]) -> Result<()> {
        let data = ScheduleData {
            version: SCHEDULE_STORAGE_VERSION,
            records: records.to_vec(),
        };
        let json = serde_json::to_string_pretty(&data)?;
        Self::atomic_write(path, json)
    }

    pub fn load(ctx: &dyn AppContext) -> Result<Vec<TaskRecord>> {
        let path = ctx.get_schedules_path()?;
        if !path.exists() {
            return Ok(Vec::new());
        }
        Self::with_lock(&path, || Self::read_unlocked(&path))
    }

    pub fn save(ctx: &dyn AppContext, records: &[TaskRecord]) -> Result<()> {
        let path = ctx.get_schedules_path()?;
        Self::with_lock(&path, || Self::write_unlocked(&path, records))?;
        log::debug!("Saved {} record(s) to {:?}", records.len(), path);
        Ok(())
    }

    /// Append under a single lock so concurrent writers do not drop records.
    /// Returns the new total.
    pub fn append(ctx: &dyn AppContext, new_records: &[TaskRecord]) -> Result<usize> {
        let path = ctx.get_schedules_path()?;
        let total = Self::with_lock(&path, || {
            let mut records = Self::read_unlocked(&path)?;
            records.extend_from_slice(new_records);
            Self::write_unlocked(&path, &records)?;
            Ok(records.len())
        })?;
        log::info!("Stored {} new record(s), {} total", new_records.len(), total);
        Ok(total)
    }
}
