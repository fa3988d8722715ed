// Transient on-disk staging of uploaded documents.
// Every staged file is owned by a `StagedFile` guard; the guard removes the file
// exactly once, either through `cleanup()` or when it is dropped on an error/unwind path.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use chrono::Local;
use uuid::Uuid;

use super::format::original_extension;
use super::ImportError;

/// Process-local directory holding one file per in-flight extraction.
#[derive(Debug, Clone)]
pub struct StagingArea {
    dir: PathBuf,
}

impl StagingArea {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `bytes` under a fresh unique name derived from `filename`.
    pub fn store(&self, bytes: &[u8], filename: &str) -> Result<StagedFile, ImportError> {
        fs::create_dir_all(&self.dir)?;

        let unique_name = generate_unique_filename(filename);
        let path = self.dir.join(&unique_name);

        // create_new: two uploads can never share a path, even under a clock tie.
        let write_result = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .and_then(|mut file| {
                file.write_all(bytes)?;
                file.flush()
            });

        if let Err(source) = write_result {
            // Drop whatever made it to disk before reporting.
            remove_staged(&path);
            return Err(ImportError::StagingWrite {
                path: path.display().to_string(),
                source,
            });
        }

        tracing::debug!(
            staged = %unique_name,
            size = bytes.len(),
            "Upload staged"
        );

        Ok(StagedFile {
            path,
            unique_name,
            released: false,
        })
    }

    /// Remove leftovers from crashed runs. Only files last modified more than
    /// `max_age` ago are touched, so uploads other processes are still
    /// extracting survive. Returns the number of files removed.
    pub fn purge_orphans(&self, max_age: Duration) -> usize {
        let entries = match fs::read_dir(&self.dir) {
            Ok(e) => e,
            Err(_) => return 0, // Staging dir may not exist yet
        };

        let now = SystemTime::now();
        let mut count = 0;
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() || !is_stale(&path, now, max_age) {
                continue;
            }
            match fs::remove_file(&path) {
                Ok(()) => count += 1,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => tracing::warn!("Failed to clean staging file: {e}"),
            }
        }

        if count > 0 {
            tracing::info!(
                files_cleaned = count,
                max_age_secs = max_age.as_secs(),
                "Cleaned orphaned staging files"
            );
        }
        count
    }
}

/// Modified more than `max_age` before `now`. Unreadable or future mtimes count as fresh.
fn is_stale(path: &Path, now: SystemTime, max_age: Duration) -> bool {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .and_then(|modified| now.duration_since(modified).ok())
        .is_some_and(|age| age > max_age)
}

/// A staged upload. Removing it is the guard's job, never the caller's.
#[derive(Debug)]
pub struct StagedFile {
    path: PathBuf,
    unique_name: String,
    released: bool,
}

impl StagedFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn unique_name(&self) -> &str {
        &self.unique_name
    }

    /// Delete the staged file. Failures are logged, never returned.
    pub fn cleanup(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        remove_staged(&self.path);
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        self.release();
    }
}

/// `{YYYYMMDD_HHMMSS}_{uuid}{ext}`: sortable by time, unique across concurrent uploads.
pub fn generate_unique_filename(original_filename: &str) -> String {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    format!(
        "{}_{}{}",
        timestamp,
        Uuid::new_v4(),
        original_extension(original_filename)
    )
}

/// Idempotent removal: a file that is already gone is not an error.
pub fn remove_staged(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => tracing::debug!(path = %path.display(), "Staged file removed"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(
            path = %path.display(),
            error = %e,
            "Failed to clean up staged file"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_count(dir: &Path) -> usize {
        fs::read_dir(dir).map(|e| e.count()).unwrap_or(0)
    }

    #[test]
    fn store_writes_bytes_under_unique_name() {
        let dir = tempfile::tempdir().unwrap();
        let area = StagingArea::new(dir.path());

        let staged = area.store(b"lease agreement", "lease.pdf").unwrap();

        assert!(staged.path().exists());
        assert!(staged.unique_name().ends_with(".pdf"));
        assert_eq!(fs::read(staged.path()).unwrap(), b"lease agreement");
        staged.cleanup();
    }

    #[test]
    fn unique_name_has_timestamp_and_uuid() {
        let name = generate_unique_filename("Notice.TXT");
        let re = regex::Regex::new(
            r"^\d{8}_\d{6}_[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[0-9a-f]{4}-[0-9a-f]{12}\.TXT$",
        )
        .unwrap();
        assert!(re.is_match(&name), "unexpected name: {name}");
    }

    #[test]
    fn same_filename_never_collides() {
        let dir = tempfile::tempdir().unwrap();
        let area = StagingArea::new(dir.path());

        let a = area.store(b"a", "same.txt").unwrap();
        let b = area.store(b"b", "same.txt").unwrap();

        assert_ne!(a.path(), b.path());
        assert_eq!(file_count(dir.path()), 2);
    }

    #[test]
    fn cleanup_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let area = StagingArea::new(dir.path());
        let staged = area.store(b"x", "x.txt").unwrap();
        let path = staged.path().to_path_buf();

        staged.cleanup();

        assert!(!path.exists());
        assert_eq!(file_count(dir.path()), 0);
    }

    #[test]
    fn drop_removes_file_when_cleanup_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let area = StagingArea::new(dir.path());
        let path = {
            let staged = area.store(b"x", "x.txt").unwrap();
            staged.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn cleanup_tolerates_already_deleted_file() {
        let dir = tempfile::tempdir().unwrap();
        let area = StagingArea::new(dir.path());
        let staged = area.store(b"x", "x.txt").unwrap();
        fs::remove_file(staged.path()).unwrap();

        // Must not panic or error
        staged.cleanup();
    }

    #[test]
    fn store_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("uploads").join("temp");
        let area = StagingArea::new(&nested);

        let staged = area.store(b"x", "x.txt").unwrap();
        assert!(nested.is_dir());
        staged.cleanup();
    }

    #[test]
    fn store_into_unwritable_location_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the directory should be
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"").unwrap();
        let area = StagingArea::new(blocker.join("temp"));

        assert!(area.store(b"x", "x.txt").is_err());
    }

    fn backdate(path: &Path, by: Duration) {
        fs::File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(SystemTime::now() - by)
            .unwrap();
    }

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn purge_orphans_removes_stale_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let old_pdf = dir.path().join("20240101_000000_old.pdf");
        let old_txt = dir.path().join("20240101_000001_old.txt");
        fs::write(&old_pdf, b"stale").unwrap();
        fs::write(&old_txt, b"stale").unwrap();
        backdate(&old_pdf, 2 * HOUR);
        backdate(&old_txt, 2 * HOUR);

        let area = StagingArea::new(dir.path());
        assert_eq!(area.purge_orphans(HOUR), 2);
        assert_eq!(file_count(dir.path()), 0);
    }

    #[test]
    fn purge_orphans_spares_in_flight_upload_of_another_run() {
        let dir = tempfile::tempdir().unwrap();
        let running = StagingArea::new(dir.path());
        let staged = running.store(b"Lease text", "lease.txt").unwrap();

        let starting = StagingArea::new(dir.path());
        assert_eq!(starting.purge_orphans(HOUR), 0);

        assert!(staged.path().exists());
        assert_eq!(fs::read(staged.path()).unwrap(), b"Lease text");
        staged.cleanup();
    }

    #[test]
    fn purge_orphans_keeps_fresh_and_removes_stale() {
        let dir = tempfile::tempdir().unwrap();
        let stale = dir.path().join("20240101_000000_old.pdf");
        fs::write(&stale, b"stale").unwrap();
        backdate(&stale, 2 * HOUR);

        let area = StagingArea::new(dir.path());
        let fresh = area.store(b"fresh", "fresh.pdf").unwrap();

        assert_eq!(area.purge_orphans(HOUR), 1);
        assert!(!stale.exists());
        assert!(fresh.path().exists());
        fresh.cleanup();
    }

    #[test]
    fn purge_orphans_on_missing_dir_is_noop() {
        let area = StagingArea::new("/nonexistent/suepr/staging");
        assert_eq!(area.purge_orphans(HOUR), 0);
    }
}
