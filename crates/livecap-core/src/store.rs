use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::entry::CaptionEntry;
use crate::error::{LogError, Result};

/// Persists caption sessions to the filesystem.
///
/// `LogStore` writes each session as one pretty-printed JSON document and
/// derives session file names from the session start time:
///
/// ```text
/// logs_dir/
/// ├── captions_2026-08-06_14-03-21.json
/// └── captions_2026-08-06_15-12-40.json
/// ```
///
/// It holds no session state of its own; the logger decides when and what
/// to write.
pub struct LogStore {
    logs_dir: PathBuf,
}

impl LogStore {
    /// Creates a store rooted at the given logs directory.
    ///
    /// No filesystem access happens here. The directory is created on the
    /// first [`save`](Self::save), so an unwritable location only surfaces
    /// once a write is attempted.
    pub fn new(logs_dir: impl AsRef<Path>) -> Self {
        Self {
            logs_dir: logs_dir.as_ref().to_path_buf(),
        }
    }

    /// Creates a store at the default location under the user's documents
    /// directory (`<documents>/LiveCap/Logs`).
    ///
    /// # Errors
    ///
    /// Returns [`LogError::DocumentsDirUnavailable`] if the documents
    /// directory cannot be determined.
    pub fn default_location() -> Result<Self> {
        let documents = dirs::document_dir().ok_or(LogError::DocumentsDirUnavailable)?;
        Ok(Self::new(documents.join("LiveCap").join("Logs")))
    }

    /// Returns the directory session files are written to.
    pub fn logs_dir(&self) -> &Path {
        &self.logs_dir
    }

    /// Returns the file path for a session started at the given time.
    ///
    /// File names carry the start time at second granularity; two sessions
    /// started within the same second would share a path, which is accepted
    /// rather than defended against.
    pub fn session_file_path(&self, started_at: &DateTime<Local>) -> PathBuf {
        let stamp = started_at.format("%Y-%m-%d_%H-%M-%S");
        self.logs_dir.join(format!("captions_{stamp}.json"))
    }

    /// Writes the whole entry sequence to `path`, replacing any previous
    /// content.
    ///
    /// The document is pretty-printed JSON, so a session file is
    /// human-readable and re-parseable as a whole after every write.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or if the logs directory or
    /// the file cannot be written.
    pub fn save(&self, path: &Path, entries: &[CaptionEntry]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Loads a session file back into memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file doesn't exist, cannot be read, or
    /// contains invalid JSON.
    pub fn load(&self, path: &Path) -> Result<Vec<CaptionEntry>> {
        let json = fs::read_to_string(path)?;
        let entries: Vec<CaptionEntry> = serde_json::from_str(&json)?;
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_entries() -> Vec<CaptionEntry> {
        vec![
            CaptionEntry::new("hello", Some("hola".to_string())),
            CaptionEntry::new("world", None),
        ]
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = LogStore::new(temp_dir.path());
        let entries = sample_entries();
        let path = store.session_file_path(&Local::now());

        store.save(&path, &entries).unwrap();
        let loaded = store.load(&path).unwrap();

        assert_eq!(loaded, entries);
    }

    #[test]
    fn test_save_creates_logs_dir_lazily() {
        let temp_dir = TempDir::new().unwrap();
        let logs_dir = temp_dir.path().join("LiveCap").join("Logs");
        let store = LogStore::new(&logs_dir);

        // Construction alone must not touch the filesystem.
        assert!(!logs_dir.exists());

        let path = store.session_file_path(&Local::now());
        store.save(&path, &sample_entries()).unwrap();

        assert!(logs_dir.is_dir());
        assert!(path.is_file());
    }

    #[test]
    fn test_saved_file_is_pretty_printed() {
        let temp_dir = TempDir::new().unwrap();
        let store = LogStore::new(temp_dir.path());
        let path = store.session_file_path(&Local::now());

        store.save(&path, &sample_entries()).unwrap();
        let text = fs::read_to_string(&path).unwrap();

        // Pretty output spans multiple lines with indented fields.
        assert!(text.lines().count() > 1);
        assert!(text.contains("  \"caption\": \"hello\""));
    }

    #[test]
    fn test_save_overwrites_previous_content() {
        let temp_dir = TempDir::new().unwrap();
        let store = LogStore::new(temp_dir.path());
        let path = store.session_file_path(&Local::now());

        let mut entries = sample_entries();
        store.save(&path, &entries).unwrap();
        entries.push(CaptionEntry::new("again", None));
        store.save(&path, &entries).unwrap();

        let loaded = store.load(&path).unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded, entries);
    }

    #[test]
    fn test_session_file_name_carries_start_time() {
        let store = LogStore::new("logs");
        let started_at = "2026-08-06T14:03:21+00:00"
            .parse::<DateTime<Local>>()
            .unwrap();

        let path = store.session_file_path(&started_at);
        let name = path.file_name().unwrap().to_str().unwrap();

        let stamp = started_at.format("%Y-%m-%d_%H-%M-%S");
        assert_eq!(name, format!("captions_{stamp}.json"));
        assert!(path.starts_with("logs"));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = LogStore::new(temp_dir.path());

        let err = store.load(&temp_dir.path().join("absent.json")).unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_load_invalid_json_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = LogStore::new(temp_dir.path());
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "[{").unwrap();

        let err = store.load(&path).unwrap_err();
        assert!(err.is_serialization());
    }
}
