use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Local;

use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::entry::CaptionEntry;
use crate::error::Result;
use crate::store::LogStore;

/// Mutable session state, guarded as one unit.
///
/// The flag, buffer, and path always change together under the same lock;
/// a reader can never observe a half-switched session.
struct SessionState {
    enabled: bool,
    entries: Vec<CaptionEntry>,
    output_path: PathBuf,
}

/// Records (caption, translation) pairs to one JSON file per session.
///
/// The logger starts disabled, with a pre-computed output path. Enabling it
/// begins a new session: the buffer is cleared and a fresh path is derived
/// from the current time. While enabled, every [`log_caption`] call rewrites
/// the whole session file, so the document on disk is always complete —
/// a crash mid-write can only affect the write in flight.
///
/// One instance is shared by all collaborators. Construct it once at the
/// composition root, wrap it in an [`Arc`], and hand clones to the caption
/// producer and the UI; all methods take `&self` and are safe to call from
/// any thread.
///
/// ```no_run
/// use std::sync::Arc;
/// use livecap_core::{CaptionLogger, LogStore};
///
/// let logger = Arc::new(CaptionLogger::new(LogStore::default_location()?));
/// logger.set_enabled(true);
/// logger.log_caption("hello", Some("hola"));
/// println!("logging to {}", logger.current_log_path().display());
/// # Ok::<(), livecap_core::LogError>(())
/// ```
///
/// [`log_caption`]: Self::log_caption
pub struct CaptionLogger {
    state: Mutex<SessionState>,
    store: LogStore,
    sink: Arc<dyn DiagnosticSink>,
}

impl CaptionLogger {
    /// Creates a disabled logger over the given store, reporting write
    /// failures as `tracing` warnings.
    pub fn new(store: LogStore) -> Self {
        Self::with_sink(store, Arc::new(TracingSink))
    }

    /// Creates a disabled logger with a custom diagnostic sink.
    pub fn with_sink(store: LogStore, sink: Arc<dyn DiagnosticSink>) -> Self {
        let output_path = store.session_file_path(&Local::now());
        Self {
            state: Mutex::new(SessionState {
                enabled: false,
                entries: Vec::new(),
                output_path,
            }),
            store,
            sink,
        }
    }

    /// Creates a logger storing sessions under the user's documents
    /// directory (`<documents>/LiveCap/Logs`).
    ///
    /// # Errors
    ///
    /// Returns an error if the documents directory cannot be determined.
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(LogStore::default_location()?))
    }

    /// Starts or stops logging.
    ///
    /// Turning logging on begins a new session: the buffer is cleared and a
    /// fresh output path is computed. Nothing is written until the first
    /// [`log_caption`](Self::log_caption) call. Turning it off stops further
    /// writes and leaves the session file on disk as-is. Calling with the
    /// current value is a no-op.
    pub fn set_enabled(&self, enabled: bool) {
        let mut state = self.lock_state();
        if state.enabled == enabled {
            return;
        }
        state.enabled = enabled;
        if enabled {
            state.entries.clear();
            state.output_path = self.store.session_file_path(&Local::now());
        }
    }

    /// Returns whether logging is currently enabled.
    pub fn is_enabled(&self) -> bool {
        self.lock_state().enabled
    }

    /// Records one caption, rewriting the current session file.
    ///
    /// Does nothing while logging is disabled. A failed write is reported to
    /// the diagnostic sink, never to the caller; the entry stays in the
    /// buffer, so the next successful append writes it out as well.
    pub fn log_caption(&self, caption: &str, translation: Option<&str>) {
        let mut state = self.lock_state();
        if !state.enabled {
            return;
        }
        let entry = CaptionEntry::new(caption, translation.map(str::to_owned));
        state.entries.push(entry);
        if let Err(error) = self.store.save(&state.output_path, &state.entries) {
            self.sink.save_failed(&state.output_path, &error);
        }
    }

    /// Returns the output path of the current session.
    ///
    /// Taken under the lock, so a concurrent enable transition is observed
    /// either fully or not at all.
    pub fn current_log_path(&self) -> PathBuf {
        self.lock_state().output_path.clone()
    }

    /// Returns the number of entries recorded in the current session.
    pub fn entry_count(&self) -> usize {
        self.lock_state().entries.len()
    }

    /// Returns a snapshot of the current session's entries.
    pub fn entries(&self) -> Vec<CaptionEntry> {
        self.lock_state().entries.clone()
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        // A poisoned lock still holds a consistent session: every mutation
        // above completes before the guard drops.
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
