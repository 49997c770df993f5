//! Pipeline events and observers.
//!
//! Transformation code never logs directly. It reports [`PipelineEvent`]s to a
//! [`PipelineObserver`] supplied by the caller, which decides where they go:
//!
//! - [`LogObserver`] forwards to the `log` facade (the binary installs `env_logger`)
//! - [`FileObserver`] appends one line per event to a local file
//! - [`CompositeObserver`] fans out to several observers

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

/// Severity classification used for observer callbacks and log levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PipelineSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (a row or the run failed).
    Error,
    /// Critical error (I/O or other infrastructure failures).
    Critical,
}

impl PipelineSeverity {
    fn log_level(self) -> log::Level {
        match self {
            PipelineSeverity::Info => log::Level::Info,
            PipelineSeverity::Warning => log::Level::Warn,
            PipelineSeverity::Error | PipelineSeverity::Critical => log::Level::Error,
        }
    }
}

/// Which input document an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Movies,
    Genres,
    Writers,
    Reference,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InputKind::Movies => "movies",
            InputKind::Genres => "genres",
            InputKind::Writers => "writers",
            InputKind::Reference => "reference",
        })
    }
}

/// Parallel id/name list of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListField {
    Cast,
    Writers,
}

impl fmt::Display for ListField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ListField::Cast => "Cast",
            ListField::Writers => "Writer",
        })
    }
}

/// Events reported while running the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    InputLoaded {
        kind: InputKind,
        path: PathBuf,
        entries: usize,
    },
    InputFailed {
        kind: InputKind,
        path: PathBuf,
        severity: PipelineSeverity,
        error: String,
    },
    /// Id and name lists of a row differ in length; the list was emptied.
    ListMismatch { movie_id: String, field: ListField },
    /// A row could not be formatted and was dropped.
    RowSkipped { movie_id: String, error: String },
    OutputWritten { path: PathBuf, records: usize },
    ReferenceCompared { matches: bool },
}

impl PipelineEvent {
    pub fn severity(&self) -> PipelineSeverity {
        match self {
            PipelineEvent::InputLoaded { .. } | PipelineEvent::OutputWritten { .. } => {
                PipelineSeverity::Info
            }
            PipelineEvent::InputFailed { severity, .. } => *severity,
            PipelineEvent::ListMismatch { .. } => PipelineSeverity::Warning,
            PipelineEvent::RowSkipped { .. } => PipelineSeverity::Error,
            PipelineEvent::ReferenceCompared { matches: true } => PipelineSeverity::Info,
            PipelineEvent::ReferenceCompared { matches: false } => PipelineSeverity::Warning,
        }
    }
}

impl fmt::Display for PipelineEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineEvent::InputLoaded {
                kind,
                path,
                entries,
            } => write!(f, "Loaded {kind} input {} ({entries} entries)", path.display()),
            PipelineEvent::InputFailed {
                kind, path, error, ..
            } => write!(f, "Failed to load {kind} input {}: {error}", path.display()),
            PipelineEvent::ListMismatch { movie_id, field } => {
                write!(f, "{field} ID/name mismatch (ID: {movie_id})")
            }
            PipelineEvent::RowSkipped { movie_id, error } => {
                write!(f, "Unable to process movie with ID {movie_id}: {error}")
            }
            PipelineEvent::OutputWritten { path, records } => write!(
                f,
                "Output successfully written to {} ({records} records)",
                path.display()
            ),
            PipelineEvent::ReferenceCompared { matches: true } => {
                f.write_str("Output matches the expected reference data.")
            }
            PipelineEvent::ReferenceCompared { matches: false } => {
                f.write_str("Output does not match the expected reference data.")
            }
        }
    }
}

/// Observer hook for pipeline events.
pub trait PipelineObserver: Send + Sync {
    fn on_event(&self, event: &PipelineEvent);
}

/// Report `event` to `observer` if one is configured.
pub(crate) fn emit(observer: Option<&dyn PipelineObserver>, event: PipelineEvent) {
    if let Some(obs) = observer {
        obs.on_event(&event);
    }
}

/// Forwards events to the `log` facade at their severity.
#[derive(Debug, Clone, Copy)]
pub struct LogObserver {
    min_severity: PipelineSeverity,
}

impl LogObserver {
    /// Log every event.
    pub fn new() -> Self {
        Self {
            min_severity: PipelineSeverity::Info,
        }
    }

    /// Drop events below `min_severity` before they reach the logger.
    pub fn with_min_severity(min_severity: PipelineSeverity) -> Self {
        Self { min_severity }
    }
}

impl Default for LogObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineObserver for LogObserver {
    fn on_event(&self, event: &PipelineEvent) {
        let severity = event.severity();
        if severity < self.min_severity {
            return;
        }
        log::log!(target: "movie_enrichment", severity.log_level(), "{event}");
    }
}

/// An observer that fans out events to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn PipelineObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn PipelineObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl PipelineObserver for CompositeObserver {
    fn on_event(&self, event: &PipelineEvent) {
        for o in &self.observers {
            o.on_event(event);
        }
    }
}

/// Appends pipeline events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl PipelineObserver for FileObserver {
    fn on_event(&self, event: &PipelineEvent) {
        self.append_line(&format!(
            "{} {:?} {}",
            unix_ts(),
            event.severity(),
            event
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_comparison_severity_depends_on_outcome() {
        assert_eq!(
            PipelineEvent::ReferenceCompared { matches: true }.severity(),
            PipelineSeverity::Info
        );
        assert_eq!(
            PipelineEvent::ReferenceCompared { matches: false }.severity(),
            PipelineSeverity::Warning
        );
    }

    #[test]
    fn list_mismatch_message_names_the_row() {
        let event = PipelineEvent::ListMismatch {
            movie_id: "tt0111161".to_string(),
            field: ListField::Writers,
        };
        assert_eq!(event.severity(), PipelineSeverity::Warning);
        assert_eq!(event.to_string(), "Writer ID/name mismatch (ID: tt0111161)");
    }

    #[test]
    fn file_observer_appends_one_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.log");
        let obs = FileObserver::new(&path);

        obs.on_event(&PipelineEvent::RowSkipped {
            movie_id: "tt1".to_string(),
            error: "missing required field 'rank'".to_string(),
        });
        obs.on_event(&PipelineEvent::ReferenceCompared { matches: true });

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Error Unable to process movie with ID tt1"));
        assert!(lines[1].contains("Info Output matches"));
    }
}
