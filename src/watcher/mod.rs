//! Live reload of the presented file.
//!
//! Editors rarely write a file in place: many write a temp file and rename
//! it over the original, which replaces the inode. The parent directory is
//! watched instead of the file, and events are filtered by file name.
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use thiserror::Error;

use crate::app::Message;

/// Default quiet period before a burst of events counts as one change.
pub const DEBOUNCE: Duration = Duration::from_millis(200);

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("watching {path} failed: {source}")]
    Notify {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
}

/// Which filesystem events concern the deck file.
#[derive(Debug, Clone)]
struct Target {
    file: PathBuf,
    dir: PathBuf,
    name: Option<OsString>,
}

impl Target {
    fn new(path: &Path) -> Self {
        // Backends report canonical paths
        let file = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let dir = match file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let name = file.file_name().map(OsString::from);
        Self { file, dir, name }
    }

    fn matches(&self, event: &Event) -> bool {
        event.paths.iter().any(|path| {
            *path == self.file
                || *path == self.dir
                || (self.name.is_some() && path.file_name() == self.name.as_deref())
        })
    }
}

/// Collapses a burst of events into one change once things go quiet.
#[derive(Debug, Clone, Copy)]
struct Debouncer {
    quiet: Duration,
    last_event: Option<Instant>,
}

impl Debouncer {
    const fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            last_event: None,
        }
    }

    fn record(&mut self, at: Instant) {
        self.last_event = Some(at);
    }

    fn fire(&mut self, now: Instant) -> bool {
        match self.last_event {
            Some(at) if now.duration_since(at) >= self.quiet => {
                self.last_event = None;
                true
            }
            _ => false,
        }
    }
}

/// Watches one deck file and reports debounced changes.
pub struct FileWatcher {
    // Dropping the backend stops event delivery
    _backend: RecommendedWatcher,
    events: Receiver<notify::Result<Event>>,
    target: Target,
    debouncer: Debouncer,
}

impl FileWatcher {
    /// Start watching `path`.
    ///
    /// # Errors
    /// Returns [`WatchError::Notify`] when the backend cannot be created or
    /// the file's directory cannot be watched.
    pub fn new(path: impl AsRef<Path>, debounce: Duration) -> Result<Self, WatchError> {
        let target = Target::new(path.as_ref());
        let to_error = |source| WatchError::Notify {
            path: target.file.clone(),
            source,
        };

        let (event_tx, events) = mpsc::channel();
        let mut backend = notify::recommended_watcher(move |res| {
            let _ = event_tx.send(res);
        })
        .map_err(to_error)?;
        backend
            .watch(&target.dir, RecursiveMode::NonRecursive)
            .map_err(to_error)?;
        tracing::debug!(file = %target.file.display(), "watching deck");

        Ok(Self {
            _backend: backend,
            events,
            target,
            debouncer: Debouncer::new(debounce),
        })
    }

    /// Watch `path` on a background thread, posting the new file contents as
    /// [`Message::FileChanged`] after each debounced change.
    ///
    /// The thread ends once the receiving end of `tx` is dropped.
    ///
    /// # Errors
    /// See [`FileWatcher::new`].
    pub fn spawn(
        path: impl AsRef<Path>,
        debounce: Duration,
        tx: Sender<Message>,
    ) -> Result<JoinHandle<()>, WatchError> {
        let mut watcher = Self::new(path, debounce)?;
        Ok(thread::spawn(move || {
            loop {
                if watcher.poll(Instant::now()) && !watcher.forward(&tx) {
                    break;
                }
                thread::sleep(POLL_INTERVAL);
            }
            tracing::debug!("watcher stopped");
        }))
    }

    /// Drain pending events. Returns true when a change has settled.
    pub fn poll(&mut self, now: Instant) -> bool {
        while let Ok(event) = self.events.try_recv() {
            match event {
                Ok(event) if self.target.matches(&event) => self.debouncer.record(now),
                Ok(event) => tracing::trace!(kind = ?event.kind, "unrelated fs event"),
                Err(err) => tracing::warn!(%err, "watch backend error"),
            }
        }
        self.debouncer.fire(now)
    }

    /// Read the file and send it. Returns false once nobody is listening.
    fn forward(&self, tx: &Sender<Message>) -> bool {
        let file = &self.target.file;
        match std::fs::read_to_string(file) {
            Ok(contents) => {
                tracing::info!(file = %file.display(), "deck changed on disk");
                tx.send(Message::FileChanged(contents)).is_ok()
            }
            Err(err) => {
                // Mid-save; the next event retries
                tracing::warn!(file = %file.display(), %err, "could not read changed deck");
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::EventKind;
    use notify::event::EventAttributes;

    fn fs_event(paths: &[PathBuf]) -> Event {
        Event {
            kind: EventKind::Any,
            paths: paths.to_vec(),
            attrs: EventAttributes::new(),
        }
    }

    fn deck_in_tempdir() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().canonicalize().unwrap().join("talk.md");
        std::fs::write(&path, "# one").unwrap();
        (dir, path)
    }

    #[test]
    fn test_target_matches_file_and_directory_events() {
        let (_dir, path) = deck_in_tempdir();
        let target = Target::new(&path);

        assert!(target.matches(&fs_event(&[path.clone()])));
        assert!(target.matches(&fs_event(&[target.dir.clone()])));
        assert!(!target.matches(&fs_event(&[target.dir.join("notes.md")])));
    }

    #[test]
    fn test_target_of_bare_file_name_watches_current_dir() {
        let target = Target::new(Path::new("no-such-deck.md"));
        assert_eq!(target.dir, PathBuf::from("."));
    }

    #[test]
    fn test_debouncer_waits_for_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(100));
        assert!(!debouncer.fire(start));

        debouncer.record(start);
        assert!(!debouncer.fire(start + Duration::from_millis(50)));
        debouncer.record(start + Duration::from_millis(50));
        assert!(!debouncer.fire(start + Duration::from_millis(120)));
        assert!(debouncer.fire(start + Duration::from_millis(150)));
        assert!(!debouncer.fire(start + Duration::from_millis(400)), "fires once per burst");
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let result = FileWatcher::new("/definitely/not/here/talk.md", DEBOUNCE);
        assert!(matches!(result, Err(WatchError::Notify { .. })));
    }

    #[test]
    fn test_spawn_posts_new_contents() {
        let (_dir, path) = deck_in_tempdir();
        let (tx, rx) = mpsc::channel();
        let _handle = FileWatcher::spawn(&path, Duration::from_millis(50), tx).unwrap();

        // Let the backend register the watch
        thread::sleep(Duration::from_millis(300));
        std::fs::write(&path, "# two").unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut latest = None;
        while Instant::now() < deadline {
            if let Ok(Message::FileChanged(contents)) = rx.recv_timeout(Duration::from_millis(100))
            {
                latest = Some(contents);
                break;
            }
        }
        assert_eq!(latest.as_deref(), Some("# two"));
    }
}
