use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;

/// Quiet period folding an editor's burst of writes into one change
const SETTLE: Duration = Duration::from_millis(200);

/// Watches one file through its parent directory, so editors that replace
/// the file on save are still seen
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<notify::Result<Event>>,
    target: PathBuf,
}

impl FileWatcher {
    pub fn new(target: &Path) -> anyhow::Result<Self> {
        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default(),
        )?;

        let dir = target
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        watcher.watch(dir, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            target: target.to_path_buf(),
        })
    }

    /// Block until the target changed. `None` once the watcher is gone.
    pub fn next_change(&self) -> Option<()> {
        loop {
            let event = self.receiver.recv().ok()?;
            if matches!(event, Ok(ref e) if self.touches_target(e)) {
                while self.receiver.recv_timeout(SETTLE).is_ok() {}
                return Some(());
            }
        }
    }

    fn touches_target(&self, event: &Event) -> bool {
        matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
            && event
                .paths
                .iter()
                .any(|p| p.file_name() == self.target.file_name())
    }
}
