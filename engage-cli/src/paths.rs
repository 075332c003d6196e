//! Where the CLI keeps its config file and logs.
//!
//! Directories follow platform conventions through `directories`: XDG on
//! Linux, `~/Library` on macOS, `AppData` on Windows.

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use directories::ProjectDirs;

/// Archived logs kept next to `latest.log`.
pub const KEEP_ARCHIVED_LOGS: usize = 25;

const LATEST_LOG: &str = "latest.log";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "engage", "engage")
}

/// Default config file, e.g. `~/.config/engage/config.json` on Linux.
pub fn config_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
}

/// A directory holding one live log and a bounded set of archived ones.
#[derive(Debug, Clone)]
pub struct LogDir {
    dir: PathBuf,
    keep: usize,
}

impl LogDir {
    /// The platform cache directory, or `None` without a home directory.
    pub fn platform() -> Option<Self> {
        project_dirs().map(|dirs| Self::new(dirs.cache_dir(), KEEP_ARCHIVED_LOGS))
    }

    pub fn new(dir: impl Into<PathBuf>, keep: usize) -> Self {
        Self {
            dir: dir.into(),
            keep,
        }
    }

    /// Path of the log written by this run.
    pub fn latest(&self) -> PathBuf {
        self.dir.join(LATEST_LOG)
    }

    /// Archives the previous run's log and prunes the oldest archives.
    ///
    /// Creates the directory if needed. Failing to archive or prune a single
    /// file is not an error; the next run tries again.
    pub fn rotate(&self) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;

        let latest = self.latest();
        if latest.exists() {
            let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
            let _ = fs::rename(&latest, self.archive_path(&stamp));
        }

        self.prune();
        Ok(())
    }

    /// First free `<stamp>.log` name, suffixed when a run in the same second
    /// already took it.
    fn archive_path(&self, stamp: &str) -> PathBuf {
        let mut path = self.dir.join(format!("{}.log", stamp));
        let mut n = 1;
        while path.exists() {
            path = self.dir.join(format!("{}_{}.log", stamp, n));
            n += 1;
        }
        path
    }

    fn archived(&self) -> Vec<PathBuf> {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };
        let mut logs: Vec<(Option<std::time::SystemTime>, PathBuf)> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| is_archive(p))
            .map(|p| (fs::metadata(&p).and_then(|m| m.modified()).ok(), p))
            .collect();
        // Oldest first; names break ties since they carry the timestamp.
        logs.sort();
        logs.into_iter().map(|(_, p)| p).collect()
    }

    fn prune(&self) {
        let logs = self.archived();
        let excess = logs.len().saturating_sub(self.keep);
        for path in logs.iter().take(excess) {
            let _ = fs::remove_file(path);
        }
    }
}

fn is_archive(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "log")
        && path.file_name().is_some_and(|name| name != LATEST_LOG)
}
