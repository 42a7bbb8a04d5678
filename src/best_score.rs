use std::cell::Cell;
use std::fs;
use std::path::PathBuf;

use log::{info, warn};
use serde::{Deserialize, Serialize};

/// One persisted integer. Read once at startup, written on the
/// ended -> running transition with the monotonic max of the run.
pub trait BestScoreStore {
    fn load(&self) -> u64;
    fn save(&self, best: u64);
}

/// Commit a finished run: the stored value only ever grows.
pub fn commit(store: &dyn BestScoreStore, best: u64, final_score: u64) -> u64 {
    let new_best = best.max(final_score);
    store.save(new_best);
    new_best
}

#[derive(Debug, Serialize, Deserialize)]
struct BestScoreFile {
    best: u64,
}

/// JSON file next to the binary, in the spirit of the log file. A missing
/// or unreadable file is a fresh start, never an error.
pub struct FileBestScore {
    path: PathBuf,
}

impl FileBestScore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileBestScore { path: path.into() }
    }
}

impl BestScoreStore for FileBestScore {
    fn load(&self) -> u64 {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(_) => {
                info!("no best score file, starting at 0");
                return 0;
            }
        };
        match serde_json::from_str::<BestScoreFile>(&json) {
            Ok(file) => file.best,
            Err(e) => {
                warn!("best score file unreadable, starting at 0: {}", e);
                0
            }
        }
    }

    fn save(&self, best: u64) {
        match serde_json::to_string(&BestScoreFile { best }) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    warn!("failed to write best score: {}", e);
                }
            }
            Err(e) => warn!("failed to encode best score: {}", e),
        }
    }
}

/// In-memory stand-in for tests.
#[derive(Default)]
pub struct MemoryBestScore {
    best: Cell<u64>,
}

impl BestScoreStore for MemoryBestScore {
    fn load(&self) -> u64 {
        self.best.get()
    }

    fn save(&self, best: u64) {
        self.best.set(best);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sky-dash-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn missing_file_reads_zero() {
        let store = FileBestScore::new(temp_path("missing"));
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn malformed_file_reads_zero() {
        let path = temp_path("malformed");
        fs::write(&path, "not a number at all").unwrap();
        let store = FileBestScore::new(&path);
        assert_eq!(store.load(), 0);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn save_then_load_round_trips() {
        let path = temp_path("roundtrip");
        let store = FileBestScore::new(&path);
        store.save(417);
        assert_eq!(store.load(), 417);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn commit_is_a_monotonic_max() {
        let store = MemoryBestScore::default();
        let best = commit(&store, 0, 120);
        assert_eq!(best, 120);
        // A worse run never lowers the persisted best.
        let best = commit(&store, best, 40);
        assert_eq!(best, 120);
        assert_eq!(store.load(), 120);
        let best = commit(&store, best, 300);
        assert_eq!(best, 300);
        assert_eq!(store.load(), 300);
    }
}
