use std::fmt::Debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde_json::{Map, Value};

use super::{WinStats, DEFAULT_KEY};
use crate::error::StatsError;

/// Loads and saves [`WinStats`]. Neither call fails: a store that cannot
/// reach its medium loads zeros and drops saves.
pub trait StatsStore: Debug {
    fn load(&self) -> WinStats;

    /// Overwrite the stored record with `stats`
    fn save(&mut self, stats: &WinStats);

    /// Reset the stored record to zero
    fn clear(&mut self) {
        self.save(&WinStats::default());
    }
}

impl StatsStore for Box<dyn StatsStore> {
    fn load(&self) -> WinStats {
        (**self).load()
    }

    fn save(&mut self, stats: &WinStats) {
        (**self).save(stats)
    }

    fn clear(&mut self) {
        (**self).clear()
    }
}

/// Stats kept as one key of a JSON object file, next to any other keys the
/// file already holds.
#[derive(Debug, Clone)]
pub struct FileStatsStore {
    path: PathBuf,
    key: String,
}

impl FileStatsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_key(path, DEFAULT_KEY)
    }

    pub fn with_key(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        FileStatsStore {
            path: path.into(),
            key: key.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stats record. `Ok(None)` when the file or key is absent.
    ///
    /// A record object with some bad counters keeps its good ones; each bad
    /// or missing counter reads as zero.
    pub fn try_load(&self) -> Result<Option<WinStats>, StatsError> {
        let Some(mut record) = self.read_record()? else {
            return Ok(None);
        };
        let Some(value) = record.remove(&self.key) else {
            return Ok(None);
        };
        match serde_json::from_value(value.clone()) {
            Ok(stats) => Ok(Some(stats)),
            Err(e) => match salvage(&value) {
                Some(stats) => {
                    warn!("{}: {e}; keeping valid counters", self.path.display());
                    Ok(Some(stats))
                }
                None => Err(StatsError::Parse {
                    path: self.path.clone(),
                    source: e,
                }),
            },
        }
    }

    /// Write the stats record atomically via a sibling temp file.
    pub fn try_save(&self, stats: &WinStats) -> Result<(), StatsError> {
        // A corrupt file is replaced rather than blocking the save
        let mut record = match self.read_record() {
            Ok(record) => record.unwrap_or_default(),
            Err(e) => {
                warn!("{e}; overwriting");
                Map::new()
            }
        };
        record.insert(self.key.clone(), serde_json::to_value(stats)?);
        let json = serde_json::to_string_pretty(&Value::Object(record))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }
        let tmp = self.tmp_path();
        fs::write(&tmp, json).map_err(|e| self.write_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.write_error(e))?;
        Ok(())
    }

    fn read_record(&self) -> Result<Option<Map<String, Value>>, StatsError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StatsError::Read {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };
        let record = serde_json::from_str(&content).map_err(|e| StatsError::Parse {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(Some(record))
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_error(&self, source: std::io::Error) -> StatsError {
        StatsError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

/// Counters readable from a stats object, zero for the rest
fn salvage(value: &Value) -> Option<WinStats> {
    let fields = value.as_object()?;
    let counter = |name: &str| fields.get(name).and_then(Value::as_u64).unwrap_or(0);
    Some(WinStats {
        red_wins: counter("redWins"),
        yellow_wins: counter("yellowWins"),
        draws: counter("draws"),
    })
}

impl StatsStore for FileStatsStore {
    fn load(&self) -> WinStats {
        match self.try_load() {
            Ok(Some(stats)) => stats,
            Ok(None) => {
                debug!("no stats at {}, starting from zero", self.path.display());
                WinStats::default()
            }
            Err(e) => {
                warn!("{e}; starting from zero");
                WinStats::default()
            }
        }
    }

    fn save(&mut self, stats: &WinStats) {
        match self.try_save(stats) {
            Ok(()) => debug!("saved stats {:?} to {}", stats, self.path.display()),
            Err(e) => warn!("stats not saved: {e}"),
        }
    }
}

/// In-process store; counts saves so callers can check persistence happened.
#[derive(Debug, Clone, Default)]
pub struct MemoryStatsStore {
    stored: Option<WinStats>,
    saves: usize,
}

impl MemoryStatsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stats(stats: WinStats) -> Self {
        MemoryStatsStore {
            stored: Some(stats),
            saves: 0,
        }
    }

    pub fn stored(&self) -> Option<WinStats> {
        self.stored
    }

    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl StatsStore for MemoryStatsStore {
    fn load(&self) -> WinStats {
        self.stored.unwrap_or_default()
    }

    fn save(&mut self, stats: &WinStats) {
        self.stored = Some(*stats);
        self.saves += 1;
    }
}

/// Store for when there is nowhere to keep stats.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStatsStore;

impl StatsStore for UnavailableStatsStore {
    fn load(&self) -> WinStats {
        debug!("{}; using zero stats", StatsError::Unavailable);
        WinStats::default()
    }

    fn save(&mut self, _stats: &WinStats) {
        debug!("{}; save skipped", StatsError::Unavailable);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WinStats {
        WinStats {
            red_wins: 3,
            yellow_wins: 2,
            draws: 1,
        }
    }

    #[test]
    fn test_missing_file_loads_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStatsStore::new(dir.path().join("stats.json"));
        assert_eq!(store.load(), WinStats::default());
        assert!(store.try_load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStatsStore::new(dir.path().join("nested").join("stats.json"));

        store.save(&sample());

        assert_eq!(store.load(), sample());
        assert!(!dir.path().join("nested").join("stats.json.tmp").exists());
        let reopened = FileStatsStore::new(store.path());
        assert_eq!(reopened.load(), sample());
    }

    #[test]
    fn test_record_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        let mut store = FileStatsStore::new(&path);
        store.save(&sample());

        let record: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            record,
            serde_json::json!({ "winStats": { "redWins": 3, "yellowWins": 2, "draws": 1 } })
        );
    }

    #[test]
    fn test_save_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        fs::write(&path, r#"{"theme":"dark","winStats":{"redWins":1,"yellowWins":0,"draws":0}}"#)
            .unwrap();

        let mut store = FileStatsStore::new(&path);
        store.save(&sample());

        let record: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(record["theme"], "dark");
        assert_eq!(store.load(), sample());
    }

    #[test]
    fn test_malformed_file_loads_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        fs::write(&path, "not json at all").unwrap();

        let store = FileStatsStore::new(&path);
        assert_eq!(store.load(), WinStats::default());
        assert!(matches!(store.try_load(), Err(StatsError::Parse { .. })));
    }

    #[test]
    fn test_bad_counter_keeps_the_others() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        fs::write(&path, r#"{"winStats":{"redWins":"many","yellowWins":-3,"draws":2}}"#).unwrap();

        let store = FileStatsStore::new(&path);
        assert_eq!(
            store.load(),
            WinStats {
                red_wins: 0,
                yellow_wins: 0,
                draws: 2
            }
        );
    }

    #[test]
    fn test_non_object_value_loads_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        fs::write(&path, r#"{"winStats":[1,2,3]}"#).unwrap();

        let store = FileStatsStore::new(&path);
        assert_eq!(store.load(), WinStats::default());
        assert!(matches!(store.try_load(), Err(StatsError::Parse { .. })));
    }

    #[test]
    fn test_large_counter_survives_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        let record = r#"{"winStats":{"redWins":4294967296,"yellowWins":7,"draws":2}}"#;
        fs::write(&path, record).unwrap();

        let mut store = FileStatsStore::new(&path);
        let mut stats = store.load();
        assert_eq!(stats.red_wins, 4_294_967_296);
        assert_eq!(stats.yellow_wins, 7);

        stats.draws += 1;
        store.save(&stats);
        let reloaded = FileStatsStore::new(&path).load();
        assert_eq!(reloaded.red_wins, 4_294_967_296);
        assert_eq!(reloaded.yellow_wins, 7);
        assert_eq!(reloaded.draws, 3);
    }

    #[test]
    fn test_clear_zeroes_file_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        let mut store = FileStatsStore::new(&path);
        store.save(&sample());

        store.clear();
        assert_eq!(FileStatsStore::new(&path).load(), WinStats::default());
    }

    #[test]
    fn test_save_over_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        fs::write(&path, "{{{").unwrap();

        let mut store = FileStatsStore::new(&path);
        store.save(&sample());
        assert_eq!(store.load(), sample());
    }

    #[test]
    fn test_custom_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        let mut store = FileStatsStore::with_key(&path, "connectFour");
        store.save(&sample());

        assert_eq!(FileStatsStore::new(&path).load(), WinStats::default());
        assert_eq!(store.load(), sample());
    }

    #[test]
    fn test_unwritable_location_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "").unwrap();

        // Parent "directory" is a regular file
        let mut store = FileStatsStore::new(blocker.join("stats.json"));
        store.save(&sample());
        assert_eq!(store.load(), WinStats::default());
    }

    #[test]
    fn test_unavailable_store() {
        let mut store = UnavailableStatsStore;
        store.save(&sample());
        assert_eq!(store.load(), WinStats::default());
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStatsStore::new();
        assert_eq!(store.load(), WinStats::default());
        store.save(&sample());
        assert_eq!(store.load(), sample());
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_boxed_store_delegates() {
        let mut store: Box<dyn StatsStore> = Box::new(MemoryStatsStore::new());
        store.save(&sample());
        assert_eq!(store.load(), sample());
        store.clear();
        assert_eq!(store.load(), WinStats::default());
    }
}
