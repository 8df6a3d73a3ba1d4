// In-memory persistence backend
// Author: kelexine (https://github.com/kelexine)

use super::{PersistenceBackend, SettingsRecord};
use parking_lot::Mutex;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Keeps the last saved record in memory.
///
/// `fail_saves` makes every subsequent save return an error, which lets
/// callers exercise the persistence failure path.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    record: Mutex<Option<SettingsRecord>>,
    saves: AtomicUsize,
    fail_saves: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that already holds `record`.
    pub fn with_record(record: SettingsRecord) -> Self {
        Self {
            record: Mutex::new(Some(record)),
            ..Self::default()
        }
    }

    /// The last record saved (or seeded).
    pub fn record(&self) -> Option<SettingsRecord> {
        self.record.lock().clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }
}

impl PersistenceBackend for MemoryBackend {
    fn load(&self) -> io::Result<Option<SettingsRecord>> {
        Ok(self.record.lock().clone())
    }

    fn save(&self, record: &SettingsRecord) -> io::Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                "memory backend configured to fail",
            ));
        }
        *self.record.lock() = Some(record.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
