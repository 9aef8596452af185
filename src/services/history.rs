use tracing::debug;
use uuid::Uuid;

use crate::model::history::HistoryEntry;
use crate::model::listing::{Listing, TranslatedListing};
use crate::services::storage::{KvStore, StorageError};

const HISTORY_KEY: &str = "history";

pub const HISTORY_CAPACITY: usize = 20;

pub struct HistoryStore<S: KvStore> {
    store: S,
}

impl<S: KvStore> HistoryStore<S> {
    pub fn new(store: S) -> Self {
        HistoryStore { store }
    }

    /// Entradas do mais recente para o mais antigo.
    pub fn list(&self) -> Result<Vec<HistoryEntry>, StorageError> {
        let Some(data) = self.store.get(HISTORY_KEY)? else {
            return Ok(Vec::new());
        };

        Ok(serde_json::from_str(&data)?)
    }

    pub fn record(
        &self,
        source: Listing,
        translated: TranslatedListing,
    ) -> Result<HistoryEntry, StorageError> {
        let mut entries = self.list()?;

        let source_url = source.url.clone();
        let target_language = translated.target_language;

        // Dedup pela URL: a gravação nova substitui qualquer versão anterior.
        entries.retain(|e| e.source_url != source_url);

        let entry = HistoryEntry {
            schema_version: 1,
            id: Uuid::new_v4().to_string(),
            source_url,
            source,
            translated,
            target_language,
            created_at: chrono::Utc::now(),
        };

        entries.insert(0, entry.clone());

        if entries.len() > HISTORY_CAPACITY {
            debug!(
                dropped = entries.len() - HISTORY_CAPACITY,
                "history capacity reached, evicting oldest"
            );
            entries.truncate(HISTORY_CAPACITY);
        }

        self.save(&entries)?;

        Ok(entry)
    }

    pub fn remove(&self, id: &str) -> Result<bool, StorageError> {
        let mut entries = self.list()?;
        let before = entries.len();

        entries.retain(|e| e.id != id);

        if entries.len() == before {
            return Ok(false);
        }

        self.save(&entries)?;
        Ok(true)
    }

    pub fn clear(&self) -> Result<bool, StorageError> {
        self.store.remove(HISTORY_KEY)?;
        Ok(true)
    }

    fn save(&self, entries: &[HistoryEntry]) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(entries)?;
        self.store.set(HISTORY_KEY, &json)
    }
}
