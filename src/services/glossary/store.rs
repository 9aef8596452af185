use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use super::hash;
use super::model::{GlossaryCategory, GlossaryDraft, GlossaryEntry, GlossaryPatch};
use super::normalize;
use crate::services::storage::{KvStore, StorageError};

const GLOSSARY_KEY: &str = "glossary";

#[derive(Debug, Error)]
pub enum GlossaryError {
    #[error("glossary term already exists: {0}")]
    DuplicateTerm(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub struct GlossaryStore<S: KvStore> {
    store: S,
}

impl<S: KvStore> GlossaryStore<S> {
    pub fn new(store: S) -> Self {
        GlossaryStore { store }
    }

    pub fn list(&self) -> Result<Vec<GlossaryEntry>, StorageError> {
        let Some(data) = self.store.get(GLOSSARY_KEY)? else {
            return Ok(Vec::new());
        };

        let mut entries: Vec<GlossaryEntry> = serde_json::from_str(&data)?;

        // Registros antigos podem não ter normalized/hash; completa na
        // leitura e persiste a migração.
        let mut migrated = false;
        for e in entries.iter_mut() {
            migrated |= ensure_norm_hash(e);
        }

        if migrated {
            self.save(&entries)?;
        }

        Ok(entries)
    }

    pub fn add(&self, draft: GlossaryDraft) -> Result<GlossaryEntry, GlossaryError> {
        let mut entries = self.list()?;
        let entry = build_entry(draft);

        if has_term(&entries, &entry.normalized, &entry.hash, None) {
            return Err(GlossaryError::DuplicateTerm(entry.korean));
        }

        entries.push(entry.clone());
        self.save(&entries)?;

        Ok(entry)
    }

    pub fn update(&self, id: &str, patch: GlossaryPatch) -> Result<bool, GlossaryError> {
        let mut entries = self.list()?;

        let Some(pos) = entries.iter().position(|e| e.id == id) else {
            return Ok(false);
        };

        if let Some(korean) = &patch.korean {
            let norm = normalize::normalize(korean);
            let h = hash::hash_norm(&norm);

            // O termo novo não pode colidir com outra entrada.
            if has_term(&entries, &norm, &h, Some(id)) {
                return Err(GlossaryError::DuplicateTerm(korean.clone()));
            }

            let e = &mut entries[pos];
            e.korean = korean.clone();
            e.normalized = norm;
            e.hash = h;
        }

        let e = &mut entries[pos];

        if let Some(v) = patch.english {
            e.english = v;
        }
        if let Some(v) = patch.japanese {
            e.japanese = v;
        }
        if let Some(v) = patch.category {
            e.category = v;
        }
        if let Some(v) = patch.note {
            e.note = Some(v);
        }

        e.updated_at = chrono::Utc::now();

        self.save(&entries)?;
        Ok(true)
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

    /// Busca por substring: korean/english sem caixa, japanese exata
    /// (case folding não se aplica a CJK).
    pub fn search(&self, query: &str) -> Result<Vec<GlossaryEntry>, StorageError> {
        let entries = self.list()?;

        let q = query.trim();
        if q.is_empty() {
            return Ok(entries);
        }

        let q_lower = q.to_lowercase();

        Ok(entries
            .into_iter()
            .filter(|e| {
                e.korean.to_lowercase().contains(&q_lower)
                    || e.english.to_lowercase().contains(&q_lower)
                    || e.japanese.contains(q)
            })
            .collect())
    }

    pub fn by_category(
        &self,
        category: GlossaryCategory,
    ) -> Result<Vec<GlossaryEntry>, StorageError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|e| e.category == category)
            .collect())
    }

    /// Importação em lote: chaves já existentes são puladas (nunca
    /// sobrescritas, nunca abortam o lote). Retorna quantas entraram.
    pub fn import(&self, drafts: Vec<GlossaryDraft>) -> Result<usize, StorageError> {
        let mut entries = self.list()?;
        let mut added = 0usize;
        let mut skipped = 0usize;

        for draft in drafts {
            let entry = build_entry(draft);

            if has_term(&entries, &entry.normalized, &entry.hash, None) {
                skipped += 1;
                continue;
            }

            entries.push(entry);
            added += 1;
        }

        if added > 0 {
            self.save(&entries)?;
        }

        if skipped > 0 {
            debug!(added, skipped, "glossary import finished with skips");
        }

        Ok(added)
    }

    fn save(&self, entries: &[GlossaryEntry]) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(entries)?;
        self.store.set(GLOSSARY_KEY, &json)
    }
}

fn has_term(entries: &[GlossaryEntry], norm: &str, hash: &str, skip_id: Option<&str>) -> bool {
    entries.iter().any(|e| {
        skip_id.map_or(true, |id| e.id != id) && e.hash == hash && e.normalized == norm
    })
}

fn build_entry(draft: GlossaryDraft) -> GlossaryEntry {
    let normalized = normalize::normalize(&draft.korean);
    let h = hash::hash_norm(&normalized);
    let now = chrono::Utc::now();

    GlossaryEntry {
        schema_version: 1,
        id: Uuid::new_v4().to_string(),
        korean: draft.korean,
        english: draft.english,
        japanese: draft.japanese,
        category: draft.category,
        note: draft.note,
        normalized,
        hash: h,
        created_at: now,
        updated_at: now,
    }
}

fn ensure_norm_hash(e: &mut GlossaryEntry) -> bool {
    let mut changed = false;

    if e.normalized.is_empty() {
        e.normalized = normalize::normalize(&e.korean);
        changed = true;
    }

    if e.hash.is_empty() {
        e.hash = hash::hash_norm(&e.normalized);
        changed = true;
    }

    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::storage::MemoryStore;

    fn draft(korean: &str, english: &str, category: GlossaryCategory) -> GlossaryDraft {
        GlossaryDraft {
            korean: korean.to_string(),
            english: english.to_string(),
            japanese: String::new(),
            category,
            note: None,
        }
    }

    #[test]
    fn add_then_duplicate_is_rejected() {
        let glossary = GlossaryStore::new(MemoryStore::new());

        glossary
            .add(draft("수제", "handmade", GlossaryCategory::General))
            .unwrap();

        let err = glossary
            .add(draft("수제", "hand-made", GlossaryCategory::General))
            .unwrap_err();

        assert!(matches!(err, GlossaryError::DuplicateTerm(t) if t == "수제"));
        assert_eq!(glossary.list().unwrap().len(), 1);
    }

    #[test]
    fn duplicate_check_uses_normalized_term() {
        let glossary = GlossaryStore::new(MemoryStore::new());

        glossary
            .add(draft("수제 가죽", "handmade leather", GlossaryCategory::Material))
            .unwrap();

        // Mesmo termo com espaçamento diferente é a mesma chave.
        assert!(glossary
            .add(draft("  수제   가죽 ", "x", GlossaryCategory::Material))
            .is_err());
    }

    #[test]
    fn other_language_fields_may_repeat() {
        let glossary = GlossaryStore::new(MemoryStore::new());

        glossary
            .add(draft("수제", "handmade", GlossaryCategory::General))
            .unwrap();
        glossary
            .add(draft("손으로 만든", "handmade", GlossaryCategory::General))
            .unwrap();

        assert_eq!(glossary.list().unwrap().len(), 2);
    }

    #[test]
    fn search_is_case_insensitive_on_latin_field() {
        let glossary = GlossaryStore::new(MemoryStore::new());

        glossary
            .add(draft("수제", "Handmade leather wallet", GlossaryCategory::Product))
            .unwrap();

        let hits = glossary.search("handmade").unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].korean, "수제");
    }

    #[test]
    fn search_matches_korean_and_japanese_substrings() {
        let glossary = GlossaryStore::new(MemoryStore::new());

        let mut d = draft("가죽 지갑", "leather wallet", GlossaryCategory::Product);
        d.japanese = "革の財布".to_string();
        glossary.add(d).unwrap();

        assert_eq!(glossary.search("가죽").unwrap().len(), 1);
        assert_eq!(glossary.search("財布").unwrap().len(), 1);
        assert!(glossary.search("지도").unwrap().is_empty());
    }

    #[test]
    fn empty_query_returns_everything() {
        let glossary = GlossaryStore::new(MemoryStore::new());

        glossary
            .add(draft("수제", "handmade", GlossaryCategory::General))
            .unwrap();

        assert_eq!(glossary.search("").unwrap().len(), 1);
        assert_eq!(glossary.search("   ").unwrap().len(), 1);
    }

    #[test]
    fn by_category_filters() {
        let glossary = GlossaryStore::new(MemoryStore::new());

        glossary
            .add(draft("가죽", "leather", GlossaryCategory::Material))
            .unwrap();
        glossary
            .add(draft("브라운", "brown", GlossaryCategory::Color))
            .unwrap();

        let materials = glossary.by_category(GlossaryCategory::Material).unwrap();

        assert_eq!(materials.len(), 1);
        assert_eq!(materials[0].english, "leather");
    }

    #[test]
    fn update_patches_fields_and_bumps_timestamp() {
        let glossary = GlossaryStore::new(MemoryStore::new());

        let entry = glossary
            .add(draft("가죽", "lether", GlossaryCategory::Material))
            .unwrap();

        let updated = glossary
            .update(
                &entry.id,
                GlossaryPatch {
                    english: Some("leather".to_string()),
                    note: Some("typo fix".to_string()),
                    ..GlossaryPatch::default()
                },
            )
            .unwrap();
        assert!(updated);

        let entries = glossary.list().unwrap();
        assert_eq!(entries[0].english, "leather");
        assert_eq!(entries[0].note.as_deref(), Some("typo fix"));
        assert!(entries[0].updated_at >= entry.updated_at);

        assert!(!glossary.update("missing", GlossaryPatch::default()).unwrap());
    }

    #[test]
    fn update_rejects_collision_with_other_entry() {
        let glossary = GlossaryStore::new(MemoryStore::new());

        glossary
            .add(draft("가죽", "leather", GlossaryCategory::Material))
            .unwrap();
        let second = glossary
            .add(draft("원단", "fabric", GlossaryCategory::Material))
            .unwrap();

        let err = glossary
            .update(
                &second.id,
                GlossaryPatch {
                    korean: Some("가죽".to_string()),
                    ..GlossaryPatch::default()
                },
            )
            .unwrap_err();

        assert!(matches!(err, GlossaryError::DuplicateTerm(_)));

        // Renomear para o próprio termo não é colisão.
        assert!(glossary
            .update(
                &second.id,
                GlossaryPatch {
                    korean: Some("원단".to_string()),
                    ..GlossaryPatch::default()
                },
            )
            .unwrap());
    }

    #[test]
    fn import_skips_existing_and_reports_added_count() {
        let glossary = GlossaryStore::new(MemoryStore::new());

        glossary
            .add(draft("가죽", "leather", GlossaryCategory::Material))
            .unwrap();

        let added = glossary
            .import(vec![
                draft("가죽", "leather again", GlossaryCategory::Material),
                draft("브라운", "brown", GlossaryCategory::Color),
                // Duplicata dentro do próprio lote também é pulada.
                draft("브라운", "brown 2", GlossaryCategory::Color),
                draft("자수", "embroidery", GlossaryCategory::Technique),
            ])
            .unwrap();

        assert_eq!(added, 2);

        let entries = glossary.list().unwrap();
        assert_eq!(entries.len(), 3);
        // O existente não foi sobrescrito.
        assert_eq!(
            entries.iter().find(|e| e.korean == "가죽").unwrap().english,
            "leather"
        );
    }

    #[test]
    fn remove_is_tolerant_of_missing_id() {
        let glossary = GlossaryStore::new(MemoryStore::new());

        assert!(!glossary.remove("nope").unwrap());

        let entry = glossary
            .add(draft("가죽", "leather", GlossaryCategory::Material))
            .unwrap();

        assert!(glossary.remove(&entry.id).unwrap());
        assert!(glossary.list().unwrap().is_empty());
    }

    #[test]
    fn legacy_records_get_norm_hash_backfilled_on_read() {
        let store = MemoryStore::new();

        // Registro persistido por uma versão antiga: sem normalized/hash,
        // sem schema_version.
        store
            .set(
                "glossary",
                r#"[{"id":"legacy-1","korean":"수제","english":"handmade","japanese":"","category":"general"}]"#,
            )
            .unwrap();

        let glossary = GlossaryStore::new(&store);
        let entries = glossary.list().unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].schema_version, 1);
        assert!(!entries[0].normalized.is_empty());
        assert!(!entries[0].hash.is_empty());

        // E a chave migrada vale para dedup.
        assert!(glossary
            .add(draft("수제", "x", GlossaryCategory::General))
            .is_err());
    }
}
