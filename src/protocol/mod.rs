use serde_json::{json, Value};
use tracing::warn;

use crate::model::listing::{ImageAsset, ImageText, Listing, TranslatedListing};
use crate::services::batch::{self, BatchItem, CancelToken};
use crate::services::glossary::model::{GlossaryCategory, GlossaryDraft, GlossaryPatch};
use crate::services::glossary::store::GlossaryStore;
use crate::services::history::HistoryStore;
use crate::services::reconciler;
use crate::services::storage::{data_base_dir, FileStore, KvStore};
use crate::services::validator;

mod command;
use command::Command;

fn get_cmd(req: &Value) -> &str {
    req.get("cmd").and_then(|v| v.as_str()).unwrap_or("")
}

fn get_id(req: &Value) -> Value {
    req.get("id").cloned().unwrap_or(Value::Null)
}

fn get_payload<'a>(req: &'a Value) -> &'a Value {
    static EMPTY: Value = Value::Null;
    req.get("payload").unwrap_or(&EMPTY)
}

fn ok(id: Value, payload: Value) -> String {
    json!({
        "id": id,
        "status": "ok",
        "payload": payload
    })
    .to_string()
}

fn err(id: Value, message: impl Into<String>) -> String {
    json!({
        "id": id,
        "status": "error",
        "message": message.into()
    })
    .to_string()
}

fn parse_field<T: serde::de::DeserializeOwned>(payload: &Value, field: &str) -> Result<T, String> {
    let v = payload
        .get(field)
        .cloned()
        .ok_or_else(|| format!("payload.{field} is required"))?;

    serde_json::from_value(v).map_err(|e| format!("invalid payload.{field}: {e}"))
}

fn get_str_field(payload: &Value, field: &str) -> Result<String, String> {
    let s = payload
        .get(field)
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();

    if s.is_empty() {
        return Err(format!("payload.{field} is required"));
    }

    Ok(s)
}

pub fn handle(input: &str) -> String {
    handle_with(input, &FileStore::new(data_base_dir()))
}

pub fn handle_with<S: KvStore>(input: &str, store: &S) -> String {
    let req: Value = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(_) => {
            return json!({
                "status": "error",
                "message": "invalid json"
            })
            .to_string();
        }
    };

    let id = get_id(&req);
    let cmd = Command::from(get_cmd(&req));
    let payload = get_payload(&req);

    match cmd {
        Command::Ping => ok(id, json!({ "message": "idus-core alive" })),

        Command::RunQuality => {
            let source: Listing = match parse_field(payload, "source") {
                Ok(v) => v,
                Err(e) => return err(id, e),
            };
            let translated: TranslatedListing = match parse_field(payload, "translated") {
                Ok(v) => v,
                Err(e) => return err(id, e),
            };

            // Achados viram issues dentro do report; nunca status "error".
            let report = validator::evaluate(&source, &translated);
            ok(id, json!({ "report": report }))
        }

        Command::ReconcileImages => {
            let images: Vec<ImageAsset> = match parse_field(payload, "images") {
                Ok(v) => v,
                Err(e) => return err(id, e),
            };
            let texts: Vec<ImageText> = match parse_field(payload, "image_texts") {
                Ok(v) => v,
                Err(e) => return err(id, e),
            };

            let result = reconciler::reconcile(&images, &texts);
            ok(
                id,
                json!({
                    "gallery": result.gallery,
                    "ordered_texts": result.ordered_texts
                }),
            )
        }

        Command::EvaluateBatch => {
            let items: Vec<BatchItem> = match parse_field(payload, "items") {
                Ok(v) => v,
                Err(e) => return err(id, e),
            };

            let outcome = batch::evaluate_batch(&items, &CancelToken::new());
            ok(
                id,
                json!({
                    "evaluated": outcome.evaluated,
                    "skipped": outcome.skipped,
                    "reports": outcome.reports
                }),
            )
        }

        Command::HistoryList => match HistoryStore::new(store).list() {
            Ok(entries) => ok(id, json!({ "entries": entries })),
            Err(e) => err(id, e.to_string()),
        },

        Command::HistoryRecord => {
            let source: Listing = match parse_field(payload, "source") {
                Ok(v) => v,
                Err(e) => return err(id, e),
            };
            let translated: TranslatedListing = match parse_field(payload, "translated") {
                Ok(v) => v,
                Err(e) => return err(id, e),
            };

            if source.url.trim().is_empty() {
                return err(id, "payload.source.url is required");
            }

            match HistoryStore::new(store).record(source, translated) {
                Ok(entry) => ok(id, json!({ "entry": entry })),
                Err(e) => err(id, e.to_string()),
            }
        }

        Command::HistoryRemove => {
            let entry_id = match get_str_field(payload, "id") {
                Ok(v) => v,
                Err(e) => return err(id, e),
            };

            match HistoryStore::new(store).remove(&entry_id) {
                Ok(removed) => ok(id, json!({ "removed": removed })),
                Err(e) => err(id, e.to_string()),
            }
        }

        Command::HistoryClear => match HistoryStore::new(store).clear() {
            Ok(cleared) => ok(id, json!({ "cleared": cleared })),
            Err(e) => err(id, e.to_string()),
        },

        Command::GlossaryList => match GlossaryStore::new(store).list() {
            Ok(entries) => ok(id, json!({ "entries": entries })),
            Err(e) => err(id, e.to_string()),
        },

        Command::GlossaryAdd => {
            let entry: GlossaryDraft = match parse_field(payload, "entry") {
                Ok(v) => v,
                Err(e) => return err(id, e),
            };

            match GlossaryStore::new(store).add(entry) {
                Ok(saved) => ok(id, json!({ "entry": saved })),
                Err(e) => err(id, e.to_string()),
            }
        }

        Command::GlossaryUpdate => {
            let entry_id = match get_str_field(payload, "id") {
                Ok(v) => v,
                Err(e) => return err(id, e),
            };
            let patch: GlossaryPatch = match parse_field(payload, "patch") {
                Ok(v) => v,
                Err(e) => return err(id, e),
            };

            match GlossaryStore::new(store).update(&entry_id, patch) {
                Ok(updated) => ok(id, json!({ "updated": updated })),
                Err(e) => err(id, e.to_string()),
            }
        }

        Command::GlossaryRemove => {
            let entry_id = match get_str_field(payload, "id") {
                Ok(v) => v,
                Err(e) => return err(id, e),
            };

            match GlossaryStore::new(store).remove(&entry_id) {
                Ok(removed) => ok(id, json!({ "removed": removed })),
                Err(e) => err(id, e.to_string()),
            }
        }

        Command::GlossarySearch => {
            let query = payload.get("query").and_then(|v| v.as_str()).unwrap_or("");

            match GlossaryStore::new(store).search(query) {
                Ok(entries) => ok(id, json!({ "entries": entries })),
                Err(e) => err(id, e.to_string()),
            }
        }

        Command::GlossaryByCategory => {
            // Categoria fora do conjunto fixo é rejeitada, não coagida.
            let category: GlossaryCategory = match parse_field(payload, "category") {
                Ok(v) => v,
                Err(e) => return err(id, e),
            };

            match GlossaryStore::new(store).by_category(category) {
                Ok(entries) => ok(id, json!({ "entries": entries })),
                Err(e) => err(id, e.to_string()),
            }
        }

        Command::GlossaryImport => {
            let entries: Vec<GlossaryDraft> = match parse_field(payload, "entries") {
                Ok(v) => v,
                Err(e) => return err(id, e),
            };

            match GlossaryStore::new(store).import(entries) {
                Ok(added) => ok(id, json!({ "added": added })),
                Err(e) => err(id, e.to_string()),
            }
        }

        Command::Unknown => {
            warn!(cmd = get_cmd(&req), "unknown command");
            err(id, "unknown command")
        }
    }
}
