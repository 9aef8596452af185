use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::listing::{Listing, TargetLanguage, TranslatedListing};

fn default_schema_version() -> u32 {
    1
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HistoryEntry {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub source_url: String,

    pub source: Listing,

    pub translated: TranslatedListing,

    #[serde(default)]
    pub target_language: TargetLanguage,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}
