use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_schema_version() -> u32 {
    1
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GlossaryCategory {
    Material,
    Color,
    Size,
    Technique,
    Product,
    General,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GlossaryEntry {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub id: String,

    pub korean: String,

    #[serde(default)]
    pub english: String,

    #[serde(default)]
    pub japanese: String,

    pub category: GlossaryCategory,

    #[serde(default)]
    pub note: Option<String>,

    #[serde(default)]
    pub normalized: String,

    #[serde(default)]
    pub hash: String,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GlossaryDraft {
    pub korean: String,

    #[serde(default)]
    pub english: String,

    #[serde(default)]
    pub japanese: String,

    pub category: GlossaryCategory,

    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct GlossaryPatch {
    #[serde(default)]
    pub korean: Option<String>,

    #[serde(default)]
    pub english: Option<String>,

    #[serde(default)]
    pub japanese: Option<String>,

    #[serde(default)]
    pub category: Option<GlossaryCategory>,

    #[serde(default)]
    pub note: Option<String>,
}
