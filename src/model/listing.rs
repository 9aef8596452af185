use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum TargetLanguage {
    #[serde(rename = "en")]
    English,

    #[serde(rename = "ja")]
    Japanese,
}

impl Default for TargetLanguage {
    fn default() -> Self {
        TargetLanguage::English
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OptionGroup {
    pub name: String,

    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub url: String,

    #[serde(default)]
    pub order_index: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ImageText {
    pub image_url: String,

    #[serde(default)]
    pub original_text: String,

    #[serde(default)]
    pub translated_text: Option<String>,

    #[serde(default)]
    pub order_index: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub artist_name: String,

    #[serde(default)]
    pub price: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub options: Vec<OptionGroup>,

    #[serde(default)]
    pub detail_images: Vec<ImageAsset>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct TranslatedListing {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub options: Vec<OptionGroup>,

    #[serde(default)]
    pub image_texts: Vec<ImageText>,

    #[serde(default)]
    pub target_language: TargetLanguage,
}
