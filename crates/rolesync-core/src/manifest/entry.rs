//! Manifest entry derivation for a single document.

use super::meta::{extract_meta, first_present};
use super::slug::{composite_key, stable_id};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Author used for official documents without one.
pub const OFFICIAL_AUTHOR: &str = "Official";

const NAME_EN_KEYS: [&str; 4] = ["name_en", "title_en", "nameEn", "titleEn"];

/// Fixed category taxonomy, decided by the first-level directory name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Official,
    OfficialMix,
    Custom,
}

impl Category {
    /// Category of a first-level directory; matching ignores case.
    pub fn from_dir_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "official" => Category::Official,
            "official_mix" => Category::OfficialMix,
            _ => Category::Custom,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Official => "official",
            Category::OfficialMix => "official_mix",
            Category::Custom => "custom",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a document lives, as needed by its entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLocation {
    pub category: Category,
    /// File name with extension
    pub file: String,
    /// File name without its last extension
    pub stem: String,
    /// Path segments relative to the public root
    pub public_segments: Vec<String>,
    /// Parent directory segments relative to the document root
    pub dir_segments: Vec<String>,
}

impl DocumentLocation {
    /// `/`-prefixed, forward-slash URL under the public root.
    pub fn json_url(&self) -> String {
        format!("/{}", self.public_segments.join("/"))
    }

    pub fn dir(&self) -> String {
        self.dir_segments.join("/")
    }
}

/// One manifest line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    pub id: String,
    pub name: String,
    pub name_en: String,
    pub author: String,
    pub description: String,
    pub category: Category,
    pub logo: String,
    pub json_url: String,
    pub file: String,
    pub dir: String,
}

/// Derive the entry for a parsed document.
///
/// `unknown_author` is used for non-official documents without an author.
pub fn entry_from_document(
    document: &Value,
    location: &DocumentLocation,
    unknown_author: &str,
) -> ManifestEntry {
    let meta = extract_meta(document);

    let name = first_present(&meta, &["name"]).unwrap_or_else(|| location.stem.clone());
    let author = first_present(&meta, &["author", "authors"]).unwrap_or_else(|| {
        match location.category {
            Category::Official => OFFICIAL_AUTHOR.to_string(),
            _ => unknown_author.to_string(),
        }
    });
    let id = stable_id(&composite_key(
        location.category.as_str(),
        &name,
        &location.file,
    ));

    ManifestEntry {
        id,
        name_en: first_present(&meta, &NAME_EN_KEYS).unwrap_or_default(),
        author,
        description: first_present(&meta, &["description"]).unwrap_or_default(),
        category: location.category,
        logo: first_present(&meta, &["logo", "icon"]).unwrap_or_default(),
        json_url: location.json_url(),
        file: location.file.clone(),
        dir: location.dir(),
        name,
    }
}
