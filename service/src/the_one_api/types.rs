//! Data types for The One API responses.

use serde::{Deserialize, Serialize};

/// A character record from the `/character` collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    /// Upstream document ID
    #[serde(rename = "_id")]
    pub id: String,
    /// Canonical name (e.g., "Gandalf")
    pub name: String,
    #[serde(default)]
    pub height: Option<String>,
    #[serde(default)]
    pub race: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub birth: Option<String>,
    #[serde(default)]
    pub spouse: Option<String>,
    #[serde(default)]
    pub death: Option<String>,
    #[serde(default)]
    pub realm: Option<String>,
    #[serde(default)]
    pub hair: Option<String>,
    #[serde(default)]
    pub wiki_url: Option<String>,
}

impl Character {
    /// Minimal character with only the identifying fields set.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            height: None,
            race: None,
            gender: None,
            birth: None,
            spouse: None,
            death: None,
            realm: None,
            hair: None,
            wiki_url: None,
        }
    }
}

/// A movie quote record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Quote {
    #[serde(rename = "_id")]
    pub id: String,
    /// Spoken line; missing on some non-dialogue records
    #[serde(default)]
    pub dialog: Option<String>,
    /// Movie document ID
    pub movie: String,
    /// Character document ID
    pub character: String,
}

impl Quote {
    /// Whether this record carries usable dialog text.
    #[must_use]
    pub fn has_dialog(&self) -> bool {
        self.dialog
            .as_deref()
            .is_some_and(|dialog| !dialog.trim().is_empty())
    }
}

/// Paginated envelope wrapping every collection response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub docs: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub page: u64,
    #[serde(default)]
    pub pages: u64,
}
