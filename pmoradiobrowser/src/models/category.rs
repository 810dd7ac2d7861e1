//! RadioTime browse categories
//!
//! ```json
//! {
//!     "head": { "title": "Browse", "status": "200" },
//!     "body": [
//!         {
//!             "element": "outline",
//!             "type": "link",
//!             "text": "Local Radio",
//!             "URL": "http://opml.radiotime.com/Browse.ashx?c=local",
//!             "key": "local"
//!         }
//!     ]
//! }
//! ```

use super::wire::{optional_url, url_to_wire};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use url::Url;
use uuid::Uuid;

/// One entry of a RadioTime browse listing
///
/// Entries carry no stable identifier upstream; each decoded entry gets a
/// fresh `id` which equality and hashing rely on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "CategoryWire", into = "CategoryWire")]
pub struct Category {
    pub id: Uuid,
    pub key: Option<String>,
    /// Outline type (`link`, `audio`, ...)
    pub kind: String,
    pub text: String,
    pub url: Option<Url>,
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Category {}

impl Hash for Category {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CategoryWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    text: String,
    #[serde(rename = "URL", default)]
    url: String,
}

impl From<CategoryWire> for Category {
    fn from(wire: CategoryWire) -> Self {
        Category {
            id: Uuid::new_v4(),
            key: wire.key,
            kind: wire.kind,
            text: wire.text,
            url: optional_url(&wire.url),
        }
    }
}

impl From<Category> for CategoryWire {
    fn from(category: Category) -> Self {
        CategoryWire {
            key: category.key,
            kind: category.kind,
            text: category.text,
            url: url_to_wire(&category.url),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryHead {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// RadioTime `Browse.ashx` / `Search.ashx` response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    #[serde(default)]
    pub head: CategoryHead,
    #[serde(default)]
    pub body: Vec<Category>,
}
