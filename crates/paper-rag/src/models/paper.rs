//! Paper data model matching the arXiv Atom entry schema.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A research paper returned by the arXiv API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
    /// Entry URL, e.g. `http://arxiv.org/abs/2107.05580v1`. Doubles as the paper link.
    pub entry_id: String,

    /// Paper title with whitespace runs collapsed.
    pub title: String,

    /// Paper abstract.
    pub summary: String,

    /// Authors in listed order.
    #[serde(default)]
    pub authors: Vec<Author>,

    /// First version submission time.
    #[serde(default)]
    pub published: Option<DateTime<Utc>>,

    /// Latest version submission time.
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,

    /// Primary arXiv category (e.g. `cs.CL`).
    #[serde(default)]
    pub primary_category: Option<String>,

    /// All arXiv and ACM/MSC categories.
    #[serde(default)]
    pub categories: Vec<String>,

    /// Author comment (page counts, venue notes).
    #[serde(default)]
    pub comment: Option<String>,

    /// Journal reference, if published.
    #[serde(default)]
    pub journal_ref: Option<String>,

    /// Digital Object Identifier.
    #[serde(default)]
    pub doi: Option<String>,

    /// Associated links (abstract page, PDF, DOI).
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Paper {
    /// The paper link shown to users.
    #[must_use]
    pub fn link(&self) -> &str {
        &self.entry_id
    }

    /// Short arXiv id, e.g. `2107.05580v1` or `hep-th/9901001v2`.
    #[must_use]
    pub fn short_id(&self) -> &str {
        self.entry_id
            .split_once("/abs/")
            .map_or(self.entry_id.as_str(), |(_, id)| id)
    }

    /// PDF link if the feed listed one.
    #[must_use]
    pub fn pdf_url(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|l| l.title.as_deref() == Some("pdf"))
            .map(|l| l.href.as_str())
    }

    /// Author names as a comma-separated string.
    #[must_use]
    pub fn author_names(&self) -> String {
        self.authors.iter().map(|a| a.name.as_str()).collect::<Vec<_>>().join(", ")
    }

    /// Year of first publication if known.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        use chrono::Datelike;
        self.published.map(|d| d.year())
    }
}

/// A paper author.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Display name.
    pub name: String,

    /// Affiliation, when arXiv has one.
    #[serde(default)]
    pub affiliation: Option<String>,
}

/// A link attached to an arXiv entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Target URL.
    pub href: String,

    /// Link relation (`alternate`, `related`).
    #[serde(default)]
    pub rel: Option<String>,

    /// Link title (`pdf`, `doi`).
    #[serde(default)]
    pub title: Option<String>,

    /// MIME type.
    #[serde(default)]
    pub content_type: Option<String>,
}
