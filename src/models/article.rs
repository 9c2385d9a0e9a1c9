use std::fmt;

use chrono::{DateTime, Local};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::EnumString;

use crate::serde_utils::{blank_as_none, invalid_as_none, none_as_empty, null_as_default, null_as_empty};

/// Identifier of an article.
///
/// Articles written by this client carry a millisecond timestamp, records
/// written elsewhere may use any JSON number or a string. All are kept as
/// received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(untagged)]
pub enum ArticleId {
    #[display("{_0}")]
    Number(serde_json::Number),
    #[display("{_0}")]
    Text(String),
}

impl ArticleId {
    /// Timestamp-based id, as stamped by the editor.
    pub fn from_timestamp(now: DateTime<Local>) -> Self {
        Self::from(now.timestamp_millis())
    }

    /// Compares against an id typed by a user.
    pub fn matches(&self, raw: &str) -> bool {
        match self {
            Self::Number(n) => raw.trim().parse::<serde_json::Number>().is_ok_and(|r| r == *n),
            Self::Text(s) => s == raw.trim(),
        }
    }
}

impl From<i64> for ArticleId {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for ArticleId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Article category.
///
/// The editor only offers the known variants. Anything else the service hands
/// back is carried in `Other` and displayed verbatim.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, EnumString, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    #[default]
    General,
    #[strum(serialize = "English Tips")]
    EnglishTips,
    Events,
    Culture,
    #[strum(serialize = "Staff Voice")]
    StaffVoice,
    #[strum(default)]
    Other(String),
}

impl Category {
    /// Choices offered by the editor, in display order.
    pub const CHOICES: [Category; 5] = [
        Category::General,
        Category::EnglishTips,
        Category::Events,
        Category::Culture,
        Category::StaffVoice,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::General => "General",
            Self::EnglishTips => "English Tips",
            Self::Events => "Events",
            Self::Culture => "Culture",
            Self::StaffVoice => "Staff Voice",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Category of a record that carries none.
    pub fn unset() -> Self {
        Self::Other(String::new())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(category) => category,
            Err(_) => Self::Other(value),
        }
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// `None` when the record came without a usable id. Such a record is
    /// listed but cannot be deleted.
    #[serde(default, deserialize_with = "invalid_as_none")]
    pub id: Option<ArticleId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default = "Category::unset", deserialize_with = "null_as_empty")]
    pub category: Category,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    /// `YYYY-MM-DD` when written by this client; rendered as received otherwise.
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        serialize_with = "none_as_empty"
    )]
    pub image: Option<String>,
}

impl Article {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn id_matches(&self, raw: &str) -> bool {
        self.id.as_ref().is_some_and(|id| id.matches(raw))
    }
}
