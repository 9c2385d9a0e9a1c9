//! Client-side search and tag filtering over the article store.
//!
//! Everything here is pure: filtering never touches the network and the same
//! inputs always give the same output.

use std::fmt;

use itertools::Itertools;

use crate::models::Article;

/// Label of the catch-all tag that disables tag filtering.
pub const ALL_TAGS: &str = "All";

/// Selected entry of the tag bar.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub enum TagFilter {
    #[default]
    All,
    Tag(String),
}

impl TagFilter {
    pub fn matches(&self, article: &Article) -> bool {
        match self {
            Self::All => true,
            Self::Tag(tag) => article.has_tag(tag),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_TAGS,
            Self::Tag(tag) => tag,
        }
    }
}

impl From<&str> for TagFilter {
    fn from(value: &str) -> Self {
        if value == ALL_TAGS {
            Self::All
        } else {
            Self::Tag(value.to_string())
        }
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Search term plus selected tag.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FeedFilter {
    pub search: String,
    pub tag: TagFilter,
}

impl FeedFilter {
    pub fn new(search: impl Into<String>, tag: impl Into<TagFilter>) -> Self {
        Self {
            search: search.into(),
            tag: tag.into(),
        }
    }

    /// Case-insensitive substring match on title or content.
    pub fn matches_text(&self, article: &Article) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        article.title.to_lowercase().contains(&needle)
            || article.content.to_lowercase().contains(&needle)
    }

    pub fn matches(&self, article: &Article) -> bool {
        self.matches_text(article) && self.tag.matches(article)
    }

    /// Matching articles, in store order.
    pub fn apply<'a>(&self, articles: &'a [Article]) -> Vec<&'a Article> {
        articles.iter().filter(|a| self.matches(a)).collect()
    }
}

/// `"All"` followed by every distinct tag in order of first appearance.
pub fn tag_universe(articles: &[Article]) -> Vec<String> {
    std::iter::once(ALL_TAGS)
        .chain(articles.iter().flat_map(|a| a.tags.iter().map(String::as_str)))
        .unique()
        .map(str::to_string)
        .collect()
}
