use std::fmt;

use crate::{
    feed::{tag_universe, FeedFilter},
    models::Article,
};

const EXCERPT_CHARS: usize = 140;

/// The searchable, tag-filterable card list.
pub struct FeedView<'a> {
    pub articles: &'a [Article],
    pub filter: &'a FeedFilter,
    pub is_loading: bool,
}

impl FeedView<'_> {
    pub fn visible(&self) -> Vec<&Article> {
        self.filter.apply(self.articles)
    }

    /// "Not found" waits for the first load to finish.
    pub fn shows_empty_state(&self) -> bool {
        !self.is_loading && self.visible().is_empty()
    }
}

impl fmt::Display for FeedView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Welcome to ECG Article")?;
        writeln!(f, "Search: {}", self.filter.search)?;

        let tags = tag_universe(self.articles)
            .into_iter()
            .map(|tag| {
                if tag == self.filter.tag.label() {
                    format!("[{tag}]")
                } else {
                    tag
                }
            })
            .collect::<Vec<_>>();
        writeln!(f, "Tags: {}", tags.join(" "))?;
        writeln!(f)?;

        let visible = self.visible();
        for article in &visible {
            write!(f, "{}", Card(article))?;
        }
        if !self.is_loading && visible.is_empty() {
            writeln!(f, "No articles found.")?;
        }
        Ok(())
    }
}

/// One entry of the feed.
pub struct Card<'a>(pub &'a Article);

impl fmt::Display for Card<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let article = self.0;
        let image = if article.image.is_some() { "" } else { " (no image)" };
        match &article.id {
            Some(id) => writeln!(f, "[{}] #{}{}", article.category, id, image)?,
            None => writeln!(f, "[{}]{}", article.category, image)?,
        }
        writeln!(f, "  {} | {}", article.date, article.author)?;
        writeln!(f, "  {}", article.title)?;
        writeln!(f, "  {}", excerpt(&article.content))?;
        if !article.tags.is_empty() {
            let tags = article
                .tags
                .iter()
                .map(|t| format!("#{t}"))
                .collect::<Vec<_>>();
            writeln!(f, "  {}", tags.join(" "))?;
        }
        writeln!(f)
    }
}

fn excerpt(content: &str) -> String {
    let flat = content.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= EXCERPT_CHARS {
        return flat;
    }
    let cut: String = flat.chars().take(EXCERPT_CHARS).collect();
    format!("{}...", cut.trim_end())
}
