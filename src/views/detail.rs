use std::fmt;

use crate::models::Article;

/// Full rendering of a single article.
pub struct DetailView<'a> {
    pub article: &'a Article,
    /// Shows the delete action when the article has an id. Admin mode is a
    /// local toggle, not a permission.
    pub is_admin: bool,
}

impl fmt::Display for DetailView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let article = self.article;
        writeln!(f, "< Back to Feed")?;
        writeln!(f)?;
        if let Some(image) = &article.image {
            writeln!(f, "Image: {image}")?;
        }
        writeln!(f, "[{}] {}", article.category, article.date)?;
        writeln!(f)?;
        writeln!(f, "{}", article.title)?;
        writeln!(f, "{}", "=".repeat(article.title.chars().count().max(1)))?;
        writeln!(f, "{}", article.author)?;
        writeln!(f, "ECG Staff Member")?;
        writeln!(f)?;
        writeln!(f, "{}", article.content)?;
        writeln!(f)?;
        writeln!(f, "Related Tags")?;
        let tags = article
            .tags
            .iter()
            .map(|t| format!("#{t}"))
            .collect::<Vec<_>>();
        writeln!(f, "{}", tags.join(" "))?;
        if self.is_admin && article.id.is_some() {
            writeln!(f)?;
            writeln!(f, "[ Delete this article (admin only) ]")?;
        }
        Ok(())
    }
}
