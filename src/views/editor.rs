use std::fmt;

use chrono::{DateTime, Local};

use crate::{
    error::ValidationError,
    models::{Article, ArticleId, Category},
};

/// Raw input of the "new article" form.
///
/// Kept as typed by the author so a failed submission can be retried without
/// re-entering anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorForm {
    pub title: String,
    pub author: String,
    pub category: Category,
    pub content: String,
    pub image: String,
    /// Comma separated.
    pub tags: String,
}

impl EditorForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("title", &self.title),
            ("author", &self.author),
            ("content", &self.content),
        ] {
            if value.is_empty() {
                return Err(ValidationError::missing_field(field));
            }
        }
        if !self.category.is_known() {
            return Err(ValidationError::UnknownCategory(self.category.to_string()));
        }
        Ok(())
    }

    /// Builds the record to submit, stamping id and date from `now`.
    pub fn build(&self, now: DateTime<Local>) -> Result<Article, ValidationError> {
        self.validate()?;
        let image = Some(self.image.as_str()).filter(|s| !s.is_empty());
        Ok(Article {
            id: Some(ArticleId::from_timestamp(now)),
            title: self.title.clone(),
            author: self.author.clone(),
            category: self.category.clone(),
            content: self.content.clone(),
            tags: parse_tags(&self.tags),
            date: now.format("%Y-%m-%d").to_string(),
            image: image.map(str::to_string),
        })
    }
}

/// Splits on commas, trims, drops empties. Order is kept.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Text rendering of the form with its submit control.
pub struct EditorView<'a> {
    pub form: &'a EditorForm,
    /// A create is in flight; submitting is disabled.
    pub busy: bool,
}

impl fmt::Display for EditorView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let form = self.form;
        writeln!(f, "New Article")?;
        writeln!(f)?;
        writeln!(f, "  Title:    {}", form.title)?;
        writeln!(f, "  Author:   {}", form.author)?;
        writeln!(f, "  Category: {}", form.category)?;
        writeln!(f, "  Image:    {}", form.image)?;
        writeln!(f, "  Tags:     {}", form.tags)?;
        writeln!(f, "  Content:")?;
        for line in form.content.lines() {
            writeln!(f, "    {line}")?;
        }
        writeln!(f)?;
        if self.busy {
            writeln!(f, "[ Saving... ]")
        } else {
            writeln!(f, "[ Publish Article ]")
        }
    }
}
