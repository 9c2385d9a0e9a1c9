use serde_json::Value;
use tracing::{debug, warn};

use super::Article;

/// Shapes the article service is known to answer a listing with.
#[derive(Debug, Clone, PartialEq)]
pub enum ArticleListing {
    /// The body is the array itself.
    Bare(Vec<Value>),
    /// `{ "articles": [...] }`
    Articles(Vec<Value>),
    /// `{ "data": [...] }`
    Data(Vec<Value>),
    /// Anything else. Read as an empty listing.
    Unrecognized,
}

impl From<Value> for ArticleListing {
    fn from(body: Value) -> Self {
        match body {
            Value::Array(items) => Self::Bare(items),
            Value::Object(mut map) => {
                if let Some(Value::Array(items)) = map.remove("articles") {
                    return Self::Articles(items);
                }
                if let Some(Value::Array(items)) = map.remove("data") {
                    return Self::Data(items);
                }
                Self::Unrecognized
            }
            _ => Self::Unrecognized,
        }
    }
}

impl ArticleListing {
    /// Decodes the records, dropping entries that are not articles.
    pub fn into_articles(self) -> Vec<Article> {
        let items = match self {
            Self::Bare(items) | Self::Articles(items) | Self::Data(items) => items,
            Self::Unrecognized => {
                debug!("Listing has no recognizable article array, treating as empty");
                return Vec::new();
            }
        };

        items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value::<Article>(item) {
                Ok(article) => Some(article),
                Err(err) => {
                    warn!(index, "Skipping malformed article record: {}", err);
                    None
                }
            })
            .collect()
    }
}

/// Resolves any listing body into the ordered article sequence.
pub fn normalize_listing(body: Value) -> Vec<Article> {
    ArticleListing::from(body).into_articles()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: i64) -> Value {
        json!({ "id": id, "title": format!("t{id}"), "content": "c", "tags": [] })
    }

    fn ids(articles: &[Article]) -> Vec<String> {
        articles
            .iter()
            .map(|a| a.id.as_ref().map_or_else(|| "-".to_string(), ToString::to_string))
            .collect()
    }

    #[test]
    fn bare_array_is_used_directly() {
        let body = json!([record(1), record(2)]);
        assert!(matches!(ArticleListing::from(body.clone()), ArticleListing::Bare(_)));
        assert_eq!(ids(&normalize_listing(body)), vec!["1", "2"]);
    }

    #[test]
    fn articles_field_is_preferred_over_data() {
        let body = json!({ "articles": [record(3)], "data": [record(4)] });
        assert!(matches!(ArticleListing::from(body.clone()), ArticleListing::Articles(_)));
        assert_eq!(ids(&normalize_listing(body)), vec!["3"]);
    }

    #[test]
    fn data_field_is_used_when_articles_missing() {
        let body = json!({ "status": "ok", "data": [record(5), record(6)] });
        assert!(matches!(ArticleListing::from(body.clone()), ArticleListing::Data(_)));
        assert_eq!(ids(&normalize_listing(body)), vec!["5", "6"]);
    }

    #[test]
    fn null_articles_falls_through_to_data() {
        let body = json!({ "articles": null, "data": [record(8)] });
        assert_eq!(ids(&normalize_listing(body)), vec!["8"]);
    }

    #[test]
    fn other_shapes_are_empty() {
        for body in [
            json!({ "result": [record(1)] }),
            json!("nope"),
            json!(12),
            Value::Null,
            json!({ "articles": "not a list" }),
        ] {
            assert_eq!(ArticleListing::from(body.clone()), ArticleListing::Unrecognized);
            assert!(normalize_listing(body).is_empty());
        }
    }

    #[test]
    fn non_object_entries_are_skipped_in_order() {
        let body = json!([record(1), "junk", 7, record(2)]);
        assert_eq!(ids(&normalize_listing(body)), vec!["1", "2"]);
    }

    #[test]
    fn records_with_odd_ids_are_kept() {
        let body = json!([
            record(1),
            { "id": 1.0 },
            { "title": "no id" },
            { "id": null },
            { "id": 2, "category": null },
        ]);
        let articles = normalize_listing(body);
        assert_eq!(ids(&articles), vec!["1", "1.0", "-", "-", "2"]);
        assert_eq!(articles[2].title, "no id");
    }
}
