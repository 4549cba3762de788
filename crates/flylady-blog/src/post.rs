use chrono::NaiveDate;
use serde::Serialize;

/// A published blog post: front matter metadata plus the rendered body.
#[derive(Debug, Clone, Serialize)]
pub struct BlogPost {
    /// Derived from the source filename minus the `.md` extension.
    pub slug: String,
    /// Front matter `title`; falls back to the slug when absent.
    pub title: String,
    pub description: String,
    /// Front matter `date` (`YYYY-MM-DD`). `None` when absent or unparsable;
    /// undated posts sort after dated ones.
    pub date: Option<NaiveDate>,
    pub cover_image: Option<String>,
    /// Markdown body rendered to HTML.
    pub content_html: String,
}
