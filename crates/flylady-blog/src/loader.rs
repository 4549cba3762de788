//! Loads markdown posts with YAML front matter from a content directory.

use std::fs;
use std::path::Path;

use pulldown_cmark::{html, Parser};
use serde::Deserialize;

use crate::error::BlogError;
use crate::post::BlogPost;

#[derive(Debug, Default, Deserialize)]
struct FrontMatter {
    title: Option<String>,
    description: Option<String>,
    date: Option<String>,
    #[serde(rename = "coverImage")]
    cover_image: Option<String>,
}

/// Loads every `*.md` file in `dir` and returns posts sorted by date
/// descending (undated posts last, ties broken by slug for a stable order).
///
/// # Errors
///
/// Returns [`BlogError::Io`] if the directory or a file cannot be read, or
/// [`BlogError::FrontMatter`] if a front matter block is not valid YAML.
/// Absent front matter fields are not errors; title falls back to the slug.
pub fn load_posts(dir: &Path) -> Result<Vec<BlogPost>, BlogError> {
    let entries = fs::read_dir(dir).map_err(|e| BlogError::Io {
        path: dir.display().to_string(),
        source: e,
    })?;

    let mut posts = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| BlogError::Io {
            path: dir.display().to_string(),
            source: e,
        })?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("md") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        let contents = fs::read_to_string(&path).map_err(|e| BlogError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        posts.push(build_post(stem, &contents, &path.display().to_string())?);
    }

    posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));
    tracing::debug!(count = posts.len(), dir = %dir.display(), "loaded blog posts");
    Ok(posts)
}

/// Loads all posts and picks the one with the given slug. A miss is a normal
/// not-found, not an error.
///
/// # Errors
///
/// Same as [`load_posts`].
pub fn post_by_slug(dir: &Path, slug: &str) -> Result<Option<BlogPost>, BlogError> {
    Ok(load_posts(dir)?.into_iter().find(|post| post.slug == slug))
}

fn build_post(slug: &str, contents: &str, path: &str) -> Result<BlogPost, BlogError> {
    let (front_matter, body) = split_front_matter(contents);
    let front_matter: FrontMatter = match front_matter {
        Some(yaml) => serde_yaml::from_str(yaml).map_err(|e| BlogError::FrontMatter {
            path: path.to_string(),
            source: e,
        })?,
        None => FrontMatter::default(),
    };

    let date = front_matter
        .date
        .as_deref()
        .and_then(|raw| chrono::NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok());

    Ok(BlogPost {
        slug: slug.to_string(),
        title: front_matter.title.unwrap_or_else(|| slug.to_string()),
        description: front_matter.description.unwrap_or_default(),
        date,
        cover_image: front_matter.cover_image,
        content_html: render_markdown(body),
    })
}

/// Splits a `---` delimited YAML front matter block off the markdown body.
/// Returns `(None, whole input)` when there is no block.
fn split_front_matter(contents: &str) -> (Option<&str>, &str) {
    let Some(rest) = contents.strip_prefix("---") else {
        return (None, contents);
    };
    let Some(rest) = rest.strip_prefix('\n').or_else(|| rest.strip_prefix("\r\n")) else {
        return (None, contents);
    };
    for marker in ["\n---\n", "\n---\r\n", "\r\n---\r\n", "\r\n---\n"] {
        if let Some(end) = rest.find(marker) {
            return (Some(&rest[..end]), &rest[end + marker.len()..]);
        }
    }
    // An unterminated block is treated as body text rather than an error.
    (None, contents)
}

fn render_markdown(body: &str) -> String {
    let parser = Parser::new(body);
    let mut out = String::with_capacity(body.len() * 2);
    html::push_html(&mut out, parser);
    out
}
