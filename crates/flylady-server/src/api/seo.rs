//! Sitemap and robots output for crawlers.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;

use flylady_core::category_catalog;

use super::{map_feed_error, ApiError, AppState};

/// The static pages every sitemap carries, relative to the site base URL.
const STATIC_PATHS: &[&str] = &["/", "/zazitky", "/ebook", "/blog"];

/// `sitemap.xml` over the static pages, category pages, aviation product
/// detail pages, and blog posts. Built per request so it always reflects the
/// current catalog snapshot.
pub(super) async fn sitemap(State(state): State<AppState>) -> Result<Response, ApiError> {
    let catalog = state.cache.catalog().await.map_err(|e| map_feed_error(&e))?;
    let base = state.config.site_base_url.trim_end_matches('/');
    let today = Utc::now().date_naive();

    let mut xml = String::from(concat!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
        "<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    ));

    for path in STATIC_PATHS {
        push_url(&mut xml, &format!("{base}{path}"), &today.to_string(), "daily", "1.0");
    }
    for category in category_catalog() {
        push_url(
            &mut xml,
            &format!("{base}/kategorie/{}", category.slug),
            &today.to_string(),
            "daily",
            "0.8",
        );
    }
    for product in catalog.aviation_products() {
        push_url(
            &mut xml,
            &format!("{base}/zazitek/{}", product.slug),
            &today.to_string(),
            "daily",
            "0.7",
        );
    }
    for post in state.posts.iter() {
        let lastmod = post.date.map_or_else(|| today.to_string(), |d| d.to_string());
        push_url(&mut xml, &format!("{base}/blog/{}", post.slug), &lastmod, "weekly", "0.6");
    }

    xml.push_str("</urlset>\n");
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/xml")],
        xml,
    )
        .into_response())
}

fn push_url(xml: &mut String, loc: &str, lastmod: &str, changefreq: &str, priority: &str) {
    xml.push_str("  <url>\n");
    xml.push_str(&format!("    <loc>{loc}</loc>\n"));
    xml.push_str(&format!("    <lastmod>{lastmod}</lastmod>\n"));
    xml.push_str(&format!("    <changefreq>{changefreq}</changefreq>\n"));
    xml.push_str(&format!("    <priority>{priority}</priority>\n"));
    xml.push_str("  </url>\n");
}

/// `robots.txt`: everything crawlable except the admin and API surfaces.
pub(super) async fn robots(State(state): State<AppState>) -> Response {
    let base = state.config.site_base_url.trim_end_matches('/');
    let body = format!(
        "User-agent: *\n\
         Allow: /\n\
         Disallow: /admin/\n\
         Disallow: /api/\n\
         \n\
         Sitemap: {base}/sitemap.xml\n"
    );
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response()
}
