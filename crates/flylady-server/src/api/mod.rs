mod categories;
mod posts;
mod products;
mod seo;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use flylady_blog::BlogPost;
use flylady_core::AppConfig;
use flylady_feed::FeedError;

use crate::cache::FeedCache;

#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<FeedCache>,
    pub posts: Arc<Vec<BlogPost>>,
    pub config: Arc<AppConfig>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    feed_cache: &'static str,
}

impl ResponseMeta {
    pub(super) fn new() -> Self {
        Self {
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" => StatusCode::BAD_REQUEST,
            "feed_unavailable" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn map_feed_error(error: &FeedError) -> ApiError {
    tracing::error!(error = %error, "feed refresh failed");
    ApiError::new("feed_unavailable", "product feed is unavailable")
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/products", get(products::list_products))
        .route("/api/v1/products/{slug}", get(products::get_product))
        .route("/api/v1/categories", get(categories::list_categories))
        .route("/api/v1/categories/{slug}", get(categories::get_category))
        .route("/api/v1/posts", get(posts::list_posts))
        .route("/api/v1/posts/{slug}", get(posts::get_post))
        .route("/sitemap.xml", get(seo::sitemap))
        .route("/robots.txt", get(seo::robots))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors()),
        )
        .with_state(state)
}

/// Liveness probe. Reports whether a fresh catalog snapshot is held without
/// touching the upstream feed.
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let feed_cache = if state.cache.is_warm().await {
        "warm"
    } else {
        "cold"
    };
    (
        StatusCode::OK,
        Json(ApiResponse {
            data: HealthData {
                status: "ok",
                feed_cache,
            },
            meta: ResponseMeta::new(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use flylady_feed::FeedClient;

    const TEST_FEED: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<SHOP>
  <SHOPITEM>
    <ID>100</ID>
    <PRODUCT>Vyhlídkový let Praha</PRODUCT>
    <DESCRIPTION>Let malým letadlem nad Prahou.</DESCRIPTION>
    <URL>https://www.zazitky.cz/vyhlidkovy-let-praha/</URL>
    <IMGURL>https://cdn.zazitky.cz/100.jpg</IMGURL>
    <CATEGORYTEXT>Letecké zážitky</CATEGORYTEXT>
    <VARIANT>
      <VARIANTID>100-1</VARIANTID>
      <PRICE>2900</PRICE>
      <PRICE_VAT>3509</PRICE_VAT>
      <LOCATION>Praha</LOCATION>
    </VARIANT>
  </SHOPITEM>
  <SHOPITEM>
    <ID>200</ID>
    <PRODUCT>Tandemový seskok Most</PRODUCT>
    <URL>https://www.zazitky.cz/tandemovy-seskok-most/</URL>
    <CATEGORYTEXT>Letecké zážitky</CATEGORYTEXT>
  </SHOPITEM>
  <SHOPITEM>
    <ID>300</ID>
    <PRODUCT>Degustace vína</PRODUCT>
    <URL>https://www.zazitky.cz/degustace-vina/</URL>
    <CATEGORYTEXT>Gastro zážitky</CATEGORYTEXT>
  </SHOPITEM>
</SHOP>"#;

    async fn test_state(server: &MockServer) -> AppState {
        Mock::given(method("GET"))
            .and(path("/export.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(TEST_FEED))
            .mount(server)
            .await;
        let client = FeedClient::new(format!("{}/export.xml", server.uri()), 5, "flylady-test/0.1")
            .expect("feed client");
        let posts = vec![BlogPost {
            slug: "prvni-let".to_string(),
            title: "První let".to_string(),
            description: "Jak probíhá první let.".to_string(),
            date: chrono::NaiveDate::from_ymd_opt(2024, 6, 12),
            cover_image: None,
            content_html: "<p>obsah</p>".to_string(),
        }];
        AppState {
            cache: Arc::new(FeedCache::new(client, Duration::from_secs(3600))),
            posts: Arc::new(posts),
            config: Arc::new(test_config()),
        }
    }

    fn test_config() -> AppConfig {
        AppConfig {
            env: flylady_core::Environment::Test,
            bind_addr: "127.0.0.1:0".parse().expect("addr"),
            log_level: "info".to_string(),
            site_base_url: "https://flylady.cz".to_string(),
            feed_url: String::new(),
            feed_revalidate_secs: 3600,
            feed_timeout_secs: 5,
            feed_user_agent: "flylady-test/0.1".to_string(),
            blog_dir: std::path::PathBuf::from("./content/blog"),
        }
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json = serde_json::from_slice(&body).expect("json parse");
        (status, json)
    }

    #[test]
    fn api_error_not_found_maps_to_404() {
        let response = ApiError::new("not_found", "no such product").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn api_error_feed_unavailable_maps_to_502() {
        let response = ApiError::new("feed_unavailable", "upstream down").into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn health_reports_cold_cache_before_first_fetch() {
        let server = MockServer::start().await;
        let app = build_app(test_state(&server).await);
        let (status, json) = get_json(app, "/api/v1/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["status"].as_str(), Some("ok"));
        assert_eq!(json["data"]["feed_cache"].as_str(), Some("cold"));
    }

    #[tokio::test]
    async fn list_products_returns_only_aviation_items_sorted() {
        let server = MockServer::start().await;
        let app = build_app(test_state(&server).await);
        let (status, json) = get_json(app, "/api/v1/products").await;
        assert_eq!(status, StatusCode::OK);
        let data = json["data"].as_array().expect("data array");
        let names: Vec<&str> = data.iter().filter_map(|p| p["name"].as_str()).collect();
        assert_eq!(names, vec!["Tandemový seskok Most", "Vyhlídkový let Praha"]);
    }

    #[tokio::test]
    async fn get_product_by_slug_returns_detail() {
        let server = MockServer::start().await;
        let app = build_app(test_state(&server).await);
        let (status, json) = get_json(app, "/api/v1/products/vyhlidkovy-let-praha-100").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["id"].as_str(), Some("100"));
        assert_eq!(json["data"]["min_price"].as_f64(), Some(2900.0));
        let url = json["data"]["url"].as_str().expect("url");
        assert!(url.contains("utm_source=flylady.cz"));
    }

    #[tokio::test]
    async fn get_product_falls_back_to_trailing_id() {
        let server = MockServer::start().await;
        let app = build_app(test_state(&server).await);
        // Stale slug from a renamed product still resolves via the id suffix.
        let (status, json) = get_json(app, "/api/v1/products/stary-nazev-100").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["id"].as_str(), Some("100"));
    }

    #[tokio::test]
    async fn get_product_unknown_slug_is_404() {
        let server = MockServer::start().await;
        let app = build_app(test_state(&server).await);
        let (status, json) = get_json(app, "/api/v1/products/neexistuje-999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"].as_str(), Some("not_found"));
    }

    #[tokio::test]
    async fn non_aviation_product_is_not_served() {
        let server = MockServer::start().await;
        let app = build_app(test_state(&server).await);
        let (status, _) = get_json(app, "/api/v1/products/degustace-vina-300").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_categories_classifies_the_catalog() {
        let server = MockServer::start().await;
        let app = build_app(test_state(&server).await);
        let (status, json) = get_json(app, "/api/v1/categories").await;
        assert_eq!(status, StatusCode::OK);
        let groups = json["data"]["groups"].as_array().expect("groups");
        assert_eq!(groups.len(), 7);
        let seskoky = groups
            .iter()
            .find(|g| g["slug"] == "tandemove-seskoky")
            .expect("tandemove-seskoky group");
        assert_eq!(seskoky["products"].as_array().map(Vec::len), Some(1));
        assert_eq!(json["data"]["remaining"].as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn get_category_returns_its_products() {
        let server = MockServer::start().await;
        let app = build_app(test_state(&server).await);
        let (status, json) = get_json(app, "/api/v1/categories/vyhlidkove-lety").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["slug"].as_str(), Some("vyhlidkove-lety"));
        let products = json["data"]["products"].as_array().expect("products");
        assert_eq!(products.len(), 1);
        assert_eq!(products[0]["id"].as_str(), Some("100"));
    }

    #[tokio::test]
    async fn get_category_unknown_slug_is_404() {
        let server = MockServer::start().await;
        let app = build_app(test_state(&server).await);
        let (status, json) = get_json(app, "/api/v1/categories/plavani").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"].as_str(), Some("not_found"));
    }

    #[tokio::test]
    async fn posts_list_and_detail_round_trip() {
        let server = MockServer::start().await;
        let state = test_state(&server).await;
        let (status, json) = get_json(build_app(state.clone()), "/api/v1/posts").await;
        assert_eq!(status, StatusCode::OK);
        let data = json["data"].as_array().expect("data array");
        assert_eq!(data.len(), 1);
        // List omits the rendered body; the detail response carries it.
        assert!(data[0].get("content_html").is_none());

        let (status, json) = get_json(build_app(state), "/api/v1/posts/prvni-let").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["content_html"].as_str(), Some("<p>obsah</p>"));
    }

    #[tokio::test]
    async fn unknown_post_is_404() {
        let server = MockServer::start().await;
        let app = build_app(test_state(&server).await);
        let (status, _) = get_json(app, "/api/v1/posts/neexistuje").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn feed_outage_maps_to_bad_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/export.xml"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        let client = FeedClient::new(format!("{}/export.xml", server.uri()), 5, "flylady-test/0.1")
            .expect("feed client");
        let state = AppState {
            cache: Arc::new(FeedCache::new(client, Duration::from_secs(3600))),
            posts: Arc::new(vec![]),
            config: Arc::new(test_config()),
        };
        let (status, json) = get_json(build_app(state), "/api/v1/products").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["error"]["code"].as_str(), Some("feed_unavailable"));
    }

    #[tokio::test]
    async fn sitemap_lists_static_category_product_and_post_urls() {
        let server = MockServer::start().await;
        let app = build_app(test_state(&server).await);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/sitemap.xml")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some("application/xml")
        );
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let xml = String::from_utf8(body.to_vec()).expect("utf-8 body");
        assert!(xml.contains("<loc>https://flylady.cz/</loc>"));
        assert!(xml.contains("<loc>https://flylady.cz/zazitky</loc>"));
        assert!(xml.contains("<loc>https://flylady.cz/kategorie/vyhlidkove-lety</loc>"));
        assert!(xml.contains("<loc>https://flylady.cz/zazitek/vyhlidkovy-let-praha-100</loc>"));
        assert!(xml.contains("<loc>https://flylady.cz/blog/prvni-let</loc>"));
        assert!(!xml.contains("degustace-vina"));
    }

    #[tokio::test]
    async fn robots_disallows_admin_and_points_at_sitemap() {
        let server = MockServer::start().await;
        let app = build_app(test_state(&server).await);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/robots.txt")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let text = String::from_utf8(body.to_vec()).expect("utf-8 body");
        assert!(text.contains("User-agent: *"));
        assert!(text.contains("Disallow: /admin/"));
        assert!(text.contains("Sitemap: https://flylady.cz/sitemap.xml"));
    }
}
