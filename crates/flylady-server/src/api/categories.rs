use axum::{
    extract::{Path, State},
    Json,
};

use flylady_core::{category_by_slug, category_catalog, classify, CategoryGroup, Classified, Product};

use super::{map_feed_error, ApiError, ApiResponse, AppState, ResponseMeta};

/// All categories with their claimed products, plus the unclaimed remainder.
pub(super) async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Classified>>, ApiError> {
    let catalog = state.cache.catalog().await.map_err(|e| map_feed_error(&e))?;
    let aviation: Vec<Product> = catalog.aviation_products().into_iter().cloned().collect();
    Ok(Json(ApiResponse {
        data: classify(&aviation, category_catalog()),
        meta: ResponseMeta::new(),
    }))
}

/// One category's metadata and products. The whole catalog is classified so
/// cross-category exclusivity holds even on a single-category page.
pub(super) async fn get_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<CategoryGroup>>, ApiError> {
    if category_by_slug(&slug).is_none() {
        return Err(ApiError::new(
            "not_found",
            format!("no category for slug {slug}"),
        ));
    }

    let catalog = state.cache.catalog().await.map_err(|e| map_feed_error(&e))?;
    let aviation: Vec<Product> = catalog.aviation_products().into_iter().cloned().collect();
    let classified = classify(&aviation, category_catalog());
    let group = classified
        .groups
        .into_iter()
        .find(|g| g.category.slug == slug)
        .ok_or_else(|| ApiError::new("not_found", format!("no category for slug {slug}")))?;
    Ok(Json(ApiResponse {
        data: group,
        meta: ResponseMeta::new(),
    }))
}
