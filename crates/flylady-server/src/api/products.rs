use axum::{
    extract::{Path, State},
    Json,
};

use flylady_core::{text::id_from_slug, Product};

use super::{map_feed_error, ApiError, ApiResponse, AppState, ResponseMeta};

pub(super) async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Product>>>, ApiError> {
    let catalog = state.cache.catalog().await.map_err(|e| map_feed_error(&e))?;
    let data = catalog
        .aviation_products()
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(),
    }))
}

/// Product detail by slug. A slug that no longer matches (the upstream name
/// changed, so the slug changed with it) still resolves through the trailing
/// id segment.
pub(super) async fn get_product(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<Product>>, ApiError> {
    let catalog = state.cache.catalog().await.map_err(|e| map_feed_error(&e))?;
    let product = catalog
        .product_by_slug(&slug)
        .or_else(|| catalog.product_by_id(id_from_slug(&slug)))
        .cloned()
        .ok_or_else(|| ApiError::new("not_found", format!("no product for slug {slug}")))?;
    Ok(Json(ApiResponse {
        data: product,
        meta: ResponseMeta::new(),
    }))
}
