use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use serde::Serialize;

use flylady_blog::BlogPost;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

/// A post as shown in listings: metadata only, no rendered body.
#[derive(Debug, Serialize)]
pub(super) struct PostSummary {
    slug: String,
    title: String,
    description: String,
    date: Option<NaiveDate>,
    cover_image: Option<String>,
}

impl From<&BlogPost> for PostSummary {
    fn from(post: &BlogPost) -> Self {
        Self {
            slug: post.slug.clone(),
            title: post.title.clone(),
            description: post.description.clone(),
            date: post.date,
            cover_image: post.cover_image.clone(),
        }
    }
}

pub(super) async fn list_posts(State(state): State<AppState>) -> Json<ApiResponse<Vec<PostSummary>>> {
    let data = state.posts.iter().map(PostSummary::from).collect();
    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(),
    })
}

pub(super) async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<BlogPost>>, ApiError> {
    let post = state
        .posts
        .iter()
        .find(|post| post.slug == slug)
        .cloned()
        .ok_or_else(|| ApiError::new("not_found", format!("no post for slug {slug}")))?;
    Ok(Json(ApiResponse {
        data: post,
        meta: ResponseMeta::new(),
    }))
}
