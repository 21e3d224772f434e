use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::UpdatePostCommand;
use crate::domain::post::ports::PostServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// HTTP request body for replacing a post (raw JSON).
///
/// Same shape as the create payload: updates are full replacements.
#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(default = "default_published")]
    pub published: bool,
}

fn default_published() -> bool {
    true
}

impl UpdatePostRequest {
    fn into_command(self) -> UpdatePostCommand {
        UpdatePostCommand {
            title: self.title,
            content: self.content,
            published: self.published,
        }
    }
}

/// Response body for post operations
#[derive(Debug, Serialize, PartialEq)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub created_at: String,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title,
            content: post.content,
            published: post.published,
            created_at: post.created_at.to_rfc3339(),
        }
    }
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdatePostRequest>,
) -> Result<ApiSuccess<PostResponse>, ApiError> {
    let post_id = PostId::from_string(&id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .post_service
        .update_post(&post_id, req.into_command())
        .await
        .map_err(ApiError::from)
        .map(|post| ApiSuccess::new(StatusCode::OK, post.into()))
}
