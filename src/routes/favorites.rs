use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::Value;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult, FieldError},
    middleware::request_id::RequestId,
    models::{AddFavoriteResponse, FavoritesResponse, RemoveFavoriteResponse},
    routes::{validation::parse_add_favorite, AppState},
};

/// Handler for listing favorites
pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<FavoritesResponse>> {
    let favorites = state.get_favorites.execute().await?;

    Ok(Json(FavoritesResponse {
        total: favorites.len(),
        favorites,
    }))
}

/// Handler for adding a favorite
pub async fn add(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<AddFavoriteResponse>)> {
    let Json(body) = body.map_err(|rejection| {
        AppError::Validation(vec![FieldError::new("body", rejection.body_text())])
    })?;
    let candidate = parse_add_favorite(&body)?;

    tracing::info!(
        request_id = %request_id,
        imdb_id = %candidate.imdb_id,
        "Adding favorite"
    );

    let favorite = state.add_favorite.execute(candidate).await?;

    Ok((
        StatusCode::CREATED,
        Json(AddFavoriteResponse {
            favorite,
            message: "Movie added to favorites".to_string(),
        }),
    ))
}

/// Handler for removing a favorite
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> AppResult<Json<RemoveFavoriteResponse>> {
    tracing::info!(request_id = %request_id, favorite_id = %id, "Removing favorite");

    state.remove_favorite.execute(&id).await?;

    Ok(Json(RemoveFavoriteResponse {
        success: true,
        message: "Favorite removed successfully".to_string(),
    }))
}
