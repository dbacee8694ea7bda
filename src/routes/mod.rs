use axum::{
    http::StatusCode,
    middleware,
    routing::{delete, get},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    db::FavoritesRepository,
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::{
        AddFavoriteUseCase, GetFavoritesUseCase, MovieSearchProvider, RemoveFavoriteUseCase,
        SearchMoviesUseCase,
    },
};

pub mod favorites;
pub mod movies;
pub mod validation;

/// Shared application state: the use-cases wired to their adapters
pub struct AppState {
    pub search_movies: SearchMoviesUseCase,
    pub add_favorite: AddFavoriteUseCase,
    pub remove_favorite: RemoveFavoriteUseCase,
    pub get_favorites: GetFavoritesUseCase,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn MovieSearchProvider>,
        repository: Arc<dyn FavoritesRepository>,
    ) -> Self {
        Self {
            search_movies: SearchMoviesUseCase::new(provider),
            add_favorite: AddFavoriteUseCase::new(repository.clone()),
            remove_favorite: RemoveFavoriteUseCase::new(repository.clone()),
            get_favorites: GetFavoritesUseCase::new(repository),
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    with_request_layers(api_routes(state))
}

/// Router with CORS applied inside the request-id and trace layers, so CORS
/// preflight responses are traced and carry `x-request-id` too
pub fn create_app(state: Arc<AppState>, cors: CorsLayer) -> Router {
    with_request_layers(api_routes(state).layer(cors))
}

fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/movies/search", get(movies::search))
        .route("/favorites", get(favorites::list).post(favorites::add))
        .route("/favorites/:id", delete(favorites::remove))
        .with_state(state)
}

fn with_request_layers(router: Router) -> Router {
    router
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
