use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::SearchResponse,
    routes::AppState,
    services::search_movies::DEFAULT_PAGE,
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: Option<String>,
    page: Option<String>,
}

/// Handler for movie search endpoint
pub async fn search(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<SearchResponse>> {
    let query = params
        .q
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::InvalidInput("Query parameter \"q\" is required".to_string()))?;
    let page = parse_page(params.page.as_deref())?;

    tracing::info!(
        request_id = %request_id,
        query = %query,
        page = page,
        "Processing movie search"
    );

    let movies = state.search_movies.execute(&query, page).await?;

    Ok(Json(SearchResponse {
        total: movies.len(),
        movies,
        page,
    }))
}

fn parse_page(raw: Option<&str>) -> AppResult<u32> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_PAGE),
        Some(value) => value
            .parse::<u32>()
            .ok()
            .filter(|page| *page >= 1)
            .ok_or_else(|| {
                AppError::InvalidInput(format!(
                    "Query parameter \"page\" must be a positive integer, got {:?}",
                    value
                ))
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_defaults_to_first() {
        assert_eq!(parse_page(None).unwrap(), 1);
        assert_eq!(parse_page(Some("")).unwrap(), 1);
    }

    #[test]
    fn test_parse_page_valid() {
        assert_eq!(parse_page(Some("3")).unwrap(), 3);
        assert_eq!(parse_page(Some(" 12 ")).unwrap(), 12);
    }

    #[test]
    fn test_parse_page_invalid() {
        for raw in ["0", "-1", "abc", "1.5"] {
            assert!(
                matches!(parse_page(Some(raw)), Err(AppError::InvalidInput(_))),
                "page {:?} should be rejected",
                raw
            );
        }
    }
}
