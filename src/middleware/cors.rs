use axum::http::{header, HeaderValue, Method};
use tower_http::cors::CorsLayer;

/// CORS for the single frontend origin, with credentials
pub fn cors_layer(frontend_url: &str) -> anyhow::Result<CorsLayer> {
    let origin = HeaderValue::from_str(frontend_url.trim_end_matches('/'))
        .map_err(|e| anyhow::anyhow!("Invalid FRONTEND_URL {:?}: {}", frontend_url, e))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_origin() {
        assert!(cors_layer("http://localhost:3000").is_ok());
        assert!(cors_layer("http://localhost:3000/").is_ok());
    }

    #[test]
    fn test_rejects_invalid_header_value() {
        assert!(cors_layer("http://bad\nhost").is_err());
    }
}
