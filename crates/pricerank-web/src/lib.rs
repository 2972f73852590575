//! # Pricerank Web
//!
//! HTTP surface for [`pricerank_core::PriceService`].
//!
//! | Route | Description |
//! |-------|-------------|
//! | `GET /health` | Liveness probe, not rate limited |
//! | `GET /prices/:symbol` | Every record of a symbol, in file order |
//! | `GET /prices/:symbol/min` | Cheapest record |
//! | `GET /prices/:symbol/max` | Most expensive record |
//! | `GET /prices/:symbol/oldest` | Earliest record |
//! | `GET /prices/:symbol/newest` | Latest record |
//! | `GET /prices/:symbol/period?from=&to=` | Records inside an inclusive window |
//! | `GET /cryptos/normalized-range` | All symbols ranked by normalized range |
//! | `GET /cryptos/normalized-range/best?date=` | Best normalized range of one day |
//!
//! Errors are returned as `{"error": {"code": "...", "message": "..."}}`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod throttling;

use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::{ConfigError, ServerArgs, ServerConfig};
pub use error::ApiError;
pub use handlers::AppState;
pub use throttling::RequestThrottle;

pub fn create_router(state: AppState, throttle: RequestThrottle) -> Router {
    let prices = Router::new()
        .route("/prices/:symbol", get(handlers::all_prices))
        .route("/prices/:symbol/min", get(handlers::min_price))
        .route("/prices/:symbol/max", get(handlers::max_price))
        .route("/prices/:symbol/oldest", get(handlers::oldest_price))
        .route("/prices/:symbol/newest", get(handlers::newest_price))
        .route("/prices/:symbol/period", get(handlers::prices_in_period))
        .route("/cryptos/normalized-range", get(handlers::all_ranked))
        .route("/cryptos/normalized-range/best", get(handlers::best_for_date))
        .route_layer(from_fn_with_state(throttle, throttling::enforce_rate_limit));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(prices)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use pricerank_core::{CsvLoader, MemoryPriceStore, PriceService, RangeScale, Symbol};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;

    fn app(limit: u32) -> Router {
        let store = MemoryPriceStore::new().with_series(
            Symbol::parse("BTC").expect("symbol"),
            "symbol,timestamp,price\n\
             BTC,1641031200000,46813.21\n\
             BTC,1641052800000,47143.98\n",
        );
        let service =
            PriceService::new(Arc::new(store), CsvLoader::default(), RangeScale::default());
        let throttle = RequestThrottle::new(
            Duration::from_secs(60),
            NonZeroU32::new(limit).expect("non-zero"),
        );
        create_router(AppState::new(service), throttle)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn serves_min_price_as_json() {
        let (status, body) = get(app(10), "/prices/btc/min").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["symbol"], "BTC");
        assert_eq!(body["price"], "46813.21");
        assert_eq!(body["timestamp"], "2022-01-01T10:00:00Z");
    }

    #[tokio::test]
    async fn unknown_symbol_is_not_found() {
        let (status, body) = get(app(10), "/prices/ZZZ/max").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "currency_not_supported");
    }

    #[tokio::test]
    async fn period_requires_both_bounds() {
        let (status, body) = get(app(10), "/prices/BTC/period?from=2022-01-01T00:00").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "invalid_request");
    }

    #[tokio::test]
    async fn malformed_query_string_gets_json_error() {
        let (status, body) = get(
            app(10),
            "/prices/BTC/period?from=2022-01-01T00:00&from=2022-01-01T01:00&to=2022-01-02T00:00",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "invalid_request");
        assert!(body["error"]["message"].is_string());
    }

    #[tokio::test]
    async fn non_utf8_symbol_gets_json_error() {
        let (status, body) = get(app(10), "/prices/%FF/min").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "invalid_request");
    }

    #[tokio::test]
    async fn health_bypasses_throttle() {
        let app = app(1);

        let (first, _) = get(app.clone(), "/cryptos/normalized-range").await;
        assert_eq!(first, StatusCode::OK);

        let (second, body) = get(app.clone(), "/cryptos/normalized-range").await;
        assert_eq!(second, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["error"]["code"], "rate_limited");

        let (health, body) = get(app, "/health").await;
        assert_eq!(health, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
