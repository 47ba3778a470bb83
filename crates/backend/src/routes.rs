use axum::{routing::get, Router};

use crate::handlers;
use crate::shared::config::SelectorConfig;

/// Общее состояние для обработчиков
#[derive(Debug, Clone)]
pub struct AppState {
    pub selector: SelectorConfig,
}

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SELECTOR OPTIONS (paged search + lookup by id)
        // ========================================
        // A001 Product
        .route(
            "/api/a001/product/options",
            get(handlers::a001_product::search_options),
        )
        .route(
            "/api/a001/product/options/:id",
            get(handlers::a001_product::get_option),
        )
        // A002 Store
        .route(
            "/api/a002/store/options",
            get(handlers::a002_store::search_options),
        )
        .route(
            "/api/a002/store/options/:id",
            get(handlers::a002_store::get_option),
        )
        // ========================================
        // DASHBOARDS
        // ========================================
        .route(
            "/api/d400/stock-summary",
            get(handlers::d400_stock_summary::list_rows),
        )
        .with_state(state)
}
