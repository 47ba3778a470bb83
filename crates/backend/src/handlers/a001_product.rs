use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use contracts::shared::selector::{OptionPage, SelectOption};

use crate::domain::a001_product;
use crate::routes::AppState;
use crate::shared::paging::{OptionsQuery, PageWindow};

/// GET /api/a001/product/options
pub async fn search_options(
    State(state): State<AppState>,
    Query(query): Query<OptionsQuery>,
) -> Result<Json<OptionPage>, StatusCode> {
    let window = PageWindow::from_query(&query, &state.selector);
    a001_product::service::search_options(window)
        .await
        .map(Json)
        .map_err(StatusCode::from)
}

/// GET /api/a001/product/options/:id
pub async fn get_option(Path(id): Path<String>) -> Result<Json<SelectOption>, StatusCode> {
    a001_product::service::get_option(&id)
        .await
        .map(Json)
        .map_err(StatusCode::from)
}
