use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use contracts::shared::selector::{OptionPage, SelectOption};

use crate::domain::a002_store;
use crate::routes::AppState;
use crate::shared::paging::{OptionsQuery, PageWindow};

/// GET /api/a002/store/options
pub async fn search_options(
    State(state): State<AppState>,
    Query(query): Query<OptionsQuery>,
) -> Result<Json<OptionPage>, StatusCode> {
    let window = PageWindow::from_query(&query, &state.selector);
    a002_store::service::search_options(window)
        .await
        .map(Json)
        .map_err(StatusCode::from)
}

/// GET /api/a002/store/options/:id
pub async fn get_option(Path(id): Path<String>) -> Result<Json<SelectOption>, StatusCode> {
    a002_store::service::get_option(&id)
        .await
        .map(Json)
        .map_err(StatusCode::from)
}
