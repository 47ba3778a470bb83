use axum::{http::StatusCode, Json};
use contracts::domain::a003_stock_balance::aggregate::StockBalanceRow;

use crate::domain::a003_stock_balance;

/// GET /api/d400/stock-summary
pub async fn list_rows() -> Result<Json<Vec<StockBalanceRow>>, StatusCode> {
    match a003_stock_balance::service::list_rows().await {
        Ok(rows) => Ok(Json(rows)),
        Err(e) => {
            tracing::error!("Failed to load stock summary: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
