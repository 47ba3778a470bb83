use contracts::domain::a003_stock_balance::aggregate::StockBalanceRow;

use crate::shared::api_utils::{api_url, get_json};

const API_BASE: &str = "/api/d400";

/// Получить остатки (товар × вариант × магазин)
pub async fn get_stock_rows() -> Result<Vec<StockBalanceRow>, String> {
    let url = api_url(&format!("{}/stock-summary", API_BASE));
    get_json::<Vec<StockBalanceRow>>(&url)
        .await
        .map_err(|e| format!("Не удалось загрузить остатки: {}", e))
}
