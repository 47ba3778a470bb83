use contracts::domain::a003_stock_balance::aggregate::StockBalanceRow;
use std::collections::HashMap;

use super::repository;
use crate::domain::{a001_product, a002_store};

/// Плоские строки остатков с подставленными наименованиями.
/// Строки со ссылками на удалённые товары/магазины пропускаются.
pub async fn list_rows() -> anyhow::Result<Vec<StockBalanceRow>> {
    let products: HashMap<String, String> = a001_product::repository::list_all()
        .await?
        .into_iter()
        .map(|p| (p.id.as_string(), p.description))
        .collect();
    let stores: HashMap<String, String> = a002_store::repository::list_all()
        .await?
        .into_iter()
        .map(|s| (s.id.as_string(), s.description))
        .collect();

    let balances = repository::list_all().await?;
    let total = balances.len();
    let rows: Vec<StockBalanceRow> = balances
        .into_iter()
        .filter_map(|b| {
            let product_name = products.get(&b.product_id)?.clone();
            let store_name = stores.get(&b.store_id)?.clone();
            Some(StockBalanceRow {
                product_id: b.product_id,
                product_name,
                variant_id: b.variant_id,
                variant_name: b.variant_name,
                store_id: b.store_id,
                store_name,
                quantity: b.quantity,
            })
        })
        .collect();

    if rows.len() < total {
        tracing::warn!(
            "Skipped {} stock balance rows with dangling references",
            total - rows.len()
        );
    }
    Ok(rows)
}
