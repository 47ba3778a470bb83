use serde::{Deserialize, Serialize};

/// Остаток одного варианта товара в одном магазине
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockBalanceRow {
    pub product_id: String,
    pub product_name: String,
    pub variant_id: String,
    pub variant_name: String,
    pub store_id: String,
    pub store_name: String,
    pub quantity: f64,
}
