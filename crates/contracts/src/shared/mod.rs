pub mod cache;
pub mod selector;
pub mod stock_summary;
