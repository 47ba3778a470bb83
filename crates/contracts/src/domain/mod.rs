pub mod a001_product;
pub mod a002_store;
pub mod a003_stock_balance;
