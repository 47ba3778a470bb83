pub mod a001_product;
pub mod a002_store;
pub mod d400_stock_summary;
