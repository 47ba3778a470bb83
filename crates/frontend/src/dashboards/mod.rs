pub mod d400_stock_summary;

pub use d400_stock_summary::ui::StockSummaryDashboard;
