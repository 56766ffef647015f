pub mod d400_global_overview;
pub mod d401_store_analytics;
pub mod d402_sales_overview;
