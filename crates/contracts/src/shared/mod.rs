pub mod api;
pub mod indicators;
