pub mod a001_store;
pub mod a002_admin;
pub mod a003_order;
