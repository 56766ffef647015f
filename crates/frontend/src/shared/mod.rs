pub mod api_utils;
pub mod components;
pub mod config;
pub mod format;
pub mod icons;
pub mod list_utils;
