//! Wire contracts shared by the storefront network console.

pub mod dashboards;
pub mod domain;
pub mod enums;
pub mod shared;
pub mod system;
