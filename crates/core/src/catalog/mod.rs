pub mod manifest;
pub mod selector;
pub mod static_catalog;
pub mod traits;
