pub mod format;
pub mod kv;
pub mod manager;
