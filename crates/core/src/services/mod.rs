pub mod ledger_service;
pub mod mood_service;
pub mod progression_service;
pub mod report_service;
pub mod shop_service;
