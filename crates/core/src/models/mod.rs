pub mod expense;
pub mod inventory;
pub mod month;
pub mod mood;
pub mod notice;
pub mod player;
pub mod report;
pub mod settings;
pub mod state;
