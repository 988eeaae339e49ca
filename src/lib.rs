pub mod api_connection;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod display;
pub mod meal_plan;
pub mod menu_generator;
pub mod notes;
pub mod preferences;
pub mod search;
pub mod session;
