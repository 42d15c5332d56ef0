pub mod catalog;
pub mod dashboard;
pub mod driver;
pub mod logger;
pub mod models;
pub mod reporter;
pub mod runner;
pub mod ui;
