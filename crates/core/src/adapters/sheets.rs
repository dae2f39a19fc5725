pub mod auth;
pub mod http_client;
pub mod spreadsheet_manager;
pub mod spreadsheet_submission_repository;
pub mod value_range_factory;
