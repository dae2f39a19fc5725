pub mod app_config;
mod lenient;
pub mod server_config;
pub mod sheets_config;
